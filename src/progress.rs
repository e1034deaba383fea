//! Progress metrics and percentage-threshold milestone detection.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency;
use crate::model::{Debt, Milestone, MilestoneType, Payment};

/// Where a debt stands relative to its original balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtProgress {
    /// Share of the original balance already paid down, as a percentage.
    pub percentage_paid: Decimal,
    pub remaining_balance: Decimal,
    /// `ceil(balance / minimum_payment)` — an interest-blind estimate; the
    /// simulators are the interest-aware view.
    pub months_remaining: u32,
    /// Now plus `months_remaining`; `None` once the debt is clear.
    pub projected_payoff_date: Option<DateTime<Utc>>,
    /// Payments per month over the span from the earliest payment to now.
    pub payment_velocity: Decimal,
}

const MILESTONE_THRESHOLDS: [(Decimal, MilestoneType); 4] = [
    (dec!(25), MilestoneType::TwentyFivePercentPaid),
    (dec!(50), MilestoneType::FiftyPercentPaid),
    (dec!(75), MilestoneType::SeventyFivePercentPaid),
    (dec!(100), MilestoneType::PaidOff),
];

/// Summarizes a debt's progress from its current state and payment history.
pub fn calculate_progress(debt: &Debt, payments: &[Payment]) -> DebtProgress {
    let percentage_paid = if debt.original_balance.is_zero() {
        Decimal::ZERO
    } else {
        ((debt.original_balance - debt.balance) / debt.original_balance * dec!(100)).round_dp(2)
    };

    let months_remaining = if debt.minimum_payment.is_zero() {
        0
    } else {
        (debt.balance / debt.minimum_payment)
            .ceil()
            .to_u32()
            .unwrap_or(0)
    };

    let now = Utc::now();
    let projected_payoff_date = if months_remaining > 0 {
        now.checked_add_months(Months::new(months_remaining))
    } else {
        None
    };

    DebtProgress {
        percentage_paid,
        remaining_balance: debt.balance,
        months_remaining,
        projected_payoff_date,
        payment_velocity: payment_velocity(payments, now),
    }
}

/// Payments per month since the earliest recorded payment. A single payment
/// reads as 1/month; a same-day cluster reads as the cluster size per month.
fn payment_velocity(payments: &[Payment], now: DateTime<Utc>) -> Decimal {
    let count = Decimal::from(payments.len());
    let Some(earliest) = payments.iter().map(|p| p.payment_date).min() else {
        return Decimal::ZERO;
    };
    if payments.len() == 1 {
        return dec!(1);
    }
    let span_months = Decimal::from((now - earliest).num_days().max(0)) / dec!(30);
    if span_months <= Decimal::ZERO {
        count
    } else {
        (count / span_months).round_dp(2)
    }
}

/// Detects the percentage milestones a new payment would cross.
///
/// The post-payment balance is the hypothetical `max(0, balance - amount)` —
/// the raw payment amount, not the recorder's interest/principal split — so a
/// milestone can fire a fraction of a cycle before or after the ledger's own
/// balance crosses the line. Returns one milestone per threshold reached or
/// exceeded; stateless, so callers must not re-emit thresholds already
/// recorded for the debt.
pub fn detect_milestones(debt: &Debt, new_payment: &Payment) -> Vec<Milestone> {
    if debt.original_balance.is_zero() {
        return Vec::new();
    }

    let hypothetical_balance = currency::max(
        Decimal::ZERO,
        currency::sub(debt.balance, new_payment.amount),
    );
    let percentage_paid = (debt.original_balance - hypothetical_balance)
        / debt.original_balance
        * dec!(100);

    MILESTONE_THRESHOLDS
        .iter()
        .filter(|(threshold, _)| percentage_paid >= *threshold)
        .map(|(threshold, milestone_type)| Milestone {
            id: Uuid::new_v4(),
            debt_id: debt.id,
            milestone_type: *milestone_type,
            achieved_date: new_payment.payment_date,
            milestone_value: hypothetical_balance,
            description: match milestone_type {
                MilestoneType::PaidOff => format!("{} fully paid off", debt.name),
                _ => format!("{threshold}% of the original {} balance paid", debt.name),
            },
        })
        .collect()
}
