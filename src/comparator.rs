//! Minimum-payments-only baseline and side-by-side strategy comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breakdown::monthly_rate;
use crate::currency;
use crate::model::Debt;
use crate::simulator::{
    AvalanchePlan, MAX_SIMULATION_MONTHS, SnowballPlan, simulate_avalanche, simulate_snowball,
};

/// Portfolio timeline when every debt only ever receives its own minimum
/// payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumPaymentBaseline {
    /// Months until the slowest debt clears (or the safety cap).
    pub total_months: u32,
    /// Interest accrued across all debts.
    pub total_interest: Decimal,
}

/// Both strategies run against the same debts and budget, with the derived
/// comparison metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: AvalanchePlan,
    pub snowball: SnowballPlan,
    /// Balance-weighted mean of the annual rates.
    pub weighted_average_interest_rate: Decimal,
    /// Snowball's raw interest minus avalanche's savings-vs-baseline delta,
    /// reconstructing a common total-interest basis for the two reports.
    pub interest_savings_with_avalanche: Decimal,
    /// Snowball months minus avalanche months. Signed: the strategies tie
    /// when the smallest balance also carries the highest rate.
    pub time_savings_with_avalanche: i64,
    /// Debts the snowball plan eliminates within its first year.
    pub motivational_benefit_of_snowball: u32,
}

/// Effect of raising the monthly budget on an avalanche plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetImpact {
    pub current_budget: Decimal,
    pub increased_budget: Decimal,
    pub months_saved: i64,
    pub interest_saved: Decimal,
    pub percentage_improvement: Decimal,
}

/// Amortizes each debt in isolation under only its own minimum payment.
///
/// Deliberately budget-agnostic: it answers "what if nobody coordinated
/// extra payments", the comparison basis for interest-saved metrics. The
/// portfolio horizon is the maximum months across debts, each capped at
/// [`MAX_SIMULATION_MONTHS`].
pub fn estimate_minimum_payment_timeline(debts: &[Debt]) -> MinimumPaymentBaseline {
    let mut total_months = 0u32;
    let mut total_interest = Decimal::ZERO;

    for debt in debts {
        let mut balance = debt.balance;
        let mut months = 0u32;
        while balance > Decimal::ZERO && months < MAX_SIMULATION_MONTHS {
            let accrued = currency::mul(balance, monthly_rate(debt.interest_rate));
            balance = currency::add(balance, accrued);
            total_interest = currency::add(total_interest, accrued);
            let pay = currency::min(debt.minimum_payment, balance);
            balance = currency::sub(balance, pay);
            months += 1;
        }
        total_months = total_months.max(months);
    }

    MinimumPaymentBaseline {
        total_months,
        total_interest,
    }
}

/// Runs both strategies and derives the comparative metrics.
///
/// # Errors
///
/// Fails when the budget does not cover the sum of minimum payments.
pub fn compare_strategies(
    debts: &[Debt],
    monthly_budget: Decimal,
) -> anyhow::Result<StrategyComparison> {
    let avalanche = simulate_avalanche(debts, monthly_budget)?;
    let snowball = simulate_snowball(debts, monthly_budget)?;

    let interest_savings_with_avalanche = currency::sub(
        snowball.plan.total_interest_paid,
        avalanche.total_interest_saved,
    );
    let time_savings_with_avalanche = i64::from(snowball.plan.total_months_to_debt_free)
        - i64::from(avalanche.plan.total_months_to_debt_free);
    let motivational_benefit_of_snowball = snowball
        .debts_eliminated_by_month
        .iter()
        .filter(|e| e.month <= 12)
        .count() as u32;

    debug!(
        avalanche_months = avalanche.plan.total_months_to_debt_free,
        snowball_months = snowball.plan.total_months_to_debt_free,
        "compared payoff strategies"
    );

    Ok(StrategyComparison {
        weighted_average_interest_rate: weighted_average_rate(debts),
        avalanche,
        snowball,
        interest_savings_with_avalanche,
        time_savings_with_avalanche,
        motivational_benefit_of_snowball,
    })
}

/// Balance-weighted mean annual rate across `debts`; zero when nothing is
/// owed.
pub fn weighted_average_rate(debts: &[Debt]) -> Decimal {
    let total_balance: Decimal = debts.iter().map(|d| d.balance).sum();
    if total_balance.is_zero() {
        return Decimal::ZERO;
    }
    let weighted: Decimal = debts.iter().map(|d| d.balance * d.interest_rate).sum();
    (weighted / total_balance).round_dp(2)
}

/// Re-runs the avalanche plan at two budgets and reports what the increase
/// buys.
///
/// # Errors
///
/// Fails when either budget does not cover the sum of minimum payments.
pub fn calculate_budget_impact(
    debts: &[Debt],
    current_budget: Decimal,
    increased_budget: Decimal,
) -> anyhow::Result<BudgetImpact> {
    let current = simulate_avalanche(debts, current_budget)?;
    let increased = simulate_avalanche(debts, increased_budget)?;

    let months_saved = i64::from(current.plan.total_months_to_debt_free)
        - i64::from(increased.plan.total_months_to_debt_free);
    let interest_saved = currency::sub(
        current.plan.total_interest_paid,
        increased.plan.total_interest_paid,
    );
    let percentage_improvement = if current.plan.total_months_to_debt_free == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(months_saved) / Decimal::from(current.plan.total_months_to_debt_free)
            * dec!(100))
        .round_dp(2)
    };

    Ok(BudgetImpact {
        current_budget,
        increased_budget,
        months_saved,
        interest_saved,
        percentage_improvement,
    })
}
