//! Recording, editing and reversing payments against a debt.
//!
//! Every function here returns new values; the caller's `Debt` and `Payment`
//! are never mutated in place. Persisting the returned copies atomically is
//! the storage layer's job.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::breakdown::{PaymentBreakdown, split_payment};
use crate::currency;
use crate::model::{Debt, DebtStatus, Payment, PaymentType};

/// Caller-supplied fields for a new payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub payment_type: PaymentType,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Partial update to an existing payment. `None` fields keep their current
/// value.
#[derive(Debug, Clone, Default)]
pub struct PaymentUpdate {
    pub amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_type: Option<PaymentType>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Result of applying a payment's breakdown to a debt balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedPayment {
    pub new_balance: Decimal,
    pub breakdown: PaymentBreakdown,
}

/// A recorded (or re-recorded) payment together with the debt that absorbed
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPayment {
    pub updated_debt: Debt,
    pub payment: Payment,
}

/// Computes the balance a payment would leave on `debt`.
///
/// Only the principal portion reduces the balance; interest is tracked in the
/// debt's accumulators. The result is clamped at zero.
pub fn apply_payment(
    debt: &Debt,
    input: &PaymentInput,
    last_payment_date: Option<DateTime<Utc>>,
) -> AppliedPayment {
    let breakdown = split_payment(
        debt.balance,
        debt.interest_rate,
        input.amount,
        Some(input.payment_date),
        last_payment_date,
    );
    let new_balance = currency::max(
        Decimal::ZERO,
        currency::sub(debt.balance, breakdown.principal_portion),
    );
    AppliedPayment {
        new_balance,
        breakdown,
    }
}

/// Records a payment: returns the updated debt copy and the freshly minted
/// payment row.
pub fn record_payment(
    debt: &Debt,
    input: PaymentInput,
    last_payment_date: Option<DateTime<Utc>>,
) -> RecordedPayment {
    let applied = apply_payment(debt, &input, last_payment_date);

    let mut updated_debt = debt.clone();
    updated_debt.balance = applied.new_balance;
    updated_debt.total_interest_paid = currency::add(
        debt.total_interest_paid,
        applied.breakdown.interest_portion,
    );
    updated_debt.total_payments_made = currency::add(debt.total_payments_made, input.amount);
    if updated_debt.balance.is_zero() {
        updated_debt.status = DebtStatus::PaidOff;
    }

    debug!(
        debt = %debt.name,
        amount = %input.amount,
        new_balance = %applied.new_balance,
        "recorded payment"
    );

    let payment = Payment {
        id: Uuid::new_v4(),
        debt_id: debt.id,
        amount: input.amount,
        payment_date: input.payment_date,
        payment_type: input.payment_type,
        interest_portion: applied.breakdown.interest_portion,
        principal_portion: applied.breakdown.principal_portion,
        balance_after_payment: Some(applied.new_balance),
        payment_method: input.payment_method,
        notes: input.notes,
    };

    RecordedPayment {
        updated_debt,
        payment,
    }
}

/// Edits a previously recorded payment.
///
/// The breakdown is recomputed against the debt's *current* balance — not the
/// balance as of just before the original payment — with the merged date as
/// the payment date and the original payment's date as the elapsed-time
/// anchor. Sequential edits therefore do not commute. Accumulators are
/// adjusted by the old-to-new deltas so reversing the edited payment still
/// restores them.
pub fn edit_payment(debt: &Debt, existing: &Payment, updates: PaymentUpdate) -> RecordedPayment {
    let amount = updates.amount.unwrap_or(existing.amount);
    let payment_date = updates.payment_date.unwrap_or(existing.payment_date);

    let breakdown = split_payment(
        debt.balance,
        debt.interest_rate,
        amount,
        Some(payment_date),
        Some(existing.payment_date),
    );
    let new_balance = currency::max(
        Decimal::ZERO,
        currency::sub(debt.balance, breakdown.principal_portion),
    );

    let mut updated_debt = debt.clone();
    updated_debt.balance = new_balance;
    updated_debt.total_interest_paid = currency::add(
        currency::sub(debt.total_interest_paid, existing.interest_portion),
        breakdown.interest_portion,
    );
    updated_debt.total_payments_made = currency::add(
        currency::sub(debt.total_payments_made, existing.amount),
        amount,
    );
    updated_debt.status = if new_balance.is_zero() {
        DebtStatus::PaidOff
    } else if debt.status == DebtStatus::PaidOff {
        DebtStatus::Active
    } else {
        debt.status
    };

    debug!(debt = %debt.name, payment = %existing.id, "edited payment");

    let payment = Payment {
        id: existing.id,
        debt_id: existing.debt_id,
        amount,
        payment_date,
        payment_type: updates.payment_type.unwrap_or_else(|| existing.payment_type.clone()),
        interest_portion: breakdown.interest_portion,
        principal_portion: breakdown.principal_portion,
        balance_after_payment: Some(new_balance),
        payment_method: updates.payment_method.or_else(|| existing.payment_method.clone()),
        notes: updates.notes.or_else(|| existing.notes.clone()),
    };

    RecordedPayment {
        updated_debt,
        payment,
    }
}

/// Undoes a payment's effect on the debt: the exact algebraic inverse of
/// [`record_payment`] on balance and both accumulators.
pub fn reverse_payment(debt: &Debt, payment: &Payment) -> Debt {
    let mut updated_debt = debt.clone();
    updated_debt.balance = currency::add(debt.balance, payment.principal_portion);
    updated_debt.total_interest_paid =
        currency::sub(debt.total_interest_paid, payment.interest_portion);
    updated_debt.total_payments_made = currency::sub(debt.total_payments_made, payment.amount);
    if updated_debt.balance > Decimal::ZERO && updated_debt.status == DebtStatus::PaidOff {
        updated_debt.status = DebtStatus::Active;
    }

    debug!(debt = %debt.name, payment = %payment.id, "reversed payment");

    updated_debt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn card() -> Debt {
        Debt::new("Visa", dec!(1000), dec!(12), dec!(50))
    }

    fn input(amount: Decimal) -> PaymentInput {
        PaymentInput {
            amount,
            payment_date: Utc::now(),
            payment_type: PaymentType::Minimum,
            payment_method: None,
            notes: None,
        }
    }

    #[test]
    fn test_record_payment_updates_debt_and_mints_payment() {
        let debt = card();
        let last = Utc::now() - Duration::days(30);

        let recorded = record_payment(&debt, input(dec!(100)), Some(last));

        // One 30-day cycle at 12%/yr on 1000 accrues 10.00 of interest.
        assert_eq!(recorded.payment.interest_portion, dec!(10.00));
        assert_eq!(recorded.payment.principal_portion, dec!(90.00));
        assert_eq!(recorded.updated_debt.balance, dec!(910.00));
        assert_eq!(recorded.updated_debt.total_interest_paid, dec!(10.00));
        assert_eq!(recorded.updated_debt.total_payments_made, dec!(100));
        assert_eq!(recorded.payment.balance_after_payment, Some(dec!(910.00)));
        assert_eq!(recorded.payment.debt_id, debt.id);
        // The input debt is untouched.
        assert_eq!(debt.balance, dec!(1000));
    }

    #[test]
    fn test_record_payment_never_drives_balance_negative() {
        let mut debt = card();
        debt.balance = dec!(40);

        let recorded = record_payment(&debt, input(dec!(100)), None);

        assert_eq!(recorded.updated_debt.balance, Decimal::ZERO);
        assert_eq!(recorded.updated_debt.status, DebtStatus::PaidOff);
    }

    #[test]
    fn test_reverse_is_exact_inverse_of_record() {
        let debt = card();
        let last = Utc::now() - Duration::days(45);

        let recorded = record_payment(&debt, input(dec!(150)), Some(last));
        let restored = reverse_payment(&recorded.updated_debt, &recorded.payment);

        assert_eq!(restored.balance, debt.balance);
        assert_eq!(restored.total_interest_paid, debt.total_interest_paid);
        assert_eq!(restored.total_payments_made, debt.total_payments_made);
    }

    #[test]
    fn test_reverse_reopens_a_paid_off_debt() {
        let mut debt = card();
        debt.balance = dec!(100);

        let recorded = record_payment(&debt, input(dec!(100)), None);
        assert_eq!(recorded.updated_debt.status, DebtStatus::PaidOff);

        let restored = reverse_payment(&recorded.updated_debt, &recorded.payment);
        assert_eq!(restored.status, DebtStatus::Active);
        assert_eq!(restored.balance, dec!(100));
    }

    #[test]
    fn test_edit_recomputes_against_current_balance() {
        let debt = card();
        let recorded = record_payment(&debt, input(dec!(100)), None);

        // Bump the amount; no date change means zero elapsed days, so the
        // edited payment is all principal against the current 900 balance.
        let edited = edit_payment(
            &recorded.updated_debt,
            &recorded.payment,
            PaymentUpdate {
                amount: Some(dec!(200)),
                ..PaymentUpdate::default()
            },
        );

        assert_eq!(edited.payment.amount, dec!(200));
        assert_eq!(edited.payment.principal_portion, dec!(200));
        assert_eq!(edited.updated_debt.balance, dec!(700.00));
        assert_eq!(edited.updated_debt.total_payments_made, dec!(200));
        assert_eq!(edited.payment.id, recorded.payment.id);
    }

    #[test]
    fn test_edit_with_later_date_accrues_interest() {
        let debt = card();
        let recorded = record_payment(&debt, input(dec!(100)), None);

        let edited = edit_payment(
            &recorded.updated_debt,
            &recorded.payment,
            PaymentUpdate {
                payment_date: Some(recorded.payment.payment_date + Duration::days(30)),
                ..PaymentUpdate::default()
            },
        );

        // One cycle at 12%/yr on the current 900 balance is 9.00.
        assert_eq!(edited.payment.interest_portion, dec!(9.00));
        assert_eq!(edited.payment.principal_portion, dec!(91.00));
        assert_eq!(edited.updated_debt.balance, dec!(809.00));
    }
}
