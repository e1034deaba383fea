//! Splitting a payment into interest and principal portions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::currency;

/// The interest/principal split of a single payment amount.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentBreakdown {
    pub interest_portion: Decimal,
    pub principal_portion: Decimal,
}

/// Converts an annual percentage rate into the monthly decimal rate.
pub(crate) fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / dec!(100) / dec!(12)
}

/// Splits `amount` into the interest accrued since the last payment and the
/// principal remainder.
///
/// Interest is one month's worth (`balance * rate / 100 / 12`) prorated by
/// `elapsed_days / 30` — a simplified day-prorated model, not true daily
/// compounding. A missing date defaults to now, so omitting both means zero
/// elapsed days and an all-principal split. Interest is capped at the payment
/// amount; the portions always sum to `amount` when `amount >= 0`.
pub fn split_payment(
    balance: Decimal,
    annual_rate: Decimal,
    amount: Decimal,
    payment_date: Option<DateTime<Utc>>,
    last_payment_date: Option<DateTime<Utc>>,
) -> PaymentBreakdown {
    let now = Utc::now();
    let paid_on = payment_date.unwrap_or(now);
    let last_paid_on = last_payment_date.unwrap_or(now);
    let elapsed_days = (paid_on - last_paid_on).num_days().max(0);

    let accrued = currency::round(
        balance * monthly_rate(annual_rate) * Decimal::from(elapsed_days) / dec!(30),
    );
    let interest_portion = currency::min(accrued, amount);
    let principal_portion = currency::max(Decimal::ZERO, currency::sub(amount, interest_portion));

    PaymentBreakdown {
        interest_portion,
        principal_portion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[test]
    fn test_no_dates_means_all_principal() {
        let split = split_payment(dec!(1000), dec!(12), dec!(100), None, None);
        assert_eq!(split.interest_portion, Decimal::ZERO);
        assert_eq!(split.principal_portion, dec!(100));
    }

    #[test]
    fn test_full_cycle_accrues_one_month_of_interest() {
        let last = Utc::now();
        let paid = last + Duration::days(30);
        // 12%/yr on 1000 is 10.00 per month.
        let split = split_payment(dec!(1000), dec!(12), dec!(100), Some(paid), Some(last));
        assert_eq!(split.interest_portion, dec!(10.00));
        assert_eq!(split.principal_portion, dec!(90.00));
    }

    #[test]
    fn test_interest_capped_at_payment_amount() {
        let last = Utc::now();
        let paid = last + Duration::days(30);
        let split = split_payment(dec!(1000), dec!(12), dec!(5), Some(paid), Some(last));
        assert_eq!(split.interest_portion, dec!(5));
        assert_eq!(split.principal_portion, Decimal::ZERO);
    }

    #[test]
    fn test_backdated_payment_clamps_to_zero_days() {
        let last = Utc::now();
        let paid = last - Duration::days(10);
        let split = split_payment(dec!(1000), dec!(12), dec!(100), Some(paid), Some(last));
        assert_eq!(split.interest_portion, Decimal::ZERO);
        assert_eq!(split.principal_portion, dec!(100));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(0.01))]
    #[case(dec!(57.68))]
    #[case(dec!(1000))]
    fn test_portions_sum_to_amount(#[case] amount: Decimal) {
        let last = Utc::now();
        let paid = last + Duration::days(45);
        let split = split_payment(dec!(843.21), dec!(18.99), amount, Some(paid), Some(last));
        assert_eq!(split.interest_portion + split.principal_portion, amount);
        assert!(split.principal_portion >= Decimal::ZERO);
    }
}
