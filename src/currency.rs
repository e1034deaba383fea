//! Fixed-precision currency arithmetic.
//!
//! Every monetary computation in the crate goes through these helpers so
//! repeated additions and rate multiplications stay canonical at two decimal
//! places. Values are `rust_decimal::Decimal`, never binary floating point.

use rust_decimal::Decimal;

/// Rounds an amount to whole cents.
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Adds two amounts, rounded to cents.
pub fn add(a: Decimal, b: Decimal) -> Decimal {
    round(a + b)
}

/// Subtracts `b` from `a`, rounded to cents.
pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    round(a - b)
}

/// Multiplies an amount by a scalar factor, rounded to cents.
pub fn mul(amount: Decimal, factor: Decimal) -> Decimal {
    round(amount * factor)
}

/// Divides an amount by a scalar, rounded to cents.
///
/// A zero divisor yields zero, mirroring the lenient default of [`parse`].
pub fn div(amount: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        Decimal::ZERO
    } else {
        round(amount / divisor)
    }
}

/// Sums a sequence of amounts, rounded to cents.
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round(amounts.into_iter().sum())
}

/// The smaller of two amounts.
pub fn min(a: Decimal, b: Decimal) -> Decimal {
    a.min(b)
}

/// The larger of two amounts.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    a.max(b)
}

/// Parses an amount from user input.
///
/// Strips everything except digits, the decimal point and a sign before
/// parsing, so `"$1,234.56"` and `"1234.56 USD"` both work. Input that still
/// fails to parse defaults to zero.
pub fn parse(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<Decimal>().map(round).unwrap_or(Decimal::ZERO)
}

/// Formats an amount for display, e.g. `-1234.5` becomes `"-$1,234.50"`.
pub fn format(amount: Decimal) -> String {
    let rounded = round(amount);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${grouped}.{cents}")
    } else {
        format!("${grouped}.{cents}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round(dec!(10.005)), dec!(10.01));
        assert_eq!(round(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn test_arithmetic_stays_canonical() {
        assert_eq!(add(dec!(0.1), dec!(0.2)), dec!(0.30));
        assert_eq!(sub(dec!(100), dec!(33.333)), dec!(66.67));
        assert_eq!(mul(dec!(1000), dec!(0.0158333)), dec!(15.83));
        assert_eq!(div(dec!(100), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_div_by_zero_defaults_to_zero() {
        assert_eq!(div(dec!(100), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_sum() {
        let total = sum([dec!(19.99), dec!(0.01), dec!(5)]);
        assert_eq!(total, dec!(25.00));
    }

    #[rstest]
    #[case("$1,234.56", dec!(1234.56))]
    #[case("1234.56 USD", dec!(1234.56))]
    #[case("-$99.95", dec!(-99.95))]
    #[case("42", dec!(42))]
    #[case("", dec!(0))]
    #[case("not a number", dec!(0))]
    #[case("1.2.3", dec!(0))]
    fn test_parse(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse(input), expected);
    }

    #[rstest]
    #[case(dec!(0), "$0.00")]
    #[case(dec!(5.5), "$5.50")]
    #[case(dec!(1234.56), "$1,234.56")]
    #[case(dec!(1000000), "$1,000,000.00")]
    #[case(dec!(-99.95), "-$99.95")]
    fn test_format(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format(amount), expected);
    }

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(750))]
    #[case(dec!(18999.99))]
    #[case(dec!(-42.42))]
    fn test_format_parse_round_trip(#[case] amount: Decimal) {
        let displayed = format(amount);
        assert_eq!(format(parse(&displayed)), displayed);
    }
}
