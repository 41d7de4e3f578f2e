//! Common utility functions for the take-home pay calculations.
//!
//! Every amount in the calculations is whole yen: intermediate products are
//! floored, never rounded half-up.

use rust_decimal::Decimal;

/// Floors a yen amount to the whole yen below it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yen_core::calculations::common::floor_yen;
///
/// assert_eq!(floor_yen(dec!(368499.7)), dec!(368499));
/// assert_eq!(floor_yen(dec!(7738.5)), dec!(7738));
/// assert_eq!(floor_yen(dec!(1200)), dec!(1200));
/// ```
pub fn floor_yen(value: Decimal) -> Decimal {
    value.floor()
}

/// Floors `amount × rate` to whole yen.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yen_core::calculations::common::floor_product;
///
/// assert_eq!(floor_product(dec!(6000000), dec!(0.0915)), dec!(549000));
/// assert_eq!(floor_product(dec!(368499), dec!(0.021)), dec!(7738));
/// ```
pub fn floor_product(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    floor_yen(amount * rate)
}

/// Clamps a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use yen_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-100)), Decimal::ZERO);
/// assert_eq!(non_negative(dec!(250)), dec!(250));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Formats an amount with comma thousands separators. Any fractional part is
/// kept as is.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yen_core::calculations::common::group_thousands;
///
/// assert_eq!(group_thousands(dec!(4305462)), "4,305,462");
/// assert_eq!(group_thousands(dec!(600)), "600");
/// ```
pub fn group_thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // floor_yen tests
    // =========================================================================

    #[test]
    fn floor_yen_drops_fraction() {
        assert_eq!(floor_yen(dec!(123.999)), dec!(123));
    }

    #[test]
    fn floor_yen_preserves_whole_amounts() {
        assert_eq!(floor_yen(dec!(550000)), dec!(550000));
    }

    #[test]
    fn floor_yen_handles_zero() {
        assert_eq!(floor_yen(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn floor_yen_rounds_negative_values_down() {
        assert_eq!(floor_yen(dec!(-0.5)), dec!(-1));
    }

    // =========================================================================
    // floor_product tests
    // =========================================================================

    #[test]
    fn floor_product_is_exact_in_decimal() {
        // 0.1 + 0.2 style float drift must not shave off a yen.
        assert_eq!(floor_product(dec!(4360000), dec!(0.10)), dec!(436000));
    }

    #[test]
    fn floor_product_floors_fractional_result() {
        assert_eq!(floor_product(dec!(1000001), dec!(0.006)), dec!(6000));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_keeps_zero() {
        assert_eq!(non_negative(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn non_negative_clamps_negative() {
        assert_eq!(non_negative(dec!(-380000)), Decimal::ZERO);
    }

    // =========================================================================
    // group_thousands tests
    // =========================================================================

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(dec!(1200)), "1,200");
        assert_eq!(group_thousands(dec!(1234567)), "1,234,567");
        assert_eq!(group_thousands(dec!(100000000)), "100,000,000");
    }

    #[test]
    fn group_thousands_keeps_fraction_and_sign() {
        assert_eq!(group_thousands(dec!(612.5)), "612.5");
        assert_eq!(group_thousands(dec!(-1000)), "-1,000");
        assert_eq!(group_thousands(dec!(0)), "0");
    }
}
