use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::floor_yen;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// The period over which an amount is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Annual,
    Monthly,
}

impl Period {
    /// Converts an annual amount to this period. Monthly amounts are
    /// `floor(annual / 12)`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use yen_core::Period;
    ///
    /// assert_eq!(Period::Monthly.amount(dec!(4305462)), dec!(358788));
    /// assert_eq!(Period::Annual.amount(dec!(4305462)), dec!(4305462));
    /// ```
    pub fn amount(
        &self,
        annual: Decimal,
    ) -> Decimal {
        match self {
            Self::Annual => annual,
            Self::Monthly => floor_yen(annual / MONTHS_PER_YEAR),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn monthly_amount_floors() {
        assert_eq!(Period::Monthly.amount(dec!(1000)), dec!(83));
        assert_eq!(Period::Monthly.amount(dec!(11)), dec!(0));
    }

    #[test]
    fn monthly_amount_is_exact_for_multiples_of_twelve() {
        assert_eq!(Period::Monthly.amount(dec!(6000000)), dec!(500000));
    }

    #[test]
    fn annual_amount_is_unchanged() {
        assert_eq!(Period::Annual.amount(dec!(1234567)), dec!(1234567));
    }
}
