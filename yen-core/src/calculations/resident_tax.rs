//! Resident tax (住民税).
//!
//! A flat share of taxable income, split between the prefecture and the
//! municipality. The municipal part is the remainder so that the two parts
//! always add up to the total.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::floor_product;
use crate::{ResidentTax, ResidentTaxConfig};

#[derive(Debug, Clone)]
pub struct ResidentTaxCalculator<'a> {
    config: &'a ResidentTaxConfig,
}

impl<'a> ResidentTaxCalculator<'a> {
    pub fn new(config: &'a ResidentTaxConfig) -> Self {
        Self { config }
    }

    /// Calculates resident tax on `taxable_income`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use yen_core::ResidentTaxConfig;
    /// use yen_core::calculations::ResidentTaxCalculator;
    ///
    /// let config = ResidentTaxConfig::default();
    /// let tax = ResidentTaxCalculator::new(&config).calculate(dec!(4360000));
    ///
    /// assert_eq!(tax.total_resident_tax, dec!(436000));
    /// assert_eq!(tax.prefectural_tax, dec!(174400));
    /// assert_eq!(tax.municipal_tax, dec!(261600));
    /// ```
    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> ResidentTax {
        let total_resident_tax = floor_product(taxable_income, self.config.rate);
        let prefectural_tax = floor_product(total_resident_tax, self.config.prefectural_share);
        let municipal_tax = total_resident_tax - prefectural_tax;

        debug!(%total_resident_tax, "resident tax");

        ResidentTax {
            prefectural_tax,
            municipal_tax,
            total_resident_tax,
        }
    }
}
