//! National income tax (所得税) and reconstruction surtax (復興特別所得税).
//!
//! The standard deduction is subtracted from taxable income, then each
//! bracket's marginal rate is applied to the slice of income that falls
//! inside it. The surtax is 2.1% of the floored income tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yen_core::RateConfig;
//! use yen_core::calculations::IncomeTaxCalculator;
//!
//! let config = RateConfig::default();
//! let calculator = IncomeTaxCalculator::new(&config.national_tax);
//! let result = calculator.calculate(dec!(4360000));
//!
//! assert_eq!(result.taxable_income, dec!(3980000));
//! assert_eq!(result.income_tax, dec!(368499));
//! assert_eq!(result.reconstruction_surtax, dec!(7738));
//! assert_eq!(result.total_national_tax, dec!(376237));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{floor_product, floor_yen, non_negative};
use crate::{NationalTaxConfig, TaxCalculation};

/// Progressive national income tax calculator.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator<'a> {
    config: &'a NationalTaxConfig,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(config: &'a NationalTaxConfig) -> Self {
        Self { config }
    }

    /// Calculates income tax and surtax on `taxable_income` (gross salary
    /// minus the employment income deduction).
    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> TaxCalculation {
        let adjusted = self.adjusted_income(taxable_income);
        let income_tax = self.bracket_tax(adjusted);
        let reconstruction_surtax =
            floor_product(income_tax, self.config.reconstruction_surtax_rate);
        let total_national_tax = income_tax + reconstruction_surtax;

        debug!(%adjusted, %income_tax, %reconstruction_surtax, "national tax");

        TaxCalculation {
            taxable_income: adjusted,
            income_tax,
            reconstruction_surtax,
            total_national_tax,
        }
    }

    /// Taxable income after the standard deduction, never below zero.
    fn adjusted_income(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        non_negative(taxable_income - self.config.standard_deduction)
    }

    /// Walks the brackets in ascending order, accumulating marginal tax.
    fn bracket_tax(
        &self,
        income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;
        for bracket in &self.config.brackets {
            if income <= bracket.min_income {
                break;
            }
            tax += bracket.taxable_portion(income) * bracket.tax_rate;
        }
        floor_yen(tax)
    }
}
