//! Employment income deduction (給与所得控除).
//!
//! The deduction is looked up from a six-bracket table keyed by gross salary:
//!
//! | Gross salary (yen)      | Deduction |
//! |-------------------------|-----------|
//! | up to 1,625,000         | 550,000 |
//! | 1,625,001 - 1,800,000   | salary × 40% − 100,000 |
//! | 1,800,001 - 3,600,000   | salary × 30% + 80,000 |
//! | 3,600,001 - 6,600,000   | salary × 20% + 440,000 |
//! | 6,600,001 - 8,500,000   | salary × 10% + 1,100,000 |
//! | over 8,500,000          | 1,950,000 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yen_core::RateConfig;
//! use yen_core::calculations::EmploymentDeduction;
//!
//! let config = RateConfig::default();
//! let table = EmploymentDeduction::new(&config.employment_deduction);
//!
//! assert_eq!(table.calculate(dec!(6000000)).unwrap(), dec!(1640000));
//! assert_eq!(table.calculate(dec!(20000000)).unwrap(), dec!(1950000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error};

use crate::DeductionBracket;
use crate::calculations::common::floor_yen;

/// Errors raised while computing a breakdown. All of them mean the input is
/// outside what the rate tables cover.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// No employment deduction bracket contains the salary.
    #[error("invalid salary amount for deduction calculation: {0}")]
    NoMatchingBracket(Decimal),
}

/// Employment income deduction lookup over a bracket table.
#[derive(Debug, Clone)]
pub struct EmploymentDeduction<'a> {
    brackets: &'a [DeductionBracket],
}

impl<'a> EmploymentDeduction<'a> {
    /// Brackets should be contiguous and sorted by `min_income`.
    pub fn new(brackets: &'a [DeductionBracket]) -> Self {
        Self { brackets }
    }

    /// Returns the deduction for `gross_salary`, floored to the yen.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NoMatchingBracket`] if no bracket contains
    /// the salary, e.g. for a negative amount.
    pub fn calculate(
        &self,
        gross_salary: Decimal,
    ) -> Result<Decimal, CalculationError> {
        debug!(%gross_salary, "calculating employment income deduction");

        let Some(bracket) = self.brackets.iter().find(|b| b.contains(gross_salary)) else {
            error!(%gross_salary, "invalid salary amount for deduction calculation");
            return Err(CalculationError::NoMatchingBracket(gross_salary));
        };

        let deduction = floor_yen(bracket.formula.apply(gross_salary));
        debug!(%deduction, "employment income deduction");

        Ok(deduction)
    }
}
