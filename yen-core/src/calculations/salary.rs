//! Take-home pay aggregation.
//!
//! Runs the individual calculations in order and combines them into a
//! [`SalaryBreakdown`]:
//!
//! 1. Employment income deduction → taxable income
//! 2. National income tax and surtax on taxable income
//! 3. Social insurance premiums on gross salary
//! 4. Resident tax on taxable income
//! 5. Total deductions, net annual and monthly pay
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yen_core::{EmploymentType, SalaryInput, calculate_salary};
//!
//! let input = SalaryInput::new(dec!(6000000), 30, "Tokyo", 0, EmploymentType::Regular, true)
//!     .unwrap();
//! let breakdown = calculate_salary(&input).unwrap();
//!
//! assert_eq!(breakdown.taxable_income, dec!(4360000));
//! assert_eq!(breakdown.total_deductions, dec!(1694537));
//! assert_eq!(breakdown.net_monthly, dec!(358788));
//! ```

use std::sync::LazyLock;

use tracing::{debug, info};

use crate::calculations::{
    CalculationError, EmploymentDeduction, IncomeTaxCalculator, ResidentTaxCalculator,
    SocialInsuranceCalculator,
};
use crate::{Period, RateConfig, SalaryBreakdown, SalaryInput};

static DEFAULT_RATES: LazyLock<RateConfig> = LazyLock::new(RateConfig::default);

/// Calculates a breakdown with the built-in rate tables.
///
/// # Errors
///
/// See [`SalaryCalculator::calculate`].
pub fn calculate_salary(input: &SalaryInput) -> Result<SalaryBreakdown, CalculationError> {
    SalaryCalculator::new(&DEFAULT_RATES).calculate(input)
}

/// Take-home pay calculator over a set of rate tables.
#[derive(Debug, Clone)]
pub struct SalaryCalculator<'a> {
    config: &'a RateConfig,
}

impl<'a> SalaryCalculator<'a> {
    /// The config is expected to have passed [`RateConfig::validate`].
    pub fn new(config: &'a RateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RateConfig {
        self.config
    }

    /// Computes the full breakdown for one salary scenario.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NoMatchingBracket`] if the gross salary
    /// is not covered by the employment deduction table. No partial result
    /// is produced.
    pub fn calculate(
        &self,
        input: &SalaryInput,
    ) -> Result<SalaryBreakdown, CalculationError> {
        let gross_annual = input.annual_gross_salary();

        info!(
            %gross_annual,
            age = input.age(),
            prefecture = input.prefecture(),
            employment_type = %input.employment_type(),
            "starting salary calculation"
        );

        let employment_income_deduction =
            EmploymentDeduction::new(&self.config.employment_deduction).calculate(gross_annual)?;
        let taxable_income = gross_annual - employment_income_deduction;
        debug!(%taxable_income, "taxable income");

        let taxation = IncomeTaxCalculator::new(&self.config.national_tax).calculate(taxable_income);

        let social_insurance = SocialInsuranceCalculator::new(self.config).calculate(
            gross_annual,
            input.age(),
            input.prefecture(),
            input.employment_type(),
        )?;

        let resident_tax =
            ResidentTaxCalculator::new(&self.config.resident_tax).calculate(taxable_income);

        let total_deductions = taxation.total_national_tax
            + social_insurance.total_social_insurance
            + resident_tax.total_resident_tax;
        let net_annual = gross_annual - total_deductions;
        let net_monthly = Period::Monthly.amount(net_annual);

        info!(%net_monthly, "calculation complete");

        Ok(SalaryBreakdown {
            gross_annual,
            gross_monthly: Period::Monthly.amount(gross_annual),
            employment_income_deduction,
            taxable_income,
            taxation,
            social_insurance,
            resident_tax,
            total_deductions,
            net_annual,
            net_monthly,
        })
    }
}
