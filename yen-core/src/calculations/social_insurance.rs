//! Social insurance premiums (社会保険料).
//!
//! Employees and freelancers are enrolled in different schemes:
//!
//! | Premium      | Employee (half of combined rate on gross) | Freelancer (on gross − employment deduction) |
//! |--------------|-------------------------------------------|----------------------------------------------|
//! | Health       | prefecture rate × 50%                     | national health insurance rate               |
//! | Nursing care | age 40+: nursing rate × 50%               | age 40+: national nursing rate               |
//! | Pension      | employee pension rate                     | fixed national pension amount                |
//! | Employment   | employment insurance rate                 | none                                         |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yen_core::{EmploymentType, RateConfig};
//! use yen_core::calculations::SocialInsuranceCalculator;
//!
//! let config = RateConfig::default();
//! let calculator = SocialInsuranceCalculator::new(&config);
//! let premiums = calculator
//!     .calculate(dec!(6000000), 30, "Tokyo", EmploymentType::Regular)
//!     .unwrap();
//!
//! assert_eq!(premiums.health_insurance, dec!(297300));
//! assert_eq!(premiums.pension_insurance, dec!(549000));
//! assert_eq!(premiums.total_social_insurance, dec!(882300));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::floor_product;
use crate::calculations::{CalculationError, EmploymentDeduction};
use crate::{EmploymentType, RateConfig, SocialInsurance};

/// The insurance scheme a worker is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsuranceScheme {
    /// Employer health insurance and welfare pension, premiums split with
    /// the employer.
    Employee { health_insurance_rate: Decimal },
    /// National health insurance and national pension.
    Freelance,
}

/// Calculates social insurance premiums from a [`RateConfig`].
#[derive(Debug, Clone)]
pub struct SocialInsuranceCalculator<'a> {
    config: &'a RateConfig,
}

impl<'a> SocialInsuranceCalculator<'a> {
    pub fn new(config: &'a RateConfig) -> Self {
        Self { config }
    }

    /// Selects the scheme for an employment type. Employees get the health
    /// rate of their prefecture, or the default (Tokyo) rate when the
    /// prefecture is not listed.
    pub fn scheme(
        &self,
        employment_type: EmploymentType,
        prefecture: &str,
    ) -> InsuranceScheme {
        if !employment_type.is_employee() {
            return InsuranceScheme::Freelance;
        }

        let si = &self.config.social_insurance;
        let health_insurance_rate = match si.prefecture(prefecture) {
            Some(p) => p.health_insurance_rate,
            None => {
                warn!(
                    prefecture,
                    rate = %si.default_health_insurance_rate,
                    "unknown prefecture, using default health insurance rate"
                );
                si.default_health_insurance_rate
            }
        };

        InsuranceScheme::Employee {
            health_insurance_rate,
        }
    }

    /// Calculates all four premiums and their total.
    ///
    /// # Errors
    ///
    /// Freelance premiums are based on income after the employment
    /// deduction, so the deduction lookup error is propagated.
    pub fn calculate(
        &self,
        gross_salary: Decimal,
        age: u32,
        prefecture: &str,
        employment_type: EmploymentType,
    ) -> Result<SocialInsurance, CalculationError> {
        let premiums = match self.scheme(employment_type, prefecture) {
            InsuranceScheme::Employee {
                health_insurance_rate,
            } => self.employee(gross_salary, age, health_insurance_rate),
            InsuranceScheme::Freelance => self.freelance(gross_salary, age)?,
        };

        debug!(
            health = %premiums.health_insurance,
            nursing = %premiums.nursing_care_insurance,
            pension = %premiums.pension_insurance,
            employment = %premiums.employment_insurance,
            "social insurance"
        );

        Ok(premiums)
    }

    fn requires_nursing_care(
        &self,
        age: u32,
    ) -> bool {
        age >= self.config.social_insurance.nursing_care_age_threshold
    }

    fn employee(
        &self,
        gross_salary: Decimal,
        age: u32,
        health_insurance_rate: Decimal,
    ) -> SocialInsurance {
        let si = &self.config.social_insurance;

        let health_insurance = floor_product(gross_salary, health_insurance_rate * si.employee_share);
        let nursing_care_insurance = if self.requires_nursing_care(age) {
            floor_product(gross_salary, si.nursing_care_rate * si.employee_share)
        } else {
            Decimal::ZERO
        };
        let pension_insurance = floor_product(gross_salary, si.employee_pension_rate);
        let employment_insurance = floor_product(gross_salary, si.employment_insurance_rate);

        build(
            health_insurance,
            nursing_care_insurance,
            pension_insurance,
            employment_insurance,
        )
    }

    fn freelance(
        &self,
        gross_salary: Decimal,
        age: u32,
    ) -> Result<SocialInsurance, CalculationError> {
        let rates = &self.config.social_insurance.freelance;

        let deduction =
            EmploymentDeduction::new(&self.config.employment_deduction).calculate(gross_salary)?;
        let taxable_income = gross_salary - deduction;

        let health_insurance = floor_product(taxable_income, rates.national_health_insurance_rate);
        let nursing_care_insurance = if self.requires_nursing_care(age) {
            floor_product(taxable_income, rates.nursing_care_rate)
        } else {
            Decimal::ZERO
        };

        Ok(build(
            health_insurance,
            nursing_care_insurance,
            rates.national_pension_annual,
            Decimal::ZERO,
        ))
    }
}

fn build(
    health_insurance: Decimal,
    nursing_care_insurance: Decimal,
    pension_insurance: Decimal,
    employment_insurance: Decimal,
) -> SocialInsurance {
    SocialInsurance {
        health_insurance,
        nursing_care_insurance,
        pension_insurance,
        employment_insurance,
        total_social_insurance: health_insurance
            + nursing_care_insurance
            + pension_insurance
            + employment_insurance,
    }
}
