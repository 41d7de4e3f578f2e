//! Take-home pay calculations.
//!
//! Each module covers one deduction: the employment income deduction,
//! national income tax, resident tax and social insurance. [`salary`]
//! combines them into a [`crate::SalaryBreakdown`].

pub mod common;
pub mod employment_deduction;
pub mod income_tax;
pub mod resident_tax;
pub mod salary;
pub mod social_insurance;

pub use employment_deduction::{CalculationError, EmploymentDeduction};
pub use income_tax::IncomeTaxCalculator;
pub use resident_tax::ResidentTaxCalculator;
pub use salary::{SalaryCalculator, calculate_salary};
pub use social_insurance::{InsuranceScheme, SocialInsuranceCalculator};
