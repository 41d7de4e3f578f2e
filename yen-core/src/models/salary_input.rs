use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EmploymentType;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
pub const MAX_DEPENDENTS: u32 = 10;

/// Accepted range for the salary field of [`SalaryForm`], in 万円.
pub const MIN_SALARY_MAN_YEN: Decimal = dec!(300);
pub const MAX_SALARY_MAN_YEN: Decimal = dec!(10000);

/// Yen per 万 (man).
pub const YEN_PER_MAN: Decimal = dec!(10000);

/// Invalid input supplied to the calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("annual gross salary must be positive, got {0}")]
    NonPositiveSalary(Decimal),

    #[error("annual gross salary must be between {min}万 and {max}万 yen, got {value}万")]
    SalaryOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("age must be between {min} and {max}, got {0}", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange(u32),

    #[error("dependents must be between 0 and {max}, got {0}", max = MAX_DEPENDENTS)]
    DependentsOutOfRange(u32),
}

/// A validated salary scenario in whole yen.
///
/// Fields are private so that a constructed input always satisfies the
/// bounds checked by [`SalaryInput::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryInput {
    annual_gross_salary: Decimal,
    age: u32,
    prefecture: String,
    dependents: u32,
    employment_type: EmploymentType,
    has_employer_withholding: bool,
}

impl SalaryInput {
    /// Builds an input from a yen amount, flooring any fractional yen.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the salary is not positive or the age or
    /// dependents count is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use yen_core::{EmploymentType, SalaryInput};
    ///
    /// let input = SalaryInput::new(dec!(6000000), 30, "Tokyo", 0, EmploymentType::Regular, true)
    ///     .unwrap();
    ///
    /// assert_eq!(input.annual_gross_salary(), dec!(6000000));
    /// assert!(SalaryInput::new(dec!(6000000), 17, "Tokyo", 0, EmploymentType::Regular, true).is_err());
    /// ```
    pub fn new(
        annual_gross_salary: Decimal,
        age: u32,
        prefecture: &str,
        dependents: u32,
        employment_type: EmploymentType,
        has_employer_withholding: bool,
    ) -> Result<Self, InputError> {
        let annual_gross_salary = annual_gross_salary.floor();
        if annual_gross_salary <= Decimal::ZERO {
            return Err(InputError::NonPositiveSalary(annual_gross_salary));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(InputError::AgeOutOfRange(age));
        }
        if dependents > MAX_DEPENDENTS {
            return Err(InputError::DependentsOutOfRange(dependents));
        }

        Ok(Self {
            annual_gross_salary,
            age,
            prefecture: prefecture.trim().to_string(),
            dependents,
            employment_type,
            has_employer_withholding,
        })
    }

    pub fn annual_gross_salary(&self) -> Decimal {
        self.annual_gross_salary
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn prefecture(&self) -> &str {
        &self.prefecture
    }

    /// Accepted and range-checked, but not yet used by any calculation.
    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    pub fn employment_type(&self) -> EmploymentType {
        self.employment_type
    }

    /// Informational only; does not change any amount.
    pub fn has_employer_withholding(&self) -> bool {
        self.has_employer_withholding
    }

    /// Gross salary expressed in 万円.
    pub fn annual_gross_salary_man_yen(&self) -> Decimal {
        (self.annual_gross_salary / YEN_PER_MAN).normalize()
    }
}

fn default_withholding() -> bool {
    true
}

/// The salary form as entered by a user, with the salary in 万円.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryForm {
    pub annual_gross_salary: Decimal,
    pub age: u32,
    pub prefecture: String,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default = "default_withholding")]
    pub has_employer_withholding: bool,
}

impl SalaryForm {
    /// Validates the form bounds and converts the salary to yen.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::SalaryOutOfRange`] when the salary is outside
    /// 300万 to 10,000万, or any error from [`SalaryInput::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use yen_core::{EmploymentType, SalaryForm};
    ///
    /// let form = SalaryForm {
    ///     annual_gross_salary: dec!(600),
    ///     age: 30,
    ///     prefecture: "Tokyo".to_string(),
    ///     dependents: 0,
    ///     employment_type: EmploymentType::Regular,
    ///     has_employer_withholding: true,
    /// };
    ///
    /// assert_eq!(form.to_input().unwrap().annual_gross_salary(), dec!(6000000));
    /// ```
    pub fn to_input(&self) -> Result<SalaryInput, InputError> {
        if self.annual_gross_salary < MIN_SALARY_MAN_YEN
            || self.annual_gross_salary > MAX_SALARY_MAN_YEN
        {
            return Err(InputError::SalaryOutOfRange {
                value: self.annual_gross_salary,
                min: MIN_SALARY_MAN_YEN,
                max: MAX_SALARY_MAN_YEN,
            });
        }

        SalaryInput::new(
            self.annual_gross_salary * YEN_PER_MAN,
            self.age,
            &self.prefecture,
            self.dependents,
            self.employment_type,
            self.has_employer_withholding,
        )
    }
}
