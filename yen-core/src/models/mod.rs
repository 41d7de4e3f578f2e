mod employment_type;
mod period;
mod rate_config;
mod salary_breakdown;
mod salary_input;
mod tax_bracket;

pub use employment_type::EmploymentType;
pub use period::{MONTHS_PER_YEAR, Period};
pub use rate_config::{
    FreelanceInsuranceConfig, NationalTaxConfig, PrefectureRate, RateConfig, RateConfigError,
    ResidentTaxConfig, SocialInsuranceConfig,
};
pub use salary_breakdown::{ResidentTax, SalaryBreakdown, SocialInsurance, TaxCalculation};
pub use salary_input::{
    InputError, MAX_AGE, MAX_DEPENDENTS, MAX_SALARY_MAN_YEN, MIN_AGE, MIN_SALARY_MAN_YEN,
    SalaryForm, SalaryInput, YEN_PER_MAN,
};
pub use tax_bracket::{DeductionBracket, DeductionFormula, TaxBracket};
