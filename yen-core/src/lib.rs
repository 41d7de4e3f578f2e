pub mod calculations;
pub mod comparison;
pub mod models;

pub use calculations::{CalculationError, SalaryCalculator, calculate_salary};
pub use comparison::{ComparisonEntry, ComparisonList, ComparisonRow};
pub use models::*;
