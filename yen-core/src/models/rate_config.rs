//! Rate tables for the take-home pay calculation.
//!
//! [`RateConfig::default`] carries the 2024 figures. Every section is
//! serde-deserializable with `#[serde(default)]`, so an override file only
//! needs to list the values it changes.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DeductionBracket, DeductionFormula, TaxBracket};

/// Errors found while validating a [`RateConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateConfigError {
    /// A rate must lie between 0 and 1 inclusive.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// A fixed amount must not be negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// A bracket table has no entries.
    #[error("{0} table is empty")]
    EmptyBrackets(&'static str),

    /// The first bracket of a table must start at zero.
    #[error("{table} table must start at 0, starts at {start}")]
    BracketsDoNotStartAtZero { table: &'static str, start: Decimal },

    /// Each bracket must begin where the previous one ends, or one yen above it.
    #[error("{table} bracket {index} is not contiguous with the previous bracket")]
    NonContiguousBrackets { table: &'static str, index: usize },

    /// Only the last bracket may be open-ended, and it must be.
    #[error("{table} bracket {index} has an invalid upper bound")]
    InvalidUpperBound { table: &'static str, index: usize },

    /// Prefecture names must be non-empty.
    #[error("prefecture entry {0} has an empty name")]
    EmptyPrefectureName(usize),
}

/// Health insurance rate charged in one prefecture (combined employer and
/// employee share).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefectureRate {
    pub name: String,
    pub health_insurance_rate: Decimal,
}

impl PrefectureRate {
    fn new(
        name: &str,
        health_insurance_rate: Decimal,
    ) -> Self {
        Self {
            name: name.to_string(),
            health_insurance_rate,
        }
    }
}

/// National income tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalTaxConfig {
    pub brackets: Vec<TaxBracket>,
    /// Basic deduction subtracted from taxable income before the bracket walk.
    pub standard_deduction: Decimal,
    pub reconstruction_surtax_rate: Decimal,
}

impl Default for NationalTaxConfig {
    fn default() -> Self {
        let bounds = [
            (dec!(0), Some(dec!(1950000)), dec!(0.05)),
            (dec!(1950001), Some(dec!(3300000)), dec!(0.10)),
            (dec!(3300001), Some(dec!(6950000)), dec!(0.20)),
            (dec!(6950001), Some(dec!(9000000)), dec!(0.23)),
            (dec!(9000001), Some(dec!(18000000)), dec!(0.33)),
            (dec!(18000001), Some(dec!(400000000)), dec!(0.40)),
            (dec!(400000001), None, dec!(0.45)),
        ];

        Self {
            brackets: bounds
                .into_iter()
                .map(|(min_income, max_income, tax_rate)| TaxBracket {
                    min_income,
                    max_income,
                    tax_rate,
                })
                .collect(),
            standard_deduction: dec!(380000),
            reconstruction_surtax_rate: dec!(0.021),
        }
    }
}

/// Resident tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentTaxConfig {
    /// Combined prefectural and municipal rate.
    pub rate: Decimal,
    /// Share of the combined tax assigned to the prefecture.
    pub prefectural_share: Decimal,
}

impl Default for ResidentTaxConfig {
    fn default() -> Self {
        Self {
            rate: dec!(0.10),
            prefectural_share: dec!(0.4),
        }
    }
}

/// National health insurance and national pension parameters for freelancers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreelanceInsuranceConfig {
    /// Flat annual national pension contribution (16,980 yen × 12).
    pub national_pension_annual: Decimal,
    pub national_health_insurance_rate: Decimal,
    pub nursing_care_rate: Decimal,
}

impl Default for FreelanceInsuranceConfig {
    fn default() -> Self {
        Self {
            national_pension_annual: dec!(203760),
            national_health_insurance_rate: dec!(0.10),
            nursing_care_rate: dec!(0.02),
        }
    }
}

/// Social insurance parameters for both employees and freelancers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialInsuranceConfig {
    /// Welfare pension, employee portion only.
    pub employee_pension_rate: Decimal,
    pub employment_insurance_rate: Decimal,
    pub nursing_care_age_threshold: u32,
    /// Combined nursing care rate; employees pay `employee_share` of it.
    pub nursing_care_rate: Decimal,
    /// Share of health and nursing care premiums borne by an employee.
    pub employee_share: Decimal,
    /// Health rate used when a prefecture is not in `prefectures` (Tokyo).
    pub default_health_insurance_rate: Decimal,
    pub prefectures: Vec<PrefectureRate>,
    pub freelance: FreelanceInsuranceConfig,
}

impl Default for SocialInsuranceConfig {
    fn default() -> Self {
        Self {
            employee_pension_rate: dec!(0.0915),
            employment_insurance_rate: dec!(0.006),
            nursing_care_age_threshold: 40,
            nursing_care_rate: dec!(0.0159),
            employee_share: dec!(0.5),
            default_health_insurance_rate: dec!(0.0991),
            prefectures: vec![
                PrefectureRate::new("Tokyo", dec!(0.0991)),
                PrefectureRate::new("Osaka", dec!(0.1018)),
                PrefectureRate::new("Kanagawa", dec!(0.0991)),
                PrefectureRate::new("Okinawa", dec!(0.0944)),
                PrefectureRate::new("Saga", dec!(0.1078)),
            ],
            freelance: FreelanceInsuranceConfig::default(),
        }
    }
}

impl SocialInsuranceConfig {
    /// Looks up a prefecture by name, ignoring ASCII case.
    pub fn prefecture(
        &self,
        name: &str,
    ) -> Option<&PrefectureRate> {
        let name = name.trim();
        self.prefectures
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Every constant used by the calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    pub employment_deduction: Vec<DeductionBracket>,
    pub national_tax: NationalTaxConfig,
    pub resident_tax: ResidentTaxConfig,
    pub social_insurance: SocialInsuranceConfig,
}

impl Default for RateConfig {
    fn default() -> Self {
        let flat = |amount| DeductionFormula::Flat { amount };
        let linear = |rate, offset| DeductionFormula::Linear { rate, offset };
        let table = [
            (dec!(0), Some(dec!(1625001)), flat(dec!(550000))),
            (
                dec!(1625001),
                Some(dec!(1800001)),
                linear(dec!(0.4), dec!(-100000)),
            ),
            (
                dec!(1800001),
                Some(dec!(3600001)),
                linear(dec!(0.3), dec!(80000)),
            ),
            (
                dec!(3600001),
                Some(dec!(6600001)),
                linear(dec!(0.2), dec!(440000)),
            ),
            (
                dec!(6600001),
                Some(dec!(8500001)),
                linear(dec!(0.1), dec!(1100000)),
            ),
            (dec!(8500001), None, flat(dec!(1950000))),
        ];

        Self {
            employment_deduction: table
                .into_iter()
                .map(|(min_income, max_income, formula)| DeductionBracket {
                    min_income,
                    max_income,
                    formula,
                })
                .collect(),
            national_tax: NationalTaxConfig::default(),
            resident_tax: ResidentTaxConfig::default(),
            social_insurance: SocialInsuranceConfig::default(),
        }
    }
}

fn check_rate(
    name: &'static str,
    value: Decimal,
) -> Result<(), RateConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(RateConfigError::InvalidRate { name, value });
    }
    Ok(())
}

fn check_amount(
    name: &'static str,
    value: Decimal,
) -> Result<(), RateConfigError> {
    if value < Decimal::ZERO {
        return Err(RateConfigError::NegativeAmount { name, value });
    }
    Ok(())
}

/// How one bracket's lower bound must relate to the previous upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjacency {
    /// `[min, max)` ranges: the next range starts at the previous `max`.
    Touching,
    /// Whole-yen `[min, max]` ranges: the next range starts at `max` or `max + 1`.
    WholeYen,
}

impl Adjacency {
    fn follows(
        self,
        prev_max: Option<Decimal>,
        min: Decimal,
    ) -> bool {
        match (self, prev_max) {
            (Self::Touching, Some(max)) => max == min,
            (Self::WholeYen, Some(max)) => max == min || max + Decimal::ONE == min,
            (_, None) => false,
        }
    }
}

/// Checks that `(min, max)` pairs start at zero, chain without gaps and end
/// with a single open-ended range.
fn check_bounds(
    table: &'static str,
    bounds: &[(Decimal, Option<Decimal>)],
    adjacency: Adjacency,
) -> Result<(), RateConfigError> {
    let Some(&(start, _)) = bounds.first() else {
        return Err(RateConfigError::EmptyBrackets(table));
    };
    if !start.is_zero() {
        return Err(RateConfigError::BracketsDoNotStartAtZero { table, start });
    }

    let last = bounds.len() - 1;
    for (index, &(min, max)) in bounds.iter().enumerate() {
        match max {
            Some(max) if index < last && max > min => {}
            None if index == last => {}
            _ => return Err(RateConfigError::InvalidUpperBound { table, index }),
        }
        if index > 0 && !adjacency.follows(bounds[index - 1].1, min) {
            return Err(RateConfigError::NonContiguousBrackets { table, index });
        }
    }
    Ok(())
}

impl RateConfig {
    /// Validates rates, amounts and bracket layout.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateConfigError`] found.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use yen_core::{RateConfig, RateConfigError};
    ///
    /// let mut config = RateConfig::default();
    /// assert_eq!(config.validate(), Ok(()));
    ///
    /// config.resident_tax.rate = dec!(1.5);
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(RateConfigError::InvalidRate {
    ///         name: "resident_tax.rate",
    ///         value: dec!(1.5),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), RateConfigError> {
        let deduction_bounds: Vec<_> = self
            .employment_deduction
            .iter()
            .map(|b| (b.min_income, b.max_income))
            .collect();
        check_bounds(
            "employment deduction",
            &deduction_bounds,
            Adjacency::Touching,
        )?;

        let tax = &self.national_tax;
        let tax_bounds: Vec<_> = tax
            .brackets
            .iter()
            .map(|b| (b.min_income, b.max_income))
            .collect();
        check_bounds("income tax", &tax_bounds, Adjacency::WholeYen)?;
        for bracket in &tax.brackets {
            check_rate("national_tax.brackets.tax_rate", bracket.tax_rate)?;
        }
        check_amount("national_tax.standard_deduction", tax.standard_deduction)?;
        check_rate(
            "national_tax.reconstruction_surtax_rate",
            tax.reconstruction_surtax_rate,
        )?;

        check_rate("resident_tax.rate", self.resident_tax.rate)?;
        check_rate(
            "resident_tax.prefectural_share",
            self.resident_tax.prefectural_share,
        )?;

        let si = &self.social_insurance;
        check_rate(
            "social_insurance.employee_pension_rate",
            si.employee_pension_rate,
        )?;
        check_rate(
            "social_insurance.employment_insurance_rate",
            si.employment_insurance_rate,
        )?;
        check_rate("social_insurance.nursing_care_rate", si.nursing_care_rate)?;
        check_rate("social_insurance.employee_share", si.employee_share)?;
        check_rate(
            "social_insurance.default_health_insurance_rate",
            si.default_health_insurance_rate,
        )?;
        for (index, prefecture) in si.prefectures.iter().enumerate() {
            if prefecture.name.trim().is_empty() {
                return Err(RateConfigError::EmptyPrefectureName(index));
            }
            check_rate(
                "social_insurance.prefectures.health_insurance_rate",
                prefecture.health_insurance_rate,
            )?;
        }
        check_amount(
            "social_insurance.freelance.national_pension_annual",
            si.freelance.national_pension_annual,
        )?;
        check_rate(
            "social_insurance.freelance.national_health_insurance_rate",
            si.freelance.national_health_insurance_rate,
        )?;
        check_rate(
            "social_insurance.freelance.nursing_care_rate",
            si.freelance.nursing_care_rate,
        )?;

        Ok(())
    }
}

impl fmt::Display for RateConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let pct = |rate: Decimal| (rate * Decimal::ONE_HUNDRED).normalize();
        let si = &self.social_insurance;

        writeln!(f, "Health insurance rates by prefecture:")?;
        for p in &si.prefectures {
            writeln!(f, "  {:<12} {}%", p.name, pct(p.health_insurance_rate))?;
        }
        writeln!(
            f,
            "  {:<12} {}%",
            "(other)",
            pct(si.default_health_insurance_rate)
        )?;
        writeln!(
            f,
            "Employee pension:       {}%",
            pct(si.employee_pension_rate)
        )?;
        writeln!(
            f,
            "Employment insurance:   {}%",
            pct(si.employment_insurance_rate)
        )?;
        writeln!(
            f,
            "Nursing care (age {}+): {}%",
            si.nursing_care_age_threshold,
            pct(si.nursing_care_rate)
        )?;
        writeln!(
            f,
            "National pension:       {} yen/year",
            si.freelance.national_pension_annual
        )?;
        write!(
            f,
            "National health:        {}%",
            pct(si.freelance.national_health_insurance_rate)
        )
    }
}
