use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Period;

/// National income tax and reconstruction surtax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    /// Taxable income after the standard deduction, floored at zero.
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub reconstruction_surtax: Decimal,
    pub total_national_tax: Decimal,
}

/// Social insurance premiums paid by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsurance {
    pub health_insurance: Decimal,
    pub nursing_care_insurance: Decimal,
    pub pension_insurance: Decimal,
    pub employment_insurance: Decimal,
    pub total_social_insurance: Decimal,
}

/// Resident tax (住民税), paid the following year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentTax {
    pub prefectural_tax: Decimal,
    pub municipal_tax: Decimal,
    pub total_resident_tax: Decimal,
}

/// Full result of a take-home pay calculation. All amounts are whole yen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross_annual: Decimal,
    pub gross_monthly: Decimal,
    pub employment_income_deduction: Decimal,
    /// Gross salary minus the employment income deduction.
    pub taxable_income: Decimal,

    pub taxation: TaxCalculation,
    pub social_insurance: SocialInsurance,
    pub resident_tax: ResidentTax,

    pub total_deductions: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
}

impl SalaryBreakdown {
    /// Share of gross pay lost to taxes and insurance, as a fraction.
    ///
    /// Returns zero for a zero gross salary.
    pub fn effective_tax_rate(&self) -> Decimal {
        if self.gross_annual.is_zero() {
            return Decimal::ZERO;
        }
        self.total_deductions / self.gross_annual
    }

    pub fn gross(
        &self,
        period: Period,
    ) -> Decimal {
        match period {
            Period::Annual => self.gross_annual,
            Period::Monthly => self.gross_monthly,
        }
    }

    pub fn net(
        &self,
        period: Period,
    ) -> Decimal {
        match period {
            Period::Annual => self.net_annual,
            Period::Monthly => self.net_monthly,
        }
    }

    /// Total deductions viewed over `period`.
    pub fn deductions(
        &self,
        period: Period,
    ) -> Decimal {
        period.amount(self.total_deductions)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn breakdown(
        gross: Decimal,
        deductions: Decimal,
    ) -> SalaryBreakdown {
        SalaryBreakdown {
            gross_annual: gross,
            gross_monthly: Period::Monthly.amount(gross),
            employment_income_deduction: Decimal::ZERO,
            taxable_income: gross,
            taxation: TaxCalculation {
                taxable_income: gross,
                income_tax: Decimal::ZERO,
                reconstruction_surtax: Decimal::ZERO,
                total_national_tax: Decimal::ZERO,
            },
            social_insurance: SocialInsurance {
                health_insurance: Decimal::ZERO,
                nursing_care_insurance: Decimal::ZERO,
                pension_insurance: Decimal::ZERO,
                employment_insurance: Decimal::ZERO,
                total_social_insurance: Decimal::ZERO,
            },
            resident_tax: ResidentTax {
                prefectural_tax: Decimal::ZERO,
                municipal_tax: Decimal::ZERO,
                total_resident_tax: Decimal::ZERO,
            },
            total_deductions: deductions,
            net_annual: gross - deductions,
            net_monthly: Period::Monthly.amount(gross - deductions),
        }
    }

    #[test]
    fn effective_tax_rate_is_deductions_over_gross() {
        let b = breakdown(dec!(6000000), dec!(1500000));

        assert_eq!(b.effective_tax_rate(), dec!(0.25));
    }

    #[test]
    fn effective_tax_rate_is_zero_for_zero_gross() {
        let b = breakdown(Decimal::ZERO, Decimal::ZERO);

        assert_eq!(b.effective_tax_rate(), Decimal::ZERO);
    }

    #[test]
    fn period_accessors_select_matching_field() {
        let b = breakdown(dec!(6000000), dec!(1000001));

        assert_eq!(b.gross(Period::Annual), dec!(6000000));
        assert_eq!(b.gross(Period::Monthly), dec!(500000));
        assert_eq!(b.net(Period::Annual), dec!(4999999));
        assert_eq!(b.net(Period::Monthly), dec!(416666));
        assert_eq!(b.deductions(Period::Monthly), dec!(83333));
    }
}
