use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A marginal income tax bracket over whole yen from `min_income` to `max_income`.
///
/// A bracket taxes at most `max_income - min_income` yen, so a table whose
/// floors sit one yen above the previous ceiling leaves that yen untaxed.
/// `max_income` of `None` marks the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Portion of `income` that falls inside this bracket.
    pub fn taxable_portion(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= self.min_income {
            return Decimal::ZERO;
        }
        let above_floor = income - self.min_income;
        match self.max_income {
            Some(max) => above_floor.min(max - self.min_income),
            None => above_floor,
        }
    }
}

/// How a deduction bracket turns gross salary into a deduction amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeductionFormula {
    /// A fixed amount regardless of income.
    Flat { amount: Decimal },
    /// `income × rate + offset`. The offset may be negative.
    Linear { rate: Decimal, offset: Decimal },
}

impl DeductionFormula {
    /// Applies the formula without rounding.
    pub fn apply(
        &self,
        income: Decimal,
    ) -> Decimal {
        match self {
            Self::Flat { amount } => *amount,
            Self::Linear { rate, offset } => income * *rate + *offset,
        }
    }
}

/// An employment income deduction bracket covering salary in `[min_income, max_income)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub formula: DeductionFormula,
}

impl DeductionBracket {
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income < max)
    }
}
