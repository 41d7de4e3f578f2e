//! Side-by-side comparison of salary scenarios.
//!
//! A [`ComparisonList`] holds calculated scenarios in insertion order. Entries
//! can be appended and removed; nothing is ever edited in place.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::group_thousands;
use crate::{SalaryBreakdown, SalaryInput};

/// Default title for a scenario, e.g. `Regular (¥600万)`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use yen_core::{EmploymentType, SalaryInput};
/// use yen_core::comparison::scenario_title;
///
/// let input = SalaryInput::new(dec!(12000000), 35, "Osaka", 0, EmploymentType::Freelance, true)
///     .unwrap();
///
/// assert_eq!(scenario_title(&input), "Freelance (¥1,200万)");
/// ```
pub fn scenario_title(input: &SalaryInput) -> String {
    format!(
        "{} (¥{}万)",
        input.employment_type().label(),
        group_thousands(input.annual_gross_salary_man_yen())
    )
}

/// A saved scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonEntry {
    pub id: u64,
    pub title: String,
    pub input: SalaryInput,
    pub breakdown: SalaryBreakdown,
}

/// One line of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub gross_annual: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    /// Total deductions over gross annual salary, as a fraction.
    pub effective_tax_rate: Decimal,
}

impl From<&ComparisonEntry> for ComparisonRow {
    fn from(entry: &ComparisonEntry) -> Self {
        let b = &entry.breakdown;
        Self {
            label: entry.title.clone(),
            gross_annual: b.gross_annual,
            net_annual: b.net_annual,
            net_monthly: b.net_monthly,
            effective_tax_rate: b.effective_tax_rate(),
        }
    }
}

/// Ordered list of scenarios being compared.
#[derive(Debug, Clone, Default)]
pub struct ComparisonList {
    entries: Vec<ComparisonEntry>,
    next_id: u64,
}

impl ComparisonList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scenario and returns its id. Ids are never reused within a
    /// list.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        input: SalaryInput,
        breakdown: SalaryBreakdown,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ComparisonEntry {
            id,
            title: title.into(),
            input,
            breakdown,
        });
        id
    }

    /// Appends a scenario titled with [`scenario_title`].
    pub fn add_untitled(
        &mut self,
        input: SalaryInput,
        breakdown: SalaryBreakdown,
    ) -> u64 {
        let title = scenario_title(&input);
        self.add(title, input, breakdown)
    }

    /// Removes the entry with `id`, returning it if present.
    pub fn remove(
        &mut self,
        id: u64,
    ) -> Option<ComparisonEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table rows in insertion order.
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.entries.iter().map(ComparisonRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{EmploymentType, calculate_salary};

    fn scenario(
        gross: Decimal,
        employment_type: EmploymentType,
    ) -> (SalaryInput, SalaryBreakdown) {
        let input = SalaryInput::new(gross, 30, "Tokyo", 0, employment_type, true).unwrap();
        let breakdown = calculate_salary(&input).unwrap();
        (input, breakdown)
    }

    #[test]
    fn scenario_title_uses_type_label_and_man_yen() {
        let (input, _) = scenario(dec!(6000000), EmploymentType::PartTime);

        assert_eq!(scenario_title(&input), "Part-time (¥600万)");
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut list = ComparisonList::new();
        let (input, breakdown) = scenario(dec!(6000000), EmploymentType::Regular);

        let first = list.add("first", input.clone(), breakdown.clone());
        let second = list.add("second", input, breakdown);

        assert!(second > first);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_deletes_only_matching_entry() {
        let mut list = ComparisonList::new();
        let (a_in, a_out) = scenario(dec!(5000000), EmploymentType::Regular);
        let (b_in, b_out) = scenario(dec!(8000000), EmploymentType::Contract);
        let a = list.add_untitled(a_in, a_out);
        let b = list.add_untitled(b_in, b_out);

        let removed = list.remove(a).expect("entry should exist");

        assert_eq!(removed.id, a);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].id, b);
        assert!(list.remove(a).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = ComparisonList::new();
        let (input, breakdown) = scenario(dec!(5000000), EmploymentType::Regular);
        let first = list.add("a", input.clone(), breakdown.clone());
        list.remove(first);

        let second = list.add("b", input, breakdown);

        assert!(second > first);
    }

    #[test]
    fn rows_follow_insertion_order_and_copy_totals() {
        let mut list = ComparisonList::new();
        let (a_in, a_out) = scenario(dec!(6000000), EmploymentType::Regular);
        let (b_in, b_out) = scenario(dec!(4000000), EmploymentType::Freelance);
        list.add_untitled(a_in, a_out);
        list.add_untitled(b_in, b_out);

        let rows = list.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Regular (¥600万)");
        assert_eq!(rows[0].gross_annual, dec!(6000000));
        assert_eq!(rows[0].net_annual, dec!(4305463));
        assert_eq!(rows[0].net_monthly, dec!(358788));
        assert_eq!(
            rows[0].effective_tax_rate,
            dec!(1694537) / dec!(6000000)
        );
        assert_eq!(rows[1].label, "Freelance (¥400万)");
    }

    #[test]
    fn empty_list_has_no_rows() {
        let list = ComparisonList::new();

        assert!(list.is_empty());
        assert!(list.rows().is_empty());
    }
}
