//! Text, table, CSV and JSON output for breakdowns and comparisons.

use std::io;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};
use yen_core::{ComparisonRow, Period, SalaryBreakdown, SalaryInput};

use crate::utils::{format_rate, format_yen};

const LABEL_WIDTH: usize = 30;
const AMOUNT_WIDTH: usize = 14;

/// Which amounts a breakdown shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PeriodView {
    Annual,
    Monthly,
    #[default]
    Both,
}

impl PeriodView {
    fn periods(self) -> &'static [Period] {
        match self {
            Self::Annual => &[Period::Annual],
            Self::Monthly => &[Period::Monthly],
            Self::Both => &[Period::Annual, Period::Monthly],
        }
    }
}

struct BreakdownWriter {
    out: String,
    periods: &'static [Period],
}

impl BreakdownWriter {
    fn heading(
        &mut self,
        title: &str,
    ) {
        self.out.push_str(&format!("\n{title:<LABEL_WIDTH$}"));
        for period in self.periods {
            self.out
                .push_str(&format!("{:>AMOUNT_WIDTH$}", period.label()));
        }
        self.out.push('\n');
    }

    fn amount(
        &mut self,
        label: &str,
        annual: Decimal,
    ) {
        self.out
            .push_str(&format!("  {label:<width$}", width = LABEL_WIDTH - 2));
        for period in self.periods {
            let amount = format_yen(period.amount(annual));
            self.out.push_str(&format!("{amount:>AMOUNT_WIDTH$}"));
        }
        self.out.push('\n');
    }

    fn text(
        &mut self,
        label: &str,
        value: &str,
    ) {
        self.out.push_str(&format!(
            "  {label:<width$}{value:>AMOUNT_WIDTH$}\n",
            width = LABEL_WIDTH - 2
        ));
    }

    fn note(
        &mut self,
        text: &str,
    ) {
        self.out.push_str(&format!("  ({text})\n"));
    }
}

/// Renders a full breakdown as plain text.
///
/// Monthly figures are `floor(annual / 12)` of each line, so monthly lines
/// need not add up to the monthly totals exactly.
pub fn render_breakdown(
    input: &SalaryInput,
    breakdown: &SalaryBreakdown,
    view: PeriodView,
) -> String {
    let mut w = BreakdownWriter {
        out: String::new(),
        periods: view.periods(),
    };

    w.out.push_str(&format!(
        "{}, age {}, {}\n",
        input.employment_type().to_long_str(),
        input.age(),
        input.prefecture()
    ));
    w.out.push_str(&format!(
        "Monthly take-home pay: {}\n",
        format_yen(breakdown.net_monthly)
    ));

    w.heading("Income & Deductions");
    w.amount("Gross salary", breakdown.gross_annual);
    w.amount(
        "Employment income deduction",
        breakdown.employment_income_deduction,
    );
    w.amount("Taxable income", breakdown.taxable_income);

    let tax = &breakdown.taxation;
    w.heading("National Taxes");
    w.amount("Income tax", tax.income_tax);
    w.amount("Reconstruction surtax", tax.reconstruction_surtax);
    w.amount("Total national tax", tax.total_national_tax);
    if !input.has_employer_withholding() {
        w.note("no employer withholding: settled by your own tax return");
    }

    let si = &breakdown.social_insurance;
    w.heading("Social Insurance");
    w.amount("Health insurance", si.health_insurance);
    if !si.nursing_care_insurance.is_zero() {
        w.amount("Nursing care insurance", si.nursing_care_insurance);
    }
    w.amount("Pension", si.pension_insurance);
    w.amount("Employment insurance", si.employment_insurance);
    w.amount("Total social insurance", si.total_social_insurance);

    let rt = &breakdown.resident_tax;
    w.heading("Resident Tax");
    w.amount("Prefectural tax", rt.prefectural_tax);
    w.amount("Municipal tax", rt.municipal_tax);
    w.amount("Total resident tax", rt.total_resident_tax);
    w.note("paid in the following year, based on this year's income");

    w.heading("Summary");
    w.amount("Gross salary", breakdown.gross_annual);
    w.amount("Total deductions", breakdown.total_deductions);
    w.amount("Take-home pay", breakdown.net_annual);
    w.text(
        "Effective tax rate",
        &format_rate(breakdown.effective_tax_rate()),
    );

    w.out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a SalaryInput,
    breakdown: &'a SalaryBreakdown,
    effective_tax_rate: Decimal,
}

/// Pretty-printed JSON with the input, the breakdown and the effective rate.
pub fn render_json(
    input: &SalaryInput,
    breakdown: &SalaryBreakdown,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        input,
        breakdown,
        effective_tax_rate: breakdown.effective_tax_rate().round_dp(4),
    })
}

/// Row for the comparison table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ComparisonTableRow {
    #[tabled(rename = "Label")]
    pub label: String,

    #[tabled(rename = "Gross Annual")]
    pub gross_annual: String,

    #[tabled(rename = "Net Annual")]
    pub net_annual: String,

    #[tabled(rename = "Net Monthly")]
    pub net_monthly: String,

    #[tabled(rename = "Effective Rate")]
    pub effective_rate: String,
}

impl From<&ComparisonRow> for ComparisonTableRow {
    fn from(row: &ComparisonRow) -> Self {
        Self {
            label: row.label.clone(),
            gross_annual: format_yen(row.gross_annual),
            net_annual: format_yen(row.net_annual),
            net_monthly: format_yen(row.net_monthly),
            effective_rate: format_rate(row.effective_tax_rate),
        }
    }
}

/// Comparison rows as a rounded table with right-aligned figures.
pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let rows: Vec<ComparisonTableRow> = rows.iter().map(ComparisonTableRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

const CSV_HEADER: [&str; 5] = [
    "label",
    "gross_annual",
    "net_annual",
    "net_monthly",
    "effective_tax_rate",
];

#[derive(Serialize)]
struct ComparisonCsvRow<'a> {
    label: &'a str,
    gross_annual: Decimal,
    net_annual: Decimal,
    net_monthly: Decimal,
    effective_tax_rate: Decimal,
}

/// Writes comparison rows as CSV. The header is written even when there are
/// no rows. Amounts are plain yen and the rate is a fraction rounded to four
/// places.
pub fn write_comparison_csv<W: io::Write>(
    rows: &[ComparisonRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(ComparisonCsvRow {
            label: &row.label,
            gross_annual: row.gross_annual,
            net_annual: row.net_annual,
            net_monthly: row.net_monthly,
            effective_tax_rate: row.effective_tax_rate.round_dp(4),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
