//! Subcommands of the `yenkit` binary.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use tracing::{debug, info};
use yen_core::{ComparisonList, EmploymentType, RateConfig, SalaryCalculator, SalaryForm};
use yen_data::{Scenario, load_from_file, load_from_reader};

use crate::render::{
    PeriodView, comparison_table, render_breakdown, render_json, write_comparison_csv,
};
use crate::utils::{parse_decimal, parse_employment_type};

/// Calculate take-home pay for one salary
#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Annual gross salary in 万円 (600 = ¥6,000,000)
    #[arg(short, long, value_parser = parse_decimal)]
    pub salary: Decimal,

    /// Age at the end of the year
    #[arg(short, long)]
    pub age: u32,

    /// Prefecture of the employer's health insurance association
    #[arg(short, long, default_value = "Tokyo")]
    pub prefecture: String,

    /// Number of dependents (accepted, not yet used in the calculation)
    #[arg(short, long, default_value_t = 0)]
    pub dependents: u32,

    /// regular, contract, part-time or freelance
    #[arg(short, long, default_value = "regular", value_parser = parse_employment_type)]
    pub employment: EmploymentType,

    /// Income tax is not withheld by an employer
    #[arg(long)]
    pub no_withholding: bool,

    /// Amounts to show
    #[arg(long, value_enum, default_value_t = PeriodView::Both)]
    pub period: PeriodView,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl CalcCommand {
    pub fn exec(
        &self,
        config: &RateConfig,
        out: &mut dyn Write,
    ) -> Result<()> {
        let form = SalaryForm {
            annual_gross_salary: self.salary,
            age: self.age,
            prefecture: self.prefecture.clone(),
            dependents: self.dependents,
            employment_type: self.employment,
            has_employer_withholding: !self.no_withholding,
        };
        let input = form.to_input().context("invalid salary input")?;
        let breakdown = SalaryCalculator::new(config).calculate(&input)?;

        if self.json {
            writeln!(out, "{}", render_json(&input, &breakdown)?)?;
        } else {
            write!(out, "{}", render_breakdown(&input, &breakdown, self.period))?;
        }
        Ok(())
    }
}

/// Compare salary scenarios loaded from CSV
#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Scenario CSV file, or `-` to read standard input
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output the comparison as CSV instead of a table
    #[arg(long)]
    pub csv: bool,

    /// Skip the per-scenario breakdowns
    #[arg(long)]
    pub table_only: bool,

    /// Amounts to show in the per-scenario breakdowns
    #[arg(long, value_enum, default_value_t = PeriodView::Annual)]
    pub period: PeriodView,
}

impl CompareCommand {
    pub fn exec(
        &self,
        config: &RateConfig,
        out: &mut dyn Write,
    ) -> Result<()> {
        self.exec_with_input(config, io::stdin().lock(), out)
    }

    /// Runs the comparison, reading the scenarios from `stdin` when the file
    /// is `-`.
    pub fn exec_with_input<R: Read>(
        &self,
        config: &RateConfig,
        stdin: R,
        out: &mut dyn Write,
    ) -> Result<()> {
        let scenarios = self.read_scenarios(stdin)?;
        let list = build_comparison(config, scenarios)?;

        if self.csv {
            write_comparison_csv(&list.rows(), out)?;
            return Ok(());
        }

        if list.is_empty() {
            writeln!(out, "No scenarios found")?;
            return Ok(());
        }

        if !self.table_only {
            for entry in list.entries() {
                writeln!(out, "== {} ==", entry.title)?;
                writeln!(
                    out,
                    "{}",
                    render_breakdown(&entry.input, &entry.breakdown, self.period)
                )?;
            }
        }
        writeln!(out, "{}", comparison_table(&list.rows()))?;
        Ok(())
    }

    fn read_scenarios<R: Read>(
        &self,
        stdin: R,
    ) -> Result<Vec<Scenario>> {
        if self.file.as_os_str() == "-" {
            debug!("reading scenarios from stdin");
            return load_from_reader(stdin).context("reading scenarios from stdin");
        }

        load_from_file(&self.file)
            .with_context(|| format!("reading scenarios from '{}'", self.file.display()))
    }
}

/// Calculates every scenario and collects them in file order. The first
/// failing scenario aborts the comparison.
pub fn build_comparison(
    config: &RateConfig,
    scenarios: Vec<Scenario>,
) -> Result<ComparisonList> {
    let calculator = SalaryCalculator::new(config);
    let mut list = ComparisonList::new();

    for scenario in scenarios {
        let title = scenario.title();
        let breakdown = calculator
            .calculate(&scenario.input)
            .with_context(|| format!("calculating scenario '{title}'"))?;
        list.add(title, scenario.input, breakdown);
    }

    info!(scenarios = list.len(), "comparison ready");
    Ok(list)
}

/// Prints the rate tables in use.
pub fn list_prefectures(
    config: &RateConfig,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{config}")?;
    Ok(())
}
