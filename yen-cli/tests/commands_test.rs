//! Runs the subcommands against fixture files and checks their output.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use yen_cli::commands::{CalcCommand, CompareCommand, build_comparison, list_prefectures};
use yen_cli::render::PeriodView;
use yen_core::{EmploymentType, RateConfig};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

fn calc(
    employment: EmploymentType,
    json: bool,
) -> CalcCommand {
    CalcCommand {
        salary: dec!(600),
        age: 30,
        prefecture: "Tokyo".to_string(),
        dependents: 0,
        employment,
        no_withholding: false,
        period: PeriodView::Both,
        json,
    }
}

fn compare(
    file: PathBuf,
    csv: bool,
    table_only: bool,
) -> CompareCommand {
    CompareCommand {
        file,
        csv,
        table_only,
        period: PeriodView::Annual,
    }
}

fn run_to_string(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).expect("command should succeed");
    String::from_utf8(out).expect("output should be UTF-8")
}

// ===== calc tests =====

#[test]
fn test_calc_prints_text_breakdown() {
    let config = RateConfig::default();
    let cmd = calc(EmploymentType::Regular, false);

    let text = run_to_string(|out| cmd.exec(&config, out));

    assert!(text.contains("Monthly take-home pay: ¥358,788"));
    assert!(text.contains("¥4,305,463"));
    assert!(text.contains("28.2%"));
}

#[test]
fn test_calc_json_is_parseable() {
    let config = RateConfig::default();
    let cmd = calc(EmploymentType::Freelance, true);

    let text = run_to_string(|out| cmd.exec(&config, out));
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");

    assert_eq!(value["breakdown"]["social_insurance"]["pension_insurance"], "203760");
    assert_eq!(value["breakdown"]["social_insurance"]["employment_insurance"], "0");
}

#[test]
fn test_calc_rejects_salary_below_range() {
    let config = RateConfig::default();
    let mut cmd = calc(EmploymentType::Regular, false);
    cmd.salary = dec!(250);

    let err = cmd.exec(&config, &mut Vec::<u8>::new()).unwrap_err();

    assert_eq!(err.to_string(), "invalid salary input");
    assert!(format!("{err:#}").contains("between 300万 and 10000万"));
}

// ===== compare tests =====

#[test]
fn test_compare_prints_breakdowns_and_table() {
    let config = RateConfig::default();
    let cmd = compare(fixture("scenarios.csv"), false, false);

    let text = run_to_string(|out| cmd.exec(&config, out));

    assert!(text.contains("== Current job =="));
    assert!(text.contains("== Part-time (¥450万) =="));
    assert!(text.contains("Effective Rate"));
    assert!(text.contains("Going independent"));
}

#[test]
fn test_compare_table_only_skips_breakdowns() {
    let config = RateConfig::default();
    let cmd = compare(fixture("scenarios.csv"), false, true);

    let text = run_to_string(|out| cmd.exec(&config, out));

    assert!(!text.contains("== Current job =="));
    assert!(!text.contains("Income & Deductions"));
    assert!(text.contains("Current job"));
}

#[test]
fn test_compare_csv_output() {
    let config = RateConfig::default();
    let cmd = compare(fixture("scenarios.csv"), true, false);

    let text = run_to_string(|out| cmd.exec(&config, out));
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "label,gross_annual,net_annual,net_monthly,effective_tax_rate"
    );
    assert_eq!(lines[1], "Current job,6000000,4305463,358788,0.2824");
}

#[test]
fn test_compare_reports_bad_row() {
    let config = RateConfig::default();
    let cmd = compare(fixture("bad_scenarios.csv"), false, false);

    let err = cmd.exec(&config, &mut Vec::<u8>::new()).unwrap_err();

    assert!(format!("{err:#}").contains("unrecognised employment type 'seasonal' on row 2"));
}

#[test]
fn test_compare_missing_file() {
    let config = RateConfig::default();
    let cmd = compare(fixture("no_such_file.csv"), false, false);

    let err = cmd.exec(&config, &mut Vec::<u8>::new()).unwrap_err();

    assert!(err.to_string().starts_with("reading scenarios from"));
    assert!(format!("{err:#}").contains("cannot open scenario file"));
}

#[test]
fn test_compare_reads_stdin_for_dash() {
    let config = RateConfig::default();
    let cmd = compare(PathBuf::from("-"), true, false);
    let input = "\
label,annual_gross_salary,age,prefecture,employment_type
Piped,600,30,Tokyo,regular
";

    let text = run_to_string(|out| cmd.exec_with_input(&config, input.as_bytes(), out));

    assert_eq!(
        text,
        "label,gross_annual,net_annual,net_monthly,effective_tax_rate\n\
         Piped,6000000,4305463,358788,0.2824\n"
    );
}

#[test]
fn test_compare_empty_input_csv_has_header_only() {
    let config = RateConfig::default();
    let cmd = compare(PathBuf::from("-"), true, false);
    let input = "annual_gross_salary,age,prefecture,employment_type\n";

    let text = run_to_string(|out| cmd.exec_with_input(&config, input.as_bytes(), out));

    assert_eq!(
        text,
        "label,gross_annual,net_annual,net_monthly,effective_tax_rate\n"
    );
}

#[test]
fn test_compare_empty_input_table_says_so() {
    let config = RateConfig::default();
    let cmd = compare(PathBuf::from("-"), false, false);

    let text = run_to_string(|out| cmd.exec_with_input(&config, "".as_bytes(), out));

    assert_eq!(text, "No scenarios found\n");
}

#[test]
fn test_compare_ignores_stdin_for_named_file() {
    let config = RateConfig::default();
    let cmd = compare(fixture("scenarios.csv"), true, true);

    let text = run_to_string(|out| cmd.exec_with_input(&config, "garbage".as_bytes(), out));

    assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_build_comparison_keeps_file_order() {
    let config = RateConfig::default();
    let scenarios = yen_data::load_from_file(&fixture("scenarios.csv")).expect("fixture");

    let list = build_comparison(&config, scenarios).expect("should calculate");
    let labels: Vec<_> = list.rows().into_iter().map(|r| r.label).collect();

    assert_eq!(
        labels,
        vec![
            "Current job",
            "Offer in Osaka",
            "Going independent",
            "Part-time (¥450万)",
        ]
    );
}

// ===== prefectures tests =====

#[test]
fn test_prefectures_lists_rates() {
    let config = RateConfig::default();

    let text = run_to_string(|out| list_prefectures(&config, out));

    assert!(text.contains("Tokyo"));
    assert!(text.contains("10.78%"));
}
