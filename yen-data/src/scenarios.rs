//! CSV loader for salary scenarios.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter.
//! Header names are case-sensitive.
//!
//! | Column                     | Required | Type    | Notes                                        |
//! |----------------------------|----------|---------|----------------------------------------------|
//! | `label`                    | no       | string  | Defaults to e.g. `Regular (¥600万)`          |
//! | `annual_gross_salary`      | yes      | decimal | In 万円, 300 to 10,000                       |
//! | `age`                      | yes      | integer | 18 to 100                                    |
//! | `prefecture`               | yes      | string  | Unlisted prefectures use the Tokyo rate      |
//! | `employment_type`          | yes      | string  | `regular`, `contract`, `part-time`, `freelance` |
//! | `dependents`               | no       | integer | 0 to 10, defaults to 0                       |
//! | `has_employer_withholding` | no       | bool    | `true` / `false`, defaults to `true`         |
//!
//! ### Example
//!
//! ```csv
//! label,annual_gross_salary,age,prefecture,employment_type
//! Current job,600,30,Tokyo,regular
//! ,800,30,Osaka,freelance
//! ```
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use yen_core::comparison::scenario_title;
use yen_core::{EmploymentType, InputError, SalaryForm, SalaryInput};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    annual_gross_salary: Decimal,
    age: u32,
    prefecture: String,
    employment_type: String,
    dependents: Option<u32>,
    has_employer_withholding: Option<bool>,
}

/// Errors that can occur while loading scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("cannot open scenario file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing required column or a type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, the header is row 0.
    #[error("unrecognised employment type '{value}' on row {row}")]
    InvalidEmploymentType { value: String, row: usize },

    #[error("invalid scenario on row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: InputError,
    },
}

/// One validated row of a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: Option<String>,
    pub input: SalaryInput,
}

impl Scenario {
    /// The row label, or a title derived from the input when none was given.
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => scenario_title(&self.input),
        }
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let employment_type = EmploymentType::parse(&row.employment_type).ok_or_else(|| {
        ScenarioLoadError::InvalidEmploymentType {
            value: row.employment_type.clone(),
            row: row_number,
        }
    })?;

    let form = SalaryForm {
        annual_gross_salary: row.annual_gross_salary,
        age: row.age,
        prefecture: row.prefecture,
        dependents: row.dependents.unwrap_or(0),
        employment_type,
        has_employer_withholding: row.has_employer_withholding.unwrap_or(true),
    };
    let input = form
        .to_input()
        .map_err(|source| ScenarioLoadError::InvalidInput {
            row: row_number,
            source,
        })?;

    Ok(Scenario {
        label: row.label.filter(|l| !l.is_empty()),
        input,
    })
}

/// Parses scenarios from any reader, in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`ScenarioLoadError::InvalidEmploymentType`] for an unknown
///   `employment_type`.
/// * [`ScenarioLoadError::InvalidInput`] when a field is out of range.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let scenarios = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

/// Parses scenarios from the full text of a CSV file.
///
/// ```
/// let csv = "annual_gross_salary,age,prefecture,employment_type\n600,30,Tokyo,regular\n";
/// let scenarios = yen_data::load_from_str(csv).unwrap();
///
/// assert_eq!(scenarios[0].title(), "Regular (¥600万)");
/// ```
///
/// # Errors
///
/// See [`load_from_reader`].
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    load_from_reader(input.as_bytes())
}

/// Opens a scenario file and delegates to [`load_from_reader`].
///
/// # Errors
///
/// [`ScenarioLoadError::Io`] when the file cannot be opened, otherwise as
/// [`load_from_reader`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let file = File::open(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading scenario file");
    load_from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
annual_gross_salary,age,prefecture,employment_type
600,30,Tokyo,regular
";

    const FULL_CSV: &str = "\
label,annual_gross_salary,age,prefecture,employment_type,dependents,has_employer_withholding
Side business,850.5,45,Osaka,freelance,2,false
";

    // -----------------------------------------------------------------------
    // required and optional columns
    // -----------------------------------------------------------------------

    #[test]
    fn minimal_csv_uses_defaults() {
        let scenarios = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.label, None);
        assert_eq!(s.input.annual_gross_salary(), dec!(6000000));
        assert_eq!(s.input.age(), 30);
        assert_eq!(s.input.prefecture(), "Tokyo");
        assert_eq!(s.input.employment_type(), EmploymentType::Regular);
        assert_eq!(s.input.dependents(), 0);
        assert!(s.input.has_employer_withholding());
    }

    #[test]
    fn full_csv_reads_every_column() {
        let scenarios = load_from_str(FULL_CSV).expect("should parse full CSV");

        let s = &scenarios[0];
        assert_eq!(s.label.as_deref(), Some("Side business"));
        assert_eq!(s.input.annual_gross_salary(), dec!(8505000));
        assert_eq!(s.input.employment_type(), EmploymentType::Freelance);
        assert_eq!(s.input.dependents(), 2);
        assert!(!s.input.has_employer_withholding());
    }

    #[test]
    fn empty_label_falls_back_to_generated_title() {
        let csv = "\
label,annual_gross_salary,age,prefecture,employment_type
,1200,30,Tokyo,part-time
";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].label, None);
        assert_eq!(scenarios[0].title(), "Part-time (¥1,200万)");
    }

    #[test]
    fn column_order_and_whitespace_do_not_matter() {
        let csv = "\
employment_type , prefecture , age , annual_gross_salary
 Contract , Saga , 52 , 700
";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].input.employment_type(), EmploymentType::Contract);
        assert_eq!(scenarios[0].input.prefecture(), "Saga");
        assert_eq!(scenarios[0].input.age(), 52);
    }

    #[test]
    fn header_only_yields_no_scenarios() {
        let csv = "annual_gross_salary,age,prefecture,employment_type\n";

        assert!(load_from_str(csv).expect("header-only CSV is valid").is_empty());
        assert!(load_from_str("").expect("empty input is valid").is_empty());
    }

    // -----------------------------------------------------------------------
    // errors
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_employment_type_reports_row() {
        let csv = "\
annual_gross_salary,age,prefecture,employment_type
600,30,Tokyo,regular
600,30,Tokyo,intern
";
        match load_from_str(csv).unwrap_err() {
            ScenarioLoadError::InvalidEmploymentType { value, row } => {
                assert_eq!(value, "intern");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidEmploymentType, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_salary_reports_row() {
        let csv = "annual_gross_salary,age,prefecture,employment_type\n250,30,Tokyo,regular\n";

        match load_from_str(csv).unwrap_err() {
            ScenarioLoadError::InvalidInput { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(source, InputError::SalaryOutOfRange { .. }));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_age_reports_row() {
        let csv = "annual_gross_salary,age,prefecture,employment_type\n600,17,Tokyo,regular\n";

        match load_from_str(csv).unwrap_err() {
            ScenarioLoadError::InvalidInput { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, InputError::AgeOutOfRange(17));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "annual_gross_salary,prefecture,employment_type\n600,Tokyo,regular\n";

        assert!(matches!(
            load_from_str(csv).unwrap_err(),
            ScenarioLoadError::Parse(_)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_file(Path::new("does/not/exist.csv")).unwrap_err();

        assert!(err.to_string().starts_with("cannot open scenario file 'does/not/exist.csv'"));
        match err {
            ScenarioLoadError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("does/not/exist.csv"));
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_salary_is_parse_error() {
        let csv = "annual_gross_salary,age,prefecture,employment_type\nlots,30,Tokyo,regular\n";

        assert!(matches!(
            load_from_str(csv).unwrap_err(),
            ScenarioLoadError::Parse(_)
        ));
    }
}
