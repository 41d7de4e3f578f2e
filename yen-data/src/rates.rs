//! TOML overrides for the built-in rate tables.
//!
//! Any subset of [`RateConfig`] may be given; sections and fields that are
//! left out keep their built-in values. A list that is given (for example
//! `social_insurance.prefectures`) replaces the built-in list entirely.
//!
//! ```toml
//! [resident_tax]
//! rate = 0.10
//!
//! [[social_insurance.prefectures]]
//! name = "Hokkaido"
//! health_insurance_rate = 0.1021
//! ```
//!
//! The merged table is validated before it is returned.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use yen_core::{RateConfig, RateConfigError};

/// Errors that can occur when loading a rate table.
#[derive(Debug, Error)]
pub enum RateLoadError {
    #[error("cannot read rate file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rate file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rate table: {0}")]
    Invalid(#[from] RateConfigError),
}

/// Parses and validates a rate table from TOML text.
///
/// ```
/// use rust_decimal_macros::dec;
///
/// let config = yen_data::parse_rate_config("[resident_tax]\nrate = 0.08\n").unwrap();
///
/// assert_eq!(config.resident_tax.rate, dec!(0.08));
/// assert_eq!(config.resident_tax.prefectural_share, dec!(0.4));
/// ```
///
/// # Errors
///
/// [`RateLoadError::Parse`] for malformed TOML or wrongly typed fields,
/// [`RateLoadError::Invalid`] when the merged table fails validation.
pub fn parse_rate_config(input: &str) -> Result<RateConfig, RateLoadError> {
    let config: RateConfig = toml::from_str(input)?;
    config.validate()?;

    debug!(
        deduction_brackets = config.employment_deduction.len(),
        tax_brackets = config.national_tax.brackets.len(),
        prefectures = config.social_insurance.prefectures.len(),
        "parsed rate table"
    );
    Ok(config)
}

/// Reads a TOML file and delegates to [`parse_rate_config`].
///
/// # Errors
///
/// [`RateLoadError::Io`] when the file cannot be read, otherwise see
/// [`parse_rate_config`].
pub fn load_rate_config(path: &Path) -> Result<RateConfig, RateLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RateLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_rate_config(&contents)?;

    info!(path = %path.display(), "loaded rate table");
    Ok(config)
}
