//! Loading of salary scenarios and rate tables from disk.

pub mod rates;
pub mod scenarios;

pub use rates::{RateLoadError, load_rate_config, parse_rate_config};
pub use scenarios::{Scenario, ScenarioLoadError, load_from_file, load_from_reader, load_from_str};
