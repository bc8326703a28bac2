/*!
Solver options.
*/

use std::time::Duration;

use crate::prelude::*;

pub const TIMEOUT_VAR: &str = "PERSAT_TIMEOUT_MS";
pub const DROP_TAUTOLOGIES_VAR: &str = "PERSAT_DROP_TAUTOLOGIES";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Invalid value '{}' for {}: expected milliseconds", value, key))]
    InvalidTimeout {
        key: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
    #[snafu(display("Invalid value '{}' for {}: expected a boolean", value, key))]
    InvalidFlag { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Give up with a timeout error once the search has run this long.
    pub timeout: Option<Duration>,
    /// Remove clauses containing both polarities of a variable before the
    /// search starts.
    pub drop_tautologies: bool,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_drop_tautologies(mut self, drop_tautologies: bool) -> Self {
        self.drop_tautologies = drop_tautologies;
        self
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a key lookup, unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SolverConfig::default();

        if let Some(value) = lookup(TIMEOUT_VAR) {
            let millis = value.trim().parse::<u64>().context(InvalidTimeout {
                key: TIMEOUT_VAR,
                value: value.clone(),
            })?;
            config.timeout = Some(Duration::from_millis(millis));
        }

        if let Some(value) = lookup(DROP_TAUTOLOGIES_VAR) {
            config.drop_tautologies = parse_flag(&value).context(InvalidFlag {
                key: DROP_TAUTOLOGIES_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
