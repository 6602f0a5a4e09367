// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.
//!
//! Command-line flags take precedence; see `main.rs`.

use treecloud_core::ClassifyMode;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Output format for point data.
    pub format: OutputFormat,
    /// How nodes matching several categories are classified.
    pub classify: ClassifyMode,
    /// Digits after the decimal point in text output (`None` = shortest exact).
    pub precision: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unknown values fall back to
    /// the defaults with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            format: parse_var(&var, "TREECLOUD_FORMAT").unwrap_or(defaults.format),
            classify: parse_var(&var, "TREECLOUD_CLASSIFY").unwrap_or(defaults.classify),
            precision: parse_var(&var, "TREECLOUD_PRECISION").or(defaults.precision),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xyz,
            classify: ClassifyMode::Independent,
            precision: None,
        }
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, value = %raw, error = %err, "ignoring invalid setting");
            None
        }
    }
}
