//! Configuration errors and selector parsing shared by all config types

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors detected while parsing or validating configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown generator kind: '{0}'")]
    UnknownGeneratorKind(String),

    #[error("Unknown walk kind: '{0}'")]
    UnknownWalkKind(String),

    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("Range '{name}' is empty")]
    EmptyRange { name: &'static str },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Inclusive integer range `first..=last` used for seeds and step counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusiveRange {
    pub first: u64,
    pub last: u64,
}

impl InclusiveRange {
    pub const fn new(first: u64, last: u64) -> Self {
        Self { first, last }
    }

    /// Reject `first > last`; `name` identifies the range in the error
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.first > self.last {
            return Err(ConfigError::EmptyRange { name });
        }
        Ok(())
    }

    pub fn iter(&self) -> RangeInclusive<u64> {
        self.first..=self.last
    }

    /// Number of values (0 when empty)
    pub fn len(&self) -> u64 {
        if self.first > self.last {
            0
        } else {
            self.last - self.first + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lowercase a selector and drop `_`, `-` and whitespace
///
/// `"NUMERICAL_RECIPES"`, `"numerical-recipes"` and `"Numerical Recipes"`
/// all normalize to `"numericalrecipes"`.
pub(crate) fn normalize_selector(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
