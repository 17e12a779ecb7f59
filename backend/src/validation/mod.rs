//! Generator quality checks
//!
//! - **dice**: two-dice chi-squared goodness-of-fit (11 and 9 categories)
//! - **range**: min/max/mean of raw draws
//! - **stats**: chi-squared p-values

pub mod dice;
pub mod range;
pub mod stats;

use thiserror::Error;

use crate::models::ConfigError;
use crate::rng::RngError;

pub use dice::{
    run_dice_batch, run_dice_test, ChiSquaredStatistics, DiceBatchReport, DiceCounts, DiceTestConfig,
    ValidationReport, CATEGORY_COUNT, CRITICAL_VALUE_11, CRITICAL_VALUE_9, THEORETICAL_FREQUENCIES,
};
pub use range::{summarize_range, RangeSummary};

/// Errors raised by the validation utilities
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid validation configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("RNG error: {0}")]
    Rng(#[from] RngError),
}
