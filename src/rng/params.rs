//! Tunable extraction parameters.
//!
//! These control how hard a word source tries before giving up and when the
//! extractor switches from per-word fetches to a single batched fetch.

use core::fmt::{Display, Formatter, Result};

/// Default number of attempts a word source makes before reporting
/// [`EntropyError::HardwareExhausted`](super::EntropyError::HardwareExhausted).
///
/// Real hardware succeeds within a handful of attempts; the cap only exists
/// to turn a wedged entropy unit into an error instead of a hang.
pub const DEFAULT_RETRY_LIMIT: u32 = 1 << 16;

/// Default number of full words from which the extractor fetches in one
/// batched call rather than word by word.
pub const DEFAULT_BATCH_THRESHOLD: usize = 4;

/// Configuration for word sources and the extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractParams {
    /// Maximum attempts per word, including the first (minimum 1).
    pub retry_limit: u32,
    /// Full-word count at which fetching switches to a batch (minimum 1).
    pub batch_threshold: usize,
}

/// Errors that can occur during parameter validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamError {
    /// A word source must be allowed at least one attempt.
    ZeroRetryLimit,
    /// The batch threshold must be at least one word.
    ZeroBatchThreshold,
}

impl ExtractParams {
    pub(crate) fn validate(&self) -> core::result::Result<(), ParamError> {
        if self.retry_limit == 0 {
            return Err(ParamError::ZeroRetryLimit);
        }

        if self.batch_threshold == 0 {
            return Err(ParamError::ZeroBatchThreshold);
        }

        Ok(())
    }
}

impl Default for ExtractParams {
    /// Default parameters: 65536 attempts per word, batches from 4 words.
    fn default() -> Self {
        Self {
            retry_limit: DEFAULT_RETRY_LIMIT,
            batch_threshold: DEFAULT_BATCH_THRESHOLD,
        }
    }
}

impl Display for ParamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::ZeroRetryLimit => f.write_str("retry limit must be at least 1"),
            Self::ZeroBatchThreshold => f.write_str("batch threshold must be at least 1"),
        }
    }
}

impl std::error::Error for ParamError {}
