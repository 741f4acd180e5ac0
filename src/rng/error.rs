use core::fmt::{Display, Formatter, Result};

use super::params::ParamError;

/// Errors that may occur while extracting hardware entropy.
///
/// Argument, parameter and allocation errors are always reported before any
/// hardware instruction executes. No partial output accompanies an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntropyError {
    /// The requested bit or byte count is zero or negative.
    InvalidArgument,

    /// The output buffer could not be allocated.
    AllocationFailure,

    /// The requested instruction family is not available on this processor.
    UnsupportedHardware,

    /// The hardware kept reporting failure until the retry limit was reached.
    HardwareExhausted,

    /// The extraction parameters are invalid.
    InvalidParams(ParamError),
}

impl Display for EntropyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidArgument => f.write_str("requested length must be greater than zero"),
            Self::AllocationFailure => f.write_str("out of memory allocating entropy buffer"),
            Self::UnsupportedHardware => {
                f.write_str("hardware random instruction not supported on this cpu")
            }
            Self::HardwareExhausted => {
                f.write_str("hardware random instruction failed until the retry limit")
            }
            Self::InvalidParams(e) => write!(f, "invalid extraction parameters: {e}"),
        }
    }
}

impl std::error::Error for EntropyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamError> for EntropyError {
    fn from(e: ParamError) -> Self {
        Self::InvalidParams(e)
    }
}
