//! Hardware random data extraction
//!
//! This module turns the processor's entropy instructions into buffers of
//! caller-requested length.
//!
//! It is built in layers:
//! - word sources (`RDRAND`, `RDSEED`) each producing one 64-bit word with
//!   bounded retry on transient hardware failure
//! - a single extractor, generic over the word source, that assembles words
//!   into bit-exact or byte-exact buffers
//! - a capability-gated generator for callers that should never reach an
//!   unsupported instruction

/// Design goals:
/// - Raw hardware output, no post-processing
/// - Exact output lengths, with unused high bits always zero
/// - One extraction algorithm shared by both instruction families
/// - Errors reported before any instruction executes
mod error;
mod extract;
mod hardware;
mod params;
pub mod source;
mod x86;

pub use crate::cpu::Capabilities;
pub use error::EntropyError;
pub use extract::Extractor;
pub use hardware::{HardwareRng, get_random_bits, get_random_bytes};
pub use params::{DEFAULT_BATCH_THRESHOLD, DEFAULT_RETRY_LIMIT, ExtractParams, ParamError};
pub use source::{Source, WORD_BYTES, WordSource};
pub use x86::{RdRand, RdSeed};
