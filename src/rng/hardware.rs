//! Capability-gated hardware random generator
//!
//! [`HardwareRng`] binds the extractor to one instruction family after
//! checking that the processor supports it. This is the layer that host
//! bindings call: it accepts signed request lengths, rejects non-positive
//! ones before touching the hardware, and refuses to construct a generator
//! for an instruction the CPU lacks.
//!
//! Output is raw hardware data. No whitening or conditioning is applied.

use super::extract::Extractor;
use super::params::ExtractParams;
use super::source::{Source, WordSource};
use super::x86::{RdRand, RdSeed};
use super::{Capabilities, EntropyError};
use crate::cpu::detect_capabilities;

/// Number of random bits used to build one `f64` in `[0, 1)`.
const F64_BITS: u32 = 52;

/// The instruction family a [`HardwareRng`] is bound to.
#[derive(Debug)]
enum Instruction {
    Rand(RdRand),
    Seed(RdSeed),
}

impl WordSource for Instruction {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        match self {
            Self::Rand(s) => s.next_word(),
            Self::Seed(s) => s.next_word(),
        }
    }

    fn fill_words(&mut self, out: &mut [u64]) -> Result<(), EntropyError> {
        match self {
            Self::Rand(s) => s.fill_words(out),
            Self::Seed(s) => s.fill_words(out),
        }
    }
}

/// Hardware random generator bound to one instruction family.
///
/// The generator holds no entropy state of its own; every call goes to the
/// hardware.
#[derive(Debug)]
pub struct HardwareRng {
    source: Source,
    extractor: Extractor<Instruction>,
}

impl HardwareRng {
    /// Creates a generator for `source` using the cached process-wide
    /// capabilities and default parameters.
    ///
    /// # Errors
    ///
    /// [`EntropyError::UnsupportedHardware`] if the processor lacks the
    /// instruction.
    pub fn new(source: Source) -> Result<Self, EntropyError> {
        Self::with_params(source, detect_capabilities(), ExtractParams::default())
    }

    /// Creates a generator against explicit capabilities and parameters.
    ///
    /// # Errors
    ///
    /// - [`EntropyError::InvalidParams`] if `params` fail validation
    /// - [`EntropyError::UnsupportedHardware`] if `caps` rule out `source`
    pub fn with_params(
        source: Source,
        caps: Capabilities,
        params: ExtractParams,
    ) -> Result<Self, EntropyError> {
        params.validate()?;

        let instruction = match source {
            Source::FastRandom => Instruction::Rand(RdRand::new(caps, params.retry_limit)?),
            Source::TrueRandom => Instruction::Seed(RdSeed::new(caps, params.retry_limit)?),
        };

        Ok(Self {
            source,
            extractor: Extractor::with_params(instruction, params)?,
        })
    }

    /// The instruction family this generator draws from.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Returns `ceil(bits / 8)` big-endian bytes holding exactly `bits`
    /// random bits.
    ///
    /// # Errors
    ///
    /// [`EntropyError::InvalidArgument`] if `bits <= 0`, otherwise as
    /// [`Extractor::fill_bits`].
    pub fn get_random_bits(&mut self, bits: i32) -> Result<Vec<u8>, EntropyError> {
        let bits = requested_len(bits)?;
        self.extractor.fill_bits(bits)
    }

    /// Returns exactly `bytes` random bytes.
    ///
    /// # Errors
    ///
    /// [`EntropyError::InvalidArgument`] if `bytes <= 0`, otherwise as
    /// [`Extractor::fill_bytes`].
    pub fn get_random_bytes(&mut self, bytes: i32) -> Result<Vec<u8>, EntropyError> {
        let bytes = requested_len(bytes)?;
        self.extractor.fill_bytes(bytes)
    }

    /// Returns one raw 64-bit word.
    pub fn next_u64(&mut self) -> Result<u64, EntropyError> {
        self.extractor.source_mut().next_word()
    }

    /// Returns a uniformly distributed `f64` in `[0, 1)` built from 52
    /// random bits.
    pub fn next_f64(&mut self) -> Result<f64, EntropyError> {
        let bytes = self.extractor.fill_bits(F64_BITS)?;
        let value = bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

        Ok(value as f64 / (1u64 << F64_BITS) as f64)
    }

    /// Fills the provided buffer with random bytes.
    ///
    /// Same layout as [`HardwareRng::get_random_bytes`]: words in
    /// little-endian order, a final partial word contributing its low-order
    /// bytes.
    pub fn fill_bytes(&mut self, out: &mut [u8]) -> Result<(), EntropyError> {
        self.extractor.fill_into(out)
    }
}

/// Fetches `bits` random bits from `source`, big-endian.
///
/// Convenience wrapper around [`HardwareRng`]. The length is validated
/// before capabilities are consulted.
pub fn get_random_bits(source: Source, bits: i32) -> Result<Vec<u8>, EntropyError> {
    requested_len(bits)?;
    HardwareRng::new(source)?.get_random_bits(bits)
}

/// Fetches `bytes` random bytes from `source`.
///
/// Convenience wrapper around [`HardwareRng`]. The length is validated
/// before capabilities are consulted.
pub fn get_random_bytes(source: Source, bytes: i32) -> Result<Vec<u8>, EntropyError> {
    requested_len(bytes)?;
    HardwareRng::new(source)?.get_random_bytes(bytes)
}

fn requested_len(n: i32) -> Result<u32, EntropyError> {
    match u32::try_from(n) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(EntropyError::InvalidArgument),
    }
}
