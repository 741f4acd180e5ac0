//! Word sources
//!
//! A word source produces one 64-bit logical word of entropy per call. The
//! extractor is written against [`WordSource`] only, so both hardware
//! instruction families (and any test double) share a single bit-exact
//! buffer-filling algorithm.
//!
//! Hardware word sources signal transient unavailability through a status
//! flag. [`retry`] turns such a fallible single-shot step into a bounded
//! spin that either yields a value or reports
//! [`EntropyError::HardwareExhausted`].

use core::fmt::{Display, Formatter, Result as FmtResult};

use super::EntropyError;

/// Width of one logical word in bytes.
pub const WORD_BYTES: usize = 8;

/// Hardware instruction family to draw entropy from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// `RDRAND`: DRBG output reseeded from the on-chip entropy pool.
    FastRandom,
    /// `RDSEED`: conditioned output taken directly from the entropy pool.
    TrueRandom,
}

impl Source {
    /// Instruction mnemonic of this family.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::FastRandom => "rdrand",
            Self::TrueRandom => "rdseed",
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.mnemonic())
    }
}

/// A producer of 64-bit entropy words.
pub trait WordSource {
    /// Produces one word.
    fn next_word(&mut self) -> Result<u64, EntropyError>;

    /// Fills `out` with consecutive words.
    ///
    /// Used by the extractor for large requests. On error the contents of
    /// `out` are unspecified.
    fn fill_words(&mut self, out: &mut [u64]) -> Result<(), EntropyError> {
        for word in out.iter_mut() {
            *word = self.next_word()?;
        }

        Ok(())
    }
}

impl<S: WordSource + ?Sized> WordSource for &mut S {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        (**self).next_word()
    }

    fn fill_words(&mut self, out: &mut [u64]) -> Result<(), EntropyError> {
        (**self).fill_words(out)
    }
}

/// Repeats `step` until it yields a value, at most `limit` times.
///
/// The loop is a busy spin with no yield point. A `limit` of zero makes no
/// attempt at all and fails immediately.
pub fn retry<T>(
    source: Source,
    limit: u32,
    mut step: impl FnMut() -> Option<T>,
) -> Result<T, EntropyError> {
    for _ in 0..limit {
        if let Some(value) = step() {
            return Ok(value);
        }

        core::hint::spin_loop();
    }

    tracing::warn!(%source, limit, "hardware rng retry limit reached");

    Err(EntropyError::HardwareExhausted)
}

/// Combines two 32-bit fetches into one logical word.
///
/// `low` is the first fetch and fills bits 0..32; `high` is the second and
/// fills bits 32..64.
pub const fn compose(low: u32, high: u32) -> u64 {
    (low as u64) | ((high as u64) << 32)
}

/// Produces one logical word from a 32-bit step: low half first, then high.
///
/// Each half is retried independently with the full `limit`.
pub fn retry_composed(
    source: Source,
    limit: u32,
    mut step: impl FnMut() -> Option<u32>,
) -> Result<u64, EntropyError> {
    let low = retry(source, limit, &mut step)?;
    let high = retry(source, limit, &mut step)?;

    Ok(compose(low, high))
}
