//! Bit-exact entropy extraction
//!
//! Turns an arbitrary requested length into a byte buffer assembled from
//! 64-bit words produced by an injected [`WordSource`].
//!
//! For a request of `n` bits:
//!
//! - `ceil(n / 8)` bytes are produced
//! - full words are copied verbatim in little-endian byte order
//! - a final partial word contributes only its low-order bytes
//! - when `n` is not a multiple of 8 the last assembled byte is masked so
//!   that only its low `n % 8` bits can be set
//!
//! Bit-mode output is then presented big-endian (most significant byte
//! first), so the masked byte is byte 0 and the buffer can be fed directly
//! into an unsigned big-integer constructor of exactly `n` bits.
//!
//! Byte-mode output is never masked or reordered.

use super::params::ExtractParams;
use super::source::{WORD_BYTES, WordSource};
use super::EntropyError;

/// Fills buffers of arbitrary bit or byte length from a word source.
///
/// The extractor does not check processor capabilities. Gating is the
/// caller's responsibility (see [`HardwareRng`](super::HardwareRng)).
#[derive(Debug)]
pub struct Extractor<S> {
    source: S,
    params: ExtractParams,
}

impl<S: WordSource> Extractor<S> {
    /// Creates an extractor with default parameters.
    pub fn new(source: S) -> Self {
        Self {
            source,
            params: ExtractParams::default(),
        }
    }

    /// Creates an extractor with explicit parameters.
    pub fn with_params(source: S, params: ExtractParams) -> Result<Self, EntropyError> {
        params.validate()?;

        Ok(Self { source, params })
    }

    /// Returns `ceil(bits / 8)` random bytes, big-endian, with every bit
    /// above `bits` cleared.
    ///
    /// # Errors
    ///
    /// - [`EntropyError::InvalidArgument`] if `bits` is zero
    /// - [`EntropyError::AllocationFailure`] if the buffer cannot be allocated
    /// - [`EntropyError::HardwareExhausted`] if the source gives up
    pub fn fill_bits(&mut self, bits: u32) -> Result<Vec<u8>, EntropyError> {
        if bits == 0 {
            return Err(EntropyError::InvalidArgument);
        }

        let num_bytes = (bits as usize).div_ceil(8);
        let tail_bits = bits % 8;

        let mut buf = self.assemble(num_bytes)?;

        if tail_bits != 0 {
            buf[num_bytes - 1] &= 0xFF >> (8 - tail_bits);
        }

        buf.reverse();

        tracing::trace!(bits, bytes = num_bytes, "extracted random bits");

        Ok(buf)
    }

    /// Returns exactly `bytes` random bytes in word order, unmasked.
    ///
    /// # Errors
    ///
    /// Same as [`Extractor::fill_bits`].
    pub fn fill_bytes(&mut self, bytes: u32) -> Result<Vec<u8>, EntropyError> {
        if bytes == 0 {
            return Err(EntropyError::InvalidArgument);
        }

        let buf = self.assemble(bytes as usize)?;

        tracing::trace!(bytes, "extracted random bytes");

        Ok(buf)
    }

    /// Gives mutable access to the underlying word source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the extractor, returning the word source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Fills `out` with word bytes, low byte first, unmasked.
    ///
    /// This is the single assembly path behind [`Extractor::fill_bits`] and
    /// [`Extractor::fill_bytes`]. An empty `out` fetches nothing. On error the
    /// contents of `out` are unspecified.
    pub fn fill_into(&mut self, out: &mut [u8]) -> Result<(), EntropyError> {
        let full_words = out.len() / WORD_BYTES;
        let (full, tail) = out.split_at_mut(full_words * WORD_BYTES);

        if full_words >= self.params.batch_threshold {
            let mut words = Vec::new();
            words
                .try_reserve_exact(full_words)
                .map_err(|_| EntropyError::AllocationFailure)?;
            words.resize(full_words, 0u64);

            self.source.fill_words(&mut words)?;

            full.chunks_exact_mut(WORD_BYTES)
                .zip(&words)
                .for_each(|(chunk, w)| chunk.copy_from_slice(&w.to_le_bytes()));
        } else {
            for chunk in full.chunks_exact_mut(WORD_BYTES) {
                chunk.copy_from_slice(&self.source.next_word()?.to_le_bytes());
            }
        }

        if !tail.is_empty() {
            let word = self.source.next_word()?;
            tail.copy_from_slice(&word.to_le_bytes()[..tail.len()]);
        }

        Ok(())
    }

    /// Allocates `num_bytes` and fills them through [`Extractor::fill_into`].
    fn assemble(&mut self, num_bytes: usize) -> Result<Vec<u8>, EntropyError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(num_bytes)
            .map_err(|_| EntropyError::AllocationFailure)?;
        buf.resize(num_bytes, 0u8);

        self.fill_into(&mut buf)?;

        Ok(buf)
    }
}
