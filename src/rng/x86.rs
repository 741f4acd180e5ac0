//! `RDRAND` / `RDSEED` word sources
//!
//! Each family is specialised per native width at compile time:
//!
//! - `x86_64`: one 64-bit instruction per word.
//! - `x86`: two 32-bit instructions per word, low half first, combined by
//!   [`compose`](super::source::compose).
//!
//! Both halves of a 32-bit composition are retried independently, each
//! with the full retry limit.
//!
//! On other architectures the types still exist so that callers compile
//! everywhere, but capability checks never pass and fetching a word reports
//! [`EntropyError::UnsupportedHardware`].

#[cfg(target_arch = "x86")]
use core::arch::x86 as arch;

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64 as arch;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use super::source::Source;

#[cfg(target_arch = "x86_64")]
use super::source::retry;

#[cfg(target_arch = "x86")]
use super::source::retry_composed;

use super::source::WordSource;
use super::{Capabilities, EntropyError};

/// Word source backed by the `RDRAND` instruction.
#[derive(Debug)]
pub struct RdRand {
    #[cfg_attr(not(any(target_arch = "x86", target_arch = "x86_64")), allow(dead_code))]
    retry_limit: u32,
}

/// Word source backed by the `RDSEED` instruction.
#[derive(Debug)]
pub struct RdSeed {
    #[cfg_attr(not(any(target_arch = "x86", target_arch = "x86_64")), allow(dead_code))]
    retry_limit: u32,
}

impl RdRand {
    /// Creates an `RDRAND` source if the processor supports it.
    pub fn new(caps: Capabilities, retry_limit: u32) -> Result<Self, EntropyError> {
        if !caps.has_fast_random {
            return Err(EntropyError::UnsupportedHardware);
        }

        // SAFETY: support was just checked.
        Ok(unsafe { Self::new_unchecked(retry_limit) })
    }

    /// Creates an `RDRAND` source without checking processor support.
    ///
    /// # Safety
    ///
    /// The processor must support `RDRAND`. Otherwise fetching a word
    /// raises an invalid-opcode fault.
    pub unsafe fn new_unchecked(retry_limit: u32) -> Self {
        Self { retry_limit }
    }
}

impl RdSeed {
    /// Creates an `RDSEED` source if the processor supports it.
    pub fn new(caps: Capabilities, retry_limit: u32) -> Result<Self, EntropyError> {
        if !caps.has_true_random {
            return Err(EntropyError::UnsupportedHardware);
        }

        // SAFETY: support was just checked.
        Ok(unsafe { Self::new_unchecked(retry_limit) })
    }

    /// Creates an `RDSEED` source without checking processor support.
    ///
    /// # Safety
    ///
    /// The processor must support `RDSEED`. Otherwise fetching a word
    /// raises an invalid-opcode fault.
    pub unsafe fn new_unchecked(retry_limit: u32) -> Self {
        Self { retry_limit }
    }
}

#[cfg(target_arch = "x86_64")]
impl WordSource for RdRand {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        // SAFETY: construction guarantees RDRAND support.
        retry(Source::FastRandom, self.retry_limit, || unsafe { rdrand_step() })
    }
}

#[cfg(target_arch = "x86_64")]
impl WordSource for RdSeed {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        // SAFETY: construction guarantees RDSEED support.
        retry(Source::TrueRandom, self.retry_limit, || unsafe { rdseed_step() })
    }
}

#[cfg(target_arch = "x86")]
impl WordSource for RdRand {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        // SAFETY: construction guarantees RDRAND support.
        retry_composed(Source::FastRandom, self.retry_limit, || unsafe { rdrand_step() })
    }
}

#[cfg(target_arch = "x86")]
impl WordSource for RdSeed {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        // SAFETY: construction guarantees RDSEED support.
        retry_composed(Source::TrueRandom, self.retry_limit, || unsafe { rdseed_step() })
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
#[allow(unused_unsafe)]
unsafe fn rdrand_step() -> Option<u64> {
    let mut value = 0u64;

    match unsafe { arch::_rdrand64_step(&mut value) } {
        1 => Some(value),
        _ => None,
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdseed")]
#[allow(unused_unsafe)]
unsafe fn rdseed_step() -> Option<u64> {
    let mut value = 0u64;

    match unsafe { arch::_rdseed64_step(&mut value) } {
        1 => Some(value),
        _ => None,
    }
}

#[cfg(target_arch = "x86")]
#[target_feature(enable = "rdrand")]
#[allow(unused_unsafe)]
unsafe fn rdrand_step() -> Option<u32> {
    let mut value = 0u32;

    match unsafe { arch::_rdrand32_step(&mut value) } {
        1 => Some(value),
        _ => None,
    }
}

#[cfg(target_arch = "x86")]
#[target_feature(enable = "rdseed")]
#[allow(unused_unsafe)]
unsafe fn rdseed_step() -> Option<u32> {
    let mut value = 0u32;

    match unsafe { arch::_rdseed32_step(&mut value) } {
        1 => Some(value),
        _ => None,
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
impl WordSource for RdRand {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        Err(EntropyError::UnsupportedHardware)
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
impl WordSource for RdSeed {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        Err(EntropyError::UnsupportedHardware)
    }
}
