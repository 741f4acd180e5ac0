//! Raw hardware entropy for language runtimes
//!
//! This crate extracts random data from the processor's built-in entropy
//! instructions and packages it into caller-requested bit or byte lengths
//! with bit-exact precision. It is intended as the core of host-language
//! bindings that need raw entropy to seed cryptographic or statistical
//! generators.
//!
//! The focus is on **exactness and predictability**: a request for `n`
//! bits yields exactly `ceil(n / 8)` bytes, and every bit above `n` is
//! zero rather than hardware noise.
//!
//! # Module overview
//!
//! - `cpu`
//!   Processor identification (`CPUID`) and one-time detection of the two
//!   hardware RNG instruction families:
//!   - `RDRAND`, the fast-random source
//!   - `RDSEED`, the true-random source
//!
//!   Detection never fails. An unknown vendor or a missing feature bit is
//!   reported as "unsupported".
//!
//! - `rng`
//!   Word sources for both instruction families, the bit-exact extractor
//!   they share, and [`HardwareRng`], a generator that refuses to bind to
//!   an instruction the processor lacks.
//!
//! # Host-facing surface
//!
//! - [`detect_capabilities`], [`has_rand`], [`has_seed`]: snapshot once per
//!   process, immutable afterwards (`HAS_RAND` / `HAS_SEED`).
//! - [`get_random_bits`]: big-endian bytes suitable for constructing an
//!   unsigned integer of exactly the requested bit width.
//! - [`get_random_bytes`]: raw hardware bytes.
//!
//! # Non-goals
//!
//! No whitening, conditioning or statistical health testing is performed
//! beyond the success flag reported by the processor. Output is returned
//! verbatim.

pub mod cpu;
pub mod rng;

pub use cpu::{Capabilities, detect_capabilities, has_rand, has_seed};
pub use rng::{EntropyError, HardwareRng, Source, get_random_bits, get_random_bytes};
