//! Processor identification and capability detection
//!
//! This module answers one question: can this process execute the hardware
//! RNG instructions?
//!
//! - [`cpuid`]
//!   Raw `CPUID` queries returning register tuples verbatim.
//!
//! - [`detect`]
//!   Vendor check and feature-bit inspection, cached once per process.

pub mod cpuid;
pub mod detect;

pub use cpuid::{Identify, Registers};
pub use detect::{Capabilities, detect_capabilities, has_rand, has_seed};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use cpuid::{NativeCpuid, identify};
