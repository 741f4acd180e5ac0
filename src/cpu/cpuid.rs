//! Raw processor identification queries
//!
//! Thin wrapper around the `CPUID` instruction. A query takes a leaf and a
//! sub-leaf and produces four 32-bit registers, which are returned verbatim
//! without interpretation. Interpretation lives in [`super::detect`].
//!
//! The query is abstracted behind [`Identify`] so that capability decisions
//! can be made against recorded register tables as well as the live CPU.

/// The four registers produced by one `CPUID` query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl Registers {
    /// Builds a register tuple in `(eax, ebx, ecx, edx)` order.
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }
}

/// A provider of processor identification results.
///
/// Implementations must be pure: the same `(leaf, sub_leaf)` pair always
/// yields the same registers for the lifetime of the process.
pub trait Identify {
    /// Runs one identification query.
    fn identify(&self, leaf: u32, sub_leaf: u32) -> Registers;
}

/// The live processor, queried through the `CPUID` instruction.
///
/// Only available on `x86` and `x86_64`.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeCpuid;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl Identify for NativeCpuid {
    #[allow(unused_unsafe)]
    fn identify(&self, leaf: u32, sub_leaf: u32) -> Registers {
        #[cfg(target_arch = "x86")]
        use core::arch::x86::{__cpuid_count, has_cpuid};

        #[cfg(target_arch = "x86_64")]
        use core::arch::x86_64::__cpuid_count;

        // Pre-Pentium parts lack CPUID entirely.
        #[cfg(target_arch = "x86")]
        if !has_cpuid() {
            return Registers::default();
        }

        // SAFETY: CPUID is present on every x86_64 CPU and was checked for
        // above on 32-bit x86. It only reads identification registers.
        let r = unsafe { __cpuid_count(leaf, sub_leaf) };

        Registers::new(r.eax, r.ebx, r.ecx, r.edx)
    }
}

/// Runs one identification query against the live processor.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn identify(leaf: u32, sub_leaf: u32) -> Registers {
    NativeCpuid.identify(leaf, sub_leaf)
}
