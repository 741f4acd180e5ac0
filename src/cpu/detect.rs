//! Hardware random number generator capability detection
//!
//! Decides whether the two hardware RNG instruction families can be used on
//! the current processor:
//!
//! - `RDRAND` (fast-random): reported by leaf 1, `ECX` bit 30.
//! - `RDSEED` (true-random): reported by leaf 7 sub-leaf 0, `EBX` bit 18.
//!
//! Feature bits are only trusted on the two vendors that define them at
//! these positions. Any other vendor string disables both families, even if
//! the bits happen to be set.
//!
//! Detection has no failure path. Absence of a hardware RNG is a valid
//! outcome and is reported as `false`, never as an error.

use std::sync::OnceLock;

use super::cpuid::Identify;

const VENDOR_INTEL: &[u8; 12] = b"GenuineIntel";
const VENDOR_AMD: &[u8; 12] = b"AuthenticAMD";

const LEAF_VENDOR: u32 = 0;
const LEAF_FEATURES: u32 = 1;
const LEAF_EXTENDED_FEATURES: u32 = 7;

const RDRAND_MASK: u32 = 1 << 30;
const RDSEED_MASK: u32 = 1 << 18;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Availability of the hardware RNG instruction families.
///
/// Computed once per process by [`detect_capabilities`] and immutable
/// afterwards. Components that need to gate on hardware support receive
/// this value explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// `RDRAND` is usable.
    pub has_fast_random: bool,

    /// `RDSEED` is usable.
    pub has_true_random: bool,
}

impl Capabilities {
    /// Capabilities of a processor with no usable hardware RNG.
    pub const NONE: Self = Self {
        has_fast_random: false,
        has_true_random: false,
    };

    /// Evaluates capabilities against an arbitrary identification provider.
    ///
    /// This is the pure core of [`detect_capabilities`]; it performs no
    /// caching and no logging.
    pub fn detect_with<I: Identify + ?Sized>(cpu: &I) -> Self {
        let leaf0 = cpu.identify(LEAF_VENDOR, 0);

        if !is_known_vendor(&vendor_string(leaf0.ebx, leaf0.edx, leaf0.ecx)) {
            return Self::NONE;
        }

        let has_fast_random = cpu.identify(LEAF_FEATURES, 0).ecx & RDRAND_MASK != 0;

        let max_leaf = leaf0.eax;
        let has_true_random = max_leaf >= LEAF_EXTENDED_FEATURES
            && cpu.identify(LEAF_EXTENDED_FEATURES, 0).ebx & RDSEED_MASK != 0;

        Self {
            has_fast_random,
            has_true_random,
        }
    }
}

/// Returns the process-wide hardware RNG capabilities.
///
/// The first call queries the processor; every later call returns the
/// cached result. Concurrent first calls are harmless because detection is
/// deterministic.
pub fn detect_capabilities() -> Capabilities {
    *CAPABILITIES.get_or_init(|| {
        let (caps, vendor) = detect_native();

        tracing::debug!(
            vendor = %String::from_utf8_lossy(&vendor),
            has_fast_random = caps.has_fast_random,
            has_true_random = caps.has_true_random,
            "hardware rng capabilities detected"
        );

        caps
    })
}

/// Whether `RDRAND` is usable (the `HAS_RAND` constant exposed to hosts).
pub fn has_rand() -> bool {
    detect_capabilities().has_fast_random
}

/// Whether `RDSEED` is usable (the `HAS_SEED` constant exposed to hosts).
pub fn has_seed() -> bool {
    detect_capabilities().has_true_random
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_native() -> (Capabilities, [u8; 12]) {
    let cpu = super::cpuid::NativeCpuid;

    (Capabilities::detect_with(&cpu), vendor_of(&cpu))
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn detect_native() -> (Capabilities, [u8; 12]) {
    (Capabilities::NONE, *b"unidentified")
}

/// Reads the 12-byte vendor identifier of `cpu` from leaf 0.
pub fn vendor_of<I: Identify + ?Sized>(cpu: &I) -> [u8; 12] {
    let leaf0 = cpu.identify(LEAF_VENDOR, 0);

    vendor_string(leaf0.ebx, leaf0.edx, leaf0.ecx)
}

/// Assembles the 12-byte vendor identifier from leaf 0 registers.
///
/// The order is `EBX`, `EDX`, `ECX`, each stored little-endian.
pub fn vendor_string(ebx: u32, edx: u32, ecx: u32) -> [u8; 12] {
    let mut vendor = [0u8; 12];

    vendor[0..4].copy_from_slice(&ebx.to_le_bytes());
    vendor[4..8].copy_from_slice(&edx.to_le_bytes());
    vendor[8..12].copy_from_slice(&ecx.to_le_bytes());

    vendor
}

fn is_known_vendor(vendor: &[u8; 12]) -> bool {
    vendor == VENDOR_INTEL || vendor == VENDOR_AMD
}
