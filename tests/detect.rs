use std::cell::RefCell;

use hwrand::cpu::detect::{vendor_of, vendor_string};
use hwrand::cpu::{Capabilities, Identify, Registers, detect_capabilities};
use hwrand::rng::{EntropyError, ExtractParams, ParamError};
use hwrand::{HardwareRng, Source};

const RDRAND_BIT: u32 = 1 << 30;
const RDSEED_BIT: u32 = 1 << 18;

/// A recorded processor: fixed register values per leaf.
struct FakeCpu {
    vendor: &'static [u8; 12],
    max_leaf: u32,
    leaf1_ecx: u32,
    leaf7_ebx: u32,
    queries: RefCell<Vec<u32>>,
}

impl FakeCpu {
    fn new(vendor: &'static [u8; 12], leaf1_ecx: u32, leaf7_ebx: u32) -> Self {
        Self {
            vendor,
            max_leaf: 0x16,
            leaf1_ecx,
            leaf7_ebx,
            queries: RefCell::new(Vec::new()),
        }
    }
}

fn word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes.try_into().unwrap())
}

impl Identify for FakeCpu {
    fn identify(&self, leaf: u32, sub_leaf: u32) -> Registers {
        self.queries.borrow_mut().push(leaf);

        match (leaf, sub_leaf) {
            (0, _) => Registers::new(
                self.max_leaf,
                word(&self.vendor[0..4]),
                word(&self.vendor[8..12]),
                word(&self.vendor[4..8]),
            ),
            (1, _) => Registers::new(0, 0, self.leaf1_ecx, 0),
            (7, 0) => Registers::new(0, self.leaf7_ebx, 0, 0),
            _ => Registers::default(),
        }
    }
}

#[test]
fn test_intel_with_both_instructions() {
    let cpu = FakeCpu::new(b"GenuineIntel", RDRAND_BIT, RDSEED_BIT);

    assert_eq!(
        Capabilities::detect_with(&cpu),
        Capabilities {
            has_fast_random: true,
            has_true_random: true,
        }
    );
}

#[test]
fn test_amd_with_rdrand_only() {
    let cpu = FakeCpu::new(b"AuthenticAMD", RDRAND_BIT | 1, !RDSEED_BIT);

    assert_eq!(
        Capabilities::detect_with(&cpu),
        Capabilities {
            has_fast_random: true,
            has_true_random: false,
        }
    );
}

#[test]
fn test_known_vendor_without_feature_bits() {
    let cpu = FakeCpu::new(b"GenuineIntel", !RDRAND_BIT, 0);

    assert_eq!(Capabilities::detect_with(&cpu), Capabilities::NONE);
}

#[test]
fn test_unknown_vendor_disables_everything_and_stops_querying() {
    let cpu = FakeCpu::new(b"CentaurHauls", u32::MAX, u32::MAX);

    assert_eq!(Capabilities::detect_with(&cpu), Capabilities::NONE);
    assert_eq!(*cpu.queries.borrow(), vec![0]);
}

#[test]
fn test_vendor_match_is_exact() {
    let cpu = FakeCpu::new(b"GenuineIntex", RDRAND_BIT, RDSEED_BIT);

    assert_eq!(Capabilities::detect_with(&cpu), Capabilities::NONE);
}

#[test]
fn test_low_max_leaf_skips_extended_features() {
    let mut cpu = FakeCpu::new(b"GenuineIntel", RDRAND_BIT, RDSEED_BIT);
    cpu.max_leaf = 6;

    let caps = Capabilities::detect_with(&cpu);

    assert!(caps.has_fast_random);
    assert!(!caps.has_true_random);
    assert!(!cpu.queries.borrow().contains(&7));
}

#[test]
fn test_vendor_string_uses_ebx_edx_ecx_order() {
    let ebx = word(b"Genu");
    let edx = word(b"ineI");
    let ecx = word(b"ntel");

    assert_eq!(&vendor_string(ebx, edx, ecx), b"GenuineIntel");
}

#[test]
fn test_detection_is_idempotent() {
    let first = detect_capabilities();
    let second = detect_capabilities();

    assert_eq!(first, second);
    assert_eq!(hwrand::has_rand(), first.has_fast_random);
    assert_eq!(hwrand::has_seed(), first.has_true_random);
}

#[test]
fn test_unsupported_source_is_rejected_before_reaching_hardware() {
    let caps = Capabilities {
        has_fast_random: true,
        has_true_random: false,
    };

    let err = HardwareRng::with_params(Source::TrueRandom, caps, ExtractParams::default()).err();
    assert_eq!(err, Some(EntropyError::UnsupportedHardware));

    let err =
        HardwareRng::with_params(Source::FastRandom, Capabilities::NONE, ExtractParams::default())
            .err();
    assert_eq!(err, Some(EntropyError::UnsupportedHardware));
}

#[test]
fn test_invalid_params_win_over_capability_check() {
    let params = ExtractParams {
        retry_limit: 0,
        ..ExtractParams::default()
    };

    let err = HardwareRng::with_params(Source::FastRandom, Capabilities::NONE, params).err();
    assert_eq!(
        err,
        Some(EntropyError::InvalidParams(ParamError::ZeroRetryLimit))
    );
}

#[test]
fn test_vendor_of_reads_leaf_zero_only() {
    let cpu = FakeCpu::new(b"AuthenticAMD", RDRAND_BIT, RDSEED_BIT);

    assert_eq!(&vendor_of(&cpu), b"AuthenticAMD");
    assert_eq!(*cpu.queries.borrow(), vec![0]);
}
