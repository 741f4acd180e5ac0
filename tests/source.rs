use hwrand::rng::source::{compose, retry, retry_composed};
use hwrand::rng::{EntropyError, Source, WordSource};

#[test]
fn test_retry_returns_first_success() {
    let mut attempts = 0;

    let value = retry(Source::FastRandom, 10, || {
        attempts += 1;
        (attempts == 3).then_some(0xABCDu64)
    });

    assert_eq!(value, Ok(0xABCD));
    assert_eq!(attempts, 3);
}

#[test]
fn test_retry_gives_up_after_exactly_the_limit() {
    let mut attempts = 0u32;

    let value: Result<u64, _> = retry(Source::TrueRandom, 100, || {
        attempts += 1;
        None
    });

    assert_eq!(value, Err(EntropyError::HardwareExhausted));
    assert_eq!(attempts, 100);
}

#[test]
fn test_retry_with_zero_limit_makes_no_attempt() {
    let mut attempts = 0u32;

    let value: Result<u64, _> = retry(Source::FastRandom, 0, || {
        attempts += 1;
        Some(1)
    });

    assert_eq!(value, Err(EntropyError::HardwareExhausted));
    assert_eq!(attempts, 0);
}

struct Counter(u64);

impl WordSource for Counter {
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        self.0 += 1;
        Ok(self.0)
    }
}

#[test]
fn test_default_fill_words_calls_next_word_in_order() {
    let mut source = Counter(0);
    let mut words = [0u64; 5];

    source.fill_words(&mut words).unwrap();

    assert_eq!(words, [1, 2, 3, 4, 5]);
}

fn pull<S: WordSource>(mut source: S) -> u64 {
    source.next_word().unwrap()
}

#[test]
fn test_mutable_reference_is_a_word_source() {
    let mut source = Counter(10);

    assert_eq!(pull(&mut source), 11);
    assert_eq!(pull(&mut source), 12);
    assert_eq!(source.0, 12);
}

#[test]
fn test_source_names_match_instructions() {
    assert_eq!(Source::FastRandom.to_string(), "rdrand");
    assert_eq!(Source::TrueRandom.to_string(), "rdseed");
}

#[test]
fn test_compose_puts_first_fetch_in_low_half() {
    assert_eq!(compose(0x1122_3344, 0x5566_7788), 0x5566_7788_1122_3344);
    assert_eq!(compose(u32::MAX, 0), 0x0000_0000_FFFF_FFFF);
    assert_eq!(compose(0, u32::MAX), 0xFFFF_FFFF_0000_0000);
}

#[test]
fn test_retry_composed_fetches_low_then_high() {
    let mut halves = [0x1122_3344u32, 0x5566_7788].into_iter();

    let word = retry_composed(Source::FastRandom, 4, || halves.next());

    assert_eq!(word, Ok(0x5566_7788_1122_3344));
}

#[test]
fn test_retry_composed_retries_each_half() {
    let mut script = [None, Some(0xAAAA_AAAAu32), None, None, Some(0xBBBB_BBBB)].into_iter();

    let word = retry_composed(Source::TrueRandom, 3, || script.next().flatten());

    assert_eq!(word, Ok(0xBBBB_BBBB_AAAA_AAAA));
}

#[test]
fn test_retry_composed_fails_when_high_half_exhausts() {
    let mut attempts = 0u32;

    let word = retry_composed(Source::FastRandom, 5, || {
        attempts += 1;
        (attempts == 1).then_some(7u32)
    });

    assert_eq!(word, Err(EntropyError::HardwareExhausted));
    assert_eq!(attempts, 6);
}
