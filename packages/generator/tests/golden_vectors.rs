//! Known-answer tests pinning the output stream
//!
//! Reference parameters: Argon2i v0x13, 64 MiB, one lane, scaled 3..=6 passes.

use chainseed_common::LoggingTransformer;
use chainseed_generator::{
    Generator, GeneratorArgs, GeneratorConfig, KdfConfig, KeystreamCipher, bootstrap_seed,
};
use hex_literal::hex;

const PASSWORD: &str = "correct horse";
const CONFUSION: &str = "battery staple";

fn reference(pattern_bytes: usize) -> GeneratorConfig {
    GeneratorConfig::default()
        .with_kdf(KdfConfig::reference())
        .with_pattern_bytes(pattern_bytes)
}

#[test]
fn test_end_to_end_one_round_two_byte_pattern() {
    LoggingTransformer::init_test();

    let mut generator = Generator::new(GeneratorArgs::new(PASSWORD, CONFUSION, 1), reference(2))
        .expect("valid inputs");
    let report = generator.setup().expect("setup should succeed");

    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.rounds[0].bytes_scanned, 69936);
    let block = generator.next_block(64).expect("generator is ready");
    assert_eq!(
        block,
        hex!(
            "212c6ab04b1bfd052b1562fe2c690cb38bea670cdd8c313aeb0500d597ac61b2"
            "2e262862d8717f1a465f5ca5610abb50b62c1fbdeb2f758386a388592c6fb2aa"
        )
        .to_vec()
    );
}

#[test]
fn test_end_to_end_one_round_one_byte_pattern() {
    let mut generator = Generator::new(GeneratorArgs::new(PASSWORD, CONFUSION, 1), reference(1))
        .expect("valid inputs");
    let report = generator.setup().expect("setup should succeed");

    assert_eq!(report.total_bytes_scanned(), 459);
    assert_eq!(
        generator.next_block(64).expect("generator is ready"),
        hex!(
            "f95d45695310a4759fa09ff6ffad9f525c7d4ba0416baa58fb154b134c7eed79"
            "fe76a57327c625c8d0c018aef67e953724fc7058f75845a8dbe139160a5be2d4"
        )
        .to_vec()
    );
}

#[test]
fn test_bootstrap_seed_vectors() {
    let kdf = KdfConfig::reference();
    let seed_ic0 = bootstrap_seed(PASSWORD.as_bytes(), CONFUSION.as_bytes(), 0, &kdf)
        .expect("bootstrap should succeed");
    let seed_ic1 = bootstrap_seed(PASSWORD.as_bytes(), CONFUSION.as_bytes(), 1, &kdf)
        .expect("bootstrap should succeed");

    assert_eq!(
        seed_ic0.as_bytes(),
        &hex!("00739acd51f9acadc65f52bf21be5c318fbcd852408b5f56fc8c0bc422cf5d82")
    );
    assert_eq!(
        seed_ic1.as_bytes(),
        &hex!("40b3bc195bf3bbb23a0e120e386f1dabf1efab0a114cc7c2a407ea13cb04193c")
    );
}

#[test]
fn test_zero_iterations_emit_raw_bootstrap_keystream() {
    let mut generator = Generator::new(GeneratorArgs::new(PASSWORD, CONFUSION, 0), reference(2))
        .expect("valid inputs");
    let report = generator.setup().expect("setup should succeed");
    assert!(report.rounds.is_empty());

    let output = generator.next_block(64).expect("generator is ready");

    let seed = bootstrap_seed(
        PASSWORD.as_bytes(),
        CONFUSION.as_bytes(),
        0,
        &KdfConfig::reference(),
    )
    .expect("bootstrap should succeed");
    assert_eq!(
        output,
        KeystreamCipher::new(&seed)
            .produce(64)
            .expect("keystream draw should succeed")
    );
    assert_eq!(
        output,
        hex!(
            "ee3ed3310a7bcfdda0c41d6e17afcd45667647c4768476c6980c60aae62d793a"
            "db8afe3a4b9e8e11ec6c3ca1b5b807ed2170c8859521efe0c1dcd31bca8c0c02"
        )
        .to_vec()
    );
}

#[test]
fn test_lightweight_vector_with_first_window_match() {
    let config = GeneratorConfig::default()
        .with_kdf(KdfConfig::lightweight())
        .with_pattern_bytes(1);
    let mut generator =
        Generator::new(GeneratorArgs::new(PASSWORD, CONFUSION, 5), config).expect("valid inputs");
    let report = generator.setup().expect("setup should succeed");

    // Round 3 matches in the very first window: nothing reaches the accumulator.
    let scanned: Vec<u64> = report.rounds.iter().map(|r| r.bytes_scanned).collect();
    assert_eq!(scanned, vec![64, 111, 111, 0, 77]);
    assert_eq!(
        generator.next_block(64).expect("generator is ready"),
        hex!(
            "47196448a894d6dab8b07e66b9cd27fe0e74ba1f533ce0e50a3f5b143fe3a667"
            "d2e90a214c241c99ae3a97b7d06d2903108c11d261736f97ea002b82938b5386"
        )
        .to_vec()
    );
}
