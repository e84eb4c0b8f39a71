use rand::{rngs::StdRng, Rng, SeedableRng};
use tools::{
    analyze::{
        coincidence::{ioc_report, DEFAULT_MAX_KEY_LENGTH},
        friedman::{bracket, estimate},
        keyword::recover,
    },
    encode::{
        alphabet::Symbol,
        keyword::Keyword,
        text::{normalize, Text},
    },
    encrypt::vigenere::VigenereEnc,
    error::Error,
};

const SAMPLE: &str = include_str!("data/harbor.txt");

fn random_text(rng: &mut StdRng, len: usize) -> Text {
    (0..len).map(|_| Symbol::wrapping(rng.gen_range(0..26))).collect()
}

#[test]
fn test_random_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let len = rng.gen_range(1..300);
        let plain = random_text(&mut rng, len);
        let key_len = rng.gen_range(1..20);
        let key = Keyword::new(random_text(&mut rng, key_len).symbols().to_vec()).unwrap();

        let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();
        assert_eq!(cipher.len(), plain.len());
        assert_eq!(VigenereEnc::decrypt(&cipher, &key).unwrap(), plain);

        assert_eq!(VigenereEnc::encrypt(&plain, &[Symbol::A]).unwrap(), plain);
    }
}

#[test]
fn test_recover_key_from_long_text() {
    let plain = normalize(&SAMPLE.repeat(2));
    assert!(plain.len() >= 2000);

    for word in ["KEY", "LION", "CRYPTO", "VIGENERE", "SECRETKEYWORD"] {
        let key: Keyword = word.parse().unwrap();
        let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();
        let recovery = recover(&cipher, key.len()).unwrap();
        assert_eq!(recovery.keyword, key, "keyword {word}");
        assert_eq!(VigenereEnc::decrypt(&cipher, &recovery.keyword).unwrap(), plain);
    }
}

#[test]
fn test_key_length_diagnostics() {
    let plain = normalize(SAMPLE);
    let cipher = VigenereEnc::encrypt(&plain, &"LION".parse::<Keyword>().unwrap()).unwrap();

    let (low, high) = bracket(estimate(&cipher).unwrap()).unwrap();
    assert!(low <= 4 && 4 <= high, "friedman bracket {low}..{high}");

    let report = ioc_report(&cipher, DEFAULT_MAX_KEY_LENGTH).unwrap();
    assert_eq!(report.len(), DEFAULT_MAX_KEY_LENGTH);
    for entry in &report {
        assert_eq!(entry.is_likely, entry.key_length % 4 == 0, "{entry}");
    }
}

#[test]
fn test_plaintext_looks_english() {
    let report = ioc_report(&normalize(SAMPLE), 1).unwrap();
    assert!(report[0].is_likely);
}

#[test]
fn test_errors_surface() {
    let short = normalize("x");
    assert_eq!(
        estimate(&short),
        Err(Error::InsufficientData { needed: 2, got: 1 })
    );
    assert!(matches!(
        recover(&short, 2),
        Err(Error::InvalidKeyLength { .. })
    ));
    assert_eq!(VigenereEnc::decrypt(&short, &[]), Err(Error::InvalidKeyword));
}
