use std::{fs, io::Cursor};

use tools::{
    encode::{
        keyword::Keyword,
        text::{normalize, Text},
    },
    encrypt::vigenere::VigenereEnc,
    refine::AnalysisSession,
};
use vigenere::console::{Console, Destination, Kind};

const SAMPLE: &str = include_str!("../../tools/tests/data/harbor.txt");

fn lion() -> (Text, Text) {
    let plain = normalize(SAMPLE);
    let key: Keyword = "LION".parse().unwrap();
    let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();
    (plain, cipher)
}

fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_refine_one_position() {
    let (plain, cipher) = lion();
    let session = AnalysisSession::new(cipher, 4)
        .unwrap()
        .with_keyword("LIOM".parse().unwrap())
        .unwrap();

    let mut console = console("n\n3\nn\ny\n");
    let (keyword, plaintext) = console.refine(session).unwrap();
    assert_eq!(keyword.to_string(), "LION");
    assert_eq!(plaintext, plain);

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("I estimated the keyword to be: LIOM."));
    assert!(output.contains("L I O M\n0 1 2 3"));
    assert!(output.contains("for index 3 are as follows"));
    assert!(output.contains("I estimated the keyword to be: LION."));
}

#[test]
fn test_refine_reprompts_on_bad_input() {
    let (plain, cipher) = lion();
    let session = AnalysisSession::new(cipher, 4)
        .unwrap()
        .with_keyword("LIOM".parse().unwrap())
        .unwrap();

    let mut console = console("no\nseven\n9\n3\n7\nN\nYes\n");
    let (keyword, plaintext) = console.refine(session).unwrap();
    assert_eq!(keyword.to_string(), "LION");
    assert_eq!(plaintext, plain);

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Please enter a number."));
    assert!(output.contains("index 9 is out of range for a keyword of length 4"));
    assert!(output.contains("'7' is not a letter between A and Z"));
}

#[test]
fn test_decrypt_asks_for_key_length() {
    let (plain, cipher) = lion();
    let mut console = console("0\n4\ny\n");
    let (keyword, plaintext) = console.decrypt(&cipher, None, 24).unwrap();
    assert_eq!(keyword.to_string(), "LION");
    assert_eq!(plaintext, plain);

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("The Friedman Test estimates the key length is: 4 or 5"));
    assert!(output.contains("keylength:  8 average ioc: "));
    assert!(output.contains("key length 0 is invalid"));
    assert!(output.contains("Number of shifts for keyword index 0 is: 11"));
}

#[test]
fn test_decrypt_rejects_given_key_length() {
    let (_, cipher) = lion();
    let mut console = console("");
    assert!(console.decrypt(&cipher, Some(cipher.len() + 1), 24).is_err());
}

#[test]
fn test_emit_ciphertext_in_blocks() {
    let mut console = console("");
    console
        .emit(&normalize("abcdefg"), Kind::Ciphertext, &Destination::Screen)
        .unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("=== YOUR CIPHERTEXT ===\nABCDE FG\n"));
}

#[test]
fn test_menu_encrypt_then_decrypt() {
    let dir = tempfile::tempdir().unwrap();
    let path = |name: &str| dir.path().join(name).display().to_string();
    fs::write(path("plain.txt"), SAMPLE).unwrap();

    let script = format!(
        "1\n{}\nlemon\n2\n{}\n2\n{}\n5\ny\n2\n{}\n3\n",
        path("plain"),
        path("cipher"),
        path("cipher.txt"),
        path("recovered")
    );
    let mut console = console(&script);
    console.menu(24).unwrap();

    let key: Keyword = "LEMON".parse().unwrap();
    let expected = VigenereEnc::encrypt(&normalize(SAMPLE), &key).unwrap();
    assert_eq!(fs::read_to_string(path("cipher.txt")).unwrap(), expected.to_string());
    assert_eq!(
        fs::read_to_string(path("recovered.txt")).unwrap(),
        normalize(SAMPLE).to_string()
    );

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Final keyword: LEMON"));
}

#[test]
fn test_menu_survives_missing_file() {
    let mut console = console("1\n/nonexistent/file\n3\n");
    console.menu(24).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Error opening file"));
}

#[test]
fn test_closed_input() {
    let mut console = console("");
    assert!(console.menu(24).is_err());
}
