use std::fmt::Write;

use tools::encode::{keyword::Keyword, text::Text};

const BANNER_WIDTH: usize = 60;
const TITLE: &str = "====== Vigenere Cipher =======";

/// Title box shown at start up.
pub fn banner() -> String {
    let border = "═".repeat(BANNER_WIDTH);
    let blank = format!("|{}|", " ".repeat(BANNER_WIDTH - 1));
    let padding = BANNER_WIDTH - 1 - TITLE.chars().count();
    let title = format!(
        "|{}{TITLE}{}|",
        " ".repeat(padding / 2),
        " ".repeat(padding - padding / 2)
    );

    let mut lines = vec![border.clone(), blank.clone(), blank.clone(), title];
    lines.extend([blank.clone(), blank, border]);
    lines.join("\n")
}

/// Splits a text into blocks of `size` letters separated by a space.
pub fn group(text: &Text, size: usize) -> String {
    text.symbols()
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().map(|s| s.to_char()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword letters above their zero based positions.
pub fn keyword_with_index(keyword: &Keyword) -> String {
    let mut letters = String::new();
    let mut indices = String::new();
    for (i, s) in keyword.iter().enumerate() {
        let width = i.to_string().len();
        let _ = write!(letters, "{:<width$} ", s.to_char());
        let _ = write!(indices, "{i} ");
    }
    format!("{}\n{}", letters.trim_end(), indices.trim_end())
}

/// The first quarter of a plaintext, enough to judge a keyword.
pub fn preview(plaintext: &Text) -> Text {
    plaintext.prefix(plaintext.len() / 4)
}

#[cfg(test)]
use tools::encode::text::normalize;

#[test]
fn test_group() {
    assert_eq!(group(&normalize("abcdefghijkl"), 5), "ABCDE FGHIJ KL");
    assert_eq!(group(&Text::default(), 5), "");
}

#[test]
fn test_keyword_with_index() {
    let keyword: Keyword = "SECRETKEYWORD".parse().unwrap();
    let lines = keyword_with_index(&keyword);
    let (letters, indices) = lines.split_once('\n').unwrap();
    assert!(letters.starts_with("S E C R E T K E Y W O"));
    assert!(indices.ends_with("10 11 12"));
    // every letter sits above the first digit of its index
    assert_eq!(letters.find('D'), indices.find("12"));
}

#[test]
fn test_banner() {
    let banner = banner();
    assert!(banner.contains(TITLE));
    assert_eq!(banner.lines().count(), 7);
    assert!(banner
        .lines()
        .all(|l| l.chars().count() == BANNER_WIDTH || l.chars().count() == BANNER_WIDTH + 1));
}

#[test]
fn test_preview() {
    assert_eq!(preview(&normalize("abcdefgh")).to_string(), "AB");
}
