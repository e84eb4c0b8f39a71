pub mod alphabet {
    use std::fmt::Display;

    use crate::error::{Error, Result};

    pub const ALPHABET_LENGTH: usize = 26;

    /// One of the 26 uppercase latin letters, stored as its offset from 'A'.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Symbol(u8);

    impl Symbol {
        pub const A: Symbol = Symbol(0);

        /// Wraps any value into the alphabet.
        pub fn wrapping(value: usize) -> Self {
            Self((value % ALPHABET_LENGTH) as u8)
        }

        /// Accepts upper- and lowercase ASCII letters.
        pub fn from_char(c: char) -> Result<Self> {
            if c.is_ascii_alphabetic() {
                Ok(Self(c.to_ascii_uppercase() as u8 - b'A'))
            } else {
                Err(Error::InvalidSymbol(c))
            }
        }

        pub fn to_char(self) -> char {
            (self.0 + b'A') as char
        }

        pub fn index(self) -> usize {
            self.0 as usize
        }

        /// (self + other) mod 26
        pub fn shift(self, other: Symbol) -> Self {
            Self((self.0 + other.0) % ALPHABET_LENGTH as u8)
        }

        /// (self - other + 26) mod 26
        pub fn unshift(self, other: Symbol) -> Self {
            Self((self.0 + ALPHABET_LENGTH as u8 - other.0) % ALPHABET_LENGTH as u8)
        }

        /// Iterates A..=Z in order.
        pub fn all() -> impl Iterator<Item = Symbol> {
            (0..ALPHABET_LENGTH as u8).map(Symbol)
        }
    }

    impl Display for Symbol {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.to_char())
        }
    }

    #[test]
    fn test_symbol_arithmetic() {
        let l = Symbol::from_char('l').unwrap();
        let z = Symbol::from_char('Z').unwrap();
        assert_eq!(l.index(), 11);
        assert_eq!(z.shift(l).to_char(), 'K');
        assert_eq!(z.shift(l).unshift(l), z);
        assert_eq!(Symbol::A.unshift(z).to_char(), 'B');
        assert_eq!(Symbol::from_char('3'), Err(Error::InvalidSymbol('3')));
        assert_eq!(Symbol::wrapping(27).to_char(), 'B');
    }
}

pub mod text {
    use std::fmt::Display;

    use bytes::Buf;

    use super::alphabet::Symbol;

    /// Normalized text: letters only, uppercase, original order. Immutable once built.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Text(Vec<Symbol>);

    impl Text {
        pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
            Self(symbols)
        }

        pub fn symbols(&self) -> &[Symbol] {
            &self.0
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// The first n symbols, or the whole text if it is shorter.
        pub fn prefix(&self, n: usize) -> Text {
            Self(self.0.iter().take(n).copied().collect())
        }
    }

    impl FromIterator<Symbol> for Text {
        fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
            Self(iter.into_iter().collect())
        }
    }

    impl Display for Text {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.iter().try_for_each(|s| write!(f, "{s}"))
        }
    }

    /// Keeps every ASCII letter of the given text, uppercased. Everything else is dropped without a trace.
    pub fn normalize(raw: &str) -> Text {
        raw.chars().filter_map(|c| Symbol::from_char(c).ok()).collect()
    }

    /// Same as normalize, but reads raw bytes straight from a buffer, e.g. the contents of a file.
    /// Non-ASCII bytes are never letters and get dropped.
    pub fn normalize_buf<B: Buf>(mut buf: B) -> Text {
        let mut symbols = Vec::with_capacity(buf.remaining());
        while buf.has_remaining() {
            if let Ok(s) = Symbol::from_char(buf.get_u8() as char) {
                symbols.push(s);
            }
        }
        Text(symbols)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("The quick brown fox,\njumps over 3 lazy dogs!").to_string(),
            "THEQUICKBROWNFOXJUMPSOVERLAZYDOGS"
        );
        assert!(normalize("1234 .,;\n\t").is_empty());
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_normalize_buf() {
        let raw = bytes::Bytes::from_static(b"Attack at dawn!\r\n\xc3\xa9t\xc3\xa9");
        assert_eq!(normalize_buf(raw).to_string(), "ATTACKATDAWNT");
        assert_eq!(normalize("Attack at dawn!"), normalize_buf(b"Attack at dawn!".as_slice()));
    }

    #[test]
    fn test_prefix() {
        let text = normalize("abcdef");
        assert_eq!(text.prefix(2).to_string(), "AB");
        assert_eq!(text.prefix(10), text);
    }
}

pub mod keyword {
    use std::{fmt::Display, ops::Deref, str::FromStr};

    use crate::error::{Error, Result};

    use super::{alphabet::Symbol, text::normalize};

    /// Repeating key of a Vigenere cipher. Never empty.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Keyword(Vec<Symbol>);

    impl Keyword {
        pub fn new(symbols: Vec<Symbol>) -> Result<Self> {
            if symbols.is_empty() {
                Err(Error::InvalidKeyword)
            } else {
                Ok(Self(symbols))
            }
        }

        /// Overwrites a single position of the keyword.
        pub fn replace(&mut self, index: usize, symbol: Symbol) -> Result<()> {
            let len = self.0.len();
            let slot = self
                .0
                .get_mut(index)
                .ok_or(Error::IndexOutOfRange { index, len })?;
            *slot = symbol;
            Ok(())
        }
    }

    impl Deref for Keyword {
        type Target = [Symbol];

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl FromStr for Keyword {
        type Err = Error;

        /// Non-letters are dropped the same way as in plaintext.
        fn from_str(s: &str) -> Result<Self> {
            Self::new(normalize(s).symbols().to_vec())
        }
    }

    impl Display for Keyword {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.iter().try_for_each(|s| write!(f, "{s}"))
        }
    }

    #[test]
    fn test_keyword() {
        let mut key: Keyword = "li-om".parse().unwrap();
        assert_eq!(key.to_string(), "LIOM");
        key.replace(3, Symbol::from_char('N').unwrap()).unwrap();
        assert_eq!(key.to_string(), "LION");
        assert_eq!(
            key.replace(4, Symbol::A),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!("12 !".parse::<Keyword>(), Err(Error::InvalidKeyword));
        assert_eq!(Keyword::new(Vec::new()), Err(Error::InvalidKeyword));
    }
}
