pub mod frequency {
    use std::{fmt::Display, ops::Index};

    use crate::{
        encode::{
            alphabet::{Symbol, ALPHABET_LENGTH},
            text::Text,
        },
        error::{Error, Result},
    };

    /// Raw number of occurrences of every letter.
    pub fn counts(symbols: &[Symbol]) -> [usize; ALPHABET_LENGTH] {
        let mut counts = [0; ALPHABET_LENGTH];
        symbols.iter().for_each(|s| counts[s.index()] += 1);
        counts
    }

    /// Relative frequency of every letter in a text. Sums up to 1.0.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct FrequencyTable([f64; ALPHABET_LENGTH]);

    impl FrequencyTable {
        /// Fails with EmptyInput for an empty slice, there is nothing to divide by.
        pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
            if symbols.is_empty() {
                return Err(Error::EmptyInput);
            }
            let n = symbols.len() as f64;
            Ok(Self(counts(symbols).map(|c| c as f64 / n)))
        }

        pub fn as_array(&self) -> &[f64; ALPHABET_LENGTH] {
            &self.0
        }
    }

    impl Index<Symbol> for FrequencyTable {
        type Output = f64;

        fn index(&self, index: Symbol) -> &Self::Output {
            &self.0[index.index()]
        }
    }

    impl Display for FrequencyTable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Symbol::all().try_for_each(|s| writeln!(f, "{s}: {:.5}", self[s]))
        }
    }

    pub fn frequencies(text: &Text) -> Result<FrequencyTable> {
        FrequencyTable::from_symbols(text.symbols())
    }

    #[cfg(test)]
    use crate::encode::text::normalize;

    #[test]
    fn test_frequencies() {
        let table = frequencies(&normalize("aabc")).unwrap();
        assert_eq!(table[Symbol::A], 0.5);
        assert_eq!(table.as_array()[1], 0.25);
        assert_eq!(table.as_array()[25], 0.0);
        assert!((table.as_array().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(frequencies(&Text::default()), Err(Error::EmptyInput));
    }
}

pub mod coincidence {
    use std::fmt::Display;

    use tracing::trace;

    use super::frequency::counts;
    use crate::{
        encode::{alphabet::Symbol, text::Text},
        error::{Error, Result},
    };

    /// Average IoC above which a key length is flagged as likely. English text sits near 0.066.
    pub const ENGLISH_IOC_THRESHOLD: f64 = 0.06;

    /// Default upper bound for the key lengths in the report.
    pub const DEFAULT_MAX_KEY_LENGTH: usize = 24;

    /// Index of coincidence, the probability that two letters drawn from the text are equal.
    /// Needs at least two letters.
    pub fn ioc(symbols: &[Symbol]) -> Result<f64> {
        let n = symbols.len();
        if n < 2 {
            return Err(Error::InsufficientData { needed: 2, got: n });
        }
        let summation: usize = counts(symbols).iter().map(|&f| f * f.saturating_sub(1)).sum();
        Ok(summation as f64 / (n * (n - 1)) as f64)
    }

    /// Splits a text into key_length cosets, coset i holding every letter at a position p with p mod key_length == i.
    pub fn cosets(text: &Text, key_length: usize) -> Vec<Vec<Symbol>> {
        (0..key_length)
            .map(|i| {
                text.symbols()
                    .iter()
                    .skip(i)
                    .step_by(key_length)
                    .copied()
                    .collect()
            })
            .collect()
    }

    /// Reverses cosets() by reading the cosets round-robin.
    pub fn interleave(cosets: &[Vec<Symbol>]) -> Text {
        let len = cosets.iter().map(Vec::len).sum();
        let mut symbols = Vec::with_capacity(len);
        for p in 0..len {
            if let Some(&s) = cosets.get(p % cosets.len()).and_then(|c| c.get(p / cosets.len())) {
                symbols.push(s);
            }
        }
        Text::from_symbols(symbols)
    }

    /// Mean IoC over the cosets of a single key length. Fails if any coset has fewer than two letters.
    pub fn average_ioc(text: &Text, key_length: usize) -> Result<f64> {
        if key_length == 0 || key_length > text.len() {
            return Err(Error::InvalidKeyLength {
                key_length,
                text_length: text.len(),
            });
        }
        let sum = cosets(text, key_length)
            .iter()
            .map(|c| ioc(c))
            .sum::<Result<f64>>()?;
        Ok(sum / key_length as f64)
    }

    /// One row of the key length report.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct IocEntry {
        pub key_length: usize,
        pub avg_ioc: f64,
        pub is_likely: bool,
    }

    impl Display for IocEntry {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "keylength: {:2} average ioc: {:.5} {}",
                self.key_length,
                self.avg_ioc,
                if self.is_likely { "*" } else { "" }
            )
        }
    }

    /// Average IoC for every key length in 1..=max_key_length. Lengths for which some coset would hold fewer than
    /// two letters are left out. This is a diagnostic only, picking the key length is up to the operator.
    pub fn ioc_report(text: &Text, max_key_length: usize) -> Result<Vec<IocEntry>> {
        if text.len() < 2 {
            return Err(Error::InsufficientData {
                needed: 2,
                got: text.len(),
            });
        }
        // the shortest coset of length L holds floor(n / L) letters
        let max_key_length = max_key_length.min(text.len() / 2);

        (1..=max_key_length)
            .map(|key_length| {
                let avg_ioc = average_ioc(text, key_length)?;
                trace!(key_length, avg_ioc, "average ioc");
                Ok(IocEntry {
                    key_length,
                    avg_ioc,
                    is_likely: avg_ioc > ENGLISH_IOC_THRESHOLD,
                })
            })
            .collect()
    }

    #[cfg(test)]
    use crate::encode::text::normalize;

    #[test]
    fn test_ioc_constant_text() {
        assert_eq!(ioc(normalize("zzzzzzzz").symbols()), Ok(1.0));
        assert_eq!(ioc(normalize("zz").symbols()), Ok(1.0));
        assert_eq!(
            ioc(normalize("z").symbols()),
            Err(Error::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_ioc_uniform_text() {
        let text: Text = (0..26 * 400).map(Symbol::wrapping).collect();
        let value = ioc(text.symbols()).unwrap();
        assert!((value - 1.0 / 26.0).abs() < 1e-3, "{value}");
    }

    #[test]
    fn test_coset_round_trip() {
        let text = normalize("the quick brown fox jumps over the lazy dog");
        for key_length in 1..=text.len() {
            let parts = cosets(&text, key_length);
            assert_eq!(parts.len(), key_length);
            assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), text.len());
            let floor = text.len() / key_length;
            assert!(parts.iter().all(|c| c.len() == floor || c.len() == floor + 1));
            assert_eq!(interleave(&parts), text);
        }
    }

    #[test]
    fn test_report_skips_short_cosets() {
        let text = normalize("abcdefghij");
        let report = ioc_report(&text, 24).unwrap();
        assert_eq!(report.len(), 5);
        assert_eq!(report[0].key_length, 1);
        assert!(report.iter().all(|e| !e.is_likely));
        assert!(ioc_report(&normalize("a"), 24).is_err());
        assert!(average_ioc(&text, 0).is_err());
    }
}

pub mod friedman {
    use super::coincidence::ioc;
    use crate::{encode::text::Text, error::Result};

    const KAPPA_DIFF: f64 = 0.027;
    const KAPPA_ENGLISH: f64 = 0.038;
    const KAPPA_OFFSET: f64 = 0.065;

    /// Friedman estimate of the key length: 0.027 n / ((n - 1) IoC - 0.038 n + 0.065).
    /// Only advisory, cross check it with the coset IoC report.
    pub fn estimate(ciphertext: &Text) -> Result<f64> {
        let n = ciphertext.len() as f64;
        let ioc = ioc(ciphertext.symbols())?;
        Ok((KAPPA_DIFF * n) / ((n - 1.0) * ioc - KAPPA_ENGLISH * n + KAPPA_OFFSET))
    }

    /// Floor and ceiling of an estimate as the two key lengths worth trying first.
    /// None if the estimate is not a positive finite number.
    pub fn bracket(estimate: f64) -> Option<(usize, usize)> {
        if estimate.is_finite() && estimate > 0.0 {
            Some((estimate.floor() as usize, estimate.ceil() as usize))
        } else {
            None
        }
    }

    #[test]
    fn test_bracket() {
        assert_eq!(bracket(4.53), Some((4, 5)));
        assert_eq!(bracket(3.0), Some((3, 3)));
        assert_eq!(bracket(-1.2), None);
        assert_eq!(bracket(f64::INFINITY), None);
    }
}

pub mod keyword {
    use std::fmt::Display;

    use tracing::debug;

    use super::{coincidence::cosets, frequency::FrequencyTable};
    use crate::{
        encode::{
            alphabet::{Symbol, ALPHABET_LENGTH},
            keyword::Keyword,
            text::Text,
        },
        error::{Error, Result},
    };

    /// Relative letter frequencies of english, A to Z.
    /// Mind the large weight on Z, recovered keywords depend on these exact values.
    pub const ENGLISH_FREQ: [f64; ALPHABET_LENGTH] = [
        0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.02, 0.061, 0.07, 0.002, 0.008, 0.04, 0.024,
        0.067, 0.075, 0.019, 0.001, 0.06, 0.063, 0.091, 0.028, 0.001, 0.024, 0.002, 0.02, 0.1,
    ];

    /// Score of a single Caesar shift for one keyword position.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ShiftCandidate {
        pub score: f64,
        pub shift: Symbol,
    }

    impl Display for ShiftCandidate {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:.5} => {}", self.score, self.shift)
        }
    }

    /// Dot product of the shifted coset frequencies with the english table.
    /// The sum starts at j = 1, the 'A' term never contributes.
    pub fn score(freq: &FrequencyTable, shift: Symbol) -> f64 {
        (1..ALPHABET_LENGTH)
            .map(|j| freq.as_array()[(j + shift.index()) % ALPHABET_LENGTH] * ENGLISH_FREQ[j])
            .sum()
    }

    /// All 26 shifts of one coset, ordered by ascending score. Among equal scores the lowest shift comes last,
    /// so read from the back it wins the tie just like the keyword letter does.
    pub fn rank_shifts(freq: &FrequencyTable) -> Vec<ShiftCandidate> {
        let mut candidates: Vec<ShiftCandidate> = Symbol::all()
            .map(|shift| ShiftCandidate {
                score: score(freq, shift),
                shift,
            })
            .collect();
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score).then(b.shift.cmp(&a.shift)));
        candidates
    }

    /// First shift in 0..26 with the strictly highest score.
    fn best_shift(freq: &FrequencyTable) -> Symbol {
        let mut best = (Symbol::A, f64::MIN);
        for shift in Symbol::all() {
            let value = score(freq, shift);
            if best.1 < value {
                best = (shift, value);
            }
        }
        best.0
    }

    /// The recovered keyword together with every candidate of every position.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Recovery {
        pub keyword: Keyword,
        /// One list per keyword position, ascending by score.
        pub candidates: Vec<Vec<ShiftCandidate>>,
    }

    impl Recovery {
        /// Candidates of one position, most likely first.
        pub fn ranked(&self, index: usize) -> Result<Vec<ShiftCandidate>> {
            self.candidates
                .get(index)
                .map(|c| c.iter().rev().copied().collect())
                .ok_or(Error::IndexOutOfRange {
                    index,
                    len: self.candidates.len(),
                })
        }
    }

    /// Recovers the keyword of a given length by frequency matching every coset against english.
    pub fn recover(ciphertext: &Text, key_length: usize) -> Result<Recovery> {
        if key_length == 0 || key_length > ciphertext.len() {
            return Err(Error::InvalidKeyLength {
                key_length,
                text_length: ciphertext.len(),
            });
        }

        let mut keyword = Vec::with_capacity(key_length);
        let mut candidates = Vec::with_capacity(key_length);

        for (i, coset) in cosets(ciphertext, key_length).iter().enumerate() {
            let freq = FrequencyTable::from_symbols(coset).map_err(|_| Error::InsufficientData {
                needed: 1,
                got: 0,
            })?;
            debug!(position = i, "coset frequencies:\n{freq}");

            let shift = best_shift(&freq);
            debug!(position = i, %shift, "most likely shift");

            keyword.push(shift);
            candidates.push(rank_shifts(&freq));
        }

        Ok(Recovery {
            keyword: Keyword::new(keyword)?,
            candidates,
        })
    }

    #[cfg(test)]
    use crate::{encode::text::normalize, encrypt::vigenere::VigenereEnc};

    #[test]
    fn test_ranked_best_is_keyword() {
        let plain = normalize(include_str!("../tests/data/harbor.txt"));
        let key: Keyword = "LEMON".parse().unwrap();
        let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();

        let recovery = recover(&cipher, 5).unwrap();
        assert_eq!(recovery.keyword, key);
        for (i, &k) in key.iter().enumerate() {
            let ranked = recovery.ranked(i).unwrap();
            assert_eq!(ranked.len(), ALPHABET_LENGTH);
            assert_eq!(ranked[0].shift, k);
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
        assert!(recovery.ranked(5).is_err());
    }

    #[test]
    fn test_score_skips_first_term() {
        // a coset made only of 'A' scores nothing at shift 0
        let freq = FrequencyTable::from_symbols(&[Symbol::A; 4]).unwrap();
        assert_eq!(score(&freq, Symbol::A), 0.0);
        assert_eq!(score(&freq, Symbol::wrapping(1)), ENGLISH_FREQ[25]);
    }

    #[test]
    fn test_ties_keep_first_shift() {
        // uniform frequencies give every shift the same score
        let text: Vec<Symbol> = Symbol::all().collect();
        let freq = FrequencyTable::from_symbols(&text).unwrap();
        assert_eq!(best_shift(&freq), Symbol::A);
        let ranked = rank_shifts(&freq);
        assert!(ranked.iter().all(|c| c.score == ranked[0].score));

        let recovery = recover(&normalize("abcdefghijklmnopqrstuvwxyz"), 1).unwrap();
        assert_eq!(recovery.keyword[0], Symbol::A);
        let ranked = recovery.ranked(0).unwrap();
        assert_eq!(ranked[0].shift, recovery.keyword[0]);
        assert!(ranked.windows(2).all(|w| w[0].shift < w[1].shift));
    }

    #[test]
    fn test_invalid_key_length() {
        let cipher = normalize("abcdef");
        assert_eq!(
            recover(&cipher, 0),
            Err(Error::InvalidKeyLength {
                key_length: 0,
                text_length: 6
            })
        );
        assert_eq!(
            recover(&cipher, 7),
            Err(Error::InvalidKeyLength {
                key_length: 7,
                text_length: 6
            })
        );
        assert!(recover(&cipher, 6).is_ok());
    }
}
