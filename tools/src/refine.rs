//! Operator driven correction of a recovered keyword.
//!
//! An [`AnalysisSession`] walks through the states below, one [`Input`] at a time:
//!
//! ```text
//! PresentKeyword --Continue--> AwaitConfirmation --Answer(true)--> Accepted
//!       ^                            |
//!       |                       Answer(false)
//!       |                            v
//! AwaitReplacementChar <--Index-- AwaitIndexSelection
//!       |
//!       +--Replacement--> PresentKeyword
//! ```
//!
//! No console I/O happens here, the caller prints whatever [`Output`] it gets back and reads the next input.

use std::fmt::Display;

use tracing::debug;

use crate::{
    analyze::keyword::{recover, Recovery, ShiftCandidate},
    encode::{alphabet::Symbol, keyword::Keyword, text::Text},
    encrypt::vigenere::VigenereEnc,
    error::{Error, Result},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    PresentKeyword,
    AwaitConfirmation,
    AwaitIndexSelection,
    AwaitReplacementChar { index: usize },
    Accepted,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::PresentKeyword => "presenting the keyword",
            State::AwaitConfirmation => "waiting for a confirmation",
            State::AwaitIndexSelection => "waiting for a keyword position",
            State::AwaitReplacementChar { .. } => "waiting for a replacement letter",
            State::Accepted => "accepted",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Operator decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Show the current keyword and its plaintext.
    Continue,
    /// Yes or no to "is this keyword correct?".
    Answer(bool),
    /// Keyword position to correct.
    Index(usize),
    /// New letter for the selected position.
    Replacement(Symbol),
}

/// What the caller should show after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    Preview { keyword: Keyword, plaintext: Text },
    /// The keyword was rejected, ask for a position.
    SelectIndex { keyword: Keyword },
    /// Candidates for the selected position, most likely first.
    Candidates {
        index: usize,
        ranked: Vec<ShiftCandidate>,
    },
    Replaced { keyword: Keyword },
    Accepted { keyword: Keyword, plaintext: Text },
}

/// Everything that belongs to the analysis of a single ciphertext.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    ciphertext: Text,
    recovery: Recovery,
    keyword: Keyword,
    state: State,
}

impl AnalysisSession {
    /// Recovers the keyword for the chosen key length and starts in PresentKeyword.
    pub fn new(ciphertext: Text, key_length: usize) -> Result<Self> {
        let recovery = recover(&ciphertext, key_length)?;
        Ok(Self::from_recovery(ciphertext, recovery))
    }

    pub fn from_recovery(ciphertext: Text, recovery: Recovery) -> Self {
        Self {
            ciphertext,
            keyword: recovery.keyword.clone(),
            recovery,
            state: State::PresentKeyword,
        }
    }

    /// Starts from a different keyword than the recovered one. Its length must match the recovery.
    pub fn with_keyword(mut self, keyword: Keyword) -> Result<Self> {
        if keyword.len() != self.recovery.candidates.len() {
            return Err(Error::KeywordLengthMismatch {
                expected: self.recovery.candidates.len(),
                got: keyword.len(),
            });
        }
        self.keyword = keyword;
        self.state = State::PresentKeyword;
        Ok(self)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    pub fn recovery(&self) -> &Recovery {
        &self.recovery
    }

    /// Plaintext under the current keyword.
    pub fn plaintext(&self) -> Result<Text> {
        VigenereEnc::decrypt(&self.ciphertext, &self.keyword)
    }

    /// Feeds one operator decision into the session. On error the state is left unchanged.
    pub fn advance(&mut self, input: Input) -> Result<Output> {
        let (next, output) = match (self.state, input) {
            (State::PresentKeyword, Input::Continue) => (
                State::AwaitConfirmation,
                Output::Preview {
                    keyword: self.keyword.clone(),
                    plaintext: self.plaintext()?,
                },
            ),
            (State::AwaitConfirmation, Input::Answer(true)) => (
                State::Accepted,
                Output::Accepted {
                    keyword: self.keyword.clone(),
                    plaintext: self.plaintext()?,
                },
            ),
            (State::AwaitConfirmation, Input::Answer(false)) => (
                State::AwaitIndexSelection,
                Output::SelectIndex {
                    keyword: self.keyword.clone(),
                },
            ),
            (State::AwaitIndexSelection, Input::Index(index)) => {
                if index >= self.keyword.len() {
                    return Err(Error::IndexOutOfRange {
                        index,
                        len: self.keyword.len(),
                    });
                }
                (
                    State::AwaitReplacementChar { index },
                    Output::Candidates {
                        index,
                        ranked: self.recovery.ranked(index)?,
                    },
                )
            }
            (State::AwaitReplacementChar { index }, Input::Replacement(symbol)) => {
                self.keyword.replace(index, symbol)?;
                debug!(index, %symbol, keyword = %self.keyword, "keyword position replaced");
                (
                    State::PresentKeyword,
                    Output::Replaced {
                        keyword: self.keyword.clone(),
                    },
                )
            }
            (state, _) => return Err(Error::UnexpectedInput { state: state.name() }),
        };
        self.state = next;
        Ok(output)
    }

    /// Final keyword and plaintext, once the operator accepted.
    pub fn finish(self) -> Option<(Keyword, Text)> {
        match self.state {
            State::Accepted => {
                let plaintext = self.plaintext().ok()?;
                Some((self.keyword, plaintext))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
use crate::encode::text::normalize;

#[cfg(test)]
fn lion_session() -> (Text, AnalysisSession) {
    let plain = normalize(include_str!("../tests/data/harbor.txt"));
    let key: Keyword = "LION".parse().unwrap();
    let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();
    (plain, AnalysisSession::new(cipher, 4).unwrap())
}

#[test]
fn test_accept_right_away() {
    let (plain, mut session) = lion_session();
    assert_eq!(session.state(), State::PresentKeyword);
    match session.advance(Input::Continue).unwrap() {
        Output::Preview { keyword, plaintext } => {
            assert_eq!(keyword.to_string(), "LION");
            assert_eq!(plaintext, plain);
        }
        other => panic!("unexpected output {other:?}"),
    }
    assert!(matches!(
        session.advance(Input::Answer(true)),
        Ok(Output::Accepted { .. })
    ));
    let (keyword, plaintext) = session.finish().unwrap();
    assert_eq!(keyword.to_string(), "LION");
    assert_eq!(plaintext, plain);
}

#[test]
fn test_correct_one_position() {
    let (plain, session) = lion_session();
    let mut session = session.with_keyword("LIOM".parse().unwrap()).unwrap();

    match session.advance(Input::Continue).unwrap() {
        Output::Preview { plaintext, .. } => assert_ne!(plaintext, plain),
        other => panic!("unexpected output {other:?}"),
    }
    session.advance(Input::Answer(false)).unwrap();
    assert_eq!(session.state(), State::AwaitIndexSelection);

    let replacement = match session.advance(Input::Index(3)).unwrap() {
        Output::Candidates { index, ranked } => {
            assert_eq!(index, 3);
            assert_eq!(ranked.len(), 26);
            ranked[0].shift
        }
        other => panic!("unexpected output {other:?}"),
    };
    assert_eq!(replacement.to_char(), 'N');

    session.advance(Input::Replacement(replacement)).unwrap();
    assert_eq!(session.state(), State::PresentKeyword);
    session.advance(Input::Continue).unwrap();
    session.advance(Input::Answer(true)).unwrap();

    let (keyword, plaintext) = session.finish().unwrap();
    assert_eq!(keyword.to_string(), "LION");
    assert_eq!(plaintext, plain);
}

#[test]
fn test_rejected_inputs_keep_state() {
    let (_, mut session) = lion_session();
    assert_eq!(
        session.advance(Input::Answer(true)),
        Err(Error::UnexpectedInput {
            state: "presenting the keyword"
        })
    );
    session.advance(Input::Continue).unwrap();
    session.advance(Input::Answer(false)).unwrap();
    assert_eq!(
        session.advance(Input::Index(4)),
        Err(Error::IndexOutOfRange { index: 4, len: 4 })
    );
    assert_eq!(session.state(), State::AwaitIndexSelection);

    // the same position may be corrected more than once
    for letter in ['X', 'N'] {
        session.advance(Input::Index(3)).unwrap();
        session
            .advance(Input::Replacement(Symbol::from_char(letter).unwrap()))
            .unwrap();
        session.advance(Input::Continue).unwrap();
        if letter == 'X' {
            session.advance(Input::Answer(false)).unwrap();
        }
    }
    assert_eq!(session.keyword().to_string(), "LION");
    session.advance(Input::Answer(true)).unwrap();
    assert!(session.advance(Input::Continue).is_err());
}

#[test]
fn test_finish_before_accept() {
    let (_, session) = lion_session();
    assert!(session.finish().is_none());
}

#[test]
fn test_with_keyword_length_mismatch() {
    let (_, session) = lion_session();
    assert_eq!(
        session.with_keyword("LIONS".parse().unwrap()).err(),
        Some(Error::KeywordLengthMismatch {
            expected: 4,
            got: 5
        })
    );
}
