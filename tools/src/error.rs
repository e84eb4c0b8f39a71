use thiserror::Error;

/// Errors raised by the cipher and the analysis routines. All of them are recoverable:
/// the caller is expected to ask the operator again instead of giving up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The keyword contains no letters.
    #[error("keyword must contain at least one letter")]
    InvalidKeyword,

    /// A frequency distribution was requested for an empty text.
    #[error("text contains no letters")]
    EmptyInput,

    /// Not enough symbols to compute a statistic.
    #[error("need at least {needed} letters, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Key length is zero or longer than the ciphertext.
    #[error("key length {key_length} is invalid for a ciphertext of {text_length} letters")]
    InvalidKeyLength {
        key_length: usize,
        text_length: usize,
    },

    /// Keyword does not match the key length of the recovery.
    #[error("keyword has {got} letters, the recovered key length is {expected}")]
    KeywordLengthMismatch { expected: usize, got: usize },

    /// Keyword position outside of the keyword.
    #[error("index {index} is out of range for a keyword of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Character that is not one of the 26 latin letters.
    #[error("'{0}' is not a letter between A and Z")]
    InvalidSymbol(char),

    /// Refinement input that the current state does not accept.
    #[error("input not accepted while {state}")]
    UnexpectedInput { state: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
