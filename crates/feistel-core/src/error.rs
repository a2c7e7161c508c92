//! Error types shared by the cipher core and the chaining modes.

use std::fmt;

/// Errors produced by the Feistel cipher, its key schedule and the block codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeistelError {
    /// A block has more significant bits than the configured block width.
    BlockTooLarge {
        /// Bit length of the rejected block.
        bits: u32,
        /// Width the block had to fit in.
        width: u32,
    },
    /// A round key list does not hold the expected number of keys.
    RoundKeyCountMismatch {
        /// Number of rounds the cipher was configured for.
        expected: usize,
        /// Number of keys supplied.
        actual: usize,
    },
    /// Bytes recovered from an integer are not valid text.
    Decode(String),
    /// A width, round count or IV is outside its valid range.
    InvalidParameter(&'static str),
}

impl fmt::Display for FeistelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeistelError::BlockTooLarge { bits, width } => {
                write!(f, "Block of {} bits does not fit a {}-bit block", bits, width)
            }
            FeistelError::RoundKeyCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Expected {} round keys but {} were supplied",
                    expected, actual
                )
            }
            FeistelError::Decode(reason) => write!(f, "Cannot decode text: {}", reason),
            FeistelError::InvalidParameter(what) => write!(f, "Invalid parameter: {}", what),
        }
    }
}

impl std::error::Error for FeistelError {}
