//! Message/block conversion and the text encoding.
//!
//! A [`Message`] is a non-negative integer of arbitrary size, stored as
//! big-endian bytes. Leading zero bytes are kept so a ciphertext never loses a
//! block whose high bytes happen to be zero, but they carry no value: two
//! messages compare equal when their integers are equal.

use std::fmt;

use num_bigint::BigUint;

use crate::bits::bit_length;
use crate::block::{Block, BlockWidth};
use crate::error::FeistelError;

/// Arbitrary-length integer message with its byte length tracked.
#[derive(Clone, Default)]
pub struct Message {
    bytes: Vec<u8>,
}

impl Message {
    /// Wraps big-endian bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Encodes an integer with no leading zero bytes.
    pub fn from_biguint(value: &BigUint) -> Self {
        if value.bits() == 0 {
            return Self::default();
        }
        Self::from_bytes(value.to_bytes_be())
    }

    /// Integer value of the message.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// Big-endian bytes, leading zero bytes included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the message, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of significant bits.
    pub fn bit_length(&self) -> u64 {
        match self.significant().split_first() {
            Some((first, rest)) => {
                rest.len() as u64 * 8 + u64::from(bit_length(u128::from(*first)))
            }
            None => 0,
        }
    }

    /// Whether the integer value is zero.
    pub fn is_zero(&self) -> bool {
        self.significant().is_empty()
    }

    fn significant(&self) -> &[u8] {
        let start = self
            .bytes
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(self.bytes.len());
        &self.bytes[start..]
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Message {}

impl From<BigUint> for Message {
    fn from(value: BigUint) -> Self {
        Self::from_biguint(&value)
    }
}

impl From<u128> for Message {
    fn from(value: u128) -> Self {
        Self::from_biguint(&BigUint::from(value))
    }
}

impl fmt::LowerHex for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_biguint(), f)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:#x})", self)
    }
}

fn require_byte_width(width: BlockWidth) -> Result<usize, FeistelError> {
    if width.bits() % 8 != 0 {
        return Err(FeistelError::InvalidParameter(
            "block width must be a multiple of 8 bits",
        ));
    }
    Ok(width.bytes())
}

/// Splits a message into blocks of at most `width` bits, most significant
/// first. Blocks are cut from the low end, so only the first block can be
/// shorter than `width`.
pub fn split_into_blocks(message: &Message, width: BlockWidth) -> Result<Vec<Block>, FeistelError> {
    let size = require_byte_width(width)?;
    let bytes = message.as_bytes();
    let (lead, rest) = bytes.split_at(bytes.len() % size);

    let mut blocks = Vec::with_capacity(bytes.len() / size + 1);
    if !lead.is_empty() {
        blocks.push(block_from_bytes(lead));
    }
    blocks.extend(rest.chunks_exact(size).map(block_from_bytes));
    Ok(blocks)
}

/// Concatenates blocks into one message, each block taking exactly `width`
/// bits.
pub fn join_blocks(blocks: &[Block], width: BlockWidth) -> Result<Message, FeistelError> {
    let size = require_byte_width(width)?;
    let mut bytes = Vec::with_capacity(blocks.len() * size);
    for &block in blocks {
        let bits = bit_length(block);
        if bits > width.bits() {
            return Err(FeistelError::BlockTooLarge {
                bits,
                width: width.bits(),
            });
        }
        bytes.extend_from_slice(&block.to_be_bytes()[16 - size..]);
    }
    Ok(Message::from_bytes(bytes))
}

fn block_from_bytes(bytes: &[u8]) -> Block {
    bytes
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b))
}

/// Encodes text as the integer formed by its UTF-8 bytes, first character most
/// significant.
pub fn text_to_integer(text: &str) -> Message {
    Message::from_bytes(text.as_bytes())
}

/// Decodes the integer produced by [`text_to_integer`].
///
/// Leading zero bytes are not part of the integer and are dropped, so text
/// starting with NUL characters does not survive the round trip.
pub fn integer_to_text(message: &Message) -> Result<String, FeistelError> {
    String::from_utf8(message.significant().to_vec())
        .map_err(|err| FeistelError::Decode(err.to_string()))
}
