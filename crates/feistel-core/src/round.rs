//! Feistel round function.

use serde::{Deserialize, Serialize};

use crate::bits::{rotate_left, rotate_right, tail};
use crate::block::BlockWidth;

/// How the round function negates the key/sub-block sum before mixing it in.
///
/// Both variants keep the network reversible but produce different
/// ciphertexts, so a ciphertext must be decrypted with the variant that
/// produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Negation {
    /// Boolean negation: `1` when the sum is zero, `0` otherwise.
    #[default]
    Logical,
    /// Bitwise complement of the sum within the half-block width.
    Bitwise,
}

impl Negation {
    #[inline]
    fn apply(self, value: u128) -> u128 {
        match self {
            Negation::Logical => u128::from(value == 0),
            Negation::Bitwise => !value,
        }
    }
}

/// Mixes one half-block with a round key.
///
/// `rotl(sub_block, 9) ^ neg(rotr(key, 11) + sub_block)`, with the rotations
/// taken over the half width and the key width of `width`. The result always
/// fits in a half block.
#[inline]
pub fn round_function(sub_block: u128, key: u128, width: BlockWidth, negation: Negation) -> u128 {
    let half = width.half_bits();
    let sub_block = tail(sub_block, half);
    let rotated = rotate_left(sub_block, 9, half);
    let sum = rotate_right(key, 11, width.key_bits()) + sub_block;
    tail(rotated ^ negation.apply(sum), half)
}
