//! Block representation helpers.

use crate::bits::{bit_length, ceil_to_multiple, tail, MAX_WIDTH};
use crate::error::FeistelError;

/// Cipher block; only the low [`BlockWidth::bits`] bits are significant.
pub type Block = u128;

/// Number of bits in one cipher block, in `1..=128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockWidth(u32);

impl BlockWidth {
    /// The customary 64-bit block.
    pub const DEFAULT: BlockWidth = BlockWidth(64);

    /// Validates a block width.
    pub fn new(bits: u32) -> Result<Self, FeistelError> {
        if bits == 0 {
            return Err(FeistelError::InvalidParameter("block width must be positive"));
        }
        if bits > MAX_WIDTH {
            return Err(FeistelError::InvalidParameter(
                "block width must not exceed 128 bits",
            ));
        }
        Ok(Self(bits))
    }

    /// Width implied by an initialization vector: its bit length rounded up to
    /// a whole number of bytes.
    pub fn for_iv(iv: Block) -> Result<Self, FeistelError> {
        if iv == 0 {
            return Err(FeistelError::InvalidParameter(
                "initialization vector must be non-zero",
            ));
        }
        Self::new(ceil_to_multiple(bit_length(iv), 8))
    }

    /// Configured width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Width of each Feistel half; odd widths round the boundary up.
    #[inline]
    pub const fn half_bits(self) -> u32 {
        ceil_to_multiple(self.0, 2) / 2
    }

    /// Width every round key is masked to.
    #[inline]
    pub const fn key_bits(self) -> u32 {
        ceil_to_multiple(self.0 / 2, 2)
    }

    /// Width actually covered by the two halves.
    #[inline]
    pub const fn padded_bits(self) -> u32 {
        self.half_bits() * 2
    }

    /// Number of bytes needed to hold one block.
    #[inline]
    pub const fn bytes(self) -> usize {
        (ceil_to_multiple(self.0, 8) / 8) as usize
    }

    /// Rejects blocks that do not fit in the padded width.
    pub fn check(self, block: Block) -> Result<(), FeistelError> {
        let bits = bit_length(block);
        if bits > self.padded_bits() {
            return Err(FeistelError::BlockTooLarge {
                bits,
                width: self.padded_bits(),
            });
        }
        Ok(())
    }
}

impl Default for BlockWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Splits a block into its `(left, right)` halves.
#[inline]
pub fn split_halves(block: Block, width: BlockWidth) -> (u128, u128) {
    let half = width.half_bits();
    (tail(block >> half, half), tail(block, half))
}

/// Joins two halves, `left` in the high half and `right` in the low half.
#[inline]
pub fn join_halves(left: u128, right: u128, width: BlockWidth) -> Block {
    let half = width.half_bits();
    (tail(left, half) << half) | tail(right, half)
}
