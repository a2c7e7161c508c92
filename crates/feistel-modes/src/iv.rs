//! Initialization vector generation.

use feistel_core::bits::tail;
use feistel_core::{Block, BlockWidth, FeistelError};
use rand::{CryptoRng, RngCore};

/// Draws a random IV of exactly `width` bits.
///
/// The top bit is always set: the modes size their blocks from the IV's bit
/// length, so a short IV would silently shrink the block width.
pub fn generate_iv<R: RngCore + CryptoRng>(
    rng: &mut R,
    width: BlockWidth,
) -> Result<Block, FeistelError> {
    if width.bits() % 8 != 0 {
        return Err(FeistelError::InvalidParameter(
            "initialization vector width must be a multiple of 8 bits",
        ));
    }
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let top = 1u128 << (width.bits() - 1);
    Ok(tail(u128::from_be_bytes(bytes), width.bits()) | top)
}
