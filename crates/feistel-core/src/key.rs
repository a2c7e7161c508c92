//! Secret and round key schedule.

use crate::bits::{mask, rotate_right};
use crate::block::BlockWidth;
use crate::error::FeistelError;

/// Symmetric secret, nominally 64 bits wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secret(pub u128);

impl From<u64> for Secret {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl From<u128> for Secret {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// Ordered per-round subkeys. Encryption consumes them front to back,
/// decryption back to front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundKeys(Vec<u128>);

impl RoundKeys {
    /// Wraps a caller-supplied key list.
    pub fn from_keys(keys: Vec<u128>) -> Self {
        Self(keys)
    }

    /// Returns the round key at the requested index.
    #[inline]
    pub fn get(&self, round: usize) -> Option<u128> {
        self.0.get(round).copied()
    }

    /// Number of keys, one per round.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in encryption order.
    pub fn as_slice(&self) -> &[u128] {
        &self.0
    }

    /// Iterates keys in encryption order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, u128>> {
        self.0.iter().copied()
    }

    /// Same keys in decryption order.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Writes every key to the `debug` log.
    pub fn trace(&self) {
        for (round, key) in self.0.iter().enumerate() {
            log::debug!("key[{}] = {:#x}", round, key);
        }
    }
}

/// Derives the key for `round_index`: the secret rotated right by
/// `3 * round_index` bits within the block, masked to the key width.
pub fn derive_round_key(secret: Secret, round_index: usize, width: BlockWidth) -> u128 {
    let amount = (round_index as u64).wrapping_mul(3) % u64::from(width.bits());
    rotate_right(secret.0, amount as u32, width.bits()) & mask(width.key_bits())
}

/// Builds the `rounds` keys for one cipher invocation.
pub fn build_round_keys(
    secret: Secret,
    rounds: usize,
    width: BlockWidth,
) -> Result<RoundKeys, FeistelError> {
    if rounds == 0 {
        return Err(FeistelError::InvalidParameter("rounds must be positive"));
    }
    Ok(RoundKeys(
        (0..rounds)
            .map(|round| derive_round_key(secret, round, width))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bit_length;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const SECRET: Secret = Secret(0xd73a_0198_6cb1_ddf7);

    #[test]
    fn first_key_is_low_half_of_secret() {
        let keys = build_round_keys(SECRET, 8, BlockWidth::DEFAULT).unwrap();
        assert_eq!(keys.get(0), Some(0x6cb1_ddf7));
    }

    #[test]
    fn schedule_matches_known_values() {
        let keys = build_round_keys(SECRET, 8, BlockWidth::DEFAULT).unwrap();
        assert_eq!(
            keys.as_slice(),
            &[
                0x6cb1_ddf7,
                0x0d96_3bbe,
                0x61b2_c777,
                0xcc36_58ee,
                0x1986_cb1d,
                0x0330_d963,
                0x8066_1b2c,
                0xd00c_c365,
            ]
        );
    }

    #[test]
    fn key_count_matches_rounds() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for rounds in 1..=32 {
            let width = BlockWidth::new(rng.gen_range(1..=128)).unwrap();
            let keys = build_round_keys(Secret(rng.gen()), rounds, width).unwrap();
            assert_eq!(keys.len(), rounds);
        }
    }

    #[test]
    fn keys_fit_key_width() {
        let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
        for bits in 1..=128 {
            let width = BlockWidth::new(bits).unwrap();
            let keys = build_round_keys(Secret(rng.gen()), 16, width).unwrap();
            assert!(keys.iter().all(|k| bit_length(k) <= width.key_bits()));
        }
    }

    #[test]
    fn zero_rounds_rejected() {
        assert_eq!(
            build_round_keys(SECRET, 0, BlockWidth::DEFAULT),
            Err(FeistelError::InvalidParameter("rounds must be positive"))
        );
    }

    #[test]
    fn reversed_flips_order() {
        let keys = RoundKeys::from_keys(vec![1, 2, 3]);
        assert_eq!(keys.reversed().as_slice(), &[3, 2, 1]);
        assert_eq!(keys.reversed().reversed(), keys);
    }
}
