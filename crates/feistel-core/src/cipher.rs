//! Single-block Feistel encryption and decryption.

use crate::block::{join_halves, split_halves, Block, BlockWidth};
use crate::error::FeistelError;
use crate::key::{build_round_keys, RoundKeys, Secret};
use crate::round::{round_function, Negation};

/// A Feistel network of fixed width and round count.
///
/// Every round but the last swaps the halves after mixing; the last round
/// mixes without swapping. That asymmetry makes decryption the same network
/// run over the reversed key list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feistel {
    width: BlockWidth,
    rounds: usize,
    negation: Negation,
    trace: bool,
}

impl Feistel {
    /// Creates a network with logical negation and tracing disabled.
    pub fn new(width: BlockWidth, rounds: usize) -> Result<Self, FeistelError> {
        if rounds == 0 {
            return Err(FeistelError::InvalidParameter("rounds must be positive"));
        }
        Ok(Self {
            width,
            rounds,
            negation: Negation::default(),
            trace: false,
        })
    }

    /// Selects the round function negation.
    pub fn with_negation(mut self, negation: Negation) -> Self {
        self.negation = negation;
        self
    }

    /// Logs every round's halves at `debug` level when enabled.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Block width.
    pub fn width(&self) -> BlockWidth {
        self.width
    }

    /// Number of rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Round function negation.
    pub fn negation(&self) -> Negation {
        self.negation
    }

    /// Derives this network's round keys from `secret`.
    pub fn round_keys(&self, secret: Secret) -> Result<RoundKeys, FeistelError> {
        build_round_keys(secret, self.rounds, self.width)
    }

    /// Encrypts one block, consuming `keys` in order.
    pub fn encrypt_block(&self, block: Block, keys: &RoundKeys) -> Result<Block, FeistelError> {
        self.run(block, keys.as_slice().iter().copied())
    }

    /// Decrypts one block, consuming `keys` in reverse order.
    pub fn decrypt_block(&self, block: Block, keys: &RoundKeys) -> Result<Block, FeistelError> {
        self.run(block, keys.as_slice().iter().rev().copied())
    }

    fn run<I>(&self, block: Block, keys: I) -> Result<Block, FeistelError>
    where
        I: ExactSizeIterator<Item = u128>,
    {
        self.width.check(block)?;
        if keys.len() != self.rounds {
            return Err(FeistelError::RoundKeyCountMismatch {
                expected: self.rounds,
                actual: keys.len(),
            });
        }

        if self.trace {
            log::debug!("feistel block: {:#x}", block);
        }
        let (mut left, mut right) = split_halves(block, self.width);
        let last = self.rounds - 1;

        for (round, key) in keys.enumerate() {
            if self.trace {
                log::debug!("round {}: L = {:#x} R = {:#x}", round, left, right);
            }
            let mixed = round_function(left, key, self.width, self.negation);
            if round < last {
                (left, right) = (right ^ mixed, left);
            } else {
                right ^= mixed;
            }
        }

        let out = join_halves(left, right, self.width);
        if self.trace {
            log::debug!("feistel out: {:#x}", out);
        }
        Ok(out)
    }
}

/// Encrypts one block with a network sized to `keys`.
pub fn feistel_encrypt(
    block: Block,
    keys: &RoundKeys,
    width: BlockWidth,
) -> Result<Block, FeistelError> {
    Feistel::new(width, keys.len())?.encrypt_block(block, keys)
}

/// Decrypts one block, using `keys` in reverse order.
pub fn feistel_decrypt(
    block: Block,
    keys: &RoundKeys,
    width: BlockWidth,
) -> Result<Block, FeistelError> {
    Feistel::new(width, keys.len())?.decrypt_block(block, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::tail;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const SECRET: Secret = Secret(0xd73a_0198_6cb1_ddf7);
    const BLOCK: Block = 0xaa87_6392_feb3_1059;

    fn default_keys() -> RoundKeys {
        build_round_keys(SECRET, 8, BlockWidth::DEFAULT).unwrap()
    }

    #[test]
    fn encrypt_matches_known_vector() {
        let keys = default_keys();
        let ct = feistel_encrypt(BLOCK, &keys, BlockWidth::DEFAULT).unwrap();
        assert_eq!(ct, 0x56be_08cb_9e61_e1e6);
    }

    #[test]
    fn bitwise_negation_matches_known_vector() {
        let keys = default_keys();
        let cipher = Feistel::new(BlockWidth::DEFAULT, 8)
            .unwrap()
            .with_negation(Negation::Bitwise);
        let ct = cipher.encrypt_block(BLOCK, &keys).unwrap();
        assert_eq!(ct, 0x06ac_4d1a_7e0d_a5f5);
        assert_eq!(cipher.decrypt_block(ct, &keys).unwrap(), BLOCK);
    }

    #[test]
    fn decrypt_recovers_known_block() {
        let keys = default_keys();
        let ct = feistel_encrypt(BLOCK, &keys, BlockWidth::DEFAULT).unwrap();
        assert_eq!(feistel_decrypt(ct, &keys, BlockWidth::DEFAULT).unwrap(), BLOCK);
    }

    #[test]
    fn decrypt_is_encrypt_with_reversed_keys() {
        let keys = default_keys();
        let ct = feistel_encrypt(BLOCK, &keys, BlockWidth::DEFAULT).unwrap();
        let pt = feistel_encrypt(ct, &keys.reversed(), BlockWidth::DEFAULT).unwrap();
        assert_eq!(pt, BLOCK);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        for _ in 0..200 {
            let width = BlockWidth::new(rng.gen_range(1..=128)).unwrap();
            let rounds = rng.gen_range(1..=16);
            let negation = if rng.gen() {
                Negation::Logical
            } else {
                Negation::Bitwise
            };
            let cipher = Feistel::new(width, rounds).unwrap().with_negation(negation);
            let keys = cipher.round_keys(Secret(rng.gen())).unwrap();
            let block = tail(rng.gen(), width.bits());
            let ct = cipher.encrypt_block(block, &keys).unwrap();
            assert_eq!(cipher.decrypt_block(ct, &keys).unwrap(), block);
        }
    }

    #[test]
    fn single_round_network_is_self_inverse() {
        let keys = build_round_keys(SECRET, 1, BlockWidth::DEFAULT).unwrap();
        let ct = feistel_encrypt(BLOCK, &keys, BlockWidth::DEFAULT).unwrap();
        assert_eq!(feistel_encrypt(ct, &keys, BlockWidth::DEFAULT).unwrap(), BLOCK);
    }

    #[test]
    fn block_at_width_is_accepted_and_one_bit_more_rejected() {
        let keys = default_keys();
        let full = (1u128 << 64) - 1;
        assert!(feistel_encrypt(full, &keys, BlockWidth::DEFAULT).is_ok());
        assert_eq!(
            feistel_encrypt(1u128 << 64, &keys, BlockWidth::DEFAULT),
            Err(FeistelError::BlockTooLarge { bits: 65, width: 64 })
        );
    }

    #[test]
    fn key_count_mismatch_fails_before_any_round() {
        let cipher = Feistel::new(BlockWidth::DEFAULT, 8).unwrap();
        let keys = build_round_keys(SECRET, 7, BlockWidth::DEFAULT).unwrap();
        assert_eq!(
            cipher.encrypt_block(BLOCK, &keys),
            Err(FeistelError::RoundKeyCountMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn empty_key_list_is_invalid() {
        let keys = RoundKeys::from_keys(Vec::new());
        assert_eq!(
            feistel_encrypt(BLOCK, &keys, BlockWidth::DEFAULT),
            Err(FeistelError::InvalidParameter("rounds must be positive"))
        );
    }

    #[test]
    fn tracing_does_not_change_output() {
        let keys = default_keys();
        let plain = Feistel::new(BlockWidth::DEFAULT, 8).unwrap();
        let traced = plain.with_trace(true);
        assert_eq!(
            plain.encrypt_block(BLOCK, &keys),
            traced.encrypt_block(BLOCK, &keys)
        );
    }
}
