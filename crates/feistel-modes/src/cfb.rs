//! Cipher-feedback mode.

use std::borrow::Cow;

use feistel_core::{Block, FeistelError, Message, RoundKeys, Secret};

use crate::chain::{ChainRun, Direction};
use crate::config::{CfbKeystream, ModeConfig};

/// Encrypts `message` in CFB mode: `c_i = E(c_{i-1}) ^ p_i`, with `c_{-1} = iv`.
///
/// The block width is the IV's bit length rounded up to whole bytes.
pub fn cfb_encrypt(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
) -> Result<Message, FeistelError> {
    cfb(message, secret, iv, config, Direction::Encrypt)
}

/// Decrypts a CFB ciphertext: `p_i = E(c_{i-1}) ^ c_i`.
///
/// With [`CfbKeystream::ReversedOnDecrypt`] the keystream is generated from
/// the reversed key list instead.
pub fn cfb_decrypt(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
) -> Result<Message, FeistelError> {
    cfb(message, secret, iv, config, Direction::Decrypt)
}

fn cfb(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
    direction: Direction,
) -> Result<Message, FeistelError> {
    let run = ChainRun::prepare(message, secret, iv, config)?;
    let keys: Cow<'_, RoundKeys> = match (config.cfb_keystream, direction) {
        (CfbKeystream::ReversedOnDecrypt, Direction::Decrypt) => Cow::Owned(run.keys.reversed()),
        _ => Cow::Borrowed(&run.keys),
    };
    let mut chain = iv;
    let mut out = Vec::with_capacity(run.blocks.len());

    for (i, &block) in run.blocks.iter().enumerate() {
        run.trace_block(i, block, chain);
        let processed = run.feistel.encrypt_block(chain, &keys)? ^ block;
        chain = match direction {
            Direction::Encrypt => processed,
            Direction::Decrypt => block,
        };
        out.push(processed);
    }

    run.finish(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feistel_core::{integer_to_text, text_to_integer, Negation};

    const SECRET: Secret = Secret(0xd73a_0198_6cb1_ddf7);
    const IV: Block = 0x8bad_f00d_dead_beef;

    #[test]
    fn encrypt_matches_known_vector() {
        let m = text_to_integer("Hello World!");
        let ct = cfb_encrypt(&m, SECRET, IV, &ModeConfig::default()).unwrap();
        assert_eq!(format!("{:x}", ct), "4a57037b38d3a53931ac149188f36cf8");
    }

    #[test]
    fn forward_keystream_round_trips_with_either_negation() {
        let m = text_to_integer("Hello World!");
        for negation in [Negation::Logical, Negation::Bitwise] {
            let config = ModeConfig::default().with_negation(negation);
            let ct = cfb_encrypt(&m, SECRET, IV, &config).unwrap();
            let pt = cfb_decrypt(&ct, SECRET, IV, &config).unwrap();
            assert_eq!(integer_to_text(&pt).unwrap(), "Hello World!");
        }
    }

    #[test]
    fn reversed_keystream_round_trips_with_logical_negation() {
        let config = ModeConfig::default().with_cfb_keystream(CfbKeystream::ReversedOnDecrypt);
        let m = text_to_integer("Hello World!");
        let ct = cfb_encrypt(&m, SECRET, IV, &config).unwrap();
        assert_eq!(format!("{:x}", ct), "4a57037b38d3a53931ac149188f36cf8");
        let pt = cfb_decrypt(&ct, SECRET, IV, &config).unwrap();
        assert_eq!(pt, m);
    }

    #[test]
    fn reversed_keystream_breaks_with_bitwise_negation() {
        let config = ModeConfig::default()
            .with_negation(Negation::Bitwise)
            .with_cfb_keystream(CfbKeystream::ReversedOnDecrypt);
        let m = text_to_integer("Hello World!");
        let ct = cfb_encrypt(&m, SECRET, IV, &config).unwrap();
        assert_eq!(format!("{:x}", ct), "1840a812b392f50343ddc2b9823f03c");
        let pt = cfb_decrypt(&ct, SECRET, IV, &config).unwrap();
        assert_eq!(format!("{:x}", pt), "db105968a1da9fcbec29c79768e06acf");
        assert_ne!(pt, m);
    }

    #[test]
    fn ciphertext_differs_from_cbc() {
        let m = text_to_integer("Hello World!");
        let config = ModeConfig::default();
        let cfb_ct = cfb_encrypt(&m, SECRET, IV, &config).unwrap();
        let cbc_ct = crate::cbc::cbc_encrypt(&m, SECRET, IV, &config).unwrap();
        assert_ne!(cfb_ct, cbc_ct);
    }
}
