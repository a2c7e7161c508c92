//! Cipher-block-chaining mode.

use feistel_core::{Block, FeistelError, Message, Secret};

use crate::chain::{ChainRun, Direction};
use crate::config::ModeConfig;

/// Encrypts `message` in CBC mode: `c_i = E(p_i ^ c_{i-1})`, with `c_{-1} = iv`.
///
/// The block width is the IV's bit length rounded up to whole bytes. Never
/// reuse an IV across messages under the same secret.
pub fn cbc_encrypt(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
) -> Result<Message, FeistelError> {
    cbc(message, secret, iv, config, Direction::Encrypt)
}

/// Decrypts a CBC ciphertext: `p_i = D(c_i) ^ c_{i-1}`.
pub fn cbc_decrypt(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
) -> Result<Message, FeistelError> {
    cbc(message, secret, iv, config, Direction::Decrypt)
}

fn cbc(
    message: &Message,
    secret: Secret,
    iv: Block,
    config: &ModeConfig,
    direction: Direction,
) -> Result<Message, FeistelError> {
    let run = ChainRun::prepare(message, secret, iv, config)?;
    let mut chain = iv;
    let mut out = Vec::with_capacity(run.blocks.len());

    for (i, &block) in run.blocks.iter().enumerate() {
        run.trace_block(i, block, chain);
        let processed = match direction {
            Direction::Encrypt => run.feistel.encrypt_block(block ^ chain, &run.keys)?,
            Direction::Decrypt => run.feistel.decrypt_block(block, &run.keys)? ^ chain,
        };
        chain = match direction {
            Direction::Encrypt => processed,
            Direction::Decrypt => block,
        };
        out.push(processed);
    }

    run.finish(&out)
}
