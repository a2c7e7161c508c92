//! Mode selection.

use feistel_core::{Block, FeistelError, Message, Secret};
use serde::{Deserialize, Serialize};

use crate::cbc::{cbc_decrypt, cbc_encrypt};
use crate::cfb::{cfb_decrypt, cfb_encrypt};
use crate::config::ModeConfig;

/// Block chaining mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Cipher-block-chaining.
    Cbc,
    /// Cipher-feedback.
    Cfb,
}

impl Mode {
    /// Encrypts `message` under this mode.
    pub fn encrypt(
        self,
        message: &Message,
        secret: Secret,
        iv: Block,
        config: &ModeConfig,
    ) -> Result<Message, FeistelError> {
        match self {
            Mode::Cbc => cbc_encrypt(message, secret, iv, config),
            Mode::Cfb => cfb_encrypt(message, secret, iv, config),
        }
    }

    /// Decrypts `message` under this mode.
    pub fn decrypt(
        self,
        message: &Message,
        secret: Secret,
        iv: Block,
        config: &ModeConfig,
    ) -> Result<Message, FeistelError> {
        match self {
            Mode::Cbc => cbc_decrypt(message, secret, iv, config),
            Mode::Cfb => cfb_decrypt(message, secret, iv, config),
        }
    }
}
