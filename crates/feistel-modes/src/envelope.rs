//! Self-describing ciphertext container and its serialization.

use feistel_core::{Block, FeistelError, Message, Negation, Secret};
use serde::{Deserialize, Serialize};

use crate::config::{CfbKeystream, ModeConfig};
use crate::mode::Mode;

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

/// A ciphertext together with every public parameter needed to decrypt it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Format version.
    pub version: u32,
    /// Chaining mode.
    pub mode: Mode,
    /// Feistel rounds.
    pub rounds: usize,
    /// Round function negation.
    pub negation: Negation,
    /// CFB keystream direction.
    pub cfb_keystream: CfbKeystream,
    /// Initialization vector; also fixes the block width.
    pub iv: Block,
    /// Length in bytes of the sealed plaintext, leading zero bytes included.
    pub plaintext_len: u64,
    /// Ciphertext bytes, whole blocks.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypts `message` and records the parameters used.
    pub fn seal(
        mode: Mode,
        message: &Message,
        secret: Secret,
        iv: Block,
        config: &ModeConfig,
    ) -> Result<Self, FeistelError> {
        let ciphertext = mode.encrypt(message, secret, iv, config)?;
        Ok(Self {
            version: ENVELOPE_VERSION,
            mode,
            rounds: config.rounds,
            negation: config.negation,
            cfb_keystream: config.cfb_keystream,
            iv,
            plaintext_len: message.as_bytes().len() as u64,
            ciphertext: ciphertext.into_bytes(),
        })
    }

    /// Mode configuration recorded in the envelope.
    pub fn config(&self, debug: bool) -> ModeConfig {
        ModeConfig {
            rounds: self.rounds,
            debug,
            negation: self.negation,
            cfb_keystream: self.cfb_keystream,
        }
    }

    /// Decrypts the ciphertext with `secret`, restoring the plaintext's
    /// original byte length.
    pub fn open(&self, secret: Secret, debug: bool) -> Result<Message, FeistelError> {
        if self.version != ENVELOPE_VERSION {
            return Err(FeistelError::InvalidParameter("unsupported envelope version"));
        }
        let ciphertext = Message::from_bytes(self.ciphertext.as_slice());
        let plaintext = self
            .mode
            .decrypt(&ciphertext, secret, self.iv, &self.config(debug))?;
        let bytes = plaintext.as_bytes();
        let len = usize::try_from(self.plaintext_len)
            .ok()
            .filter(|&len| len <= bytes.len())
            .ok_or(FeistelError::InvalidParameter(
                "plaintext length exceeds the ciphertext",
            ))?;
        Ok(Message::from_bytes(&bytes[bytes.len() - len..]))
    }

    /// Serializes the envelope with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes an envelope with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feistel_core::{integer_to_text, text_to_integer};

    const SECRET: Secret = Secret(0xd73a_0198_6cb1_ddf7);
    const IV: Block = 0x8bad_f00d_dead_beef;

    #[test]
    fn serialize_roundtrip() {
        let message = text_to_integer("Hello World!");
        let envelope =
            Envelope::seal(Mode::Cfb, &message, SECRET, IV, &ModeConfig::default()).unwrap();
        let bytes = envelope.to_bytes().expect("serialize");
        let decoded = Envelope::from_bytes(&bytes).expect("deserialize");
        assert_eq!(decoded, envelope);
        assert_eq!(decoded.rounds, 8);
        assert_eq!(decoded.ciphertext.len(), 16);
    }

    #[test]
    fn open_recovers_message() {
        let config = ModeConfig::default()
            .with_rounds(12)
            .with_negation(Negation::Bitwise);
        let message = text_to_integer("The quick brown fox jumps over a lazy dog.");
        let envelope = Envelope::seal(Mode::Cbc, &message, SECRET, IV, &config).unwrap();
        let opened = envelope.open(SECRET, false).unwrap();
        assert_eq!(
            integer_to_text(&opened).unwrap(),
            "The quick brown fox jumps over a lazy dog."
        );
    }

    #[test]
    fn open_restores_leading_zero_bytes() {
        let message = Message::from_bytes(vec![0, 0, 7, 1, 2, 3]);
        for mode in [Mode::Cbc, Mode::Cfb] {
            let envelope =
                Envelope::seal(mode, &message, SECRET, IV, &ModeConfig::default()).unwrap();
            assert_eq!(envelope.plaintext_len, 6);
            let opened = envelope.open(SECRET, false).unwrap();
            assert_eq!(opened.as_bytes(), &[0, 0, 7, 1, 2, 3]);
        }
    }

    #[test]
    fn oversized_plaintext_length_is_rejected() {
        let message = text_to_integer("Hello");
        let mut envelope =
            Envelope::seal(Mode::Cbc, &message, SECRET, IV, &ModeConfig::default()).unwrap();
        envelope.plaintext_len = 1_000;
        assert!(envelope.open(SECRET, false).is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let message = text_to_integer("Hello");
        let mut envelope =
            Envelope::seal(Mode::Cbc, &message, SECRET, IV, &ModeConfig::default()).unwrap();
        envelope.version = 99;
        assert!(envelope.open(SECRET, false).is_err());
    }

    #[test]
    fn truncated_bytes_fail_to_decode() {
        let message = text_to_integer("Hello");
        let envelope =
            Envelope::seal(Mode::Cbc, &message, SECRET, IV, &ModeConfig::default()).unwrap();
        let bytes = envelope.to_bytes().unwrap();
        assert!(Envelope::from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
