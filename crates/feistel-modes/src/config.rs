//! Per-run configuration for the chaining modes.

use feistel_core::Negation;
use serde::{Deserialize, Serialize};

/// Round keys fed to the Feistel network when decrypting in CFB mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CfbKeystream {
    /// Forward keys in both directions (standard CFB).
    #[default]
    Forward,
    /// Reversed keys when decrypting. Produces the same keystream as
    /// encryption only while the round function ignores its key, which holds
    /// for [`Negation::Logical`] with non-zero round keys.
    ReversedOnDecrypt,
}

/// Configuration recognized by every mode call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeConfig {
    /// Number of Feistel rounds.
    pub rounds: usize,
    /// Log a human-readable trace of keys, blocks and rounds at `debug` level.
    /// Never affects the result.
    pub debug: bool,
    /// Round function negation.
    pub negation: Negation,
    /// CFB keystream direction.
    pub cfb_keystream: CfbKeystream,
}

impl ModeConfig {
    /// Rounds used when none are configured.
    pub const DEFAULT_ROUNDS: usize = 8;

    /// Sets the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Enables or disables the trace.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Selects the round function negation.
    pub fn with_negation(mut self, negation: Negation) -> Self {
        self.negation = negation;
        self
    }

    /// Selects the CFB keystream direction.
    pub fn with_cfb_keystream(mut self, cfb_keystream: CfbKeystream) -> Self {
        self.cfb_keystream = cfb_keystream;
        self
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            debug: false,
            negation: Negation::default(),
            cfb_keystream: CfbKeystream::default(),
        }
    }
}
