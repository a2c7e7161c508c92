//! Setup shared by the chaining modes.

use feistel_core::{
    join_blocks, split_into_blocks, Block, BlockWidth, Feistel, FeistelError, Message, RoundKeys,
    Secret,
};

use crate::config::ModeConfig;

/// Direction of one mode run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}

/// Network, keys and blocks for one message. Dropped when the run ends.
pub(crate) struct ChainRun {
    pub feistel: Feistel,
    pub keys: RoundKeys,
    pub blocks: Vec<Block>,
    debug: bool,
}

impl ChainRun {
    /// Sizes the network from the IV, derives the keys once and splits the
    /// message.
    pub fn prepare(
        message: &Message,
        secret: Secret,
        iv: Block,
        config: &ModeConfig,
    ) -> Result<Self, FeistelError> {
        let width = BlockWidth::for_iv(iv)?;
        let feistel = Feistel::new(width, config.rounds)?
            .with_negation(config.negation)
            .with_trace(config.debug);
        let keys = feistel.round_keys(secret)?;
        let blocks = split_into_blocks(message, width)?;
        if config.debug {
            log::debug!("iv = {:#x} ({} bit blocks)", iv, width.bits());
            keys.trace();
        }
        Ok(Self {
            feistel,
            keys,
            blocks,
            debug: config.debug,
        })
    }

    pub fn trace_block(&self, index: usize, block: Block, chain: Block) {
        if self.debug {
            log::debug!("block[{}] = {:#x} chain = {:#x}", index, block, chain);
        }
    }

    /// Joins the processed blocks into the output message.
    pub fn finish(&self, out: &[Block]) -> Result<Message, FeistelError> {
        if self.debug {
            let hex: Vec<String> = out.iter().map(|b| format!("{:#x}", b)).collect();
            log::debug!("blocks to join: {:?}", hex);
        }
        join_blocks(out, self.feistel.width())
    }
}
