//! Width-parametric Feistel block cipher.
//!
//! This crate provides:
//! - Bit rotation and slicing over an explicit bit width.
//! - A rotation-based round key schedule.
//! - Single-block encryption and decryption through an N-round Feistel network.
//! - Conversion between arbitrary-length messages, fixed-width blocks and text.
//!
//! The construction is demonstration grade. It is not side-channel hardened and
//! offers no integrity protection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bits;
mod block;
mod cipher;
mod codec;
mod error;
mod key;
mod round;

pub use crate::block::{join_halves, split_halves, Block, BlockWidth};
pub use crate::cipher::{feistel_decrypt, feistel_encrypt, Feistel};
pub use crate::codec::{
    integer_to_text, join_blocks, split_into_blocks, text_to_integer, Message,
};
pub use crate::error::FeistelError;
pub use crate::key::{build_round_keys, derive_round_key, RoundKeys, Secret};
pub use crate::round::{round_function, Negation};
