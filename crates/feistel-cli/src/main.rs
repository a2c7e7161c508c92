//! Command-line interface for the Feistel cipher and its chaining modes.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use feistel_core::{
    build_round_keys, integer_to_text, split_into_blocks, text_to_integer, Block, BlockWidth,
    Feistel, Message, Negation, Secret,
};
use feistel_modes::{generate_iv, CfbKeystream, Envelope, Mode, ModeConfig};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Block encrypted by `demo` when the message does not fit one 64-bit block.
const DEMO_BLOCK: Block = 0xaa87_6392_feb3_1059;

/// Feistel cipher CLI.
#[derive(Parser)]
#[command(
    name = "feistel",
    version,
    author,
    about = "Feistel block cipher with CBC and CFB chaining"
)]
struct Cli {
    /// Log round keys, blocks and per-round halves.
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct CipherArgs {
    /// Number of Feistel rounds.
    #[arg(long, default_value_t = ModeConfig::DEFAULT_ROUNDS)]
    rounds: usize,
    /// Negation applied inside the round function.
    #[arg(long, value_enum, default_value_t = NegationArg::Logical)]
    negation: NegationArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum NegationArg {
    Logical,
    Bitwise,
}

impl From<NegationArg> for Negation {
    fn from(value: NegationArg) -> Self {
        match value {
            NegationArg::Logical => Negation::Logical,
            NegationArg::Bitwise => Negation::Bitwise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Cbc,
    Cfb,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Cbc => Mode::Cbc,
            ModeArg::Cfb => Mode::Cfb,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the round keys derived from a secret.
    Keys {
        /// Secret as up to 32 hex characters.
        #[arg(long, value_name = "HEX")]
        secret: String,
        /// Number of rounds.
        #[arg(long, default_value_t = ModeConfig::DEFAULT_ROUNDS)]
        rounds: usize,
        /// Block width in bits.
        #[arg(long, default_value_t = 64)]
        width: u32,
    },
    /// Encrypt and decrypt a single block.
    Block {
        /// Secret as up to 32 hex characters.
        #[arg(long, value_name = "HEX")]
        secret: String,
        /// Block as hex.
        #[arg(long, value_name = "HEX")]
        block: String,
        /// Block width in bits.
        #[arg(long, default_value_t = 64)]
        width: u32,
        #[command(flatten)]
        cipher: CipherArgs,
    },
    /// Encrypt text or a file into an envelope.
    Enc {
        /// Secret as up to 32 hex characters.
        #[arg(long, value_name = "HEX")]
        secret: String,
        /// Chaining mode.
        #[arg(long, value_enum, default_value_t = ModeArg::Cbc)]
        mode: ModeArg,
        /// Text to encrypt.
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,
        /// File to encrypt.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Output path for the serialized envelope.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Initialization vector as hex; random when omitted.
        #[arg(long, value_name = "HEX")]
        iv: Option<String>,
        /// Width in bits of a generated IV, which fixes the block width.
        #[arg(long, default_value_t = 64)]
        width: u32,
        /// Optional RNG seed for a reproducible IV.
        #[arg(long)]
        seed: Option<u64>,
        /// Reverse the round keys when decrypting in CFB mode.
        #[arg(long, default_value_t = false)]
        legacy_cfb: bool,
        #[command(flatten)]
        cipher: CipherArgs,
    },
    /// Decrypt an envelope.
    Dec {
        /// Secret as up to 32 hex characters.
        #[arg(long, value_name = "HEX")]
        secret: String,
        /// Path to the serialized envelope.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path; prints the text when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Run the Feistel, CBC and CFB round trips on a message.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Secret as hex; random when omitted.
        #[arg(long, value_name = "HEX")]
        secret: Option<String>,
        /// Message to encrypt.
        #[arg(long, default_value = "Hello World!")]
        message: String,
        #[command(flatten)]
        cipher: CipherArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_log(cli.debug);
    let debug = cli.debug;
    match cli.command {
        Commands::Keys {
            secret,
            rounds,
            width,
        } => cmd_keys(&secret, rounds, width),
        Commands::Block {
            secret,
            block,
            width,
            cipher,
        } => cmd_block(&secret, &block, width, cipher, debug),
        Commands::Enc {
            secret,
            mode,
            text,
            input,
            out,
            iv,
            width,
            seed,
            legacy_cfb,
            cipher,
        } => {
            let message = match (text, input) {
                (Some(text), _) => text_to_integer(&text),
                (None, Some(path)) => Message::from_bytes(
                    fs::read(&path).with_context(|| format!("read {}", path.display()))?,
                ),
                (None, None) => bail!("either --text or --input is required"),
            };
            let config = mode_config(cipher, legacy_cfb, debug);
            cmd_enc(&secret, mode.into(), &message, &out, iv.as_deref(), width, seed, &config)
        }
        Commands::Dec {
            secret,
            input,
            output,
        } => cmd_dec(&secret, &input, output.as_ref(), debug),
        Commands::Demo {
            seed,
            secret,
            message,
            cipher,
        } => cmd_demo(seed, secret.as_deref(), &message, cipher, debug),
    }
}

fn setup_log(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

fn mode_config(cipher: CipherArgs, legacy_cfb: bool, debug: bool) -> ModeConfig {
    let cfb_keystream = if legacy_cfb {
        CfbKeystream::ReversedOnDecrypt
    } else {
        CfbKeystream::Forward
    };
    ModeConfig::default()
        .with_rounds(cipher.rounds)
        .with_debug(debug)
        .with_negation(cipher.negation.into())
        .with_cfb_keystream(cfb_keystream)
}

fn cmd_keys(secret_hex: &str, rounds: usize, width: u32) -> Result<()> {
    let secret = parse_secret(secret_hex)?;
    let width = BlockWidth::new(width)?;
    let keys = build_round_keys(secret, rounds, width)?;
    for (round, key) in keys.iter().enumerate() {
        println!("key[{}] = {:#x}", round, key);
    }
    Ok(())
}

fn cmd_block(
    secret_hex: &str,
    block_hex: &str,
    width: u32,
    cipher: CipherArgs,
    debug: bool,
) -> Result<()> {
    let secret = parse_secret(secret_hex)?;
    let block = parse_hex_u128(block_hex, "block")?;
    let feistel = Feistel::new(BlockWidth::new(width)?, cipher.rounds)?
        .with_negation(cipher.negation.into())
        .with_trace(debug);
    let keys = feistel.round_keys(secret)?;

    let encrypted = feistel.encrypt_block(block, &keys)?;
    let decrypted = feistel.decrypt_block(encrypted, &keys)?;
    println!("message: {:#x}", block);
    println!("encrypted: {:#x}", encrypted);
    println!("decrypted: {:#x}", decrypted);
    if decrypted != block {
        bail!("block roundtrip failed");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_enc(
    secret_hex: &str,
    mode: Mode,
    message: &Message,
    out: &PathBuf,
    iv_hex: Option<&str>,
    width: u32,
    seed: Option<u64>,
    config: &ModeConfig,
) -> Result<()> {
    let secret = parse_secret(secret_hex)?;
    let iv = match iv_hex {
        Some(hex_str) => parse_hex_u128(hex_str, "IV")?,
        None => generate_iv(&mut seeded_rng(seed), BlockWidth::new(width)?)?,
    };
    let envelope = Envelope::seal(mode, message, secret, iv, config)?;
    let bytes = envelope.to_bytes().context("serialize envelope")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    println!("iv: {:#x}", iv);
    println!("ciphertext: {}", hex::encode(&envelope.ciphertext));
    Ok(())
}

fn cmd_dec(
    secret_hex: &str,
    input: &PathBuf,
    output: Option<&PathBuf>,
    debug: bool,
) -> Result<()> {
    let secret = parse_secret(secret_hex)?;
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let envelope = Envelope::from_bytes(&bytes).context("deserialize envelope")?;
    let plaintext = envelope.open(secret, debug)?;
    match output {
        Some(path) => fs::write(path, plaintext.as_bytes())
            .with_context(|| format!("write {}", path.display()))?,
        None => println!("{}", integer_to_text(&plaintext).context("decode plaintext")?),
    }
    Ok(())
}

fn cmd_demo(
    seed: Option<u64>,
    secret_hex: Option<&str>,
    text: &str,
    cipher: CipherArgs,
    debug: bool,
) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let secret = match secret_hex {
        Some(hex_str) => parse_secret(hex_str)?,
        None => Secret::from(rng.next_u64()),
    };
    let message = text_to_integer(text);
    println!("secret: {:#x}", secret.0);
    println!("message: {}", text);
    println!("message hex: {:#x}", message);

    println!("=== Feistel ===");
    let feistel = Feistel::new(BlockWidth::DEFAULT, cipher.rounds)?
        .with_negation(cipher.negation.into())
        .with_trace(debug);
    let keys = feistel.round_keys(secret)?;
    let fits = message.bit_length() <= 64;
    let block = if fits {
        split_into_blocks(&message, BlockWidth::DEFAULT)?
            .last()
            .copied()
            .unwrap_or(0)
    } else {
        DEMO_BLOCK
    };
    let encrypted = feistel.encrypt_block(block, &keys)?;
    let decrypted = feistel.decrypt_block(encrypted, &keys)?;
    println!("block: {:#x}", block);
    println!("encrypted block: {:#x}", encrypted);
    println!("decrypted block: {:#x}", decrypted);
    if decrypted != block {
        bail!("feistel roundtrip failed");
    }

    let iv = generate_iv(&mut rng, BlockWidth::DEFAULT)?;
    println!("iv: {:#x}", iv);
    let config = mode_config(cipher, false, debug);
    for mode in [Mode::Cbc, Mode::Cfb] {
        println!("===== {:?} =====", mode);
        let encrypted = mode.encrypt(&message, secret, iv, &config)?;
        let decrypted = mode.decrypt(&encrypted, secret, iv, &config)?;
        println!("encrypted hex: {:#x}", encrypted);
        println!("decrypted hex: {:#x}", decrypted);
        if decrypted != message {
            bail!("{:?} roundtrip failed", mode);
        }
        println!(
            "decrypted message: {}",
            integer_to_text(&decrypted).context("decode plaintext")?
        );
    }
    Ok(())
}

fn parse_secret(hex_str: &str) -> Result<Secret> {
    parse_hex_u128(hex_str, "secret").map(Secret)
}

fn parse_hex_u128(hex_str: &str, what: &str) -> Result<u128> {
    let digits = hex_str.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(padded).with_context(|| format!("decode {} hex", what))?;
    if bytes.is_empty() || bytes.len() > 16 {
        bail!("{} must be 1 to 16 bytes (up to 32 hex characters)", what);
    }
    Ok(bytes
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b)))
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
