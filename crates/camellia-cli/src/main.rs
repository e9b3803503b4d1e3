//! Command-line interface for the Camellia block cipher core.
//!
//! Operates strictly in raw-block mode: files are transformed as independent
//! 16-byte blocks with no chaining or padding, so inputs must be a multiple
//! of the block size.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use camellia_core::{Camellia, BLOCK_SIZE};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Camellia CLI.
#[derive(Parser)]
#[command(
    name = "camellia",
    version,
    author,
    about = "Camellia block cipher CLI (raw 16-byte blocks, no chaining)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file of 16-byte blocks.
    Enc {
        /// Key as hex; 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file of 16-byte blocks.
    Dec {
        /// Key as hex; 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Verify the build against the published RFC 3713 vectors.
    Check,
    /// Run a local demo: random key and plaintext, encrypt, decrypt back.
    Demo {
        /// Key length in bytes (16, 24, or 32).
        #[arg(long, default_value_t = 16)]
        key_len: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            key_hex,
            input,
            output,
        } => cmd_transform(&key_hex, &input, &output, Direction::Encrypt),
        Commands::Dec {
            key_hex,
            input,
            output,
        } => cmd_transform(&key_hex, &input, &output, Direction::Decrypt),
        Commands::Check => cmd_check(),
        Commands::Demo { key_len, seed } => cmd_demo(key_len, seed),
    }
}

enum Direction {
    Encrypt,
    Decrypt,
}

fn cmd_transform(
    key_hex: &str,
    input_path: &PathBuf,
    output_path: &PathBuf,
    direction: Direction,
) -> Result<()> {
    let cipher = cipher_from_hex(key_hex)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % BLOCK_SIZE != 0 {
        bail!("input length must be a multiple of {BLOCK_SIZE} bytes");
    }

    let blocks = data.len() / BLOCK_SIZE;
    let mut out = vec![0u8; data.len()];
    match direction {
        Direction::Encrypt => cipher.encrypt_blocks(&data, &mut out, blocks)?,
        Direction::Decrypt => cipher.decrypt_blocks(&data, &mut out, blocks)?,
    }
    fs::write(output_path, out).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_check() -> Result<()> {
    // RFC 3713 appendix vectors: one plaintext for all three key sizes.
    let plaintext = "0123456789abcdeffedcba9876543210";
    let vectors = [
        (
            "0123456789abcdeffedcba9876543210",
            "67673138549669730857065648eabe43",
        ),
        (
            "0123456789abcdeffedcba98765432100011223344556677",
            "b4993401b3e996f84ee5cee7d79b09b9",
        ),
        (
            "0123456789abcdeffedcba987654321000112233445566778899aabbccddeeff",
            "9acc237dff16d76c20ef7c919e3a7509",
        ),
    ];

    let pt = hex::decode(plaintext).expect("vector hex");
    for (key_hex, expected_ct) in vectors {
        let cipher = cipher_from_hex(key_hex)?;
        let name = cipher.name().expect("key was just set");

        let mut ct = [0u8; BLOCK_SIZE];
        cipher.encrypt_blocks(&pt, &mut ct, 1)?;
        if hex::encode(ct) != expected_ct {
            bail!("{name} encryption does not match the published vector");
        }

        let mut rt = [0u8; BLOCK_SIZE];
        cipher.decrypt_blocks(&ct, &mut rt, 1)?;
        if rt.as_slice() != pt.as_slice() {
            bail!("{name} decryption does not invert encryption");
        }
        println!("{name}: ok");
    }
    Ok(())
}

fn cmd_demo(key_len: usize, seed: Option<u64>) -> Result<()> {
    if !Camellia::valid_key_length(key_len) {
        bail!("key length must be 16, 24, or 32 bytes");
    }
    let mut rng = seeded_rng(seed);

    let mut key = vec![0u8; key_len];
    rng.fill_bytes(&mut key);
    let cipher = Camellia::with_key(&key).context("derive key schedule")?;

    let mut plaintext = [0u8; 2 * BLOCK_SIZE];
    rng.fill_bytes(&mut plaintext);

    let mut ciphertext = [0u8; 2 * BLOCK_SIZE];
    cipher.encrypt_blocks(&plaintext, &mut ciphertext, 2)?;

    let mut decrypted = [0u8; 2 * BLOCK_SIZE];
    cipher.decrypt_blocks(&ciphertext, &mut decrypted, 2)?;

    println!("demo cipher: {}", cipher.name().expect("key was just set"));
    println!("demo key: {}", hex::encode(&key));
    println!("plaintext: {}", hex::encode(plaintext));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn cipher_from_hex(key_hex: &str) -> Result<Camellia> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    if !Camellia::valid_key_length(key.len()) {
        bail!("key must be 16, 24, or 32 bytes (32, 48, or 64 hex characters)");
    }
    Camellia::with_key(&key).context("derive key schedule")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
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
