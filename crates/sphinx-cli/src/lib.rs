//! Sphinx key hierarchy command line interface.
//!
//! Thin layer over `sphinx-crypto`: arguments in, hex out. Every command that
//! needs the master key reads it from `--master-key` or `SPHINX_MASTER_KEY`.
//! Key material is never logged.

use std::io::Write;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use sphinx_crypto::{Context, MasterKey, verify};

/// Sphinx key hierarchy tool
#[derive(Parser)]
#[command(name = "sphinx")]
#[command(about = "Derive, sign and encrypt with a Sphinx master key")]
#[command(version)]
pub struct Cli {
    /// Master key as 64 hex characters
    #[arg(long, env = "SPHINX_MASTER_KEY", hide_env_values = true, global = true)]
    pub master_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new random master key
    Keygen,

    /// Derive context-bound material from the master key
    Derive {
        /// Context: signing, encryption, salt or password
        context: Context,
        /// Extra derivation inputs, folded in order
        messages: Vec<String>,
    },

    /// Print the public key of the derived signing key
    PublicKey {
        /// Derivation inputs binding the signing key
        #[arg(long = "input")]
        inputs: Vec<String>,
    },

    /// Sign a message with the derived signing key
    Sign {
        /// Message to sign
        message: String,
        /// Derivation inputs binding the signing key
        #[arg(long = "input")]
        inputs: Vec<String>,
    },

    /// Verify a detached signature
    Verify {
        /// Public key (hex)
        public_key: String,
        /// Signed message
        message: String,
        /// Signature (hex)
        signature: String,
    },

    /// Encrypt a plaintext with the derived encryption key
    Encrypt {
        /// Plaintext to encrypt
        plaintext: String,
        /// Derivation inputs binding the encryption key
        #[arg(long = "input")]
        inputs: Vec<String>,
    },

    /// Decrypt a nonce-prefixed payload with the derived encryption key
    Decrypt {
        /// Payload (hex): nonce followed by ciphertext
        payload: String,
        /// Derivation inputs binding the encryption key
        #[arg(long = "input")]
        inputs: Vec<String>,
    },
}

impl Command {
    /// Subcommand name, safe to log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keygen => "keygen",
            Self::Derive { .. } => "derive",
            Self::PublicKey { .. } => "public-key",
            Self::Sign { .. } => "sign",
            Self::Verify { .. } => "verify",
            Self::Encrypt { .. } => "encrypt",
            Self::Decrypt { .. } => "decrypt",
        }
    }
}

/// Execute `cli`, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    sphinx_crypto::init().context("cryptographic initialization failed")?;
    tracing::debug!(command = cli.command.name(), "running command");

    match &cli.command {
        Command::Keygen => {
            let key = MasterKey::generate();
            writeln!(out, "{}", key.to_hex().as_str())?;
        },
        Command::Derive { context, messages } => {
            let key = master_key(cli)?;
            let digest = key.derive(*context, &as_slices(messages));
            writeln!(out, "{}", hex::encode(digest.as_bytes()))?;
        },
        Command::PublicKey { inputs } => {
            let signer = master_key(cli)?.signing_key(&as_slices(inputs));
            writeln!(out, "{}", hex::encode(signer.public_key()))?;
        },
        Command::Sign { message, inputs } => {
            let signer = master_key(cli)?.signing_key(&as_slices(inputs));
            writeln!(out, "{}", hex::encode(signer.sign(message.as_bytes())))?;
        },
        Command::Verify { public_key, message, signature } => {
            let public_key = hex::decode(public_key).context("public key is not valid hex")?;
            let signature = hex::decode(signature).context("signature is not valid hex")?;
            verify(&public_key, message.as_bytes(), &signature).context("signature rejected")?;
            writeln!(out, "ok")?;
        },
        Command::Encrypt { plaintext, inputs } => {
            let key = master_key(cli)?.symmetric_key(&as_slices(inputs));
            let payload = key.encrypt(plaintext.as_bytes());
            writeln!(out, "{}", hex::encode(payload.to_bytes()))?;
        },
        Command::Decrypt { payload, inputs } => {
            let key = master_key(cli)?.symmetric_key(&as_slices(inputs));
            let payload = hex::decode(payload).context("payload is not valid hex")?;
            let plaintext = key.decrypt(&payload).context("payload rejected")?;
            out.write_all(&plaintext)?;
            writeln!(out)?;
        },
    }

    Ok(())
}

fn master_key(cli: &Cli) -> anyhow::Result<MasterKey> {
    let Some(text) = cli.master_key.as_deref() else {
        bail!("no master key: pass --master-key or set SPHINX_MASTER_KEY");
    };
    MasterKey::from_hex(text).context("invalid master key")
}

fn as_slices(messages: &[String]) -> Vec<&[u8]> {
    messages.iter().map(String::as_bytes).collect()
}
