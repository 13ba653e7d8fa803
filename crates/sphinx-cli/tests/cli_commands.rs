//! End-to-end tests for the CLI commands.
//!
//! Commands are parsed from argument vectors and executed against an
//! in-memory writer.

use clap::Parser;
use sphinx_cli::{Cli, run};
use sphinx_crypto::{Context, MasterKey};

const MASTER_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

fn execute(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?.trim_end().to_string())
}

#[test]
fn keygen_prints_a_valid_master_key() {
    let output = execute(&["sphinx", "keygen"]).unwrap();
    assert_eq!(output.len(), 64);
    assert!(MasterKey::from_hex(&output).is_ok());
}

#[test]
fn derive_matches_library() {
    let output =
        execute(&["sphinx", "--master-key", MASTER_KEY_HEX, "derive", "salt", "example.org"])
            .unwrap();

    let key = MasterKey::from_hex(MASTER_KEY_HEX).unwrap();
    assert_eq!(output, hex::encode(key.host_salt("example.org").as_bytes()));
}

#[test]
fn derive_context_is_case_insensitive() {
    let upper = execute(&["sphinx", "--master-key", MASTER_KEY_HEX, "derive", "SIGNING"]).unwrap();
    let lower = execute(&["sphinx", "--master-key", MASTER_KEY_HEX, "derive", "signing"]).unwrap();
    assert_eq!(upper, lower);

    let key = MasterKey::from_hex(MASTER_KEY_HEX).unwrap();
    assert_eq!(lower, hex::encode(key.derive(Context::Signing, &[]).as_bytes()));
}

#[test]
fn unknown_context_is_a_parse_error() {
    let Err(err) = Cli::try_parse_from(["sphinx", "derive", "hashing"]) else {
        panic!("unknown context must not parse");
    };
    assert!(err.to_string().contains("unknown context: hashing"));
}

#[test]
fn sign_then_verify() {
    let public_key =
        execute(&["sphinx", "--master-key", MASTER_KEY_HEX, "public-key", "--input", "id"])
            .unwrap();
    let signature =
        execute(&["sphinx", "--master-key", MASTER_KEY_HEX, "sign", "hello", "--input", "id"])
            .unwrap();

    let verdict = execute(&["sphinx", "verify", &public_key, "hello", &signature]).unwrap();
    assert_eq!(verdict, "ok");

    assert!(execute(&["sphinx", "verify", &public_key, "goodbye", &signature]).is_err());
}

#[test]
fn encrypt_then_decrypt() {
    let payload = execute(&[
        "sphinx",
        "--master-key",
        MASTER_KEY_HEX,
        "encrypt",
        "account list",
        "--input",
        "vault",
    ])
    .unwrap();

    let plaintext = execute(&[
        "sphinx",
        "--master-key",
        MASTER_KEY_HEX,
        "decrypt",
        &payload,
        "--input",
        "vault",
    ])
    .unwrap();
    assert_eq!(plaintext, "account list");

    let wrong_binding = execute(&[
        "sphinx",
        "--master-key",
        MASTER_KEY_HEX,
        "decrypt",
        &payload,
        "--input",
        "other",
    ]);
    assert!(wrong_binding.is_err());
}

#[test]
fn invalid_master_key_is_reported() {
    let err = execute(&["sphinx", "--master-key", "abcd", "derive", "salt"]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid master key"));
}
