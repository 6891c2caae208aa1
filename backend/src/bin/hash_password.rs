//! Produce an Argon2id PHC hash for a users file entry.
//!
//! ```text
//! $ printf 'secret' | hash-password --username admin
//! admin: $argon2id$v=19$m=19456,t=2,p=1$...
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Read, Write};

use clap::Parser;
use cms::outbound::credentials::hash_password;
use zeroize::Zeroizing;

/// `hash-password` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hash-password",
    about = "Hash a password read from stdin for the CMS users file",
    version
)]
struct CliArgs {
    /// Print a complete `username: hash` YAML line for this user.
    #[arg(long, value_name = "name")]
    username: Option<String>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let mut input = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut input)?;
    let password = input.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "password must not be empty",
        ));
    }

    let hash = hash_password(password).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    match args.username {
        Some(username) => writeln!(stdout, "{username}: {hash}"),
        None => writeln!(stdout, "{hash}"),
    }
}
