//! Prints a client secret for Sign in with Apple to stdout.
//!
//! Every flag can also be given as environment variable. Diagnostics go to
//! stderr and are controlled by `RUST_LOG`.

use std::io::Read as _;

use clap::Parser;
use clio::Input;
use client_secret::{
    config::{APPLE_AUDIENCE, DEFAULT_VALIDITY_SECS},
    crypto::ec::PrivateKey,
    jwa::EcDSA,
    ClientSecretConfig, Compact,
};
use eyre::WrapErr as _;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};
use zeroize::Zeroizing;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The team identifier, used as issuer (`iss`).
    #[arg(long, env = "CLIENT_SECRET_TEAM_ID")]
    team_id: String,

    /// The identifier of the private key (`kid`).
    #[arg(long, env = "CLIENT_SECRET_KEY_ID")]
    key_id: String,

    /// The client (services) identifier, used as subject (`sub`).
    #[arg(long, env = "CLIENT_SECRET_CLIENT_ID")]
    client_id: String,

    /// The audience (`aud`).
    #[arg(long, env = "CLIENT_SECRET_AUDIENCE", default_value = APPLE_AUDIENCE)]
    audience: String,

    /// The signing algorithm, must match the curve of the private key.
    #[arg(long, env = "CLIENT_SECRET_ALGORITHM", default_value = "ES256")]
    algorithm: EcDSA,

    /// How long the secret is valid, in seconds.
    #[arg(long, env = "CLIENT_SECRET_VALIDITY", default_value_t = DEFAULT_VALIDITY_SECS)]
    validity: u64,

    /// The PKCS#8 PEM private key, `-` reads it from stdin.
    #[arg(long, env = "CLIENT_SECRET_PRIVATE_KEY")]
    private_key: Input,

    /// Use deterministic nonces (RFC 6979).
    #[arg(long)]
    deterministic: bool,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let token = run(Cli::parse())?;

    println!("{token}");
    Ok(())
}

fn run(mut cli: Cli) -> eyre::Result<Compact> {
    let mut pem = Zeroizing::new(String::new());
    cli.private_key
        .read_to_string(&mut *pem)
        .wrap_err_with(|| format!("failed to read the private key from {}", cli.private_key))?;

    let key = PrivateKey::from_pkcs8_pem(cli.algorithm, &pem)
        .wrap_err("failed to parse the private key")?;
    tracing::info!(?key, "loaded private key");

    let mut signer = key.into_signer();
    if cli.deterministic {
        signer = signer.deterministic(true);
    }

    let config = ClientSecretConfig::new(cli.team_id, cli.key_id, cli.client_id)
        .with_algorithm(cli.algorithm)
        .with_audience(cli.audience)
        .with_validity(cli.validity);

    config
        .sign(&mut signer)
        .wrap_err("failed to create the client secret")
}
