#![deny(warnings)]

mod api;
mod ceremony;
mod codec;
mod config;
mod error;
mod logging;
mod network;
mod platform;
mod webauthn;

use crate::{
    api::Api,
    ceremony::TerminalNavigator,
    config::{Config, RawConfig},
    error::{Error, ErrorKind},
    network::Network,
    platform::{PlatformError, SoftPlatform, probe_availability},
};
use anyhow::{anyhow, bail};
use clap::{Arg, Command, crate_authors, crate_description, crate_version, value_parser};
use std::env;
use tracing::info;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("Passkey ceremony client")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("PASSKEY_CEREMONY_CONFIG")
                .short('c')
                .long("config")
                .global(true)
                .default_value("passkey-ceremony.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("API_ROOT")
                .long("api-root")
                .global(true)
                .value_parser(value_parser!(Url))
                .help(
                    "Defines the relying party API root, e.g. `https://files.example.com/api/v1`.",
                ),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("probe").about("Checks whether a platform authenticator is available."),
        )
        .subcommand(Command::new("register").about("Registers a new passkey."))
        .subcommand(Command::new("login").about("Signs in with a registered passkey."))
        .get_matches();

    let mut raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    // CLI argument takes precedence.
    if let Some(api_root) = matches.get_one::<Url>("API_ROOT") {
        raw_config.api.root = api_root.clone();
    }

    let config = Config::from(raw_config);
    info!(
        "Passkey ceremony client v{} uses relying party API ({}).",
        config.version, config.api.root
    );

    let platform = SoftPlatform::from_config(&config)?;
    let is_available = probe_availability(Some(&platform)).await;
    let command = match matches.subcommand_name() {
        Some("probe") => {
            println!("{}", if is_available { "available" } else { "unavailable" });
            return Ok(());
        }
        Some(command) => command,
        None => bail!("Command is not provided."),
    };

    if !is_available {
        println!("Platform authenticator is unavailable, `{command}` isn't offered.");
        return Ok(());
    }

    let api = Api::new(
        config.clone(),
        Network::create(&config.api, &config.http.client)?,
    );
    match command {
        "register" => {
            let response = api
                .registration(&platform)
                .run()
                .await
                .map_err(|err| anyhow!(describe_ceremony_failure(&err)))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "login" => {
            let navigator = TerminalNavigator::new(platform.origin().clone());
            let response = api
                .authentication(&platform, &navigator)
                .run()
                .await
                .map_err(|err| anyhow!(describe_ceremony_failure(&err)))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        command => bail!("Unknown command ({command})."),
    }

    Ok(())
}

/// Tells the user what a failed ceremony means for them and whether it's safe to start over.
fn describe_ceremony_failure(err: &Error) -> String {
    let hint = match err.kind() {
        ErrorKind::Ceremony => match err.root_cause().downcast_ref::<PlatformError>() {
            Some(PlatformError::NotAllowed) => {
                "The ceremony was cancelled or timed out, start it again when ready."
            }
            Some(PlatformError::InvalidState) => {
                "This authenticator is already registered with the relying party."
            }
            _ => "The platform authenticator rejected the ceremony.",
        },
        ErrorKind::Indeterminate => {
            "The relying party may have completed the ceremony, check before starting over."
        }
        _ if err.is_network() => "The relying party is unreachable or rejected the request.",
        _ => "The ceremony failed unexpectedly.",
    };

    format!("{hint} {:#}", err.root_cause())
}
