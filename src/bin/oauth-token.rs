use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oauth_token::config::loader;
use oauth_token::parser::form::encode_map;
use oauth_token::utils::constants::DEFAULT_CONFIG_PATH;
use oauth_token::utils::logging::{self, LogLevel};
use oauth_token::{FileStore, Token};
use serde_json::json;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// overrides `store.prefix` from the config
    #[arg(long, global = true)]
    prefix: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a form-encoded token response and store it
    Parse {
        #[arg(short, long)]
        provider: String,
        /// response body; read from stdin when omitted
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Print the stored token as JSON
    Show {
        #[arg(short, long)]
        provider: String,
    },
    /// Print the request parameters of the stored token
    Params {
        #[arg(short, long)]
        provider: String,
        #[arg(long)]
        for_renewal: bool,
    },
    /// Set one attribute on the stored token
    SetAttribute {
        #[arg(short, long)]
        provider: String,
        name: String,
        value: String,
    },
    /// Delete the stored token
    Remove {
        #[arg(short, long)]
        provider: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load config, start logging
    // -------------------------------

    let args = Args::parse();
    let loaded = loader::file_to_settings(Path::new(&args.config)).await?;
    logging::run(&loaded.settings, args.log_level)?;
    if !loaded.from_file {
        warn!("config '{}' not found, using defaults", args.config);
    }

    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| loaded.settings.store.prefix.clone());

    // -------------------------------
    // 2. Open the token store
    // -------------------------------

    let mut store = FileStore::open(&loaded.settings.store.path)?;

    // -------------------------------
    // 3. Run the command
    // -------------------------------

    match args.command {
        Command::Parse { provider, body } => {
            let body = match body {
                Some(body) => body,
                None => read_stdin()?,
            };
            let token = Token::from_response_body(body.trim());
            if !token.is_valid() {
                warn!(provider = %provider, "parsed token is not valid");
            }
            token.store(&mut store, &provider, &prefix)?;
            println!("{}", serde_json::to_string_pretty(&describe(&token))?);
        }
        Command::Show { provider } => {
            let token = Token::restore(&store, &provider, &prefix);
            println!("{}", serde_json::to_string_pretty(&describe(&token))?);
        }
        Command::Params { provider, for_renewal } => {
            let mut token = Token::restore(&store, &provider, &prefix);
            token.set_for_renewal(for_renewal);
            println!("{}", encode_map(&token.parameters()));
        }
        Command::SetAttribute { provider, name, value } => {
            let mut token = Token::restore(&store, &provider, &prefix);
            token.set_attribute(name, value);
            token.store(&mut store, &provider, &prefix)?;
        }
        Command::Remove { provider } => {
            Token::remove_from_store(&mut store, &provider, &prefix)?;
        }
    }

    info!("done");
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("failed to read response body from stdin")?;
    Ok(body)
}

fn describe(token: &Token) -> serde_json::Value {
    json!({
        "token": token,
        "valid": token.is_valid(),
        "expired": token.has_expired(),
        "renewable": token.is_renewable(),
        "expires_at": token.expires_at(),
    })
}
