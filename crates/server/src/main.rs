use std::fmt;

use server::config::Config;
use server::state::AppState;
use services::QuizServices;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPort { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p server -- [--db <sqlite_url>] [--port <port>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {}", Config::DEFAULT_DB_URL);
    eprintln!("  --port {}", Config::DEFAULT_PORT);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_ENV, QUIZ_DB_URL, QUIZ_PORT, QUIZ_COOKIE_DOMAIN,");
    eprintln!("  QUIZ_ALLOWED_ORIGIN, QUIZ_SESSION_COOKIE, RUST_LOG");
}

/// Applies command-line overrides on top of the environment configuration.
fn apply_args(
    mut config: Config,
    args: &mut impl Iterator<Item = String>,
) -> Result<Config, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = value;
            }
            "--port" => {
                let value = require_value(args, "--port")?;
                config.port = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(config)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    log_fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut argv = std::env::args().skip(1);
    let config = apply_args(Config::load(), &mut argv).map_err(|e| {
        print_usage();
        e
    })?;

    info!("Opening question store...");
    let services =
        QuizServices::new_sqlite(&config.db_url, config.session_cookie.as_deref()).await?;
    let state = AppState::new(&config, services);

    info!("Starting server...");
    server::start_server(config, state).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
