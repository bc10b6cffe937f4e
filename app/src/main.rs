use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sql2cypher::management::{TranslationService, TranslatorConfig, examples};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sql2cypher", version, about = "Translate SQL SELECT queries into Cypher")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one query, read from stdin when omitted
    Translate { sql: Option<String> },
    /// Print the documented example translations
    Examples,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    setup_logging(&config.log_level)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Translate { sql } => {
            let sql = match sql {
                Some(sql) => sql,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading query from stdin")?;
                    buf
                }
            };

            let service = TranslationService::new(config);
            let result = service.translate_query(&sql, None);
            println!("{}", serde_json::to_string_pretty(&result)?);

            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Examples => {
            println!("{}", serde_json::to_string_pretty(examples())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<TranslatorConfig> {
    let config = match path {
        Some(path) => TranslatorConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TranslatorConfig::default(),
    };
    Ok(config.with_env()?)
}

fn setup_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}
