use std::process::ExitCode;

use chrono::{Local, NaiveTime};
use clap::{Parser, Subcommand};
use colored::*;
use creative_time::backends::openai::OpenAI;
use creative_time::config::{Config, API_KEY_ENV};
use creative_time::error::CreativeTimeError;
use creative_time::prompt::{build_prompt, clock_time, parse_clock_time};
use creative_time::secret_store::SecretStore;

/// Exit code for failures while talking to the API
const EXIT_GENERATION_FAILED: u8 = 1;

/// Exit code for a missing key or invalid settings, before any network I/O
const EXIT_BAD_CONFIG: u8 = 2;

/// Command line arguments for creative-time
#[derive(Parser)]
#[command(
    name = "creative-time",
    version,
    about = "Describe the current time in a whimsical sentence"
)]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// API key (defaults to $OPEN_AI_API_KEY, then ./.env, then the stored key)
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL for the API
    #[arg(long)]
    base_url: Option<String>,

    /// Model name to use
    #[arg(long)]
    model: Option<String>,

    /// Maximum tokens in the response
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Temperature setting (0.0-2.0)
    #[arg(long)]
    temperature: Option<f32>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Describe this time (24-hour HH:MM) instead of now
    #[arg(long, value_parser = parse_at)]
    at: Option<NaiveTime>,

    /// Print the prompt and exit without calling the API
    #[arg(long)]
    print_prompt: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set { value: String },
    /// Print the stored API key
    Get,
    /// Remove the stored API key
    Delete,
}

fn parse_at(raw: &str) -> Result<NaiveTime, String> {
    parse_clock_time(raw).ok_or_else(|| format!("expected HH:MM, got {raw:?}"))
}

fn report(err: &CreativeTimeError) {
    log::error!("{err}");
    eprintln!("{} {}", "Error:".bright_red(), err);
}

fn run_key_action(action: KeyAction) -> Result<(), CreativeTimeError> {
    let mut store = SecretStore::open()?;
    match action {
        KeyAction::Set { value } => {
            store.set(API_KEY_ENV, &value)?;
            println!(
                "{} Key saved to {}",
                "✓".bright_green(),
                store.path().display()
            );
        }
        KeyAction::Get => match store.get(API_KEY_ENV) {
            Some(value) => println!("{value}"),
            None => println!("{} No key stored", "!".bright_yellow()),
        },
        KeyAction::Delete => {
            if store.delete(API_KEY_ENV)? {
                println!("{} Key deleted", "✓".bright_green());
            } else {
                println!("{} No key stored", "!".bright_yellow());
            }
        }
    }
    Ok(())
}

fn build_config(args: &CliArgs) -> Result<Config, CreativeTimeError> {
    let mut builder = Config::builder_from_env();
    if let Some(key) = args.api_key.clone() {
        builder = builder.api_key(key);
    }
    if let Some(url) = args.base_url.clone() {
        builder = builder.base_url(url);
    }
    if let Some(model) = args.model.clone() {
        builder = builder.model(model);
    }
    if let Some(mt) = args.max_tokens {
        builder = builder.max_tokens(mt);
    }
    if let Some(temp) = args.temperature {
        builder = builder.temperature(temp);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout_seconds(timeout);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> ExitCode {
    creative_time::init_logging();
    let mut args = CliArgs::parse();

    // variables already in the process environment are left untouched
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("loaded {}", path.display()),
        Err(e) => log::debug!("no .env loaded: {e}"),
    }

    if let Some(Command::Key { action }) = args.command.take() {
        return match run_key_action(action) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report(&e);
                ExitCode::from(EXIT_BAD_CONFIG)
            }
        };
    }

    let time = args.at.unwrap_or_else(|| Local::now().time());

    if args.print_prompt {
        print!("{}", build_prompt(&clock_time(time)));
        return ExitCode::SUCCESS;
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            return ExitCode::from(EXIT_BAD_CONFIG);
        }
    };
    log::debug!("using {config:?}");

    let provider = OpenAI::new(config);
    match creative_time::generate_creative_time_at(&provider, time).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::from(EXIT_GENERATION_FAILED)
        }
    }
}
