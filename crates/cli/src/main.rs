// visibot - Telegram bot predicting meteorological visibility range

mod exit_codes;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use visibot_cli::intake::{self, Rejection};
use visibot_cli::poller::Poller;
use visibot_cli::{formatter, messages, Bot, TelegramTransport};
use visibot_config::{token, Settings};
use visibot_model::Model;
use visibot_telegram::{BotClient, TelegramError};

use exit_codes::{
    EXIT_SUCCESS, EXIT_USAGE,
    EXIT_MODEL, EXIT_EXAMPLE,
    EXIT_TOKEN_MISSING, EXIT_KEYCHAIN,
    EXIT_PREDICT_PARSE, EXIT_PREDICT_EMPTY, EXIT_PREDICT_FAILED,
    transport_exit_code,
};

/// Extra time on top of the long-poll timeout before a request is abandoned.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 30;

/// Longest long-poll timeout the Bot API accepts.
const MAX_POLL_TIMEOUT_SECS: u64 = 50;

#[derive(Parser)]
#[command(name = "visibot")]
#[command(about = "Telegram bot predicting meteorological visibility range from weather observations")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/visibot/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (long polling)
    #[command(after_help = "\
Examples:
  visibot run
  VISIBOT_TOKEN=123:abc visibot run --model /srv/visibot/model.json
  visibot run --example assets/example.csv --poll-timeout 50")]
    Run {
        /// Bot token (default: keychain, then VISIBOT_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Model artifact path
        #[arg(long)]
        model: Option<PathBuf>,

        /// Example template sent on /start
        #[arg(long)]
        example: Option<PathBuf>,

        /// Bot API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Long-poll timeout in seconds (0-50)
        #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_POLL_TIMEOUT_SECS))]
        poll_timeout: Option<u64>,
    },

    /// Predict from a local CSV file and print the reply the bot would send
    #[command(after_help = "\
Examples:
  visibot predict observations.csv
  visibot predict observations.csv --model model.json")]
    Predict {
        /// CSV file with a header row
        file: PathBuf,

        /// Model artifact path
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Manage the bot token in the system keychain
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Print the column reference sent on /help
    HelpText,
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store the bot token in the keychain
    Set {
        /// Token issued by @BotFather
        token: String,
    },
    /// Remove the bot token from the keychain
    Delete,
    /// Show where the token would be read from
    Status,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nmodel format: visibot-model/v1",
        "\ntarget:       ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Run { token, model, example, api_base, poll_timeout } => {
            let settings = load_settings(cli.config.as_deref())?;
            cmd_run(settings, RunOptions { token, model, example, api_base, poll_timeout })
        }
        Commands::Predict { file, model } => {
            let settings = load_settings(cli.config.as_deref())?;
            cmd_predict(&file, &model.unwrap_or(settings.model_path))
        }
        Commands::Token { command } => match command {
            TokenCommands::Set { token } => cmd_token_set(&token),
            TokenCommands::Delete => cmd_token_delete(),
            TokenCommands::Status => cmd_token_status(),
        },
        Commands::HelpText => {
            println!("{}", messages::HELP);
            Ok(())
        }
    }
}

/// Timestamped lines on stderr; `info` by default.
fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => Settings::load_from(path).map_err(CliError::args),
        None => Ok(Settings::load()),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Create error from a Bot API failure with the matching exit code.
    pub fn transport(err: TelegramError) -> Self {
        let hint = match &err {
            TelegramError::Unauthorized(_) => Some("check the token issued by @BotFather".to_string()),
            TelegramError::Network(_) => Some("is the Bot API reachable from this host?".to_string()),
            _ => None,
        };
        Self { code: transport_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ── run ─────────────────────────────────────────────────────────────

struct RunOptions {
    token: Option<String>,
    model: Option<PathBuf>,
    example: Option<PathBuf>,
    api_base: Option<String>,
    poll_timeout: Option<u64>,
}

fn cmd_run(settings: Settings, opts: RunOptions) -> Result<(), CliError> {
    let model_path = opts.model.unwrap_or(settings.model_path);
    let example_path = opts.example.unwrap_or(settings.example_path);
    let api_base = opts.api_base.unwrap_or(settings.api_base);
    let poll_timeout = opts
        .poll_timeout
        .unwrap_or(settings.poll_timeout_secs)
        .min(MAX_POLL_TIMEOUT_SECS);

    // Assets first: a bot that cannot predict or send the template must not start.
    let model = load_model(&model_path)?;
    if !example_path.is_file() {
        return Err(CliError {
            code: EXIT_EXAMPLE,
            message: format!("example template not found: {}", example_path.display()),
            hint: Some("pass --example or set \"assets.examplePath\" in settings.json".into()),
        });
    }

    let lookup = visibot_config::resolve_token(opts.token.as_deref());
    let Some(bot_token) = lookup.token else {
        return Err(CliError {
            code: EXIT_TOKEN_MISSING,
            message: "no bot token configured".into(),
            hint: Some(format!(
                "run `visibot token set <TOKEN>` or set {}",
                token::TOKEN_ENV_VAR
            )),
        });
    };
    log::info!("Bot token from {}", lookup.source.as_str());

    let client = BotClient::new(
        &bot_token,
        &api_base,
        Duration::from_secs(poll_timeout.saturating_add(REQUEST_TIMEOUT_MARGIN_SECS)),
    )
    .map_err(CliError::transport)?;
    let me = client.get_me().map_err(CliError::transport)?;
    log::info!(
        "Started as @{} (id {}), example template {}",
        me.username.as_deref().unwrap_or(&me.first_name),
        me.id,
        example_path.display()
    );

    let transport = TelegramTransport::new(client, settings.max_file_bytes);
    let bot = Bot::new(Arc::new(model), example_path);
    let mut poller = Poller::new(transport, bot, me.username, poll_timeout);
    poller.run().map_err(CliError::transport)
}

fn load_model(path: &Path) -> Result<Model, CliError> {
    Model::load(path).map_err(|e| CliError {
        code: EXIT_MODEL,
        message: e.to_string(),
        hint: Some("pass --model or set \"model.path\" in settings.json".into()),
    })
}

// ── predict ─────────────────────────────────────────────────────────

fn cmd_predict(file: &Path, model_path: &Path) -> Result<(), CliError> {
    let model = load_model(model_path)?;
    let bytes = std::fs::read(file)
        .map_err(|e| CliError::args(format!("cannot read {}: {}", file.display(), e)))?;

    let table = intake::validate(&bytes).map_err(|rejection| {
        let code = match rejection {
            Rejection::ZeroRecords => EXIT_PREDICT_EMPTY,
            _ => EXIT_PREDICT_PARSE,
        };
        CliError { code, message: rejection.to_string(), hint: None }
    })?;

    let reply = formatter::predict_reply(&model, &table).map_err(|e| {
        CliError {
            code: EXIT_PREDICT_FAILED,
            message: format!("prediction failed: {}", e),
            hint: None,
        }
        .with_hint("compare the header row with `visibot help-text`")
    })?;

    println!("{}", reply);
    Ok(())
}

// ── token ───────────────────────────────────────────────────────────

fn cmd_token_set(value: &str) -> Result<(), CliError> {
    if value.trim().is_empty() {
        return Err(CliError::args("token must not be empty"));
    }
    token::set_token(value.trim()).map_err(|e| CliError { code: EXIT_KEYCHAIN, message: e, hint: None })?;
    eprintln!("Token stored in keychain ({})", token::mask_token(value.trim()));
    Ok(())
}

fn cmd_token_delete() -> Result<(), CliError> {
    token::delete_token().map_err(|e| CliError { code: EXIT_KEYCHAIN, message: e, hint: None })?;
    eprintln!("Token removed from keychain");
    Ok(())
}

fn cmd_token_status() -> Result<(), CliError> {
    let lookup = visibot_config::resolve_token(None);
    println!("keychain: {}", if token::keychain_available() { "available" } else { "unavailable" });
    println!("source:   {}", lookup.source.as_str());
    match lookup.token {
        Some(t) => {
            println!("token:    {}", token::mask_token(&t));
            Ok(())
        }
        None => Err(CliError { code: EXIT_TOKEN_MISSING, message: String::new(), hint: None }),
    }
}
