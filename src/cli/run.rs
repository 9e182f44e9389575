//! Command execution for the CLI.
//!
//! Every command loads configuration, sets up logging and opens the task
//! database the same way before doing its own work.

use crate::chat::MessageHandler;
use crate::cli::Command;
use crate::completion::OpenAiClient;
use crate::config::{self, AppConfig};
use crate::error::Result;
use crate::logging;
use crate::session::{self, ChatSession};
use crate::tasks::SqliteTaskRepository;
use crate::web::{self, AppState};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    fn success(stdout: Vec<String>) -> Self {
        Self { exit_code: ExitCode::SUCCESS, stdout, stderr: vec![] }
    }

    fn failure(stderr: Vec<String>) -> Self {
        Self { exit_code: ExitCode::from(1), stdout: vec![], stderr }
    }
}

/// Run a CLI command.
pub async fn run(command: Command) -> CliOutput {
    let config = match load_config(Path::new(".env")) {
        Ok(config) => config,
        Err(e) => return CliOutput::failure(vec![format!("❌ {e}")]),
    };

    if let Err(e) = logging::init(&config.log_level, config.log_file.as_deref()) {
        eprintln!("Warning: could not set up logging: {e}");
    }
    tracing::info!(command = ?command, "starting taskchat v{}", crate::VERSION);

    let result = match command {
        Command::Chat => run_chat(&config).await,
        Command::Serve { host, port } => run_serve(config, host, port).await,
        Command::Ask { message } => run_ask(&config, &message.join(" ")).await,
    };

    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "fatal error");
        CliOutput::failure(vec![format!("❌ Fatal error: {e}")])
    })
}

fn load_config(dotenv: &Path) -> Result<AppConfig> {
    config::load_dotenv(dotenv)?;
    AppConfig::from_env()
}

/// Lines explaining why the configuration cannot be used.
pub(crate) fn config_error_lines(errors: &[String]) -> Vec<String> {
    let mut lines = vec![String::new(), "❌ Configuration Error:".to_string()];
    lines.extend(errors.iter().map(|e| format!("  - {e}")));
    lines.push(String::new());
    lines.push(format!("Please check your .env file and ensure {} is set.", config::API_KEY_VAR));
    lines
}

fn build_handler(config: &AppConfig) -> Result<MessageHandler> {
    tracing::info!(path = %config.database_path.display(), "opening task database");
    let repo = SqliteTaskRepository::open(&config.database_path)?;

    let client = OpenAiClient::new(config.openai_api_key.clone(), config.openai_model.clone())?;

    Ok(MessageHandler::new(Arc::new(repo), Arc::new(client)))
}

fn warn_invalid(config: &AppConfig) {
    for problem in config.validate() {
        tracing::warn!("configuration: {problem}");
    }
}

async fn run_chat(config: &AppConfig) -> Result<CliOutput> {
    let errors = config.validate();
    if !errors.is_empty() {
        tracing::error!(?errors, "configuration validation failed");
        return Ok(CliOutput::failure(config_error_lines(&errors)));
    }

    let handler = build_handler(config)?;
    let mut session = ChatSession::open(handler, config.preferences_path.clone())?;

    println!("{}", session::welcome_text(&config.database_path, &config.preferences_path));
    tracing::info!("chat session started");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut std::io::stdout()).await?;

    Ok(CliOutput::success(vec![]))
}

async fn run_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<CliOutput> {
    warn_invalid(&config);
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let handler = build_handler(&config)?;
    web::serve(AppState::new(handler), &config.static_dir, &config.bind_address()).await?;

    Ok(CliOutput::success(vec![]))
}

async fn run_ask(config: &AppConfig, message: &str) -> Result<CliOutput> {
    warn_invalid(config);
    let handler = build_handler(config)?;
    let reply = handler.handle(message).await?;
    Ok(CliOutput::success(vec![reply]))
}
