//! Tests for the CLI module.

use super::run::config_error_lines;
use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_chat() {
    let cli = Cli::try_parse_from(["taskchat", "chat"]).unwrap();
    assert_eq!(cli.command, Command::Chat);
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["taskchat", "serve"]).unwrap();
    assert_eq!(cli.command, Command::Serve { host: None, port: None });
}

#[test]
fn test_parse_serve_overrides() {
    let cli =
        Cli::try_parse_from(["taskchat", "serve", "--host", "0.0.0.0", "--port", "9000"]).unwrap();
    assert_eq!(cli.command, Command::Serve { host: Some("0.0.0.0".to_string()), port: Some(9000) });
}

#[test]
fn test_parse_serve_rejects_bad_port() {
    assert!(Cli::try_parse_from(["taskchat", "serve", "--port", "http"]).is_err());
}

#[test]
fn test_parse_ask_joins_words() {
    let cli = Cli::try_parse_from(["taskchat", "ask", "add", "task:", "buy", "milk"]).unwrap();
    let Command::Ask { message } = cli.command else {
        panic!("expected ask command");
    };
    assert_eq!(message.join(" "), "add task: buy milk");
}

#[test]
fn test_parse_ask_requires_message() {
    assert!(Cli::try_parse_from(["taskchat", "ask"]).is_err());
}

#[test]
fn test_parse_unknown_command() {
    assert!(Cli::try_parse_from(["taskchat", "frobnicate"]).is_err());
}

#[test]
fn test_config_error_lines_list_every_problem() {
    let lines = config_error_lines(&["first".to_string(), "second".to_string()]);
    assert_eq!(
        lines,
        vec![
            String::new(),
            "❌ Configuration Error:".to_string(),
            "  - first".to_string(),
            "  - second".to_string(),
            String::new(),
            "Please check your .env file and ensure OPENAI_API_KEY is set.".to_string(),
        ]
    );
}
