//! Interactive chat session for the terminal.
//!
//! Lines starting with `/` are session commands that read or change the
//! user's preferences. Everything else goes through the [`MessageHandler`].
//! Preference changes are written back to disk immediately.

use crate::chat::MessageHandler;
use crate::error::Result;
use crate::preferences::UserPreferences;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Prefix for every line the assistant prints.
const BOT_PREFIX: &str = "Chatbot: ";

/// Indent for continuation lines under [`BOT_PREFIX`].
const BOT_INDENT: &str = "         ";

/// Prompt shown before reading a line.
const PROMPT: &str = "You: ";

const GOODBYE: &str = "👋 Goodbye! Have a great day!";

/// Output of one session step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print, already formatted.
    pub lines: Vec<String>,
    /// Whether the session should end after printing.
    pub exit: bool,
}

impl Reply {
    fn say(text: impl AsRef<str>) -> Self {
        let lines = text
            .as_ref()
            .lines()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("{BOT_PREFIX}{line}")
                } else {
                    format!("{BOT_INDENT}{line}")
                }
            })
            .collect();
        Self { lines, exit: false }
    }

    fn block(lines: Vec<String>) -> Self {
        Self { lines, exit: false }
    }

    const fn silent() -> Self {
        Self { lines: Vec::new(), exit: false }
    }

    fn goodbye() -> Self {
        Self { lines: vec![String::new(), GOODBYE.to_string()], exit: true }
    }
}

/// Banner printed when the session starts.
#[must_use]
pub fn welcome_text(database_path: &Path, preferences_path: &Path) -> String {
    let rule = "=".repeat(60);
    format!(
        "\n{rule}\n🤖 AI Todo Chatbot v{version}\n{rule}\n\n\
         Welcome! I can help you manage your tasks.\n\
         Type your command or '/help' for assistance.\n\n\
         ✅ Database initialized at {db}\n\
         ✅ Preferences loaded from {prefs}\n",
        version = crate::VERSION,
        db = database_path.display(),
        prefs = preferences_path.display(),
    )
}

/// Text printed by `/help`.
#[must_use]
pub fn help_text() -> String {
    [
        "",
        "📚 Available Commands:",
        "  /help            - Show this help message",
        "  /voice on        - Enable voice input/output",
        "  /voice off       - Disable voice mode",
        "  /language <code> - Set preferred language (e.g., /language es)",
        "  /clear           - Clear conversation context",
        "  /settings        - View user preferences",
        "  /exit            - Quit the chatbot",
        "",
        "💡 Example Commands:",
        "  - Add task: buy groceries",
        "  - Show my tasks",
        "  - Mark task 1 as completed",
        "  - Delete task 2",
        "",
    ]
    .join("\n")
}

/// Text printed by `/settings`.
#[must_use]
pub fn settings_text(prefs: &UserPreferences) -> String {
    let enabled = |on: bool| if on { "Enabled" } else { "Disabled" };
    format!(
        "\n⚙️ Current Settings:\n\
         \x20 Language: {}\n\
         \x20 Voice Input: {}\n\
         \x20 Voice Output: {}\n\
         \x20 Display Format: {}\n\
         \x20 TTS Voice: {}\n",
        prefs.preferred_language.as_deref().unwrap_or("Auto-detect"),
        enabled(prefs.voice_input_enabled),
        enabled(prefs.voice_output_enabled),
        prefs.display_format,
        prefs.tts_voice,
    )
}

/// A terminal chat session bound to one preferences file.
#[derive(Debug)]
pub struct ChatSession {
    handler: MessageHandler,
    prefs: UserPreferences,
    prefs_path: PathBuf,
}

impl ChatSession {
    /// Create a session with already-loaded preferences.
    pub const fn new(handler: MessageHandler, prefs: UserPreferences, prefs_path: PathBuf) -> Self {
        Self { handler, prefs, prefs_path }
    }

    /// Load preferences from `prefs_path` and write them back, so a fresh
    /// install ends up with a defaults file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be read, parsed or written.
    pub fn open(handler: MessageHandler, prefs_path: impl Into<PathBuf>) -> Result<Self> {
        let prefs_path = prefs_path.into();
        tracing::info!(path = %prefs_path.display(), "loading user preferences");
        let prefs = UserPreferences::load_from_file(&prefs_path)?;
        prefs.save_to_file(&prefs_path)?;
        Ok(Self::new(handler, prefs, prefs_path))
    }

    /// Current preferences.
    pub const fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    /// Produce the reply to one input line.
    ///
    /// # Errors
    ///
    /// Returns an error if preferences cannot be saved or the task
    /// repository fails.
    pub async fn respond(&mut self, input: &str) -> Result<Reply> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Reply::silent());
        }
        if !input.starts_with('/') {
            return Ok(Reply::say(self.handler.handle(input).await?));
        }

        let (command, arg) = input.split_once(' ').unwrap_or((input, ""));
        let arg = arg.trim();
        tracing::debug!(command, "session command");

        match command {
            "/help" => Ok(Reply::block(vec![help_text()])),
            "/exit" => {
                tracing::info!("user exited session");
                Ok(Reply::goodbye())
            }
            "/settings" => Ok(Reply::block(vec![settings_text(&self.prefs)])),
            "/clear" => Ok(Reply::say("🧹 Conversation context cleared.")),
            "/voice" => self.voice(arg),
            "/language" => self.language(arg),
            other => Ok(Reply::say(format!(
                "Unknown command '{other}'. Type /help to see available commands."
            ))),
        }
    }

    fn voice(&mut self, arg: &str) -> Result<Reply> {
        let enabled = match arg.to_lowercase().as_str() {
            "on" => true,
            "off" => false,
            _ => return Ok(Reply::say("Invalid voice command. Use '/voice on' or '/voice off'.")),
        };

        self.prefs.set_voice(enabled);
        self.prefs.save_to_file(&self.prefs_path)?;
        Ok(Reply::say(if enabled { "🎤 Voice mode enabled." } else { "🔇 Voice mode disabled." }))
    }

    fn language(&mut self, arg: &str) -> Result<Reply> {
        if arg.is_empty() {
            return Ok(Reply::say("Usage: /language <code> (e.g., /language es)"));
        }

        let code = arg.to_lowercase();
        self.prefs.preferred_language = Some(code.clone());
        self.prefs.save_to_file(&self.prefs_path)?;
        Ok(Reply::say(format!("🌍 Language set to {code}")))
    }

    /// Run the read-eval-print loop until `/exit`, end of input or Ctrl-C.
    ///
    /// A failure while handling one line is printed and logged; the loop
    /// keeps going.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, reader: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = reader.lines();

        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("session interrupted");
                    None
                }
            };

            let Some(line) = line else {
                for text in Reply::goodbye().lines {
                    writeln!(out, "{text}")?;
                }
                return Ok(());
            };

            let reply = match self.respond(&line).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(error = %e, "error processing input");
                    Reply::say(format!(
                        "❌ An error occurred: {e}\nPlease try again or type /help for assistance."
                    ))
                }
            };

            for text in &reply.lines {
                writeln!(out, "{text}")?;
            }
            if reply.exit {
                return Ok(());
            }
        }
    }
}
