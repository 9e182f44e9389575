//! Command-line interface for taskchat.
//!
//! The binary is a thin wrapper: arguments are parsed here and every
//! command runs through [`run`], which returns the output to print.

mod run;

#[cfg(test)]
mod tests;

pub use run::{run, CliOutput};

use clap::{Parser, Subcommand};

/// Task-tracking chat assistant.
///
/// Settings come from the environment (and a `.env` file in the working
/// directory): `OPENAI_API_KEY` plus `TASKCHAT_*` variables.
#[derive(Parser, Debug)]
#[command(name = "taskchat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive chat session in the terminal.
    ///
    /// Type `/help` inside the session for the list of commands.
    Chat,

    /// Run the HTTP API and serve the web frontend.
    Serve {
        /// Address to bind (overrides `TASKCHAT_HOST`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `TASKCHAT_PORT` and `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Handle a single message and print the reply.
    Ask {
        /// The message, e.g. "add task: buy milk"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}
