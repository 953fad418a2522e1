//! CLI command definitions for the `afya` binary.
//!
//! Uses clap derive macros. Two surfaces: the interactive `chat` loop and
//! verb-noun session management (`afya sessions list`, `afya sessions
//! delete <id>`).

pub mod chat;
pub mod sessions;

use clap::{Parser, Subcommand};

/// Chat with the assistant and manage conversation history.
#[derive(Parser)]
#[command(name = "afya", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Owner id to act as (normally supplied by the identity provider).
    #[arg(long, env = "AFYA_OWNER", default_value = "local-user")]
    pub owner: String,

    /// Use an in-process store instead of the remote document store.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Emit JSON logs instead of human-readable ones.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Resume an existing session by id.
        #[arg(long)]
        session: Option<String>,
    },

    /// Manage stored sessions.
    Sessions {
        #[command(subcommand)]
        action: SessionsCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List sessions, most recently updated first.
    #[command(alias = "ls")]
    List,

    /// Delete a session and all its messages.
    #[command(alias = "rm")]
    Delete {
        /// Session id to delete.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
