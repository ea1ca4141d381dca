//! Command-line interface definition.

use std::path::PathBuf;

use caterfind_api::OwnerId;
use caterfind_core::{DateKey, EventId, YearMonth};
use clap::{Parser, Subcommand};

/// caterfind - Caterer availability calendar
#[derive(Debug, Parser)]
#[command(name = "caterfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "CATERFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Caterer whose calendar is used
    #[arg(long, global = true, env = "CATERFIND_OWNER")]
    pub owner: Option<OwnerId>,

    /// Base URL of the caterfind server
    #[arg(long, global = true, env = "CATERFIND_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Use an empty in-memory calendar instead of the server
    #[arg(long, global = true)]
    pub offline: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a month of availability
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current one
        #[arg(long)]
        month: Option<YearMonth>,

        /// Client view: statuses only, no past days or selection
        #[arg(long)]
        read_only: bool,

        /// Omit the title and back link (read-only view)
        #[arg(long, requires = "read_only")]
        embedded: bool,

        /// Highlight a selected day and list its events
        #[arg(long, conflicts_with = "read_only")]
        select: Option<DateKey>,
    },

    /// Cycle a day's status: neutral, available, busy, neutral
    Toggle {
        /// Day to toggle (YYYY-MM-DD)
        date: DateKey,
    },

    /// Event commands
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events
    List {
        /// Only events on this day
        #[arg(long, conflicts_with_all = ["from", "to"])]
        date: Option<DateKey>,

        /// Start of an inclusive range
        #[arg(long, requires = "to")]
        from: Option<DateKey>,

        /// End of an inclusive range
        #[arg(long, requires = "from")]
        to: Option<DateKey>,
    },

    /// Add an event on a day
    Add {
        /// Day of the event (YYYY-MM-DD)
        date: DateKey,

        /// Event host name
        #[arg(long)]
        host: String,

        /// Person managing the event
        #[arg(long)]
        managed_by: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete an event
    Delete {
        id: EventId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
