//! CLI argument definitions using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueHint};

/// Trip planner: companions, random seat pairs and rooms, expenses and settlement
#[derive(Parser, Debug)]
#[command(name = "tripmate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the trip store (overrides config)
    #[arg(long, global = true, env = "TRIPMATE_DATA_DIR", value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, show and delete trips
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },

    /// Random seat pairs
    Seats {
        #[command(subcommand)]
        command: SeatCommands,
    },

    /// Random room groups
    Rooms {
        #[command(subcommand)]
        command: RoomCommands,
    },

    /// Log and remove expenses
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },

    /// Show totals and who pays whom
    Settle {
        /// Trip id
        trip: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TripCommands {
    /// Create a trip
    New {
        /// Where to
        destination: String,
        /// Companion names (at least two)
        #[arg(num_args = 2.., required = true)]
        companions: Vec<String>,
    },

    /// List trips
    List,

    /// Show companions, seats, rooms and expense count
    Show {
        /// Trip id
        trip: String,
    },

    /// Delete a trip
    Delete {
        /// Trip id
        trip: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeatCommands {
    /// Draw new seat pairs
    Shuffle {
        /// Trip id
        trip: String,
    },

    /// Show current pairs
    Show {
        /// Trip id
        trip: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoomCommands {
    /// Draw new room groups
    Assign {
        /// Trip id
        trip: String,
        /// Number of rooms
        #[arg(short, long)]
        rooms: usize,
        /// Max people per room
        #[arg(short, long = "max")]
        max_per_room: usize,
    },

    /// Show current rooms
    Show {
        /// Trip id
        trip: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Log an expense
    Add {
        /// Trip id
        trip: String,
        /// Companion who paid
        #[arg(short, long)]
        member: String,
        /// Amount paid (positive number)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Category, e.g. food, transport
        #[arg(short, long, default_value = "")]
        tag: String,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Remove an expense by its index (see `expense list`)
    Remove {
        /// Trip id
        trip: String,
        /// Zero-based expense index
        index: usize,
    },

    /// List expenses per companion, newest first
    List {
        /// Trip id
        trip: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and store paths
    Path,
}
