//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "weightlog")]
#[command(about = "Personal weight and biometric tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new weight log
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Default range for stats (weekly, monthly, yearly, all)
        #[arg(short, long, default_value = "weekly")]
        range: String,
    },

    /// Record a weight in kg
    Add {
        /// Weight in kg
        #[arg(allow_negative_numbers = true)]
        weight: f64,

        /// Day of the measurement (today, yesterday, monday, last friday, YYYY-MM-DD)
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// List recorded weights, newest first
    List {
        /// Maximum number of entries (default: history_limit from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Delete the weight recorded for a day
    Delete {
        /// Day of the entry
        date: String,

        /// Weight of the entry (matched within 0.001 kg)
        #[arg(allow_negative_numbers = true)]
        weight: f64,
    },

    /// Import biometric records from a CSV file
    Import {
        /// CSV file with a date,weight,bodyFat,muscleMass,bmi header
        file: PathBuf,

        /// Merge into the stored records instead of replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Show statistics, chart and biometric indicators
    Stats {
        /// Range for the chart and total change (weekly, monthly, yearly, all)
        #[arg(short, long)]
        range: Option<String>,

        /// Number of most recent weights to load (default: history_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
