use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for attendlog
/// CLI application to log exam-attendance verification events with SQLite
#[derive(Parser)]
#[command(
    name = "attendlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Offline exam-attendance log: record, query and export student verification events",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Record a verification outcome for a student
    Record {
        /// External student identifier (as scanned or typed)
        student_id: String,

        /// Student display name at verification time
        full_name: String,

        #[arg(long = "eligible", help = "Student was found eligible")]
        eligible: bool,

        #[arg(
            long = "not-eligible",
            conflicts_with = "eligible",
            help = "Student was found not eligible"
        )]
        not_eligible: bool,

        #[arg(long = "year", help = "Academic year, e.g. 2024/2025 (default from config)")]
        year: Option<String>,

        #[arg(
            long = "method",
            help = "Verification method: exam-card or manual (default from config)"
        )]
        method: Option<String>,
    },

    /// List recorded verification events
    List {
        #[arg(long, help = "Only records on this date (YYYY-MM-DD), newest first")]
        date: Option<String>,

        #[arg(
            long,
            conflicts_with = "date",
            help = "Records in a range (YYYY[-MM[-DD]][:end]), oldest first"
        )]
        range: Option<String>,

        #[arg(long = "today", conflicts_with_all = ["date", "range"], help = "Only today's records")]
        now: bool,
    },

    /// Search records by student id or name (substring, max 100 rows)
    Search {
        query: String,
    },

    /// Show aggregate statistics
    Stats {
        #[arg(long, help = "Restrict detailed breakdowns to this date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Show breakdowns by status, method and hour of day")]
        detailed: bool,

        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },

    /// List the dates that have at least one record
    Dates,

    /// Export verification records for external report tooling
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete every record (irreversible)
    Clear {
        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Manage the database (integrity checks, maintenance, reset)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "reset",
            help = "Drop and recreate the schema, discarding every record"
        )]
        reset: bool,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt for --reset")]
        yes: bool,
    },
}
