pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use docs_audit::AuditLogType;

/// Record and search the audit trail of a document store.
#[derive(Parser, Debug)]
#[command(name = "docs-audit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config.toml, the log and the entity snapshot
    #[arg(long, global = true, env = "DOCS_AUDIT_DIR", default_value = ".docs-audit")]
    pub dir: PathBuf,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with a default config
    Init,

    /// Append an entry to the audit log
    Record {
        /// Entity class (Document, File, Acl, User, Tag, ...)
        #[arg(long)]
        entity_class: String,
        /// ID of the affected entity
        #[arg(long)]
        entity_id: String,
        /// Kind of change
        #[arg(long = "type", value_enum, ignore_case = true)]
        log_type: LogTypeArg,
        /// Free-text description
        #[arg(long)]
        message: String,
    },

    /// Show audit entries, newest first
    Log {
        /// Only entries about this document, its files and its ACLs
        #[arg(long)]
        document: Option<String>,
        /// Only entries about this user, their tags and their documents
        #[arg(long)]
        user: Option<String>,
        /// Page size (default from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Number of entries to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Column to sort by: 0 id, 1 date, 2 entity id, 3 class, 4 type, 5 message
        #[arg(long, default_value_t = 1)]
        sort: usize,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogTypeArg {
    Create,
    Update,
    Delete,
}

impl From<LogTypeArg> for AuditLogType {
    fn from(arg: LogTypeArg) -> Self {
        match arg {
            LogTypeArg::Create => AuditLogType::Create,
            LogTypeArg::Update => AuditLogType::Update,
            LogTypeArg::Delete => AuditLogType::Delete,
        }
    }
}
