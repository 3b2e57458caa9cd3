use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use docs_audit::adapters::jsonl::jsonl_session::JsonlSession;
use docs_audit::config::app_config::AppConfig;
use docs_audit::{
    AuditError, AuditLogCriteria, AuditLogDto, AuditLogStore, AuditLogType, PaginatedList, Result,
    SortCriteria,
};

use crate::cli::output;

/// Flags of the `log` command.
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub document: Option<String>,
    pub user: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
    pub sort: usize,
    pub asc: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct PageView<'a> {
    total: u64,
    offset: usize,
    limit: usize,
    entries: &'a [AuditLogDto],
}

/// Execute the `docs-audit log` command.
///
/// Displays one page of the audit log, optionally scoped to a document
/// and/or a user.
pub fn execute(data_dir: &Path, opts: LogOptions) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let session = JsonlSession::from_config(data_dir, &config.audit);
    let store = AuditLogStore::default();

    let limit = opts.limit.unwrap_or(config.audit.page_size);
    if limit == 0 {
        return Err(AuditError::InvalidCriteria {
            detail: "--limit must be greater than 0".into(),
        });
    }

    let criteria = AuditLogCriteria {
        document_id: opts.document.clone(),
        user_id: opts.user.clone(),
    };
    let sort = SortCriteria::new(opts.sort, opts.asc);
    let mut list = PaginatedList::new(limit, opts.offset);

    store.find_by_criteria(&session, &mut list, &criteria, Some(&sort))?;

    if opts.json {
        let view = PageView {
            total: list.result_count,
            offset: list.offset,
            limit: list.limit,
            entries: &list.result_list,
        };
        let json = serde_json::to_string_pretty(&view).map_err(|e| AuditError::Persistence {
            detail: format!("Failed to serialize result page: {e}"),
        })?;
        println!("{json}");
        return Ok(());
    }

    if list.result_list.is_empty() {
        output::header("docs-audit log");
        output::warning("No audit entries found");
        if opts.document.is_some() || opts.user.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    output::header(&format!(
        "docs-audit log ({} of {} entries)",
        list.result_list.len(),
        list.result_count
    ));
    println!();

    for entry in &list.result_list {
        print_entry(entry);
    }

    Ok(())
}

/// Print a single audit entry as a formatted row.
fn print_entry(entry: &AuditLogDto) {
    let date = DateTime::<Utc>::from_timestamp_millis(entry.create_timestamp)
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.create_timestamp.to_string());

    println!(
        "  {} {} {:<6} {:<8} {} {}",
        date.dimmed(),
        "│".dimmed(),
        format_type(entry.log_type),
        entry.entity_class,
        entry.entity_id,
        entry.message.dimmed(),
    );
}

fn format_type(log_type: AuditLogType) -> String {
    match log_type {
        AuditLogType::Create => "create".green().to_string(),
        AuditLogType::Update => "update".blue().to_string(),
        AuditLogType::Delete => "delete".red().to_string(),
    }
}
