use std::path::Path;

use docs_audit::adapters::jsonl::jsonl_session::JsonlSession;
use docs_audit::config::app_config::AppConfig;
use docs_audit::{AuditLog, AuditLogStore, AuditLogType, Result};

use crate::cli::output;

/// Execute the `docs-audit record` command.
pub fn execute(
    data_dir: &Path,
    entity_class: &str,
    entity_id: &str,
    log_type: AuditLogType,
    message: &str,
) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let session = JsonlSession::from_config(data_dir, &config.audit);
    let store = AuditLogStore::default();

    let mut entry = AuditLog::new(entity_id, entity_class, log_type, message);
    let id = store.create(&session, &mut entry)?;

    output::success(&format!("Recorded {log_type} on {entity_class} {entity_id}"));
    output::field("id", &id);
    output::field("date", &entry.create_date.format("%Y-%m-%d %H:%M:%S").to_string());
    Ok(())
}
