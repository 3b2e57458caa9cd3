use serde::Serialize;

use super::audit_log::AuditLogType;

/// Read-side view of an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogDto {
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub create_timestamp: i64,
    pub entity_id: String,
    pub entity_class: String,
    #[serde(rename = "type")]
    pub log_type: AuditLogType,
    pub message: String,
}
