use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::AuditError;

/// Kind of change recorded by an audit log entry.
///
/// Stored by its symbolic name. The set is closed: a stored name outside
/// of it is a schema mismatch, not an unknown-but-valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditLogType {
    Create,
    Update,
    Delete,
}

impl AuditLogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLogType::Create => "CREATE",
            AuditLogType::Update => "UPDATE",
            AuditLogType::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditLogType {
    type Err = AuditError;

    /// Exact, case-sensitive match on the stored name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditLogType::Create),
            "UPDATE" => Ok(AuditLogType::Update),
            "DELETE" => Ok(AuditLogType::Delete),
            other => Err(AuditError::malformed("LOG_TYPE_C", other)),
        }
    }
}

/// Entity classes the visibility rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Document,
    File,
    Acl,
    User,
    Tag,
}

impl EntityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityClass::Document => "Document",
            EntityClass::File => "File",
            EntityClass::Acl => "Acl",
            EntityClass::User => "User",
            EntityClass::Tag => "Tag",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One change event against an entity. Immutable once created.
///
/// `id` and `create_date` are placeholders until the store assigns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub create_date: DateTime<Utc>,
    pub entity_id: String,
    /// Usually one of [`EntityClass`], but other classes may be recorded.
    pub entity_class: String,
    #[serde(rename = "type")]
    pub log_type: AuditLogType,
    pub message: String,
}

impl AuditLog {
    pub fn new(
        entity_id: impl Into<String>,
        entity_class: impl Into<String>,
        log_type: AuditLogType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            create_date: DateTime::<Utc>::UNIX_EPOCH,
            entity_id: entity_id.into(),
            entity_class: entity_class.into(),
            log_type,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_type_names() {
        assert_eq!("CREATE".parse::<AuditLogType>().unwrap(), AuditLogType::Create);
        assert_eq!("UPDATE".parse::<AuditLogType>().unwrap(), AuditLogType::Update);
        assert_eq!("DELETE".parse::<AuditLogType>().unwrap(), AuditLogType::Delete);
    }

    #[test]
    fn rejects_unknown_or_miscased_type_names() {
        for bad in ["create", "Create", "RENAME", ""] {
            let err = bad.parse::<AuditLogType>().unwrap_err();
            assert!(
                matches!(err, AuditError::MalformedStoredData { ref column, .. } if column == "LOG_TYPE_C"),
                "unexpected error for {bad:?}: {err}"
            );
        }
    }

    #[test]
    fn type_serializes_by_symbolic_name() {
        let json = serde_json::to_string(&AuditLogType::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }

    #[test]
    fn new_entry_has_placeholder_identity() {
        let entry = AuditLog::new("D1", EntityClass::Document.as_str(), AuditLogType::Create, "x");
        assert!(entry.id.is_empty());
        assert_eq!(entry.entity_class, "Document");
        assert_eq!(entry.create_date.timestamp_millis(), 0);
    }
}
