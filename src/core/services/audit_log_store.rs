use std::sync::Arc;

use crate::adapters::clock::system_clock::SystemClock;
use crate::adapters::ids::uuid_generator::UuidGenerator;
use crate::core::errors::{AuditError, Result};
use crate::core::models::audit_log::{AuditLog, AuditLogType};
use crate::core::models::audit_log_dto::AuditLogDto;
use crate::core::models::criteria::AuditLogCriteria;
use crate::core::models::paging::{PaginatedList, SortCriteria};
use crate::core::query::{Row, SqlValue};
use crate::core::services::criteria_query_builder::AuditLogQueryBuilder;
use crate::core::services::paginated_lists::PaginatedLists;
use crate::core::traits::clock::Clock;
use crate::core::traits::id_generator::IdGenerator;
use crate::core::traits::session::AuditSession;

/// Column names in select order, for error messages.
const COLUMN_NAMES: [&str; 6] = [
    "LOG_ID_C",
    "LOG_CREATEDATE_D",
    "LOG_IDENTITY_C",
    "LOG_CLASSENTITY_C",
    "LOG_TYPE_C",
    "LOG_MESSAGE_C",
];

/// Creates audit log entries and searches them.
///
/// Holds no per-request state. Every call takes the session it runs in,
/// so the caller decides the unit of work.
#[derive(Clone)]
pub struct AuditLogStore {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Default for AuditLogStore {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }
}

impl AuditLogStore {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Assign a fresh id and the current time to `entry`, persist it and
    /// return the id. Any caller-supplied id or date is overwritten.
    pub fn create(&self, session: &dyn AuditSession, entry: &mut AuditLog) -> Result<String> {
        entry.id = self.ids.next_id();
        entry.create_date = self.clock.now();

        session.persist(entry)?;

        tracing::debug!(
            id = %entry.id,
            entity_class = %entry.entity_class,
            entity_id = %entry.entity_id,
            log_type = %entry.log_type,
            "audit log created"
        );

        Ok(entry.id.clone())
    }

    /// Search entries matching `criteria`, one page at a time.
    ///
    /// On success `list.result_count` holds the total number of matches and
    /// `list.result_list` the mapped page. A row that cannot be mapped
    /// fails the whole read and leaves `result_list` untouched.
    pub fn find_by_criteria(
        &self,
        session: &dyn AuditSession,
        list: &mut PaginatedList<AuditLogDto>,
        criteria: &AuditLogCriteria,
        sort: Option<&SortCriteria>,
    ) -> Result<()> {
        let query = AuditLogQueryBuilder.build(criteria)?;
        let rows = PaginatedLists::execute_paginated_query(session, list, &query, sort)?;

        let dtos = rows
            .into_iter()
            .map(map_row)
            .collect::<Result<Vec<_>>>()?;

        list.result_list = dtos;
        Ok(())
    }
}

/// Map one `c0..c5` row into a DTO.
fn map_row(row: Row) -> Result<AuditLogDto> {
    if row.len() != COLUMN_NAMES.len() {
        return Err(AuditError::malformed(
            "row",
            format!("expected {} columns, got {}", COLUMN_NAMES.len(), row.len()),
        ));
    }

    let mut cells = row.into_iter();
    let mut next = || cells.next().unwrap_or(SqlValue::Null);

    let id = text(0, next())?;
    let create_timestamp = match next() {
        SqlValue::Timestamp(ts) => ts.timestamp_millis(),
        other => return Err(unexpected(1, "timestamp", &other)),
    };
    let entity_id = text(2, next())?;
    let entity_class = text(3, next())?;
    let log_type: AuditLogType = text(4, next())?.parse()?;
    let message = text(5, next())?;

    Ok(AuditLogDto {
        id,
        create_timestamp,
        entity_id,
        entity_class,
        log_type,
        message,
    })
}

fn text(index: usize, value: SqlValue) -> Result<String> {
    match value {
        SqlValue::Text(s) => Ok(s),
        other => Err(unexpected(index, "text", &other)),
    }
}

fn unexpected(index: usize, expected: &str, got: &SqlValue) -> AuditError {
    AuditError::malformed(
        COLUMN_NAMES[index],
        format!("expected {expected}, got {}", got.kind()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(type_tag: &str) -> Row {
        vec![
            SqlValue::from("L1"),
            SqlValue::Timestamp(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()),
            SqlValue::from("D1"),
            SqlValue::from("Document"),
            SqlValue::from(type_tag),
            SqlValue::from("hello"),
        ]
    }

    #[test]
    fn maps_columns_positionally() {
        let dto = map_row(row("UPDATE")).unwrap();
        assert_eq!(dto.id, "L1");
        assert_eq!(dto.create_timestamp, 1_700_000_000_123);
        assert_eq!(dto.entity_id, "D1");
        assert_eq!(dto.entity_class, "Document");
        assert_eq!(dto.log_type, AuditLogType::Update);
        assert_eq!(dto.message, "hello");
    }

    #[test]
    fn unknown_type_tag_is_malformed() {
        let err = map_row(row("ARCHIVE")).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MalformedStoredData { ref column, ref value } if column == "LOG_TYPE_C" && value == "ARCHIVE"
        ));
    }

    #[test]
    fn wrong_cell_kind_is_malformed() {
        let mut bad = row("CREATE");
        bad[1] = SqlValue::from("yesterday");
        let err = map_row(bad).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MalformedStoredData { ref column, .. } if column == "LOG_CREATEDATE_D"
        ));

        let mut bad = row("CREATE");
        bad[5] = SqlValue::Null;
        assert!(map_row(bad).is_err());
    }

    #[test]
    fn short_row_is_malformed() {
        let mut bad = row("CREATE");
        bad.pop();
        assert!(matches!(
            map_row(bad).unwrap_err(),
            AuditError::MalformedStoredData { .. }
        ));
    }
}
