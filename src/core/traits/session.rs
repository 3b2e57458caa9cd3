use crate::core::errors::Result;
use crate::core::models::audit_log::AuditLog;
use crate::core::models::paging::PageRequest;
use crate::core::query::{QueryParam, Row};

/// Port for the persistence session an operation runs in.
///
/// The session is the unit of work: whatever transaction it carries is
/// owned by the caller, never by the store.
pub trait AuditSession: Send + Sync {
    /// Durably insert an entry.
    fn persist(&self, entry: &AuditLog) -> Result<()>;

    /// Count all rows matching the query, ignoring paging.
    fn count(&self, query: &QueryParam) -> Result<u64>;

    /// Fetch one page of rows, columns in select order.
    fn fetch(&self, query: &QueryParam, page: &PageRequest) -> Result<Vec<Row>>;
}
