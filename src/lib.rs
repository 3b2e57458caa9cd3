//! Append-only audit trail for a document-management system.
//!
//! Entries record a change (create, update, delete) against a document,
//! file, ACL entry, user or tag. Searches are scoped by document and/or
//! by user through [`AuditLogCriteria`] and run one page at a time.
//!
//! ```no_run
//! use docs_audit::{AuditLog, AuditLogCriteria, AuditLogStore, AuditLogType, PaginatedList};
//! use docs_audit::adapters::memory::memory_session::MemorySession;
//!
//! # fn main() -> docs_audit::Result<()> {
//! let session = MemorySession::new();
//! let store = AuditLogStore::default();
//!
//! let mut entry = AuditLog::new("D1", "Document", AuditLogType::Create, "created");
//! let id = store.create(&session, &mut entry)?;
//!
//! let mut page = PaginatedList::default_page();
//! store.find_by_criteria(&session, &mut page, &AuditLogCriteria::new().with_document("D1"), None)?;
//! assert_eq!(page.result_list[0].id, id);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;

pub use crate::core::errors::{AuditError, Result};
pub use crate::core::models::audit_log::{AuditLog, AuditLogType, EntityClass};
pub use crate::core::models::audit_log_dto::AuditLogDto;
pub use crate::core::models::criteria::AuditLogCriteria;
pub use crate::core::models::paging::{PageRequest, PaginatedList, SortCriteria};
pub use crate::core::services::audit_log_store::AuditLogStore;
pub use crate::core::services::criteria_query_builder::AuditLogQueryBuilder;
pub use crate::core::traits::session::AuditSession;
