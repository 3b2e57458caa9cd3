use crate::core::errors::{AuditError, Result};
use crate::core::models::paging::{PageRequest, PaginatedList, SortCriteria};
use crate::core::query::{QueryParam, Row};
use crate::core::traits::session::AuditSession;

/// Runs a query one page at a time and records the total row count.
pub struct PaginatedLists;

impl PaginatedLists {
    /// Count the full result into `list.result_count`, then fetch the page
    /// described by `list.offset` and `list.limit`. Mapping the rows and
    /// setting `result_list` is left to the caller.
    pub fn execute_paginated_query<T>(
        session: &dyn AuditSession,
        list: &mut PaginatedList<T>,
        query: &QueryParam,
        sort: Option<&SortCriteria>,
    ) -> Result<Vec<Row>> {
        if let Some(sort) = sort {
            let selected = query.query.columns.len();
            if sort.column >= selected {
                return Err(AuditError::InvalidCriteria {
                    detail: format!(
                        "sort column {} out of range (query selects {selected} columns)",
                        sort.column
                    ),
                });
            }
        }
        query.validate()?;

        list.result_count = session.count(query)?;

        let page = PageRequest {
            sort: sort.copied(),
            offset: list.offset,
            limit: list.limit,
        };
        let rows = session.fetch(query, &page)?;

        tracing::debug!(
            total = list.result_count,
            offset = page.offset,
            limit = page.limit,
            fetched = rows.len(),
            "executed paginated query"
        );

        Ok(rows)
    }
}
