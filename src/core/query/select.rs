use std::collections::BTreeMap;
use std::fmt::Write;

use super::expr::Expr;
use super::table::{ColumnRef, Table};
use super::value::SqlValue;
use crate::core::errors::{AuditError, Result};
use crate::core::models::paging::SortCriteria;

/// A single-table select with an optional filter. Selected columns are
/// aliased `c0`, `c1`, ... in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: Vec<ColumnRef>,
    pub from: Table,
    pub filter: Option<Expr>,
}

impl SelectQuery {
    pub fn to_sql(&self) -> String {
        let mut out = String::from("select ");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{column} c{i}");
        }
        let _ = write!(out, " from {} {}", self.from.name(), self.from.alias());
        if let Some(filter) = &self.filter {
            out.push_str(" where ");
            filter.write_sql(&mut out);
        }
        out
    }
}

/// A query plus its named parameter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub query: SelectQuery,
    pub parameters: BTreeMap<String, SqlValue>,
}

impl QueryParam {
    pub fn new(query: SelectQuery) -> Self {
        Self {
            query,
            parameters: BTreeMap::new(),
        }
    }

    pub fn bind(mut self, name: &str, value: impl Into<SqlValue>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&SqlValue> {
        self.parameters.get(name)
    }

    pub fn sql(&self) -> String {
        self.query.to_sql()
    }

    /// Row count over the whole result, before paging.
    pub fn count_sql(&self) -> String {
        format!("select count(*) from ({}) t1", self.sql())
    }

    /// Query text with ordering applied. Limit and offset are left to
    /// the driver.
    pub fn page_sql(&self, sort: Option<&SortCriteria>) -> String {
        let mut sql = self.sql();
        if let Some(sort) = sort {
            let direction = if sort.asc { "asc" } else { "desc" };
            let _ = write!(sql, " order by c{} {direction}", sort.column);
        }
        sql
    }

    /// Every placeholder in the filter must have a bound value.
    pub fn validate(&self) -> Result<()> {
        if let Some(filter) = &self.query.filter {
            for name in filter.parameters() {
                if !self.parameters.contains_key(&name) {
                    return Err(AuditError::persistence(format!(
                        "unbound query parameter :{name}"
                    )));
                }
            }
        }
        Ok(())
    }
}
