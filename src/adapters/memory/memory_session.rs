use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::core::errors::{AuditError, Result};
use crate::core::models::audit_log::AuditLog;
use crate::core::models::paging::PageRequest;
use crate::core::query::table::LOG_ID;
use crate::core::query::{ColumnRef, Expr, Operand, QueryParam, Row, SqlValue, Table};
use crate::core::traits::session::AuditSession;

/// Session over in-process tables.
///
/// Evaluates the query tree directly, with SQL semantics for NULL and
/// named parameters. Rows are stored in each table's physical column
/// order. Writes are visible immediately; there is no transaction.
#[derive(Default)]
pub struct MemorySession {
    tables: RwLock<BTreeMap<Table, Vec<Row>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&self, id: &str, owner_id: &str) {
        self.insert(Table::Document, vec![id.into(), owner_id.into()]);
    }

    pub fn add_file(&self, id: &str, document_id: &str) {
        self.insert(Table::File, vec![id.into(), document_id.into()]);
    }

    pub fn add_acl(&self, id: &str, source_id: &str) {
        self.insert(Table::Acl, vec![id.into(), source_id.into()]);
    }

    /// Delete an ACL row. Returns whether it existed.
    pub fn remove_acl(&self, id: &str) -> bool {
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(&Table::Acl) else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| row.first().and_then(SqlValue::as_text) != Some(id));
        rows.len() != before
    }

    pub fn add_tag(&self, id: &str, owner_id: &str) {
        self.insert(Table::Tag, vec![id.into(), owner_id.into()]);
    }

    /// Insert a log row as stored, with the type column taken verbatim.
    pub fn insert_raw_log(
        &self,
        id: &str,
        create_date: DateTime<Utc>,
        entity_id: &str,
        entity_class: &str,
        type_tag: &str,
        message: &str,
    ) {
        self.insert(
            Table::AuditLog,
            vec![
                id.into(),
                create_date.into(),
                entity_id.into(),
                entity_class.into(),
                type_tag.into(),
                message.into(),
            ],
        );
    }

    /// Number of rows in a table.
    pub fn len(&self, table: Table) -> usize {
        self.tables.read().get(&table).map_or(0, Vec::len)
    }

    fn insert(&self, table: Table, row: Row) {
        self.tables.write().entry(table).or_default().push(row);
    }

    /// Projected rows matching the query, in insertion order.
    fn select(&self, query: &QueryParam) -> Result<Vec<Row>> {
        let tables = self.tables.read();
        let eval = Evaluator {
            tables: &*tables,
            query,
        };
        let select = &query.query;
        let mut out = Vec::new();

        for row in tables.get(&select.from).map(Vec::as_slice).unwrap_or(&[]) {
            let scope = Scope {
                table: select.from,
                row,
                parent: None,
            };
            let matched = match &select.filter {
                Some(filter) => eval.eval(filter, &scope)?,
                None => true,
            };
            if matched {
                let projected = select
                    .columns
                    .iter()
                    .map(|c| scope.lookup(c).cloned())
                    .collect::<Result<Row>>()?;
                out.push(projected);
            }
        }
        Ok(out)
    }
}

impl AuditSession for MemorySession {
    fn persist(&self, entry: &AuditLog) -> Result<()> {
        let mut tables = self.tables.write();
        let rows = tables.entry(Table::AuditLog).or_default();
        if rows
            .iter()
            .any(|row| row.first().and_then(SqlValue::as_text) == Some(entry.id.as_str()))
        {
            return Err(AuditError::persistence(format!(
                "unique constraint violated on {LOG_ID}: {}",
                entry.id
            )));
        }
        rows.push(vec![
            entry.id.clone().into(),
            entry.create_date.into(),
            entry.entity_id.clone().into(),
            entry.entity_class.clone().into(),
            entry.log_type.as_str().into(),
            entry.message.clone().into(),
        ]);
        Ok(())
    }

    fn count(&self, query: &QueryParam) -> Result<u64> {
        Ok(self.select(query)?.len() as u64)
    }

    fn fetch(&self, query: &QueryParam, page: &PageRequest) -> Result<Vec<Row>> {
        let mut rows = self.select(query)?;
        if let Some(sort) = page.sort {
            let column = sort.column;
            if column >= query.query.columns.len() {
                return Err(AuditError::persistence(format!(
                    "order by column c{column} does not exist"
                )));
            }
            // stable, so ties keep insertion order
            if sort.asc {
                rows.sort_by(|a, b| compare(&a[column], &b[column]));
            } else {
                rows.sort_by(|a, b| compare(&b[column], &a[column]));
            }
        }
        Ok(rows.into_iter().skip(page.offset).take(page.limit).collect())
    }
}

/// Row being evaluated, chained to the enclosing query's row inside a
/// subquery.
struct Scope<'a> {
    table: Table,
    row: &'a [SqlValue],
    parent: Option<&'a Scope<'a>>,
}

impl Scope<'_> {
    fn lookup(&self, column: &ColumnRef) -> Result<&SqlValue> {
        if column.table == self.table {
            return column
                .table
                .column_index(column.column)
                .and_then(|i| self.row.get(i))
                .ok_or_else(|| AuditError::persistence(format!("no such column {column}")));
        }
        match self.parent {
            Some(parent) => parent.lookup(column),
            None => Err(AuditError::persistence(format!(
                "column {column} is not in scope"
            ))),
        }
    }
}

struct Evaluator<'a> {
    tables: &'a BTreeMap<Table, Vec<Row>>,
    query: &'a QueryParam,
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Expr, scope: &Scope<'_>) -> Result<bool> {
        match expr {
            Expr::And(items) => {
                for item in items {
                    if !self.eval(item, scope)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Expr::Or(items) => {
                for item in items {
                    if self.eval(item, scope)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expr::Eq(left, right) => {
                let left = self.operand(left, scope)?;
                let right = self.operand(right, scope)?;
                Ok(left.sql_eq(&right))
            }
            Expr::InSubquery { column, subquery } => {
                let needle = scope.lookup(column)?;
                let table = subquery.select.table;
                for row in self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[]) {
                    let inner = Scope {
                        table,
                        row,
                        parent: Some(scope),
                    };
                    if self.eval(&subquery.filter, &inner)?
                        && inner.lookup(&subquery.select)?.sql_eq(needle)
                    {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn operand(&self, operand: &Operand, scope: &Scope<'_>) -> Result<SqlValue> {
        match operand {
            Operand::Column(column) => scope.lookup(column).cloned(),
            Operand::Param(name) => self
                .query
                .parameter(name)
                .cloned()
                .ok_or_else(|| AuditError::persistence(format!("unbound query parameter :{name}"))),
            Operand::Literal(literal) => Ok(SqlValue::from(*literal)),
        }
    }
}

/// NULLs sort first; values of different kinds sort by kind.
fn compare(a: &SqlValue, b: &SqlValue) -> Ordering {
    match (a, b) {
        (SqlValue::Text(a), SqlValue::Text(b)) => a.cmp(b),
        (SqlValue::Timestamp(a), SqlValue::Timestamp(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &SqlValue) -> u8 {
    match value {
        SqlValue::Null => 0,
        SqlValue::Text(_) => 1,
        SqlValue::Timestamp(_) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_log::AuditLogType;
    use crate::core::models::paging::SortCriteria;
    use crate::core::query::SelectQuery;
    use crate::core::query::table::{DOC_ID, DOC_IDUSER, FIL_ID, FIL_IDDOC, LOG_IDENTITY};

    fn entry(id: &str, entity_id: &str) -> AuditLog {
        let mut e = AuditLog::new(entity_id, "Document", AuditLogType::Create, "m");
        e.id = id.to_string();
        e.create_date = Utc::now();
        e
    }

    fn select_documents(filter: Option<Expr>) -> QueryParam {
        QueryParam::new(SelectQuery {
            columns: vec![Table::Document.col(DOC_ID)],
            from: Table::Document,
            filter,
        })
    }

    #[test]
    fn duplicate_id_violates_constraint() {
        let session = MemorySession::new();
        session.persist(&entry("L1", "D1")).unwrap();
        let err = session.persist(&entry("L1", "D2")).unwrap_err();
        assert!(matches!(err, AuditError::Persistence { .. }));
        assert_eq!(session.len(Table::AuditLog), 1);
    }

    #[test]
    fn filters_with_bound_parameters() {
        let session = MemorySession::new();
        session.add_document("D1", "U1");
        session.add_document("D2", "U2");

        let q = select_documents(Some(Table::Document.col(DOC_IDUSER).eq_param("owner")))
            .bind("owner", "U2");
        let rows = session.fetch(&q, &PageRequest { sort: None, offset: 0, limit: 10 }).unwrap();
        assert_eq!(rows, vec![vec![SqlValue::from("D2")]]);
    }

    #[test]
    fn unbound_parameter_is_an_error() {
        let session = MemorySession::new();
        session.add_document("D1", "U1");
        let q = select_documents(Some(Table::Document.col(DOC_IDUSER).eq_param("owner")));
        assert!(session.count(&q).is_err());
    }

    #[test]
    fn subquery_matches_membership() {
        let session = MemorySession::new();
        session.add_file("F1", "D1");
        session.add_file("F2", "D2");
        session.persist(&entry("L1", "F1")).unwrap();
        session.persist(&entry("L2", "F2")).unwrap();

        let q = QueryParam::new(SelectQuery {
            columns: vec![Table::AuditLog.col(LOG_ID)],
            from: Table::AuditLog,
            filter: Some(Table::AuditLog.col(LOG_IDENTITY).in_subquery(
                Table::File.col(FIL_ID),
                Table::File.col(FIL_IDDOC).eq_param("doc"),
            )),
        })
        .bind("doc", "D1");

        assert_eq!(session.count(&q).unwrap(), 1);
    }

    #[test]
    fn null_cells_never_match() {
        let session = MemorySession::new();
        session.insert(Table::Document, vec![SqlValue::Null, SqlValue::Null]);
        let q = select_documents(Some(Expr::Eq(
            Operand::Column(Table::Document.col(DOC_ID)),
            Operand::Column(Table::Document.col(DOC_IDUSER)),
        )));
        assert_eq!(session.count(&q).unwrap(), 0);
    }

    #[test]
    fn removing_acl_reports_existence() {
        let session = MemorySession::new();
        session.add_acl("A1", "D1");
        assert!(session.remove_acl("A1"));
        assert!(!session.remove_acl("A1"));
        assert_eq!(session.len(Table::Acl), 0);
    }

    #[test]
    fn sorts_and_pages() {
        let session = MemorySession::new();
        for id in ["D3", "D1", "D2"] {
            session.add_document(id, "U1");
        }
        let q = select_documents(None);
        let page = PageRequest {
            sort: Some(SortCriteria::new(0, true)),
            offset: 1,
            limit: 1,
        };
        assert_eq!(session.fetch(&q, &page).unwrap(), vec![vec![SqlValue::from("D2")]]);
    }
}
