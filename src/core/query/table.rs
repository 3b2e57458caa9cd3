use std::fmt;

/// Tables the audit search reads from. Names, aliases and columns are
/// fixed; nothing here is ever derived from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    AuditLog,
    Document,
    File,
    Acl,
    Tag,
}

pub const LOG_ID: &str = "LOG_ID_C";
pub const LOG_CREATEDATE: &str = "LOG_CREATEDATE_D";
pub const LOG_IDENTITY: &str = "LOG_IDENTITY_C";
pub const LOG_CLASSENTITY: &str = "LOG_CLASSENTITY_C";
pub const LOG_TYPE: &str = "LOG_TYPE_C";
pub const LOG_MESSAGE: &str = "LOG_MESSAGE_C";

pub const DOC_ID: &str = "DOC_ID_C";
pub const DOC_IDUSER: &str = "DOC_IDUSER_C";
pub const FIL_ID: &str = "FIL_ID_C";
pub const FIL_IDDOC: &str = "FIL_IDDOC_C";
pub const ACL_ID: &str = "ACL_ID_C";
pub const ACL_SOURCEID: &str = "ACL_SOURCEID_C";
pub const TAG_ID: &str = "TAG_ID_C";
pub const TAG_IDUSER: &str = "TAG_IDUSER_C";

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::AuditLog => "T_AUDIT_LOG",
            Table::Document => "T_DOCUMENT",
            Table::File => "T_FILE",
            Table::Acl => "T_ACL",
            Table::Tag => "T_TAG",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Table::AuditLog => "l",
            Table::Document => "d",
            Table::File => "f",
            Table::Acl => "a",
            Table::Tag => "t",
        }
    }

    /// Physical column order. Row storage in adapters follows it.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::AuditLog => &[
                LOG_ID,
                LOG_CREATEDATE,
                LOG_IDENTITY,
                LOG_CLASSENTITY,
                LOG_TYPE,
                LOG_MESSAGE,
            ],
            Table::Document => &[DOC_ID, DOC_IDUSER],
            Table::File => &[FIL_ID, FIL_IDDOC],
            Table::Acl => &[ACL_ID, ACL_SOURCEID],
            Table::Tag => &[TAG_ID, TAG_IDUSER],
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns().iter().position(|c| *c == column)
    }

    /// Reference a column of this table. Panics on a name the table does
    /// not have, which can only be a programming error since names are
    /// constants.
    pub fn col(self, column: &'static str) -> ColumnRef {
        assert!(
            self.column_index(column).is_some(),
            "{} has no column {column}",
            self.name()
        );
        ColumnRef {
            table: self,
            column,
        }
    }
}

/// A qualified column, rendered as `alias.COLUMN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Table,
    pub column: &'static str,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table.alias(), self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_renders_with_alias() {
        assert_eq!(Table::File.col(FIL_IDDOC).to_string(), "f.FIL_IDDOC_C");
        assert_eq!(Table::AuditLog.col(LOG_ID).to_string(), "l.LOG_ID_C");
    }

    #[test]
    fn audit_log_column_order_is_fixed() {
        assert_eq!(Table::AuditLog.column_index(LOG_ID), Some(0));
        assert_eq!(Table::AuditLog.column_index(LOG_MESSAGE), Some(5));
        assert_eq!(Table::AuditLog.column_index(DOC_ID), None);
    }

    #[test]
    #[should_panic(expected = "has no column")]
    fn foreign_column_is_rejected() {
        let _ = Table::Tag.col(DOC_ID);
    }
}
