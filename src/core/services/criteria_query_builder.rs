use crate::core::errors::{AuditError, Result};
use crate::core::models::audit_log::EntityClass;
use crate::core::models::criteria::AuditLogCriteria;
use crate::core::query::table::{
    ACL_ID, ACL_SOURCEID, DOC_ID, DOC_IDUSER, FIL_ID, FIL_IDDOC, LOG_CLASSENTITY, LOG_CREATEDATE,
    LOG_ID, LOG_IDENTITY, LOG_MESSAGE, LOG_TYPE, TAG_ID, TAG_IDUSER,
};
use crate::core::query::{ColumnRef, Expr, QueryParam, SelectQuery, Table};

pub const DOCUMENT_ID_PARAM: &str = "documentId";
pub const USER_ID_PARAM: &str = "userId";

/// Turns [`AuditLogCriteria`] into a parameterized query over the audit
/// log table.
pub struct AuditLogQueryBuilder;

impl AuditLogQueryBuilder {
    /// The six selected columns, in the order rows are mapped.
    pub fn columns() -> Vec<ColumnRef> {
        [
            LOG_ID,
            LOG_CREATEDATE,
            LOG_IDENTITY,
            LOG_CLASSENTITY,
            LOG_TYPE,
            LOG_MESSAGE,
        ]
        .into_iter()
        .map(|c| Table::AuditLog.col(c))
        .collect()
    }

    /// Build the search query.
    ///
    /// - document scope: the document itself, its files and its ACL entries
    /// - user scope: the user, their tags and the documents they own
    ///
    /// Both scopes set means both must match. Unset criteria add nothing.
    pub fn build(&self, criteria: &AuditLogCriteria) -> Result<QueryParam> {
        let mut clauses = Vec::new();
        let mut bindings = Vec::new();

        if let Some(document_id) = &criteria.document_id {
            require_identifier("document id", document_id)?;
            // Read access to the document is checked by the caller
            clauses.push(Self::document_visibility(DOCUMENT_ID_PARAM));
            bindings.push((DOCUMENT_ID_PARAM, document_id.clone()));
        }

        if let Some(user_id) = &criteria.user_id {
            require_identifier("user id", user_id)?;
            clauses.push(Self::user_visibility(USER_ID_PARAM));
            bindings.push((USER_ID_PARAM, user_id.clone()));
        }

        let filter = match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Expr::And(clauses)),
        };

        let mut query_param = QueryParam::new(SelectQuery {
            columns: Self::columns(),
            from: Table::AuditLog,
            filter,
        });
        for (name, value) in bindings {
            query_param = query_param.bind(name, value);
        }

        tracing::debug!(
            sql = %query_param.sql(),
            params = ?query_param.parameters.keys().collect::<Vec<_>>(),
            "built audit log query"
        );

        Ok(query_param)
    }

    /// Entries about the document, one of its files, or one of its ACL
    /// entries. `param` names the bound document id.
    pub fn document_visibility(param: &str) -> Expr {
        let log = Table::AuditLog;
        Expr::Or(vec![
            Expr::And(vec![
                log.col(LOG_IDENTITY).eq_param(param),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::Document.as_str()),
            ]),
            Expr::And(vec![
                log.col(LOG_IDENTITY)
                    .in_subquery(Table::File.col(FIL_ID), Table::File.col(FIL_IDDOC).eq_param(param)),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::File.as_str()),
            ]),
            Expr::And(vec![
                log.col(LOG_IDENTITY).in_subquery(
                    Table::Acl.col(ACL_ID),
                    Table::Acl.col(ACL_SOURCEID).eq_param(param),
                ),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::Acl.as_str()),
            ]),
        ])
    }

    /// Entries about the user, a tag they own, or a document they own.
    ///
    /// ACL entries are only reachable through their row in T_ACL, so their
    /// history vanishes from every scope once the ACL is deleted.
    pub fn user_visibility(param: &str) -> Expr {
        let log = Table::AuditLog;
        Expr::Or(vec![
            Expr::And(vec![
                log.col(LOG_IDENTITY).eq_param(param),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::User.as_str()),
            ]),
            Expr::And(vec![
                log.col(LOG_IDENTITY)
                    .in_subquery(Table::Tag.col(TAG_ID), Table::Tag.col(TAG_IDUSER).eq_param(param)),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::Tag.as_str()),
            ]),
            Expr::And(vec![
                log.col(LOG_IDENTITY).in_subquery(
                    Table::Document.col(DOC_ID),
                    Table::Document.col(DOC_IDUSER).eq_param(param),
                ),
                log.col(LOG_CLASSENTITY).eq_literal(EntityClass::Document.as_str()),
            ]),
        ])
    }
}

fn require_identifier(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AuditError::InvalidCriteria {
            detail: format!("{what} must not be empty"),
        });
    }
    Ok(())
}
