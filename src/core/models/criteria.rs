/// Filters for an audit log search.
///
/// Both filters may be set at once, in which case an entry must satisfy
/// both scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogCriteria {
    /// Entries about this document, its files and its ACL entries.
    pub document_id: Option<String>,
    /// Entries about this user, the tags they own and the documents they own.
    pub user_id: Option<String>,
}

impl AuditLogCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
