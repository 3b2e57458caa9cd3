use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::adapters::memory::memory_session::MemorySession;
use crate::config::app_config::AuditSection;
use crate::core::errors::{AuditError, Result};
use crate::core::models::audit_log::AuditLog;
use crate::core::models::paging::PageRequest;
use crate::core::query::{QueryParam, Row};
use crate::core::traits::session::AuditSession;

/// Session backed by files in a data directory.
///
/// The audit log is appended as JSON lines, one entry per line. Related
/// entities (documents, files, ACL entries, tags) come from a JSON
/// snapshot that this session only reads. Each read loads both into a
/// [`MemorySession`] and evaluates there.
pub struct JsonlSession {
    log_path: PathBuf,
    entities_path: PathBuf,
}

/// A log line as stored. The type stays a string here so that an
/// unknown tag surfaces when rows are mapped, not when the file is read.
#[derive(Debug, Deserialize)]
struct StoredLog {
    id: String,
    create_date: DateTime<Utc>,
    entity_id: String,
    entity_class: String,
    #[serde(rename = "type")]
    log_type: String,
    message: String,
}

/// Contents of the entities file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntitySnapshot {
    pub documents: Vec<OwnedEntity>,
    pub files: Vec<FileEntity>,
    pub acls: Vec<AclEntity>,
    pub tags: Vec<OwnedEntity>,
}

#[derive(Debug, Deserialize)]
pub struct OwnedEntity {
    pub id: String,
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct FileEntity {
    pub id: String,
    pub document: String,
}

#[derive(Debug, Deserialize)]
pub struct AclEntity {
    pub id: String,
    pub source: String,
}

impl JsonlSession {
    pub fn new(data_dir: &Path, log_file: &str, entities_file: &str) -> Self {
        Self {
            log_path: data_dir.join(log_file),
            entities_path: data_dir.join(entities_file),
        }
    }

    pub fn from_config(data_dir: &Path, audit: &AuditSection) -> Self {
        Self::new(data_dir, &audit.log_file, &audit.entities_file)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Load the log and the entity snapshot into memory.
    fn load(&self) -> Result<MemorySession> {
        let session = MemorySession::new();
        self.load_entities(&session)?;

        if !self.log_path.exists() {
            return Ok(session);
        }

        let file = fs::File::open(&self.log_path).map_err(|e| {
            AuditError::persistence(format!("Cannot read audit log: {e}"))
        })?;

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                AuditError::persistence(format!(
                    "Error reading audit log line {}: {e}",
                    line_num + 1
                ))
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let stored: StoredLog = serde_json::from_str(trimmed).map_err(|e| {
                AuditError::persistence(format!(
                    "Malformed audit entry at line {}: {e}",
                    line_num + 1
                ))
            })?;

            session.insert_raw_log(
                &stored.id,
                stored.create_date,
                &stored.entity_id,
                &stored.entity_class,
                &stored.log_type,
                &stored.message,
            );
        }

        Ok(session)
    }

    fn load_entities(&self, session: &MemorySession) -> Result<()> {
        if !self.entities_path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.entities_path)?;
        let snapshot: EntitySnapshot = serde_json::from_str(&content).map_err(|e| {
            AuditError::persistence(format!(
                "Malformed entities file {}: {e}",
                self.entities_path.display()
            ))
        })?;

        for doc in &snapshot.documents {
            session.add_document(&doc.id, &doc.owner);
        }
        for file in &snapshot.files {
            session.add_file(&file.id, &file.document);
        }
        for acl in &snapshot.acls {
            session.add_acl(&acl.id, &acl.source);
        }
        for tag in &snapshot.tags {
            session.add_tag(&tag.id, &tag.owner);
        }
        Ok(())
    }
}

impl AuditSession for JsonlSession {
    fn persist(&self, entry: &AuditLog) -> Result<()> {
        let line = serde_json::to_string(entry).map_err(|e| {
            AuditError::persistence(format!("Failed to serialize audit entry: {e}"))
        })?;

        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                AuditError::persistence(format!(
                    "Cannot open audit log at {}: {e}",
                    self.log_path.display()
                ))
            })?;

        writeln!(file, "{line}").map_err(|e| {
            AuditError::persistence(format!("Failed to write audit entry: {e}"))
        })?;

        Ok(())
    }

    fn count(&self, query: &QueryParam) -> Result<u64> {
        self.load()?.count(query)
    }

    fn fetch(&self, query: &QueryParam, page: &PageRequest) -> Result<Vec<Row>> {
        self.load()?.fetch(query, page)
    }
}
