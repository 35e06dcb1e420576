//! Reconciliation between the registry and a remote record store.
//!
//! The store itself is abstract ([`RecordStore`]); the application supplies
//! an HTTP implementation. Functions here only move statuses and record ids
//! between the two sides:
//!
//! | Function | Direction |
//! |----------|-----------|
//! | [`apply_records`] | records → registry |
//! | [`pull`] | fetch, then [`apply_records`] |
//! | [`push`] | one word → store, binds the returned id |
//! | [`push_all`] | a list of words → store, failures collected |
//!
//! A failed call leaves local state exactly as it was.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::SyncError;
use crate::registry::WordRegistry;
use crate::status::LearningStatus;
use crate::word::Word;

/// Identifier of a row in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the remote word sheet.
///
/// Blank cells arrive as `null`. A blank `how_well_known` is read as "no
/// status given"; a row with a blank `word` is skipped when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_url: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub how_well_known: Option<LearningStatus>,
}

/// Parse a JSON array of records.
pub fn parse_records(body: &str) -> Result<Vec<RemoteRecord>, SyncError> {
    Ok(serde_json::from_str(body)?)
}

/// Parse a single record, as returned by create and update calls.
pub fn parse_record(body: &str) -> Result<RemoteRecord, SyncError> {
    Ok(serde_json::from_str(body)?)
}

/// Remote storage for word statuses.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record in the store.
    async fn fetch_all_records(&self) -> Result<Vec<RemoteRecord>, SyncError>;

    /// Create or update the record for `word`, returning its id.
    async fn upsert_record(&self, word: &Word) -> Result<RecordId, SyncError>;
}

/// Apply fetched records to the registry. Returns how many were applied;
/// rows whose word is blank are skipped.
pub fn apply_records(registry: &mut WordRegistry, records: &[RemoteRecord]) -> usize {
    let mut applied = 0;
    for record in records {
        let text = match record.word.as_deref() {
            Some(text) if !registry.normalizer().normalize_text(text).is_empty() => text,
            _ => continue,
        };
        let word = registry.resolve_text(text, record.how_well_known);
        word.bind_remote_record(record.id);
        applied += 1;
    }
    applied
}

/// Fetch every record and apply it.
pub async fn pull(
    store: &dyn RecordStore,
    registry: &mut WordRegistry,
) -> Result<usize, SyncError> {
    let records = store.fetch_all_records().await?;
    Ok(apply_records(registry, &records))
}

/// Write one word to the store and bind the id it comes back with.
pub async fn push(store: &dyn RecordStore, word: &Word) -> Result<RecordId, SyncError> {
    let id = store.upsert_record(word).await?;
    word.bind_remote_record(id);
    Ok(id)
}

/// Outcome of [`push_all`].
#[derive(Debug, Default)]
pub struct PushReport {
    pub pushed: Vec<(String, RecordId)>,
    pub failed: Vec<(String, SyncError)>,
}

impl PushReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Push each of `words` in order. A failure is recorded and the next word
/// is tried.
pub async fn push_all(store: &dyn RecordStore, words: &[Arc<Word>]) -> PushReport {
    let mut report = PushReport::default();
    for word in words {
        match push(store, word).await {
            Ok(id) => report.pushed.push((word.text().to_string(), id)),
            Err(e) => report.failed.push((word.text().to_string(), e)),
        }
    }
    report
}
