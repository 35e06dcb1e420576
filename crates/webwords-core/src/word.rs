//! The word entity.
//!
//! A [`Word`] is shared as `Arc<Word>` between the registry and whoever
//! resolved it. Its text is fixed at creation; status, occurrences, and the
//! remote record id live behind a lock. Words are only constructed by
//! [`WordRegistry`](crate::registry::WordRegistry), which keeps one instance
//! per canonical text.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::occurrence::Occurrence;
use crate::projector::project;
use crate::status::LearningStatus;
use crate::sync::RecordId;

struct WordState {
    status: LearningStatus,
    occurrences: Vec<Arc<dyn Occurrence>>,
    remote_record_id: Option<RecordId>,
}

pub struct Word {
    text: String,
    state: RwLock<WordState>,
}

impl Word {
    pub(crate) fn new(text: String, status: LearningStatus) -> Self {
        Self {
            text,
            state: RwLock::new(WordState {
                status,
                occurrences: Vec::new(),
                remote_record_id: None,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, WordState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WordState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn learning_status(&self) -> LearningStatus {
        self.read().status
    }

    /// Snapshot of the occurrence list, in registration order.
    pub fn occurrences(&self) -> Vec<Arc<dyn Occurrence>> {
        self.read().occurrences.clone()
    }

    pub fn occurrence_count(&self) -> usize {
        self.read().occurrences.len()
    }

    pub fn remote_record_id(&self) -> Option<RecordId> {
        self.read().remote_record_id
    }

    /// Link this word to its row in the remote store.
    pub fn bind_remote_record(&self, id: RecordId) {
        self.write().remote_record_id = Some(id);
    }

    /// Change the learning status and repaint occurrences.
    ///
    /// Returns `false` without touching any node when `status` is already
    /// the current one.
    pub fn set_status(&self, status: LearningStatus) -> bool {
        {
            let mut state = self.write();
            if state.status == status {
                return false;
            }
            state.status = status;
        }
        project(self);
        true
    }

    pub fn mark_as_known(&self) -> bool {
        self.set_status(LearningStatus::Known)
    }

    pub fn mark_as_unknown(&self) -> bool {
        self.set_status(LearningStatus::Unknown)
    }

    /// Register another page location and paint it immediately.
    pub fn add_occurrence(&self, node: Arc<dyn Occurrence>) {
        self.write().occurrences.push(node);
        project(self);
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Word")
            .field("text", &self.text)
            .field("status", &state.status)
            .field("occurrences", &state.occurrences.len())
            .field("remote_record_id", &state.remote_record_id)
            .finish()
    }
}
