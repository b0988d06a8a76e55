//! The completion-record boundary
//!
//! The engine never owns completion records; it reads projections of them
//! (per-book chapter sets, activity dates) and proposes writes through the
//! [`CompletionStore`] trait. Reads degrade to empty sets so a storage
//! hiccup renders as "nothing completed yet"; failed writes are surfaced to
//! the caller, since silently dropping one would corrupt visible progress.

pub mod json;

pub use json::JsonStore;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canon;
use crate::clock::{Clock, SystemClock};
use crate::progress::ReadingProgress;

/// Errors crossing the storage boundary
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored records could not be (de)serialized
    #[error("storage records malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage contract the engine requires from its environment.
///
/// `mark_chapter_completed` is an idempotent upsert keyed by
/// (user, book, chapter): completing an already-completed chapter is a
/// no-op, never a duplicate record and never an error. All engine
/// computations derive from set membership, so a concurrent duplicate write
/// from a second device cannot corrupt derived state.
pub trait CompletionStore {
    /// Completed chapter numbers for one (user, book); empty for no activity
    fn list_completed_chapters(&self, user: &str, book: &str) -> Result<HashSet<u32>, StoreError>;

    /// Record a chapter as completed (idempotent upsert)
    fn mark_chapter_completed(&mut self, user: &str, book: &str, chapter: u32)
    -> Result<(), StoreError>;

    /// Calendar dates on which the user performed any tracked action
    fn list_activity_dates(&self, user: &str) -> Result<HashSet<NaiveDate>, StoreError>;
}

/// Read a user's full [`ReadingProgress`] projection across the whole canon.
///
/// Read failures degrade to zero progress (logged, not propagated) so the
/// caller always has something to render.
pub fn load_progress(store: &dyn CompletionStore, user: &str) -> ReadingProgress {
    let mut progress = ReadingProgress::new();

    for book in &canon::BOOKS {
        for chapter in completed_or_empty(store, user, book.name) {
            progress.insert(book.name, chapter);
        }
    }

    match store.list_activity_dates(user) {
        Ok(dates) => {
            for date in dates {
                progress.record_activity(date);
            }
        }
        Err(e) => tracing::warn!("Failed to load activity dates for {}: {}", user, e),
    }

    progress
}

/// Completed chapters for one book, degrading a failed read to the empty set
pub fn completed_or_empty(store: &dyn CompletionStore, user: &str, book: &str) -> HashSet<u32> {
    store.list_completed_chapters(user, book).unwrap_or_else(|e| {
        tracing::warn!("Failed to load completions for {} / {}: {}", user, book, e);
        HashSet::new()
    })
}

/// Per-user persisted record: completion sets by normalized book name plus
/// activity dates. BTree containers keep the serialized form stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    /// Completed chapters keyed by normalized book name
    pub books: BTreeMap<String, BTreeSet<u32>>,
    /// Dates with any tracked activity
    pub activity: BTreeSet<NaiveDate>,
}

impl UserRecord {
    /// Insert a completion and stamp the activity date. Returns whether
    /// anything changed (false for the duplicate-write no-op).
    pub fn insert(&mut self, book: &str, chapter: u32, on: NaiveDate) -> bool {
        let inserted = self.books.entry(canon::normalize(book)).or_default().insert(chapter);
        let stamped = self.activity.insert(on);
        inserted || stamped
    }
}

/// In-memory store for tests and embedding
pub struct MemoryStore {
    records: HashMap<String, UserRecord>,
    clock: Box<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store on the system clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Empty store on an injected clock
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self { records: HashMap::new(), clock }
    }
}

impl CompletionStore for MemoryStore {
    fn list_completed_chapters(&self, user: &str, book: &str) -> Result<HashSet<u32>, StoreError> {
        Ok(self
            .records
            .get(user)
            .and_then(|record| record.books.get(&canon::normalize(book)))
            .map(|chapters| chapters.iter().copied().collect())
            .unwrap_or_default())
    }

    fn mark_chapter_completed(
        &mut self,
        user: &str,
        book: &str,
        chapter: u32,
    ) -> Result<(), StoreError> {
        let today = self.clock.today();
        self.records.entry(user.to_string()).or_default().insert(book, chapter, today);
        Ok(())
    }

    fn list_activity_dates(&self, user: &str) -> Result<HashSet<NaiveDate>, StoreError> {
        Ok(self
            .records
            .get(user)
            .map(|record| record.activity.iter().copied().collect())
            .unwrap_or_default())
    }
}
