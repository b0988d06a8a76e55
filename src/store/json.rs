//! JSON-file-backed completion store
//!
//! Whole-file load/save of pretty-printed JSON under the platform data
//! directory, the same shape the rest of the app's on-disk state uses.
//! Every successful write persists immediately, so a second device reading
//! the same file observes the completion.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::{CompletionStore, StoreError, UserRecord};
use crate::canon;
use crate::clock::{Clock, SystemClock};

/// Serialized file contents: records per user id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Records {
    users: BTreeMap<String, UserRecord>,
}

/// Completion store persisted to a single JSON file
pub struct JsonStore {
    path: PathBuf,
    records: Records,
    clock: Box<dyn Clock>,
}

impl JsonStore {
    /// Open (or create) the store at the default platform data path
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open (or create) the store at an explicit path, on the system clock
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    /// Open (or create) the store with an injected clock
    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self> {
        let path = path.into();
        let records = Self::load(&path)?;
        Ok(Self { path, records, clock })
    }

    /// Default location: `completions.json` in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "lectio").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().join("completions.json"))
    }

    fn load(path: &Path) -> Result<Records> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read completions from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse completions.json")
        } else {
            Ok(Records::default())
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl CompletionStore for JsonStore {
    fn list_completed_chapters(&self, user: &str, book: &str) -> Result<HashSet<u32>, StoreError> {
        Ok(self
            .records
            .users
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
        let changed =
            self.records.users.entry(user.to_string()).or_default().insert(book, chapter, today);
        // Duplicate completions change nothing, so skip the rewrite.
        if changed {
            self.save()?;
        }
        Ok(())
    }

    fn list_activity_dates(&self, user: &str) -> Result<HashSet<NaiveDate>, StoreError> {
        Ok(self
            .records
            .users
            .get(user)
            .map(|record| record.activity.iter().copied().collect())
            .unwrap_or_default())
    }
}
