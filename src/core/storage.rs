//! Persisted client state
//!
//! Only one value survives a restart: the last submitted search query, stored
//! under the fixed key [`LAST_SEARCH_KEY`].

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::models::{AppError, AppResult};

pub const LAST_SEARCH_KEY: &str = "lastSearch";

pub trait QueryStore: Send + Sync {
    fn load_last_query(&self) -> AppResult<Option<String>>;

    fn save_last_query(&self, query: &str) -> AppResult<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    values: HashMap<String, StoredValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    saved_at: DateTime<Utc>,
}

/// Keeps the state as a small JSON document on disk
#[derive(Debug)]
pub struct FileQueryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileQueryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> AppResult<StateDocument> {
        if !self.path.exists() {
            return Ok(StateDocument::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(document) => Ok(document),
            Err(err) => {
                warn!(
                    "Ignoring unreadable state file {}: {}",
                    self.path.display(),
                    err
                );
                Ok(StateDocument::default())
            }
        }
    }

    fn write_document(&self, document: &StateDocument) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, content).map_err(|e| {
            AppError::Storage(format!(
                "Failed to write state file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl QueryStore for FileQueryStore {
    fn load_last_query(&self) -> AppResult<Option<String>> {
        let _guard = self.lock.lock();
        let document = self.read_document()?;
        Ok(document
            .values
            .get(LAST_SEARCH_KEY)
            .map(|stored| stored.value.clone()))
    }

    fn save_last_query(&self, query: &str) -> AppResult<()> {
        let _guard = self.lock.lock();
        let mut document = self.read_document()?;
        document.values.insert(
            LAST_SEARCH_KEY.to_string(),
            StoredValue {
                value: query.to_string(),
                saved_at: Utc::now(),
            },
        );
        self.write_document(&document)?;
        debug!("Persisted last search to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for embedders that should not touch disk
#[derive(Debug, Default)]
pub struct MemoryQueryStore {
    value: Mutex<Option<String>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl QueryStore for MemoryQueryStore {
    fn load_last_query(&self) -> AppResult<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn save_last_query(&self, query: &str) -> AppResult<()> {
        *self.value.lock() = Some(query.to_string());
        Ok(())
    }
}
