//! Request-generation tokens
//!
//! Each kind of request (search, download) owns a [`RequestGeneration`]. Starting a
//! new request bumps the generation; completions carrying an older token are stale
//! and must not touch the page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede every outstanding token and hand out a fresh one
    pub fn advance(&self) -> GenerationToken {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationToken {
            id,
            current: Arc::clone(&self.current),
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Identifies one request; stays cheap to clone into worker tasks
#[derive(Debug, Clone)]
pub struct GenerationToken {
    id: u64,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}
