//! Session-owned preview cache.
//!
//! Maps a request URL to its [`PreviewResult`], negative results included, so
//! a URL costs at most one successful round of network work per session.
//! Entries never expire and are never evicted; nothing is persisted. The
//! cache is created by whoever owns the session (the CLI, a UI shell) and
//! shared with resolvers through an `Arc`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use url::Url;

use crate::preview::PreviewResult;

#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: Mutex<HashMap<Url, PreviewResult>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another thread panicked mid-insert; the map
    // itself is still a valid HashMap.
    fn lock(&self) -> MutexGuard<'_, HashMap<Url, PreviewResult>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cached result for `url`, if it was resolved before.
    pub fn get(&self, url: &Url) -> Option<PreviewResult> {
        self.lock().get(url).cloned()
    }

    /// Store `result` for `url` unless an entry already exists.
    ///
    /// Returns the stored value, so concurrent resolutions of the same URL
    /// all hand back whichever result landed first.
    pub fn insert(&self, url: Url, result: PreviewResult) -> PreviewResult {
        self.lock().entry(url).or_insert(result).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
