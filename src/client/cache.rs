// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-URL memoization of OPTIONS calls

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;

use crate::error::Result;

/// Pending or completed OPTIONS call; every clone resolves to the same value
pub type OptionsFuture = Shared<BoxFuture<'static, Result<Value>>>;

/// Cache of OPTIONS futures keyed by URL
///
/// Entries are stored as soon as the call is issued, so callers asking for
/// the same URL before it resolves share one transport call. Rejected
/// futures stay cached until refreshed or invalidated.
pub struct OptionsCache {
    enabled: AtomicBool,
    entries: DashMap<String, OptionsFuture>,
}

impl OptionsCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            entries: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Bypass the cache from now on; stored entries are kept
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Drop every entry
    pub fn invalidate(&self) {
        tracing::debug!(entries = self.entries.len(), "Invalidating options cache");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Return the cached future for `url`, or issue and store a new one.
    ///
    /// `issue` must only build the future; it runs while the entry is locked.
    pub fn fetch<F>(&self, url: &str, force_refresh: bool, issue: F) -> OptionsFuture
    where
        F: FnOnce() -> OptionsFuture,
    {
        if !self.is_enabled() {
            return issue();
        }

        match self.entries.entry(url.to_string()) {
            Entry::Occupied(entry) if !force_refresh => {
                tracing::debug!(url, "Options cache hit");
                entry.get().clone()
            }
            Entry::Occupied(mut entry) => {
                tracing::debug!(url, "Refreshing cached options");
                let fut = issue();
                entry.insert(fut.clone());
                fut
            }
            Entry::Vacant(entry) => {
                let fut = issue();
                entry.insert(fut.clone());
                fut
            }
        }
    }
}

impl std::fmt::Debug for OptionsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsCache")
            .field("enabled", &self.is_enabled())
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counting(calls: &AtomicUsize) -> OptionsFuture {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Ok(json!(n))).boxed().shared()
    }

    #[tokio::test]
    async fn test_cached_until_refreshed() {
        let cache = OptionsCache::new(true);
        let calls = AtomicUsize::new(0);

        let a = cache.fetch("/x", false, || counting(&calls));
        let b = cache.fetch("/x", false, || counting(&calls));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.await.unwrap(), b.await.unwrap());

        let c = cache.fetch("/x", true, || counting(&calls));
        assert_eq!(c.await.unwrap(), json!(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_disabled_cache_keeps_entries() {
        let cache = OptionsCache::new(true);
        let calls = AtomicUsize::new(0);

        let _ = cache.fetch("/x", false, || counting(&calls));
        cache.disable();
        let _ = cache.fetch("/x", false, || counting(&calls));
        let _ = cache.fetch("/y", false, || counting(&calls));

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.contains("/x"));
        assert!(!cache.contains("/y"));

        cache.enable();
        let _ = cache.fetch("/x", false, || counting(&calls));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_invalidate() {
        let cache = OptionsCache::new(true);
        let calls = AtomicUsize::new(0);

        let _ = cache.fetch("/x", false, || counting(&calls));
        cache.invalidate();
        assert!(cache.is_empty());
        let _ = cache.fetch("/x", false, || counting(&calls));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
