// src/state/session.rs
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::RwLock;

use crate::api::AnalysisResult;

#[derive(Debug, Default)]
struct SessionInner {
    result: Option<Arc<AnalysisResult>>,
    loading: bool,
    generation: u64,
    completed_at: Option<DateTime<Local>>,
}

/// Holds the last analysis result for the lifetime of the application.
///
/// Cloning the store clones the handle, not the data: every screen sees the
/// same result. Writes replace the whole result under one lock and readers get
/// an `Arc` snapshot, so no reader can observe a mix of two results.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.inner.read().result.clone()
    }

    pub fn has_result(&self) -> bool {
        self.inner.read().result.is_some()
    }

    pub fn set_result(&self, result: Option<AnalysisResult>) {
        let mut inner = self.inner.write();
        inner.completed_at = result.as_ref().map(|_| Local::now());
        inner.result = result.map(Arc::new);
        inner.generation += 1;
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.write().loading = loading;
    }

    /// Back to the state at application start.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.result = None;
        inner.loading = false;
        inner.completed_at = None;
        inner.generation += 1;
    }

    /// Bumped on every result write; lets screens drop page-local data that
    /// predates the current result.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.inner.read().completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn tagged(tag: &str) -> AnalysisResult {
        AnalysisResult {
            success: true,
            current_phase: Some(format!("phase-{}", tag)),
            original_source: Some(format!("source-{}", tag)),
            errors: vec![format!("error-{}", tag)],
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = SessionStore::new();
        assert!(store.result().is_none());
        assert!(!store.is_loading());
        assert!(store.completed_at().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let page_view = store.clone();

        store.set_result(Some(tagged("a")));
        store.set_loading(true);

        assert_eq!(
            page_view.result().unwrap().original_source.as_deref(),
            Some("source-a")
        );
        assert!(page_view.is_loading());
        assert!(page_view.completed_at().is_some());
    }

    #[test]
    fn test_replacement_is_wholesale() {
        let store = SessionStore::new();
        store.set_result(Some(tagged("r1")));
        let before = store.result().unwrap();

        store.set_result(Some(AnalysisResult {
            original_source: Some("source-r2".to_string()),
            ..Default::default()
        }));
        let after = store.result().unwrap();

        // no field of R1 survives in R2
        assert_eq!(after.current_phase, None);
        assert!(after.errors.is_empty());
        // an earlier snapshot is unaffected
        assert_eq!(before.current_phase.as_deref(), Some("phase-r1"));
    }

    #[test]
    fn test_concurrent_replacements_never_mix() {
        let store = SessionStore::new();
        store.set_result(Some(tagged("r1")));

        let writers: Vec<_> = ["r1", "r2"]
            .into_iter()
            .map(|tag| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        store.set_result(Some(tagged(tag)));
                    }
                })
            })
            .collect();

        for _ in 0..2_000 {
            let snapshot = store.result().unwrap();
            let tag = snapshot
                .original_source
                .as_deref()
                .and_then(|s| s.strip_prefix("source-"))
                .unwrap()
                .to_string();
            assert_eq!(snapshot.current_phase, Some(format!("phase-{}", tag)));
            assert_eq!(snapshot.errors, vec![format!("error-{}", tag)]);
        }

        for writer in writers {
            writer.join().unwrap();
        }
    }

    #[test]
    fn test_clear_resets_everything() {
        let store = SessionStore::new();
        store.set_result(Some(tagged("a")));
        store.set_loading(true);
        let generation = store.generation();

        store.clear();

        assert!(store.result().is_none());
        assert!(!store.is_loading());
        assert!(store.completed_at().is_none());
        assert!(store.generation() > generation);
    }
}
