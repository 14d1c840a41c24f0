//! The source adapter contract shared by every extraction backend.
//!
//! An adapter owns one immutable [`crate::StoreConfig`] and runs a
//! fetch→parse→assemble pipeline per call. The contract guarantee is that
//! [`SourceAdapter::extract`] never surfaces a fault to the caller: every
//! failure mode degrades to an empty or partial result plus a structured
//! log entry.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::offer::{Offer, SearchQuery};

/// Per-call execution context: an optional deadline plus a cooperative
/// cancellation signal.
///
/// Adapters check [`ExtractContext::should_stop`] between candidate items,
/// never inside an in-flight network call — a cancelled call still finishes
/// its current round-trip before unwinding.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl ExtractContext {
    /// Context with no deadline and a fresh, never-cancelled token.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Context that expires `budget` from now.
    #[must_use]
    pub fn with_deadline(budget: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + budget),
            cancel: CancellationToken::new(),
        }
    }

    /// Context driven by an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            deadline: None,
            cancel,
        }
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Remaining time budget, if a deadline was set.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// True once the caller cancelled or the deadline passed.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Contract implemented by every source adapter (static HTML, structured
/// API, browser automation).
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Whether this adapter instance serves `store_name`.
    fn can_handle(&self, store_name: &str) -> bool;

    /// Runs one extraction pipeline for `query` against the adapter's
    /// store.
    ///
    /// Returns zero or more normalized offers. Never fails and never
    /// panics: network errors, malformed content and per-item faults all
    /// degrade to an empty or partially-populated result, logged at a
    /// severity matching the failure.
    async fn extract(&self, query: &SearchQuery, store_id: i64, ctx: &ExtractContext)
        -> Vec<Offer>;

    /// Key/value snapshot of the adapter's configuration for diagnostics
    /// and health reporting.
    fn describe_config(&self) -> BTreeMap<String, String>;
}

/// Terminal pipeline state for the per-call summary log line.
#[must_use]
pub fn outcome_label(emitted: usize, faulted: usize) -> &'static str {
    if emitted == 0 {
        "empty"
    } else if faulted > 0 {
        "partial"
    } else {
        "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome_label(0, 0), "empty");
        assert_eq!(outcome_label(0, 3), "empty");
        assert_eq!(outcome_label(5, 0), "success");
        assert_eq!(outcome_label(5, 1), "partial");
    }

    #[tokio::test]
    async fn unbounded_context_never_stops() {
        let ctx = ExtractContext::unbounded();
        assert!(!ctx.should_stop());
        assert!(ctx.remaining().is_none());
    }

    #[tokio::test]
    async fn cancelled_context_stops() {
        let token = CancellationToken::new();
        let ctx = ExtractContext::with_cancellation(token.clone());
        assert!(!ctx.should_stop());
        token.cancel();
        assert!(ctx.should_stop());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_context_stops_after_budget() {
        let ctx = ExtractContext::with_deadline(Duration::from_secs(5));
        assert!(!ctx.should_stop());
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(ctx.should_stop());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }
}
