use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ppob::ApiError;
use crate::models::TransactionRecord;

/// Page size used by the transaction screen
pub const PAGE_LIMIT: u32 = 5;

/// Source of history pages. The controller never talks to the transport
/// directly; the real implementation is `PpobClient`, tests inject mocks.
#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<TransactionRecord>, ApiError>;
}

struct HistoryState {
    items: Vec<TransactionRecord>,
    /// Start index of the most recently requested page
    offset: u32,
    is_loading: bool,
    has_more: bool,
    /// Bumped by `reset()`; fetches launched under an older generation
    /// are discarded when they land.
    generation: u64,
}

/// Read-only view of the accumulated list for rendering
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub items: Vec<TransactionRecord>,
    pub offset: u32,
    pub is_loading: bool,
    pub has_more: bool,
}

/// What a load attempt did to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was applied; the count of records it carried
    Loaded(usize),
    /// Nothing fetched: a load was already in flight, or the list is exhausted
    Skipped,
    /// The fetch completed after a `reset()` and its records were discarded
    Stale,
}

/// Incremental, paginated accumulator for the transaction history screen.
///
/// Rules, matching the screen's behavior:
/// - one fetch in flight at a time (`is_loading` gates re-entry),
/// - `has_more` latches false once a short page arrives, until `reset()`,
/// - a failed fetch leaves the accumulated list untouched,
/// - `reset()` never cancels an in-flight fetch, it just makes the result stale.
pub struct TransactionHistory<F: HistoryFetcher> {
    fetcher: Arc<F>,
    state: Mutex<HistoryState>,
    limit: u32,
}

impl<F: HistoryFetcher> TransactionHistory<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self::with_limit(fetcher, PAGE_LIMIT)
    }

    pub fn with_limit(fetcher: Arc<F>, limit: u32) -> Self {
        TransactionHistory {
            fetcher,
            state: Mutex::new(HistoryState {
                items: Vec::new(),
                offset: 0,
                is_loading: false,
                has_more: true,
                generation: 0,
            }),
            limit,
        }
    }

    pub async fn snapshot(&self) -> HistorySnapshot {
        let st = self.state.lock().await;
        HistorySnapshot {
            items: st.items.clone(),
            offset: st.offset,
            is_loading: st.is_loading,
            has_more: st.has_more,
        }
    }

    /// Clear the list and start over from offset 0. Called when the screen
    /// regains focus or after login/logout.
    pub async fn reset(&self) {
        let mut st = self.state.lock().await;
        st.items.clear();
        st.offset = 0;
        st.has_more = true;
        st.generation = st.generation.wrapping_add(1);
    }

    /// Fetch the page at the current offset. No-op when a fetch is already
    /// in flight.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, ApiError> {
        let (generation, offset) = {
            let mut st = self.state.lock().await;
            if st.is_loading {
                return Ok(LoadOutcome::Skipped);
            }
            st.is_loading = true;
            (st.generation, st.offset)
        };
        self.run_fetch(generation, offset, None).await
    }

    /// Advance to the next page and fetch it. No-op while loading or once
    /// the list is exhausted. On failure the offset rolls back so the same
    /// call retries the same page.
    pub async fn request_more(&self) -> Result<LoadOutcome, ApiError> {
        let (generation, offset, previous_offset) = {
            let mut st = self.state.lock().await;
            if st.is_loading || !st.has_more {
                return Ok(LoadOutcome::Skipped);
            }
            let previous = st.offset;
            st.offset += self.limit;
            st.is_loading = true;
            (st.generation, st.offset, previous)
        };
        self.run_fetch(generation, offset, Some(previous_offset)).await
    }

    async fn run_fetch(
        &self,
        generation: u64,
        offset: u32,
        rollback_offset: Option<u32>,
    ) -> Result<LoadOutcome, ApiError> {
        debug!("Loading history page at offset {}", offset);
        let result = self.fetcher.fetch_page(offset, self.limit).await;

        let mut st = self.state.lock().await;
        st.is_loading = false;

        if st.generation != generation {
            debug!("Discarding stale history page for offset {}", offset);
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(records) => {
                if (records.len() as u32) < self.limit {
                    st.has_more = false;
                }
                let count = records.len();
                if offset == 0 {
                    // First page replaces whatever is shown, covering the
                    // implicit-reset-on-first-load case.
                    st.items = records;
                } else {
                    st.items.extend(records);
                }
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                if let Some(previous) = rollback_offset {
                    st.offset = previous;
                }
                warn!("History page fetch failed at offset {}: {}", offset, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::models::TransactionType;

    fn record(n: usize) -> TransactionRecord {
        TransactionRecord {
            invoice_number: format!("INV-{:04}", n),
            transaction_type: TransactionType::TopUp,
            total_amount: 10_000,
            created_on: Utc::now(),
        }
    }

    fn page(count: usize) -> Vec<TransactionRecord> {
        (0..count).map(record).collect()
    }

    /// Pops one scripted result per call; empty script means empty pages.
    struct ScriptedFetcher {
        script: std::sync::Mutex<VecDeque<Result<Vec<TransactionRecord>, ApiError>>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<Vec<TransactionRecord>, ApiError>>) -> Self {
            ScriptedFetcher {
                script: std::sync::Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn with_delay(script: Vec<Result<Vec<TransactionRecord>, ApiError>>, delay: Duration) -> Self {
            ScriptedFetcher {
                script: std::sync::Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
                delay: Some(delay),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HistoryFetcher for ScriptedFetcher {
        async fn fetch_page(
            &self,
            _offset: u32,
            _limit: u32,
        ) -> Result<Vec<TransactionRecord>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.script
                .lock()
                .expect("script lock poisoned")
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_full_then_short_page_scenario() {
        // Page 1 full (5), page 2 short (3), then exhausted.
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(5)), Ok(page(3))]));
        let history = TransactionHistory::new(fetcher.clone());

        assert_eq!(history.load_next_page().await.unwrap(), LoadOutcome::Loaded(5));
        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 5);
        assert!(snap.has_more);
        assert_eq!(snap.offset, 0);

        assert_eq!(history.request_more().await.unwrap(), LoadOutcome::Loaded(3));
        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 8);
        assert!(!snap.has_more);
        assert_eq!(snap.offset, 5);

        // Exhausted: no further request goes out.
        assert_eq!(history.request_more().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(history.snapshot().await.items.len(), 8);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_offset_advances_by_limit_per_page() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(page(5)),
            Ok(page(5)),
            Ok(page(5)),
            Ok(page(5)),
        ]));
        let history = TransactionHistory::new(fetcher);

        history.load_next_page().await.unwrap();
        for n in 1..=3u32 {
            history.request_more().await.unwrap();
            assert_eq!(history.snapshot().await.offset, n * PAGE_LIMIT);
        }
        assert_eq!(history.snapshot().await.items.len(), 20);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(Vec::new())]));
        let history = TransactionHistory::new(fetcher);

        assert_eq!(history.load_next_page().await.unwrap(), LoadOutcome::Loaded(0));
        let snap = history.snapshot().await;
        assert!(snap.items.is_empty());
        assert!(!snap.has_more);
        assert!(!snap.is_loading);
    }

    #[tokio::test]
    async fn test_failure_leaves_state_untouched() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(ApiError::Request(
            "connection refused".to_string(),
        ))]));
        let history = TransactionHistory::new(fetcher);

        let err = history.load_next_page().await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));

        let snap = history.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.offset, 0);
        assert!(snap.has_more);
        assert!(!snap.is_loading);
    }

    #[tokio::test]
    async fn test_failed_request_more_retries_same_page() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(page(5)),
            Ok(page(5)),
            Err(ApiError::Request("timeout".to_string())),
            Ok(page(3)),
        ]));
        let history = TransactionHistory::new(fetcher.clone());

        history.load_next_page().await.unwrap();
        history.request_more().await.unwrap();
        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 10);
        assert_eq!(snap.offset, 5);

        // Failure rolls the offset back so the retry hits the same window.
        assert!(history.request_more().await.is_err());
        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 10);
        assert_eq!(snap.offset, 5);
        assert!(snap.has_more);

        assert_eq!(history.request_more().await.unwrap(), LoadOutcome::Loaded(3));
        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 13);
        assert_eq!(snap.offset, 10);
        assert!(!snap.has_more);
    }

    #[tokio::test]
    async fn test_concurrent_request_more_sends_one_request() {
        let fetcher = Arc::new(ScriptedFetcher::with_delay(
            vec![Ok(page(5)), Ok(page(5))],
            Duration::from_millis(100),
        ));
        let history = Arc::new(TransactionHistory::new(fetcher.clone()));

        history.load_next_page().await.unwrap();
        assert_eq!(fetcher.call_count(), 1);

        let h1 = history.clone();
        let first = tokio::spawn(async move { h1.request_more().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Second trigger while the first fetch is in flight is a no-op.
        assert_eq!(history.request_more().await.unwrap(), LoadOutcome::Skipped);

        assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Loaded(5));
        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(history.snapshot().await.items.len(), 10);
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_fetch() {
        let fetcher = Arc::new(ScriptedFetcher::with_delay(
            vec![Ok(page(5))],
            Duration::from_millis(100),
        ));
        let history = Arc::new(TransactionHistory::new(fetcher));

        let h1 = history.clone();
        let in_flight = tokio::spawn(async move { h1.load_next_page().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        history.reset().await;

        // The stale fetch completes but its records never land.
        assert_eq!(in_flight.await.unwrap().unwrap(), LoadOutcome::Stale);
        let snap = history.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.offset, 0);
        assert!(snap.has_more);
        assert!(!snap.is_loading);
    }

    #[tokio::test]
    async fn test_reset_reopens_exhausted_list() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(2)), Ok(page(5))]));
        let history = TransactionHistory::new(fetcher);

        history.load_next_page().await.unwrap();
        assert!(!history.snapshot().await.has_more);

        history.reset().await;
        let snap = history.snapshot().await;
        assert!(snap.has_more);
        assert!(snap.items.is_empty());

        assert_eq!(history.load_next_page().await.unwrap(), LoadOutcome::Loaded(5));
        assert_eq!(history.snapshot().await.items.len(), 5);
    }

    #[tokio::test]
    async fn test_duplicate_invoices_are_kept() {
        let dup = || {
            vec![TransactionRecord {
                invoice_number: "INV-DUP".to_string(),
                transaction_type: TransactionType::Payment,
                total_amount: 5_000,
                created_on: Utc::now(),
            }]
        };
        let mut first = page(4);
        first.extend(dup());
        let mut second = dup();
        second.extend(page(2));

        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(first), Ok(second)]));
        let history = TransactionHistory::new(fetcher);

        history.load_next_page().await.unwrap();
        history.request_more().await.unwrap();

        let snap = history.snapshot().await;
        assert_eq!(snap.items.len(), 8);
        let dups = snap
            .items
            .iter()
            .filter(|r| r.invoice_number == "INV-DUP")
            .count();
        assert_eq!(dups, 2);
    }
}
