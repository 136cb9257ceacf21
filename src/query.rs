//! Keyed file-content query.
//!
//! Concurrent requests for the same key share one upstream fetch. Results are
//! not kept once the fetch resolves, so each page mount (or change of key)
//! fetches again.

use std::{fmt, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::api::{ApiError, ContentFetcher, FileContent, QueryKey};

/// Cloneable summary of a failed fetch, shown as-is by the deferred wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub status: Option<u16>,
    pub message: String,
}

impl From<ApiError> for QueryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => QueryError {
                status: Some(status),
                message,
            },
            other => QueryError {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => f.write_str(&self.message),
        }
    }
}

/// The three rendering states of an asynchronous query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Error(QueryError),
    Loaded(T),
}

impl<T> From<Result<T, QueryError>> for QueryState<T> {
    fn from(result: Result<T, QueryError>) -> Self {
        match result {
            Ok(data) => QueryState::Loaded(data),
            Err(err) => QueryState::Error(err),
        }
    }
}

type Slot = Arc<OnceCell<Result<FileContent, QueryError>>>;

// --- In-flight table ---

pub struct FileContentQuery {
    fetcher: Arc<dyn ContentFetcher>,
    inflight: DashMap<QueryKey, Slot>,
}

/// Drops a caller's claim on an in-flight slot, on completion or cancellation.
struct SlotGuard<'a> {
    inflight: &'a DashMap<QueryKey, Slot>,
    key: &'a QueryKey,
    slot: Slot,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        // The map holds one reference and this guard another; anything above
        // that is a caller still waiting on the slot. A newer slot for the same
        // key is never ours to remove.
        self.inflight.remove_if(self.key, |_, v| {
            Arc::ptr_eq(v, &self.slot) && Arc::strong_count(v) <= 2
        });
    }
}

impl FileContentQuery {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            fetcher,
            inflight: DashMap::new(),
        }
    }

    /// Fetches `key`, joining an identical fetch that is already running.
    ///
    /// Dropping the returned future (client gone) releases the slot as well.
    pub async fn run(&self, key: QueryKey) -> QueryState<FileContent> {
        let slot: Slot = match self.inflight.entry(key.clone()) {
            Entry::Occupied(e) => {
                debug!("Joining in-flight fetch for {:?}", key);
                e.get().clone()
            }
            Entry::Vacant(e) => e.insert(Arc::new(OnceCell::new())).value().clone(),
        };
        let guard = SlotGuard {
            inflight: &self.inflight,
            key: &key,
            slot,
        };

        let result = guard
            .slot
            .get_or_init(|| async {
                self.fetcher.fetch_file(&key).await.map_err(|e| {
                    error!(
                        "Failed to fetch {}/{}/{} at {}: {}",
                        key.project_name, key.repo_name, key.file_path, key.revision, e
                    );
                    QueryError::from(e)
                })
            })
            .await
            .clone();
        drop(guard);

        result.into()
    }
}
