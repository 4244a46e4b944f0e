//! Background transaction watcher
//!
//! Polls the node for receipts of submitted transactions and advances each
//! watched item through pending → confirming → confirmed, or into one of the
//! terminal failure states. A single poll loop runs while live items exist
//! and stops itself when everything has resolved.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eth_node_client::NodeClient;
use ethers::types::TxHash;
use serde::{Deserialize, Serialize};

use crate::dto::{TxStatusResponse, WatchedTxDto};
use crate::AppState;

/// How often the background task polls the node (seconds).
const POLL_INTERVAL_SECS: u64 = 5;

/// Items older than this are timed out; resolved items older than this are
/// pruned (seconds).
const TIMEOUT_SECS: u64 = 30 * 60;

/// A hash unknown to the node for this many consecutive polls is dropped.
const MISSING_POLLS_BEFORE_DROP: u32 = 3;

// ─── Types ───────────────────────────────────────────────────────────────────

/// Lifecycle of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Submitted; the node has not reported the hash yet
    Pending,
    /// The node knows the hash; receipt awaited
    Confirming,
    /// Receipt mined with success status
    Confirmed,
    /// Receipt mined with revert status
    Failed,
    /// Hash unknown to the node for several consecutive polls
    Dropped,
    /// Unresolved after the watch window
    Timeout,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Dropped => "dropped",
            Self::Timeout => "timeout",
        }
    }

    /// Terminal statuses never change again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Failed | Self::Dropped | Self::Timeout
        )
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What one poll learned about a transaction
#[derive(Debug, Clone, Copy)]
enum TxProbe {
    /// Receipt exists; success is the receipt status bit
    Receipt { success: bool },
    /// No receipt, but the node knows the hash
    Known,
    /// The node does not know the hash at all
    Unknown,
}

struct WatchItem {
    id: String,
    tx_hash: TxHash,
    operation: String,
    description: String,
    status: TxStatus,
    error: Option<String>,
    missing_polls: u32,
    submitted_at: Instant,
}

impl WatchItem {
    fn apply_probe(&mut self, probe: TxProbe) {
        match probe {
            TxProbe::Receipt { success: true } => {
                self.status = TxStatus::Confirmed;
            }
            TxProbe::Receipt { success: false } => {
                self.status = TxStatus::Failed;
                self.error = Some("transaction reverted".to_string());
            }
            TxProbe::Known => {
                self.missing_polls = 0;
                if self.status == TxStatus::Pending {
                    self.status = TxStatus::Confirming;
                }
            }
            TxProbe::Unknown => {
                self.missing_polls += 1;
                if self.missing_polls >= MISSING_POLLS_BEFORE_DROP {
                    self.status = TxStatus::Dropped;
                    self.error = Some("transaction not known to the node".to_string());
                }
            }
        }
    }

    fn to_dto(&self) -> WatchedTxDto {
        WatchedTxDto {
            watch_id: self.id.clone(),
            tx_hash: format!("{:?}", self.tx_hash),
            operation: self.operation.clone(),
            description: self.description.clone(),
            status: self.status,
            error: self.error.clone(),
            elapsed_secs: self.submitted_at.elapsed().as_secs(),
        }
    }
}

// ─── TxWatcher ───────────────────────────────────────────────────────────────

struct TxWatcher {
    items: Vec<WatchItem>,
}

impl TxWatcher {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn add(&mut self, tx_hash: TxHash, operation: String, description: String) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.items.push(WatchItem {
            id: id.clone(),
            tx_hash,
            operation,
            description,
            status: TxStatus::Pending,
            error: None,
            missing_polls: 0,
            submitted_at: Instant::now(),
        });
        id
    }

    fn has_live_items(&self) -> bool {
        self.items.iter().any(|item| !item.status.is_terminal())
    }

    fn watched_items(&self) -> Vec<WatchedTxDto> {
        self.items.iter().map(WatchItem::to_dto).collect()
    }

    fn status_of(&self, watch_id: &str) -> Option<TxStatusResponse> {
        self.items.iter().find(|item| item.id == watch_id).map(|item| {
            TxStatusResponse {
                watch_id: item.id.clone(),
                tx_hash: format!("{:?}", item.tx_hash),
                status: item.status,
                error: item.error.clone(),
            }
        })
    }

    async fn poll(&mut self, client: &NodeClient) {
        for item in self.items.iter_mut() {
            if item.status.is_terminal() {
                continue;
            }

            if item.submitted_at.elapsed().as_secs() > TIMEOUT_SECS {
                item.status = TxStatus::Timeout;
                item.error = Some("not resolved within the watch window".to_string());
                tracing::warn!("Tx {:?} ({}) timed out", item.tx_hash, item.operation);
                continue;
            }

            let probe = match client.transaction_receipt(item.tx_hash).await {
                Ok(Some(receipt)) => TxProbe::Receipt {
                    // Pre-Byzantium receipts carry no status bit; treat as success
                    success: receipt.status.map(|s| s.as_u64() == 1).unwrap_or(true),
                },
                Ok(None) => match client.transaction_by_hash(item.tx_hash).await {
                    Ok(Some(_)) => TxProbe::Known,
                    Ok(None) => TxProbe::Unknown,
                    Err(e) => {
                        tracing::warn!("Tx lookup failed for {:?}: {}", item.tx_hash, e);
                        continue;
                    }
                },
                Err(e) => {
                    tracing::warn!("Receipt lookup failed for {:?}: {}", item.tx_hash, e);
                    continue;
                }
            };

            let before = item.status;
            item.apply_probe(probe);
            if item.status != before {
                tracing::info!(
                    "Tx {:?} ({}): {} -> {}",
                    item.tx_hash,
                    item.operation,
                    before,
                    item.status
                );
            }
        }

        // Keep terminal items queryable for the watch window, then prune
        self.items.retain(|item| {
            !(item.status.is_terminal() && item.submitted_at.elapsed().as_secs() > TIMEOUT_SECS)
        });
    }
}

// ─── Shared state ────────────────────────────────────────────────────────────

pub struct TxWatcherState {
    watcher: tokio::sync::Mutex<TxWatcher>,
    polling: Arc<AtomicBool>,
}

impl TxWatcherState {
    pub fn new() -> Self {
        Self {
            watcher: tokio::sync::Mutex::new(TxWatcher::new()),
            polling: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register a submitted transaction; returns the watch id
    pub async fn watch(
        &self,
        tx_hash: TxHash,
        operation: impl Into<String>,
        description: impl Into<String>,
    ) -> String {
        let mut watcher = self.watcher.lock().await;
        watcher.add(tx_hash, operation.into(), description.into())
    }

    /// All watched items, including resolved ones not yet pruned
    pub async fn watched_items(&self) -> Vec<WatchedTxDto> {
        let watcher = self.watcher.lock().await;
        watcher.watched_items()
    }

    /// Status of a single watched transaction
    pub async fn status_of(&self, watch_id: &str) -> Option<TxStatusResponse> {
        let watcher = self.watcher.lock().await;
        watcher.status_of(watch_id)
    }
}

impl Default for TxWatcherState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the poll loop unless it is already running.
///
/// The loop exits once no live items remain and restarts on the next
/// submission.
pub fn ensure_poll_loop(state: AppState) {
    if state.watcher().polling.swap(true, Ordering::SeqCst) {
        return; // Already running
    }

    let polling = state.watcher().polling.clone();

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;

            {
                let watcher = state.watcher().watcher.lock().await;
                if !watcher.has_live_items() {
                    polling.store(false, Ordering::SeqCst);
                    break;
                }
            }

            let client = match state.node_client().await {
                Some(c) => c,
                None => continue,
            };

            let mut watcher = state.watcher().watcher.lock().await;
            watcher.poll(&client).await;
        }

        tracing::debug!("Tx watcher poll loop stopped (no live items)");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> WatchItem {
        WatchItem {
            id: "w1".to_string(),
            tx_hash: TxHash::zero(),
            operation: "withdraw".to_string(),
            description: "Withdraw 1.5 GLD".to_string(),
            status: TxStatus::Pending,
            error: None,
            missing_polls: 0,
            submitted_at: Instant::now(),
        }
    }

    #[test]
    fn test_pending_to_confirming_when_hash_known() {
        let mut it = item();
        it.apply_probe(TxProbe::Known);
        assert_eq!(it.status, TxStatus::Confirming);
        assert!(it.error.is_none());
    }

    #[test]
    fn test_receipt_resolves_confirmed_or_failed() {
        let mut it = item();
        it.apply_probe(TxProbe::Receipt { success: true });
        assert_eq!(it.status, TxStatus::Confirmed);
        assert!(it.status.is_terminal());

        let mut it = item();
        it.apply_probe(TxProbe::Receipt { success: false });
        assert_eq!(it.status, TxStatus::Failed);
        assert!(it.error.is_some());
    }

    #[test]
    fn test_unknown_hash_drops_after_grace() {
        let mut it = item();
        it.apply_probe(TxProbe::Known);
        for _ in 0..MISSING_POLLS_BEFORE_DROP - 1 {
            it.apply_probe(TxProbe::Unknown);
            assert_eq!(it.status, TxStatus::Confirming);
        }
        it.apply_probe(TxProbe::Unknown);
        assert_eq!(it.status, TxStatus::Dropped);
    }

    #[test]
    fn test_known_resets_missing_counter() {
        let mut it = item();
        it.apply_probe(TxProbe::Unknown);
        it.apply_probe(TxProbe::Unknown);
        it.apply_probe(TxProbe::Known);
        assert_eq!(it.missing_polls, 0);
        assert_eq!(it.status, TxStatus::Confirming);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TxStatus::Confirming).unwrap(),
            "\"confirming\""
        );
        assert_eq!(TxStatus::Timeout.as_str(), "timeout");
    }

    #[tokio::test]
    async fn test_watch_and_query() {
        let state = TxWatcherState::new();
        let id = state.watch(TxHash::zero(), "mint", "Mint 2 GLD").await;

        let status = state.status_of(&id).await.unwrap();
        assert_eq!(status.status, TxStatus::Pending);
        assert!(status.error.is_none());

        assert!(state.status_of("missing").await.is_none());
        assert_eq!(state.watched_items().await.len(), 1);
    }
}
