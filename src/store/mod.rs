//! Session state: the authoritative result collection and status record,
//! plus filtered/sorted read views over snapshots of it.

use chrono::Utc;
use std::str::FromStr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;

use crate::core::error::ScannerError;
use crate::core::results::{ScanOptions, ScanResult, ScanStatus};

#[derive(Debug, Default)]
struct Session {
    results: Vec<ScanResult>,
    status: ScanStatus,
    options: Option<ScanOptions>,
}

/// Cheaply clonable handle to the session owned by one dashboard run.
///
/// The store is the single owner of the result collection and status record;
/// the simulator mutates it through the crate-private methods and every reader
/// gets an independent snapshot. Nothing here persists across processes.
#[derive(Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<Session>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ScanStatus {
        self.read().status.clone()
    }

    /// Snapshot of the result collection in discovery order.
    pub fn results(&self) -> Vec<ScanResult> {
        self.read().results.clone()
    }

    pub fn result_count(&self) -> usize {
        self.read().results.len()
    }

    /// Options recorded at the start of the current/most recent scan.
    pub fn options(&self) -> Option<ScanOptions> {
        self.read().options.clone()
    }

    /// Reset the session for a fresh scan: prior results are dropped and the
    /// status moves to scanning with progress 0.
    pub(crate) fn begin_scan(&self, total: u32, options: ScanOptions) {
        let mut session = self.write();
        session.results.clear();
        session.options = Some(options);
        session.status = ScanStatus {
            is_scanning: true,
            progress: 0,
            total,
            start_time: Some(Utc::now()),
            end_time: None,
        };
    }

    /// Apply one simulation tick: advance progress and append the tick's
    /// result, if any. Returns false without touching the session when the
    /// run's token was cancelled before the lock was taken.
    pub(crate) fn record_tick(
        &self,
        cancel: &CancellationToken,
        tick: u32,
        result: Option<ScanResult>,
    ) -> bool {
        let mut session = self.write();
        if cancel.is_cancelled() {
            return false;
        }
        session.status.progress = tick.min(session.status.total);
        if let Some(result) = result {
            session.results.push(result);
        }
        true
    }

    /// Terminal transition for a run that consumed every tick. Honors the
    /// token: a cancelled run was already finalized by `finish_scan`.
    pub(crate) fn complete_scan(&self, cancel: &CancellationToken) {
        let mut session = self.write();
        if cancel.is_cancelled() {
            return;
        }
        finalize(&mut session);
    }

    /// Terminal transition for `stop()`. No-op when no scan is active, so a
    /// finished scan keeps its original end time.
    pub(crate) fn finish_scan(&self) {
        let mut session = self.write();
        finalize(&mut session);
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn finalize(session: &mut Session) {
    if session.status.is_scanning {
        session.status.is_scanning = false;
        session.status.end_time = Some(Utc::now());
    }
}

/// Case-insensitive substring filter over url, key type, key value and source
/// file. An empty query returns the collection unchanged; matches keep their
/// original relative order.
pub fn filter_results(results: &[ScanResult], query: &str) -> Vec<ScanResult> {
    if query.is_empty() {
        return results.to_vec();
    }
    let query = query.to_lowercase();
    results
        .iter()
        .filter(|r| {
            r.url.to_lowercase().contains(&query)
                || r.key_type.as_str().to_lowercase().contains(&query)
                || r.key_value.to_lowercase().contains(&query)
                || r.source_file.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Field a result view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Url,
    KeyType,
    KeyValue,
    DiscoveredAt,
}

impl FromStr for SortKey {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" => Ok(SortKey::Url),
            "key-type" | "keytype" => Ok(SortKey::KeyType),
            "key-value" | "keyvalue" => Ok(SortKey::KeyValue),
            "discovered-at" | "discoveredat" => Ok(SortKey::DiscoveredAt),
            other => Err(ScannerError::Config(format!("Unknown sort key: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ScannerError::Config(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}

/// Stable sort into a new vector; ties keep their discovery order.
pub fn sort_results(results: &[ScanResult], key: SortKey, order: SortOrder) -> Vec<ScanResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Url => a.url.cmp(&b.url),
            SortKey::KeyType => a.key_type.as_str().cmp(b.key_type.as_str()),
            SortKey::KeyValue => a.key_value.cmp(&b.key_value),
            SortKey::DiscoveredAt => a.discovered_at.cmp(&b.discovered_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Sort selection with the dashboard's toggle contract: picking the active
/// key flips the direction, picking a new key resets to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::DiscoveredAt,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.flipped();
        } else {
            self.key = key;
            self.order = SortOrder::Desc;
        }
    }

    pub fn apply(&self, results: &[ScanResult]) -> Vec<ScanResult> {
        sort_results(results, self.key, self.order)
    }
}
