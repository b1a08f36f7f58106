//! Dashboard state published by the refresh driver.
//!
//! Readers never see a half-updated state: every refresh builds a complete new
//! `DashboardSnapshot` and swaps it into the `SnapshotStore` as one
//! `Arc`. Failed refreshes keep the previously ranked lists and only change
//! the connection status and the surfaced error.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use serde::Serialize;
use ticker_common::{Result, Timeframe, TrackerError};

use crate::model::ranking::Ranking;

/// Whether the last load of the snapshot source succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    /// Last load succeeded.
    Connected,
    /// No successful load yet, or the last load failed.
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    /// Human label for the status indicator.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

/// Error surfaced to the reader by the last refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RefreshError {
    /// The source was unreachable or did not hold a JSON ticker array.
    Load(String),
    /// The pipeline failed while processing an otherwise valid document.
    Processing(String),
}

impl RefreshError {
    /// Message shown in place of the ranked lists.
    pub fn user_message(&self) -> &'static str {
        match self {
            RefreshError::Load(_) => {
                "Failed to load data. Please ensure the ticker snapshot is available."
            }
            RefreshError::Processing(_) => "Error processing ticker data",
        }
    }

    /// Underlying cause, for logs.
    pub fn detail(&self) -> &str {
        match self {
            RefreshError::Load(d) | RefreshError::Processing(d) => d,
        }
    }
}

impl From<&RefreshError> for TrackerError {
    fn from(err: &RefreshError) -> Self {
        match err {
            RefreshError::Load(d) => TrackerError::Load(d.clone()),
            RefreshError::Processing(d) => TrackerError::Processing(d.clone()),
        }
    }
}

/// Immutable view of everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Timeframe currently selected.
    pub timeframe: Timeframe,
    /// Lists and counts from the last successful pipeline run.
    pub ranking: Ranking,
    /// Outcome of the last load.
    pub status: ConnectionStatus,
    /// Completion time of the last successful load.
    pub last_update: Option<DateTime<Local>>,
    /// Error of the last refresh, if it failed.
    pub error: Option<RefreshError>,
}

impl DashboardSnapshot {
    /// State before the first load completes.
    pub fn initial(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ranking: Ranking::empty(timeframe),
            status: ConnectionStatus::Disconnected,
            last_update: None,
            error: None,
        }
    }

    /// Successor state after a successful load and pipeline run.
    pub fn loaded(ranking: Ranking, at: DateTime<Local>) -> Self {
        Self {
            timeframe: ranking.timeframe,
            ranking,
            status: ConnectionStatus::Connected,
            last_update: Some(at),
            error: None,
        }
    }

    /// Successor state after a failed load: prior lists stay, status drops.
    pub fn load_failed(&self, timeframe: Timeframe, cause: String) -> Self {
        Self {
            timeframe,
            status: ConnectionStatus::Disconnected,
            error: Some(RefreshError::Load(cause)),
            ..self.clone()
        }
    }

    /// Successor state after the pipeline failed on a loaded document.
    pub fn processing_failed(&self, timeframe: Timeframe, cause: String, at: DateTime<Local>) -> Self {
        Self {
            timeframe,
            status: ConnectionStatus::Connected,
            last_update: Some(at),
            error: Some(RefreshError::Processing(cause)),
            ..self.clone()
        }
    }
}

/// Holder of the latest snapshot, shared between the driver and readers.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Arc<Mutex<Arc<DashboardSnapshot>>>,
}

impl SnapshotStore {
    /// Creates a store holding `initial`.
    pub fn new(initial: DashboardSnapshot) -> Self {
        Self {
            current: Arc::new(Mutex::new(Arc::new(initial))),
        }
    }

    /// Latest published snapshot.
    pub fn load(&self) -> Result<Arc<DashboardSnapshot>> {
        let guard = self.current.lock()?;
        Ok(Arc::clone(&guard))
    }

    /// Replaces the published snapshot and returns the new one.
    pub fn publish(&self, snapshot: DashboardSnapshot) -> Result<Arc<DashboardSnapshot>> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.lock()?;
        *guard = Arc::clone(&next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snapshot_is_disconnected_and_empty() {
        let snapshot = DashboardSnapshot::initial(Timeframe::FourHours);
        assert_eq!(snapshot.status, ConnectionStatus::Disconnected);
        assert_eq!(snapshot.timeframe, Timeframe::FourHours);
        assert!(snapshot.ranking.hot.is_empty());
        assert!(snapshot.last_update.is_none());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn failed_load_keeps_previous_ranking() {
        let mut ranking = Ranking::empty(Timeframe::Day);
        ranking.stats.total = 42;
        let at = Local::now();
        let loaded = DashboardSnapshot::loaded(ranking, at);
        assert_eq!(loaded.status, ConnectionStatus::Connected);

        let failed = loaded.load_failed(Timeframe::OneHour, "connection refused".to_string());
        assert_eq!(failed.status, ConnectionStatus::Disconnected);
        assert_eq!(failed.timeframe, Timeframe::OneHour);
        assert_eq!(failed.ranking.stats.total, 42);
        assert_eq!(failed.last_update, Some(at));
        assert_eq!(
            failed.error,
            Some(RefreshError::Load("connection refused".to_string()))
        );
    }

    #[test]
    fn processing_failure_has_its_own_message() {
        let load = RefreshError::Load("x".to_string());
        let processing = RefreshError::Processing("y".to_string());
        assert_ne!(load.user_message(), processing.user_message());
        assert_eq!(processing.detail(), "y");
        assert!(matches!(TrackerError::from(&load), TrackerError::Load(d) if d == "x"));

        let failed = DashboardSnapshot::initial(Timeframe::Day).processing_failed(
            Timeframe::Day,
            "boom".to_string(),
            Local::now(),
        );
        assert_eq!(failed.status, ConnectionStatus::Connected);
        assert!(matches!(failed.error, Some(RefreshError::Processing(_))));
    }

    #[test]
    fn store_swaps_whole_snapshots() {
        let store = SnapshotStore::new(DashboardSnapshot::initial(Timeframe::Day));
        let before = store.load().unwrap();
        let reader = store.clone();

        let published = store
            .publish(DashboardSnapshot::loaded(Ranking::empty(Timeframe::Day), Local::now()))
            .unwrap();

        let after = reader.load().unwrap();
        assert!(Arc::ptr_eq(&published, &after));
        assert_eq!(before.status, ConnectionStatus::Disconnected);
        assert_eq!(after.status, ConnectionStatus::Connected);
    }
}
