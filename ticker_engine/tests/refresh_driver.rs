//! Refresh Driver Tests
//!
//! These tests run the driver thread against scripted in-memory sources and
//! check what subscribers and the snapshot store observe: the initial load,
//! interval reloads, timeframe switches, and both failure kinds.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use ticker_common::{RawTicker, Result, Timeframe, TrackerError};
use ticker_engine::{
    ConnectionStatus, DashboardSnapshot, DataSource, Ranking, RefreshDriver, RefreshError,
    SnapshotEvent,
};

const WAIT: Duration = Duration::from_secs(5);
const LONG_INTERVAL: Duration = Duration::from_secs(3600);

/// In-memory source that can be switched into a failing state.
struct ScriptedSource {
    tickers: Vec<RawTicker>,
    failing: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(tickers: Vec<RawTicker>) -> (Self, Arc<AtomicBool>, Arc<AtomicUsize>) {
        let failing = Arc::new(AtomicBool::new(false));
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = Self {
            tickers,
            failing: Arc::clone(&failing),
            fetches: Arc::clone(&fetches),
        };
        (source, failing, fetches)
    }
}

impl DataSource for ScriptedSource {
    fn fetch(&self) -> Result<Vec<RawTicker>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(TrackerError::HttpStatus(503));
        }
        Ok(self.tickers.clone())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

fn ticker(event: &str, symbol: &str, close: &str, open: &str) -> RawTicker {
    RawTicker {
        event_type: Some(event.to_string()),
        event_time: Some(1_700_000_000_000),
        symbol: Some(symbol.to_string()),
        close: Some(close.to_string()),
        open: Some(open.to_string()),
        volume: Some("10".to_string()),
        quote_volume: Some("1000".to_string()),
        ..RawTicker::default()
    }
}

fn batch() -> Vec<RawTicker> {
    vec![
        ticker("24hrMiniTicker", "BTCUSDT", "110", "100"),
        ticker("24hrMiniTicker", "ETHUSDT", "90", "100"),
        ticker("1hTicker", "SOLUSDT", "101", "100"),
    ]
}

fn next_snapshot(rx: &Receiver<SnapshotEvent>) -> Arc<DashboardSnapshot> {
    match rx.recv_timeout(WAIT).expect("driver should publish") {
        SnapshotEvent::Updated(snapshot) => snapshot,
        SnapshotEvent::Shutdown => panic!("driver stopped unexpectedly"),
    }
}

fn symbols(snapshot: &DashboardSnapshot) -> Vec<String> {
    snapshot
        .ranking
        .hot
        .coins
        .iter()
        .map(|c| c.symbol.clone())
        .collect()
}

#[test]
fn first_load_happens_on_start() {
    let (source, _, fetches) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(LONG_INTERVAL);
    let rx = driver.subscribe();
    let handle = driver.start();

    let snapshot = next_snapshot(&rx);
    assert_eq!(snapshot.status, ConnectionStatus::Connected);
    assert_eq!(snapshot.timeframe, Timeframe::Day);
    assert_eq!(symbols(&snapshot), vec!["BTC", "ETH"]);
    assert_eq!(snapshot.ranking.stats.total, 3);
    assert!(snapshot.last_update.is_some());
    assert!(snapshot.error.is_none());
    assert!(Arc::ptr_eq(&snapshot, &handle.snapshot().unwrap()));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    handle.shutdown().unwrap();
}

#[test]
fn interval_ticks_reload() {
    let (source, _, fetches) = ScriptedSource::new(batch());
    let mut driver =
        RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(Duration::from_millis(20));
    let rx = driver.subscribe();
    let handle = driver.start();

    for _ in 0..3 {
        next_snapshot(&rx);
    }
    assert!(fetches.load(Ordering::SeqCst) >= 3);
    handle.shutdown().unwrap();
}

#[test]
fn selecting_a_timeframe_reloads_immediately() {
    let (source, _, _) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(LONG_INTERVAL);
    let rx = driver.subscribe();
    let handle = driver.start();
    next_snapshot(&rx);

    handle.select_timeframe(Timeframe::OneHour).unwrap();
    let snapshot = next_snapshot(&rx);
    assert_eq!(snapshot.timeframe, Timeframe::OneHour);
    assert_eq!(symbols(&snapshot), vec!["SOL"]);
    assert_eq!(snapshot.ranking.gainers.coins[0].symbol, "SOL");

    handle.shutdown().unwrap();
}

#[test]
fn reselecting_the_same_timeframe_does_not_reload() {
    let (source, _, fetches) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(LONG_INTERVAL);
    let rx = driver.subscribe();
    let handle = driver.start();
    next_snapshot(&rx);

    handle.select_timeframe(Timeframe::Day).unwrap();
    handle.refresh().unwrap();
    next_snapshot(&rx);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);

    handle.shutdown().unwrap();
}

#[test]
fn load_failure_keeps_previous_lists() {
    let (source, failing, _) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(LONG_INTERVAL);
    let rx = driver.subscribe();
    let handle = driver.start();
    let good = next_snapshot(&rx);

    failing.store(true, Ordering::SeqCst);
    handle.refresh().unwrap();
    let failed = next_snapshot(&rx);
    assert_eq!(failed.status, ConnectionStatus::Disconnected);
    assert_eq!(failed.ranking, good.ranking);
    assert_eq!(failed.last_update, good.last_update);
    match &failed.error {
        Some(RefreshError::Load(detail)) => assert!(detail.contains("503")),
        other => panic!("expected load error, got {other:?}"),
    }

    failing.store(false, Ordering::SeqCst);
    handle.refresh().unwrap();
    let recovered = next_snapshot(&rx);
    assert_eq!(recovered.status, ConnectionStatus::Connected);
    assert!(recovered.error.is_none());

    handle.shutdown().unwrap();
}

fn exploding_pipeline(_: &[RawTicker], _: Timeframe) -> Ranking {
    panic!("unexpected record layout")
}

#[test]
fn processing_failure_is_surfaced_and_loop_survives() {
    let (source, _, fetches) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day)
        .with_interval(LONG_INTERVAL)
        .with_pipeline(exploding_pipeline);
    let rx = driver.subscribe();
    let handle = driver.start();

    let snapshot = next_snapshot(&rx);
    assert_eq!(snapshot.status, ConnectionStatus::Connected);
    assert!(snapshot.ranking.hot.is_empty());
    match &snapshot.error {
        Some(RefreshError::Processing(detail)) => {
            assert!(detail.contains("unexpected record layout"))
        }
        other => panic!("expected processing error, got {other:?}"),
    }

    handle.refresh().unwrap();
    next_snapshot(&rx);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    handle.shutdown().unwrap();
}

#[test]
fn late_subscribers_and_shutdown() {
    let (source, _, _) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::Day).with_interval(LONG_INTERVAL);
    let first = driver.subscribe();
    let handle = driver.start();
    next_snapshot(&first);

    let late = handle.subscribe().unwrap();
    handle.refresh().unwrap();
    next_snapshot(&late);
    next_snapshot(&first);

    handle.shutdown().unwrap();
    assert!(matches!(late.recv_timeout(WAIT), Ok(SnapshotEvent::Shutdown)));
    assert!(matches!(first.recv_timeout(WAIT), Ok(SnapshotEvent::Shutdown)));
}

#[test]
fn refresh_once_runs_on_the_calling_thread() {
    let (source, _, _) = ScriptedSource::new(batch());
    let mut driver = RefreshDriver::new(Box::new(source), Timeframe::FourHours);
    let snapshot = driver.refresh_once().unwrap();
    assert_eq!(snapshot.status, ConnectionStatus::Connected);
    assert_eq!(snapshot.ranking.stats.total, 3);
    assert_eq!(snapshot.ranking.stats.usdt, 0);
    assert!(Arc::ptr_eq(&snapshot, &driver.store().load().unwrap()));
    assert_eq!(driver.timeframe(), Timeframe::FourHours);
}
