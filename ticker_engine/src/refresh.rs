//! Refresh driver: loads, ranks, and publishes snapshots on a fixed cadence.
//!
//! The `RefreshDriver` runs on a background thread and owns the data source.
//! It refreshes:
//! - once immediately when started,
//! - on every tick of its interval (default 30 seconds),
//! - immediately when a different timeframe is selected (the interval restarts),
//! - on an explicit `DriverCommand::Refresh`.
//!
//! Refreshes run one after another on the driver thread, so a load for a
//! superseded timeframe can never land after the load for the newer one.
//!
//! Every refresh publishes a complete `DashboardSnapshot` to the shared
//! `SnapshotStore` and broadcasts it to subscribers as
//! `SnapshotEvent::Updated`. Subscribers whose receiver is gone are dropped.
//! On shutdown (a `Shutdown` command, or every command sender dropped) the
//! driver broadcasts `SnapshotEvent::Shutdown` and the thread exits.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use crossbeam_channel::{Receiver, Sender, select, tick, unbounded};
use log::{debug, error, info, warn};
use ticker_common::source::DEFAULT_REFRESH_SECS;
use ticker_common::{RawTicker, Result, Timeframe, TrackerError};

use crate::model::ranking::{Ranking, rank_tickers};
use crate::model::snapshot::{DashboardSnapshot, SnapshotStore};
use crate::source::DataSource;

/// Pipeline signature used by the driver.
pub type Pipeline = fn(&[RawTicker], Timeframe) -> Ranking;

/// Requests accepted by a running driver.
pub enum DriverCommand {
    /// Switch to another timeframe and reload right away.
    SelectTimeframe(Timeframe),
    /// Reload now without waiting for the next tick.
    Refresh,
    /// Register another snapshot subscriber.
    Subscribe(Sender<SnapshotEvent>),
    /// Stop the driver thread.
    Shutdown,
}

/// Message broadcast by the driver to its subscribers.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    /// A refresh finished; the snapshot is already in the store.
    Updated(Arc<DashboardSnapshot>),
    /// The driver stopped.
    Shutdown,
}

/// What the run loop does after handling an event.
enum Flow {
    Continue,
    RestartInterval,
    Stop,
}

/// Periodic loader that keeps a `SnapshotStore` current.
pub struct RefreshDriver {
    source: Box<dyn DataSource>,
    store: SnapshotStore,
    timeframe: Timeframe,
    interval: Duration,
    pipeline: Pipeline,
    subscribers: Vec<Sender<SnapshotEvent>>,
}

impl RefreshDriver {
    /// Creates a driver for `source` starting on `timeframe` with the default interval.
    pub fn new(source: Box<dyn DataSource>, timeframe: Timeframe) -> Self {
        Self {
            source,
            store: SnapshotStore::new(DashboardSnapshot::initial(timeframe)),
            timeframe,
            interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            pipeline: rank_tickers,
            subscribers: Vec::new(),
        }
    }

    /// Overrides the refresh interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replaces the ranking pipeline.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Registers a subscriber that will also see the very first refresh.
    pub fn subscribe(&mut self) -> Receiver<SnapshotEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Store the driver publishes into.
    pub fn store(&self) -> SnapshotStore {
        self.store.clone()
    }

    /// Selected timeframe.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Loads, ranks, and publishes one snapshot on the calling thread.
    ///
    /// Load and processing failures are folded into the published snapshot;
    /// the returned error only reports a poisoned store.
    pub fn refresh_once(&mut self) -> Result<Arc<DashboardSnapshot>> {
        let previous = self.store.load()?;
        let timeframe = self.timeframe;

        let next = match self.source.fetch() {
            Ok(tickers) => {
                info!(
                    "Successfully loaded {} tickers from {}",
                    tickers.len(),
                    self.source.describe()
                );
                let pipeline = self.pipeline;
                match panic::catch_unwind(AssertUnwindSafe(|| pipeline(&tickers, timeframe))) {
                    Ok(ranking) => {
                        debug!(
                            "{}: total={} usdt={} displayed={}",
                            timeframe,
                            ranking.stats.total,
                            ranking.stats.usdt,
                            ranking.stats.filtered
                        );
                        DashboardSnapshot::loaded(ranking, Local::now())
                    }
                    Err(payload) => {
                        let cause = TrackerError::Processing(panic_message(payload.as_ref()));
                        error!("{}", cause);
                        previous.processing_failed(timeframe, cause.to_string(), Local::now())
                    }
                }
            }
            Err(e) => {
                error!("Error loading data from {}: {}", self.source.describe(), e);
                previous.load_failed(timeframe, e.to_string())
            }
        };

        self.store.publish(next)
    }

    /// Spawns the driver thread and returns a handle to control it.
    pub fn start(self) -> DriverHandle {
        let (command_tx, command_rx) = unbounded::<DriverCommand>();
        let store = self.store.clone();
        let thread = thread::spawn(move || self.run(command_rx));
        DriverHandle {
            commands: command_tx,
            store,
            thread: Some(thread),
        }
    }

    fn run(mut self, commands: Receiver<DriverCommand>) {
        info!(
            "Refresh driver started: source={} timeframe={} interval={:?}",
            self.source.describe(),
            self.timeframe,
            self.interval
        );
        let mut ticker = tick(self.interval);
        self.refresh_and_broadcast();

        loop {
            let flow = select! {
                recv(commands) -> msg => match msg {
                    Ok(command) => self.handle(command),
                    Err(_) => Flow::Stop,
                },
                recv(ticker) -> _ => {
                    self.refresh_and_broadcast();
                    Flow::Continue
                },
            };
            match flow {
                Flow::Continue => {}
                Flow::RestartInterval => ticker = tick(self.interval),
                Flow::Stop => break,
            }
        }

        self.subscribers
            .retain(|tx| tx.send(SnapshotEvent::Shutdown).is_ok());
        info!("Refresh driver stopped");
    }

    fn handle(&mut self, command: DriverCommand) -> Flow {
        match command {
            DriverCommand::SelectTimeframe(timeframe) if timeframe == self.timeframe => {
                debug!("Timeframe {} already selected", timeframe);
                Flow::Continue
            }
            DriverCommand::SelectTimeframe(timeframe) => {
                info!("Timeframe changed: {} -> {}", self.timeframe, timeframe);
                self.timeframe = timeframe;
                self.refresh_and_broadcast();
                Flow::RestartInterval
            }
            DriverCommand::Refresh => {
                self.refresh_and_broadcast();
                Flow::Continue
            }
            DriverCommand::Subscribe(tx) => {
                self.subscribers.push(tx);
                debug!("Subscriber added. Total subscribers: {}", self.subscribers.len());
                Flow::Continue
            }
            DriverCommand::Shutdown => Flow::Stop,
        }
    }

    fn refresh_and_broadcast(&mut self) {
        match self.refresh_once() {
            Ok(snapshot) => {
                self.subscribers
                    .retain(|tx| tx.send(SnapshotEvent::Updated(Arc::clone(&snapshot))).is_ok());
            }
            Err(e) => warn!("Snapshot not published: {}", e),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "pipeline panicked".to_string()
    }
}

/// Control handle for a running `RefreshDriver`.
pub struct DriverHandle {
    commands: Sender<DriverCommand>,
    store: SnapshotStore,
    thread: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Sender for issuing commands from other threads.
    pub fn commands(&self) -> Sender<DriverCommand> {
        self.commands.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Result<Arc<DashboardSnapshot>> {
        self.store.load()
    }

    /// Switches the timeframe; the driver reloads immediately.
    pub fn select_timeframe(&self, timeframe: Timeframe) -> Result<()> {
        self.send(DriverCommand::SelectTimeframe(timeframe))
    }

    /// Requests an immediate reload.
    pub fn refresh(&self) -> Result<()> {
        self.send(DriverCommand::Refresh)
    }

    /// Registers a new subscriber; it receives events from the next refresh on.
    pub fn subscribe(&self) -> Result<Receiver<SnapshotEvent>> {
        let (tx, rx) = unbounded();
        self.send(DriverCommand::Subscribe(tx))?;
        Ok(rx)
    }

    /// Stops the driver and waits for its thread to exit.
    pub fn shutdown(mut self) -> Result<()> {
        // The driver may already be gone; joining below still reports a panic.
        let _ = self.commands.send(DriverCommand::Shutdown);
        match self.thread.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TrackerError::Processing("refresh driver thread panicked".to_string())),
            None => Ok(()),
        }
    }

    fn send(&self, command: DriverCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|e| TrackerError::ChannelSend(e.to_string()))
    }
}
