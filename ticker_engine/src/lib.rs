//! Ticker ranking engine.
//!
//! Turns a snapshot of raw exchange tickers into three ranked, display-ready
//! lists and keeps them fresh on a fixed cadence. The crate wires together:
//!
//! - `source` — `DataSource` adapters that load the snapshot document from a
//!   file or over HTTP.
//! - `model::coin` — per-record derivation (`NormalizedCoin`) and the
//!   qualification rules that reject leveraged, wrapped, and malformed pairs.
//! - `model::ranking` — the pure pipeline `rank_tickers` producing the hot,
//!   gainers, and losers lists plus summary counts.
//! - `model::snapshot` — the immutable `DashboardSnapshot` readers observe and
//!   the `SnapshotStore` that swaps it atomically.
//! - `refresh` — the `RefreshDriver` thread that loads, ranks, and publishes
//!   on start, on every interval tick, and on every timeframe change.
#![warn(missing_docs)]
pub mod model;
pub mod refresh;
pub mod source;

pub use model::coin::NormalizedCoin;
pub use model::ranking::{RankCriterion, RankedList, Ranking, TickerStats, rank_tickers};
pub use model::snapshot::{ConnectionStatus, DashboardSnapshot, RefreshError, SnapshotStore};
pub use refresh::{DriverCommand, DriverHandle, RefreshDriver, SnapshotEvent};
pub use source::{DataSource, FileSource, HttpSource};
