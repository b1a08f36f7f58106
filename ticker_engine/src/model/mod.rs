//! Domain models for the ticker engine.
//!
//! - `coin` — `NormalizedCoin` derived from a raw record, plus the qualification filter.
//! - `ranking` — the ranking pipeline and its outputs.
//! - `snapshot` — the state value published by the refresh driver.

pub mod coin;
pub mod ranking;
pub mod snapshot;
