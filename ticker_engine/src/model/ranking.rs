//! Ticker ranking pipeline.
//!
//! `rank_tickers` is a pure function of `(raw tickers, timeframe)`:
//!
//! 1. keep records whose event type equals the timeframe tag (exact match);
//! 2. keep quote-asset pairs with a close price;
//! 3. derive a `NormalizedCoin` per record;
//! 4. drop coins failing the qualification filter;
//! 5. rank into hot (quote volume desc), gainers (change desc, > 0) and
//!    losers (change asc, < 0), each truncated to `RANKED_LIST_LEN`.
//!
//! All sorts are stable, so ties keep input order and identical input always
//! yields identical output.

use std::cmp::Ordering;

use serde::Serialize;
use ticker_common::source::RANKED_LIST_LEN;
use ticker_common::{RawTicker, Timeframe};

use crate::model::coin::NormalizedCoin;

/// Ordering a ranked list was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankCriterion {
    /// Highest quote volume first.
    QuoteVolumeDesc,
    /// Largest positive change first.
    ChangeDesc,
    /// Most negative change first.
    ChangeAsc,
}

impl RankCriterion {
    /// Section title shown above the list.
    pub fn title(self) -> &'static str {
        match self {
            RankCriterion::QuoteVolumeDesc => "Hot Coins",
            RankCriterion::ChangeDesc => "Top Gainers",
            RankCriterion::ChangeAsc => "Top Losers",
        }
    }

    fn compare(self, a: &NormalizedCoin, b: &NormalizedCoin) -> Ordering {
        match self {
            RankCriterion::QuoteVolumeDesc => descending(a.quote_volume, b.quote_volume),
            RankCriterion::ChangeDesc => descending(a.change_percent, b.change_percent),
            RankCriterion::ChangeAsc => descending(b.change_percent, a.change_percent),
        }
    }

    fn admits(self, coin: &NormalizedCoin) -> bool {
        match self {
            RankCriterion::QuoteVolumeDesc => true,
            RankCriterion::ChangeDesc => coin.change_percent > 0.0,
            RankCriterion::ChangeAsc => coin.change_percent < 0.0,
        }
    }
}

/// Incomparable values (NaN) compare equal so the stable sort leaves them in place.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Up to `RANKED_LIST_LEN` coins ordered by `criterion`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedList {
    /// How the coins are ordered.
    pub criterion: RankCriterion,
    /// The ranked coins, best first.
    pub coins: Vec<NormalizedCoin>,
}

impl RankedList {
    /// Empty list for `criterion`.
    pub fn empty(criterion: RankCriterion) -> Self {
        Self {
            criterion,
            coins: Vec::new(),
        }
    }

    /// Ranks the admitted subset of `qualified` by `criterion` and keeps the top entries.
    pub fn build(criterion: RankCriterion, qualified: &[NormalizedCoin]) -> Self {
        let mut coins: Vec<NormalizedCoin> = qualified
            .iter()
            .filter(|c| criterion.admits(c))
            .cloned()
            .collect();
        coins.sort_by(|a, b| criterion.compare(a, b));
        coins.truncate(RANKED_LIST_LEN);
        Self { criterion, coins }
    }

    /// Number of coins in the list.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Returns `true` when the list holds no coins.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

/// Summary counts of a pipeline run. Always `filtered <= usdt <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickerStats {
    /// Records in the input, before any filter.
    pub total: usize,
    /// Quote-asset pairs within the selected timeframe.
    pub usdt: usize,
    /// Coins that passed every filter.
    pub filtered: usize,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Timeframe the lists were computed for.
    pub timeframe: Timeframe,
    /// Highest quote volume.
    pub hot: RankedList,
    /// Highest positive change.
    pub gainers: RankedList,
    /// Most negative change.
    pub losers: RankedList,
    /// Summary counts.
    pub stats: TickerStats,
}

impl Ranking {
    /// Ranking with three empty lists and zeroed counts.
    pub fn empty(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            hot: RankedList::empty(RankCriterion::QuoteVolumeDesc),
            gainers: RankedList::empty(RankCriterion::ChangeDesc),
            losers: RankedList::empty(RankCriterion::ChangeAsc),
            stats: TickerStats::default(),
        }
    }

    /// The three lists in display order.
    pub fn lists(&self) -> [&RankedList; 3] {
        [&self.hot, &self.gainers, &self.losers]
    }
}

/// Filters, normalizes, and ranks `tickers` for `timeframe`.
pub fn rank_tickers(tickers: &[RawTicker], timeframe: Timeframe) -> Ranking {
    let tag = timeframe.tag();
    let quote_pairs: Vec<&RawTicker> = tickers
        .iter()
        .filter(|t| t.event_type.as_deref() == Some(tag))
        .filter(|t| NormalizedCoin::is_quote_pair(t))
        .collect();

    let qualified: Vec<NormalizedCoin> = quote_pairs
        .iter()
        .filter_map(|t| NormalizedCoin::from_raw(t))
        .filter(NormalizedCoin::qualifies)
        .collect();

    Ranking {
        timeframe,
        hot: RankedList::build(RankCriterion::QuoteVolumeDesc, &qualified),
        gainers: RankedList::build(RankCriterion::ChangeDesc, &qualified),
        losers: RankedList::build(RankCriterion::ChangeAsc, &qualified),
        stats: TickerStats {
            total: tickers.len(),
            usdt: quote_pairs.len(),
            filtered: qualified.len(),
        },
    }
}
