// CIT - Capital Income Tax
// Written in 2024 by
//   The CIT developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Market Data
//!
//! Historic daily prices, used to fill in the market price and exchange rate
//! of transactions for which only a date and an amount are known.
//!
//! The price of a day is the midpoint of its open and close. Days without a
//! quote (weekends, holidays) take the price of the most recent day that has
//! one.
//!

use crate::http;
use crate::units::Date;
use anyhow::Context;
use log::{debug, info};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Daily prices, one for every calendar day in some range
pub type DailyPrices = BTreeMap<Date, Decimal>;

/// Something that can provide historic daily prices for a ticker
pub trait PriceSource {
    /// Daily mid prices covering at least `start` through `end`, inclusive
    fn daily_mids(&self, ticker: &str, start: Date, end: Date) -> anyhow::Result<DailyPrices>;
}

/// A single day's quote
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Quote {
    pub date: Date,
    pub open: Decimal,
    pub close: Decimal,
}

impl Quote {
    /// Midpoint of open and close
    pub fn mid(&self) -> Decimal {
        (self.open + self.close) / Decimal::TWO
    }
}

/// Computes a mid price for every calendar day from the first quote to the
/// last, carrying the last known price forward over days without a quote
///
/// If several quotes share a day, the last one wins.
pub fn forward_fill(quotes: &[Quote]) -> DailyPrices {
    let sparse: BTreeMap<Date, Decimal> = quotes.iter().map(|q| (q.date, q.mid())).collect();
    let (first, last) = match (sparse.keys().next(), sparse.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return DailyPrices::new(),
    };

    let mut filled = DailyPrices::new();
    let mut current = Some(first);
    let mut price = sparse[&first];
    while let Some(date) = current.filter(|date| *date <= last) {
        if let Some(quoted) = sparse.get(&date) {
            price = *quoted;
        }
        filled.insert(date, price);
        current = date.next_day();
    }
    filled
}

/// Inverts a series of exchange rates, e.g. SEK/USD into USD/SEK
pub fn invert(prices: &DailyPrices) -> anyhow::Result<DailyPrices> {
    prices
        .iter()
        .map(|(date, rate)| {
            Decimal::ONE
                .checked_div(*rate)
                .map(|inv| (*date, inv))
                .ok_or_else(|| anyhow::Error::msg(format!("zero exchange rate on {date}")))
        })
        .collect()
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize, Debug)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<ChartQuote>,
}

#[derive(Deserialize, Debug)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Extracts the daily quotes from a chart API reply
///
/// Entries with a missing open or close are skipped; they are forward-filled
/// like any other missing day.
fn quotes_from_chart(ticker: &str, resp: ChartResponse) -> anyhow::Result<Vec<Quote>> {
    if let Some(err) = resp.chart.error {
        return Err(anyhow::Error::msg(format!(
            "market data error for {ticker}: {} ({})",
            err.description, err.code
        )));
    }
    let result = resp
        .chart
        .result
        .and_then(|mut results| results.pop())
        .with_context(|| format!("no market data for {ticker}"))?;
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .with_context(|| format!("no quotes for {ticker}"))?;

    let mut quotes = Vec::with_capacity(result.timestamp.len());
    for (idx, ts) in result.timestamp.iter().enumerate() {
        let open = quote.open.get(idx).copied().flatten();
        let close = quote.close.get(idx).copied().flatten();
        if let (Some(open), Some(close)) = (open, close) {
            let date = Date::from_unix_i64(*ts)
                .with_context(|| format!("timestamp of quote {idx} for {ticker}"))?;
            quotes.push(Quote {
                date,
                open: Decimal::from_f64(open)
                    .with_context(|| format!("open price {open} for {ticker} on {date}"))?,
                close: Decimal::from_f64(close)
                    .with_context(|| format!("close price {close} for {ticker} on {date}"))?,
            });
        } else {
            debug!("skipping incomplete quote {} for {}", idx, ticker);
        }
    }
    Ok(quotes)
}

/// Yahoo Finance chart API
pub struct Yahoo {
    base_url: String,
}

impl Yahoo {
    /// Constructs a new market data client against the given base URL
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Yahoo {
            base_url: base_url.into(),
        }
    }

    fn chart_url(&self, ticker: &str, start: Date, end: Date) -> String {
        // period2 is exclusive
        let end_ts = end.next_day().unwrap_or(end).unix_timestamp();
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url.trim_end_matches('/'),
            ticker,
            start.unix_timestamp(),
            end_ts,
        )
    }
}

impl PriceSource for Yahoo {
    fn daily_mids(&self, ticker: &str, start: Date, end: Date) -> anyhow::Result<DailyPrices> {
        info!("Downloading {} prices from {} to {}", ticker, start, end);
        let url = self.chart_url(ticker, start, end);
        let resp: ChartResponse = http::get_json(&url)?;
        let quotes = quotes_from_chart(ticker, resp)?;
        debug!("received {} quotes for {}", quotes.len(), ticker);
        Ok(forward_fill(&quotes))
    }
}
