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

//! Ledger Input and Output
//!
//! Reads transaction files and writes merged ones. A transaction file looks
//! like
//!
//! ```json
//! {
//!     "Asset": "BTC-USD",
//!     "AssetPriceCurrency": "USD",
//!     "Transactions": [
//!         {"date": "2021-10-12", "amount": 0.5, "market price": 40000, "exchange rate": 9.1}
//!     ]
//! }
//! ```
//!
//! Transactions either carry a market price and exchange rate ("complete"
//! files) or just a date and an amount ("basic" files). For basic files the
//! missing data is looked up from the market data provider, using the
//! `Asset` field as the ticker.
//!

use super::{Ledger, Transaction};
use crate::config::Configuration;
use crate::file::TextFile;
use crate::market_data::{self, PriceSource};
use crate::units::{Amount, Date, Price};
use anyhow::Context;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fs, io, path::Path};

static KEY_DATE: &str = "date";
static KEY_AMOUNT: &str = "amount";
static KEY_PRICE: &str = "market price";
static KEY_FX_RATE: &str = "exchange rate";

/// Decimal places kept on load
const AMOUNT_DP: u32 = 6;
const PRICE_DP: u32 = 2;
const FX_RATE_DP: u32 = 2;

/// Which fields the transactions of a file carry
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RecordKind {
    /// Only date and amount; prices must be looked up
    Basic,
    /// Date, amount, market price and exchange rate
    Complete,
}

#[derive(Deserialize, Debug)]
struct InputFile {
    #[serde(rename = "Asset")]
    asset: String,
    #[serde(rename = "Transactions")]
    transactions: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct BasicRecord {
    date: Date,
    amount: Amount,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(deny_unknown_fields)]
struct CompleteRecord {
    date: Date,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    amount: Decimal,
    #[serde(rename = "market price")]
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Decimal,
    #[serde(rename = "exchange rate")]
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    fx_rate: Decimal,
}

impl From<CompleteRecord> for Transaction {
    fn from(rec: CompleteRecord) -> Self {
        Transaction {
            date: rec.date,
            amount: rec.amount.into(),
            price: rec.price.into(),
            fx_rate: rec.fx_rate,
        }
    }
}

impl From<&Transaction> for CompleteRecord {
    fn from(tx: &Transaction) -> Self {
        CompleteRecord {
            date: tx.date,
            amount: tx.amount.to_decimal(),
            price: tx.price.to_decimal(),
            fx_rate: tx.fx_rate,
        }
    }
}

/// Determines whether a list of transaction records is basic or complete
///
/// All records of a file must be of the same kind.
pub fn record_kind(
    records: &[serde_json::Map<String, serde_json::Value>],
) -> anyhow::Result<RecordKind> {
    let basic: BTreeSet<&str> = [KEY_DATE, KEY_AMOUNT].into_iter().collect();
    let complete: BTreeSet<&str> = [KEY_DATE, KEY_AMOUNT, KEY_PRICE, KEY_FX_RATE]
        .into_iter()
        .collect();

    let mut kind = None;
    for (idx, record) in records.iter().enumerate() {
        let keys: BTreeSet<&str> = record.keys().map(String::as_str).collect();
        let this_kind = if keys == basic {
            RecordKind::Basic
        } else if keys == complete {
            RecordKind::Complete
        } else {
            return Err(anyhow::Error::msg(format!(
                "Unknown format of transaction data: record {} has fields {:?}; expected either \
                 {:?} or {:?}",
                idx, keys, basic, complete,
            )));
        };
        match kind {
            None => kind = Some(this_kind),
            Some(k) if k == this_kind => {}
            Some(k) => {
                return Err(anyhow::Error::msg(format!(
                    "record {idx} is {this_kind:?} but earlier records are {k:?}"
                )))
            }
        }
    }
    // An empty list is trivially complete; there is nothing to look up
    Ok(kind.unwrap_or(RecordKind::Complete))
}

/// Rounds a transaction to the precision kept in the ledger
fn rounded(tx: Transaction) -> Transaction {
    Transaction {
        date: tx.date,
        amount: tx.amount.round_dp(AMOUNT_DP),
        price: tx.price.round_dp(PRICE_DP),
        fx_rate: tx.fx_rate.round_dp(FX_RATE_DP),
    }
}

/// Fills in market price and exchange rate for basic records
///
/// Prices come from the asset's ticker; exchange rates from the
/// `{domestic}USD=X` ticker, inverted to give domestic currency per dollar.
fn complement_basic(
    asset: &str,
    records: Vec<BasicRecord>,
    domestic_currency: &str,
    source: &dyn PriceSource,
) -> anyhow::Result<Vec<Transaction>> {
    let (first, last) = match (
        records.iter().map(|r| r.date.year()).min(),
        records.iter().map(|r| r.date.year()).max(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(vec![]),
    };
    let start = Date::start_of_year(first)?;
    let end = Date::end_of_year(last)?;

    let prices = source
        .daily_mids(asset, start, end)
        .with_context(|| format!("getting {asset} prices"))?;
    let fx_ticker = format!("{domestic_currency}USD=X");
    let fx_rates = source
        .daily_mids(&fx_ticker, start, end)
        .and_then(|rates| market_data::invert(&rates))
        .with_context(|| format!("getting {fx_ticker} exchange rates"))?;

    records
        .into_iter()
        .map(|rec| {
            let price = prices
                .get(&rec.date)
                .with_context(|| format!("no {} price for {}", asset, rec.date))?;
            let fx_rate = fx_rates
                .get(&rec.date)
                .with_context(|| format!("no {} exchange rate for {}", fx_ticker, rec.date))?;
            Ok(Transaction {
                date: rec.date,
                amount: rec.amount,
                price: Price::from(*price),
                fx_rate: *fx_rate,
            })
        })
        .collect()
}

/// Reads the transactions of a single input file from JSON data
///
/// The transactions are returned in file order, rounded.
pub fn read_transactions<R: io::Read>(
    reader: R,
    config: &Configuration,
    source: &dyn PriceSource,
) -> anyhow::Result<Vec<Transaction>> {
    let input: InputFile = serde_json::from_reader(reader).context("decoding json")?;
    let kind = record_kind(&input.transactions)?;
    debug!(
        "{} transactions of {} in {:?} format",
        input.transactions.len(),
        input.asset,
        kind
    );

    let transactions = match kind {
        RecordKind::Complete => input
            .transactions
            .into_iter()
            .enumerate()
            .map(|(idx, map)| {
                serde_json::from_value::<CompleteRecord>(serde_json::Value::Object(map))
                    .map(Transaction::from)
                    .with_context(|| format!("decoding transaction {idx}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?,
        RecordKind::Basic => {
            let records = input
                .transactions
                .into_iter()
                .enumerate()
                .map(|(idx, map)| {
                    serde_json::from_value::<BasicRecord>(serde_json::Value::Object(map))
                        .with_context(|| format!("decoding transaction {idx}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            complement_basic(&input.asset, records, config.domestic_currency(), source)?
        }
    };
    Ok(transactions.into_iter().map(rounded).collect())
}

/// Reads a single input file
pub fn read_file<P: AsRef<Path>>(
    filepath: P,
    config: &Configuration,
    source: &dyn PriceSource,
) -> anyhow::Result<Vec<Transaction>> {
    let filename = filepath.as_ref().to_string_lossy();
    let fh = fs::File::open(filepath.as_ref())
        .with_context(|| format!("Input file \"{filename}\" doesn't exist or can't be opened"))?;
    read_transactions(io::BufReader::new(fh), config, source)
        .with_context(|| format!("reading transactions from {filename}"))
}

/// Reads several input files, resolved against the configured data directory,
/// and merges them into a single ledger
pub fn load_ledger<S: AsRef<str>>(
    files: &[S],
    config: &Configuration,
    source: &dyn PriceSource,
) -> anyhow::Result<Ledger> {
    let mut ledger = Ledger::new();
    for file in files {
        let path = config.input_path(file.as_ref());
        let transactions = read_file(&path, config, source)?;
        info!(
            "Read {} transactions from {}",
            transactions.len(),
            path.to_string_lossy()
        );
        ledger.extend(transactions);
    }
    Ok(ledger)
}

#[derive(Serialize)]
struct OutputFile<'a> {
    #[serde(rename = "_comment")]
    comment: &'static str,
    #[serde(rename = "Asset")]
    asset: &'static str,
    #[serde(rename = "AssetPriceCurrency")]
    asset_price_currency: &'a str,
    #[serde(rename = "Transactions")]
    transactions: Vec<CompleteRecord>,
}

/// Encodes a ledger as a complete transaction file
pub fn to_json(ledger: &Ledger, config: &Configuration) -> anyhow::Result<String> {
    let output = OutputFile {
        comment: "Auto-generated JSON for FX transactions",
        asset: "N/A",
        asset_price_currency: config.domestic_currency(),
        transactions: ledger.iter().map(CompleteRecord::from).collect(),
    };
    serde_json::to_string_pretty(&output).context("encoding ledger as json")
}

/// Writes a ledger out as a complete transaction file
///
/// Refuses to overwrite an existing file.
pub fn export_json<P: AsRef<Path>>(
    ledger: &Ledger,
    path: P,
    config: &Configuration,
) -> anyhow::Result<()> {
    let json = to_json(ledger, config)?;
    let mut file = TextFile::create(path, "for exported transactions")?;
    writeln!(file, "{}", json)?;
    file.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tx;
    use crate::market_data::DailyPrices;
    use crate::price;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    /// Price source serving canned prices, remembering what was asked of it
    struct FakeSource {
        prices: HashMap<String, DailyPrices>,
        requests: std::cell::RefCell<Vec<(String, Date, Date)>>,
    }

    impl FakeSource {
        fn new() -> Self {
            FakeSource {
                prices: HashMap::new(),
                requests: Default::default(),
            }
        }

        fn with(mut self, ticker: &str, prices: &[(&str, Decimal)]) -> Self {
            self.prices.insert(
                ticker.into(),
                prices.iter().map(|(d, p)| (d.parse().unwrap(), *p)).collect(),
            );
            self
        }
    }

    impl PriceSource for FakeSource {
        fn daily_mids(&self, ticker: &str, start: Date, end: Date) -> anyhow::Result<DailyPrices> {
            self.requests.borrow_mut().push((ticker.into(), start, end));
            self.prices
                .get(ticker)
                .cloned()
                .ok_or_else(|| anyhow::Error::msg(format!("unknown ticker {ticker}")))
        }
    }

    static COMPLETE: &str = r#"{
        "Asset": "BTC-SEK",
        "AssetPriceCurrency": "SEK",
        "Transactions": [
            {"date": "2021-10-12", "amount": 0.5, "market price": 40000.0000, "exchange rate": 1},
            {"date": "2021-11-12", "amount": 0.2, "market price": 50000.0000, "exchange rate": 1},
            {"date": "2022-11-16", "amount": -0.4, "market price": 100000.0000, "exchange rate": 1}
        ]
    }"#;

    static BASIC: &str = r#"{
        "Asset": "BTC-USD",
        "AssetPriceCurrency": "USD",
        "Transactions": [
            {"date": "2021-10-12", "amount": 0.5},
            {"date": "2022-11-16", "amount": -0.4},
            {"date": "2021-11-12", "amount": 0.2}
        ]
    }"#;

    fn records(json: &str) -> Vec<serde_json::Map<String, serde_json::Value>> {
        serde_json::from_str::<InputFile>(json).unwrap().transactions
    }

    #[test]
    fn detect_kind() {
        assert_eq!(record_kind(&records(COMPLETE)).unwrap(), RecordKind::Complete);
        assert_eq!(record_kind(&records(BASIC)).unwrap(), RecordKind::Basic);
        assert_eq!(record_kind(&[]).unwrap(), RecordKind::Complete);

        let unknown = r#"{"Asset": "X", "Transactions": [
            {"date": "2021-10-12", "amount": 0.5, "price": 40000}
        ]}"#;
        assert!(record_kind(&records(unknown)).is_err());

        let mixed = r#"{"Asset": "X", "Transactions": [
            {"date": "2021-10-12", "amount": 0.5},
            {"date": "2021-10-13", "amount": 0.5, "market price": 1, "exchange rate": 1}
        ]}"#;
        assert!(record_kind(&records(mixed)).is_err());
    }

    #[test]
    fn read_complete() {
        let source = FakeSource::new();
        let txs =
            read_transactions(COMPLETE.as_bytes(), &Configuration::default(), &source).unwrap();
        assert_eq!(
            txs,
            [
                tx("2021-10-12", dec!(0.5), dec!(40000), dec!(1)),
                tx("2021-11-12", dec!(0.2), dec!(50000), dec!(1)),
                tx("2022-11-16", dec!(-0.4), dec!(100000), dec!(1)),
            ]
        );
        // Complete data needs no market data
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn read_rounds_inputs() {
        let json = r#"{"Asset": "X", "Transactions": [
            {"date": "2021-10-12", "amount": 0.12345678, "market price": 56783.9453125,
             "exchange rate": 8.771409869525847}
        ]}"#;
        let txs =
            read_transactions(json.as_bytes(), &Configuration::default(), &FakeSource::new())
                .unwrap();
        assert_eq!(txs[0].amount, Amount::from(dec!(0.123457)));
        assert_eq!(txs[0].price, price!(56783.95));
        assert_eq!(txs[0].fx_rate, dec!(8.77));
    }

    #[test]
    fn read_basic() {
        let source = FakeSource::new()
            .with(
                "BTC-USD",
                &[
                    ("2021-10-12", dec!(56783.9453125)),
                    ("2021-11-12", dec!(64509.9609375)),
                    ("2022-11-16", dec!(16776.890625)),
                ],
            )
            .with(
                "SEKUSD=X",
                &[
                    ("2021-10-12", dec!(0.125)),
                    ("2021-11-12", dec!(0.1)),
                    ("2022-11-16", dec!(0.0625)),
                ],
            );
        let txs = read_transactions(BASIC.as_bytes(), &Configuration::default(), &source).unwrap();

        // File order is kept; sorting is the ledger's job
        assert_eq!(
            txs,
            [
                tx("2021-10-12", dec!(0.5), dec!(56783.95), dec!(8)),
                tx("2022-11-16", dec!(-0.4), dec!(16776.89), dec!(16)),
                tx("2021-11-12", dec!(0.2), dec!(64509.96), dec!(10)),
            ]
        );

        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "BTC-USD");
        assert_eq!(requests[0].1.to_string(), "2021-01-01");
        assert_eq!(requests[0].2.to_string(), "2022-12-31");
        assert_eq!(requests[1].0, "SEKUSD=X");
    }

    #[test]
    fn read_basic_missing_price() {
        let source = FakeSource::new()
            .with("BTC-USD", &[("2021-10-12", dec!(1))])
            .with("SEKUSD=X", &[("2021-10-12", dec!(1))]);
        let err = read_transactions(BASIC.as_bytes(), &Configuration::default(), &source)
            .unwrap_err();
        assert!(err.to_string().contains("2022-11-16"));

        let err = read_transactions(BASIC.as_bytes(), &Configuration::default(), &FakeSource::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown ticker BTC-USD"));
    }

    #[test]
    fn missing_file() {
        let err = read_file(
            "/nonexistent/file-that-does-not-exist.json",
            &Configuration::default(),
            &FakeSource::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("file-that-does-not-exist.json"));
    }

    #[test]
    fn export_round_trip() {
        let ledger: Ledger = vec![
            tx("2021-10-12", dec!(0.5), dec!(40000), dec!(8.77)),
            tx("2022-11-16", dec!(-0.4), dec!(16776.89), dec!(10.46)),
        ]
        .into_iter()
        .collect();
        let config = Configuration::default();
        let json = to_json(&ledger, &config).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["_comment"], "Auto-generated JSON for FX transactions");
        assert_eq!(value["Asset"], "N/A");
        assert_eq!(value["AssetPriceCurrency"], "SEK");
        assert_eq!(value["Transactions"][0]["amount"], 0.5);
        assert_eq!(value["Transactions"][1]["exchange rate"], 10.46);

        let reread: Ledger = read_transactions(json.as_bytes(), &config, &FakeSource::new())
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(reread, ledger);
    }

    #[test]
    fn export_to_file() {
        let ledger: Ledger = vec![tx("2021-10-12", dec!(0.5), dec!(40000), dec!(1))]
            .into_iter()
            .collect();
        let mut path = std::env::temp_dir();
        path.push(format!("cit-export-test-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let config = Configuration::default();
        export_json(&ledger, &path, &config).unwrap();
        // Never overwrite
        assert!(export_json(&ledger, &path, &config).is_err());

        let reread = read_file(&path, &config, &FakeSource::new()).unwrap();
        assert_eq!(reread.len(), 1);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn merge_files_stable() {
        let dir = std::env::temp_dir().join(format!("cit-merge-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let a = r#"{"Asset": "X", "Transactions": [
            {"date": "2021-01-02", "amount": 1, "market price": 1, "exchange rate": 1},
            {"date": "2021-01-03", "amount": 3, "market price": 1, "exchange rate": 1}
        ]}"#;
        let b = r#"{"Asset": "X", "Transactions": [
            {"date": "2021-01-01", "amount": 4, "market price": 1, "exchange rate": 1},
            {"date": "2021-01-02", "amount": 2, "market price": 1, "exchange rate": 1}
        ]}"#;
        fs::write(dir.join("a.json"), a).unwrap();
        fs::write(dir.join("b.json"), b).unwrap();

        let config: Configuration = serde_json::from_value(serde_json::json!({
            "data_dir": dir.to_string_lossy(),
        }))
        .unwrap();
        let ledger = load_ledger(&["a.json", "b.json"], &config, &FakeSource::new()).unwrap();
        let amounts: Vec<String> = ledger.iter().map(|tx| tx.amount.to_string()).collect();
        assert_eq!(amounts, ["4", "1", "2", "3"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
