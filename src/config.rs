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

//! Configuration
//!
//! Parses and handles the (optional) JSON configuration file. Every field
//! has a default, so an empty object `{}` is a valid configuration, as is
//! having no configuration file at all.
//!
//! The configuration is read once at startup and afterwards only ever handed
//! around by shared reference.
//!

use crate::accounting::TaxParameters;
use anyhow::Context;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Where market data is fetched from unless configured otherwise
static DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com";

/// The main configuration structure
#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Directory that relative input file names are resolved against
    data_dir: PathBuf,
    /// Input file to read if none is given on the command line
    input_file: String,
    /// Currency that taxes are paid in, e.g. "SEK"
    domestic_currency: String,
    /// Fraction of a capital loss which may be deducted against gains
    deductible_rate: Decimal,
    /// Base URL of the market data provider
    market_data_url: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            data_dir: PathBuf::from("./input_data"),
            input_file: "skatteverket-example-1.json".into(),
            domestic_currency: "SEK".into(),
            deductible_rate: TaxParameters::default().deductible_rate,
            market_data_url: DEFAULT_MARKET_DATA_URL.into(),
        }
    }
}

impl Configuration {
    /// Reads the configuration from a file
    pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, anyhow::Error> {
        let filename = filepath.as_ref().to_string_lossy();
        let fh = fs::File::open(filepath.as_ref())
            .with_context(|| format!("opening configuration {filename}"))?;
        Self::from_reader(io::BufReader::new(fh))
            .with_context(|| format!("parsing configuration {filename}"))
    }

    /// Parses the configuration from JSON data and sanity-checks it
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, anyhow::Error> {
        let config: Configuration = serde_json::from_reader(reader)?;
        if config.deductible_rate < Decimal::ZERO || config.deductible_rate > Decimal::ONE {
            return Err(anyhow::Error::msg(format!(
                "deductible rate {} is not between 0 and 1",
                config.deductible_rate
            )));
        }
        if config.domestic_currency.is_empty() {
            return Err(anyhow::Error::msg("domestic currency must not be empty"));
        }
        Ok(config)
    }

    /// Loads the configuration from an explicitly given file, or else from the
    /// default location if a file exists there, or else uses the defaults
    pub fn find(explicit: Option<&Path>) -> Result<Self, anyhow::Error> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("using configuration file {}", path.to_string_lossy());
                Self::load(path)
            }
            _ => {
                debug!("no configuration file found; using defaults");
                Ok(Default::default())
            }
        }
    }

    /// The default location of the configuration file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("cit");
        path.push("config.json");
        Some(path)
    }

    /// Resolves an input file name against the data directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn input_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Accessor for the default input file name
    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    /// Accessor for the domestic currency
    pub fn domestic_currency(&self) -> &str {
        &self.domestic_currency
    }

    /// Accessor for the market data URL
    pub fn market_data_url(&self) -> &str {
        &self.market_data_url
    }

    /// The parameters needed by the tax computation
    pub fn tax_parameters(&self) -> TaxParameters {
        TaxParameters {
            deductible_rate: self.deductible_rate,
        }
    }
}
