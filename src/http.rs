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

//! HTTP
//!
//! Utility functions to make HTTP requests easier
//!

use anyhow::Context;
use log::{debug, warn};

/// Some market data providers refuse requests without a browser-ish agent
static USER_AGENT: &str = "Mozilla/5.0 (compatible; cit)";

/// Make a HTTP GET request and return a byte vector
pub fn get_bytes(url: &str) -> Result<Vec<u8>, anyhow::Error> {
    let resp = minreq::get(url)
        .with_header("User-Agent", USER_AGENT)
        .with_timeout(10)
        .send()
        .with_context(|| format!("Request data from {}", url))?;

    debug!(target: "cit_http", "request to {} returned {}", url, resp.status_code);
    if resp.status_code != 200 {
        if let Ok(s) = resp.as_str() {
            warn!(target: "cit_http", "{}", s);
        }
        return Err(anyhow::Error::msg(format!(
            "request to {} failed with status {} {}",
            url, resp.status_code, resp.reason_phrase
        )));
    }
    Ok(resp.into_bytes())
}

/// Make a HTTP GET request and JSON-parse the result
pub fn get_json<D: serde::de::DeserializeOwned>(url: &str) -> Result<D, anyhow::Error> {
    let bytes = get_bytes(url)?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing json from {}", url))
}
