//! Client for the binlist.net BIN/IIN lookup service.
//!
//! Validates a card prefix locally, sends a single GET to
//! `https://lookup.binlist.net/<bin>`, and decodes the issuer, network and
//! country into a [`LookupResult`].
//!
//! # Modules
//!
//! - `client`: `BinLookupClient` and the lookup request itself.
//! - `config`: Transport configuration (base URL, timeout, pooling).
//! - `errors`: Error handling types.
//! - `models`: Decoded lookup payload.
//! - `telemetry`: Tracing subscriber setup for applications.
//! - `validation`: Local BIN format check.
//!
//! The client never retries. Rate limiting surfaces as a status error with
//! code 429 and the caller decides what to do with it:
//!
//! ```no_run
//! # async fn run() -> Result<(), binlookup::LookupError> {
//! use binlookup::{BinLookupClient, ClientConfig};
//!
//! let client = BinLookupClient::new(ClientConfig::default())?;
//! match client.search("45717360").await {
//!     Ok(result) => println!("{} {}", result.scheme, result.bank.name),
//!     Err(e) if e.is_rate_limited() => eprintln!("throttled, try later"),
//!     Err(e) if e.is_not_found() => eprintln!("unknown BIN"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod validation;

pub use client::BinLookupClient;
pub use config::ClientConfig;
pub use errors::{LookupError, StatusCodeError};
pub use models::{Bank, CardNumber, Country, LookupResult};
pub use validation::{is_valid_bin, mask_bin, validate_bin};

use std::sync::OnceLock;

static DEFAULT_CLIENT: OnceLock<BinLookupClient> = OnceLock::new();

/// Looks up `bin` with a shared client built from `ClientConfig::default()`.
///
/// The shared client is created on first use and never changes afterwards.
/// Build a `BinLookupClient` directly to control timeout or pooling.
pub async fn search(bin: &str) -> Result<LookupResult, LookupError> {
    let client = match DEFAULT_CLIENT.get() {
        Some(client) => client,
        None => {
            let client = BinLookupClient::new(ClientConfig::default())?;
            DEFAULT_CLIENT.get_or_init(|| client)
        }
    };
    client.search(bin).await
}
