//! Look up one or more BINs and print the results as JSON.
//!
//! ```text
//! cargo run --example lookup -- 45717360 5288230
//! ```
//!
//! Upstream throttles aggressively; this demo retries 429s itself until a
//! deadline passes, since the library never retries on its own.
use anyhow::Result;
use binlookup::{mask_bin, telemetry, BinLookupClient, ClientConfig, LookupError, LookupResult};
use std::time::{Duration, Instant};

const RETRY_DEADLINE: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_millis(500);

async fn search_with_retry(
    client: &BinLookupClient,
    bin: &str,
) -> Result<LookupResult, LookupError> {
    let deadline = Instant::now() + RETRY_DEADLINE;
    loop {
        match client.search(bin).await {
            Err(e) if e.is_rate_limited() && Instant::now() + RETRY_DELAY < deadline => {
                tracing::warn!(
                    "Rate limited looking up {}, retrying in {:?}",
                    mask_bin(bin),
                    RETRY_DELAY
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            other => return other,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("binlookup=info");

    let bins: Vec<String> = std::env::args().skip(1).collect();
    if bins.is_empty() {
        anyhow::bail!("usage: lookup <BIN> [<BIN>...]");
    }

    let config = ClientConfig::from_env()?;
    let client = BinLookupClient::new(config)?;

    let mut failures = 0;
    for bin in &bins {
        match search_with_retry(&client, bin).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) if e.is_not_found() => {
                println!("{}: not found", mask_bin(bin));
                failures += 1;
            }
            Err(e) => {
                eprintln!("{}: {}", mask_bin(bin), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, bins.len());
    }
    Ok(())
}
