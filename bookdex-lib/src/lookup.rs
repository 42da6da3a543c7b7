//! The lookup orchestrator.
//!
//! Providers are queried sequentially in priority order. After every call the
//! completeness predicate decides whether enough is known to stop early, and
//! a rate-limit delay is observed between calls whether or not the previous
//! one succeeded. No provider failure ever aborts a lookup.

use std::{thread, time::Duration};

use log::{info, warn};

use crate::{
    api::Client, record::BookRecord, record::PartialRecord, Error, ErrorKind, Isbn, Provider,
};

/// The policy deciding a record has enough data to stop querying further
/// providers.
pub type CompletenessFn = fn(&BookRecord) -> bool;

/// The default completeness policy: a title, at least one author and either
/// a description or a cover image.
#[must_use]
pub fn default_completeness(record: &BookRecord) -> bool {
    record.title.is_some()
        && !record.authors.is_empty()
        && (record.description.is_some() || record.cover_image.is_some())
}

/// Configuration for a lookup run.
///
/// One value of this type is built per batch run and shared by every lookup
/// in it, there is no process-wide state.
#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// Rate-limit delay between consecutive provider calls, also used as the
    /// retry delay.
    pub delay: Duration,
    /// Providers to query, in priority order.
    pub providers: Vec<Provider>,
    /// Additional attempts per provider call on network errors only.
    pub max_retries: u32,
    /// Early-termination policy, see [`default_completeness`].
    pub complete: CompletenessFn,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            delay: Duration::from_millis(300),
            providers: Provider::default_order(),
            max_retries: 3,
            complete: default_completeness,
        }
    }
}

/// Queries the configured providers in order and folds every partial result
/// into one record.
pub(crate) fn run<C: Client>(client: &C, isbn: &Isbn, config: &LookupConfig) -> BookRecord {
    let mut record = BookRecord::new(isbn);
    info!("Fetching details for ISBN: {isbn}");

    let last = config.providers.len().saturating_sub(1);
    for (index, provider) in config.providers.iter().copied().enumerate() {
        match fetch_with_retry(client, provider, isbn, config) {
            Ok(partial) if partial.is_empty() => {
                info!("{provider} responded without any usable fields");
            }
            Ok(partial) => {
                info!("Found data from {provider}");
                record.absorb(partial, provider.name());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No data from {provider}");
            }
            Err(err) => {
                warn!("{provider} failed: {err}");
            }
        }

        if (config.complete)(&record) {
            info!("Record complete, skipping the remaining providers");
            break;
        }

        if index < last {
            thread::sleep(config.delay);
        }
    }

    if !record.found {
        warn!("No book details found from any source for ISBN: {isbn}");
    }

    record
}

fn fetch_with_retry<C: Client>(
    client: &C,
    provider: Provider,
    isbn: &Isbn,
    config: &LookupConfig,
) -> Result<PartialRecord, Error> {
    let mut attempts = 0;
    loop {
        match provider.fetch(client, isbn) {
            Err(err) if err.kind() == ErrorKind::Network && attempts < config.max_retries => {
                attempts += 1;
                warn!(
                    "{provider} network error, retrying ({attempts}/{}): {err}",
                    config.max_retries
                );
                thread::sleep(config.delay);
            }
            result => return result,
        }
    }
}
