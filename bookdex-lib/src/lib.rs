#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![doc = include_str!("../README.md")]

mod api;
mod error;
mod isbn;
mod lookup;
mod provider;
mod record;
mod report;

pub use error::{Error, ErrorKind};
pub use isbn::Isbn;
pub use lookup::{default_completeness, CompletenessFn, LookupConfig};
pub use provider::Provider;
pub use record::BookRecord;
pub use report::LookupReport;

use log::trace;

const USER_AGENT: &str = concat!("bookdex/", env!("CARGO_PKG_VERSION"));

/// Looks up `isbn` against the providers in `config` and returns the merged
/// record.
///
/// The raw ISBN string is normalized first; providers are then queried in
/// priority order with the configured timeout, inter-call delay and retry
/// policy. Provider-level failures are logged and folded into the record
/// (`found` stays `false` when every provider failed), they are never
/// returned as an `Err`.
///
/// # Errors
///
/// An `Err` of kind [`ErrorKind::InvalidIsbn`] is returned when `isbn` is not
/// a well-formed 10 or 13 character ISBN.
/// An `Err` of kind [`ErrorKind::Network`] is returned when the HTTP client
/// cannot be constructed.
pub fn lookup(isbn: &str, config: &LookupConfig) -> Result<BookRecord, Error> {
    let isbn = Isbn::parse(isbn)?;
    trace!("Looking up normalized ISBN '{isbn}'");

    // One session per lookup, reused across every provider call.
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
        .map_err(|e| Error::wrap(ErrorKind::Network, e))?;

    Ok(lookup::run(&client, &isbn, config))
}
