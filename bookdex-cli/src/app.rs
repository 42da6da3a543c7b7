use std::{fs, path::Path};

use bookdex::{lookup, BookRecord, LookupConfig, LookupReport};

use eyre::Context;
use log::{info, warn};

/// Looks up a single ISBN and prints the merged record as pretty JSON.
///
/// Returns whether any provider had data for the ISBN.
pub fn single(isbn: &str, config: &LookupConfig) -> eyre::Result<bool> {
    let record = lookup(isbn, config)?;
    info!("{}", LookupReport::summarize(&record, config));

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(record.found)
}

/// Processes a line-per-ISBN input file and writes the found records to
/// `output` as a JSON array.
///
/// Invalid ISBNs and empty lookups are logged and skipped, they never abort
/// the batch.
pub fn batch(input: &Path, output: &Path, config: &LookupConfig) -> eyre::Result<bool> {
    let content = fs::read_to_string(input)
        .wrap_err_with(|| format!("Failed to read input file '{}'", input.display()))?;

    let isbns: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    info!("Processing {} ISBNs", isbns.len());

    let mut records: Vec<BookRecord> = Vec::new();
    for (index, raw) in isbns.iter().enumerate() {
        info!("Processing ISBN {}/{}: {raw}", index + 1, isbns.len());

        match lookup(raw, config) {
            Ok(record) => {
                info!("{}", LookupReport::summarize(&record, config));
                if record.found {
                    records.push(record);
                } else {
                    warn!("No information found for ISBN: {raw}");
                }
            }
            Err(err) => warn!("Skipping '{raw}': {err}"),
        }
    }

    let json = serde_json::to_string_pretty(&records)?;
    fs::write(output, json)
        .wrap_err_with(|| format!("Failed to write results to '{}'", output.display()))?;

    info!("Results saved to {}", output.display());
    info!(
        "Successfully processed {} out of {} ISBNs",
        records.len(),
        isbns.len()
    );
    Ok(true)
}
