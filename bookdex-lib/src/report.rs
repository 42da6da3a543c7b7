//! Per-ISBN lookup summaries for the output/logging layer.

use std::fmt;

use crate::{record::BookRecord, LookupConfig};

const FIELDS: [&str; 6] = [
    "title",
    "authors",
    "publish_date",
    "description",
    "subject",
    "cover_image",
];

/// A summary of which fields a lookup found and which providers contributed.
#[derive(Debug)]
pub struct LookupReport {
    /// The ISBN the lookup was keyed by.
    pub isbn: String,
    /// Canonical field names that were populated.
    pub found_fields: Vec<&'static str>,
    /// Canonical field names that no provider supplied.
    pub missing_fields: Vec<&'static str>,
    /// Providers that contributed, in discovery order.
    pub sources: Vec<String>,
    /// Whether the record satisfies the configured completeness policy.
    pub complete: bool,
}

impl LookupReport {
    /// Summarizes a finished record against the policy in `config`.
    #[must_use]
    pub fn summarize(record: &BookRecord, config: &LookupConfig) -> Self {
        let mut found_fields = Vec::new();
        let mut missing_fields = Vec::new();

        let present = [
            record.title.is_some(),
            !record.authors.is_empty(),
            record.publish_date.is_some(),
            record.description.is_some(),
            record.subject.is_some(),
            record.cover_image.is_some(),
        ];

        for (name, present) in FIELDS.into_iter().zip(present) {
            if present {
                found_fields.push(name);
            } else {
                missing_fields.push(name);
            }
        }

        Self {
            isbn: record.isbn.clone(),
            found_fields,
            missing_fields,
            sources: record.sources.clone(),
            complete: (config.complete)(record),
        }
    }
}

impl fmt::Display for LookupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sources.is_empty() {
            return write!(f, "{}: no data from any source", self.isbn);
        }

        write!(
            f,
            "{}: {} record, found [{}] from [{}]",
            self.isbn,
            if self.complete { "complete" } else { "partial" },
            self.found_fields.join(", "),
            self.sources.join(", "),
        )?;

        if !self.missing_fields.is_empty() {
            write!(f, ", missing [{}]", self.missing_fields.join(", "))?;
        }
        Ok(())
    }
}
