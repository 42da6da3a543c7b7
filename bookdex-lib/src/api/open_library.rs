use std::collections::HashMap;

use log::{info, trace};
use serde::Deserialize;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/api/books?bibkeys=ISBN:";

/// OpenLibrary lists every subject it knows, only the first few are useful
/// as a topic summary.
const SUBJECT_LIMIT: usize = 3;

pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the OpenLibrary API");
    let url = format!("{OPEN_LIBRARY_URL}{isbn}&jscmd=details&format=json");

    // The response object is keyed by the bib key that was queried.
    let mut model: HashMap<String, Entry> = client.get_json(&url)?;

    trace!("Request was successful");

    let details = model
        .remove(&format!("ISBN:{isbn}"))
        .and_then(|entry| entry.details)
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No OpenLibrary record for the ISBN"))?;

    Ok(details.into())
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Entry {
    details: Option<Details>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Details {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
    publish_date: Option<String>,
    #[serde(default)]
    subjects: Vec<String>,
    description: Option<Text>,
    cover: Option<Cover>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Author {
    name: Option<String>,
}

/// Description is sometimes a bare string and sometimes a
/// `{"type": "/type/text", "value": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
#[cfg_attr(test, derive(Debug))]
enum Text {
    Plain(String),
    Typed { value: String },
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Cover {
    large: Option<String>,
}

impl Text {
    fn into_string(self) -> String {
        match self {
            Self::Plain(value) | Self::Typed { value } => value,
        }
    }
}

impl From<Details> for PartialRecord {
    fn from(details: Details) -> Self {
        let authors = details
            .authors
            .into_iter()
            .filter_map(|author| author.name)
            .collect();

        let subjects: Vec<String> = details
            .subjects
            .into_iter()
            .take(SUBJECT_LIMIT)
            .collect();

        Self {
            title: details.title,
            authors,
            publish_date: details.publish_date,
            description: details.description.map(Text::into_string),
            subject: if subjects.is_empty() {
                None
            } else {
                Some(subjects.join(", "))
            },
            cover_image: details.cover.and_then(|cover| cover.large),
        }
    }
}
