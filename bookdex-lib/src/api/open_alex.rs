use std::collections::HashMap;

use log::{info, trace};
use serde::Deserialize;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

const CONCEPT_LIMIT: usize = 3;

pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the OpenAlex API");
    let url = format!("https://api.openalex.org/works?search={isbn}&mailto=research@example.com");

    let model: WorksModel = client.get_json(&url)?;

    trace!("Request was successful");

    let work = model
        .results
        .into_iter()
        .next()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No works matched the ISBN"))?;

    Ok(work.into())
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct WorksModel {
    #[serde(default)]
    results: Vec<Work>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Work {
    title: Option<String>,
    publication_year: Option<u16>,
    #[serde(default)]
    authorships: Vec<Authorship>,
    #[serde(default)]
    concepts: Vec<Concept>,
    /// OpenAlex distributes abstracts as word -> positions maps.
    abstract_inverted_index: Option<HashMap<String, Vec<u32>>>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Authorship {
    author: AuthorName,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct AuthorName {
    display_name: Option<String>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Concept {
    display_name: String,
}

impl From<Work> for PartialRecord {
    fn from(work: Work) -> Self {
        let authors = work
            .authorships
            .into_iter()
            .filter_map(|authorship| authorship.author.display_name)
            .collect();

        let concepts: Vec<String> = work
            .concepts
            .into_iter()
            .take(CONCEPT_LIMIT)
            .map(|concept| concept.display_name)
            .collect();

        Self {
            title: work.title,
            authors,
            publish_date: work.publication_year.map(|year| year.to_string()),
            description: work
                .abstract_inverted_index
                .map(reconstruct_abstract)
                .filter(|text| !text.is_empty()),
            subject: if concepts.is_empty() {
                None
            } else {
                Some(concepts.join(", "))
            },
            cover_image: None,
        }
    }
}

/// Rebuilds the abstract text from the inverted index by placing each word
/// back at its recorded positions.
fn reconstruct_abstract(index: HashMap<String, Vec<u32>>) -> String {
    let mut positioned: Vec<(u32, String)> = index
        .into_iter()
        .flat_map(|(word, positions)| {
            positions
                .into_iter()
                .map(move |position| (position, word.clone()))
        })
        .collect();
    positioned.sort();

    let words: Vec<String> = positioned.into_iter().map(|(_, word)| word).collect();
    words.join(" ")
}
