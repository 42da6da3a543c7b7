use std::collections::HashMap;

use log::{info, trace};
use serde::Deserialize;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the OpenLibrary Covers API");

    let cover_url = format!("https://covers.openlibrary.org/b/isbn/{isbn}-L.jpg");
    let cover_image = match client.get_status(&cover_url) {
        Ok(200) => Some(cover_url),
        // A missing cover is fine, the brief record may still have data.
        Ok(_) | Err(_) => None,
    };

    let url = format!("https://openlibrary.org/api/books?bibkeys=ISBN:{isbn}&format=json");
    let mut model: HashMap<String, BriefRecord> = client.get_json(&url)?;

    trace!("Request was successful");

    let brief = model
        .remove(&format!("ISBN:{isbn}"))
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No OpenLibrary record for the ISBN"))?;

    let authors = brief
        .authors
        .into_iter()
        .filter_map(|author| author.name)
        .collect();

    Ok(PartialRecord {
        title: brief.title,
        authors,
        publish_date: brief.publish_date,
        description: None,
        subject: None,
        cover_image,
    })
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct BriefRecord {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
    publish_date: Option<String>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Author {
    name: Option<String>,
}
