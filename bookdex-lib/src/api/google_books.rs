use log::{info, trace};
use serde::Deserialize;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=isbn:";

pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the Google Books API");
    let mut url = GOOGLE_BOOKS_URL.to_owned();
    url.push_str(isbn.as_str());

    let model: GoogleModel = client.get_json(&url)?;

    trace!("Request was successful");

    let volume = model
        .items
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No volumes matched the ISBN"))?;

    Ok(volume.volume_info.into())
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    /// Omitted entirely when `totalItems` is 0.
    items: Option<Vec<Item>>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Books API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<VolumeInfo> for PartialRecord {
    fn from(mut info: VolumeInfo) -> Self {
        info.authors.retain(|author| !author.is_empty());

        Self {
            title: info.title,
            authors: info.authors,
            publish_date: info.published_date,
            description: info.description,
            subject: if info.categories.is_empty() {
                None
            } else {
                Some(info.categories.join(", "))
            },
            cover_image: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}
