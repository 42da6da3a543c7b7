use log::{info, trace};
use serde::Deserialize;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the Internet Archive API");
    let url = format!(
        "https://archive.org/advancedsearch.php?q=isbn:{isbn}\
         &fl=identifier,title,creator,date,description,subject&output=json"
    );

    let model: SearchModel = client.get_json(&url)?;

    trace!("Request was successful");

    let doc = model
        .response
        .docs
        .into_iter()
        .next()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No archive items matched the ISBN"))?;

    Ok(doc.into())
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    response: Response,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Response {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Doc {
    identifier: String,
    title: Option<String>,
    creator: Option<OneOrMany>,
    date: Option<String>,
    description: Option<OneOrMany>,
    subject: Option<OneOrMany>,
}

/// Archive search fields come back as a bare string for single values and a
/// list otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
#[cfg_attr(test, derive(Debug))]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    fn join(self, sep: &str) -> String {
        match self {
            Self::One(value) => value,
            Self::Many(values) => values.join(sep),
        }
    }
}

impl From<Doc> for PartialRecord {
    fn from(doc: Doc) -> Self {
        // The item page always serves a thumbnail for known identifiers.
        let cover_image = format!("https://archive.org/services/img/{}", doc.identifier);

        Self {
            title: doc.title,
            authors: doc.creator.map(OneOrMany::into_vec).unwrap_or_default(),
            publish_date: doc.date,
            description: doc.description.map(|d| d.join(" ")),
            subject: doc.subject.map(|s| s.join(", ")).filter(|s| !s.is_empty()),
            cover_image: Some(cover_image),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{assert_url, impl_text_producer, MockClient},
        ErrorKind, Isbn,
    };

    const INTERNET_ARCHIVE_JSON: &str = include_str!("../../tests/data/internet_archive.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(INTERNET_ARCHIVE_JSON.to_owned()),
        EmptyDocsProducer => Ok(r#"{ "response": { "docs": [] } }"#.to_owned()),
    }

    fn isbn() -> Isbn {
        Isbn::parse("9780134685991").unwrap()
    }

    #[test]
    fn url_format_is_correct() {
        let client = MockClient::<ValidJsonProducer>::default();
        assert!(super::fetch(&client, &isbn()).is_ok());
        assert_url!(
            "https://archive.org/advancedsearch.php?q=isbn:9780134685991\
             &fl=identifier,title,creator,date,description,subject&output=json"
        );
    }

    #[test]
    fn empty_docs_returns_not_found() {
        let client = MockClient::<EmptyDocsProducer>::default();
        let err = super::fetch(&client, &isbn()).expect_err("no docs should be an error");

        assert_eq!(ErrorKind::NotFound, err.kind());
    }

    #[test]
    fn doc_maps_to_partial_record_with_synthesized_cover() {
        let client = MockClient::<ValidJsonProducer>::default();
        let partial = super::fetch(&client, &isbn()).unwrap();

        assert_eq!(Some("Effective Java"), partial.title.as_deref());
        assert_eq!(vec!["Joshua Bloch"], partial.authors);
        assert_eq!(Some("2018-01-06T00:00:00Z"), partial.publish_date.as_deref());
        assert_eq!(
            Some("Java (Computer program language), Best practices"),
            partial.subject.as_deref()
        );
        assert_eq!(
            Some("https://archive.org/services/img/effectivejava0000bloc"),
            partial.cover_image.as_deref()
        );
    }
}
