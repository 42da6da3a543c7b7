//! The fixed set of metadata providers and their priority order.

use std::{fmt, str::FromStr};

use crate::{
    api::{self, Client},
    record::PartialRecord,
    Error, ErrorKind, Isbn,
};

/// An external data source that can be queried for book metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    /// Google Books volumes API.
    GoogleBooks,
    /// OpenLibrary books API with full details.
    OpenLibrary,
    /// Internet Archive advanced search.
    InternetArchive,
    /// OpenAlex scholarly works API.
    OpenAlex,
    /// OpenLibrary cover probe plus brief record.
    OpenLibraryCovers,
    /// AbeBooks cover scan probe.
    AbeBooksCovers,
}

impl Provider {
    /// The default priority order, richest metadata sources first so that
    /// lookups can terminate before reaching the cover-only providers.
    #[must_use]
    pub fn default_order() -> Vec<Self> {
        vec![
            Self::GoogleBooks,
            Self::OpenLibrary,
            Self::InternetArchive,
            Self::OpenAlex,
            Self::OpenLibraryCovers,
            Self::AbeBooksCovers,
        ]
    }

    /// The display name used in logs and the record's `sources` list.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleBooks => "Google Books",
            Self::OpenLibrary => "OpenLibrary",
            Self::InternetArchive => "Internet Archive",
            Self::OpenAlex => "OpenAlex",
            Self::OpenLibraryCovers => "OpenLibrary Covers",
            Self::AbeBooksCovers => "AbeBooks Covers",
        }
    }

    pub(crate) fn fetch<C: Client>(self, client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
        match self {
            Self::GoogleBooks => api::google_books::fetch(client, isbn),
            Self::OpenLibrary => api::open_library::fetch(client, isbn),
            Self::InternetArchive => api::internet_archive::fetch(client, isbn),
            Self::OpenAlex => api::open_alex::fetch(client, isbn),
            Self::OpenLibraryCovers => api::open_library_covers::fetch(client, isbn),
            Self::AbeBooksCovers => api::abebooks_covers::fetch(client, isbn),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Parses the kebab-case identifiers used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google-books" => Ok(Self::GoogleBooks),
            "open-library" => Ok(Self::OpenLibrary),
            "internet-archive" => Ok(Self::InternetArchive),
            "open-alex" => Ok(Self::OpenAlex),
            "open-library-covers" => Ok(Self::OpenLibraryCovers),
            "abebooks-covers" => Ok(Self::AbeBooksCovers),
            _ => Err(Error::new(
                ErrorKind::Parse,
                format!("'{s}' is not a known provider identifier"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Provider;

    #[test]
    fn default_order_favors_rich_metadata_sources() {
        let order = Provider::default_order();

        assert_eq!(6, order.len());
        assert_eq!(Provider::GoogleBooks, order[0]);
        assert_eq!(Provider::AbeBooksCovers, order[5]);
    }

    #[test]
    fn identifiers_round_trip() {
        for (id, provider) in [
            ("google-books", Provider::GoogleBooks),
            ("open-library", Provider::OpenLibrary),
            ("internet-archive", Provider::InternetArchive),
            ("open-alex", Provider::OpenAlex),
            ("open-library-covers", Provider::OpenLibraryCovers),
            ("abebooks-covers", Provider::AbeBooksCovers),
        ] {
            assert_eq!(provider, id.parse().unwrap());
        }

        assert!("amazon".parse::<Provider>().is_err());
    }
}
