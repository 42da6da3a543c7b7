//! The canonical book record and the merge policy that builds it.
//!
//! Each provider contributes a [`PartialRecord`]; the orchestrator folds the
//! partials into one [`BookRecord`] per ISBN. Provider priority order encodes
//! source trustworthiness, so scalar fields are first-writer-wins while
//! `authors`, `subject` and `sources` accumulate.

use serde::Serialize;

use crate::Isbn;

/// The merged metadata record for a single ISBN.
///
/// Serializes to the tool's output schema, where the `found` flag is renamed
/// to `book`.
#[derive(Debug, Serialize)]
pub struct BookRecord {
    /// Title of the book.
    pub title: Option<String>,
    /// Authors in the order they were first discovered.
    pub authors: Vec<String>,
    /// Free-form publication date, format varies by source.
    pub publish_date: Option<String>,
    /// Description or abstract text.
    pub description: Option<String>,
    /// Comma-joined topics, accumulated across sources.
    pub subject: Option<String>,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// The normalized ISBN the lookup was keyed by.
    pub isbn: String,
    /// True once at least one provider returned any data.
    #[serde(rename = "book")]
    pub found: bool,
    /// Names of the providers that contributed at least one field, in
    /// discovery order.
    pub sources: Vec<String>,
}

/// The subset of canonical fields one provider call was able to supply.
#[derive(Debug, Default, Clone)]
pub(crate) struct PartialRecord {
    pub(crate) title: Option<String>,
    pub(crate) authors: Vec<String>,
    pub(crate) publish_date: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) cover_image: Option<String>,
}

impl PartialRecord {
    /// True when no field holds any usable text.
    pub(crate) fn is_empty(&self) -> bool {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, str::is_empty)
        }

        blank(&self.title)
            && self.authors.iter().all(|author| author.is_empty())
            && blank(&self.publish_date)
            && blank(&self.description)
            && blank(&self.subject)
            && blank(&self.cover_image)
    }
}

impl BookRecord {
    /// Creates an empty record for `isbn`, all fields unset and `found`
    /// false.
    pub(crate) fn new(isbn: &Isbn) -> Self {
        Self {
            title: None,
            authors: Vec::new(),
            publish_date: None,
            description: None,
            subject: None,
            cover_image: None,
            isbn: isbn.as_str().to_owned(),
            found: false,
            sources: Vec::new(),
        }
    }

    /// Folds one provider's partial record into this record.
    ///
    /// Scalar fields are only set when currently unset, authors are appended
    /// when not already present, subject text is appended comma-separated
    /// when not already part of the existing value. `provider` is added to
    /// `sources` whenever its partial held at least one non-empty field,
    /// whether or not an earlier source had already won the field, which
    /// keeps the `sources` set invariant under provider permutation.
    pub(crate) fn absorb(&mut self, partial: PartialRecord, provider: &str) {
        if partial.is_empty() {
            return;
        }

        set_if_unset(&mut self.title, partial.title);
        set_if_unset(&mut self.publish_date, partial.publish_date);
        set_if_unset(&mut self.description, partial.description);
        set_if_unset(&mut self.cover_image, partial.cover_image);

        for author in partial.authors {
            if !author.is_empty() && !self.authors.contains(&author) {
                self.authors.push(author);
            }
        }

        if let Some(subject) = partial.subject.filter(|s| !s.is_empty()) {
            match &mut self.subject {
                Some(existing) => {
                    if !existing.contains(&subject) {
                        existing.push_str(", ");
                        existing.push_str(&subject);
                    }
                }
                none => *none = Some(subject),
            }
        }

        self.found = true;
        if !self.sources.iter().any(|s| s == provider) {
            self.sources.push(provider.to_owned());
        }
    }
}

fn set_if_unset(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        slot.get_or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::{BookRecord, PartialRecord};
    use crate::Isbn;

    fn record() -> BookRecord {
        BookRecord::new(&Isbn::parse("9780134685991").unwrap())
    }

    fn rich_partial() -> PartialRecord {
        PartialRecord {
            title: Some("Effective Java".to_owned()),
            authors: vec!["Joshua Bloch".to_owned()],
            publish_date: Some("2018".to_owned()),
            description: Some("A guide...".to_owned()),
            subject: Some("Java".to_owned()),
            cover_image: Some("http://x/y.jpg".to_owned()),
        }
    }

    #[test]
    fn empty_record_has_no_data() {
        let record = record();
        assert!(!record.found);
        assert!(record.sources.is_empty());
        assert_eq!("9780134685991", record.isbn);
    }

    #[test]
    fn scalar_fields_are_first_writer_wins() {
        let mut record = record();
        record.absorb(rich_partial(), "Google Books");

        let later = PartialRecord {
            title: Some("Effective Java, Third Edition".to_owned()),
            ..PartialRecord::default()
        };
        record.absorb(later, "OpenLibrary");

        assert_eq!(Some("Effective Java"), record.title.as_deref());
        // OpenLibrary supplied data so it counts as a source even though an
        // earlier provider won the field.
        assert_eq!(vec!["Google Books", "OpenLibrary"], record.sources);
    }

    #[test]
    fn authors_union_extend_preserves_first_seen_order() {
        let mut record = record();
        record.absorb(
            PartialRecord {
                authors: vec!["Joshua Bloch".to_owned()],
                ..PartialRecord::default()
            },
            "Google Books",
        );
        record.absorb(
            PartialRecord {
                authors: vec!["Joshua Bloch".to_owned(), "Guy Steele".to_owned()],
                ..PartialRecord::default()
            },
            "OpenLibrary",
        );

        assert_eq!(vec!["Joshua Bloch", "Guy Steele"], record.authors);
        assert_eq!(vec!["Google Books", "OpenLibrary"], record.sources);
    }

    #[test]
    fn subject_accumulates_without_duplication() {
        let mut record = record();
        record.absorb(
            PartialRecord {
                subject: Some("Computers, Java".to_owned()),
                ..PartialRecord::default()
            },
            "Google Books",
        );
        record.absorb(
            PartialRecord {
                subject: Some("Java".to_owned()),
                ..PartialRecord::default()
            },
            "OpenLibrary",
        );
        record.absorb(
            PartialRecord {
                subject: Some("Programming".to_owned()),
                ..PartialRecord::default()
            },
            "Internet Archive",
        );

        assert_eq!(
            Some("Computers, Java, Programming"),
            record.subject.as_deref()
        );
        assert_eq!(
            vec!["Google Books", "OpenLibrary", "Internet Archive"],
            record.sources
        );
    }

    #[test]
    fn absorb_is_idempotent() {
        let mut once = record();
        once.absorb(rich_partial(), "Google Books");

        let mut twice = record();
        twice.absorb(rich_partial(), "Google Books");
        twice.absorb(rich_partial(), "Google Books");

        assert_eq!(once.authors, twice.authors);
        assert_eq!(once.subject, twice.subject);
        assert_eq!(once.sources, twice.sources);
    }

    #[test]
    fn accumulation_is_order_invariant() {
        let a = PartialRecord {
            authors: vec!["Joshua Bloch".to_owned()],
            subject: Some("Java".to_owned()),
            ..PartialRecord::default()
        };
        let b = PartialRecord {
            authors: vec!["Guy Steele".to_owned(), "Joshua Bloch".to_owned()],
            subject: Some("Java".to_owned()),
            ..PartialRecord::default()
        };

        let mut ab = record();
        ab.absorb(a.clone(), "Google Books");
        ab.absorb(b.clone(), "OpenLibrary");

        let mut ba = record();
        ba.absorb(b, "OpenLibrary");
        ba.absorb(a, "Google Books");

        let mut ab_authors = ab.authors.clone();
        let mut ba_authors = ba.authors.clone();
        ab_authors.sort();
        ba_authors.sort();
        assert_eq!(ab_authors, ba_authors);

        let mut ab_sources = ab.sources.clone();
        let mut ba_sources = ba.sources.clone();
        ab_sources.sort();
        ba_sources.sort();
        assert_eq!(ab_sources, ba_sources);
    }

    #[test]
    fn empty_partial_contributes_nothing() {
        let mut record = record();
        record.absorb(PartialRecord::default(), "AbeBooks Covers");

        assert!(!record.found);
        assert!(record.sources.is_empty());
    }

    #[test]
    fn found_flag_serializes_as_book() {
        let mut record = record();
        record.absorb(rich_partial(), "Google Books");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(serde_json::json!(true), json["book"]);
        assert_eq!(serde_json::json!("9780134685991"), json["isbn"]);
        assert!(json.get("found").is_none());
    }
}
