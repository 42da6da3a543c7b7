//! ISBN normalization.
//!
//! Providers are queried with a cleaned ISBN string: surrounding whitespace,
//! internal hyphens and spaces are stripped before the shape check. Checksum
//! validation is optional, see [`Isbn::parse_strict`].

use std::{fmt, str::FromStr};

use crate::{Error, ErrorKind};

/// A normalized 10 or 13 character ISBN.
///
/// The check character of an ISBN-10 may be `X` and is always stored in
/// uppercase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isbn(String);

impl Isbn {
    /// Cleans and validates the shape of a raw ISBN string.
    ///
    /// Hyphens and whitespace are removed, the remainder must be exactly 10
    /// or 13 characters of `[0-9]`, with `X`/`x` legal only as the final
    /// character of a 10 character ISBN.
    ///
    /// # Errors
    ///
    /// An `Err` of kind [`ErrorKind::InvalidIsbn`] is returned when the
    /// cleaned string does not have a valid shape.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let valid = match cleaned.len() {
            10 => cleaned
                .chars()
                .enumerate()
                .all(|(i, c)| c.is_ascii_digit() || (i == 9 && c == 'X')),
            13 => cleaned.chars().all(|c| c.is_ascii_digit()),
            _ => false,
        };

        if valid {
            Ok(Self(cleaned))
        } else {
            Err(Error::new(
                ErrorKind::InvalidIsbn,
                format!("'{}' is not a valid 10 or 13 character ISBN", input.trim()),
            ))
        }
    }

    /// Like [`Isbn::parse`] but additionally validates the check digit.
    ///
    /// # Errors
    ///
    /// An `Err` of kind [`ErrorKind::InvalidIsbn`] is returned when the shape
    /// or the checksum is invalid.
    pub fn parse_strict(input: &str) -> Result<Self, Error> {
        let isbn = Self::parse(input)?;

        if isbn.checksum_ok() {
            Ok(isbn)
        } else {
            Err(Error::new(
                ErrorKind::InvalidIsbn,
                format!("'{}' has an invalid check digit", isbn.0),
            ))
        }
    }

    /// The normalized ISBN string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn checksum_ok(&self) -> bool {
        let digit = |c: char| c.to_digit(10).unwrap_or(10);

        if self.0.len() == 10 {
            // ISBN-10: sum of digits weighted 10..1 must be 0 mod 11, X = 10.
            let sum: u32 = self
                .0
                .chars()
                .zip((1..=10_u32).rev())
                .map(|(c, weight)| digit(c) * weight)
                .sum();
            sum % 11 == 0
        } else {
            // ISBN-13: digits weighted alternately 1 and 3 must be 0 mod 10.
            let sum: u32 = self
                .0
                .chars()
                .zip([1_u32, 3].into_iter().cycle())
                .map(|(c, weight)| digit(c) * weight)
                .sum();
            sum % 10 == 0
        }
    }
}

impl FromStr for Isbn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
