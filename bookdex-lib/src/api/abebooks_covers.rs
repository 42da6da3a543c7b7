use log::info;

use crate::{record::PartialRecord, Error, ErrorKind, Isbn};

use super::Client;

/// AbeBooks has no metadata endpoint, the adapter only probes for a cover
/// scan and yields a record with the image URL alone.
pub(crate) fn fetch<C: Client>(client: &C, isbn: &Isbn) -> Result<PartialRecord, Error> {
    info!("Searching for ISBN '{isbn}' using the AbeBooks Covers API");
    let cover_url = format!("https://pictures.abebooks.com/isbn/{isbn}-us-300.jpg");

    match client.get_status(&cover_url)? {
        200 => Ok(PartialRecord {
            cover_image: Some(cover_url),
            ..PartialRecord::default()
        }),
        _ => Err(Error::new(
            ErrorKind::NotFound,
            "No AbeBooks cover for the ISBN",
        )),
    }
}
