use crate::record::MovieRecord;

/// Keywords, cast, director and genres joined by single spaces, in that order.
///
/// Empty fields are not collapsed, so a record with no keywords starts with a space.
pub fn build_soup(record: &MovieRecord) -> String {
    [
        record.keywords.join(" "),
        record.cast.join(" "),
        record.director.clone(),
        record.genres.join(" "),
    ]
    .join(" ")
}
