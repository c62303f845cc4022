//! Turns raw per-movie attributes into the canonical feature set used for the soup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::soup::build_soup;

/// Number of billed cast members kept per movie.
pub const MAX_CAST: usize = 3;

/// One element of a structured attribute list, e.g. `{"name": "Action"}` or
/// `{"name": "James Cameron", "job": "Director"}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub name: Option<String>,
    pub job: Option<String>,
}

impl Entity {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), job: None }
    }

    pub fn with_job(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self { name: Some(name.into()), job: Some(job.into()) }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self { name: field("name"), job: field("job") })
    }
}

/// A structured attribute as it arrives from the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawField {
    #[default]
    Absent,
    Malformed,
    Parsed(Vec<Entity>),
}

impl RawField {
    /// Leniently parse a serialized entity list.
    ///
    /// Strict JSON is tried first; single-quoted literals are retried with the
    /// quotes swapped. Anything that still isn't a list degrades to `Malformed`.
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return RawField::Absent;
        }
        let value = serde_json::from_str::<Value>(cell)
            .or_else(|_| serde_json::from_str::<Value>(&cell.replace('\'', "\"")));
        match value {
            Ok(Value::Array(items)) => RawField::Parsed(items.iter().filter_map(Entity::from_value).collect()),
            Ok(Value::Null) => RawField::Absent,
            _ => RawField::Malformed,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        match self {
            RawField::Parsed(entities) => entities,
            RawField::Absent | RawField::Malformed => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, RawField::Malformed)
    }
}

impl From<Vec<Entity>> for RawField {
    fn from(entities: Vec<Entity>) -> Self {
        RawField::Parsed(entities)
    }
}

/// A movie before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMovie {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub genres: RawField,
    pub keywords: RawField,
    pub cast: RawField,
    pub crew: RawField,
}

impl RawMovie {
    pub fn malformed_fields(&self) -> usize {
        [&self.genres, &self.keywords, &self.cast, &self.crew].into_iter().filter(|f| f.is_malformed()).count()
    }
}

/// A normalized movie. The soup is derived from the other fields at construction
/// and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    pub cast: Vec<String>,
    pub director: String,
    soup: String,
}

impl MovieRecord {
    /// Build a record from un-normalized feature values. Every token is passed
    /// through [`normalize_token`] and the cast is cut to [`MAX_CAST`].
    pub fn new<S: AsRef<str>>(
        id: impl Into<String>,
        title: impl Into<String>,
        genres: &[S],
        keywords: &[S],
        cast: &[S],
        director: &str,
    ) -> Self {
        let normalize_all = |xs: &[S]| xs.iter().map(|x| normalize_token(x.as_ref())).collect::<Vec<_>>();
        let mut record = Self {
            id: id.into(),
            title: title.into(),
            overview: String::new(),
            genres: normalize_all(genres),
            keywords: normalize_all(keywords),
            cast: normalize_all(&cast[..cast.len().min(MAX_CAST)]),
            director: normalize_token(director),
            soup: String::new(),
        };
        record.soup = build_soup(&record);
        record
    }

    pub fn from_raw(raw: RawMovie) -> Self {
        if raw.malformed_fields() > 0 {
            tracing::debug!(id = %raw.id, title = %raw.title, malformed = raw.malformed_fields(), "degraded malformed fields to empty");
        }
        let genres = extract_names(&raw.genres);
        let keywords = extract_names(&raw.keywords);
        let billed = raw.cast.entities();
        let cast = names(&billed[..billed.len().min(MAX_CAST)]);
        let director = extract_director(&raw.crew);
        let mut record = Self::new(raw.id, raw.title, &genres, &keywords, &cast, &director);
        record.overview = raw.overview;
        record
    }

    pub fn soup(&self) -> &str {
        &self.soup
    }
}

/// The `name` of every entity, in order. Entities without a name are skipped.
pub fn extract_names(field: &RawField) -> Vec<String> {
    names(field.entities())
}

fn names(entities: &[Entity]) -> Vec<String> {
    entities.iter().filter_map(|e| e.name.clone()).collect()
}

/// Name of the first crew member whose job is exactly `Director`, or empty.
pub fn extract_director(crew: &RawField) -> String {
    crew.entities()
        .iter()
        .find(|e| e.job.as_deref() == Some("Director"))
        .and_then(|e| e.name.clone())
        .unwrap_or_default()
}

/// Lowercase and drop spaces so multi-word names stay a single term.
pub fn normalize_token(s: &str) -> String {
    s.replace(' ', "").to_lowercase()
}
