//! Reads the TMDB 5000 movies and credits tables and joins them into raw records.

use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::DatasetError;
use crate::record::{RawField, RawMovie};

/// Accepted names for the movie id column of the movies table, in priority order.
pub const MOVIE_ID_COLUMNS: &[&str] = &["id", "movie_id", "tmdbId"];

struct Credits {
    cast: RawField,
    crew: RawField,
}

pub fn load_tmdb<P: AsRef<Path>, Q: AsRef<Path>>(movies: P, credits: Q) -> Result<Vec<RawMovie>, DatasetError> {
    let (movies, credits) = (movies.as_ref(), credits.as_ref());
    let open = |path: &Path| {
        std::fs::File::open(path).map_err(|source| DatasetError::Io { path: path.display().to_string(), source })
    };
    let raw = join_tables(
        open(movies)?,
        &movies.display().to_string(),
        open(credits)?,
        &credits.display().to_string(),
    )?;
    tracing::info!(movies = %movies.display(), credits = %credits.display(), records = raw.len(), "loaded dataset");
    Ok(raw)
}

/// Inner join on movie id, in movies-table order. Rows without a title are skipped.
pub fn join_tables<M: Read, C: Read>(
    movies: M,
    movies_name: &str,
    credits: C,
    credits_name: &str,
) -> Result<Vec<RawMovie>, DatasetError> {
    let credits = read_credits(credits, credits_name)?;

    let csv_err = |source| DatasetError::Csv { path: movies_name.to_string(), source };
    let mut reader = csv::Reader::from_reader(movies);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let id_col = MOVIE_ID_COLUMNS
        .iter()
        .find_map(|name| column(&headers, name))
        .ok_or_else(|| missing(movies_name, &MOVIE_ID_COLUMNS.join("/")))?;
    let title_col = column(&headers, "title").ok_or_else(|| missing(movies_name, "title"))?;
    let genres_col = column(&headers, "genres");
    let keywords_col = column(&headers, "keywords");
    let overview_col = column(&headers, "overview");

    let mut out = Vec::new();
    let mut untitled = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let id = cell(&row, Some(id_col)).trim().to_string();
        let Some(matches) = credits.get(&id) else { continue };
        let title = cell(&row, Some(title_col)).to_string();
        if title.trim().is_empty() {
            untitled += 1;
            continue;
        }
        for credit in matches {
            out.push(RawMovie {
                id: id.clone(),
                title: title.clone(),
                overview: cell(&row, overview_col).to_string(),
                genres: RawField::parse(cell(&row, genres_col)),
                keywords: RawField::parse(cell(&row, keywords_col)),
                cast: credit.cast.clone(),
                crew: credit.crew.clone(),
            });
        }
    }
    if untitled > 0 {
        tracing::warn!(untitled, "skipped movies without a title");
    }
    Ok(out)
}

fn read_credits<C: Read>(credits: C, name: &str) -> Result<HashMap<String, Vec<Credits>>, DatasetError> {
    let csv_err = |source| DatasetError::Csv { path: name.to_string(), source };
    let mut reader = csv::Reader::from_reader(credits);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let id_col = column(&headers, "movie_id").ok_or_else(|| missing(name, "movie_id"))?;
    let cast_col = column(&headers, "cast");
    let crew_col = column(&headers, "crew");

    let mut by_id: HashMap<String, Vec<Credits>> = HashMap::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        by_id.entry(cell(&row, Some(id_col)).trim().to_string()).or_default().push(Credits {
            cast: RawField::parse(cell(&row, cast_col)),
            crew: RawField::parse(cell(&row, crew_col)),
        });
    }
    Ok(by_id)
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn cell(row: &StringRecord, col: Option<usize>) -> &str {
    col.and_then(|c| row.get(c)).unwrap_or("")
}

fn missing(path: &str, expected: &str) -> DatasetError {
    DatasetError::MissingColumn { path: path.to_string(), expected: expected.to_string() }
}
