use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::error::{EngineError, RecommendError};
use crate::record::{MovieRecord, RawMovie};
use crate::similarity::{SimilarityMatrix, TitleIndex};
use crate::vectorizer::{DocumentVector, TfidfVectorizer, Vocabulary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub row: usize,
    pub title: String,
    pub score: f32,
}

/// Everything derived from a corpus, built once and read-only afterwards.
pub struct Engine {
    config: EngineConfig,
    records: Vec<MovieRecord>,
    vocabulary: Vocabulary,
    vectors: Vec<DocumentVector>,
    similarity: SimilarityMatrix,
    titles: TitleIndex,
}

impl Engine {
    pub fn initialize(corpus: Vec<MovieRecord>) -> Result<Self, EngineError> {
        Self::with_config(corpus, EngineConfig::default())
    }

    pub fn from_raw(raw: Vec<RawMovie>, config: EngineConfig) -> Result<Self, EngineError> {
        let malformed: usize = raw.iter().map(RawMovie::malformed_fields).sum();
        if malformed > 0 {
            tracing::warn!(malformed, "some structured fields could not be parsed and were left empty");
        }
        Self::with_config(raw.into_iter().map(MovieRecord::from_raw).collect(), config)
    }

    pub fn with_config(corpus: Vec<MovieRecord>, config: EngineConfig) -> Result<Self, EngineError> {
        if corpus.is_empty() {
            return Err(EngineError::InvalidCorpus("corpus is empty".into()));
        }
        if let Some(row) = corpus.iter().position(|r| r.title.trim().is_empty()) {
            return Err(EngineError::InvalidCorpus(format!("record at row {row} has no title")));
        }

        let start = Instant::now();
        let soups: Vec<&str> = corpus.iter().map(MovieRecord::soup).collect();
        let (vocabulary, vectors) = TfidfVectorizer::new(config.vectorizer).fit_transform(&soups);
        if vocabulary.is_empty() {
            tracing::warn!("vocabulary is empty; every similarity will be 0");
        }
        let similarity = SimilarityMatrix::build(&vectors);
        let titles = TitleIndex::build(&corpus);
        if titles.len() < corpus.len() {
            tracing::info!(hidden = corpus.len() - titles.len(), "duplicate titles are only reachable through their first row");
        }
        tracing::info!(
            records = corpus.len(),
            terms = vocabulary.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "recommendation engine ready"
        );

        Ok(Self { config, records: corpus, vocabulary, vectors, similarity, titles })
    }

    /// Exact title first, then the first case-insensitive match in corpus order.
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.titles.get(title).or_else(|| {
            let wanted = title.to_lowercase();
            self.records.iter().position(|r| r.title.to_lowercase() == wanted)
        })
    }

    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<String>, RecommendError> {
        Ok(self.recommend_scored(title, k)?.into_iter().map(|r| r.title).collect())
    }

    /// Up to `k` other rows ranked by descending similarity; ties keep corpus order.
    pub fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<Recommendation>, RecommendError> {
        let idx = self.resolve(title).ok_or_else(|| RecommendError::NotFound(title.to_string()))?;
        let mut ranked: Vec<(usize, f32)> =
            self.similarity.row(idx).iter().copied().enumerate().filter(|(row, _)| *row != idx).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        tracing::debug!(query = title, row = idx, hits = ranked.len(), "recommend");

        Ok(ranked
            .into_iter()
            .map(|(row, score)| Recommendation { row, title: self.records[row].title.clone(), score })
            .collect())
    }

    /// Up to `n` distinct rows' titles, chosen uniformly at random.
    pub fn sample_titles<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<&str> {
        self.records.choose_multiple(rng, n).map(|r| r.title.as_str()).collect()
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn record(&self, row: usize) -> Option<&MovieRecord> { self.records.get(row) }
    pub fn records(&self) -> &[MovieRecord] { &self.records }
    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }
    pub fn vector(&self, row: usize) -> Option<&DocumentVector> { self.vectors.get(row) }
    pub fn similarity(&self) -> &SimilarityMatrix { &self.similarity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn movie(title: &str, genre: &str, keyword: &str, cast: &str, director: &str) -> MovieRecord {
        MovieRecord::new(title, title, &[genre], &[keyword], &[cast], director)
    }

    #[test]
    fn ties_keep_corpus_order() {
        let engine = Engine::initialize(vec![
            movie("Q", "action", "hero", "a", "d"),
            movie("X", "drama", "x", "b", "e"),
            movie("Y", "drama", "y", "c", "f"),
            movie("Z", "drama", "z", "g", "h"),
        ])
        .unwrap();
        assert_eq!(engine.recommend("Q", 10).unwrap(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn k_zero_is_empty_not_an_error() {
        let engine = Engine::initialize(vec![movie("A", "a", "b", "c", "d"), movie("B", "a", "b", "c", "d")]).unwrap();
        assert!(engine.recommend("A", 0).unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_and_untitled_corpora() {
        assert!(matches!(Engine::initialize(vec![]), Err(EngineError::InvalidCorpus(_))));
        let untitled = vec![movie("A", "a", "b", "c", "d"), movie("  ", "a", "b", "c", "d")];
        assert_eq!(
            Engine::initialize(untitled).err(),
            Some(EngineError::InvalidCorpus("record at row 1 has no title".into()))
        );
    }

    #[test]
    fn samples_are_distinct_rows() {
        let engine = Engine::initialize(vec![
            movie("A", "a", "b", "c", "d"),
            movie("B", "a", "b", "c", "d"),
            movie("C", "a", "b", "c", "d"),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut picked = engine.sample_titles(&mut rng, 5);
        picked.sort();
        assert_eq!(picked, vec!["A", "B", "C"]);
    }
}
