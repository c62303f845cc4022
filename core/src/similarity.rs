use rayon::prelude::*;
use std::collections::HashMap;

use crate::record::MovieRecord;
use crate::vectorizer::DocumentVector;

/// Dense, symmetric N×N cosine similarity between document vectors.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Rows of the upper triangle are computed in parallel from the sparse
    /// vectors, then mirrored into the dense matrix once every row is done.
    pub fn build(vectors: &[DocumentVector]) -> Self {
        let n = vectors.len();
        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let vi = &vectors[i];
                (i..n)
                    .map(|j| {
                        if i == j {
                            // a zero vector has no direction; define its self-similarity as 0
                            if vi.is_empty() { 0.0 } else { 1.0 }
                        } else {
                            vi.dot(&vectors[j]).clamp(0.0, 1.0)
                        }
                    })
                    .collect()
            })
            .collect();

        let mut scores = vec![0.0f32; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, score) in row.into_iter().enumerate() {
                let j = i + offset;
                scores[i * n + j] = score;
                scores[j * n + i] = score;
            }
        }
        Self { dim: n, scores }
    }

    pub fn dim(&self) -> usize { self.dim }

    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.dim && j < self.dim, "({i}, {j}) out of range for {}x{}", self.dim, self.dim);
        self.scores[i * self.dim + j]
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.scores[i * self.dim..(i + 1) * self.dim]
    }
}

/// Exact title → row lookup. On duplicate titles the first row wins.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    rows: HashMap<String, usize>,
}

impl TitleIndex {
    pub fn build(records: &[MovieRecord]) -> Self {
        let mut rows = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            rows.entry(record.title.clone()).or_insert(row);
        }
        Self { rows }
    }

    pub fn get(&self, title: &str) -> Option<usize> { self.rows.get(title).copied() }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorizerConfig;
    use crate::vectorizer::TfidfVectorizer;

    fn matrix(docs: &[&str]) -> SimilarityMatrix {
        let (_, vectors) = TfidfVectorizer::new(VectorizerConfig::default()).fit_transform(docs);
        SimilarityMatrix::build(&vectors)
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = matrix(&["hero xy d1 action", "hero zw d2 action", "family zw d2 drama"]);
        assert_eq!(m.dim(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!((0.0..=1.0).contains(&m.get(i, j)));
            }
        }
        assert!(m.get(0, 1) > m.get(0, 2));
    }

    #[test]
    fn empty_soup_has_zero_self_similarity() {
        let m = matrix(&["hero action", "the of", ""]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.row(2), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn title_index_keeps_first_duplicate() {
        let records = vec![
            MovieRecord::new("1", "Heat", &["Crime"], &[], &[], ""),
            MovieRecord::new("2", "Heat", &["Drama"], &[], &[], ""),
            MovieRecord::new("3", "Alien", &["Horror"], &[], &[], ""),
        ];
        let index = TitleIndex::build(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Heat"), Some(0));
        assert_eq!(index.get("heat"), None);
    }
}
