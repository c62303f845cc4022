use std::collections::{HashMap, HashSet};

use crate::config::VectorizerConfig;
use crate::tokenizer::tokenize;

pub type TermId = u32;

/// Term dictionary with document frequencies and idf weights. Immutable after fitting.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.df.len() }
    pub fn is_empty(&self) -> bool { self.df.is_empty() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
    pub fn df(&self, term_id: TermId) -> Option<u32> { self.df.get(term_id as usize).copied() }
    pub fn idf(&self, term_id: TermId) -> Option<f32> { self.idf.get(term_id as usize).copied() }
}

/// Sparse, L2-normalized tf-idf weights sorted by term id. A document with no
/// vocabulary terms is the empty vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVector {
    entries: Vec<(TermId, f32)>,
}

impl DocumentVector {
    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn weight(&self, term_id: TermId) -> f32 {
        self.entries
            .binary_search_by_key(&term_id, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Merge-join dot product over the two sorted entry lists.
    pub fn dot(&self, other: &DocumentVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

pub struct TfidfVectorizer {
    config: VectorizerConfig,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self { Self { config } }

    /// Fit the vocabulary over the whole corpus and weight every document in one pass.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> (Vocabulary, Vec<DocumentVector>) {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut tf_per_doc: Vec<Vec<(TermId, u32)>> = Vec::with_capacity(docs.len());

        for doc in docs {
            let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokenize(doc.as_ref()) {
                let tid = match dictionary.get(term) {
                    Some(&tid) => tid,
                    None => {
                        let tid = df.len() as TermId;
                        dictionary.insert(term.to_string(), tid);
                        df.push(0);
                        tid
                    }
                };
                *tf_counts.entry(tid).or_insert(0) += 1;
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            let mut tf: Vec<(TermId, u32)> = tf_counts.into_iter().collect();
            tf.sort_unstable_by_key(|(tid, _)| *tid);
            tf_per_doc.push(tf);
        }

        let n = docs.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&df_t| {
                let df_t = df_t as f32;
                if self.config.smooth_idf { ((1.0 + n) / (1.0 + df_t)).ln() + 1.0 } else { (n / df_t.max(1.0)).ln() + 1.0 }
            })
            .collect();

        let vectors = tf_per_doc
            .into_iter()
            .map(|tf| {
                let mut entries: Vec<(TermId, f32)> = tf
                    .into_iter()
                    .map(|(tid, raw)| {
                        let tf = if self.config.sublinear_tf { 1.0 + (raw as f32).ln() } else { raw as f32 };
                        (tid, tf * idf[tid as usize])
                    })
                    .collect();
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() { *w /= norm; }
                } else {
                    entries.clear();
                }
                DocumentVector { entries }
            })
            .collect();

        (Vocabulary { dictionary, df, idf }, vectors)
    }
}
