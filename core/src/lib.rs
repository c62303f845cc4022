//! Content-based movie recommendations: metadata soups, TF-IDF vectors and a
//! cosine similarity matrix queried by title.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod record;
pub mod similarity;
pub mod soup;
pub mod tokenizer;
pub mod vectorizer;

pub use config::{EngineConfig, VectorizerConfig};
pub use engine::{Engine, Recommendation};
pub use error::{DatasetError, EngineError, RecommendError};
pub use record::{Entity, MovieRecord, RawField, RawMovie};
pub use similarity::{SimilarityMatrix, TitleIndex};
pub use vectorizer::{DocumentVector, TermId, TfidfVectorizer, Vocabulary};
