use serde::{Deserialize, Serialize};

/// Term weighting knobs for the TF-IDF fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// idf = ln((1 + n) / (1 + df)) + 1 when set, ln(n / df) + 1 otherwise.
    #[serde(default = "default_true")]
    pub smooth_idf: bool,
    /// Replace raw term counts with 1 + ln(tf).
    #[serde(default)]
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { smooth_idf: true, sublinear_tf: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of titles returned when the caller does not ask for a specific k.
    #[serde(default = "default_k")]
    pub default_k: usize,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { default_k: default_k(), vectorizer: VectorizerConfig::default() }
    }
}

fn default_k() -> usize { 10 }
fn default_true() -> bool { true }
