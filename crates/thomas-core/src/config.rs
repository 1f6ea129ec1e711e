use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Constructor configuration for a [`crate::Chatbot`], per the external
/// interfaces table: every knob lives on this record, nothing is read from
/// process-wide globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Directory containing the two persisted store files.
    pub storage_path: PathBuf,
    /// Enables the learner; when false `respond` is pure with respect to
    /// the stores.
    pub learn: bool,
    /// Minimum composite score for primary retrieval (§4.F step 2).
    pub min_score: f64,
    /// Relative retention after the best score, applied in step 5.
    pub score_threshold: f64,
    /// Associative-expansion share threshold, step 7.
    pub mesh_association: f64,
    /// Seeds the sampling RNG deterministically when set; otherwise the RNG
    /// is seeded from OS entropy. Not part of spec.md's option table, but
    /// required to make the property tests in §8 reproducible.
    pub rng_seed: Option<u64>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("storage"),
            learn: true,
            min_score: 0.7,
            score_threshold: 0.7,
            mesh_association: 0.6,
            rng_seed: None,
        }
    }
}
