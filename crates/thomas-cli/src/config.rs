use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use thomas_core::ChatbotConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("storage") }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub enabled: bool,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_score: f64,
    pub score_threshold: f64,
    pub mesh_association: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { min_score: 0.7, score_threshold: 0.7, mesh_association: 0.6 }
    }
}

/// On-disk configuration for the CLI, one section per concern (storage,
/// learning, scoring), round-tripped through TOML the way `AppConfig`
/// does in the teacher's `aigent-config` crate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThomasAppConfig {
    pub storage: StorageConfig,
    pub learning: LearningConfig,
    pub scoring: ScoringConfig,
}

impl ThomasAppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }
        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl From<ThomasAppConfig> for ChatbotConfig {
    fn from(app: ThomasAppConfig) -> Self {
        ChatbotConfig {
            storage_path: app.storage.path,
            learn: app.learning.enabled,
            min_score: app.scoring.min_score,
            score_threshold: app.scoring.score_threshold,
            mesh_association: app.scoring.mesh_association,
            rng_seed: None,
        }
    }
}
