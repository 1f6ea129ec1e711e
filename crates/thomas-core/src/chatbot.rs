use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

use crate::config::ChatbotConfig;
use crate::context::{Context, Response};
use crate::error::Result;
use crate::learner;
use crate::mesh::Mesh;
use crate::normalizer::TextNormalizer;
use crate::persistence;
use crate::responder;
use crate::utterance::UtteranceStore;

/// The self-learning conversational core (§1-§2). Not re-entrant, not
/// thread-safe — one instance owns one (Utterance Store, Mesh) pair and is
/// driven single-threaded per §5.
pub struct Chatbot<N: TextNormalizer> {
    config: ChatbotConfig,
    normalizer: N,
    utterances: UtteranceStore,
    mesh: Mesh,
    rng: StdRng,
}

impl<N: TextNormalizer> Chatbot<N> {
    /// Loads both stores from `config.storage_path` (empty if absent) and
    /// validates referential invariants before returning.
    pub fn new(config: ChatbotConfig, normalizer: N) -> Result<Self> {
        let utterances = persistence::load_utterances(&config.storage_path)?;
        let mesh = persistence::load_mesh(&config.storage_path)?;
        persistence::validate_invariants(&utterances, &mesh)?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            storage_path = %config.storage_path.display(),
            utterances = utterances.len(),
            mesh = mesh.len(),
            "chatbot loaded"
        );

        Ok(Self { config, normalizer, utterances, mesh, rng })
    }

    /// Builds an empty chatbot with no persisted storage to load from, for
    /// tests and embedders that manage their own persistence.
    pub fn in_memory(config: ChatbotConfig, normalizer: N) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, normalizer, utterances: UtteranceStore::new(), mesh: Mesh::new(), rng }
    }

    pub fn config(&self) -> &ChatbotConfig {
        &self.config
    }

    pub fn utterance_count(&self) -> usize {
        self.utterances.len()
    }

    pub fn mesh_size(&self) -> usize {
        self.mesh.len()
    }

    /// One turn: tokenize, learn (if enabled), then retrieve/rank/sample a
    /// reply (§1). Returns the chosen mesh-id (if any), resp-id, and tokens.
    #[instrument(skip(self, ctx, text), fields(learn = self.config.learn))]
    pub fn respond(&mut self, ctx: &Context, text: &str) -> Result<Response> {
        let normalized = self.normalizer.normalize(text);

        let mut msg_id = self.utterances.lookup_by_tokens(&normalized.raw_tokens);

        if self.config.learn {
            let id = match msg_id {
                Some(id) => id,
                None => self.utterances.intern(normalized.raw_tokens.clone()),
            };
            msg_id = Some(id);
            learner::learn(&self.utterances, &mut self.mesh, &self.normalizer, ctx, id)?;
        }

        responder::respond(&self.utterances, &self.mesh, &self.config, &mut self.rng, ctx, msg_id, &normalized)
    }

    /// Flushes both stores to `config.storage_path` (§4.D, §6).
    pub fn save_data(&self) -> Result<()> {
        persistence::save_utterances(&self.config.storage_path, &self.utterances)?;
        persistence::save_mesh(&self.config.storage_path, &self.mesh)?;
        Ok(())
    }
}
