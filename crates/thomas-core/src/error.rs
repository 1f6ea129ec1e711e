use thiserror::Error;

/// Failure reading or writing a persisted store.
#[derive(Debug, Error)]
pub enum PersistenceSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// The three error kinds from the core's error handling design.
#[derive(Debug, Error)]
pub enum ThomasError {
    /// Cold fallback reached an empty utterance store.
    #[error("no utterances available to respond with")]
    EmptyCorpus,

    /// I/O or serialization failure while loading or saving a store.
    /// File-absent is not an error — only malformed content or I/O faults
    /// surface here.
    #[error("persistence failure while {context}")]
    PersistenceFailure {
        context: String,
        #[source]
        source: PersistenceSource,
    },

    /// A stored id refers to an utterance that does not exist. Storage is
    /// corrupted; the caller should treat this as fatal.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl ThomasError {
    pub(crate) fn persistence(context: impl Into<String>, source: impl Into<PersistenceSource>) -> Self {
        Self::PersistenceFailure {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThomasError>;
