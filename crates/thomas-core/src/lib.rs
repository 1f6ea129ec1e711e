//! Core of Thomas: a self-learning, retrieval-based conversational agent.
//!
//! Thomas has no pretrained model. Its knowledge is a persistent graph
//! built entirely from prior user utterances; replies are always verbatim
//! past utterances, selected by a multi-stage scoring and sampling
//! procedure. This crate owns the two persistent stores, the learning
//! procedure, and the retrieval procedure. It depends only on the
//! [`TextNormalizer`] trait it defines — a concrete English implementation
//! lives in `thomas-nlp`.

mod chatbot;
mod config;
mod context;
mod error;
mod learner;
mod mesh;
mod normalizer;
mod persistence;
mod responder;
mod utterance;

pub use chatbot::Chatbot;
pub use config::ChatbotConfig;
pub use context::{Context, Response};
pub use error::{PersistenceSource, Result, ThomasError};
pub use mesh::{Link, Mesh, MeshId};
pub use normalizer::{NormalizedText, TextNormalizer};
pub use utterance::{UtteranceId, UtteranceStore};
