use std::fmt;

use chrono::{DateTime, Utc};

use crate::mesh::MeshId;
use crate::utterance::UtteranceId;

/// Caller-owned per-user session state (§3, §4.G). The core never holds
/// this itself — a caller multiplexing many users keeps one `Context` per
/// user against a single shared `Chatbot`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub last_resp: Option<UtteranceId>,
    pub last_msg: Option<MeshId>,
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `last_resp`/`last_msg` from a [`Response`] and stamps
    /// `last_timestamp`, mirroring the original `Context.save_resp`'s
    /// `time.time()` call. The timestamp is informational only — nothing in
    /// the core reads it back.
    pub fn save(&mut self, response: &Response) {
        self.last_resp = Some(response.resp_id);
        self.last_msg = response.mesh_id;
        self.last_timestamp = Some(Utc::now());
    }
}

/// Result of [`crate::Chatbot::respond`] (§4.F). `mesh_id` is absent on the
/// cold-fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub mesh_id: Option<MeshId>,
    pub resp_id: UtteranceId,
    pub tokens: Vec<String>,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
