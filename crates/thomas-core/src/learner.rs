use tracing::{debug, trace};

use crate::context::Context;
use crate::error::{Result, ThomasError};
use crate::mesh::Mesh;
use crate::normalizer::TextNormalizer;
use crate::utterance::{UtteranceId, UtteranceStore};

/// Mutates the utterance store and mesh to record one observed exchange
/// (§4.E). Invoked only when the caller's `learn` flag is true.
///
/// `msg_id` must already be interned into `utterances` by the caller —
/// the learner only reads it back to check/extend the mesh.
pub(crate) fn learn(
    utterances: &UtteranceStore,
    mesh: &mut Mesh,
    normalizer: &dyn TextNormalizer,
    ctx: &Context,
    msg_id: UtteranceId,
) -> Result<()> {
    let Some(last_resp) = ctx.last_resp else {
        trace!("no last_resp in context, nothing to learn");
        return Ok(());
    };

    let mut save_resp = true;

    if !mesh.has_link(last_resp) {
        let tokens = utterances.get_tokens(last_resp).ok_or_else(|| {
            ThomasError::InvariantViolation(format!(
                "ctx.last_resp {last_resp} has no entry in the utterance store"
            ))
        })?;
        let (keywords, stop_words) = normalizer.classify_tokens(tokens);
        debug!(%last_resp, keywords = keywords.len(), stop_words = stop_words.len(), "creating link lazily");
        mesh.add_link(last_resp, keywords, stop_words);
    } else if mesh.has_resp(last_resp, msg_id) {
        save_resp = false;
    }

    if save_resp {
        trace!(%last_resp, %msg_id, prior = ?ctx.last_msg, "recording response");
        mesh.add_resp(last_resp, msg_id, ctx.last_msg);
    }

    Ok(())
}
