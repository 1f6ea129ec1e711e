use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::config::ChatbotConfig;
use crate::context::{Context, Response};
use crate::error::{Result, ThomasError};
use crate::mesh::{Link, Mesh, MeshId};
use crate::normalizer::NormalizedText;
use crate::utterance::{UtteranceId, UtteranceStore};

/// Runs retrieval, scoring, filtering, and weighted sampling (§4.F).
/// `msg_id` is `None` only when `learn=false` and the message was never
/// seen before.
pub(crate) fn respond(
    utterances: &UtteranceStore,
    mesh: &Mesh,
    config: &ChatbotConfig,
    rng: &mut StdRng,
    ctx: &Context,
    msg_id: Option<UtteranceId>,
    normalized: &NormalizedText,
) -> Result<Response> {
    // Step 1 — ignore set.
    let mut ignore: HashSet<UtteranceId> = HashSet::new();
    if let Some(last_resp) = ctx.last_resp {
        ignore.insert(last_resp);
    }
    if let Some(msg_id) = msg_id {
        ignore.insert(msg_id);
    }
    trace!(ignore_len = ignore.len(), "built ignore set");

    // Step 2 — primary composite-score retrieval.
    let composite_score = |link: &Link| -> f64 {
        let shared_kw = link.keywords.intersection(&normalized.keywords).count() as f64;
        let shared_sw = link.stop_words.intersection(&normalized.stop_words).count() as f64;
        let numerator = shared_sw / 2.0 + shared_kw;
        let denominator = link.stop_words.len() as f64 / 2.0 + link.keywords.len() as f64 - numerator + 1.0;
        numerator / denominator
    };
    let mut results = mesh.scan(composite_score, config.min_score, &ignore);
    debug!(hits = results.len(), "primary retrieval");

    // Step 3 — stop-words-only fallback.
    if results.is_empty() {
        let stop_word_score = |link: &Link| link.stop_words.intersection(&normalized.stop_words).count() as f64;
        results = mesh.scan(stop_word_score, 1.0, &ignore);
        debug!(hits = results.len(), "fallback retrieval");
    }

    // Step 4 — cold fallback.
    if results.is_empty() {
        return cold_fallback(utterances, mesh, rng, &ignore);
    }

    // Step 5 — score thresholding.
    let best = results
        .iter()
        .map(|(_, _, _, score)| *score)
        .fold(f64::MIN, f64::max);
    let cutoff = best * config.score_threshold;
    results.retain(|(_, _, _, score)| *score >= cutoff);
    results.sort_by(|a, b| b.3.partial_cmp(&a.3).unwrap_or(std::cmp::Ordering::Equal));
    if results.is_empty() {
        // Unreachable per §9: `best` itself always satisfies `score >= best * threshold`
        // when threshold <= 1.0. Kept as a defensive guard against misconfiguration.
        return cold_fallback(utterances, mesh, rng, &ignore);
    }

    // Step 6 — prior-message conditioning.
    let mut prev_meshes: BTreeMap<MeshId, HashSet<UtteranceId>> = BTreeMap::new();
    let mut all_meshes: BTreeMap<MeshId, HashSet<UtteranceId>> = BTreeMap::new();
    for (mesh_id, link, resps_left, _score) in &results {
        if let Some(last_msg) = ctx.last_msg {
            let r = resps_from_prior(resps_left, &link.resps, last_msg);
            if !r.is_empty() {
                prev_meshes.entry(*mesh_id).or_default().extend(r);
            }
        }
        all_meshes.entry(*mesh_id).or_default().extend(resps_left.iter().copied());
    }
    let prev_meshes_was_empty = prev_meshes.is_empty();
    let mut meshes = if prev_meshes_was_empty { all_meshes } else { prev_meshes };

    // Step 7 — associative expansion.
    let initial_resps: HashSet<UtteranceId> = meshes.values().flatten().copied().collect();
    let share_threshold = initial_resps.len() as f64 * config.mesh_association;
    let association_score = |link: &Link| link.resps.keys().filter(|id| initial_resps.contains(id)).count() as f64;
    let expansion = mesh.scan(association_score, share_threshold, &ignore);
    debug!(hits = expansion.len(), share_threshold, "associative expansion");
    for (mesh_id, link, resps_left, _score) in &expansion {
        let entry = meshes.entry(*mesh_id).or_default();
        if let Some(last_msg) = ctx.last_msg {
            let r = resps_from_prior(resps_left, &link.resps, last_msg);
            if !r.is_empty() {
                entry.extend(r);
            }
        }
        if prev_meshes_was_empty {
            entry.extend(resps_left.iter().copied());
        }
    }

    // Step 8 — uniform sampling over the union.
    let final_resps: Vec<UtteranceId> = meshes.values().flatten().copied().collect::<HashSet<_>>().into_iter().collect();
    let resp_id = *final_resps
        .choose(rng)
        .ok_or(ThomasError::EmptyCorpus)?;
    let mesh_id = meshes
        .iter()
        .find(|(_, resps)| resps.contains(&resp_id))
        .map(|(id, _)| *id);
    let tokens = utterances.get_tokens(resp_id).ok_or_else(|| {
        ThomasError::InvariantViolation(format!("resp_id {resp_id} selected but missing from utterance store"))
    })?;

    Ok(Response { mesh_id, resp_id, tokens: tokens.to_vec() })
}

fn resps_from_prior(
    resps_left: &HashSet<UtteranceId>,
    resps: &BTreeMap<UtteranceId, HashSet<UtteranceId>>,
    last_msg: MeshId,
) -> HashSet<UtteranceId> {
    resps_left
        .iter()
        .copied()
        .filter(|resp_id| resps.get(resp_id).map(|priors| priors.contains(&last_msg)).unwrap_or(false))
        .collect()
}

/// Step 4: select uniformly from unlinked utterances, or from the whole
/// corpus if none are unlinked. Follows the precise re-check from
/// `original_source` (`resp_ignore = ignore if len(ignore) < len(corpus) else None`):
/// once the ignore set would swallow the entire corpus, it is dropped
/// rather than leaving zero candidates.
fn cold_fallback(
    utterances: &UtteranceStore,
    mesh: &Mesh,
    rng: &mut StdRng,
    ignore: &HashSet<UtteranceId>,
) -> Result<Response> {
    let mut candidates: Vec<UtteranceId> = utterances
        .ids()
        .filter(|id| !mesh.has_link(*id) && !ignore.contains(id))
        .collect();

    if candidates.is_empty() {
        let drop_ignore = ignore.len() >= utterances.len();
        candidates = utterances
            .ids()
            .filter(|id| drop_ignore || !ignore.contains(id))
            .collect();
    }

    let resp_id = *candidates.choose(rng).ok_or(ThomasError::EmptyCorpus)?;
    let tokens = utterances.get_tokens(resp_id).ok_or_else(|| {
        ThomasError::InvariantViolation(format!("resp_id {resp_id} selected but missing from utterance store"))
    })?;
    debug!(%resp_id, "cold fallback selection");

    Ok(Response { mesh_id: None, resp_id, tokens: tokens.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn normalized(keywords: &[&str], stop_words: &[&str]) -> NormalizedText {
        NormalizedText {
            raw_tokens: keywords.iter().chain(stop_words).map(|w| w.to_string()).collect(),
            keywords: set(keywords),
            stop_words: set(stop_words),
        }
    }

    /// Scenario 3 (§8): a Link whose keywords overlap the query should
    /// surface its responses via primary retrieval.
    #[test]
    fn associative_retrieval_matches_on_shared_keyword() {
        let mut utterances = UtteranceStore::new();
        let a = utterances.intern(vec!["do".into(), "you".into(), "like".into(), "cats".into()]);
        let b = utterances.intern(vec!["yes".into(), "i".into(), "love".into(), "cats".into()]);
        let c = utterances.intern(vec!["cats".into(), "are".into(), "great".into()]);

        let mut mesh = Mesh::new();
        mesh.add_link(a, set(&["cat"]), HashSet::new());
        mesh.add_resp(a, b, None);
        mesh.add_resp(a, c, None);

        let config = ChatbotConfig::default();
        let ctx = Context::default();
        let query = normalized(&["cat", "adore"], &[]);
        let mut rng = StdRng::seed_from_u64(42);

        let response = respond(&utterances, &mesh, &config, &mut rng, &ctx, None, &query).unwrap();

        assert!(response.resp_id == b || response.resp_id == c);
        assert_eq!(response.mesh_id, Some(a));
    }

    /// Scenario 4 (§8): when the context's prior message matches a
    /// `resps` prior-set, the reply is conditioned deterministically onto
    /// that branch.
    #[test]
    fn prior_message_conditioning_picks_the_conditioned_branch() {
        let mut utterances = UtteranceStore::new();
        let a = utterances.intern(vec!["do".into(), "you".into(), "like".into(), "cats".into()]);
        let b = utterances.intern(vec!["yes".into(), "i".into(), "love".into(), "cats".into()]);
        let c = utterances.intern(vec!["cats".into(), "are".into(), "great".into()]);
        let x = utterances.intern(vec!["prior".into(), "message".into()]);

        let mut mesh = Mesh::new();
        mesh.add_link(a, set(&["cat"]), HashSet::new());
        mesh.add_resp(a, b, Some(x));
        mesh.add_resp(a, c, None);

        let config = ChatbotConfig::default();
        let ctx = Context { last_resp: None, last_msg: Some(x), last_timestamp: None };
        let query = normalized(&["cat", "adore"], &[]);
        let mut rng = StdRng::seed_from_u64(7);

        let response = respond(&utterances, &mesh, &config, &mut rng, &ctx, None, &query).unwrap();

        assert_eq!(response.resp_id, b);
        assert_eq!(response.mesh_id, Some(a));
    }

    /// Scenario 5 (§8): the bot's previous reply is always excluded from
    /// candidate sets.
    #[test]
    fn repetition_avoidance_excludes_last_resp() {
        let mut utterances = UtteranceStore::new();
        let a = utterances.intern(vec!["do".into(), "you".into(), "like".into(), "cats".into()]);
        let b = utterances.intern(vec!["yes".into(), "i".into(), "love".into(), "cats".into()]);
        let c = utterances.intern(vec!["cats".into(), "are".into(), "great".into()]);

        let mut mesh = Mesh::new();
        mesh.add_link(a, set(&["cat"]), HashSet::new());
        mesh.add_resp(a, b, None);
        mesh.add_resp(a, c, None);

        let config = ChatbotConfig::default();
        let ctx = Context { last_resp: Some(b), last_msg: None, last_timestamp: None };
        let query = normalized(&["cat", "adore"], &[]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let response = respond(&utterances, &mesh, &config, &mut rng, &ctx, None, &query).unwrap();
            assert_ne!(response.resp_id, b);
        }
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let utterances = UtteranceStore::new();
        let mesh = Mesh::new();
        let config = ChatbotConfig::default();
        let ctx = Context::default();
        let query = normalized(&[], &[]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = respond(&utterances, &mesh, &config, &mut rng, &ctx, None, &query).unwrap_err();
        assert!(matches!(err, ThomasError::EmptyCorpus));
    }

    /// When the ignore set would swallow the entire corpus, the cold
    /// fallback re-admits ignored ids rather than leaving zero candidates.
    #[test]
    fn cold_fallback_readmits_ignored_ids_when_they_are_the_whole_corpus() {
        let mut utterances = UtteranceStore::new();
        let only = utterances.intern(vec!["hello".into(), "there".into()]);

        let mesh = Mesh::new();
        let config = ChatbotConfig::default();
        let ctx = Context::default();
        let query = normalized(&[], &[]);
        let mut rng = StdRng::seed_from_u64(3);

        let response = respond(&utterances, &mesh, &config, &mut rng, &ctx, Some(only), &query).unwrap();
        assert_eq!(response.resp_id, only);
    }
}
