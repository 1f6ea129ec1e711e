use std::collections::{BTreeMap, HashSet};

use crate::utterance::UtteranceId;

/// A mesh-id is the utterance-id of the utterance a [`Link`] was derived
/// from (§3): the two types are the same value space.
pub type MeshId = UtteranceId;

/// One per known utterance that has ever been followed by at least one
/// reply (§3).
#[derive(Debug, Clone, Default)]
pub struct Link {
    pub keywords: HashSet<String>,
    pub stop_words: HashSet<String>,
    /// next-utterance-id -> set of prior-utterance-ids.
    pub resps: BTreeMap<UtteranceId, HashSet<UtteranceId>>,
}

impl Link {
    pub fn new(keywords: HashSet<String>, stop_words: HashSet<String>) -> Self {
        Self {
            keywords,
            stop_words,
            resps: BTreeMap::new(),
        }
    }
}

/// The association graph (§4.C). Links are addressed by their mesh-id.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    links: BTreeMap<MeshId, Link>,
}

/// One surviving row from [`Mesh::scan`]: the link's id, the link itself,
/// the subset of its `resps` keys not in the caller's ignore set, and the
/// score the scoring function assigned it.
pub type ScanHit<'a> = (MeshId, &'a Link, HashSet<UtteranceId>, f64);

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_link(&self, id: MeshId) -> bool {
        self.links.contains_key(&id)
    }

    pub fn has_resp(&self, id: MeshId, resp_id: UtteranceId) -> bool {
        self.links
            .get(&id)
            .map(|link| link.resps.contains_key(&resp_id))
            .unwrap_or(false)
    }

    pub fn get_link(&self, id: MeshId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Creates an empty-`resps` Link. Caller must have already checked
    /// `has_link` — idempotent-safe only when no Link exists yet (§4.C).
    pub fn add_link(&mut self, id: MeshId, keywords: HashSet<String>, stop_words: HashSet<String>) {
        self.links.insert(id, Link::new(keywords, stop_words));
    }

    /// Ensures `resp_id` is a key of `resps[id]`, inserting `prev_id` into
    /// its prior-set when supplied.
    pub fn add_resp(&mut self, id: MeshId, resp_id: UtteranceId, prev_id: Option<UtteranceId>) {
        let link = self.links.entry(id).or_default();
        let priors = link.resps.entry(resp_id).or_default();
        if let Some(prev_id) = prev_id {
            priors.insert(prev_id);
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = MeshId> + '_ {
        self.links.keys().copied()
    }

    /// Scans every Link, scoring it with `score_fn`, skipping Links whose
    /// score is below `min_score` or whose `resps` keys are entirely in
    /// `ignore`. Results are materialized eagerly (§4.C: "results are
    /// materialized into a list before ranking").
    pub fn scan<F>(&self, score_fn: F, min_score: f64, ignore: &HashSet<UtteranceId>) -> Vec<ScanHit<'_>>
    where
        F: Fn(&Link) -> f64,
    {
        let mut hits = Vec::new();
        for (id, link) in &self.links {
            let score = score_fn(link);
            if score < min_score {
                continue;
            }
            let resps_left: HashSet<UtteranceId> = link
                .resps
                .keys()
                .copied()
                .filter(|resp_id| !ignore.contains(resp_id))
                .collect();
            if resps_left.is_empty() {
                continue;
            }
            hits.push((*id, link, resps_left, score));
        }
        hits
    }

    pub(crate) fn links(&self) -> &BTreeMap<MeshId, Link> {
        &self.links
    }

    pub(crate) fn from_links(links: BTreeMap<MeshId, Link>) -> Self {
        Self { links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn add_resp_creates_link_and_accumulates_priors() {
        let mut mesh = Mesh::new();
        let id = MeshId::now_v7();
        let resp = UtteranceId::now_v7();
        let prior_a = UtteranceId::now_v7();
        let prior_b = UtteranceId::now_v7();

        mesh.add_link(id, kw(&["hi"]), HashSet::new());
        mesh.add_resp(id, resp, Some(prior_a));
        mesh.add_resp(id, resp, Some(prior_b));

        let link = mesh.get_link(id).unwrap();
        assert_eq!(link.resps.get(&resp).unwrap().len(), 2);
    }

    #[test]
    fn add_resp_with_no_prior_leaves_empty_set() {
        let mut mesh = Mesh::new();
        let id = MeshId::now_v7();
        let resp = UtteranceId::now_v7();
        mesh.add_link(id, HashSet::new(), HashSet::new());
        mesh.add_resp(id, resp, None);
        assert!(mesh.get_link(id).unwrap().resps.get(&resp).unwrap().is_empty());
    }

    #[test]
    fn scan_skips_links_whose_resps_are_fully_ignored() {
        let mut mesh = Mesh::new();
        let id = MeshId::now_v7();
        let resp = UtteranceId::now_v7();
        mesh.add_link(id, kw(&["cat"]), HashSet::new());
        mesh.add_resp(id, resp, None);

        let mut ignore = HashSet::new();
        ignore.insert(resp);

        let hits = mesh.scan(|_| 1.0, 0.0, &ignore);
        assert!(hits.is_empty());
    }
}
