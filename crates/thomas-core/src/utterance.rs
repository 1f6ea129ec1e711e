use std::collections::BTreeMap;

use uuid::Uuid;

/// Opaque id for a stored utterance. Identical in value to the mesh-id of
/// the Link derived from it, when that Link exists (§3).
pub type UtteranceId = Uuid;

/// The utterance store (§4.B): maps an id to its ordered raw token list,
/// with reverse lookup by token list. `BTreeMap` keeps iteration in
/// time-order since ids are v7 UUIDs, which is convenient for reproducible
/// tests and costs nothing the spec forbids (iteration order over the
/// store itself is never prescribed).
#[derive(Debug, Default, Clone)]
pub struct UtteranceStore {
    entries: BTreeMap<UtteranceId, Vec<String>>,
}

impl UtteranceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `tokens`, returning the id of an existing element-wise-equal
    /// utterance or allocating a new one (§3 invariant 4: no utterance
    /// appears twice).
    pub fn intern(&mut self, tokens: Vec<String>) -> UtteranceId {
        if let Some(id) = self.lookup_by_tokens(&tokens) {
            return id;
        }
        let id = Uuid::now_v7();
        self.entries.insert(id, tokens);
        id
    }

    pub fn get_tokens(&self, id: UtteranceId) -> Option<&[String]> {
        self.entries.get(&id).map(Vec::as_slice)
    }

    /// O(N) linear search, acceptable per §4.B.
    pub fn lookup_by_tokens(&self, tokens: &[String]) -> Option<UtteranceId> {
        self.entries
            .iter()
            .find(|(_, stored)| stored.as_slice() == tokens)
            .map(|(id, _)| *id)
    }

    pub fn contains(&self, id: UtteranceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = UtteranceId> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn entries(&self) -> &BTreeMap<UtteranceId, Vec<String>> {
        &self.entries
    }

    pub(crate) fn from_entries(entries: BTreeMap<UtteranceId, Vec<String>>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut store = UtteranceStore::new();
        let a = store.intern(vec!["hello".into(), "there".into()]);
        let b = store.intern(vec!["hello".into(), "there".into()]);
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn intern_distinguishes_different_token_lists() {
        let mut store = UtteranceStore::new();
        let a = store.intern(vec!["hi".into()]);
        let b = store.intern(vec!["hi".into(), "there".into()]);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lookup_by_tokens_finds_interned() {
        let mut store = UtteranceStore::new();
        let id = store.intern(vec!["hello".into()]);
        assert_eq!(store.lookup_by_tokens(&["hello".to_string()]), Some(id));
        assert_eq!(store.lookup_by_tokens(&["bye".to_string()]), None);
    }
}
