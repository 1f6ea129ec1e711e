use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ThomasError};
use crate::mesh::{Link, Mesh, MeshId};
use crate::utterance::{UtteranceId, UtteranceStore};

const UTTERANCES_FILE: &str = "resps.json";
const MESH_FILE: &str = "mesh.json";

/// On-disk shape of the utterance store: id string -> ordered raw tokens,
/// matching the JSON encoding §4.D recommends.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UtteranceFile(BTreeMap<String, Vec<String>>);

/// On-disk shape of one Link: sets serialized as arrays, `resps` as an
/// object whose values are prior-id arrays (§4.D).
#[derive(Debug, Default, Serialize, Deserialize)]
struct LinkFile {
    keywords: Vec<String>,
    stop_words: Vec<String>,
    resps: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MeshFile(BTreeMap<String, LinkFile>);

fn utterances_path(storage_path: &Path) -> PathBuf {
    storage_path.join(UTTERANCES_FILE)
}

fn mesh_path(storage_path: &Path) -> PathBuf {
    storage_path.join(MESH_FILE)
}

fn read_json<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw)
            .map_err(|e| ThomasError::persistence(format!("parsing {}", path.display()), e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(ThomasError::persistence(format!("reading {}", path.display()), e)),
    }
}

/// Serializes to a temp file in the same directory, then renames over the
/// target — the write is atomic from a reader's point of view.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ThomasError::persistence(format!("creating directory {}", parent.display()), e)
        })?;
    }
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ThomasError::persistence(format!("serializing {}", path.display()), e))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, rendered)
        .map_err(|e| ThomasError::persistence(format!("writing {}", tmp_path.display()), e))?;
    fs::rename(&tmp_path, path)
        .map_err(|e| ThomasError::persistence(format!("renaming {} into place", path.display()), e))?;
    Ok(())
}

pub(crate) fn load_utterances(storage_path: &Path) -> Result<UtteranceStore> {
    let path = utterances_path(storage_path);
    let file: UtteranceFile = read_json(&path)?;
    let mut entries = BTreeMap::new();
    for (id, tokens) in file.0 {
        let id: UtteranceId = id
            .parse()
            .map_err(|_| ThomasError::InvariantViolation(format!("malformed utterance id {id:?}")))?;
        entries.insert(id, tokens);
    }
    info!(path = %path.display(), count = entries.len(), "loaded utterance store");
    Ok(UtteranceStore::from_entries(entries))
}

pub(crate) fn save_utterances(storage_path: &Path, store: &UtteranceStore) -> Result<()> {
    let path = utterances_path(storage_path);
    let file = UtteranceFile(
        store
            .entries()
            .iter()
            .map(|(id, tokens)| (id.to_string(), tokens.clone()))
            .collect(),
    );
    write_json_atomic(&path, &file)?;
    info!(path = %path.display(), count = file.0.len(), "saved utterance store");
    Ok(())
}

pub(crate) fn load_mesh(storage_path: &Path) -> Result<Mesh> {
    let path = mesh_path(storage_path);
    let file: MeshFile = read_json(&path)?;
    let mut links = BTreeMap::new();
    for (id, link_file) in file.0 {
        let id: MeshId = id
            .parse()
            .map_err(|_| ThomasError::InvariantViolation(format!("malformed mesh id {id:?}")))?;
        let mut resps = BTreeMap::new();
        for (resp_id, priors) in link_file.resps {
            let resp_id: UtteranceId = resp_id
                .parse()
                .map_err(|_| ThomasError::InvariantViolation(format!("malformed resp id {resp_id:?}")))?;
            let priors: HashSet<UtteranceId> = priors
                .into_iter()
                .map(|p| {
                    p.parse()
                        .map_err(|_| ThomasError::InvariantViolation(format!("malformed prior id {p:?}")))
                })
                .collect::<Result<_>>()?;
            resps.insert(resp_id, priors);
        }
        links.insert(
            id,
            Link {
                keywords: link_file.keywords.into_iter().collect(),
                stop_words: link_file.stop_words.into_iter().collect(),
                resps,
            },
        );
    }
    info!(path = %path.display(), count = links.len(), "loaded mesh");
    Ok(Mesh::from_links(links))
}

pub(crate) fn save_mesh(storage_path: &Path, mesh: &Mesh) -> Result<()> {
    let path = mesh_path(storage_path);
    let file = MeshFile(
        mesh.links()
            .iter()
            .map(|(id, link)| {
                (
                    id.to_string(),
                    LinkFile {
                        keywords: link.keywords.iter().cloned().collect(),
                        stop_words: link.stop_words.iter().cloned().collect(),
                        resps: link
                            .resps
                            .iter()
                            .map(|(resp_id, priors)| {
                                (resp_id.to_string(), priors.iter().map(ToString::to_string).collect())
                            })
                            .collect(),
                    },
                )
            })
            .collect(),
    );
    write_json_atomic(&path, &file)?;
    info!(path = %path.display(), count = file.0.len(), "saved mesh");
    Ok(())
}

/// Checks invariants 1-3 from §3 after a load: every resp-id and prior-id
/// in the mesh must refer to a valid utterance, and every mesh-id must
/// itself be a valid utterance-id. Corruption here is fatal (§7).
pub(crate) fn validate_invariants(utterances: &UtteranceStore, mesh: &Mesh) -> Result<()> {
    for (mesh_id, link) in mesh.links() {
        if !utterances.contains(*mesh_id) {
            warn!(%mesh_id, "mesh id has no corresponding utterance");
            return Err(ThomasError::InvariantViolation(format!(
                "mesh id {mesh_id} has no corresponding utterance"
            )));
        }
        for (resp_id, priors) in &link.resps {
            if !utterances.contains(*resp_id) {
                warn!(%mesh_id, %resp_id, "resp id has no corresponding utterance");
                return Err(ThomasError::InvariantViolation(format!(
                    "resp id {resp_id} in mesh {mesh_id} has no corresponding utterance"
                )));
            }
            for prior_id in priors {
                if !utterances.contains(*prior_id) {
                    warn!(%mesh_id, %resp_id, %prior_id, "prior id has no corresponding utterance");
                    return Err(ThomasError::InvariantViolation(format!(
                        "prior id {prior_id} in mesh {mesh_id} resp {resp_id} has no corresponding utterance"
                    )));
                }
            }
        }
    }
    Ok(())
}
