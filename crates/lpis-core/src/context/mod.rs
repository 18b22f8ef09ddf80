//! Profile context builder.
//!
//! The combined `lp-dscdpc` profile context is generated by merging the
//! DPC and DSC module context dictionaries together with the shared
//! PROV term block. Generation is deterministic (sorted keys) so the
//! committed file can be byte-compared against a regeneration, and a
//! term defined differently by two sources is a hard error rather than
//! a silent last-writer-wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has no @context object")]
    MissingContext { path: PathBuf },
    #[error("term {term:?} defined by two sources with different values: {first} vs {second}")]
    Conflict {
        term: String,
        first: Value,
        second: Value,
    },
    #[error("committed profile context {path} is out of date; regenerate it")]
    Drift { path: PathBuf },
}

/// PROV-O terms shared by both module vocabularies. These are merged
/// into every profile context; a module may repeat one of them, but
/// only with an identical definition.
fn prov_terms() -> Map<String, Value> {
    let block = json!({
        "xsd": "http://www.w3.org/2001/XMLSchema#",
        "prov": "http://www.w3.org/ns/prov#",
        "used": { "@id": "prov:used", "@type": "@id" },
        "generated": { "@id": "prov:generated", "@type": "@id" },
        "startedAtTime": { "@id": "prov:startedAtTime", "@type": "xsd:dateTime" },
        "endedAtTime": { "@id": "prov:endedAtTime", "@type": "xsd:dateTime" },
    });
    match block {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Reads a module context file and returns its `@context` dictionary.
fn read_module_context(path: &Path) -> Result<Map<String, Value>, MergeError> {
    let data = fs::read_to_string(path).map_err(|source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&data).map_err(|source| MergeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match doc.get("@context") {
        Some(Value::Object(ctx)) => Ok(ctx.clone()),
        _ => Err(MergeError::MissingContext {
            path: path.to_path_buf(),
        }),
    }
}

fn merge_terms(
    merged: &mut BTreeMap<String, Value>,
    terms: Map<String, Value>,
) -> Result<(), MergeError> {
    for (term, definition) in terms {
        match merged.get(&term) {
            None => {
                merged.insert(term, definition);
            }
            Some(existing) if *existing == definition => {}
            Some(existing) => {
                return Err(MergeError::Conflict {
                    term,
                    first: existing.clone(),
                    second: definition,
                });
            }
        }
    }
    Ok(())
}

/// Merges the module context files and the shared PROV block into the
/// profile context document. A term defined twice is fine when the
/// definitions agree; any disagreement is a [`MergeError::Conflict`].
pub fn build_profile_context(module_paths: &[PathBuf]) -> Result<String, MergeError> {
    let mut merged = BTreeMap::new();

    for path in module_paths {
        merge_terms(&mut merged, read_module_context(path)?)?;
    }
    merge_terms(&mut merged, prov_terms())?;

    // BTreeMap keys are already sorted, which makes the output stable.
    let doc = json!({ "@context": merged });
    let mut out = serde_json::to_string_pretty(&doc).expect("profile context serializes");
    out.push('\n');
    Ok(out)
}

/// Regenerates the profile context and compares it with the committed
/// file. Nothing is written; a mismatch is [`MergeError::Drift`].
pub fn check_profile_context(
    module_paths: &[PathBuf],
    committed: &Path,
) -> Result<(), MergeError> {
    let generated = build_profile_context(module_paths)?;
    let on_disk = fs::read_to_string(committed).map_err(|source| MergeError::Io {
        path: committed.to_path_buf(),
        source,
    })?;
    if on_disk != generated {
        return Err(MergeError::Drift {
            path: committed.to_path_buf(),
        });
    }
    Ok(())
}

/// Regenerates the profile context and writes it to `committed`.
pub fn write_profile_context(
    module_paths: &[PathBuf],
    committed: &Path,
) -> Result<(), MergeError> {
    let generated = build_profile_context(module_paths)?;
    if let Some(parent) = committed.parent() {
        fs::create_dir_all(parent).map_err(|source| MergeError::Io {
            path: committed.to_path_buf(),
            source,
        })?;
    }
    fs::write(committed, generated).map_err(|source| MergeError::Io {
        path: committed.to_path_buf(),
        source,
    })?;
    tracing::info!("wrote profile context to {}", committed.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_module(dir: &Path, name: &str, ctx: Value) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(&json!({ "@context": ctx })).unwrap()).unwrap();
        path
    }

    #[test]
    fn merge_unions_module_terms() {
        let dir = tempdir().unwrap();
        let dpc = write_module(
            dir.path(),
            "dpc.jsonld",
            json!({
                "dpc": "https://livepublication.org/interface-schemas/dpc#",
                "HardwareRuntime": "dpc:HardwareRuntime"
            }),
        );
        let dsc = write_module(
            dir.path(),
            "dsc.jsonld",
            json!({
                "dsc": "https://livepublication.org/interface-schemas/dsc#",
                "DistributedStep": "dsc:DistributedStep"
            }),
        );

        let out = build_profile_context(&[dpc, dsc]).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        let ctx = &doc["@context"];
        assert_eq!(
            ctx["dpc"],
            json!("https://livepublication.org/interface-schemas/dpc#")
        );
        assert_eq!(ctx["HardwareRuntime"], json!("dpc:HardwareRuntime"));
        assert_eq!(ctx["DistributedStep"], json!("dsc:DistributedStep"));
    }

    #[test]
    fn prov_terms_are_part_of_every_profile_context() {
        let dir = tempdir().unwrap();
        let dpc = write_module(
            dir.path(),
            "dpc.jsonld",
            json!({"HardwareRuntime": "dpc:HardwareRuntime"}),
        );

        let out = build_profile_context(&[dpc]).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        let ctx = &doc["@context"];
        assert_eq!(ctx["prov"], json!("http://www.w3.org/ns/prov#"));
        assert_eq!(ctx["used"], json!({"@id": "prov:used", "@type": "@id"}));
        assert_eq!(
            ctx["startedAtTime"],
            json!({"@id": "prov:startedAtTime", "@type": "xsd:dateTime"})
        );
        assert_eq!(
            ctx["endedAtTime"],
            json!({"@id": "prov:endedAtTime", "@type": "xsd:dateTime"})
        );
    }

    #[test]
    fn module_may_repeat_a_prov_term_with_the_same_definition() {
        let dir = tempdir().unwrap();
        let a = write_module(
            dir.path(),
            "a.jsonld",
            json!({"xsd": "http://www.w3.org/2001/XMLSchema#"}),
        );
        assert!(build_profile_context(&[a]).is_ok());
    }

    #[test]
    fn module_conflicting_with_a_prov_term_is_an_error() {
        let dir = tempdir().unwrap();
        let a = write_module(
            dir.path(),
            "a.jsonld",
            json!({"used": "dpc:used"}),
        );
        let err = build_profile_context(&[a]).unwrap_err();
        match err {
            MergeError::Conflict { term, .. } => assert_eq!(term, "used"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn identical_term_in_both_modules_is_fine() {
        let dir = tempdir().unwrap();
        let a = write_module(dir.path(), "a.jsonld", json!({"value": {"@id": "value", "@type": "@id"}}));
        let b = write_module(dir.path(), "b.jsonld", json!({"value": {"@id": "value", "@type": "@id"}}));
        assert!(build_profile_context(&[a, b]).is_ok());
    }

    #[test]
    fn conflicting_term_definitions_are_an_error() {
        let dir = tempdir().unwrap();
        let a = write_module(dir.path(), "a.jsonld", json!({"value": "dpc:value"}));
        let b = write_module(dir.path(), "b.jsonld", json!({"value": "dsc:value"}));
        let err = build_profile_context(&[a, b]).unwrap_err();
        match err {
            MergeError::Conflict { term, .. } => assert_eq!(term, "value"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn output_is_deterministic() {
        let dir = tempdir().unwrap();
        let a = write_module(dir.path(), "a.jsonld", json!({"zeta": "dpc:zeta", "alpha": "dpc:alpha"}));
        let first = build_profile_context(&[a.clone()]).unwrap();
        let second = build_profile_context(&[a]).unwrap();
        assert_eq!(first, second);
        // Sorted keys: alpha before zeta in the serialized form.
        assert!(first.find("alpha").unwrap() < first.find("zeta").unwrap());
    }

    #[test]
    fn check_detects_drift_and_accepts_current_file() {
        let dir = tempdir().unwrap();
        let a = write_module(dir.path(), "a.jsonld", json!({"name": "https://schema.org/name"}));
        let committed = dir.path().join("v1.jsonld");

        write_profile_context(&[a.clone()], &committed).unwrap();
        check_profile_context(&[a.clone()], &committed).unwrap();

        fs::write(&committed, "{\"@context\": {}}\n").unwrap();
        assert!(matches!(
            check_profile_context(&[a], &committed),
            Err(MergeError::Drift { .. })
        ));
    }

    #[test]
    fn missing_context_object_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jsonld");
        fs::write(&path, "{\"not-a-context\": true}").unwrap();
        assert!(matches!(
            build_profile_context(&[path]),
            Err(MergeError::MissingContext { .. })
        ));
    }
}
