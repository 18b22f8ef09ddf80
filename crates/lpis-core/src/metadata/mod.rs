//! Citation metadata consistency checks.
//!
//! The repository carries the same facts (title, license, author
//! ORCID) in README.md, CITATION.cff, codemeta.json, .zenodo.json and
//! ro-crate-metadata.json. These drift independently; this module
//! cross-checks them and returns human-readable findings instead of
//! failing on the first mismatch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub const EXPECTED_TITLE: &str = "LivePublication Interface Schemas";
pub const EXPECTED_ORCID: &str = "0000-0001-8260-231X";
pub const EXPECTED_LICENSE: &str = "CC-BY-4.0";
pub const ROCRATE_CONFORMS_TO: &str = "https://w3id.org/ro/crate/1.1";

const REQUIRED_FILES: &[&str] = &[
    "LICENSE",
    "README.md",
    "CITATION.cff",
    "codemeta.json",
    ".zenodo.json",
    "ro-crate-metadata.json",
];

/// Runs all checks against the repository at `root`. An empty findings
/// list means the metadata is consistent.
pub fn validate(root: &Path) -> Result<Vec<String>> {
    let mut findings = Vec::new();

    for rel in REQUIRED_FILES {
        if !root.join(rel).exists() {
            findings.push(format!("missing {}", rel));
        }
    }
    if !findings.is_empty() {
        // Field checks need the files; report the missing ones and stop.
        return Ok(findings);
    }

    let readme_title = readme_title(&read(root, "README.md")?);
    let citation = CitationCff::parse(&read(root, "CITATION.cff")?);
    let codemeta: Value = load_json(root, "codemeta.json")?;
    let zenodo: Value = load_json(root, ".zenodo.json")?;
    let rocrate: Value = load_json(root, "ro-crate-metadata.json")?;

    if readme_title.is_none() {
        findings.push("README.md is missing a top-level title".to_string());
    }
    if citation.title.is_none() {
        findings.push("CITATION.cff missing title".to_string());
    }
    if citation.license.is_none() {
        findings.push("CITATION.cff missing license".to_string());
    }
    if citation.orcid.is_none() {
        findings.push("CITATION.cff missing ORCID".to_string());
    }

    for field in ["name", "description", "license", "codeRepository", "author"] {
        if codemeta.get(field).map_or(true, value_is_blank) {
            findings.push(format!("codemeta.json missing {}", field));
        }
    }
    for field in ["title", "description", "upload_type", "creators", "license"] {
        if zenodo.get(field).map_or(true, value_is_blank) {
            findings.push(format!(".zenodo.json missing {}", field));
        }
    }

    let graph = rocrate
        .get("@graph")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let root_dataset = find_entity(&graph, "./");
    let descriptor = find_entity(&graph, "ro-crate-metadata.json");

    if root_dataset.is_none() {
        findings.push("RO-Crate missing root dataset ./".to_string());
    }
    match descriptor {
        None => findings.push("RO-Crate missing metadata descriptor ro-crate-metadata.json".to_string()),
        Some(descriptor) => {
            let about_id = descriptor
                .get("about")
                .and_then(|a| a.get("@id"))
                .and_then(Value::as_str);
            if about_id != Some("./") {
                findings.push("RO-Crate metadata descriptor not about ./".to_string());
            }
            let conforms = listify(descriptor.get("conformsTo"));
            let has_11 = conforms
                .iter()
                .filter_map(|c| c.get("@id").and_then(Value::as_str))
                .any(|id| id == ROCRATE_CONFORMS_TO);
            if !has_11 {
                findings.push(
                    "RO-Crate metadata descriptor missing conformsTo RO-Crate 1.1".to_string(),
                );
            }
        }
    }

    let titles = [
        ("README", readme_title.clone()),
        ("CITATION", citation.title.clone()),
        ("CodeMeta", str_field(&codemeta, "name")),
        ("Zenodo", str_field(&zenodo, "title")),
        (
            "RO-Crate",
            root_dataset.and_then(|d| str_field(d, "name")),
        ),
    ];
    for (source, value) in &titles {
        if value.as_deref() != Some(EXPECTED_TITLE) {
            findings.push(format!("{} title mismatch: {:?}", source, value));
        }
    }

    let licenses = [
        ("CITATION", citation.license.clone()),
        ("CodeMeta", str_field(&codemeta, "license")),
        ("Zenodo", str_field(&zenodo, "license")),
        (
            "RO-Crate",
            root_dataset.and_then(|d| str_field(d, "license")),
        ),
    ];
    for (source, value) in &licenses {
        let normalized = value.as_deref().map(normalize_license);
        if normalized.as_deref() != Some(EXPECTED_LICENSE) {
            findings.push(format!("{} license mismatch: {:?}", source, value));
        }
    }

    let orcids = [
        ("CITATION", citation.orcid.clone()),
        ("CodeMeta", first_author_orcid(&codemeta, "author")),
        ("Zenodo", zenodo_orcid(&zenodo)),
        ("RO-Crate", rocrate_orcid(&graph, root_dataset)),
    ];
    for (source, value) in &orcids {
        let normalized = value.as_deref().and_then(extract_orcid_id);
        if normalized.as_deref() != Some(EXPECTED_ORCID) {
            findings.push(format!("{} ORCID mismatch: {:?}", source, value));
        }
    }

    Ok(findings)
}

fn read(root: &Path, rel: &str) -> Result<String> {
    fs::read_to_string(root.join(rel)).with_context(|| format!("read {}", rel))
}

fn load_json(root: &Path, rel: &str) -> Result<Value> {
    let data = read(root, rel)?;
    serde_json::from_str(&data).with_context(|| format!("parse {}", rel))
}

fn value_is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn str_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

fn listify(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// First `# `-prefixed line of the README.
fn readme_title(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix("# ").map(|t| t.trim().to_string()))
}

/// Accepts URL and spelled forms of CC-BY-4.0; everything else passes
/// through for the mismatch message.
fn normalize_license(value: &str) -> String {
    if value.contains("creativecommons.org/licenses/by/4.0") {
        return EXPECTED_LICENSE.to_string();
    }
    let cleaned: String = value
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    if cleaned == "CCBY40" || cleaned == "CCBY4.0" {
        return EXPECTED_LICENSE.to_string();
    }
    value.trim().to_string()
}

/// Pulls a bare `dddd-dddd-dddd-dddX` ORCID out of a value that may be
/// a URL form like `https://orcid.org/0000-...`.
fn extract_orcid_id(value: &str) -> Option<String> {
    // 19 chars: 4+1+4+1+4+1+4.
    if value.is_ascii() && value.len() >= 19 {
        for start in 0..=value.len() - 19 {
            let window = &value[start..start + 19];
            if is_orcid_shape(window) {
                return Some(window.to_string());
            }
        }
    }
    Some(value.trim().to_string())
}

fn is_orcid_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return false;
    }
    for (i, b) in bytes.iter().enumerate() {
        match i {
            4 | 9 | 14 => {
                if *b != b'-' {
                    return false;
                }
            }
            18 => {
                if !b.is_ascii_digit() && *b != b'X' {
                    return false;
                }
            }
            _ => {
                if !b.is_ascii_digit() {
                    return false;
                }
            }
        }
    }
    true
}

/// ORCID from an entity: prefer an explicit `orcid` field, fall back
/// to `@id` (RO-Crate person entities use the orcid.org URL as id).
fn entity_orcid(entity: &Value) -> Option<String> {
    str_field(entity, "orcid").or_else(|| str_field(entity, "@id"))
}

fn first_author_orcid(doc: &Value, field: &str) -> Option<String> {
    listify(doc.get(field)).iter().find_map(entity_orcid)
}

fn zenodo_orcid(zenodo: &Value) -> Option<String> {
    listify(zenodo.get("creators"))
        .iter()
        .find_map(|c| str_field(c, "orcid"))
}

fn rocrate_orcid(graph: &[Value], root_dataset: Option<&Value>) -> Option<String> {
    let authors = listify(root_dataset?.get("author"));
    // Inline orcid on the author reference, then the referenced entity.
    if let Some(orcid) = authors.iter().find_map(entity_orcid) {
        if extract_orcid_id(&orcid).map_or(false, |id| is_orcid_shape(&id)) {
            return Some(orcid);
        }
        // An @id that is not an ORCID may still point at a person
        // entity carrying one.
        if let Some(entity) = find_entity(graph, &orcid) {
            if let Some(found) = entity_orcid(entity) {
                return Some(found);
            }
        }
        return Some(orcid);
    }
    None
}

fn find_entity<'a>(graph: &'a [Value], id: &str) -> Option<&'a Value> {
    graph
        .iter()
        .find(|e| e.get("@id").and_then(Value::as_str) == Some(id))
}

/// Line-based CITATION.cff field extraction; the file is YAML but the
/// checked fields are single-line scalars.
struct CitationCff {
    title: Option<String>,
    license: Option<String>,
    orcid: Option<String>,
}

impl CitationCff {
    fn parse(text: &str) -> Self {
        let mut title = None;
        let mut license = None;
        let mut orcid = None;
        for line in text.lines() {
            let trimmed = line.trim();
            if let Some(value) = scalar_after(trimmed, "title:") {
                title.get_or_insert(value);
            } else if let Some(value) = scalar_after(trimmed, "license:") {
                license.get_or_insert(value);
            } else if let Some(value) = scalar_after(trimmed.trim_start_matches("- "), "orcid:") {
                orcid.get_or_insert(value);
            }
        }
        Self {
            title,
            license,
            orcid,
        }
    }
}

fn scalar_after(line: &str, key: &str) -> Option<String> {
    let rest = line.strip_prefix(key)?.trim();
    let unquoted = rest.trim_matches('"').trim();
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}
