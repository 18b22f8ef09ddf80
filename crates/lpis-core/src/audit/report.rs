//! Audit report accumulation and rendering.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Accumulated results of an N-Quads scan.
#[derive(Debug, Default, Clone)]
pub struct AuditReport {
    /// Triples successfully parsed.
    pub triple_count: u64,
    /// Predicate IRI -> use count.
    pub predicates: BTreeMap<String, u64>,
    /// Class IRI (rdf:type object) -> use count.
    pub classes: BTreeMap<String, u64>,
    /// IRIs under the canonical vocabulary base observed anywhere.
    pub vocab_terms: BTreeSet<String>,
    /// `http://schema.org/` IRIs observed anywhere (should be empty;
    /// the profile pins the HTTPS namespace).
    pub legacy_schema_terms: BTreeSet<String>,
    /// Number of rdf:type uses of `schema:File` (should be zero; files
    /// map to `MediaObject`).
    pub file_class_uses: u64,
    /// 1-based line numbers of quads carrying a graph label.
    pub named_graph_lines: Vec<usize>,
}

impl AuditReport {
    /// True if none of the drift classes fired.
    pub fn is_clean(&self) -> bool {
        self.violations().is_empty()
    }

    /// Human-readable descriptions of every violation found.
    pub fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.legacy_schema_terms.is_empty() {
            out.push(format!(
                "legacy http://schema.org/ terms observed: {}",
                self.legacy_schema_terms
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if self.file_class_uses > 0 {
            out.push(format!(
                "schema:File used as a class {} time(s); files must map to MediaObject",
                self.file_class_uses
            ));
        }
        if !self.named_graph_lines.is_empty() {
            out.push(format!(
                "named graph labels on line(s) {}; all output must be in the default graph",
                self.named_graph_lines
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        out
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} triple(s) scanned", self.triple_count)?;

        writeln!(f, "\npredicates:")?;
        for (iri, count) in &self.predicates {
            writeln!(f, "  {}  ({} use(s))", iri, count)?;
        }

        writeln!(f, "\nclasses:")?;
        if self.classes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (iri, count) in &self.classes {
            writeln!(f, "  {}  ({} use(s))", iri, count)?;
        }

        writeln!(f, "\nvocabulary terms:")?;
        if self.vocab_terms.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for iri in &self.vocab_terms {
            writeln!(f, "  {}", iri)?;
        }

        let violations = self.violations();
        if violations.is_empty() {
            writeln!(f, "\nno violations")?;
        } else {
            writeln!(f, "\nviolations:")?;
            for v in &violations {
                writeln!(f, "  {}", v)?;
            }
        }
        Ok(())
    }
}
