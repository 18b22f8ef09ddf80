//! N-Quads audit.
//!
//! Line-oriented scan over an N-Quads serialization produced by an
//! external JSON-LD-to-RDF pipeline. Checks "how the semantic web sees
//! us": which predicates and classes come out, which of our own
//! vocabulary terms are used, and whether any of the known drift
//! classes appear (legacy `http://schema.org/` IRIs, `schema:File`
//! used as a class, named graphs).

mod quads;
mod report;

pub use quads::{parse_line, Quad, Term};
pub use report::AuditReport;

use crate::gateway::CANONICAL_BASE;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const LEGACY_SCHEMA: &str = "http://schema.org/";

/// Scans N-Quads text and accumulates the audit report.
///
/// Lines that are blank, comments, or not parseable as a quad are
/// skipped; the audit reports on what the serializer actually emitted,
/// it does not validate N-Quads syntax.
pub fn scan(nquads: &str) -> AuditReport {
    let mut report = AuditReport::default();

    for (lineno, line) in nquads.lines().enumerate() {
        let quad = match parse_line(line) {
            Some(q) => q,
            None => continue,
        };

        report.triple_count += 1;

        if quad.graph.is_some() {
            // Everything must live in the default graph.
            report.named_graph_lines.push(lineno + 1);
        }

        let pred = quad.predicate.clone();
        *report.predicates.entry(pred.clone()).or_insert(0) += 1;

        if pred == RDF_TYPE {
            if let Term::Iri(class_iri) = &quad.object {
                *report.classes.entry(class_iri.clone()).or_insert(0) += 1;
                let trimmed = class_iri.trim_end_matches('/');
                if trimmed == "http://schema.org/File" || trimmed == "https://schema.org/File" {
                    report.file_class_uses += 1;
                }
            }
        }

        for iri in quad.iris() {
            if iri.starts_with(CANONICAL_BASE) {
                report.vocab_terms.insert(iri.to_string());
            }
            if iri.starts_with(LEGACY_SCHEMA) {
                report.legacy_schema_terms.insert(iri.to_string());
            }
        }
    }

    report
}
