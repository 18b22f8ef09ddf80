//! Minimal N-Quads line tokenizer.
//!
//! Splits a line into subject, predicate, object, and optional graph
//! label. Enough for audit purposes: IRIs in angle brackets, blank
//! node labels, and literals with optional datatype or language tag.
//! Not a validating parser.

/// One RDF term as it appears on an N-Quads line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    /// Lexical form only; datatype and language tag are kept raw in
    /// `suffix` (e.g. `^^<http://...#double>` or `@en`).
    Literal { value: String, suffix: String },
}

impl Term {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

/// A parsed quad; `graph` is `None` for default-graph triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
    pub graph: Option<Term>,
}

impl Quad {
    /// All IRIs mentioned by this quad, in subject/predicate/object/graph order.
    pub fn iris(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(4);
        if let Some(iri) = self.subject.as_iri() {
            out.push(iri);
        }
        out.push(self.predicate.as_str());
        if let Some(iri) = self.object.as_iri() {
            out.push(iri);
        }
        if let Some(graph) = &self.graph {
            if let Some(iri) = graph.as_iri() {
                out.push(iri);
            }
        }
        out
    }
}

/// Parses one line into a [`Quad`]. Returns `None` for blank lines,
/// comments, and anything that does not tokenize into 3 or 4 terms
/// followed by the closing dot.
pub fn parse_line(line: &str) -> Option<Quad> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut terms = Vec::new();
    let mut rest = line;
    while let Some((term, remainder)) = next_term(rest) {
        terms.push(term);
        rest = remainder.trim_start();
        if rest == "." {
            break;
        }
        if terms.len() > 4 {
            return None;
        }
    }
    if rest != "." {
        return None;
    }

    let (subject, predicate, object, graph) = match terms.len() {
        3 => {
            let mut it = terms.into_iter();
            (it.next()?, it.next()?, it.next()?, None)
        }
        4 => {
            let mut it = terms.into_iter();
            (it.next()?, it.next()?, it.next()?, it.next())
        }
        _ => return None,
    };

    let predicate = match predicate {
        Term::Iri(iri) => iri,
        _ => return None,
    };

    Some(Quad {
        subject,
        predicate,
        object,
        graph,
    })
}

/// Cuts the next term off the front of `rest`.
fn next_term(rest: &str) -> Option<(Term, &str)> {
    let rest = rest.trim_start();
    match rest.chars().next()? {
        '<' => {
            let end = rest.find('>')?;
            Some((Term::Iri(rest[1..end].to_string()), &rest[end + 1..]))
        }
        '_' => {
            let end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            Some((Term::BlankNode(rest[..end].to_string()), &rest[end..]))
        }
        '"' => {
            // Scan to the closing unescaped quote.
            let mut escaped = false;
            let mut close = None;
            for (i, c) in rest.char_indices().skip(1) {
                if escaped {
                    escaped = false;
                    continue;
                }
                match c {
                    '\\' => escaped = true,
                    '"' => {
                        close = Some(i);
                        break;
                    }
                    _ => {}
                }
            }
            let close = close?;
            let value = rest[1..close].to_string();
            let after = &rest[close + 1..];
            // Datatype or language tag sticks to the literal without whitespace.
            let suffix_end = after
                .find(|c: char| c.is_whitespace())
                .unwrap_or(after.len());
            let suffix = after[..suffix_end].to_string();
            Some((Term::Literal { value, suffix }, &after[suffix_end..]))
        }
        _ => None,
    }
}
