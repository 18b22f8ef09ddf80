//! Shared fixtures for integration tests: a vocabulary tree on disk
//! plus a raw HTTP client for asserting on response headers.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;

/// Writes a minimal interface-schemas tree (module contexts, merged
/// profile, Turtle files, vendor copies, index pages) under `root`.
pub fn write_vocabulary_tree(root: &Path) {
    let schemas = root.join("interface-schemas");

    let files: &[(&str, &str)] = &[
        (
            "dpc/contexts/v1.jsonld",
            r#"{"@context": {"dpc": "https://livepublication.org/interface-schemas/dpc#", "HardwareRuntime": "dpc:HardwareRuntime"}}"#,
        ),
        (
            "dsc/contexts/v1.jsonld",
            r#"{"@context": {"dsc": "https://livepublication.org/interface-schemas/dsc#", "DistributedStep": "dsc:DistributedStep"}}"#,
        ),
        (
            "contexts/lp-dscdpc/v1.jsonld",
            r#"{"@context": {"@vocab": "https://schema.org/", "dpc": "https://livepublication.org/interface-schemas/dpc#", "dsc": "https://livepublication.org/interface-schemas/dsc#"}}"#,
        ),
        ("dpc/terms.ttl", "@prefix dpc: <https://livepublication.org/interface-schemas/dpc#> .\n"),
        ("dpc/shapes.ttl", "@prefix sh: <http://www.w3.org/ns/shacl#> .\n"),
        (
            "vendor/ro-crate/1.1/context.jsonld",
            r#"{"@context": {"@vocab": "https://schema.org/"}}"#,
        ),
        (
            "vendor/ro-terms/workflow-run/context.jsonld",
            r#"{"@context": {"wfrun": "https://w3id.org/ro/terms/workflow-run#"}}"#,
        ),
        ("index.html", "<html><body>interface schemas</body></html>\n"),
        ("dpc/index.html", "<html><body>dpc</body></html>\n"),
    ];

    for (rel, content) in files {
        let path = schemas.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// One raw HTTP exchange, so tests can see exact status and headers.
pub struct RawResponse {
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends a single request to `addr` and reads the full response.
pub fn raw_request(addr: &str, method: &str, path: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .write_all(format!("{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n", method, path, addr).as_bytes())
        .expect("write request");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).expect("read response");

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header/body split");
    let head = std::str::from_utf8(&raw[..split]).expect("utf-8 headers");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.lines();
    let status = lines.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|line| {
            line.split_once(':')
                .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    RawResponse {
        status,
        headers,
        body,
    }
}
