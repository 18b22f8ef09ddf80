//! Minimal HTTP/1.1 static file server for local vocabulary serving.
//!
//! Serves the repository's context/shape/vocabulary files the way the
//! deployed site does: CORS on everything, long-lived immutable caching
//! on versioned context documents, JSON-LD and Turtle content types.
//! Thread-per-connection over a blocking `TcpListener`; GET and HEAD
//! only.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};

/// Handle to a server running in a background thread. The accept loop
/// runs until the process exits.
#[derive(Debug)]
pub struct DevServer {
    addr: SocketAddr,
}

impl DevServer {
    /// Base URL of the running server, e.g. `http://127.0.0.1:8000`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Binds `127.0.0.1:port` (port 0 picks a free port) and serves `root`
/// from a background thread. Returns once the socket is bound, so the
/// caller can immediately issue requests.
pub fn start(root: &Path, port: u16) -> Result<DevServer> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .with_context(|| format!("bind 127.0.0.1:{}", port))?;
    let addr = listener.local_addr()?;
    tracing::info!("serving {} at http://{}", root.display(), addr);
    let root = Arc::new(root.to_path_buf());

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let root = Arc::clone(&root);
            thread::spawn(move || handle(stream, &root));
        }
    });

    Ok(DevServer { addr })
}

/// Blocking variant for the CLI `serve` command: binds and then runs
/// the accept loop on the current thread.
pub fn run(root: &Path, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .with_context(|| format!("bind 127.0.0.1:{}", port))?;
    let addr = listener.local_addr()?;
    println!("Serving {} at http://{}", root.display(), addr);
    let root = Arc::new(root.to_path_buf());
    for stream in listener.incoming().flatten() {
        let root = Arc::clone(&root);
        thread::spawn(move || handle(stream, &root));
    }
    Ok(())
}

fn handle(mut stream: TcpStream, root: &Path) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let (method, raw_path) = match parse_request_line(request) {
        Some(parts) => parts,
        None => {
            let _ = write_status(&mut stream, "400 Bad Request");
            return;
        }
    };

    if !method.eq_ignore_ascii_case("GET") && !method.eq_ignore_ascii_case("HEAD") {
        let _ = write_status(&mut stream, "405 Method Not Allowed");
        return;
    }

    let rel = match sanitize_path(raw_path) {
        Some(rel) => rel,
        None => {
            let _ = write_status(&mut stream, "404 Not Found");
            return;
        }
    };

    let full = root.join(&rel);
    let body = match std::fs::read(&full) {
        Ok(bytes) => bytes,
        Err(_) => {
            let _ = write_status(&mut stream, "404 Not Found");
            return;
        }
    };

    let cache_control = if is_versioned_context(&rel) {
        "Cache-Control: public, max-age=31536000, immutable\r\n"
    } else {
        ""
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\n{}Connection: close\r\n\r\n",
        content_type(&rel),
        body.len(),
        cache_control,
    );
    let _ = stream.write_all(response.as_bytes());
    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(&body);
    }
}

fn write_status(stream: &mut TcpStream, status: &str) -> std::io::Result<()> {
    stream.write_all(
        format!(
            "HTTP/1.1 {}\r\nAccess-Control-Allow-Origin: *\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status
        )
        .as_bytes(),
    )
}

/// Returns (method, path) from the request line, query string stripped.
fn parse_request_line(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let path = target.split('?').next().unwrap_or(target);
    Some((method, path))
}

/// Maps a request path to a relative file path under the root.
/// Directory requests fall back to `index.html`; any `..` segment is
/// rejected.
fn sanitize_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim_start_matches('/');
    let with_index = if trimmed.is_empty() || trimmed.ends_with('/') {
        format!("{}index.html", trimmed)
    } else {
        trimmed.to_string()
    };

    let mut rel = PathBuf::new();
    for segment in with_index.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return None;
        }
        rel.push(segment);
    }
    Some(rel)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jsonld") => "application/ld+json",
        Some("ttl") => "text/turtle",
        Some("json") => "application/json",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// True for immutable, versioned context documents: a `v<N>.jsonld`
/// file somewhere under a `contexts` directory (module contexts live
/// at `dpc/contexts/v1.jsonld`, the merged profile at
/// `contexts/lp-dscdpc/v1.jsonld`).
fn is_versioned_context(rel: &Path) -> bool {
    let under_contexts = rel
        .parent()
        .map(|p| p.components().any(|c| c.as_os_str() == "contexts"))
        .unwrap_or(false);
    if !under_contexts {
        return false;
    }
    match rel.file_name().and_then(|n| n.to_str()) {
        Some(name) => {
            let rest = match name.strip_prefix('v').and_then(|r| r.strip_suffix(".jsonld")) {
                Some(rest) => rest,
                None => return false,
            };
            !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
