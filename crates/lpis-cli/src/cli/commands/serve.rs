//! Serve command: run the dev file server in the foreground.

use anyhow::Result;
use lpis_core::server;
use std::path::Path;

pub fn run_serve(root: &Path, port: u16) -> Result<()> {
    server::run(root, port)
}
