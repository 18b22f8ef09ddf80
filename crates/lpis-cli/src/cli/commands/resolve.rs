//! Resolve command: run one URL through the context gateway.

use anyhow::{bail, Result};
use lpis_core::config::LpisConfig;
use lpis_core::gateway::{FetchMode, Gateway};
use std::time::Duration;

/// Resolves `url` and prints the fetched JSON document. The gateway is
/// built fresh for this one invocation, so nothing is cached across
/// runs.
pub fn run_resolve(cfg: &LpisConfig, url: &str, base: Option<String>, offline: bool) -> Result<()> {
    let base = match base.or_else(|| cfg.default_base.clone()) {
        Some(base) => base,
        None => bail!("no override base: pass --base or set default_base in the config"),
    };

    let mode = if offline {
        FetchMode::Offline
    } else {
        FetchMode::from_online_flag(cfg.rocrate_online)
    };

    let mut gateway = Gateway::new(base, mode, Duration::from_secs(cfg.fetch_timeout_secs));
    let doc = gateway.resolve(url)?;

    tracing::info!("resolved {} ({:?})", doc.document_url, mode);
    println!("{}", serde_json::to_string_pretty(&doc.document)?);
    Ok(())
}
