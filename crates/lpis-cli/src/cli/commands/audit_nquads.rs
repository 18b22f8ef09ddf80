//! Audit command: scan an N-Quads file for vocabulary drift.

use anyhow::{bail, Context, Result};
use lpis_core::audit;
use std::path::Path;

pub fn run_audit_nquads(path: &Path) -> Result<()> {
    let nquads = std::fs::read_to_string(path)
        .with_context(|| format!("read N-Quads file: {}", path.display()))?;

    let report = audit::scan(&nquads);
    print!("{}", report);

    if !report.is_clean() {
        bail!("{} violation(s) in {}", report.violations().len(), path.display());
    }
    Ok(())
}
