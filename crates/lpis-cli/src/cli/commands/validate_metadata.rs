//! Validate-metadata command: cross-check citation metadata files.

use anyhow::{bail, Result};
use lpis_core::metadata;
use std::path::Path;

pub fn run_validate_metadata(root: &Path) -> Result<()> {
    let findings = metadata::validate(root)?;
    if findings.is_empty() {
        println!("[PASS] Metadata files validated successfully.");
        return Ok(());
    }
    for finding in &findings {
        println!("[FAIL] {}", finding);
    }
    bail!("{} issue(s) found", findings.len());
}
