//! Build-context command: regenerate or verify the merged profile context.

use anyhow::Result;
use lpis_core::context;
use std::path::Path;

/// Paths of the module contexts and the committed profile, relative to
/// the repository root.
const MODULE_CONTEXTS: &[&str] = &[
    "interface-schemas/dpc/contexts/v1.jsonld",
    "interface-schemas/dsc/contexts/v1.jsonld",
];
const PROFILE_CONTEXT: &str = "interface-schemas/contexts/lp-dscdpc/v1.jsonld";

pub fn run_build_context(root: &Path, check: bool) -> Result<()> {
    let modules: Vec<_> = MODULE_CONTEXTS.iter().map(|rel| root.join(rel)).collect();
    let profile = root.join(PROFILE_CONTEXT);

    if check {
        context::check_profile_context(&modules, &profile)?;
        println!("profile context is up to date");
    } else {
        context::write_profile_context(&modules, &profile)?;
        println!("wrote {}", profile.display());
    }
    Ok(())
}
