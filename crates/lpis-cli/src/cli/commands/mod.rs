//! CLI command handlers. Each command is in its own file for clarity.

mod audit_nquads;
mod build_context;
mod resolve;
mod serve;
mod validate_metadata;

pub use audit_nquads::run_audit_nquads;
pub use build_context::run_build_context;
pub use resolve::run_resolve;
pub use serve::run_serve;
pub use validate_metadata::run_validate_metadata;
