//! CLI for the interface-schemas tooling.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lpis_core::config;
use std::path::PathBuf;

use commands::{run_audit_nquads, run_build_context, run_resolve, run_serve, run_validate_metadata};

/// Top-level CLI for the interface-schemas tooling.
#[derive(Debug, Parser)]
#[command(name = "lpis")]
#[command(about = "LivePublication interface-schemas tooling: context gateway, dev server, audits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a context/document URL through the gateway and print the JSON body.
    Resolve {
        /// Absolute http(s) URL to resolve.
        url: String,

        /// Override base the vocabulary's own URLs are rewritten onto
        /// (defaults to `default_base` from config).
        #[arg(long)]
        base: Option<String>,

        /// Use local vendor copies for allowlisted third-party contexts.
        #[arg(long)]
        offline: bool,
    },

    /// Serve the vocabulary tree over HTTP for local testing.
    Serve {
        /// Directory to serve.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Port to listen on (0 picks a free port).
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Regenerate the merged lp-dscdpc profile context from the module contexts.
    BuildContext {
        /// Repository root holding the module context files.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Verify the committed profile instead of writing it; exits
        /// nonzero on drift.
        #[arg(long)]
        check: bool,
    },

    /// Scan an N-Quads file for vocabulary drift and policy violations.
    AuditNquads {
        /// Path to the N-Quads file.
        path: PathBuf,
    },

    /// Cross-check citation metadata files (codemeta, zenodo, CITATION.cff, RO-Crate).
    ValidateMetadata {
        /// Repository root.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { url, base, offline } => run_resolve(&cfg, &url, base, offline)?,
            CliCommand::Serve { root, port } => run_serve(&root, port)?,
            CliCommand::BuildContext { root, check } => run_build_context(&root, check)?,
            CliCommand::AuditNquads { path } => run_audit_nquads(&path)?,
            CliCommand::ValidateMetadata { root } => run_validate_metadata(&root)?,
        }

        Ok(())
    }
}
