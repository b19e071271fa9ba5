//! Conversion options from an optional JSON file plus command-line flags.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use tsdoc_convert::{ConvertOptions, LiteralPolicy};

use crate::args::CliArgs;

/// Read a `ConvertOptions` JSON file. Missing fields take their defaults.
pub fn load_options(path: &Path) -> Result<ConvertOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file: {}", path.display()))?;
    let options = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse options file: {}", path.display()))?;
    Ok(options)
}

/// Options file values, overridden by any flag given on the command line.
pub fn resolve_options(args: &CliArgs) -> Result<ConvertOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => ConvertOptions::default(),
    };

    if let Some(base_dir) = &args.base_dir {
        options.base_dir = base_dir.clone();
    }
    if args.preserve_literals {
        options.literal_policy = LiteralPolicy::Preserve;
    }
    if let Some(policy) = args.unsupported_types {
        options.unsupported_types = policy.into();
    }
    if args.no_redirect {
        options.redirect_private_aliases = false;
    }
    if args.keep_absolute_sources {
        options.skip_absolute_sources = false;
    }

    debug!(?options, "resolved conversion options");
    Ok(options)
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
