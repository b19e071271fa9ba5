//! Read TypeDoc output, convert it, and write the IR.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use tsdoc_convert::convert_json;
use tsdoc_ir::TopLevelRecord;

use crate::args::CliArgs;
use crate::config::resolve_options;

/// Run one conversion. Returns the number of records written.
pub fn run(args: &CliArgs) -> Result<usize> {
    let options = resolve_options(args)?;
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read TypeDoc output: {}", args.input.display()))?;
    let records = convert_json(&json, &options)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    let rendered = render_records(&records, args.pretty)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write IR: {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").context("failed to write IR to stdout")?;
        }
    }

    info!(records = records.len(), "wrote IR");
    Ok(records.len())
}

pub fn render_records(records: &[TopLevelRecord], pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    rendered.context("failed to serialize IR")
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
