use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use tsdoc_convert::UnsupportedTypePolicy;

/// CLI arguments for the tsdoc binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsdoc",
    version,
    about = "Convert TypeDoc JSON output into a documentation IR"
)]
pub struct CliArgs {
    /// TypeDoc JSON file to convert.
    pub input: PathBuf,

    /// Directory source file names are made relative to.
    #[arg(long = "base-dir", alias = "baseDir")]
    pub base_dir: Option<String>,

    /// JSON file with conversion options.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the IR here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Keep numeric and bigint literal types instead of widening them.
    #[arg(long = "preserve-literals", alias = "preserveLiterals")]
    pub preserve_literals: bool,

    /// What to do with type forms that have no rendering.
    #[arg(long = "unsupported-types", value_enum, ignore_case = true)]
    pub unsupported_types: Option<UnsupportedTypes>,

    /// Reference non-exported type aliases instead of inlining them.
    #[arg(long = "no-redirect")]
    pub no_redirect: bool,

    /// Convert declarations whose source file is an absolute path.
    #[arg(long = "keep-absolute-sources")]
    pub keep_absolute_sources: bool,

    /// Pretty-print the emitted JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UnsupportedTypes {
    Error,
    Placeholder,
}

impl From<UnsupportedTypes> for UnsupportedTypePolicy {
    fn from(value: UnsupportedTypes) -> Self {
        match value {
            UnsupportedTypes::Error => UnsupportedTypePolicy::Error,
            UnsupportedTypes::Placeholder => UnsupportedTypePolicy::Placeholder,
        }
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
