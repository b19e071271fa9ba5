//! Diagnostic logging for the `tsdoc` binary.
//!
//! Off unless `TSDOC_LOG` holds a filter directive. `TSDOC_LOG_FORMAT`
//! picks `text` (default), `tree` or `json`. Output always goes to stderr
//! because the IR may be written to stdout.
//!
//! ```bash
//! TSDOC_LOG="tsdoc_convert::redirect=trace" TSDOC_LOG_FORMAT=tree tsdoc docs.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What to log and how, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// `None` when logging is disabled (no or blank filter).
    pub fn from_vars(filter: Option<String>, format: Option<String>) -> Option<Self> {
        let filter = filter.filter(|f| !f.trim().is_empty())?;
        let format = format.as_deref().map(LogFormat::parse).unwrap_or_default();
        Some(LogSettings { filter, format })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            std::env::var("TSDOC_LOG").ok(),
            std::env::var("TSDOC_LOG_FORMAT").ok(),
        )
    }

    /// Install the global subscriber. Invalid directives are skipped.
    pub fn init(self) {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_targets(true);
                Registry::default().with(filter).with(layer).init();
            }
            LogFormat::Json => {
                let layer = fmt::layer().json().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).init();
            }
            LogFormat::Text => {
                let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).init();
            }
        }
    }
}

/// Set up logging from `TSDOC_LOG` / `TSDOC_LOG_FORMAT`, if requested.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_env() {
        settings.init();
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
