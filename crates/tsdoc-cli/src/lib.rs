//! The `tsdoc` command: options resolution, tracing setup and the
//! read-convert-write driver around `tsdoc-convert`.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
