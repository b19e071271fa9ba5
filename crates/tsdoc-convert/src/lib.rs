//! TypeDoc reflection to documentation IR conversion.
//!
//! The pipeline runs in strictly sequential phases over one immutable
//! project:
//! 1. Load the TypeDoc JSON, with the [`PrivateAliasRedirector`] listening
//!    for references.
//! 2. Build the [`RedirectTable`] of undocumented type aliases.
//! 3. Assign paths ([`assign_paths`]).
//! 4. Convert declarations to IR records ([`Converter`]), rendering types
//!    with the [`TypeRenderer`].

use tracing::debug;
use tsdoc_ir::TopLevelRecord;
use tsdoc_reflection::{Loader, Project};

pub mod error;
pub use error::{ConvertError, Result};

pub mod options;
pub use options::{ConvertOptions, LiteralPolicy, UnsupportedTypePolicy};

pub mod paths;
pub use paths::{PathMap, assign_paths, make_filepath_segments, symbol_safe_name};

pub mod redirect;
pub use redirect::{PrivateAliasRedirector, RedirectTable, SymbolKey};

pub mod render;
pub use render::{TypeContext, TypeRenderer};

pub mod describe;

pub mod convert;
pub use convert::{Converted, Converter, NAMED_PARAMETERS};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;

/// Convert TypeDoc JSON output into IR records.
pub fn convert_json(json: &str, options: &ConvertOptions) -> Result<Vec<TopLevelRecord>> {
    let mut redirector = PrivateAliasRedirector::new();
    let project = {
        let mut loader = Loader::new();
        loader.subscribe(&mut redirector);
        loader.load_str(json)?
    };

    let redirects = if options.redirect_private_aliases {
        redirector.build(&project)
    } else {
        RedirectTable::new()
    };
    convert_project(&project, &redirects, options)
}

/// Convert an already loaded project.
pub fn convert_project(
    project: &Project,
    redirects: &RedirectTable,
    options: &ConvertOptions,
) -> Result<Vec<TopLevelRecord>> {
    let paths = assign_paths(project, &options.base_dir);
    let records = Converter::new(project, &paths, redirects, options).convert_all()?;
    debug!(records = records.len(), redirects = redirects.len(), "conversion finished");
    Ok(records)
}

#[cfg(test)]
#[path = "../tests/pipeline_tests.rs"]
mod pipeline_tests;
