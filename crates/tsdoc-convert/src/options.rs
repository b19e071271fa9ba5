//! Conversion options.

use serde::{Deserialize, Serialize};

/// How numeric and bigint literal types are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralPolicy {
    /// `42` renders as `number`, `12n` as `bigint`.
    #[default]
    Widen,
    /// Literal values are kept as written.
    Preserve,
}

/// What to do with type variants the renderer has no rendering for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedTypePolicy {
    #[default]
    Error,
    /// Emit `<unsupported: kind>` text instead of failing.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Directory source file names are made relative to.
    pub base_dir: String,
    pub literal_policy: LiteralPolicy,
    pub unsupported_types: UnsupportedTypePolicy,
    /// Inline non-exported type aliases instead of referencing them.
    pub redirect_private_aliases: bool,
    /// Skip declarations whose source is an absolute path (system
    /// libraries such as `/usr/lib/...`).
    pub skip_absolute_sources: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            base_dir: String::new(),
            literal_policy: LiteralPolicy::Widen,
            unsupported_types: UnsupportedTypePolicy::Error,
            redirect_private_aliases: true,
            skip_absolute_sources: true,
        }
    }
}
