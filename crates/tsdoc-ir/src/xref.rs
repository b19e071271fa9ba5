//! Cross-reference descriptors and rendered type token streams.
//!
//! A rendered type is a flat list of [`TypeToken`]s. Literal punctuation and
//! keywords are plain text; anything a downstream renderer may want to link
//! is a [`TypeXRef`]. Replacing every descriptor with its display name and
//! concatenating the tokens yields the type as it would be written in source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered path segments identifying a declaration.
///
/// Every segment except the last carries the delimiter that joins it to
/// the next one (`.`, `#` or `/`), so joining the segments with no
/// separator gives the display form, e.g. `./dir/file.Class#method`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pathname(pub Vec<String>);

impl Pathname {
    pub fn new(segments: Vec<String>) -> Self {
        Pathname(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, i.e. the declaration's own name.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pathname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.0 {
            f.write_str(seg)?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for Pathname {
    fn from(segments: Vec<String>) -> Self {
        Pathname(segments)
    }
}

/// A reference to a named type, tagged by where its definition lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeXRef {
    /// A primitive such as `number` or `null`.
    Intrinsic { name: String },
    /// A declaration documented in this project, joined by path.
    Internal { name: String, path: Pathname },
    /// A declaration from a dependency package.
    External {
        name: String,
        package: String,
        #[serde(rename = "qualifiedName")]
        qualified_name: String,
        sourcefilename: String,
    },
}

impl TypeXRef {
    pub fn intrinsic(name: impl Into<String>) -> Self {
        TypeXRef::Intrinsic { name: name.into() }
    }

    pub fn internal(name: impl Into<String>, path: Pathname) -> Self {
        TypeXRef::Internal {
            name: name.into(),
            path,
        }
    }

    /// The text shown in place of the descriptor.
    pub fn name(&self) -> &str {
        match self {
            TypeXRef::Intrinsic { name }
            | TypeXRef::Internal { name, .. }
            | TypeXRef::External { name, .. } => name,
        }
    }
}

/// One element of a rendered type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeToken {
    Text(String),
    XRef(TypeXRef),
}

impl TypeToken {
    pub fn text(s: impl Into<String>) -> Self {
        TypeToken::Text(s.into())
    }

    pub fn display_name(&self) -> &str {
        match self {
            TypeToken::Text(s) => s,
            TypeToken::XRef(xref) => xref.name(),
        }
    }

    pub fn as_xref(&self) -> Option<&TypeXRef> {
        match self {
            TypeToken::XRef(xref) => Some(xref),
            TypeToken::Text(_) => None,
        }
    }
}

impl From<TypeXRef> for TypeToken {
    fn from(xref: TypeXRef) -> Self {
        TypeToken::XRef(xref)
    }
}

/// A type rendered to tokens.
pub type RenderedType = Vec<TypeToken>;

/// Concatenate the display names of a token stream.
pub fn display(tokens: &[TypeToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.display_name());
    }
    out
}

#[cfg(test)]
#[path = "../tests/xref_tests.rs"]
mod xref_tests;
