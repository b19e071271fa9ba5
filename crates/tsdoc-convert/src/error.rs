//! Conversion errors.
//!
//! Every failure is fatal to the run; there is no partial output. Variants
//! carry the declaration name so the offending source can be located.

use tsdoc_reflection::{LoadError, ReferenceTarget, ReflectionKind};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{kind} '{name}' has no assigned path")]
    MissingPath { name: String, kind: ReflectionKind },

    #[error("reference to '{name}' cannot be resolved (target {target})")]
    UnresolvedReference {
        name: String,
        target: ReferenceTarget,
    },

    #[error("index signature of '{name}' has {arity} parameters, expected 1")]
    MalformedIndexSignature { name: String, arity: usize },

    #[error("'{variant}' types are not supported (in '{declaration}')")]
    UnsupportedType {
        variant: &'static str,
        declaration: String,
    },

    #[error("cannot destructure parameter '{param}' of '{name}': its type is not an object shape")]
    DestructureNonObject { name: String, param: String },

    #[error("{kind} '{name}' has no type")]
    MissingType { name: String, kind: ReflectionKind },

    #[error("{kind} '{name}' has no signatures")]
    MissingSignature { name: String, kind: ReflectionKind },

    #[error("type alias '{name}' expands to itself")]
    CircularRedirect { name: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ConvertError {
    /// Attach the declaration being converted to errors raised while
    /// rendering one of its types.
    pub(crate) fn within(self, declaration: &str) -> Self {
        match self {
            ConvertError::UnsupportedType {
                variant,
                declaration: current,
            } if current.is_empty() => ConvertError::UnsupportedType {
                variant,
                declaration: declaration.to_string(),
            },
            other => other,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
