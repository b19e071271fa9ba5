//! TypeDoc reflection model.
//!
//! The loader deserializes TypeDoc's JSON (`raw`), then lowers it into a flat
//! arena of [`Node`]s with typed [`TypeExpr`]s and normalised [`Comment`]s.
//! The resulting [`Project`] is immutable; consumers that need to watch
//! reference types being created register a [`ReferenceListener`] on the
//! [`Loader`] up front.

pub mod raw;

pub mod kind;
pub use kind::{ModifierFlags, ReflectionKind};

pub mod arena;
pub use arena::{Node, NodeId, ReflectionArena, ReflectionId, Source};

pub mod types;
pub use types::{
    LiteralValue, ReferenceTarget, ReferenceType, SymbolLocation, TypeExpr, is_dependency_path,
};

pub mod comment;
pub use comment::{BlockTag, Comment, CommentPart};

pub mod project;
pub use project::{Program, Project, SymbolInfo};

pub mod loader;
pub use loader::{LoadError, Loader, ReferenceListener};
