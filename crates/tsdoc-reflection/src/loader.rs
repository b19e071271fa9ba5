//! Loader: lowers TypeDoc JSON into a [`Project`].
//!
//! This is the analysis-engine boundary. Every reference type is
//! materialised here, so components that need to observe references (the
//! private-alias redirector) subscribe a [`ReferenceListener`] before
//! loading instead of walking the finished tree.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::arena::{Node, NodeId, ReflectionArena, ReflectionId, Source};
use crate::comment::Comment;
use crate::kind::ReflectionKind;
use crate::project::{Program, Project, SymbolInfo};
use crate::raw::{RawReflection, RawSymbol, RawTarget, RawType};
use crate::types::{LiteralValue, ReferenceTarget, ReferenceType, SymbolLocation, TypeExpr};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid TypeDoc JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reflection '{name}' has unknown kind '{kind}'")]
    UnknownKind { name: String, kind: String },
    #[error("reflection '{name}' has no kind")]
    MissingKind { name: String },
}

/// Receives every reference type as the loader creates it.
pub trait ReferenceListener {
    /// `container` is the innermost project, module or namespace node
    /// enclosing the reference.
    fn on_reference(&mut self, container: NodeId, reference: &ReferenceType);
}

/// Builds a [`Project`] from TypeDoc output, notifying subscribed listeners.
#[derive(Default)]
pub struct Loader<'l> {
    listeners: Vec<&'l mut dyn ReferenceListener>,
    arena: ReflectionArena,
    containers: Vec<NodeId>,
    references: usize,
}

impl<'l> Loader<'l> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Must happen before `load*`; references created
    /// earlier are not replayed.
    pub fn subscribe(&mut self, listener: &'l mut dyn ReferenceListener) {
        self.listeners.push(listener);
    }

    pub fn load_str(self, json: &str) -> Result<Project, LoadError> {
        let raw: RawReflection = serde_json::from_str(json)?;
        self.load(raw)
    }

    pub fn load_value(self, value: serde_json::Value) -> Result<Project, LoadError> {
        let raw: RawReflection = serde_json::from_value(value)?;
        self.load(raw)
    }

    pub fn load(mut self, mut raw: RawReflection) -> Result<Project, LoadError> {
        let symbols = std::mem::take(&mut raw.symbols);
        let root = self.lower_reflection(raw, None)?;

        let program = if symbols.is_empty() {
            None
        } else {
            let mut program = Program::new();
            for symbol in symbols {
                program.insert(self.lower_symbol(symbol)?);
            }
            Some(program)
        };

        debug!(
            nodes = self.arena.len(),
            references = self.references,
            symbols = program.as_ref().map_or(0, |p| p.len()),
            "loaded TypeDoc project"
        );

        Ok(Project {
            arena: self.arena,
            root,
            program,
        })
    }

    fn lower_reflection(
        &mut self,
        raw: RawReflection,
        parent: Option<NodeId>,
    ) -> Result<NodeId, LoadError> {
        let kind = resolve_kind(&raw, parent.is_none())?;
        trace!(name = %raw.name, %kind, "lowering reflection");

        let mut node = Node::new(kind, raw.name);
        node.id = raw.id.map(ReflectionId);
        node.original_name = raw.original_name;
        node.flags = raw.flags.into();
        node.parent = parent;
        node.default_value = raw.default_value;
        node.comment = raw.comment.map(Comment::from_raw);
        node.sources = raw
            .sources
            .into_iter()
            .map(|s| Source {
                file_name: s.file_name,
                line: s.line,
            })
            .collect();
        let id = self.arena.alloc(node);

        if kind.is_container() {
            self.containers.push(id);
        }

        let children = self.lower_list(raw.children, id)?;
        let signatures = self.lower_list(raw.signatures, id)?;
        let get_signature = self.lower_optional(raw.get_signature.and_then(|s| s.into_first()), id)?;
        let set_signature = self.lower_optional(raw.set_signature.and_then(|s| s.into_first()), id)?;
        let index_raw = raw
            .index_signature
            .and_then(|s| s.into_first())
            .or_else(|| raw.index_signatures.into_iter().next());
        let index_signature = self.lower_optional(index_raw, id)?;
        let mut type_parameters = self.lower_list(raw.type_parameter, id)?;
        type_parameters.extend(self.lower_list(raw.type_parameters, id)?);
        let parameters = self.lower_list(raw.parameters, id)?;

        let ty = raw.ty.map(|t| self.lower_type(t, Some(id))).transpose()?;
        let extended_types = self.lower_types(raw.extended_types, Some(id))?;
        let implemented_types = self.lower_types(raw.implemented_types, Some(id))?;
        let inherited_from = raw
            .inherited_from
            .map(|t| self.lower_type(t, Some(id)))
            .transpose()?;

        if kind.is_container() {
            self.containers.pop();
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.children = children;
            node.signatures = signatures;
            node.get_signature = get_signature;
            node.set_signature = set_signature;
            node.index_signature = index_signature;
            node.type_parameters = type_parameters;
            node.parameters = parameters;
            node.ty = ty;
            node.extended_types = extended_types;
            node.implemented_types = implemented_types;
            node.inherited_from = inherited_from;
        }
        Ok(id)
    }

    fn lower_list(
        &mut self,
        raws: Vec<RawReflection>,
        parent: NodeId,
    ) -> Result<Vec<NodeId>, LoadError> {
        raws.into_iter()
            .map(|raw| self.lower_reflection(raw, Some(parent)))
            .collect()
    }

    fn lower_optional(
        &mut self,
        raw: Option<RawReflection>,
        parent: NodeId,
    ) -> Result<Option<NodeId>, LoadError> {
        raw.map(|raw| self.lower_reflection(raw, Some(parent)))
            .transpose()
    }

    fn lower_types(
        &mut self,
        raws: Vec<RawType>,
        owner: Option<NodeId>,
    ) -> Result<Vec<TypeExpr>, LoadError> {
        raws.into_iter()
            .map(|raw| self.lower_type(raw, owner))
            .collect()
    }

    fn lower_boxed(&mut self, raw: RawType, owner: Option<NodeId>) -> Result<Box<TypeExpr>, LoadError> {
        Ok(Box::new(self.lower_type(raw, owner)?))
    }

    fn lower_type(&mut self, raw: RawType, owner: Option<NodeId>) -> Result<TypeExpr, LoadError> {
        let ty = match raw {
            RawType::Intrinsic { name } => TypeExpr::Intrinsic { name },
            RawType::Literal { value } => TypeExpr::Literal(lower_literal(value)),
            RawType::StringLiteral { value } => TypeExpr::Literal(LiteralValue::String(value)),
            RawType::Reference {
                name,
                target,
                id,
                package,
                refers_to_type_parameter,
                type_arguments,
            } => {
                let target = match (target, id) {
                    (Some(RawTarget::Id(n)), _) | (None, Some(n)) if n >= 0 => {
                        ReferenceTarget::Reflection(ReflectionId(n))
                    }
                    (Some(RawTarget::Symbol(sym)), _) => ReferenceTarget::Symbol(SymbolLocation {
                        source_file_name: sym.source_file_name,
                        qualified_name: sym.qualified_name,
                        pos: sym.pos,
                    }),
                    _ => ReferenceTarget::Unresolved,
                };
                let reference = ReferenceType {
                    name,
                    target,
                    package,
                    refers_to_type_parameter,
                    type_arguments: self.lower_types(type_arguments, owner)?,
                };
                self.notify(&reference);
                TypeExpr::Reference(reference)
            }
            RawType::TypeParameter { name } => TypeExpr::Reference(ReferenceType {
                name,
                target: ReferenceTarget::Unresolved,
                package: None,
                refers_to_type_parameter: true,
                type_arguments: Vec::new(),
            }),
            RawType::Union { types } => TypeExpr::Union(self.lower_types(types, owner)?),
            RawType::Intersection { types } => {
                TypeExpr::Intersection(self.lower_types(types, owner)?)
            }
            RawType::Array { element_type } => TypeExpr::Array(self.lower_boxed(*element_type, owner)?),
            RawType::Tuple { elements } => TypeExpr::Tuple(self.lower_types(elements, owner)?),
            RawType::NamedTupleMember {
                name,
                is_optional,
                element,
            } => TypeExpr::NamedTupleMember {
                name,
                optional: is_optional,
                element: self.lower_boxed(*element, owner)?,
            },
            RawType::Optional { element_type } => {
                TypeExpr::Optional(self.lower_boxed(*element_type, owner)?)
            }
            RawType::Reflection { declaration } => {
                let declaration = self.lower_reflection(*declaration, owner)?;
                TypeExpr::Reflection { declaration }
            }
            RawType::Predicate {
                name,
                asserts,
                target_type,
            } => TypeExpr::Predicate {
                name,
                asserts,
                target: target_type
                    .map(|t| self.lower_boxed(*t, owner))
                    .transpose()?,
            },
            RawType::Query { query_type } => TypeExpr::Query(self.lower_boxed(*query_type, owner)?),
            RawType::TypeOperator { operator, target } => TypeExpr::TypeOperator {
                operator,
                target: self.lower_boxed(*target, owner)?,
            },
            RawType::Rest { element_type } => TypeExpr::Rest(self.lower_boxed(*element_type, owner)?),
            RawType::IndexedAccess {
                object_type,
                index_type,
            } => TypeExpr::IndexedAccess {
                object: self.lower_boxed(*object_type, owner)?,
                index: self.lower_boxed(*index_type, owner)?,
            },
            RawType::Conditional {} => TypeExpr::Conditional,
            RawType::Mapped {} => TypeExpr::Mapped,
            RawType::TemplateLiteral {} => TypeExpr::TemplateLiteral,
            RawType::Inferred { name } => TypeExpr::Inferred { name },
            RawType::Unknown { name } => TypeExpr::Unknown { name },
        };
        Ok(ty)
    }

    fn lower_symbol(&mut self, raw: RawSymbol) -> Result<SymbolInfo, LoadError> {
        let kind = match (&raw.kind_string, raw.kind) {
            (Some(s), _) => ReflectionKind::from_kind_string(s).ok_or_else(|| LoadError::UnknownKind {
                name: raw.name.clone(),
                kind: s.clone(),
            })?,
            (None, Some(bits)) => ReflectionKind::from_bits(bits).ok_or_else(|| LoadError::UnknownKind {
                name: raw.name.clone(),
                kind: bits.to_string(),
            })?,
            (None, None) => {
                return Err(LoadError::MissingKind { name: raw.name });
            }
        };
        // The symbol table is outside every container; its references are
        // not reported.
        let ty = raw.ty.map(|t| self.lower_type(t, None)).transpose()?;
        Ok(SymbolInfo {
            id: raw.id.map(ReflectionId),
            qualified_name: raw.qualified_name.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            kind,
            file_name: raw.file_name,
            pos: raw.pos,
            flags: raw.flags.into(),
            ty: ty.map(Arc::new),
        })
    }

    fn notify(&mut self, reference: &ReferenceType) {
        self.references += 1;
        let Some(&container) = self.containers.last() else {
            return;
        };
        for listener in self.listeners.iter_mut() {
            listener.on_reference(container, reference);
        }
    }
}

fn resolve_kind(raw: &RawReflection, is_root: bool) -> Result<ReflectionKind, LoadError> {
    if let Some(s) = &raw.kind_string {
        return ReflectionKind::from_kind_string(s).ok_or_else(|| LoadError::UnknownKind {
            name: raw.name.clone(),
            kind: s.clone(),
        });
    }
    match raw.kind {
        // Very old TypeDoc wrote the root with kind 0.
        Some(0) if is_root => Ok(ReflectionKind::Project),
        Some(bits) => ReflectionKind::from_bits(bits).ok_or_else(|| LoadError::UnknownKind {
            name: raw.name.clone(),
            kind: bits.to_string(),
        }),
        None if is_root => Ok(ReflectionKind::Project),
        None => Err(LoadError::MissingKind {
            name: raw.name.clone(),
        }),
    }
}

fn lower_literal(value: serde_json::Value) -> LiteralValue {
    match value {
        serde_json::Value::Null => LiteralValue::Null,
        serde_json::Value::Bool(b) => LiteralValue::Boolean(b),
        serde_json::Value::Number(n) => LiteralValue::Number(n.to_string()),
        serde_json::Value::String(s) => LiteralValue::String(s),
        serde_json::Value::Object(map) => {
            let negative = map
                .get("negative")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let value = map
                .get("value")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("0")
                .to_string();
            LiteralValue::BigInt { negative, value }
        }
        other => LiteralValue::String(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../tests/loader_tests.rs"]
mod loader_tests;
