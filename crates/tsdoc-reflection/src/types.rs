//! Type expressions.
//!
//! `TypeExpr` is the closed set of type shapes TypeDoc reports. Inline
//! object and function shapes (`Reflection`) point back into the arena at
//! the declaration describing them.

use std::fmt;

use crate::arena::{NodeId, ReflectionId};

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    Intrinsic {
        name: String,
    },
    Literal(LiteralValue),
    Reference(ReferenceType),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Array(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    NamedTupleMember {
        name: String,
        optional: bool,
        element: Box<TypeExpr>,
    },
    /// An optional tuple element, `T?`.
    Optional(Box<TypeExpr>),
    /// An inline object, function or constructor shape.
    Reflection {
        declaration: NodeId,
    },
    /// A type guard, `x is T` or `asserts x is T`.
    Predicate {
        name: String,
        asserts: bool,
        target: Option<Box<TypeExpr>>,
    },
    /// `typeof X`.
    Query(Box<TypeExpr>),
    /// `keyof T`, `readonly T[]`, `unique symbol`.
    TypeOperator {
        operator: String,
        target: Box<TypeExpr>,
    },
    Rest(Box<TypeExpr>),
    IndexedAccess {
        object: Box<TypeExpr>,
        index: Box<TypeExpr>,
    },
    Conditional,
    Mapped,
    TemplateLiteral,
    Inferred {
        name: String,
    },
    Unknown {
        name: String,
    },
}

impl TypeExpr {
    pub fn intrinsic(name: impl Into<String>) -> Self {
        TypeExpr::Intrinsic { name: name.into() }
    }

    /// The TypeDoc tag of this variant, used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            TypeExpr::Intrinsic { .. } => "intrinsic",
            TypeExpr::Literal(_) => "literal",
            TypeExpr::Reference(_) => "reference",
            TypeExpr::Union(_) => "union",
            TypeExpr::Intersection(_) => "intersection",
            TypeExpr::Array(_) => "array",
            TypeExpr::Tuple(_) => "tuple",
            TypeExpr::NamedTupleMember { .. } => "namedTupleMember",
            TypeExpr::Optional(_) => "optional",
            TypeExpr::Reflection { .. } => "reflection",
            TypeExpr::Predicate { .. } => "predicate",
            TypeExpr::Query(_) => "query",
            TypeExpr::TypeOperator { .. } => "typeOperator",
            TypeExpr::Rest(_) => "rest",
            TypeExpr::IndexedAccess { .. } => "indexedAccess",
            TypeExpr::Conditional => "conditional",
            TypeExpr::Mapped => "mapped",
            TypeExpr::TemplateLiteral => "templateLiteral",
            TypeExpr::Inferred { .. } => "inferred",
            TypeExpr::Unknown { .. } => "unknown",
        }
    }

    /// True for the intrinsic `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeExpr::Intrinsic { name } if name == "void")
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            TypeExpr::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_reflection(&self) -> Option<NodeId> {
        match self {
            TypeExpr::Reflection { declaration } => Some(*declaration),
            _ => None,
        }
    }

    /// Inline declarations appearing anywhere in this type, outermost
    /// first. Declarations nested inside those declarations are not
    /// included.
    pub fn inline_declarations(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_declarations(&mut out);
        out
    }

    /// Every reference in this type, type arguments included, outermost
    /// first. Inline declarations are not entered.
    pub fn references(&self) -> Vec<&ReferenceType> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a ReferenceType>) {
        match self {
            TypeExpr::Reference(reference) => {
                out.push(reference);
                for arg in &reference.type_arguments {
                    arg.collect_references(out);
                }
            }
            TypeExpr::Union(types) | TypeExpr::Intersection(types) | TypeExpr::Tuple(types) => {
                for ty in types {
                    ty.collect_references(out);
                }
            }
            TypeExpr::Array(inner)
            | TypeExpr::Optional(inner)
            | TypeExpr::Query(inner)
            | TypeExpr::Rest(inner)
            | TypeExpr::NamedTupleMember { element: inner, .. }
            | TypeExpr::TypeOperator { target: inner, .. } => inner.collect_references(out),
            TypeExpr::Predicate { target, .. } => {
                if let Some(target) = target {
                    target.collect_references(out);
                }
            }
            TypeExpr::IndexedAccess { object, index } => {
                object.collect_references(out);
                index.collect_references(out);
            }
            TypeExpr::Reflection { .. }
            | TypeExpr::Intrinsic { .. }
            | TypeExpr::Literal(_)
            | TypeExpr::Conditional
            | TypeExpr::Mapped
            | TypeExpr::TemplateLiteral
            | TypeExpr::Inferred { .. }
            | TypeExpr::Unknown { .. } => {}
        }
    }

    fn collect_declarations(&self, out: &mut Vec<NodeId>) {
        match self {
            TypeExpr::Reflection { declaration } => out.push(*declaration),
            TypeExpr::Reference(reference) => {
                for arg in &reference.type_arguments {
                    arg.collect_declarations(out);
                }
            }
            TypeExpr::Union(types) | TypeExpr::Intersection(types) | TypeExpr::Tuple(types) => {
                for ty in types {
                    ty.collect_declarations(out);
                }
            }
            TypeExpr::Array(inner)
            | TypeExpr::Optional(inner)
            | TypeExpr::Query(inner)
            | TypeExpr::Rest(inner)
            | TypeExpr::NamedTupleMember { element: inner, .. }
            | TypeExpr::TypeOperator { target: inner, .. } => inner.collect_declarations(out),
            TypeExpr::Predicate { target, .. } => {
                if let Some(target) = target {
                    target.collect_declarations(out);
                }
            }
            TypeExpr::IndexedAccess { object, index } => {
                object.collect_declarations(out);
                index.collect_declarations(out);
            }
            TypeExpr::Intrinsic { .. }
            | TypeExpr::Literal(_)
            | TypeExpr::Conditional
            | TypeExpr::Mapped
            | TypeExpr::TemplateLiteral
            | TypeExpr::Inferred { .. }
            | TypeExpr::Unknown { .. } => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    /// Kept as written so widening policy can decide later.
    Number(String),
    String(String),
    Boolean(bool),
    BigInt { negative: bool, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceType {
    pub name: String,
    pub target: ReferenceTarget,
    pub package: Option<String>,
    /// Generic parameters are references that intentionally resolve to
    /// nothing.
    pub refers_to_type_parameter: bool,
    pub type_arguments: Vec<TypeExpr>,
}

/// What a reference points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceTarget {
    /// A reflection emitted by the analyzer.
    Reflection(ReflectionId),
    /// A symbol without a reflection (private, or from a dependency).
    Symbol(SymbolLocation),
    Unresolved,
}

impl fmt::Display for ReferenceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceTarget::Reflection(id) => write!(f, "reflection #{}", id.0),
            ReferenceTarget::Symbol(sym) => write!(f, "{}:{}", sym.source_file_name, sym.qualified_name),
            ReferenceTarget::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolLocation {
    pub source_file_name: String,
    pub qualified_name: String,
    pub pos: Option<u32>,
}

impl SymbolLocation {
    /// True when the symbol is declared inside an installed dependency.
    pub fn is_dependency(&self) -> bool {
        is_dependency_path(&self.source_file_name)
    }
}

/// Whether a source path lies under a `node_modules` directory.
pub fn is_dependency_path(path: &str) -> bool {
    path.split(['/', '\\']).any(|seg| seg == "node_modules")
}
