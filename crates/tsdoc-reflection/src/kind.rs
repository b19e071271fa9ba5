//! Reflection kinds and modifier flags.
//!
//! The kind table is closed: TypeDoc output naming a kind that is not listed
//! here fails to load rather than being skipped.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A declaration kind (values match TypeDoc's `ReflectionKind` bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ReflectionKind {
    Project = 0x1,
    Module = 0x2,
    Namespace = 0x4,
    Enum = 0x8,
    EnumMember = 0x10,
    Variable = 0x20,
    Function = 0x40,
    Class = 0x80,
    Interface = 0x100,
    Constructor = 0x200,
    Property = 0x400,
    Method = 0x800,
    CallSignature = 0x1000,
    IndexSignature = 0x2000,
    ConstructorSignature = 0x4000,
    Parameter = 0x8000,
    TypeLiteral = 0x10000,
    TypeParameter = 0x20000,
    Accessor = 0x40000,
    GetSignature = 0x80000,
    SetSignature = 0x100000,
    TypeAlias = 0x200000,
    Reference = 0x400000,
}

impl ReflectionKind {
    const ALL: [ReflectionKind; 23] = [
        Self::Project,
        Self::Module,
        Self::Namespace,
        Self::Enum,
        Self::EnumMember,
        Self::Variable,
        Self::Function,
        Self::Class,
        Self::Interface,
        Self::Constructor,
        Self::Property,
        Self::Method,
        Self::CallSignature,
        Self::IndexSignature,
        Self::ConstructorSignature,
        Self::Parameter,
        Self::TypeLiteral,
        Self::TypeParameter,
        Self::Accessor,
        Self::GetSignature,
        Self::SetSignature,
        Self::TypeAlias,
        Self::Reference,
    ];

    /// Parse TypeDoc's `kindString` (TypeDoc 0.24 and earlier).
    pub fn from_kind_string(s: &str) -> Option<Self> {
        let kind = match s {
            "Project" | "root" => Self::Project,
            "Module" | "External module" => Self::Module,
            "Namespace" => Self::Namespace,
            "Enumeration" => Self::Enum,
            "Enumeration Member" | "Enumeration member" => Self::EnumMember,
            "Variable" => Self::Variable,
            "Function" => Self::Function,
            "Class" => Self::Class,
            "Interface" => Self::Interface,
            "Constructor" => Self::Constructor,
            "Property" => Self::Property,
            "Method" => Self::Method,
            "Call signature" => Self::CallSignature,
            "Index signature" => Self::IndexSignature,
            "Constructor signature" => Self::ConstructorSignature,
            "Parameter" => Self::Parameter,
            "Type literal" => Self::TypeLiteral,
            "Type parameter" => Self::TypeParameter,
            "Accessor" => Self::Accessor,
            "Get signature" => Self::GetSignature,
            "Set signature" => Self::SetSignature,
            "Type alias" => Self::TypeAlias,
            "Reference" => Self::Reference,
            _ => return None,
        };
        Some(kind)
    }

    /// Parse TypeDoc's numeric `kind`.
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| *k as u32 == bits)
    }

    /// TypeDoc's display string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Module => "Module",
            Self::Namespace => "Namespace",
            Self::Enum => "Enumeration",
            Self::EnumMember => "Enumeration Member",
            Self::Variable => "Variable",
            Self::Function => "Function",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Constructor => "Constructor",
            Self::Property => "Property",
            Self::Method => "Method",
            Self::CallSignature => "Call signature",
            Self::IndexSignature => "Index signature",
            Self::ConstructorSignature => "Constructor signature",
            Self::Parameter => "Parameter",
            Self::TypeLiteral => "Type literal",
            Self::TypeParameter => "Type parameter",
            Self::Accessor => "Accessor",
            Self::GetSignature => "Get signature",
            Self::SetSignature => "Set signature",
            Self::TypeAlias => "Type alias",
            Self::Reference => "Reference",
        }
    }

    pub fn is_signature(self) -> bool {
        matches!(
            self,
            Self::CallSignature
                | Self::ConstructorSignature
                | Self::IndexSignature
                | Self::GetSignature
                | Self::SetSignature
        )
    }

    /// Project, module and namespace: the containers references are
    /// attributed to.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Project | Self::Module | Self::Namespace)
    }
}

impl std::fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Modifier flags of a reflection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const ABSTRACT = 1 << 0;
        const OPTIONAL = 1 << 1;
        const STATIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const REST = 1 << 5;
        const READONLY = 1 << 6;
        const EXTERNAL = 1 << 7;
        const CONST = 1 << 8;
    }
}

impl ModifierFlags {
    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    pub fn is_optional(self) -> bool {
        self.contains(Self::OPTIONAL)
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    pub fn is_rest(self) -> bool {
        self.contains(Self::REST)
    }
}

#[cfg(test)]
#[path = "../tests/kind_tests.rs"]
mod kind_tests;
