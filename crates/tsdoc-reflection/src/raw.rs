//! Serde model of TypeDoc's JSON output.
//!
//! These types mirror the JSON as written by TypeDoc (0.22 through 0.26) and
//! are only used as input to the [`Loader`](crate::Loader), which lowers
//! them into the arena. Unknown fields are ignored; unknown `type` tags are
//! a deserialization error.

use serde::Deserialize;

use crate::kind::ModifierFlags;

/// One value or a list of them. Older TypeDoc wrote accessor signatures as
/// single-element arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(Box<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(one) => Some(*one),
            OneOrMany::Many(many) => many.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawReflection {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: Option<u32>,
    #[serde(default)]
    pub kind_string: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub flags: RawFlags,
    #[serde(default)]
    pub children: Vec<RawReflection>,
    #[serde(default)]
    pub signatures: Vec<RawReflection>,
    #[serde(default)]
    pub get_signature: Option<OneOrMany<RawReflection>>,
    #[serde(default)]
    pub set_signature: Option<OneOrMany<RawReflection>>,
    #[serde(default)]
    pub index_signature: Option<OneOrMany<RawReflection>>,
    #[serde(default)]
    pub index_signatures: Vec<RawReflection>,
    #[serde(default)]
    pub parameters: Vec<RawReflection>,
    #[serde(default)]
    pub type_parameter: Vec<RawReflection>,
    #[serde(default)]
    pub type_parameters: Vec<RawReflection>,
    #[serde(default)]
    pub sources: Vec<RawSource>,
    #[serde(default)]
    pub comment: Option<RawComment>,
    #[serde(default, rename = "type")]
    pub ty: Option<RawType>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub extended_types: Vec<RawType>,
    #[serde(default)]
    pub implemented_types: Vec<RawType>,
    #[serde(default)]
    pub inherited_from: Option<RawType>,
    /// Analyzer symbol table. Only meaningful on the project root.
    #[serde(default)]
    pub symbols: Vec<RawSymbol>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawFlags {
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default)]
    pub is_rest: bool,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_const: bool,
}

impl From<RawFlags> for ModifierFlags {
    fn from(raw: RawFlags) -> Self {
        let mut flags = ModifierFlags::empty();
        flags.set(ModifierFlags::ABSTRACT, raw.is_abstract);
        flags.set(ModifierFlags::OPTIONAL, raw.is_optional);
        flags.set(ModifierFlags::STATIC, raw.is_static);
        flags.set(ModifierFlags::PRIVATE, raw.is_private);
        flags.set(ModifierFlags::PROTECTED, raw.is_protected);
        flags.set(ModifierFlags::REST, raw.is_rest);
        flags.set(ModifierFlags::READONLY, raw.is_readonly);
        flags.set(ModifierFlags::EXTERNAL, raw.is_external);
        flags.set(ModifierFlags::CONST, raw.is_const);
        flags
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSource {
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
    #[serde(default)]
    pub summary: Vec<RawCommentPart>,
    #[serde(default)]
    pub block_tags: Vec<RawBlockTag>,
    #[serde(default)]
    pub modifier_tags: Vec<String>,
    // Pre-0.23 comment layout.
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawLegacyTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommentPart {
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlockTag {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Vec<RawCommentPart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLegacyTag {
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub param_name: Option<String>,
}

/// Target of a reference: a reflection id, or a symbol that has no
/// reflection of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTarget {
    Id(i64),
    Symbol(RawSymbolId),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSymbolId {
    pub source_file_name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub pos: Option<u32>,
}

/// An entry of the analyzer symbol table: every declaration a reference
/// may point at, exported or not.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSymbol {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub kind: Option<u32>,
    #[serde(default)]
    pub kind_string: Option<String>,
    pub file_name: String,
    #[serde(default)]
    pub pos: Option<u32>,
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default, rename = "type")]
    pub ty: Option<RawType>,
    #[serde(default)]
    pub flags: RawFlags,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RawType {
    Intrinsic {
        name: String,
    },
    Literal {
        #[serde(default)]
        value: serde_json::Value,
    },
    Reference {
        name: String,
        #[serde(default)]
        target: Option<RawTarget>,
        /// Pre-0.23 reflection id of the target.
        #[serde(default)]
        id: Option<i64>,
        #[serde(default)]
        package: Option<String>,
        #[serde(default)]
        refers_to_type_parameter: bool,
        #[serde(default)]
        type_arguments: Vec<RawType>,
    },
    Union {
        types: Vec<RawType>,
    },
    Intersection {
        types: Vec<RawType>,
    },
    Array {
        element_type: Box<RawType>,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<RawType>,
    },
    NamedTupleMember {
        name: String,
        #[serde(default)]
        is_optional: bool,
        element: Box<RawType>,
    },
    Optional {
        element_type: Box<RawType>,
    },
    Reflection {
        declaration: Box<RawReflection>,
    },
    Predicate {
        name: String,
        #[serde(default)]
        asserts: bool,
        #[serde(default)]
        target_type: Option<Box<RawType>>,
    },
    Query {
        query_type: Box<RawType>,
    },
    TypeOperator {
        operator: String,
        target: Box<RawType>,
    },
    Rest {
        element_type: Box<RawType>,
    },
    IndexedAccess {
        object_type: Box<RawType>,
        index_type: Box<RawType>,
    },
    Conditional {},
    Mapped {},
    TemplateLiteral {},
    Inferred {
        name: String,
    },
    Unknown {
        name: String,
    },
    // Pre-0.23 spellings.
    StringLiteral {
        value: String,
    },
    TypeParameter {
        name: String,
    },
}
