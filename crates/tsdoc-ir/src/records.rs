//! IR records: the flat, serializable projection of documented declarations.
//!
//! Records reference each other only through [`Pathname`]s inside
//! [`TypeXRef`](crate::TypeXRef) descriptors and `supers`/`interfaces`
//! lists; nothing is embedded except class members and constructors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::xref::{Pathname, RenderedType};

/// One structural piece of a doc comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum DescriptionItem {
    /// The subject of a block tag, e.g. `x` in `@param x`.
    Name(String),
    Text(String),
    Code(String),
}

pub type Description = Vec<DescriptionItem>;

/// Plain text of a description, with code spans kept verbatim.
pub fn description_text(description: &[DescriptionItem]) -> String {
    let mut out = String::new();
    for item in description {
        match item {
            DescriptionItem::Name(s) | DescriptionItem::Text(s) | DescriptionItem::Code(s) => {
                out.push_str(s)
            }
        }
    }
    out
}

/// `@deprecated` state: absent, bare, or with an explanation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    Flag(bool),
    Note(Description),
}

impl Default for Deprecated {
    fn default() -> Self {
        Deprecated::Flag(false)
    }
}

impl Deprecated {
    pub fn is_deprecated(&self) -> bool {
        match self {
            Deprecated::Flag(flag) => *flag,
            Deprecated::Note(_) => true,
        }
    }
}

/// Fields shared by every record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLevel {
    pub name: String,
    pub path: Pathname,
    /// Basename of the defining source file.
    pub filename: String,
    /// Source file name as reported by the analyzer.
    pub deppath: Option<String>,
    pub description: Description,
    pub modifier_tags: Vec<String>,
    pub block_tags: IndexMap<String, Vec<Description>>,
    pub line: Option<u32>,
    pub deprecated: Deprecated,
    pub examples: Vec<Description>,
    pub see_alsos: Vec<String>,
    pub properties: Vec<Attribute>,
    pub exported_from: Option<Pathname>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProperties {
    pub is_abstract: bool,
    pub is_optional: bool,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub description: Description,
    pub is_variadic: bool,
    pub has_default: bool,
    pub default: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<RenderedType>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Return {
    #[serde(rename = "type")]
    pub ty: RenderedType,
    pub description: Description,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub extends: Option<RenderedType>,
    pub description: Description,
}

/// Thrown exceptions. TypeDoc has no model for these, so lists stay empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Exc {
    #[serde(rename = "type")]
    pub ty: Option<RenderedType>,
    pub description: Description,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(flatten)]
    pub top: TopLevel,
    #[serde(flatten)]
    pub member: MemberProperties,
    pub is_async: bool,
    pub params: Vec<Param>,
    pub exceptions: Vec<Exc>,
    pub returns: Vec<Return>,
    pub type_params: Vec<TypeParam>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub top: TopLevel,
    #[serde(flatten)]
    pub member: MemberProperties,
    #[serde(rename = "type")]
    pub ty: RenderedType,
}

/// A class or interface member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Member {
    #[serde(rename = "functions")]
    Function(Function),
    #[serde(rename = "attributes")]
    Attribute(Attribute),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Function(f) => &f.top.name,
            Member::Attribute(a) => &a.top.name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(flatten)]
    pub top: TopLevel,
    pub constructor: Option<Function>,
    pub members: Vec<Member>,
    pub supers: Vec<Pathname>,
    pub is_abstract: bool,
    pub interfaces: Vec<Pathname>,
    pub type_params: Vec<TypeParam>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(flatten)]
    pub top: TopLevel,
    pub members: Vec<Member>,
    pub supers: Vec<Pathname>,
    pub type_params: Vec<TypeParam>,
}

/// A record emitted at the top level of the IR list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TopLevelRecord {
    #[serde(rename = "functions")]
    Function(Function),
    #[serde(rename = "attributes")]
    Attribute(Attribute),
    #[serde(rename = "classes")]
    Class(Class),
    #[serde(rename = "interfaces")]
    Interface(Interface),
}

impl TopLevelRecord {
    pub fn top(&self) -> &TopLevel {
        match self {
            TopLevelRecord::Function(f) => &f.top,
            TopLevelRecord::Attribute(a) => &a.top,
            TopLevelRecord::Class(c) => &c.top,
            TopLevelRecord::Interface(i) => &i.top,
        }
    }

    pub fn name(&self) -> &str {
        &self.top().name
    }

    pub fn path(&self) -> &Pathname {
        &self.top().path
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            TopLevelRecord::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            TopLevelRecord::Attribute(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            TopLevelRecord::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            TopLevelRecord::Interface(i) => Some(i),
            _ => None,
        }
    }
}

impl From<Member> for TopLevelRecord {
    fn from(member: Member) -> Self {
        match member {
            Member::Function(f) => TopLevelRecord::Function(f),
            Member::Attribute(a) => TopLevelRecord::Attribute(a),
        }
    }
}

#[cfg(test)]
#[path = "../tests/records_tests.rs"]
mod records_tests;
