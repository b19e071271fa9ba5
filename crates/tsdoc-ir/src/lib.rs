//! Documentation IR for TypeScript projects analysed by TypeDoc.
//!
//! This crate is data only:
//! - Cross-reference descriptors and rendered type tokens (`xref`)
//! - Function / attribute / class / interface records (`records`)
//!
//! Everything here serializes with serde; the JSON shape is the contract
//! with the documentation renderer.

pub mod xref;
pub use xref::{Pathname, RenderedType, TypeToken, TypeXRef, display};

pub mod records;
pub use records::{
    Attribute, Class, Deprecated, Description, DescriptionItem, Exc, Function, Interface, Member,
    MemberProperties, Param, Return, TopLevel, TopLevelRecord, TypeParam, description_text,
};
