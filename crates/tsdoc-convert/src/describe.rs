//! Doc comment to IR description helpers.

use indexmap::IndexMap;
use tsdoc_ir::{Deprecated, Description, DescriptionItem};
use tsdoc_reflection::{BlockTag, Comment, CommentPart};

pub fn description(parts: &[CommentPart]) -> Description {
    parts
        .iter()
        .map(|part| match part {
            CommentPart::Text(text) => DescriptionItem::Text(text.clone()),
            CommentPart::Code(code) => DescriptionItem::Code(code.clone()),
        })
        .collect()
}

/// A block tag's content, preceded by its subject when it has one.
pub fn tag_description(tag: &BlockTag) -> Description {
    let mut out = Vec::with_capacity(tag.content.len() + 1);
    if let Some(name) = &tag.name {
        out.push(DescriptionItem::Name(name.clone()));
    }
    out.extend(description(&tag.content));
    out
}

/// Block tags grouped by tag name, in first-appearance order.
pub fn block_tags(comment: &Comment) -> IndexMap<String, Vec<Description>> {
    let mut tags: IndexMap<String, Vec<Description>> = IndexMap::new();
    for tag in &comment.block_tags {
        tags.entry(tag.tag.clone())
            .or_default()
            .push(tag_description(tag));
    }
    tags
}

pub fn modifier_tags(comment: &Comment) -> Vec<String> {
    comment
        .modifier_tags
        .iter()
        .map(|tag| tag.strip_prefix('@').unwrap_or(tag).to_string())
        .collect()
}

pub fn deprecated(comment: &Comment) -> Deprecated {
    match comment.first_tag("deprecated") {
        None => Deprecated::Flag(false),
        Some(tag) if tag.content.iter().all(|p| p.text().trim().is_empty()) => {
            Deprecated::Flag(true)
        }
        Some(tag) => Deprecated::Note(description(&tag.content)),
    }
}

pub fn examples(comment: &Comment) -> Vec<Description> {
    comment
        .tags("example")
        .map(|tag| description(&tag.content))
        .collect()
}

pub fn returns(comment: &Comment) -> Description {
    comment
        .first_tag("returns")
        .or_else(|| comment.first_tag("return"))
        .map(|tag| description(&tag.content))
        .unwrap_or_default()
}

/// Description of parameter `name`: its own summary, else the matching
/// `@param` tag on the signature comment.
pub fn param(own: Option<&Comment>, signature: Option<&Comment>, name: &str) -> Description {
    if let Some(comment) = own.filter(|c| !c.summary.is_empty()) {
        return description(&comment.summary);
    }
    signature
        .and_then(|c| c.tags("param").find(|t| t.name.as_deref() == Some(name)))
        .map(|tag| description(&tag.content))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/describe_tests.rs"]
mod describe_tests;
