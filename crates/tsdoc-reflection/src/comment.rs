//! Structured doc comments.
//!
//! Both comment layouts TypeDoc has written are normalised to one shape:
//! a summary plus an ordered list of block tags, each split into text and
//! code parts. Inline tags such as `{@link Foo}` are kept as plain text.

use crate::raw::{RawComment, RawCommentPart};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentPart {
    Text(String),
    Code(String),
}

impl CommentPart {
    pub fn text(&self) -> &str {
        match self {
            CommentPart::Text(s) | CommentPart::Code(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockTag {
    /// Tag name without the leading `@`.
    pub tag: String,
    /// Subject of the tag, e.g. the parameter name of `@param`.
    pub name: Option<String>,
    pub content: Vec<CommentPart>,
}

impl BlockTag {
    pub fn text(&self) -> String {
        self.content.iter().map(CommentPart::text).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    pub summary: Vec<CommentPart>,
    pub block_tags: Vec<BlockTag>,
    pub modifier_tags: Vec<String>,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.block_tags.is_empty() && self.modifier_tags.is_empty()
    }

    /// All block tags with the given name, in source order.
    pub fn tags<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a BlockTag> + 'a {
        self.block_tags.iter().filter(move |t| t.tag == tag)
    }

    pub fn first_tag(&self, tag: &str) -> Option<&BlockTag> {
        self.block_tags.iter().find(|t| t.tag == tag)
    }

    pub fn summary_text(&self) -> String {
        self.summary.iter().map(CommentPart::text).collect()
    }

    pub(crate) fn from_raw(raw: RawComment) -> Self {
        let mut summary = lower_parts(raw.summary);
        let mut block_tags: Vec<BlockTag> = raw
            .block_tags
            .into_iter()
            .map(|tag| BlockTag {
                tag: strip_at(&tag.tag).to_string(),
                name: tag.name,
                content: lower_parts(tag.content),
            })
            .collect();

        // Pre-0.23 layout: shortText/text/returns and untyped tags.
        let legacy_text = [raw.short_text, raw.text]
            .into_iter()
            .flatten()
            .map(|s| s.trim_end().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if summary.is_empty() && !legacy_text.is_empty() {
            summary.push(CommentPart::Text(legacy_text.join("\n\n")));
        }
        if let Some(returns) = raw.returns {
            let returns = returns.trim_end();
            if !returns.is_empty() {
                block_tags.push(BlockTag {
                    tag: "returns".to_string(),
                    name: None,
                    content: vec![CommentPart::Text(returns.to_string())],
                });
            }
        }
        for tag in raw.tags {
            let text = tag.text.trim_end();
            block_tags.push(BlockTag {
                tag: strip_at(&tag.tag).to_string(),
                name: tag.param_name,
                content: if text.is_empty() {
                    Vec::new()
                } else {
                    vec![CommentPart::Text(text.to_string())]
                },
            });
        }

        Comment {
            summary,
            block_tags,
            modifier_tags: raw.modifier_tags,
        }
    }
}

fn strip_at(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

fn lower_parts(parts: Vec<RawCommentPart>) -> Vec<CommentPart> {
    parts
        .into_iter()
        .map(|part| match part.kind.as_str() {
            "code" => CommentPart::Code(part.text),
            _ => CommentPart::Text(part.text),
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/comment_tests.rs"]
mod comment_tests;
