//! Portable text bodies
//!
//! The CMS stores rich text as a flat array of blocks. List items are
//! ordinary blocks carrying `listItem` and `level`; they are grouped here
//! into list nodes so that every rendered element corresponds to exactly
//! one [`ContentNode`].

use serde::Deserialize;

use super::de::null_default;

/// A block exactly as it arrives from the CMS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    #[serde(rename = "_type", default, deserialize_with = "null_default")]
    pub kind: String,

    #[serde(rename = "_key", default)]
    pub key: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(rename = "listItem", default)]
    pub list_item: Option<String>,

    #[serde(default)]
    pub level: Option<u32>,

    #[serde(rename = "markDefs", default, deserialize_with = "null_default")]
    pub mark_defs: Vec<MarkDef>,

    #[serde(default, deserialize_with = "null_default")]
    pub children: Vec<RawSpan>,

    /// Resolved image asset (`asset->{_id, url}`)
    #[serde(default)]
    pub asset: Option<Asset>,

    #[serde(default)]
    pub caption: Option<String>,

    /// Plain text carried by non-block types
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpan {
    #[serde(rename = "_type", default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub marks: Vec<String>,
}

/// Annotation definition referenced by span marks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default, deserialize_with = "null_default")]
    pub key: String,
    #[serde(rename = "_type", default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Block style
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStyle {
    /// `h1` to `h3`
    Heading(u8),
    Blockquote,
    /// `normal` or `p`
    Normal,
    /// Anything else, rendered as a paragraph
    Other(String),
}

impl BlockStyle {
    pub fn parse(style: Option<&str>) -> Self {
        match style.unwrap_or("normal") {
            "h1" => BlockStyle::Heading(1),
            "h2" => BlockStyle::Heading(2),
            "h3" => BlockStyle::Heading(3),
            "blockquote" => BlockStyle::Blockquote,
            "normal" | "p" => BlockStyle::Normal,
            other => BlockStyle::Other(other.to_string()),
        }
    }
}

/// List flavour
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
    Other(String),
}

impl ListKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "bullet" => ListKind::Bullet,
            "number" => ListKind::Number,
            other => ListKind::Other(other.to_string()),
        }
    }
}

/// Inline formatting applied to a span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Em,
    Code,
    Underline,
    StrikeThrough,
    Link { href: String },
    Other(String),
}

/// A run of text with its marks, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Inline {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub url: Option<String>,
    pub caption: Option<String>,
}

impl ImageNode {
    /// Asset URL, if the reference resolved to one
    pub fn src(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One typed element of a rich-text body
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Block {
        style: BlockStyle,
        children: Vec<Inline>,
    },
    List {
        kind: ListKind,
        items: Vec<ContentNode>,
    },
    ListItem {
        children: Vec<Inline>,
        /// Deeper-level lists that follow this item
        nested: Vec<ContentNode>,
    },
    Image(ImageNode),
    /// Unrecognized `_type`; keeps whatever text it carried
    Unknown {
        kind: String,
        children: Vec<Inline>,
    },
}

/// Convert raw CMS blocks into content nodes, preserving order
pub fn build_nodes(blocks: &[RawBlock]) -> Vec<ContentNode> {
    let mut nodes = Vec::with_capacity(blocks.len());
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];
        if block.list_item.is_some() {
            let (list, consumed) = collect_list(&blocks[i..], level_of(block));
            nodes.push(list);
            i += consumed;
        } else {
            nodes.push(convert_block(block));
            i += 1;
        }
    }

    nodes
}

/// Collect a run of list blocks at `level`, returning the list and how
/// many blocks it consumed. Always consumes at least the first block.
fn collect_list(blocks: &[RawBlock], level: u32) -> (ContentNode, usize) {
    let kind = ListKind::parse(blocks[0].list_item.as_deref().unwrap_or_default());
    let mut items: Vec<ContentNode> = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];
        let Some(item_kind) = block.list_item.as_deref() else {
            break;
        };
        let item_level = level_of(block);

        if item_level < level {
            break;
        }

        if item_level > level {
            let (nested, used) = collect_list(&blocks[i..], item_level);
            match items.last_mut() {
                Some(ContentNode::ListItem { nested: inner, .. }) => inner.push(nested),
                _ => items.push(ContentNode::ListItem {
                    children: Vec::new(),
                    nested: vec![nested],
                }),
            }
            i += used;
            continue;
        }

        if i > 0 && ListKind::parse(item_kind) != kind {
            break;
        }

        items.push(ContentNode::ListItem {
            children: inlines(block),
            nested: Vec::new(),
        });
        i += 1;
    }

    (ContentNode::List { kind, items }, i)
}

fn level_of(block: &RawBlock) -> u32 {
    block.level.unwrap_or(1).max(1)
}

fn convert_block(block: &RawBlock) -> ContentNode {
    match block.kind.as_str() {
        "block" => ContentNode::Block {
            style: BlockStyle::parse(block.style.as_deref()),
            children: inlines(block),
        },
        "image" => ContentNode::Image(ImageNode {
            url: block.asset.as_ref().and_then(|a| a.url.clone()),
            caption: block.caption.clone().filter(|c| !c.is_empty()),
        }),
        other => {
            let mut children = inlines(block);
            if children.is_empty() {
                if let Some(text) = &block.text {
                    children.push(Inline::plain(text));
                }
            }
            ContentNode::Unknown {
                kind: other.to_string(),
                children,
            }
        }
    }
}

/// Resolve span marks against the block's mark definitions
fn inlines(block: &RawBlock) -> Vec<Inline> {
    block
        .children
        .iter()
        .map(|span| Inline {
            text: span.text.clone(),
            marks: span
                .marks
                .iter()
                .map(|mark| resolve_mark(mark, &block.mark_defs))
                .collect(),
        })
        .collect()
}

fn resolve_mark(mark: &str, defs: &[MarkDef]) -> Mark {
    match mark {
        "strong" => Mark::Strong,
        "em" => Mark::Em,
        "code" => Mark::Code,
        "underline" => Mark::Underline,
        "strike-through" => Mark::StrikeThrough,
        key => match defs.iter().find(|d| d.key == key) {
            Some(MarkDef {
                kind,
                href: Some(href),
                ..
            }) if kind == "link" => Mark::Link { href: href.clone() },
            Some(def) => Mark::Other(def.kind.clone()),
            None => Mark::Other(key.to_string()),
        },
    }
}
