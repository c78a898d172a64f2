//! Rich-text rendering
//!
//! Turns [`ContentNode`]s into a [`Fragment`] tree through a
//! [`Serializers`] dispatch table. Rendering is pure and total: every node
//! variant has a rule, unknown styles and types use the paragraph rule,
//! and image nodes without an asset produce nothing.

mod fragment;

pub use fragment::{Element, Fragment};

use crate::content::{BlockStyle, ContentNode, ImageNode, Inline, ListKind, Mark};

pub type ChildrenRule = fn(Vec<Fragment>) -> Fragment;
pub type HeadingRule = fn(u8, Vec<Fragment>) -> Fragment;
pub type ImageRule = fn(&ImageNode) -> Option<Fragment>;
pub type MarkRule = fn(&Mark, Vec<Fragment>) -> Fragment;

/// Dispatch table from node variant to rendering rule
#[derive(Clone, Copy)]
pub struct Serializers {
    pub heading: HeadingRule,
    pub quote: ChildrenRule,
    pub paragraph: ChildrenRule,
    pub bullet_list: ChildrenRule,
    pub number_list: ChildrenRule,
    pub list_item: ChildrenRule,
    pub image: ImageRule,
    pub mark: MarkRule,
}

impl Default for Serializers {
    fn default() -> Self {
        Self {
            heading: rules::heading,
            quote: rules::quote,
            paragraph: rules::paragraph,
            bullet_list: rules::bullet_list,
            number_list: rules::number_list,
            list_item: rules::list_item,
            image: rules::image,
            mark: rules::mark,
        }
    }
}

/// Render nodes in order, one fragment per node (minus asset-less images)
pub fn render_nodes(nodes: &[ContentNode], serializers: &Serializers) -> Vec<Fragment> {
    nodes
        .iter()
        .filter_map(|node| render_node(node, serializers))
        .collect()
}

/// Render nodes straight to an HTML string
pub fn render_html(nodes: &[ContentNode], serializers: &Serializers) -> String {
    render_nodes(nodes, serializers)
        .iter()
        .map(Fragment::to_html)
        .collect()
}

pub fn render_node(node: &ContentNode, s: &Serializers) -> Option<Fragment> {
    match node {
        ContentNode::Block { style, children } => {
            let inner = render_inlines(children, s);
            Some(match style {
                BlockStyle::Heading(level) => (s.heading)(*level, inner),
                BlockStyle::Blockquote => (s.quote)(inner),
                BlockStyle::Normal | BlockStyle::Other(_) => (s.paragraph)(inner),
            })
        }
        ContentNode::List { kind, items } => {
            let inner = render_nodes(items, s);
            Some(match kind {
                ListKind::Number => (s.number_list)(inner),
                ListKind::Bullet | ListKind::Other(_) => (s.bullet_list)(inner),
            })
        }
        ContentNode::ListItem { children, nested } => {
            let mut inner = render_inlines(children, s);
            inner.extend(render_nodes(nested, s));
            Some((s.list_item)(inner))
        }
        ContentNode::Image(image) => (s.image)(image),
        ContentNode::Unknown { children, .. } => Some((s.paragraph)(render_inlines(children, s))),
    }
}

fn render_inlines(children: &[Inline], s: &Serializers) -> Vec<Fragment> {
    children
        .iter()
        .map(|inline| {
            // First mark is the outermost wrapper
            inline
                .marks
                .iter()
                .rev()
                .fold(Fragment::text(&inline.text), |acc, mark| {
                    (s.mark)(mark, vec![acc])
                })
        })
        .collect()
}

/// Plain text of a body, blocks separated by spaces
pub fn plain_text(nodes: &[ContentNode]) -> String {
    let parts: Vec<String> = nodes
        .iter()
        .filter_map(|node| render_node(node, &Serializers::default()))
        .map(|f| f.text_content())
        .filter(|t| !t.trim().is_empty())
        .collect();
    parts.join(" ")
}

/// Rules used by the blog post view
pub mod rules {
    use super::{Element, Fragment};
    use crate::content::{ImageNode, Mark};

    pub fn heading(level: u8, children: Vec<Fragment>) -> Fragment {
        let (tag, class) = match level {
            1 => ("h1", "text-3xl font-extrabold mt-10 mb-6"),
            2 => ("h2", "text-2xl font-bold mt-8 mb-5"),
            3 => ("h3", "text-xl font-semibold mt-6 mb-4"),
            _ => return paragraph(children),
        };
        Element::new(tag).class(class).children(children).into()
    }

    pub fn quote(children: Vec<Fragment>) -> Fragment {
        Element::new("blockquote")
            .class("border-l-4 border-gray-400 bg-gray-100 p-5 italic rounded-md mb-6")
            .children(children)
            .into()
    }

    pub fn paragraph(children: Vec<Fragment>) -> Fragment {
        Element::new("p")
            .class("leading-relaxed mb-5")
            .children(children)
            .into()
    }

    pub fn bullet_list(children: Vec<Fragment>) -> Fragment {
        Element::new("ul")
            .class("list-disc pl-6 space-y-2 mb-6")
            .children(children)
            .into()
    }

    pub fn number_list(children: Vec<Fragment>) -> Fragment {
        Element::new("ol")
            .class("list-decimal pl-6 space-y-2 mb-6")
            .children(children)
            .into()
    }

    pub fn list_item(children: Vec<Fragment>) -> Fragment {
        Element::new("li").class("ml-2").children(children).into()
    }

    pub fn image(node: &ImageNode) -> Option<Fragment> {
        let src = node.src()?;
        let caption = node.caption.as_deref().unwrap_or("");

        let mut figure = Element::new("figure")
            .class("flex flex-col items-center text-center my-8")
            .child(
                Element::new("img")
                    .attr("src", src)
                    .attr("alt", caption)
                    .attr("loading", "lazy")
                    .class("w-full rounded-lg h-[300px] shadow-md object-cover")
                    .into(),
            );

        if !caption.is_empty() {
            figure = figure.child(
                Element::new("figcaption")
                    .class("text-sm text-gray-500 mt-2 italic")
                    .child(Fragment::text(caption))
                    .into(),
            );
        }

        Some(figure.into())
    }

    pub fn mark(mark: &Mark, children: Vec<Fragment>) -> Fragment {
        match mark {
            Mark::Strong => Element::new("strong").children(children).into(),
            Mark::Em => Element::new("em").children(children).into(),
            Mark::Code => Element::new("code").children(children).into(),
            Mark::Underline => Element::new("span")
                .attr("style", "text-decoration: underline")
                .children(children)
                .into(),
            Mark::StrikeThrough => Element::new("del").children(children).into(),
            Mark::Link { href } => Element::new("a")
                .attr("href", href)
                .class("text-accent underline")
                .children(children)
                .into(),
            // Unknown decorators render their text unchanged
            Mark::Other(_) => Element::new("span").children(children).into(),
        }
    }
}
