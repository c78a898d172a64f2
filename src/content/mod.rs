//! Content module - CMS documents and rich-text bodies

mod de;
pub mod portable;
mod post;

pub use portable::{BlockStyle, ContentNode, ImageNode, Inline, ListKind, Mark, RawBlock};
pub use post::{ImageEntry, Post, Slug, POST_ROUTE};
