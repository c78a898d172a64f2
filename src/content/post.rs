//! Post and portfolio image models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{lenient_datetime, null_default};
use super::portable::{self, ContentNode, RawBlock};
use crate::helpers::encode_segment;

/// Route prefix of the post detail page
pub const POST_ROUTE: &str = "/blog/BlogPost";

/// CMS slug object (`{"current": "..."}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "null_default")]
    pub current: String,
}

/// A blog post as returned by the posts query
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Post title
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    /// CMS slug
    #[serde(default)]
    pub slug: Option<Slug>,

    /// Identifier used in the detail route
    #[serde(rename = "customId", default, deserialize_with = "null_default")]
    pub custom_id: String,

    /// Rich-text body, in source order
    #[serde(default, deserialize_with = "null_default")]
    pub body: Vec<RawBlock>,

    /// Publication timestamp
    #[serde(rename = "publishedAt", default, deserialize_with = "lenient_datetime")]
    pub published_at: Option<DateTime<Utc>>,

    /// Author name
    #[serde(rename = "postedBy", default)]
    pub posted_by: Option<String>,

    /// Resolved cover image URL
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl Post {
    /// Convert the raw body into typed content nodes
    pub fn content_nodes(&self) -> Vec<ContentNode> {
        portable::build_nodes(&self.body)
    }

    /// Author byline, falling back to the site default
    pub fn byline<'a>(&'a self, default_author: &'a str) -> &'a str {
        self.posted_by
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(default_author)
    }

    /// URL path of the detail page
    pub fn path(&self) -> String {
        format!("{}/{}", POST_ROUTE, encode_segment(&self.custom_id))
    }
}

/// A portfolio image as returned by the image asset query
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageEntry {
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default)]
    pub slug: Option<Slug>,

    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,

    /// Lowercase category tag (flyer, branding, ...)
    #[serde(default)]
    pub category: Option<String>,
}

impl ImageEntry {
    /// Stable key used to select the image in the full-screen view:
    /// the slug, else the image URL, else the slugified title
    pub fn key(&self) -> String {
        if let Some(slug) = self.slug.as_ref().filter(|s| !s.current.is_empty()) {
            return slug.current.clone();
        }
        match self.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => slug::slugify(&self.title),
        }
    }
}
