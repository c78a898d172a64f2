//! Content client - the boundary to the headless CMS
//!
//! Pages only talk to the CMS through [`ContentClient`], so the HTTP
//! implementation ([`SanityClient`]) can be swapped for the in-process
//! [`MemoryClient`] in tests and offline runs. There is no caching, retry
//! or pagination at this layer.

mod memory;
mod sanity;

pub use memory::MemoryClient;
pub use sanity::SanityClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::{ImageEntry, Post};

/// A CMS document as untyped JSON
pub type Document = serde_json::Value;

/// Posts, newest first, with image assets resolved to URLs
pub const POSTS_QUERY: &str = r#"*[_type == "post"] | order(publishedAt desc) {
  title,
  slug,
  customId,
  postedBy,
  body[]{
    ...,
    asset->{
      _id,
      url
    }
  },
  publishedAt,
  "imageUrl": image.asset->url,
}"#;

/// Portfolio image assets
pub const IMAGES_QUERY: &str = r#"*[_type == "imageAsset"]{
  title,
  slug,
  "imageUrl": image.asset->url,
  category
}"#;

/// CMS access errors
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CMS rejected the request: {0}")]
    Rejected(String),

    #[error("CMS is not configured: {0}")]
    NotConfigured(String),
}

/// Read and write access to CMS documents
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Run a read query and return the matching documents
    async fn fetch(&self, query: &str) -> Result<Vec<Document>, CmsError>;

    /// Create one document (must carry `_type`) and return it as stored
    async fn create(&self, record: Document) -> Result<Document, CmsError>;
}

/// Fetch all posts, skipping documents that do not decode
pub async fn fetch_posts(client: &dyn ContentClient) -> Result<Vec<Post>, CmsError> {
    let documents = client.fetch(POSTS_QUERY).await?;
    tracing::debug!("Fetched {} post documents", documents.len());
    Ok(decode_all(documents, "post"))
}

/// Fetch all portfolio images, skipping documents that do not decode
pub async fn fetch_images(client: &dyn ContentClient) -> Result<Vec<ImageEntry>, CmsError> {
    let documents = client.fetch(IMAGES_QUERY).await?;
    tracing::debug!("Fetched {} image documents", documents.len());
    Ok(decode_all(documents, "imageAsset"))
}

fn decode_all<T: serde::de::DeserializeOwned>(documents: Vec<Document>, kind: &str) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed {} document: {}", kind, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_posts_skips_malformed() {
        let client = MemoryClient::new().with_documents(
            "post",
            vec![
                json!({"_type": "post", "title": "Good", "customId": "good"}),
                json!({"_type": "post", "title": 42}),
            ],
        );

        let posts = fetch_posts(&client).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].custom_id, "good");
    }

    #[tokio::test]
    async fn test_fetch_keeps_documents_with_null_fields() {
        let client = MemoryClient::new()
            .with_documents(
                "post",
                vec![
                    json!({
                        "title": "No body yet",
                        "slug": null,
                        "customId": "draft",
                        "postedBy": null,
                        "body": null,
                        "publishedAt": "2024-04-01T09:00:00Z",
                        "imageUrl": null
                    }),
                    json!({"title": null, "customId": "dated", "body": [], "publishedAt": "2024-03-05"}),
                ],
            )
            .with_documents(
                "imageAsset",
                vec![json!({"title": null, "slug": null, "imageUrl": "https://cdn.example.com/x.png", "category": "branding"})],
            );

        let posts = fetch_posts(&client).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].custom_id, "draft");
        assert!(posts[0].body.is_empty());
        assert_eq!(posts[1].custom_id, "dated");
        assert!(posts[1].published_at.is_some());

        let images = fetch_images(&client).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].key(), "https://cdn.example.com/x.png");
    }

    #[tokio::test]
    async fn test_fetch_images() {
        let client = MemoryClient::new().with_documents(
            "imageAsset",
            vec![json!({"_type": "imageAsset", "title": "Logo", "category": "branding"})],
        );

        let images = fetch_images(&client).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].category.as_deref(), Some("branding"));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let client = MemoryClient::new();
        client.set_fail_reads(true);
        assert!(fetch_posts(&client).await.is_err());
    }
}
