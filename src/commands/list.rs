//! List CMS content

use anyhow::Result;
use std::path::Path;

use crate::cms::{self, ContentClient};
use crate::helpers::format_optional;
use crate::Site;

/// List site content by type
pub async fn run(site: &Site, content_type: &str, fixture: Option<&Path>) -> Result<()> {
    let client = site.client(fixture)?;
    for line in lines(site, client.as_ref(), content_type).await? {
        println!("{}", line);
    }
    Ok(())
}

async fn lines(site: &Site, client: &dyn ContentClient, content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = cms::fetch_posts(client).await?;
            out.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                let date = format_optional(post.published_at.as_ref(), "YYYY-MM-DD");
                out.push(format!("  {} - {} [{}]", date, post.title, post.path()));
            }
        }
        "image" | "images" => {
            let images = cms::fetch_images(client).await?;
            out.push(format!("Images ({}):", images.len()));
            for image in images {
                out.push(format!(
                    "  {} [{}] {}",
                    image.title,
                    image.category.as_deref().unwrap_or("-"),
                    image.image_url.as_deref().unwrap_or("(no asset)")
                ));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, image", content_type);
        }
    }

    tracing::debug!("Listed {} for {}", content_type, site.config.title);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MemoryClient;
    use serde_json::json;

    fn client() -> MemoryClient {
        MemoryClient::new()
            .with_documents(
                "post",
                vec![json!({"title": "Hello", "customId": "hello", "publishedAt": "2024-02-01T00:00:00Z"})],
            )
            .with_documents(
                "imageAsset",
                vec![json!({"title": "Logo", "category": "branding"})],
            )
    }

    #[tokio::test]
    async fn test_list_posts_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let client = client();

        let posts = lines(&site, &client, "post").await.unwrap();
        assert_eq!(posts[0], "Posts (1):");
        assert_eq!(posts[1], "  2024-02-01 - Hello [/blog/BlogPost/hello]");

        let images = lines(&site, &client, "images").await.unwrap();
        assert_eq!(images[1], "  Logo [branding] (no asset)");
    }

    #[tokio::test]
    async fn test_list_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(lines(&site, &client(), "tag").await.is_err());
    }
}
