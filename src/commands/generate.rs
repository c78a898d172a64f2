//! Generate static files

use anyhow::Result;
use std::path::Path;

use crate::generator::Generator;
use crate::Site;

/// Fetch content and write the static site into `public_dir`
pub async fn run(site: &Site, fixture: Option<&Path>) -> Result<()> {
    let start = std::time::Instant::now();

    let client = site.client(fixture)?;
    let generator = Generator::new(site)?;
    generator.generate(client.as_ref()).await?;

    tracing::info!("Generated in {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_generate_from_fixture() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{"post": [{"title": "Hello", "customId": "hello", "publishedAt": "2024-02-01T00:00:00Z"}]}"#,
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site, Some(Path::new("content.json"))).await.unwrap();

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Hello"));
        assert!(site.public_dir.join("blog/BlogPost/hello/index.html").exists());
    }

    #[tokio::test]
    async fn test_generate_without_cms_fails() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site, None).await.is_err());
    }
}
