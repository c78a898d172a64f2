//! nexa-site: server-rendered marketing site for a creative agency
//!
//! Pages are rendered with embedded Tera templates from content fetched
//! out of a headless CMS. Contact and newsletter forms write back to the
//! same CMS.

pub mod blog;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod forms;
pub mod generator;
pub mod helpers;
pub mod portfolio;
pub mod render;
pub mod sections;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cms::{ContentClient, MemoryClient, SanityClient};

/// The main site application
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static asset directory, served under `/static`
    pub source_dir: PathBuf,
    /// Output directory for `generate`
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Content client for this site: a fixture store when one is given,
    /// otherwise the configured CMS
    pub fn client(&self, fixture: Option<&Path>) -> Result<Arc<dyn ContentClient>> {
        match fixture {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.base_dir.join(path)
                };
                tracing::info!("Serving content from fixture {:?}", path);
                Ok(Arc::new(MemoryClient::from_fixture(path)?))
            }
            None => Ok(Arc::new(SanityClient::new(&self.config.cms)?)),
        }
    }

    /// Generate the static site
    pub async fn generate(&self, fixture: Option<&Path>) -> Result<()> {
        commands::generate::run(self, fixture).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        assert_eq!(site.source_dir, dir.path().join("source"));
        assert_eq!(site.public_dir, dir.path().join("public"));
        assert_eq!(site.config.cms.dataset, "production");
    }

    #[test]
    fn test_site_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Studio\npublic_dir: out\ntheme: light\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Studio");
        assert_eq!(site.public_dir, dir.path().join("out"));
        assert_eq!(site.config.theme, config::Theme::Light);
    }

    #[test]
    fn test_client_from_fixture() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("content.json"), r#"{"post": []}"#).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert!(site.client(Some(Path::new("content.json"))).is_ok());
        // No project configured and no fixture
        assert!(site.client(None).is_err());
    }
}
