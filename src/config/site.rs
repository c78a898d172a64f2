//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable consulted when `cms.token` is not set
pub const TOKEN_ENV: &str = "SANITY_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Appearance
    pub theme: Theme,

    // Date format (Moment.js style tokens)
    pub date_format: String,
    pub month_format: String,

    // Content backend
    #[serde(default)]
    pub cms: CmsConfig,

    // Sections
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Nexa Creative Solutions".to_string(),
            description: "Transforming your vision into stunning websites".to_string(),
            language: "en".to_string(),

            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            theme: Theme::Dark,

            date_format: "MMMM DD, YYYY".to_string(),
            month_format: "MMMM, YYYY".to_string(),

            cms: CmsConfig::default(),
            forms: FormsConfig::default(),
            portfolio: PortfolioConfig::default(),
            blog: BlogConfig::default(),
            contact: ContactInfo::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Color scheme passed explicitly to every render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Section background/foreground classes
    pub fn section_class(&self) -> &'static str {
        match self {
            Theme::Dark => "bg-slate-900 text-primary",
            Theme::Light => "bg-primary text-secondary",
        }
    }

    pub fn footer_class(&self) -> &'static str {
        match self {
            Theme::Dark => "bg-slate-800 text-primary",
            Theme::Light => "bg-slate-200 text-secondary",
        }
    }

    pub fn logo(&self) -> &'static str {
        match self {
            Theme::Dark => "logo light.png",
            Theme::Light => "nexalogo.png",
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Base URL overriding `https://<project_id>.api.sanity.io`
    pub api_host: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2023-10-01".to_string(),
            use_cdn: false,
            token: None,
            timeout_secs: 15,
            api_host: None,
        }
    }
}

impl CmsConfig {
    /// Write token from config, falling back to the environment
    pub fn token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }
}

/// Status label timing for the contact and subscription forms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// How long a validation label stays before reverting to idle
    pub validation_revert_ms: u64,
    /// How long a success/failure label stays before reverting to idle
    pub outcome_revert_ms: u64,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            validation_revert_ms: 2000,
            outcome_revert_ms: 3000,
        }
    }
}

/// Portfolio filter buttons (besides "All")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub categories: Vec<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            categories: ["Flyer", "Branding", "Layout", "Website"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Blog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Byline used when a post has no author
    pub default_author: String,
    /// Number of posts shown in the landing page blog section
    pub teaser_count: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            default_author: "Nexa Creative Solutions".to_string(),
            teaser_count: 3,
        }
    }
}

/// Footer contact details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub tagline: String,
    pub phone: String,
    pub phone_href: String,
    pub email: String,
    pub email_href: String,
    pub socials: Vec<SocialLink>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        let socials = [
            ("X", "https://x.com/"),
            ("Threads", "https://www.threads.net/"),
            ("Facebook", "https://www.facebook.com/"),
            ("Behance", "https://www.behance.net/"),
            ("Instagram", "https://www.instagram.com/"),
        ]
        .iter()
        .map(|(name, url)| SocialLink {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();

        Self {
            tagline: "Enhancing online presence simply the best".to_string(),
            phone: "+254 797710074".to_string(),
            phone_href: "tel:0797710074".to_string(),
            email: "info@nexacreatives.com".to_string(),
            email_href: "mailto:nexacreatives@gmail.com".to_string(),
            socials,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}
