//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on for the
//! `.html` templates; pre-rendered post bodies are marked `safe`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::ContactInfo;
use crate::sections::NavLink;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("nexa/layout.html")),
            ("index.html", include_str!("nexa/index.html")),
            ("post.html", include_str!("nexa/post.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("nexa/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("nexa/partials/footer.html"),
            ),
            ("partials/hero.html", include_str!("nexa/partials/hero.html")),
            (
                "partials/introduction.html",
                include_str!("nexa/partials/introduction.html"),
            ),
            (
                "partials/services.html",
                include_str!("nexa/partials/services.html"),
            ),
            (
                "partials/portfolio.html",
                include_str!("nexa/partials/portfolio.html"),
            ),
            ("partials/blog.html", include_str!("nexa/partials/blog.html")),
            (
                "partials/subscription.html",
                include_str!("nexa/partials/subscription.html"),
            ),
            (
                "partials/contact.html",
                include_str!("nexa/partials/contact.html"),
            ),
            (
                "partials/loader.html",
                include_str!("nexa/partials/loader.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub root: String,
    pub stylesheet: String,
    pub generator: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeData {
    pub name: String,
    pub section_class: String,
    pub footer_class: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetData {
    pub hero: String,
    pub intro: String,
    pub newsletter: String,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCardData {
    pub name: String,
    pub accent: Option<String>,
    pub image_url: String,
    pub rounded: String,
}

/// Sidebar entry and landing page teaser
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub title: String,
    pub path: String,
    pub date: String,
    pub image_url: Option<String>,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailData {
    pub title: String,
    pub byline: String,
    pub month: String,
    pub image_url: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterButtonData {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryImageData {
    pub title: String,
    pub image_url: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioData {
    pub filters: Vec<FilterButtonData>,
    pub images: Vec<GalleryImageData>,
    pub selected: Option<GalleryImageData>,
    pub close_href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonData {
    pub label: String,
    pub class: String,
    pub revert_after_ms: Option<u64>,
    pub idle_label: String,
    pub idle_class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormData {
    pub action: String,
    pub values: HashMap<String, String>,
    pub button: ButtonData,
}

/// Everything the layout and its partials read
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub site: SiteData,
    pub theme: ThemeData,
    pub nav: Vec<NavLink>,
    pub contact_info: ContactInfo,
    pub footer_services: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_truncate_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let value = truncate_chars_filter(&tera::Value::from("Hello World"), &args).unwrap();
        assert_eq!(value, tera::Value::from("Hello..."));

        let short = truncate_chars_filter(&tera::Value::from("Hi"), &args).unwrap();
        assert_eq!(short, tera::Value::from("Hi"));
    }
}
