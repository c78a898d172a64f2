//! Generator module - builds page contexts and renders them with the
//! built-in Tera templates, either per request or to static files

use anyhow::Result;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::blog::PostView;
use crate::cms::{self, ContentClient};
use crate::content::{ImageEntry, Post};
use crate::forms::{ContactForm, FormInput, StatusLabel, Submission, SubscriptionForm};
use crate::helpers::{asset_url, format_optional, meta_generator, url_for, with_query};
use crate::portfolio::{selected_image, PortfolioFilter};
use crate::render::{plain_text, render_html, Serializers};
use crate::sections::{footer_services, nav_links, process_steps, service_cards};
use crate::templates::{
    AssetData, ButtonData, FilterButtonData, FormData, GalleryImageData, LayoutData,
    PortfolioData, PostCardData, PostDetailData, ServiceCardData, SiteData, TemplateRenderer,
    ThemeData,
};
use crate::Site;

/// Query parameters of the landing page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeQuery {
    /// Portfolio filter label
    pub category: Option<String>,
    /// Key of the image shown full screen
    pub view: Option<String>,
}

/// Content fetched for the landing page
#[derive(Debug, Clone, Default)]
pub struct HomeContent {
    pub posts: Vec<Post>,
    pub images: Vec<ImageEntry>,
}

impl HomeContent {
    /// Fetch posts and images concurrently. A failed fetch is logged and
    /// leaves its list empty.
    pub async fn fetch(client: &dyn ContentClient) -> Self {
        let (posts, images) = tokio::join!(cms::fetch_posts(client), cms::fetch_images(client));

        let posts = posts.unwrap_or_else(|e| {
            tracing::error!("Error fetching posts: {}", e);
            Vec::new()
        });
        let images = images.unwrap_or_else(|e| {
            tracing::error!("Error fetching images: {}", e);
            Vec::new()
        });

        Self { posts, images }
    }
}

/// Form state rendered into the landing page
#[derive(Debug, Clone, Default)]
pub struct FormViews {
    pub contact: Submission<ContactForm>,
    pub subscription: Submission<SubscriptionForm>,
}

/// Fetch posts for a detail page; `None` when the fetch did not complete
pub async fn fetch_post_list(client: &dyn ContentClient) -> Option<Vec<Post>> {
    match cms::fetch_posts(client).await {
        Ok(posts) => Some(posts),
        Err(e) => {
            tracing::error!("Error fetching posts: {}", e);
            None
        }
    }
}

/// Page renderer using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    serializers: Serializers,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            serializers: Serializers::default(),
        })
    }

    /// Replace the rich-text rules used for post bodies
    pub fn with_serializers(mut self, serializers: Serializers) -> Self {
        self.serializers = serializers;
        self
    }

    /// Render the landing page
    pub fn render_home(
        &self,
        content: &HomeContent,
        query: &HomeQuery,
        forms: &FormViews,
    ) -> Result<String> {
        let config = &self.site.config;
        let mut context = self.layout_context()?;

        context.insert(
            "assets",
            &AssetData {
                hero: asset_url(config, "hero.png"),
                intro: asset_url(config, "intro.png"),
                newsletter: asset_url(config, "pngegg.png"),
                contact: asset_url(config, "contactimg.png"),
            },
        );

        let services: Vec<ServiceCardData> = service_cards()
            .into_iter()
            .map(|card| ServiceCardData {
                name: card.name.to_string(),
                accent: card.accent.map(str::to_string),
                image_url: asset_url(config, card.image),
                rounded: card.rounded.to_string(),
            })
            .collect();
        context.insert("services", &services);
        context.insert("process", &process_steps());
        context.insert("portfolio", &self.build_portfolio(&content.images, query));
        context.insert("teasers", &self.build_teasers(&content.posts));
        context.insert(
            "subscription",
            &self.build_form(&forms.subscription, "subscribe", "subscribe", |f| {
                HashMap::from([("email".to_string(), f.email.clone())])
            }),
        );
        context.insert(
            "contact",
            &self.build_form(&forms.contact, "contact", "contact", |f| {
                HashMap::from([
                    ("name".to_string(), f.name.clone()),
                    ("email".to_string(), f.email.clone()),
                    ("subject".to_string(), f.subject.clone()),
                    ("message".to_string(), f.message.clone()),
                ])
            }),
        );

        self.renderer.render("index.html", &context)
    }

    /// Render a post detail page for the requested id
    ///
    /// `posts` is `None` when the post fetch did not complete; the page
    /// then shows the loading indicator.
    pub fn render_post(&self, posts: Option<&[Post]>, custom_id: &str) -> Result<String> {
        let config = &self.site.config;
        let view = PostView::resolve(posts, custom_id);
        let mut context = self.layout_context()?;

        let details: Vec<PostDetailData> = view
            .matches()
            .iter()
            .map(|post| PostDetailData {
                title: post.title.clone(),
                byline: post.byline(&config.blog.default_author).to_string(),
                month: format_optional(post.published_at.as_ref(), &config.month_format),
                image_url: post.image_url.clone(),
                content: render_html(&post.content_nodes(), &self.serializers),
            })
            .collect();

        let sidebar: Vec<PostCardData> = view.sidebar().iter().map(|p| self.post_card(p)).collect();

        context.insert("loading", &view.is_loading());
        context.insert("posts", &details);
        context.insert("sidebar", &sidebar);

        self.renderer.render("post.html", &context)
    }

    /// Fetch content and write the landing page plus one page per post
    pub async fn generate(&self, client: &dyn ContentClient) -> Result<()> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)?;

        self.copy_source_assets()?;

        let content = HomeContent::fetch(client).await;

        let html = self.render_home(&content, &HomeQuery::default(), &FormViews::default())?;
        fs::write(public_dir.join("index.html"), html)?;

        let mut seen = HashSet::new();
        let mut pages = 1;
        for post in &content.posts {
            if !seen.insert(post.custom_id.as_str()) {
                continue;
            }
            if !is_safe_segment(&post.custom_id) {
                tracing::warn!("Skipping post with unusable id {:?}", post.custom_id);
                continue;
            }

            let html = self.render_post(Some(content.posts.as_slice()), &post.custom_id)?;
            let dir = public_dir
                .join("blog")
                .join("BlogPost")
                .join(&post.custom_id);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("index.html"), html)?;
            tracing::debug!("Generated {}", post.path());
            pages += 1;
        }

        tracing::info!("Generated {} pages into {:?}", pages, public_dir);
        Ok(())
    }

    /// Data shared by every page: site, theme, navigation and footer
    fn layout_context(&self) -> Result<Context> {
        let config = &self.site.config;
        let layout = LayoutData {
            site: SiteData {
                title: config.title.clone(),
                description: config.description.clone(),
                language: config.language.clone(),
                root: url_for(config, "/"),
                stylesheet: asset_url(config, "css/site.css"),
                generator: meta_generator(),
                year: Utc::now().year(),
            },
            theme: ThemeData {
                name: config.theme.as_str().to_string(),
                section_class: config.theme.section_class().to_string(),
                footer_class: config.theme.footer_class().to_string(),
                logo_url: asset_url(config, config.theme.logo()),
            },
            nav: nav_links(),
            contact_info: config.contact.clone(),
            footer_services: footer_services(),
        };

        Ok(Context::from_serialize(&layout)?)
    }

    fn build_portfolio(&self, images: &[ImageEntry], query: &HomeQuery) -> PortfolioData {
        let config = &self.site.config;
        let root = url_for(config, "/");
        let filter = PortfolioFilter::parse(query.category.as_deref(), &config.portfolio.categories);
        let category = match &filter {
            PortfolioFilter::All => "",
            PortfolioFilter::Category(_) => query.category.as_deref().unwrap_or_default().trim(),
        };

        let labels = std::iter::once("All".to_string()).chain(config.portfolio.categories.iter().cloned());
        let filters = labels
            .map(|label| {
                let param = if label.eq_ignore_ascii_case("all") { "" } else { label.as_str() };
                FilterButtonData {
                    href: with_query(&root, &[("category", param)], Some("portfolio")),
                    active: filter.is_active(&label),
                    label,
                }
            })
            .collect();

        let visible = filter.apply(images);
        let gallery_item = |image: &ImageEntry| -> Option<GalleryImageData> {
            let key = image.key();
            image.image_url.as_ref().map(|url| GalleryImageData {
                title: image.title.clone(),
                image_url: url.clone(),
                href: with_query(
                    &root,
                    &[("category", category), ("view", key.as_str())],
                    Some("portfolio"),
                ),
            })
        };

        PortfolioData {
            filters,
            images: visible.iter().copied().filter_map(&gallery_item).collect(),
            selected: selected_image(&visible, query.view.as_deref()).and_then(&gallery_item),
            close_href: with_query(&root, &[("category", category)], Some("portfolio")),
        }
    }

    fn build_teasers(&self, posts: &[Post]) -> Vec<PostCardData> {
        posts
            .iter()
            .take(self.site.config.blog.teaser_count)
            .map(|post| self.post_card(post))
            .collect()
    }

    fn post_card(&self, post: &Post) -> PostCardData {
        PostCardData {
            title: post.title.clone(),
            path: url_for(&self.site.config, &post.path()),
            date: format_optional(post.published_at.as_ref(), &self.site.config.date_format),
            image_url: post.image_url.clone(),
            excerpt: plain_text(&post.content_nodes()),
        }
    }

    fn build_form<F: FormInput>(
        &self,
        submission: &Submission<F>,
        route: &str,
        anchor: &str,
        values: impl Fn(&F) -> HashMap<String, String>,
    ) -> FormData {
        let kind = F::KIND;
        let status = submission.status;
        let idle = StatusLabel::Idle;

        FormData {
            action: format!("{}#{}", url_for(&self.site.config, route), anchor),
            values: values(&submission.form),
            button: ButtonData {
                label: status.label.text(kind).to_string(),
                class: status.label.class(kind).to_string(),
                revert_after_ms: status.revert_after_ms(),
                idle_label: idle.text(kind).to_string(),
                idle_class: idle.class(kind).to_string(),
            },
        }
    }

    /// Copy the asset directory to `<public_dir>/static`
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            tracing::debug!("No asset directory at {:?}", source_dir);
            return Ok(());
        }
        let static_dir = self.site.public_dir.join("static");

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(source_dir)?;
                let dest = static_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

/// A post id usable as a single directory name
fn is_safe_segment(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && Path::new(id).components().count() == 1
}
