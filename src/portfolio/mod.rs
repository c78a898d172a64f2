//! Portfolio gallery filtering

use crate::content::ImageEntry;

/// Active category filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PortfolioFilter {
    #[default]
    All,
    /// Lowercase category tag
    Category(String),
}

impl PortfolioFilter {
    /// Parse a filter button label; unknown or empty labels mean "All"
    pub fn parse(label: Option<&str>, categories: &[String]) -> Self {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return PortfolioFilter::All;
        };
        if label.eq_ignore_ascii_case("all") {
            return PortfolioFilter::All;
        }
        categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(label))
            .map(|c| PortfolioFilter::Category(c.to_lowercase()))
            .unwrap_or(PortfolioFilter::All)
    }

    /// Entries visible under this filter, in fetch order
    pub fn apply<'a>(&self, images: &'a [ImageEntry]) -> Vec<&'a ImageEntry> {
        images
            .iter()
            .filter(|image| self.matches(image))
            .collect()
    }

    pub fn matches(&self, image: &ImageEntry) -> bool {
        match self {
            PortfolioFilter::All => true,
            PortfolioFilter::Category(tag) => image.category.as_deref() == Some(tag.as_str()),
        }
    }

    /// Whether the button with `label` is the active one
    pub fn is_active(&self, label: &str) -> bool {
        match self {
            PortfolioFilter::All => label.eq_ignore_ascii_case("all"),
            PortfolioFilter::Category(tag) => label.eq_ignore_ascii_case(tag),
        }
    }
}

/// Image shown full screen, if the requested key is visible
pub fn selected_image<'a>(
    visible: &[&'a ImageEntry],
    key: Option<&str>,
) -> Option<&'a ImageEntry> {
    let key = key.filter(|k| !k.is_empty())?;
    visible.iter().copied().find(|image| image.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn categories() -> Vec<String> {
        vec!["Flyer".into(), "Branding".into(), "Layout".into(), "Website".into()]
    }

    fn images() -> Vec<ImageEntry> {
        serde_json::from_value(json!([
            {"title": "Logo", "category": "branding", "slug": {"current": "logo"}},
            {"title": "Poster", "category": "flyer"},
            {"title": "Identity", "category": "branding"},
            {"title": "Shop", "category": "website"},
            {"title": "Loose"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse() {
        let cats = categories();
        assert_eq!(PortfolioFilter::parse(None, &cats), PortfolioFilter::All);
        assert_eq!(PortfolioFilter::parse(Some("All"), &cats), PortfolioFilter::All);
        assert_eq!(
            PortfolioFilter::parse(Some("Branding"), &cats),
            PortfolioFilter::Category("branding".to_string())
        );
        assert_eq!(
            PortfolioFilter::parse(Some("branding"), &cats),
            PortfolioFilter::Category("branding".to_string())
        );
        assert_eq!(PortfolioFilter::parse(Some("Sculpture"), &cats), PortfolioFilter::All);
    }

    #[test]
    fn test_branding_filter_is_exact_subset() {
        let images = images();
        let filter = PortfolioFilter::parse(Some("branding"), &categories());
        let titles: Vec<_> = filter.apply(&images).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Logo", "Identity"]);
    }

    #[test]
    fn test_all_filter_shows_everything() {
        let images = images();
        assert_eq!(PortfolioFilter::All.apply(&images).len(), images.len());
    }

    #[test]
    fn test_active_button() {
        let filter = PortfolioFilter::Category("layout".to_string());
        assert!(filter.is_active("Layout"));
        assert!(!filter.is_active("All"));
        assert!(PortfolioFilter::All.is_active("All"));
    }

    #[test]
    fn test_selected_image() {
        let images = images();
        let visible = PortfolioFilter::All.apply(&images);
        assert_eq!(selected_image(&visible, Some("logo")).unwrap().title, "Logo");
        assert_eq!(selected_image(&visible, Some("poster")).unwrap().title, "Poster");
        assert!(selected_image(&visible, Some("nope")).is_none());
        assert!(selected_image(&visible, None).is_none());

        let flyers = PortfolioFilter::Category("flyer".to_string());
        let visible = flyers.apply(&images);
        assert!(selected_image(&visible, Some("logo")).is_none());
    }

    #[test]
    fn test_same_titled_images_select_by_url() {
        let images: Vec<ImageEntry> = serde_json::from_value(json!([
            {"title": "Flyer", "category": "flyer", "imageUrl": "https://cdn.example.com/one.png"},
            {"title": "Flyer", "category": "flyer", "imageUrl": "https://cdn.example.com/two.png"}
        ]))
        .unwrap();
        let visible = PortfolioFilter::All.apply(&images);

        let picked = selected_image(&visible, Some("https://cdn.example.com/two.png")).unwrap();
        assert_eq!(picked.image_url.as_deref(), Some("https://cdn.example.com/two.png"));
    }
}
