//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment or query value
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one path segment or query value
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/static/hero.png") // -> "/site/static/hero.png"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL for a static asset served from the public directory
pub fn asset_url(config: &SiteConfig, file: &str) -> String {
    if file.starts_with("http://") || file.starts_with("https://") || file.starts_with("//") {
        return file.to_string();
    }
    let encoded: Vec<String> = file
        .trim_start_matches('/')
        .split('/')
        .map(encode_segment)
        .collect();
    url_for(config, &format!("static/{}", encoded.join("/")))
}

/// Append query parameters, skipping empty values
///
/// # Examples
/// ```ignore
/// with_query("/", &[("category", "Branding"), ("view", "")], Some("portfolio"))
/// // -> "/?category=Branding#portfolio"
/// ```
pub fn with_query(path: &str, params: &[(&str, &str)], fragment: Option<&str>) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, encode_segment(v)))
        .collect();

    let mut url = path.to_string();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog/BlogPost/x"), "/site/blog/BlogPost/x");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_asset_url() {
        let config = SiteConfig::default();
        assert_eq!(asset_url(&config, "logo light.png"), "/static/logo%20light.png");
        assert_eq!(
            asset_url(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_with_query() {
        assert_eq!(
            with_query("/", &[("category", "Branding"), ("view", "")], Some("portfolio")),
            "/?category=Branding#portfolio"
        );
        assert_eq!(
            with_query("/", &[("view", "a b")], None),
            "/?view=a%20b"
        );
        assert_eq!(with_query("/", &[], None), "/");
    }
}
