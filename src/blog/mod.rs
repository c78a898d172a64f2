//! Blog post detail view

use crate::content::Post;

/// What the detail page shows for a requested post id
#[derive(Debug, Clone)]
pub enum PostView<'a> {
    /// Posts have not been fetched (the fetch did not complete)
    Loading,
    /// Posts were fetched but none carries the requested id
    Empty { sidebar: &'a [Post] },
    /// One or more posts carry the requested id
    Matched {
        posts: Vec<&'a Post>,
        sidebar: &'a [Post],
    },
}

impl<'a> PostView<'a> {
    /// Resolve the view from the fetch result and the route parameter
    pub fn resolve(posts: Option<&'a [Post]>, custom_id: &str) -> Self {
        let Some(posts) = posts else {
            return PostView::Loading;
        };

        let matched: Vec<&Post> = posts.iter().filter(|p| p.custom_id == custom_id).collect();
        if matched.is_empty() {
            PostView::Empty { sidebar: posts }
        } else {
            PostView::Matched {
                posts: matched,
                sidebar: posts,
            }
        }
    }

    /// Posts selected for the detail area
    pub fn matches(&self) -> &[&'a Post] {
        match self {
            PostView::Matched { posts, .. } => posts,
            _ => &[],
        }
    }

    /// All fetched posts, listed beside the detail area
    pub fn sidebar(&self) -> &'a [Post] {
        match self {
            PostView::Loading => &[],
            PostView::Empty { sidebar } | PostView::Matched { sidebar, .. } => *sidebar,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PostView::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts() -> Vec<Post> {
        serde_json::from_value(json!([
            {"title": "One", "customId": "one"},
            {"title": "Two", "customId": "two"},
            {"title": "Two again", "customId": "two"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_loading_without_fetch() {
        let view = PostView::resolve(None, "one");
        assert!(view.is_loading());
        assert!(view.matches().is_empty());
        assert!(view.sidebar().is_empty());
    }

    #[test]
    fn test_unknown_id_is_empty_not_error() {
        let posts = posts();
        let view = PostView::resolve(Some(&posts), "missing");
        assert!(matches!(view, PostView::Empty { .. }));
        assert!(view.matches().is_empty());
        assert_eq!(view.sidebar().len(), 3);
    }

    #[test]
    fn test_all_matches_are_kept() {
        let posts = posts();
        let view = PostView::resolve(Some(&posts), "two");
        let titles: Vec<_> = view.matches().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Two", "Two again"]);
    }
}
