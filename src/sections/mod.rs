//! Static landing page content

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCard {
    pub name: &'static str,
    pub accent: Option<&'static str>,
    pub image: &'static str,
    pub rounded: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessStep {
    pub name: &'static str,
    pub desc: &'static str,
}

/// Header and footer quick links
pub fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink { name: "Home", href: "/#" },
        NavLink { name: "About", href: "/#about" },
        NavLink { name: "Services", href: "/#services" },
        NavLink { name: "Portfolio", href: "/#portfolio" },
        NavLink { name: "Blog", href: "/#blog" },
        NavLink { name: "Contact", href: "/#contact" },
    ]
}

pub fn service_cards() -> Vec<ServiceCard> {
    vec![
        ServiceCard {
            name: "Graphic Design",
            accent: None,
            image: "graphic.png",
            rounded: "rounded-2xl",
        },
        ServiceCard {
            name: "Web Design",
            accent: None,
            image: "webdesign.png",
            rounded: "rounded-[2.5rem]",
        },
        ServiceCard {
            name: "Social Media",
            accent: Some("Marketing"),
            image: "media.png",
            rounded: "rounded-[2.5rem]",
        },
    ]
}

pub fn process_steps() -> Vec<ProcessStep> {
    [
        ("Discover", "Understanding your goals, audience and brand"),
        ("Define", "Shaping the scope, structure and message"),
        ("Design", "Crafting visuals and experiences that stand out"),
        ("Launch", "Shipping, measuring and refining together"),
    ]
    .into_iter()
    .map(|(name, desc)| ProcessStep { name, desc })
    .collect()
}

/// Footer services column
pub fn footer_services() -> Vec<&'static str> {
    vec![
        "Graphic Design",
        "Social Media",
        "Web Design & Development",
        "Digital Marketing",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_sections() {
        assert_eq!(service_cards().len(), 3);
        assert_eq!(process_steps().len(), 4);
        assert!(nav_links().iter().any(|l| l.href == "/#contact"));
    }
}
