//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::CmsConfig;
pub use site::ContactInfo;
pub use site::FormsConfig;
pub use site::PortfolioConfig;
pub use site::SiteConfig;
pub use site::Theme;
