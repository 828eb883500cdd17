pub mod catalog;
pub mod session;

pub use catalog::CatalogTabs;
pub use session::BrowserSession;
