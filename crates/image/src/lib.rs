mod resolver;
mod size;
mod wikipedia;

pub use resolver::*;
pub use size::*;
pub use wikipedia::*;

/// Served when a dish has no name to search for.
pub const PLACEHOLDER: &str = "/page/images/dishes/placeholder.jpg";

/// Somewhere a dish thumbnail can be looked up by name.
#[async_trait::async_trait]
pub trait ThumbnailSource: Send + Sync {
    async fn thumbnail(&self, name: &str) -> Option<String>;
}

pub(crate) fn is_https(value: &str) -> bool {
    value.trim().to_lowercase().starts_with("https://")
}
