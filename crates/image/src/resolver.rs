use std::{sync::Arc, time::Duration};

use moka::future::Cache;

use crate::{ImageSize, PLACEHOLDER, ThumbnailSource, Wikipedia, stock_photo_url};

pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Resolves a dish name to an image url, remembering answers for a while.
#[derive(Clone)]
pub struct ImageResolver {
    source: Arc<dyn ThumbnailSource>,
    cache: Cache<String, String>,
}

impl ImageResolver {
    pub fn new(source: Arc<dyn ThumbnailSource>, ttl: Duration) -> Self {
        Self::with_capacity(source, ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(source: Arc<dyn ThumbnailSource>, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { source, cache }
    }

    /// Vietnamese then English Wikipedia, each request bounded by `timeout`.
    pub fn wikipedia(ttl: Duration, capacity: u64, timeout: Duration) -> anyhow::Result<Self> {
        let source = Wikipedia::new(vec!["vi".to_owned(), "en".to_owned()], timeout)?;

        Ok(Self::with_capacity(Arc::new(source), ttl, capacity))
    }

    /// Thumbnail from the source when it has one, stock photo otherwise.
    pub async fn resolve(&self, name: &str, size: ImageSize) -> String {
        let name = name.trim();
        if name.is_empty() {
            return PLACEHOLDER.to_owned();
        }

        let key = format!("{}|{:?}", name.to_lowercase(), size.dimensions());
        if let Some(src) = self.cache.get(&key).await {
            return src;
        }

        let src = match self.source.thumbnail(name).await {
            Some(src) => src,
            None => stock_photo_url(name, size),
        };

        self.cache.insert(key, src.to_owned()).await;

        src
    }
}
