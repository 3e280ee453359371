use std::{collections::HashMap, time::Duration};

use serde::Deserialize;

use crate::{ThumbnailSource, is_https};

#[derive(Debug, Default, Deserialize)]
struct PageImages {
    #[serde(default)]
    query: PageQuery,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    source: String,
}

/// Looks up page thumbnails on Wikipedia, trying each language edition in order.
#[derive(Clone)]
pub struct Wikipedia {
    client: reqwest::Client,
    languages: Vec<String>,
}

impl Wikipedia {
    pub fn new(languages: Vec<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("meal-planner/0.1")
            .build()?;

        Ok(Self { client, languages })
    }

    pub fn api_url(language: &str, title: &str) -> anyhow::Result<url::Url> {
        Ok(url::Url::parse_with_params(
            &format!("https://{language}.wikipedia.org/w/api.php"),
            &[
                ("action", "query"),
                ("titles", title),
                ("prop", "pageimages"),
                ("format", "json"),
                ("pithumbsize", "800"),
                ("redirects", "1"),
            ],
        )?)
    }

    async fn lookup(&self, language: &str, title: &str) -> anyhow::Result<Option<String>> {
        let url = Self::api_url(language, title)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: PageImages = response.json().await?;

        Ok(first_https_thumbnail(body))
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            languages: vec!["vi".to_owned(), "en".to_owned()],
        }
    }
}

fn first_https_thumbnail(body: PageImages) -> Option<String> {
    body.query
        .pages
        .into_values()
        .filter_map(|page| page.thumbnail)
        .map(|thumbnail| thumbnail.source)
        .find(|source| is_https(source))
}

#[async_trait::async_trait]
impl ThumbnailSource for Wikipedia {
    async fn thumbnail(&self, name: &str) -> Option<String> {
        for language in &self.languages {
            match self.lookup(language, name).await {
                Ok(Some(source)) => return Some(source),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(language, name, err = %err, "wikipedia lookup failed");
                }
            }
        }

        None
    }
}
