use std::time::Duration;

use anyhow::{Context, bail};
use serde_json::Value;
use tracing::debug;

use crate::config::CatalogSettings;

use super::model::Track;

/// Search backend returning normalized tracks.
pub trait Catalog: Send + Sync {
    fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Track>>;
}

/// Build a `ureq` agent with a global timeout so fetches fail softly instead
/// of hanging.
pub fn http_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .user_agent(concat!("sintonia/", env!("CARGO_PKG_VERSION")))
        .build();
    ureq::Agent::new_with_config(config)
}

/// Catalog backed by an Invidious-compatible `/api/v1/search` endpoint.
pub struct HttpCatalog {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(settings: &CatalogSettings) -> Self {
        Self {
            agent: http_agent(Duration::from_secs(settings.timeout_secs)),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Catalog for HttpCatalog {
    fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Track>> {
        let url = format!("{}/api/v1/search", self.base_url);
        debug!(%url, query, "catalog search");

        let body = self
            .agent
            .get(&url)
            .query("q", query)
            .query("type", "video")
            .call()
            .with_context(|| format!("request to {url} failed"))?
            .body_mut()
            .read_to_string()
            .context("reading search response")?;

        let json: Value = serde_json::from_str(&body).context("search response is not JSON")?;
        parse_results(&json, &self.base_url, limit)
    }
}

/// Turn a search response body into at most `limit` tracks.
///
/// Accepts either a bare array or an object with a `results`/`items` array.
pub fn parse_results(json: &Value, base_url: &str, limit: usize) -> anyhow::Result<Vec<Track>> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(obj) => match obj
            .get("results")
            .or_else(|| obj.get("items"))
            .and_then(Value::as_array)
        {
            Some(items) => items,
            None => {
                if let Some(err) = obj.get("error").and_then(Value::as_str) {
                    bail!("search service error: {err}");
                }
                bail!("unexpected search response shape");
            }
        },
        _ => bail!("unexpected search response shape"),
    };

    Ok(items
        .iter()
        .filter_map(|item| Track::from_search_item(item, base_url))
        .take(limit)
        .collect())
}
