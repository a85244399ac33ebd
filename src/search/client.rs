use std::time::Duration;

use anyhow::{Context, anyhow};
use image::DynamicImage;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;

use crate::foundation::error::PartyResult;

/// SerpAPI search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search";
/// Provenance label used when a result carries no `source`.
pub const FALLBACK_SOURCE: &str = "Google Images";

/// A decoded image together with where it came from.
#[derive(Clone, Debug)]
pub struct FoundImage {
    /// Decoded pixels, non-zero in both dimensions.
    pub image: DynamicImage,
    /// Short provenance label, never blank.
    pub source: String,
}

/// Result of one search attempt.
///
/// Every provider failure collapses into [`SearchOutcome::NotFound`]; callers only ever branch
/// on presence.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A usable image was downloaded and decoded.
    Found(FoundImage),
    /// Nothing usable (no results, network failure, bad payloads).
    NotFound,
}

impl SearchOutcome {
    /// Return `true` for [`SearchOutcome::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Query-to-image lookup used by the fetch orchestrator.
pub trait ImageSearch {
    /// Look up `query` and return the first usable image.
    fn search(&self, query: &str) -> SearchOutcome;
}

impl<F> ImageSearch for F
where
    F: Fn(&str) -> SearchOutcome,
{
    fn search(&self, query: &str) -> SearchOutcome {
        self(query)
    }
}

/// Options for [`SerpApiClient`].
#[derive(Clone, Debug)]
pub struct SearchOpts {
    /// SerpAPI key.
    pub api_key: String,
    /// Search endpoint URL.
    pub endpoint: String,
    /// Results requested and inspected per query.
    pub num: usize,
    /// Value of the `safe` parameter.
    pub safe: String,
    /// Bound on the search request.
    pub search_timeout: Duration,
    /// Bound on each image download.
    pub download_timeout: Duration,
    /// `User-Agent` sent with image downloads.
    pub user_agent: String,
    /// Honor `HTTP(S)_PROXY` from the environment.
    pub use_env_proxy: bool,
}

impl Default for SearchOpts {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            num: 5,
            safe: "active".to_string(),
            search_timeout: Duration::from_secs(15),
            download_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0".to_string(),
            use_env_proxy: true,
        }
    }
}

impl SearchOpts {
    /// Default options carrying `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) images_results: Vec<ImageResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImageResult {
    #[serde(default)]
    pub(crate) original: Option<String>,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
    #[serde(default)]
    pub(crate) source: Option<String>,
}

impl ImageResult {
    /// Download candidates, full-size first.
    pub(crate) fn candidates(&self) -> impl Iterator<Item = &str> {
        [self.original.as_deref(), self.thumbnail.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub(crate) fn source_label(&self) -> String {
        match self.source.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => FALLBACK_SOURCE.to_string(),
        }
    }
}

/// Blocking SerpAPI Google Images client.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: Client,
    opts: SearchOpts,
}

impl SerpApiClient {
    /// Build a client. Only fails when the TLS backend cannot be initialized.
    pub fn new(opts: SearchOpts) -> PartyResult<Self> {
        let mut builder = Client::builder();
        if !opts.use_env_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().context("build http client")?;
        Ok(Self { http, opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &SearchOpts {
        &self.opts
    }

    fn query(&self, q: &str) -> anyhow::Result<SearchResponse> {
        let num = self.opts.num.to_string();
        let resp = self
            .http
            .get(&self.opts.endpoint)
            .query(&[
                ("engine", "google_images"),
                ("q", q),
                ("api_key", self.opts.api_key.as_str()),
                ("num", num.as_str()),
                ("safe", self.opts.safe.as_str()),
            ])
            .timeout(self.opts.search_timeout)
            .send()
            .context("search request")?
            .error_for_status()
            .context("search status")?;
        resp.json::<SearchResponse>().context("search payload")
    }

    fn download(&self, url: &str) -> anyhow::Result<DynamicImage> {
        let bytes = self
            .http
            .get(url)
            .header(USER_AGENT, &self.opts.user_agent)
            .timeout(self.opts.download_timeout)
            .send()?
            .error_for_status()?
            .bytes()?;
        let img = image::load_from_memory(&bytes).context("decode image")?;
        if img.width() == 0 || img.height() == 0 {
            return Err(anyhow!("empty image"));
        }
        Ok(img)
    }
}

impl ImageSearch for SerpApiClient {
    #[tracing::instrument(skip(self))]
    fn search(&self, query: &str) -> SearchOutcome {
        let resp = match self.query(query) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "image search failed");
                return SearchOutcome::NotFound;
            }
        };

        for result in resp.images_results.iter().take(self.opts.num) {
            for url in result.candidates() {
                match self.download(url) {
                    Ok(image) => {
                        let source = result.source_label();
                        tracing::debug!(url, source = source.as_str(), "image found");
                        return SearchOutcome::Found(FoundImage { image, source });
                    }
                    Err(e) => tracing::debug!(url, error = %format!("{e:#}"), "candidate skipped"),
                }
            }
        }
        tracing::debug!(results = resp.images_results.len(), "no usable image");
        SearchOutcome::NotFound
    }
}

#[cfg(test)]
#[path = "../../tests/unit/search/client.rs"]
mod tests;
