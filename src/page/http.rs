//! A page backend that fetches storefront documents over HTTP.
//!
//! Thin shim over [`HtmlPage`]: an HTTP GET retrieves the markup, parsing
//! and element access are delegated. Unlike the in-memory backends,
//! `navigate` actually follows the target (resolved against the current
//! URL), which makes the checkout redirect observable end to end.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use url::Url;

use crate::{Error, Page, Result};

use super::html::{AddToCartControl, HtmlPage};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const USER_AGENT: &str = concat!("shopfront/", env!("CARGO_PKG_VERSION"));

/// A page backend fetched over HTTP
pub struct HttpPage {
    client: Client,
    current: Url,
    inner: HtmlPage,
    visited: Vec<String>,
}

impl HttpPage {
    /// Fetch and parse the document at `url`
    pub fn fetch(url: &str) -> Result<Self> {
        Self::fetch_with_timeout(url, DEFAULT_TIMEOUT_MS)
    }

    /// Fetch with an explicit request timeout
    pub fn fetch_with_timeout(url: &str, timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| Error::Load(format!("Failed to build HTTP client: {}", e)))?;

        let current = Url::parse(url).map_err(|e| Error::Load(format!("Invalid URL '{}': {}", url, e)))?;
        let inner = Self::get(&client, &current)?;

        Ok(Self {
            client,
            current,
            inner,
            visited: vec![url.to_string()],
        })
    }

    fn get(client: &Client, url: &Url) -> Result<HtmlPage> {
        let res = client
            .get(url.clone())
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| Error::Load(format!("HTTP GET failed: {}", e)))?;

        let body = res
            .text()
            .map_err(|e| Error::Load(format!("Failed to read response body: {}", e)))?;

        Ok(HtmlPage::parse(&body))
    }

    /// URL of the currently loaded document
    pub fn current_url(&self) -> &str {
        self.current.as_str()
    }

    /// Every URL fetched so far, oldest first
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// The add-to-cart controls of the current document
    pub fn add_to_cart_controls(&self) -> &[AddToCartControl] {
        self.inner.add_to_cart_controls()
    }
}

impl Page for HttpPage {
    fn text_of(&self, id: &str) -> Result<String> {
        self.inner.text_of(id)
    }

    fn set_text(&mut self, id: &str, value: &str) -> Result<()> {
        self.inner.set_text(id, value)
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        let target = self
            .current
            .join(url)
            .map_err(|e| Error::Navigation(format!("Invalid target '{}': {}", url, e)))?;
        debug!("navigating to {}", target);
        self.inner = Self::get(&self.client, &target)?;
        self.current = target;
        self.visited.push(self.current.to_string());
        Ok(())
    }
}
