//! HTTP client wrapping reqwest.
//!
//! Not a browser — just HTTP requests with a cookie store. The cookie
//! store is what makes the session "authenticated" after login; every
//! subsequent request rides on it. Strictly one request at a time, no
//! retries: a failed fetch surfaces immediately and the run is re-run
//! by hand.

use crate::error::HarvestError;
use std::time::Duration;

/// A fetched page: final URL (post-redirect, needed to resolve relative
/// links) and body text.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// Cookie-holding HTTP client for portal navigation.
#[derive(Clone)]
pub struct PortalClient {
    client: reqwest::Client,
}

impl PortalClient {
    /// Create a client with a cookie store and an explicit per-request
    /// timeout. Moodle redirects aggressively around login, so redirects
    /// are followed (bounded) rather than surfaced.
    pub fn new(timeout_ms: u64) -> Result<Self, HarvestError> {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .cookie_store(true)
            .user_agent(ua)
            .build()?;

        Ok(Self { client })
    }

    /// GET a page and return its final URL and body.
    pub async fn get(&self, url: &str) -> Result<Page, HarvestError> {
        let resp = self.client.get(url).send().await?;
        let final_url = resp.url().to_string();
        let body = resp.text().await?;
        Ok(Page {
            url: final_url,
            body,
        })
    }

    /// POST url-encoded form fields and return the resulting page.
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Page, HarvestError> {
        let resp = self.client.post(url).form(fields).send().await?;
        let final_url = resp.url().to_string();
        let body = resp.text().await?;
        Ok(Page {
            url: final_url,
            body,
        })
    }
}

/// Resolve a possibly-relative href against the page it appeared on.
pub fn resolve_href(base_url: &str, href: &str) -> String {
    match url::Url::parse(base_url) {
        Ok(base) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        Err(_) => href.to_string(),
    }
}
