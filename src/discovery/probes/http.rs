use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

use crate::discovery::results::HttpDetails;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
}

/// Web prober issuing `GET /` over plain or encrypted transport.
///
/// Invalid and self-signed certificates are accepted: discovery is about
/// protocol presence, not trust validation. Redirects are not followed so
/// the status code belongs to the probed port itself.
pub struct HttpProber {
    client: Option<Client>,
}

impl HttpProber {
    pub fn new(probe_timeout: Duration) -> Self {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::none())
            .timeout(probe_timeout)
            .build()
            .ok();
        Self { client }
    }

    /// Fetch `/` and pull out status, `server` header and page title.
    /// `None` on any network error or timeout; that is the normal outcome
    /// on open ports that do not speak this protocol.
    pub async fn fetch(&self, host: &str, port: u16, secure: bool) -> Option<HttpDetails> {
        let client = self.client.as_ref()?;
        let scheme = if secure { "https" } else { "http" };
        let url = format!("{scheme}://{host}:{port}/");

        let response = client.get(&url).send().await.ok()?;
        let status = response.status().as_u16();
        let server = response
            .headers()
            .get("server")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.ok()?;
        let title = extract_title(&body);

        debug!(%url, status, "web exchange completed");
        Some(HttpDetails { status, server, title })
    }
}

/// First case-insensitive `<title>` in the document, trimmed.
fn extract_title(body: &str) -> Option<String> {
    TITLE_RE
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}
