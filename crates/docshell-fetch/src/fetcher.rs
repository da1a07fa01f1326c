//! Document fetcher

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use url::Url;

use crate::document::Document;
use crate::error::FetchError;
use crate::Result;

const DOCUMENT_MIME_TYPES: [&str; 4] = [
    "text/html",
    "application/xhtml+xml",
    "application/xml",
    "text/xml",
];

/// Single-shot retrieval of a document resource
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Document>;
}

/// [`DocumentFetcher`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Document> {
        tracing::debug!(url = %url, "Fetching document");

        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // Checked as soon as headers arrive, before the body completes.
        check_status(resp.status().as_u16())?;

        let final_url = resp.url().clone();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Aborted(e.to_string()))?;

        let doc = expect_document(parse_payload(final_url, content_type.as_deref(), body))?;

        tracing::debug!(
            url = %url,
            title = ?doc.title(),
            "Fetched document"
        );

        Ok(doc)
    }
}

/// Reject statuses outside the valid HTTP range
pub fn check_status(status: u16) -> Result<()> {
    if !(100..=599).contains(&status) {
        return Err(FetchError::InvalidStatus(status));
    }
    Ok(())
}

/// Require a parsed document from a completed transport
pub fn expect_document(payload: Option<Document>) -> Result<Document> {
    payload.ok_or(FetchError::NoParsedDocument)
}

/// Parse a response body into a document, if the response is one.
///
/// Only HTML and XML media types yield a document, and an empty body never does.
pub fn parse_payload(url: Url, content_type: Option<&str>, body: String) -> Option<Document> {
    let mime = content_type?
        .split(';')
        .next()
        .map(|s| s.trim().to_ascii_lowercase())?;

    let is_document = DOCUMENT_MIME_TYPES.contains(&mime.as_str()) || mime.ends_with("+xml");
    if !is_document || body.trim().is_empty() {
        return None;
    }

    Some(Document::parse(url, body))
}
