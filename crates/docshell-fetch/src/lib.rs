//! docshell Document Fetcher
//!
//! One GET per call, `Accept: text/html`, no retry, no timeout, no cache.
//! A fetch succeeds only when the transport completes with a status in
//! 100–599 and the response carries a parseable HTML document.

mod document;
mod error;
mod fetcher;

pub use document::Document;
pub use error::FetchError;
pub use fetcher::{check_status, expect_document, parse_payload, DocumentFetcher, HttpFetcher};

pub type Result<T> = std::result::Result<T, FetchError>;
