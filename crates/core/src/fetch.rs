//! Content fetching from URLs, files, and stdin.
//!
//! This module retrieves raw page HTML over HTTP(S) for the article
//! fetcher, and plain text from local files or standard input for
//! single-text analysis.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{LexisError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (compatible; Lexis/0.3)"
                .to_string(),
        }
    }
}

/// Builds a reusable HTTP client honoring the configured timeout and User-Agent.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(LexisError::HttpError)
}

fn parse_url(url: &str) -> Result<Url> {
    let parsed_url = Url::parse(url).map_err(|e| LexisError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(LexisError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http:// or https://)",
            parsed_url.scheme()
        )));
    }

    Ok(parsed_url)
}

/// Fetches HTML with an existing client.
///
/// Follows redirects and fails on timeouts and non-success status codes.
pub async fn fetch_with_client(client: &Client, url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_url(url)?;

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                LexisError::Timeout { timeout: config.timeout }
            } else {
                LexisError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LexisError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await.map_err(|e| {
        if e.is_timeout() {
            LexisError::Timeout { timeout: config.timeout }
        } else {
            LexisError::HttpError(e)
        }
    })?;

    Ok(content)
}

/// Reads text content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(LexisError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(LexisError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(LexisError::from)?;

    Ok(buffer)
}
