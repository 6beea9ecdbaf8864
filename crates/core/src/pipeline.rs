//! Per-article pipeline: fetch, extract, measure.
//!
//! [`ArticlePipeline::analyze`] is the fallible path and returns the fetch
//! or extraction error as-is. [`ArticlePipeline::run_one`] is what batch
//! runs call: it never fails and turns any error into a zero row that
//! keeps the input's `URL_ID` and `URL`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::artifact::ArticleArtifact;
use crate::extract::{ExtractedArticle, extract_article};
use crate::fetch::{FetchConfig, build_client, fetch_with_client};
use crate::lexicon::Lexicon;
use crate::metrics::{MetricRecord, analyze_article};
use crate::table::{InputRecord, OutputRow};
use crate::{LexisError, Result};

/// Source of article title and text for a URL.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ExtractedArticle>;
}

/// Fetches pages over HTTP and extracts their main text.
#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpArticleFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str) -> Result<ExtractedArticle> {
        let html = fetch_with_client(&self.client, url, &self.config).await?;
        extract_article(&html)
    }
}

/// Maps one input record to one output row.
#[derive(Clone)]
pub struct ArticlePipeline {
    fetcher: Arc<dyn ArticleFetcher>,
    lexicon: Arc<Lexicon>,
    artifacts: Option<ArticleArtifact>,
}

impl ArticlePipeline {
    pub fn new(fetcher: Arc<dyn ArticleFetcher>, lexicon: Arc<Lexicon>) -> Self {
        Self { fetcher, lexicon, artifacts: None }
    }

    /// Saves extracted text of every successful article under `dir`.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts = Some(ArticleArtifact::new(dir.into()));
        self
    }

    /// Fetches and measures one article.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, or [`LexisError::NoContent`] when the
    /// page had no extractable text.
    pub async fn analyze(&self, record: &InputRecord) -> Result<MetricRecord> {
        debug!(url_id = %record.url_id, url = %record.url, "analyzing article");

        let article = self.fetcher.fetch(&record.url).await?;
        if article.is_empty() {
            return Err(LexisError::NoContent);
        }

        if let Some(artifacts) = &self.artifacts
            && let Err(e) = artifacts.write(&record.url_id, &article.title, &article.content)
        {
            warn!(url_id = %record.url_id, error = %e, "could not write extracted text");
        }

        Ok(analyze_article(&article.content, &self.lexicon))
    }

    /// Like [`ArticlePipeline::analyze`], but failures become a zero row.
    pub async fn run_one(&self, record: &InputRecord) -> OutputRow {
        match self.analyze(record).await {
            Ok(metrics) => OutputRow::new(record, metrics),
            Err(e) => {
                warn!(url_id = %record.url_id, url = %record.url, error = %e, "article failed, recording zero row");
                OutputRow::zero(record)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct StubFetcher {
        pages: HashMap<String, ExtractedArticle>,
    }

    #[async_trait]
    impl ArticleFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<ExtractedArticle> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| LexisError::HttpStatus { status: 404, url: url.to_string() })
        }
    }

    fn pipeline() -> ArticlePipeline {
        let mut pages = HashMap::new();
        pages.insert(
            "https://a.test/".to_string(),
            ExtractedArticle { title: "A".to_string(), content: "I love this. We love it too!".to_string() },
        );
        pages.insert("https://empty.test/".to_string(), ExtractedArticle::default());

        let lexicon = Lexicon::new(["love"], Vec::<&str>::new(), Vec::<&str>::new());
        ArticlePipeline::new(Arc::new(StubFetcher { pages }), Arc::new(lexicon))
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let metrics = pipeline().analyze(&InputRecord::new("1", "https://a.test/")).await.unwrap();
        assert_eq!(metrics.positive_score, 2);
        assert_eq!(metrics.personal_pronouns, 2);
    }

    #[tokio::test]
    async fn test_analyze_propagates_fetch_error() {
        let result = pipeline().analyze(&InputRecord::new("2", "https://missing.test/")).await;
        assert!(matches!(result, Err(LexisError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_analyze_empty_content() {
        let result = pipeline().analyze(&InputRecord::new("3", "https://empty.test/")).await;
        assert!(matches!(result, Err(LexisError::NoContent)));
    }

    #[tokio::test]
    async fn test_run_one_zero_row_keeps_identity() {
        let row = pipeline().run_one(&InputRecord::new("2", "https://missing.test/")).await;
        assert_eq!(row.url_id, "2");
        assert_eq!(row.url, "https://missing.test/");
        assert!(row.metrics.is_zero());
    }

    #[tokio::test]
    async fn test_artifact_written_on_success() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline().with_artifact_dir(tmp.path());

        pipeline.run_one(&InputRecord::new("1", "https://a.test/")).await;
        pipeline.run_one(&InputRecord::new("3", "https://empty.test/")).await;

        let written = std::fs::read_to_string(tmp.path().join("1.txt")).unwrap();
        assert!(written.starts_with("Title: A\n\nContent:\nI love this."));
        assert!(!tmp.path().join("3.txt").exists());
    }

    #[tokio::test]
    async fn test_http_fetcher_invalid_url() {
        let fetcher = HttpArticleFetcher::new(FetchConfig::default()).unwrap();
        assert!(matches!(fetcher.fetch("not-a-url").await, Err(LexisError::InvalidUrl(_))));
    }
}
