//! Natural-language summaries of rule findings.
//!
//! The summarizer runs after rule evaluation and only reads its output.
//! Callers that must not fail use [`summarize_or_fallback`], which turns
//! any summarizer error into a short message.

pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;

pub use config::SummarizerConfig;
pub use error::{Error, Result};
pub use openai::OpenAiSummarizer;

use async_trait::async_trait;
use harlens_rules::AnalyzedRequest;

pub const NO_ISSUES_MESSAGE: &str = "No significant performance or reliability issues detected.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, requests: &[AnalyzedRequest]) -> Result<String>;
}

/// Summarize, reporting failures inline instead of returning them
pub async fn summarize_or_fallback(
    summarizer: &dyn Summarizer,
    requests: &[AnalyzedRequest],
) -> String {
    match summarizer.summarize(requests).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Summarizer failed: {}", e);
            format!("Summary failed: {}", e)
        }
    }
}
