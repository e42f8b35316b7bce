use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No API key configured for the summarizer")]
    MissingApiKey,

    #[error("Summary request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summary API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Summary API returned no content")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;
