use super::document::RawHarDocument;
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub struct HarLoader;

impl HarLoader {
    /// Read and decode a HAR file from the given path
    pub fn load(path: &Path) -> Result<RawHarDocument> {
        tracing::debug!("Reading HAR file from: {}", path.display());

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }

        let doc = Self::from_str(&contents)?;

        tracing::info!(
            "Successfully loaded HAR file with {} entries",
            doc.entries().len()
        );

        Ok(doc)
    }

    /// Decode a HAR document from a JSON string.
    ///
    /// Blank input is a parse error here; [`HarLoader::load`] reports a blank
    /// file as [`Error::EmptyFile`] with its path.
    pub fn from_str(content: &str) -> Result<RawHarDocument> {
        tracing::debug!("Parsing HAR from string");

        let doc: RawHarDocument = serde_json::from_str(content)?;
        Ok(doc)
    }
}
