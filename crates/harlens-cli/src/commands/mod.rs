pub mod analyze;
pub mod completion;
pub mod filter;
pub mod stats;

use anyhow::Result;
use harlens_core::{HarLoader, RequestRecord, extract};
use std::path::Path;

/// Load a HAR file and flatten it into request records
pub fn load_records(file: &Path) -> Result<Vec<RequestRecord>> {
    let doc = HarLoader::load(file)?;
    Ok(extract(&doc))
}
