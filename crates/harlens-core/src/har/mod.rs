mod document;
mod loader;

pub use document::RawHarDocument;
pub use loader::HarLoader;
