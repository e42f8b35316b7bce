pub mod analysis;
pub mod derive;
pub mod error;
pub mod extract;
pub mod filter;
pub mod har;

pub use error::{Error, Result};
pub use extract::{Header, RequestRecord, extract};
pub use har::{HarLoader, RawHarDocument};
