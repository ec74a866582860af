//! Data model: artwork records and pages

mod artwork;
mod page;

pub use artwork::*;
pub use page::*;
