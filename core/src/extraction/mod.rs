pub mod loader;
pub mod model;
pub mod parser;

pub use model::{DocumentKind, ExtractionResult, ExtractionStatus};
