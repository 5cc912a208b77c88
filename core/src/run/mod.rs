pub mod pipeline;

pub use pipeline::{MeritPipeline, RunOutcome, RunSummary};
