pub mod catalog;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod search;
pub mod testutil;
pub mod traits;

pub use error::AppError;
pub use models::{
    JobCandidate, JobRecord, SearchConfig, SearchReport, SourceTag, UpsertOutcome,
};
pub use pipeline::SearchPipeline;
pub use search::JobSearch;
pub use traits::{JobStore, QueryEnhancer, SourceRegistry, Summarizer};
