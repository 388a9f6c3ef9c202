pub mod etl;
pub mod pipeline;
pub mod summary;
pub mod table;

pub use crate::domain::model::{PostingFacts, RawPosting, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
