pub mod etl;
pub mod filter;
pub mod pipeline;

pub use crate::domain::model::{CourseRecord, FetchMode, LoadReport, RawCourse, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
