pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use core::{etl::EtlEngine, filter::MatchFilter, pipeline::CatalogPipeline};
pub use domain::model::{CourseLevel, CourseRecord, FetchMode, TargetCourse};
pub use utils::error::{CatalogError, Result};
