use crate::domain::model::{CourseRecord, FetchMode, LoadReport, RawCourse, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes the whole buffer, replacing any existing file at `path`.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn output_path(&self) -> &Path;
    fn write_csv(&self) -> bool;
    fn fetch_mode(&self) -> FetchMode;
    /// Subject codes to enumerate in thorough mode; empty means "ask the API".
    fn subjects(&self) -> &[String];
    fn request_delay(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawCourse>>;
    async fn transform(&self, data: Vec<RawCourse>) -> Result<TransformResult>;
    async fn load(&self, records: &[CourseRecord]) -> Result<LoadReport>;
}
