use crate::core::{CourseRecord, LoadReport, Pipeline};
use crate::utils::error::{CatalogError, Result};
use std::fmt::Write as _;
use std::time::Instant;

const PREVIEW_ROWS: usize = 10;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadReport> {
        let started = Instant::now();
        tracing::info!("Starting catalog scan...");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Raw results from API: {} courses", raw_data.len());
        if raw_data.is_empty() {
            return Err(CatalogError::NoResults {
                message: "the catalog API returned no courses".to_string(),
            });
        }

        // Transform
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "After dedup + filtering: {} of {} courses",
            transformed.records.len(),
            transformed.raw_count
        );
        if transformed.records.is_empty() {
            return Err(CatalogError::NoResults {
                message: "no course descriptions matched after filtering".to_string(),
            });
        }

        println!("{}", format_preview(&transformed.records, PREVIEW_ROWS));

        // Load
        let report = self.pipeline.load(&transformed.records).await?;
        tracing::info!("Finished in {:.1?}", started.elapsed());

        Ok(report)
    }
}

/// Console table of the first `limit` records.
pub fn format_preview(records: &[CourseRecord], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Preview (first {} matches):", limit.min(records.len()));
    let _ = writeln!(out, "  {:<10} {:<8} {:<45} {}", "Subject", "Number", "Title", "Units");
    let _ = writeln!(out, "  {} {} {} {}", "-".repeat(10), "-".repeat(8), "-".repeat(45), "-".repeat(5));

    for record in records.iter().take(limit) {
        let title: String = record.title.chars().take(45).collect();
        let _ = writeln!(
            out,
            "  {:<10} {:<8} {:<45} {}",
            record.subject_area, record.course_number, title, record.units
        );
    }

    if records.len() > limit {
        let _ = writeln!(out, "  ... and {} more.", records.len() - limit);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawCourse, TransformResult};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedPipeline {
        raw: Vec<RawCourse>,
        keep: bool,
        loaded: AtomicBool,
    }

    impl FixedPipeline {
        fn new(raw: Vec<RawCourse>, keep: bool) -> Self {
            Self {
                raw,
                keep,
                loaded: AtomicBool::new(false),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<Vec<RawCourse>> {
            Ok(self.raw.clone())
        }

        async fn transform(&self, data: Vec<RawCourse>) -> Result<TransformResult> {
            let raw_count = data.len();
            let records = if self.keep {
                data.into_iter().map(CourseRecord::from).collect()
            } else {
                Vec::new()
            };
            Ok(TransformResult { records, raw_count })
        }

        async fn load(&self, records: &[CourseRecord]) -> Result<LoadReport> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok(LoadReport {
                spreadsheet_path: PathBuf::from("out.xlsx"),
                csv_path: None,
                rows: records.len(),
            })
        }
    }

    fn raw_course() -> RawCourse {
        serde_json::from_value(serde_json::json!({
            "subj_area_cd": "PHYSICS",
            "course_title": "1A. Mechanics",
            "crs_desc": "Requisite: Mathematics 31A."
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_loads_filtered_records() {
        let engine = EtlEngine::new(FixedPipeline::new(vec![raw_course()], true));
        let report = engine.run().await.unwrap();

        assert_eq!(report.rows, 1);
        assert!(engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_without_raw_results_fails() {
        let engine = EtlEngine::new(FixedPipeline::new(vec![], true));
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, CatalogError::NoResults { .. }));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_without_matches_writes_nothing() {
        let engine = EtlEngine::new(FixedPipeline::new(vec![raw_course()], false));
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, CatalogError::NoResults { .. }));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[test]
    fn test_preview_truncates_long_lists() {
        let records: Vec<CourseRecord> = (1..=12)
            .map(|n| CourseRecord::new("MATH", format!("{}", 100 + n), "Topic", "Math 31A"))
            .collect();

        let preview = format_preview(&records, 10);
        assert!(preview.contains("Preview (first 10 matches):"));
        assert!(preview.contains("110"));
        assert!(!preview.contains("111"));
        assert!(preview.contains("... and 2 more."));
    }
}
