use crate::adapters::export::{render_csv, render_workbook};
use crate::adapters::http::CatalogClient;
use crate::core::filter::MatchFilter;
use crate::core::{
    ConfigProvider, CourseRecord, FetchMode, LoadReport, Pipeline, RawCourse, Storage,
    TransformResult,
};
use crate::domain::model::TargetCourse;
use crate::utils::error::Result;

/// Fetch → filter → export over the course-catalog API.
pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: CatalogClient,
    target: TargetCourse,
    filter: MatchFilter,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Self::with_target(storage, config, TargetCourse::default())
    }

    pub fn with_target(storage: S, config: C, target: TargetCourse) -> Result<Self> {
        let client = CatalogClient::new(config.api_base())?;
        let filter = MatchFilter::new(&target)?;
        Ok(Self {
            storage,
            config,
            client,
            target,
            filter,
        })
    }

    pub fn target(&self) -> &TargetCourse {
        &self.target
    }

    async fn fetch_by_search(&self) -> Result<Vec<RawCourse>> {
        let query = self.target.search_query();
        tracing::info!("🔎 Querying search endpoint for '{}'", query);
        self.client.search(&query).await
    }

    async fn subject_codes(&self) -> Result<Vec<String>> {
        if !self.config.subjects().is_empty() {
            return Ok(self
                .config
                .subjects()
                .iter()
                .map(|code| code.trim().to_string())
                .collect());
        }

        let areas = self.client.subject_areas().await?;
        Ok(areas
            .into_iter()
            .map(|area| area.subj_area_cd.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect())
    }

    /// One request per subject area, strictly in sequence. A failed subject
    /// is logged and skipped; the rest of the run carries on.
    async fn fetch_all_subjects(&self) -> Result<Vec<RawCourse>> {
        let codes = self.subject_codes().await?;
        let total = codes.len();
        tracing::info!("📚 Fetching {} subject areas one at a time", total);

        let delay = self.config.request_delay();
        let mut courses = Vec::new();
        let mut failed = Vec::new();

        for (i, code) in codes.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.client.courses_for_subject(code).await {
                Ok(batch) => {
                    let hits = batch
                        .iter()
                        .filter(|c| self.filter.matches(&c.crs_desc))
                        .count();
                    tracing::info!(
                        "[{:>3}/{}] {:<12} {} course(s), {} match(es)",
                        i + 1,
                        total,
                        code,
                        batch.len(),
                        hits
                    );
                    courses.extend(batch);
                }
                Err(e) => {
                    tracing::warn!("⚠️  [{:>3}/{}] Skipping subject {}: {}", i + 1, total, code, e);
                    failed.push(code.clone());
                }
            }
        }

        if !failed.is_empty() {
            tracing::warn!(
                "⚠️  {} of {} subject area(s) failed: {}",
                failed.len(),
                total,
                failed.join(", ")
            );
        }

        Ok(courses)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawCourse>> {
        match self.config.fetch_mode() {
            FetchMode::Search => self.fetch_by_search().await,
            FetchMode::AllSubjects => self.fetch_all_subjects().await,
        }
    }

    async fn transform(&self, data: Vec<RawCourse>) -> Result<TransformResult> {
        let raw_count = data.len();
        let records: Vec<CourseRecord> = data.into_iter().map(CourseRecord::from).collect();
        let records = self.filter.apply(records);

        tracing::debug!(
            "Filter kept {} of {} raw course(s)",
            records.len(),
            raw_count
        );

        Ok(TransformResult { records, raw_count })
    }

    async fn load(&self, records: &[CourseRecord]) -> Result<LoadReport> {
        let spreadsheet_path = self.config.output_path().to_path_buf();
        let workbook = render_workbook(records)?;
        self.storage.write_file(&spreadsheet_path, &workbook).await?;
        tracing::info!("💾 Saved {} courses → {}", records.len(), spreadsheet_path.display());

        let csv_path = if self.config.write_csv() {
            let path = spreadsheet_path.with_extension("csv");
            let csv = render_csv(records)?;
            self.storage.write_file(&path, &csv).await?;
            tracing::info!("💾 Saved CSV → {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(LoadReport {
            spreadsheet_path,
            csv_path,
            rows: records.len(),
        })
    }
}
