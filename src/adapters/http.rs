use crate::domain::model::{RawCourse, SubjectArea};
use crate::utils::error::{CatalogError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.ucla.edu/sis/publicapis/course";

const SEARCH_ENDPOINT: &str = "getcoursedetailbysearch";
const SUBJECTS_ENDPOINT: &str = "getallcourses";
const SUBJECT_COURSES_ENDPOINT: &str = "getcoursedetail";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REGISTRAR_REFERER: &str = "https://registrar.ucla.edu/";

/// Thin client over the public course-catalog endpoints.
///
/// Every call is a single GET: no retries and no timeout beyond the
/// client defaults.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base: String,
}

impl CatalogClient {
    pub fn new(base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static(REGISTRAR_REFERER));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Full-text search across every course description.
    pub async fn search(&self, query: &str) -> Result<Vec<RawCourse>> {
        let url = self.endpoint(SEARCH_ENDPOINT, Some(("searchquery", query)))?;
        self.fetch_items(url).await
    }

    /// Every subject area the catalog knows about.
    pub async fn subject_areas(&self) -> Result<Vec<SubjectArea>> {
        let url = self.endpoint(SUBJECTS_ENDPOINT, None)?;
        self.fetch_items(url).await
    }

    /// Every course listed under one subject area code.
    pub async fn courses_for_subject(&self, subject_code: &str) -> Result<Vec<RawCourse>> {
        let url = self.endpoint(SUBJECT_COURSES_ENDPOINT, Some(("subjectarea", subject_code)))?;
        self.fetch_items(url).await
    }

    fn endpoint(&self, path: &str, param: Option<(&str, &str)>) -> Result<Url> {
        let raw = format!("{}/{}", self.base, path);
        let mut url = Url::parse(&raw).map_err(|e| CatalogError::InvalidConfigValue {
            field: "api_base".to_string(),
            value: self.base.clone(),
            reason: e.to_string(),
        })?;
        if let Some((key, value)) = param {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// GETs a JSON array and deserializes each element, skipping elements
    /// that lack required fields. A non-2xx status or a body that is not an
    /// array fails the whole request.
    async fn fetch_items<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::MalformedResponse {
                url: url.to_string(),
                reason: format!("invalid JSON: {}", e),
            })?;

        let serde_json::Value::Array(items) = json else {
            return Err(CatalogError::MalformedResponse {
                url: url.to_string(),
                reason: "expected a JSON array".to_string(),
            });
        };

        let total = items.len();
        let parsed: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Skipping malformed item #{} from {}: {}", index, url, e);
                    None
                }
            })
            .collect();

        if parsed.len() < total {
            tracing::warn!(
                "⚠️  Skipped {} malformed item(s) out of {} from {}",
                total - parsed.len(),
                total,
                url
            );
        }

        Ok(parsed)
    }
}
