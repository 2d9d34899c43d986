use crate::domain::model::{CourseRecord, TargetCourse};
use crate::utils::error::{CatalogError, Result};
use regex::Regex;
use std::collections::HashSet;

/// Confirms that a description genuinely references the target course.
///
/// The catalog's own search ranks loosely, so every record is re-checked
/// locally. A subject spelling (optionally abbreviated with a trailing
/// period) must be followed, after at least one whitespace character, by the
/// exact catalog number with a word boundary on both sides. For "Mathematics
/// 31A" that accepts "Math 31A", "MATH 31A" and "Math. 31A" but rejects
/// "Math31A", "31AH", "31AL", "31B" and "131A".
#[derive(Debug, Clone)]
pub struct MatchFilter {
    pattern: Regex,
}

impl MatchFilter {
    pub fn new(target: &TargetCourse) -> Result<Self> {
        if target.subject_names.is_empty() || target.number.trim().is_empty() {
            return Err(CatalogError::Config {
                message: "target course needs a subject name and a number".to_string(),
            });
        }

        let subjects = target
            .subject_names
            .iter()
            .map(|name| format!(r"{}\.?", regex::escape(name.trim())))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(
            r"(?i)\b(?:{})\s+{}\b",
            subjects,
            regex::escape(target.number.trim())
        );

        let pattern = Regex::new(&source).map_err(|e| CatalogError::Config {
            message: format!("invalid match pattern '{}': {}", source, e),
        })?;

        Ok(Self { pattern })
    }

    pub fn matches(&self, description: &str) -> bool {
        self.pattern.is_match(description)
    }

    /// Keeps matching records, drops duplicate listings and sorts by subject
    /// and catalog number. Applying it to its own output is a no-op.
    pub fn apply(&self, records: Vec<CourseRecord>) -> Vec<CourseRecord> {
        let mut kept: Vec<CourseRecord> = Vec::new();
        {
            let mut seen = HashSet::new();
            for record in &records {
                if !self.matches(&record.description) {
                    tracing::trace!(
                        "Rejected {} {}: no reference to target",
                        record.subject_area,
                        record.course_number
                    );
                    continue;
                }
                if seen.insert(record.identity()) {
                    kept.push(record.clone());
                }
            }
        }

        kept.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        kept
    }
}
