use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One course item as returned by the catalog API.
///
/// Only `subj_area_cd`, `course_title` and `crs_desc` are required; an item
/// lacking any of them fails to deserialize and is skipped by the fetcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawCourse {
    pub subj_area_cd: String,
    pub course_title: String,
    pub crs_desc: String,
    #[serde(default)]
    pub crs_catlg_no: Option<String>,
    #[serde(default)]
    pub subj_area_nm: Option<String>,
    #[serde(default)]
    pub unt_rng: Option<serde_json::Value>,
    #[serde(default)]
    pub crs_career_lvl_nm: Option<String>,
}

/// One entry of the subject-area listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectArea {
    pub subj_area_cd: String,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseLevel {
    LowerDivision,
    UpperDivision,
    Graduate,
    Unknown,
}

impl CourseLevel {
    /// Classifies by catalog numbering: below 100 is lower division,
    /// 100-199 upper division, 200 and above graduate. Numbers without
    /// digits fall back to the API's career-level name.
    pub fn classify(course_number: &str, career_hint: Option<&str>) -> Self {
        match catalog_numeral(course_number) {
            Some(n) if n < 100 => CourseLevel::LowerDivision,
            Some(n) if n < 200 => CourseLevel::UpperDivision,
            Some(_) => CourseLevel::Graduate,
            None => career_hint.map(Self::from_hint).unwrap_or(CourseLevel::Unknown),
        }
    }

    fn from_hint(hint: &str) -> Self {
        let hint = hint.to_ascii_lowercase();
        if hint.contains("lower") {
            CourseLevel::LowerDivision
        } else if hint.contains("upper") {
            CourseLevel::UpperDivision
        } else if hint.contains("graduate") && !hint.contains("undergraduate") {
            CourseLevel::Graduate
        } else {
            CourseLevel::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseLevel::LowerDivision => "Lower Division",
            CourseLevel::UpperDivision => "Upper Division",
            CourseLevel::Graduate => "Graduate",
            CourseLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First run of ASCII digits in a catalog number ("M20" -> 20, "C115" -> 115).
pub fn catalog_numeral(course_number: &str) -> Option<u32> {
    let digits: String = course_number
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub subject_area: String,
    pub course_number: String,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    /// Unit range, shown in the console preview only.
    pub units: String,
}

impl CourseRecord {
    pub fn new(
        subject_area: impl Into<String>,
        course_number: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let course_number = course_number.into();
        let level = CourseLevel::classify(&course_number, None);
        Self {
            subject_area: subject_area.into(),
            course_number,
            title: title.into(),
            description: description.into(),
            level,
            units: String::new(),
        }
    }

    /// Key used to drop duplicate listings of the same course.
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.subject_area, &self.course_number, &self.title)
    }

    /// Subject first, then numeric catalog order ("2" before "10").
    pub fn sort_key(&self) -> (&str, u32, &str, &str) {
        (
            &self.subject_area,
            catalog_numeral(&self.course_number).unwrap_or(u32::MAX),
            &self.course_number,
            &self.title,
        )
    }

    /// Cells in export column order.
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.subject_area,
            &self.course_number,
            &self.title,
            &self.description,
            self.level.label(),
        ]
    }
}

impl From<RawCourse> for CourseRecord {
    fn from(raw: RawCourse) -> Self {
        let full_title = raw.course_title.trim();
        let (number, title) = match raw
            .crs_catlg_no
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            Some(number) => {
                let title = full_title
                    .strip_prefix(number)
                    .and_then(|rest| rest.strip_prefix(". "))
                    .unwrap_or(full_title);
                (number.to_string(), title.trim().to_string())
            }
            None => match full_title.split_once(". ") {
                Some((number, title)) => (number.trim().to_string(), title.trim().to_string()),
                None => (String::new(), full_title.to_string()),
            },
        };

        let units = match raw.unt_rng {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self {
            subject_area: raw.subj_area_cd.trim().to_string(),
            level: CourseLevel::classify(&number, raw.crs_career_lvl_nm.as_deref()),
            course_number: number,
            title,
            description: raw.crs_desc.trim().to_string(),
            units,
        }
    }
}

/// The prerequisite course being searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCourse {
    /// Accepted spellings of the subject; the first one goes into the search query.
    pub subject_names: Vec<String>,
    pub number: String,
}

impl TargetCourse {
    pub fn new(subject_names: &[&str], number: impl Into<String>) -> Self {
        Self {
            subject_names: subject_names.iter().map(|s| s.to_string()).collect(),
            number: number.into(),
        }
    }

    /// Free-text query for the catalog search endpoint.
    pub fn search_query(&self) -> String {
        let subject = self
            .subject_names
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        format!("{} {}", subject, self.number).trim().to_string()
    }
}

impl Default for TargetCourse {
    fn default() -> Self {
        Self::new(&["Mathematics", "Math"], "31A")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One request against the search endpoint.
    Search,
    /// One request per subject area.
    AllSubjects,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CourseRecord>,
    pub raw_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub spreadsheet_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub rows: usize,
}
