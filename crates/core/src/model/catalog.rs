use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course title cannot be empty (item {index})")]
    EmptyTitle { index: usize },

    #[error("duplicate course title: {title}")]
    DuplicateTitle { title: String },
}

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    Course,
    Bundle,
}

impl CourseType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Bundle => "Bundle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl CourseStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

//
// ─── ITEMS ─────────────────────────────────────────────────────────────────────
//

/// One course inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleCourse {
    title: String,
    certificate_link: String,
}

impl BundleCourse {
    #[must_use]
    pub fn new(title: impl Into<String>, certificate_link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            certificate_link: certificate_link.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn certificate_link(&self) -> &str {
        &self.certificate_link
    }
}

/// A single catalog entry. `course_title` is the item's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseItem {
    course_title: String,
    #[serde(rename = "type")]
    kind: CourseType,
    status: CourseStatus,
    certificate_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    courses: Option<Vec<BundleCourse>>,
}

impl CourseItem {
    #[must_use]
    pub fn course(
        title: impl Into<String>,
        status: CourseStatus,
        certificate_link: impl Into<String>,
    ) -> Self {
        Self {
            course_title: title.into(),
            kind: CourseType::Course,
            status,
            certificate_link: certificate_link.into(),
            courses: None,
        }
    }

    #[must_use]
    pub fn bundle(
        title: impl Into<String>,
        status: CourseStatus,
        certificate_link: impl Into<String>,
        courses: Vec<BundleCourse>,
    ) -> Self {
        Self {
            course_title: title.into(),
            kind: CourseType::Bundle,
            status,
            certificate_link: certificate_link.into(),
            courses: Some(courses),
        }
    }

    #[must_use]
    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    #[must_use]
    pub fn kind(&self) -> CourseType {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> CourseStatus {
        self.status
    }

    #[must_use]
    pub fn certificate_link(&self) -> &str {
        &self.certificate_link
    }

    #[must_use]
    pub fn courses(&self) -> Option<&[BundleCourse]> {
        self.courses.as_deref()
    }

    /// Number of individual courses this item stands for.
    ///
    /// A bundle counts its sub-courses; anything else counts as one.
    #[must_use]
    pub fn course_count(&self) -> u32 {
        match (self.kind, self.courses.as_deref()) {
            (CourseType::Bundle, Some(courses)) => u32::try_from(courses.len()).unwrap_or(u32::MAX),
            _ => 1,
        }
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The full set of course records shown by the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCatalog {
    total: u32,
    items: Vec<CourseItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    more_link: Option<String>,
}

/// Title of the single item in [`CourseCatalog::demo`].
pub const DEMO_COURSE_TITLE: &str = "Demo Course - Portfolio Showcase";

impl CourseCatalog {
    #[must_use]
    pub fn new(total: u32, items: Vec<CourseItem>, more_link: Option<String>) -> Self {
        Self {
            total,
            items,
            more_link,
        }
    }

    /// The fixed catalog shown when the remote one cannot be loaded.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            total: 1,
            items: vec![CourseItem::course(
                DEMO_COURSE_TITLE,
                CourseStatus::Completed,
                "#",
            )],
            more_link: None,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn items(&self) -> &[CourseItem] {
        &self.items
    }

    #[must_use]
    pub fn more_link(&self) -> Option<&str> {
        self.more_link.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check that every item has a non-empty, unique title.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for the first offending item.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            if item.course_title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            if !seen.insert(item.course_title.as_str()) {
                return Err(CatalogError::DuplicateTitle {
                    title: item.course_title.clone(),
                });
            }
        }
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
