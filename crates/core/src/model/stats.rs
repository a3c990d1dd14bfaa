use crate::model::{CourseCatalog, CourseStatus};

/// Character limit used for card titles.
pub const DEFAULT_TITLE_LIMIT: usize = 65;

const IN_PROGRESS_MARKER: &str = " ⏳";

/// Aggregate counts shown above the course grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseStats {
    pub total_courses: u32,
    pub completed_courses: u32,
    pub in_progress_courses: u32,
    pub specializations: u32,
}

impl CourseStats {
    #[must_use]
    pub fn from_catalog(catalog: &CourseCatalog) -> Self {
        let items = catalog.items();
        let total_courses = items.iter().map(|item| item.course_count()).sum();
        let completed_courses = items
            .iter()
            .filter(|item| item.status().is_completed())
            .map(|item| item.course_count())
            .sum();
        let in_progress_courses = items
            .iter()
            .filter(|item| item.status() == CourseStatus::InProgress)
            .count();

        Self {
            total_courses,
            completed_courses,
            in_progress_courses: u32::try_from(in_progress_courses).unwrap_or(u32::MAX),
            specializations: u32::try_from(items.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Strip the in-progress marker and cap the title at `max_chars` characters.
#[must_use]
pub fn truncate_course_title(title: &str, max_chars: usize) -> String {
    let clean = title.replacen(IN_PROGRESS_MARKER, "", 1);
    if clean.chars().count() <= max_chars {
        return clean;
    }
    let mut out: String = clean.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
