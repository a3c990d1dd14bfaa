use std::time::Duration;

use portfolio_core::MotionTimings;
use portfolio_core::model::{
    CourseCatalog, CourseItem, CourseStats, CourseStatus, CourseType, DEFAULT_TITLE_LIMIT,
    truncate_course_title,
};

use super::presentation::Affordances;

/// UI-ready course card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    /// Position in the catalog; also the reveal index.
    pub index: usize,
    pub title: String,
    pub display_title: String,
    pub status_badge: &'static str,
    pub status_label: &'static str,
    pub completed: bool,
    pub type_badge: &'static str,
    pub course_count_label: Option<String>,
    pub certificate_link: String,
    pub aria_label: String,
    pub description_id: String,
    pub description: String,
}

impl CourseCardVm {
    #[must_use]
    pub fn from_item(index: usize, item: &CourseItem) -> Self {
        let title = item.course_title().to_string();
        let sub_courses = item.courses().map(<[_]>::len);

        let status_badge = match item.status() {
            CourseStatus::Completed => "✓ Done",
            CourseStatus::InProgress => "⏳ Learning",
        };
        let type_badge = match item.kind() {
            CourseType::Bundle => "📚 Bundle",
            CourseType::Course => "📖 Course",
        };
        let course_count_label = sub_courses.filter(|count| *count > 0).map(course_count_label);

        let contains = sub_courses
            .map(|count| format!(" Contains {count} courses."))
            .unwrap_or_default();
        let description = format!(
            "{} titled {title}, status: {}.{contains} Click to view certificate.",
            item.kind().as_str(),
            item.status().as_str(),
        );

        Self {
            index,
            display_title: truncate_course_title(&title, DEFAULT_TITLE_LIMIT),
            aria_label: format!("View certificate for {title}"),
            description_id: format!("card-description-{index}"),
            title,
            status_badge,
            status_label: item.status().as_str(),
            completed: item.status().is_completed(),
            type_badge,
            course_count_label,
            certificate_link: item.certificate_link().to_string(),
            description,
        }
    }

    /// Card classes for the current reveal and preference state.
    #[must_use]
    pub fn card_class(&self, revealed: bool, affordances: Affordances) -> String {
        let mut class = String::from("course-card progressive-reveal");
        if revealed {
            class.push_str(" in-view");
        }
        if !affordances.animated {
            class.push_str(" motion-reduced");
        }
        if affordances.high_contrast {
            class.push_str(" high-contrast-mode");
        }
        class
    }

    /// Reveal animation delay, staggered by position.
    #[must_use]
    pub fn reveal_delay(&self, affordances: Affordances) -> Duration {
        let timings = MotionTimings::for_preferences(!affordances.animated);
        timings
            .reveal_stagger
            .saturating_mul(u32::try_from(self.index).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn reveal_style(&self, affordances: Affordances) -> String {
        format!(
            "animation-delay: {}s;",
            self.reveal_delay(affordances).as_secs_f64()
        )
    }
}

fn course_count_label(count: usize) -> String {
    if count == 1 {
        "1 course".to_string()
    } else {
        format!("{count} courses")
    }
}

#[must_use]
pub fn map_course_cards(catalog: &CourseCatalog) -> Vec<CourseCardVm> {
    catalog
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| CourseCardVm::from_item(index, item))
        .collect()
}

/// One pill in the statistics row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatItemVm {
    pub value: u32,
    pub label: &'static str,
    pub tone: &'static str,
}

#[must_use]
pub fn map_stat_items(stats: CourseStats) -> Vec<StatItemVm> {
    vec![
        StatItemVm {
            value: stats.completed_courses,
            label: "Courses Completed",
            tone: "stat--completed",
        },
        StatItemVm {
            value: stats.in_progress_courses,
            label: "In Progress",
            tone: "stat--progress",
        },
        StatItemVm {
            value: stats.specializations,
            label: "Specializations",
            tone: "stat--specializations",
        },
        StatItemVm {
            value: stats.total_courses,
            label: "Total Courses",
            tone: "stat--total",
        },
    ]
}
