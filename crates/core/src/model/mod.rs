mod catalog;
mod profile;
mod stats;

pub use catalog::{
    BundleCourse, CatalogError, CourseCatalog, CourseItem, CourseStatus, CourseType,
    DEMO_COURSE_TITLE,
};
pub use profile::{ProfileData, SocialLink, avatar_fallback_url};
pub use stats::{CourseStats, DEFAULT_TITLE_LIMIT, truncate_course_title};
