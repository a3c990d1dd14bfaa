mod course_card_vm;
mod presentation;

pub use course_card_vm::{CourseCardVm, StatItemVm, map_course_cards, map_stat_items};
pub use presentation::{
    Affordances, CardClickPlan, Presentation, loading_announcement, plan_card_click, present,
};
