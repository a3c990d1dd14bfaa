use std::sync::Arc;

use dioxus::prelude::*;
use portfolio_core::model::{CourseCatalog, CourseStats, ProfileData};

use crate::context::AppContext;
use crate::vm::{Affordances, map_course_cards, map_stat_items};

use super::course_card::CourseCard;
use super::decoration::SceneDecoration;

/// Where "Explore All My Learning Adventures" goes when the catalog has no
/// `moreLink`.
pub const REPOSITORY_URL: &str = "https://github.com/AungMyoKyaw/MOOCs";

#[component]
pub fn ContentView(catalog: Arc<CourseCatalog>, affordances: Affordances) -> Element {
    let ctx = use_context::<AppContext>();
    let profile = ctx.profile().clone();
    let stats = map_stat_items(CourseStats::from_catalog(&catalog));
    let cards = map_course_cards(&catalog)
        .into_iter()
        .map(|card| (card.title.clone(), card))
        .collect::<Vec<_>>();
    let explore_url = catalog.more_link().unwrap_or(REPOSITORY_URL).to_string();
    let opener = ctx.link_opener();
    let page_class = format!("content-page {}", affordances.motion_class());

    rsx! {
        div { class: "{page_class}",
            if affordances.decoration {
                SceneDecoration {}
            }
            ProfileHeader { profile, affordances }
            main { class: "content-main",
                header { class: "section-header",
                    h2 { class: "section-title", "📚 My Learning Journey" }
                    p { class: "section-description",
                        "Discover my collection of completed courses and certifications. Each card represents a milestone in my continuous learning adventure."
                    }
                }
                section { class: "stats-row", aria_label: "Learning statistics",
                    for stat in stats {
                        div { key: "{stat.label}", class: "stat-pill {stat.tone}",
                            span { class: "stat-value", "{stat.value}" }
                            span { class: "stat-label", "{stat.label}" }
                        }
                    }
                }
                section { class: "course-grid", aria_label: "Courses",
                    for (title, card) in cards {
                        CourseCard { key: "{title}", card, affordances }
                    }
                }
                section { class: "explore",
                    button {
                        class: "explore-button",
                        r#type: "button",
                        aria_label: "Explore complete learning repository",
                        onclick: move |_| opener.open_url(&explore_url),
                        span { class: "explore-icon", aria_hidden: "true", "🌟" }
                        span { class: "explore-label", "Explore All My Learning Adventures" }
                        p { class: "explore-description",
                            "View complete repository with certificates and learning journey"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileHeader(profile: ProfileData, affordances: Affordances) -> Element {
    let ctx = use_context::<AppContext>();
    let mut avatar = use_signal(|| profile.image.clone());
    let fallback = profile.avatar_fallback();
    let alt = format!("{} profile", profile.name);
    let header_class = format!("profile-header {}", affordances.contrast_class());
    let social_buttons = profile.social_links.iter().map(|link| {
        let opener = ctx.link_opener();
        let href = link.href.clone();
        rsx! {
            button {
                key: "{link.id}",
                id: "{link.id}",
                class: "social-link",
                r#type: "button",
                aria_label: "{link.label}",
                onclick: move |_| opener.open_url(&href),
                i { class: "{link.icon_class}", aria_hidden: "true" }
            }
        }
    });

    rsx! {
        header { class: "{header_class}",
            div { class: "profile-avatar",
                img {
                    src: "{avatar}",
                    alt: "{alt}",
                    onerror: move |_| {
                        if avatar() != fallback {
                            tracing::debug!("profile image failed; using generated avatar");
                            avatar.set(fallback.clone());
                        }
                    },
                }
            }
            h1 { class: "profile-name", "{profile.name}" }
            p { class: "profile-title", "{profile.title}" }
            nav { class: "profile-links", aria_label: "Social links",
                {social_buttons}
            }
        }
    }
}
