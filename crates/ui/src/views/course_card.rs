use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{Affordances, CourseCardVm, plan_card_click};

use super::decoration::CardParticles;
use super::portfolio::PresentationScope;
use super::scripts::reveal_dom_id;

#[component]
pub fn CourseCard(card: CourseCardVm, affordances: Affordances) -> Element {
    let ctx = use_context::<AppContext>();
    let scope = use_context::<PresentationScope>();
    let handle = use_hook(|| ctx.mint_handle());
    let dom_id = reveal_dom_id(handle);
    let mut hovered = use_signal(|| false);
    let mut rippling = use_signal(|| false);

    let index = card.index;
    let revealed = scope.revealed.read().contains(index);
    let class = card.card_class(revealed, affordances);
    let style = card.reveal_style(affordances);
    let observer = scope.observer.clone();
    let prefs = scope.prefs;
    let opener = ctx.link_opener();
    let link = card.certificate_link.clone();
    let dot_class = if card.completed {
        "status-dot status-dot--completed"
    } else {
        "status-dot status-dot--progress"
    };
    let status_class = if card.completed {
        "status-badge status-badge--completed"
    } else {
        "status-badge status-badge--progress"
    };
    let status_aria = format!("Course status: {}", card.status_label);

    rsx! {
        button {
            id: "{dom_id}",
            class: "{class}",
            style: "{style}",
            r#type: "button",
            aria_label: "{card.aria_label}",
            aria_describedby: "{card.description_id}",
            onmounted: move |_| observer.register(Some(handle), index),
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            onfocus: move |_| hovered.set(true),
            onblur: move |_| hovered.set(false),
            onclick: move |_| {
                let plan = plan_card_click(&link, prefs());
                if plan.ripple {
                    rippling.set(true);
                }
                let opener = opener.clone();
                spawn(async move {
                    if !plan.delay.is_zero() {
                        tokio::time::sleep(plan.delay).await;
                    }
                    opener.open_url(&plan.url);
                    rippling.set(false);
                });
            },
            div { class: "course-card-body",
                div { class: "course-card-header",
                    h3 { class: "course-card-title", "{card.display_title}" }
                    output { class: "{status_class}", aria_label: "{status_aria}", "{card.status_badge}" }
                }
                div { class: "course-card-badges",
                    span { class: "type-badge", "{card.type_badge}" }
                    if let Some(count) = card.course_count_label.as_ref() {
                        span { class: "count-badge", "{count}" }
                    }
                }
                div { class: "course-card-footer",
                    span { class: "{dot_class}", aria_hidden: "true" }
                    span { class: "course-card-cta", "View Certificate" }
                }
                if affordances.hover_effects {
                    CardParticles { hovered: hovered() }
                    if rippling() {
                        span { class: "ripple", aria_hidden: "true" }
                    }
                }
                div { id: "{card.description_id}", class: "sr-only", "{card.description}" }
            }
        }
    }
}
