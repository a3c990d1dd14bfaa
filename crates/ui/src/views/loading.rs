use dioxus::prelude::*;

use crate::vm::{Affordances, loading_announcement};

use super::decoration::SceneDecoration;

#[component]
pub fn LoadingView(progress: u8, stage: String, affordances: Affordances) -> Element {
    let announcement = loading_announcement(&stage, progress);
    let aria_label = format!("Loading progress: {progress}% complete. {stage}");
    let wrapper_class = format!("loading-page {}", affordances.contrast_class());
    let glass_class = format!("loading-glass {}", affordances.motion_class());

    rsx! {
        div { class: "{wrapper_class}",
            if affordances.decoration {
                SceneDecoration {}
            }
            div { class: "{glass_class}",
                div { class: "loading-icon",
                    if affordances.animated {
                        div { class: "pulse-ring" }
                        div { class: "pulse-ring" }
                        div { class: "pulse-ring" }
                    } else {
                        div { class: "static-ring" }
                    }
                    span { class: "rocket-icon", aria_hidden: "true", "🚀" }
                }
                h2 { class: "loading-title", "Loading Portfolio..." }
                div { class: "progress-indicator",
                    div {
                        class: "progress-bar",
                        role: "progressbar",
                        aria_valuemin: "0",
                        aria_valuemax: "100",
                        aria_valuenow: "{progress}",
                        style: "width: {progress}%;",
                    }
                }
                div { class: "progress-text", "{stage}" }
                p { class: "status-text", "Preparing your learning journey..." }
                output {
                    class: "sr-only",
                    aria_live: "polite",
                    aria_label: "{aria_label}",
                    "{announcement}"
                }
            }
        }
    }
}
