use dioxus::prelude::*;

const SCENE_PARTICLES: usize = 12;
const CARD_PARTICLES: usize = 4;

/// Background scene. Purely decorative; only mounted when the affordances
/// allow it.
#[component]
pub fn SceneDecoration() -> Element {
    let styles = (0..SCENE_PARTICLES).map(scene_particle_style).collect::<Vec<_>>();
    rsx! {
        div { class: "scene-3d", aria_hidden: "true",
            div { class: "scene-orb scene-orb--primary" }
            div { class: "scene-orb scene-orb--secondary" }
            for (i, style) in styles.into_iter().enumerate() {
                span { key: "{i}", class: "scene-particle", style: "{style}" }
            }
        }
    }
}

/// Floating particles inside a course card.
#[component]
pub fn CardParticles(hovered: bool) -> Element {
    let class = if hovered {
        "card-particle card-particle--visible"
    } else {
        "card-particle"
    };
    let styles = (0..CARD_PARTICLES).map(card_particle_style).collect::<Vec<_>>();
    rsx! {
        div { class: "card-particles", aria_hidden: "true",
            for (i, style) in styles.into_iter().enumerate() {
                span { key: "{i}", class: "{class}", style: "{style}" }
            }
        }
    }
}

fn scene_particle_style(i: usize) -> String {
    let left = (i * 37) % 100;
    let top = (i * 53) % 100;
    let delay = (i % 5) as f64 * 0.8;
    format!("left: {left}%; top: {top}%; animation-delay: {delay}s;")
}

fn card_particle_style(i: usize) -> String {
    let left = 25 + i * 20;
    let top = 35 + i * 15;
    let delay = i as f64 * 0.4;
    let duration = 4.0 + i as f64 * 0.6;
    format!(
        "left: {left}%; top: {top}%; animation-delay: {delay}s; animation-duration: {duration}s;"
    )
}
