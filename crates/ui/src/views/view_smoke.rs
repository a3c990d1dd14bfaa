use std::time::{Duration, Instant};

use portfolio_core::model::DEMO_COURSE_TITLE;
use portfolio_core::{Preference, PreferenceState};
use services::ManualPreferenceHost;

use super::test_harness::{
    SourceKind, setup_view_harness, setup_view_harness_with_host, three_item_catalog,
};

fn prefs(reduced: bool, contrast: bool) -> PreferenceState {
    PreferenceState {
        prefers_reduced_motion: reduced,
        high_contrast: contrast,
    }
}

/// Opening tag of the card rendered for catalog position `index`.
fn card_markup(html: &str, index: usize) -> &str {
    let marker = format!(r#"aria-describedby="card-description-{index}""#);
    let at = html
        .find(&marker)
        .unwrap_or_else(|| panic!("no card {index} in {html}"));
    let start = html[..at].rfind("<button").expect("card button");
    let end = at + html[at..].find('>').expect("end of tag");
    &html[start..end]
}

#[tokio::test(flavor = "current_thread")]
async fn loading_view_renders_before_catalog_arrives() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        PreferenceState::default(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading Portfolio..."), "missing title in {html}");
    assert!(html.contains("progress-bar"), "missing progress bar in {html}");
    assert!(html.contains("scene-3d"), "missing decoration in {html}");
    assert!(!html.contains("course-grid"), "content rendered early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn successful_load_renders_every_course() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        PreferenceState::default(),
    );
    harness.rebuild();
    let html = harness.drive_until("course-grid").await;

    for title in ["Learning How to Learn", "Rust Fundamentals", "Machine Learning"] {
        let label = format!("View certificate for {title}");
        assert!(html.contains(&label), "missing {label} in {html}");
    }
    assert!(html.contains("⏳ Learning"), "missing in-progress badge in {html}");
    assert!(html.contains("Courses Completed"), "missing stats in {html}");
    assert!(html.contains("progressive-reveal"), "missing reveal class in {html}");
    assert!(html.contains("card-particles"), "missing hover effects in {html}");
    assert!(!html.contains("Loading Portfolio..."), "loading view still shown in {html}");

    let ms = Duration::from_millis;
    assert_eq!(
        harness.pacer.pauses(),
        vec![ms(400), ms(400), ms(400), ms(400), ms(400), ms(600)]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failed_load_renders_demo_course() {
    let mut harness = setup_view_harness(SourceKind::Failing, PreferenceState::default());
    harness.rebuild();
    let html = harness.drive_until("course-grid").await;

    assert!(html.contains(DEMO_COURSE_TITLE), "missing demo course in {html}");
    assert!(!html.contains("Something went wrong"), "error shown in {html}");
    assert!(harness.opener.opened().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn accessibility_preferences_strip_decoration() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        prefs(true, true),
    );
    harness.rebuild();
    let loading = harness.render();
    assert!(!loading.contains("scene-3d"), "decoration shown in {loading}");
    assert!(loading.contains("static-ring"), "missing static ring in {loading}");

    let html = harness.drive_until("course-grid").await;
    assert!(html.contains("high-contrast-mode"), "missing contrast class in {html}");
    assert!(html.contains("motion-reduced"), "missing motion class in {html}");
    assert!(!html.contains("card-particles"), "hover effects shown in {html}");
    assert!(html.contains("animation-delay: 0s;"), "stagger not cleared in {html}");

    let ms = Duration::from_millis;
    assert_eq!(harness.pacer.pauses(), vec![ms(100); 6]);
}

#[tokio::test(flavor = "current_thread")]
async fn preference_change_after_load_updates_cards() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        PreferenceState::default(),
    );
    harness.rebuild();
    let html = harness.drive_until("course-grid").await;
    assert!(html.contains("card-particles"), "missing hover effects in {html}");

    harness.host.report(Preference::ReducedMotion, true);
    let html = harness.drive_until("motion-reduced").await;
    assert!(!html.contains("card-particles"), "hover effects kept in {html}");
    assert!(!html.contains("high-contrast-mode"), "contrast changed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reduced_motion_reported_after_mount_paces_the_load() {
    let host = ManualPreferenceHost::new();
    let mut harness =
        setup_view_harness_with_host(SourceKind::Catalog(three_item_catalog()), host);
    harness.rebuild();
    let loading = harness.render();
    assert!(!loading.contains("scene-3d"), "decoration before host report in {loading}");

    harness.host.report(Preference::ReducedMotion, true);
    let html = harness.drive_until("course-grid").await;
    assert!(html.contains("motion-reduced"), "missing motion class in {html}");

    let ms = Duration::from_millis;
    assert_eq!(harness.pacer.pauses(), vec![ms(100); 6]);
}

#[tokio::test(flavor = "current_thread")]
async fn initial_host_report_applies_both_preferences() {
    let host = ManualPreferenceHost::new();
    let mut harness =
        setup_view_harness_with_host(SourceKind::Catalog(three_item_catalog()), host);
    harness.rebuild();
    harness.host.report_initial([
        (Preference::ReducedMotion, false),
        (Preference::HighContrast, true),
    ]);

    let html = harness.drive_until("course-grid").await;
    assert!(html.contains("high-contrast-mode"), "missing contrast class in {html}");
    assert!(!html.contains("scene-3d"), "decoration shown in {html}");
    assert!(html.contains("card-particles"), "missing hover effects in {html}");

    let ms = Duration::from_millis;
    assert_eq!(
        harness.pacer.pauses(),
        vec![ms(400), ms(400), ms(400), ms(400), ms(400), ms(600)]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn silent_host_loads_with_default_preferences() {
    let host = ManualPreferenceHost::new();
    let mut harness =
        setup_view_harness_with_host(SourceKind::Catalog(three_item_catalog()), host);
    harness.rebuild();

    let html = harness.drive_until("course-grid").await;
    assert!(html.contains("card-particles"), "missing hover effects in {html}");
    assert!(!html.contains("motion-reduced"), "motion reduced in {html}");
    assert_eq!(harness.pacer.pauses().len(), 6);
    assert_eq!(harness.pacer.pauses()[0], Duration::from_millis(400));
}

#[tokio::test(flavor = "current_thread")]
async fn cards_reveal_only_after_mount_and_visibility() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        PreferenceState::default(),
    );
    harness.rebuild();
    harness.drive_until("course-grid").await;

    // Visible but never mounted: nothing tracks it yet.
    harness.report_visible(0, 0.9);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!card_markup(&html, 0).contains("in-view"), "unmounted card revealed in {html}");

    for index in 0..3 {
        harness.mount_card(index);
    }
    harness.report_visible(1, 0.1);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("in-view"), "revealed below threshold in {html}");

    harness.report_visible(1, 0.5);
    let html = harness.drive_until("in-view").await;
    assert!(card_markup(&html, 1).contains("in-view"), "card 1 not revealed in {html}");
    assert!(!card_markup(&html, 0).contains("in-view"), "card 0 revealed in {html}");
    assert!(!card_markup(&html, 2).contains("in-view"), "card 2 revealed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn card_click_opens_certificate_after_ripple() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        PreferenceState::default(),
    );
    harness.rebuild();
    harness.drive_until("course-grid").await;

    let clicked = Instant::now();
    harness.click_card(1);
    let html = harness.render();
    assert!(html.contains(r#"class="ripple""#), "missing ripple in {html}");

    let opened = harness.drive_until_opened().await;
    assert_eq!(opened, vec!["https://c/2".to_string()]);
    assert!(clicked.elapsed() >= Duration::from_millis(100));
}

#[tokio::test(flavor = "current_thread")]
async fn reduced_motion_click_opens_certificate_at_once() {
    let mut harness = setup_view_harness(
        SourceKind::Catalog(three_item_catalog()),
        prefs(true, false),
    );
    harness.rebuild();
    harness.drive_until("course-grid").await;

    let clicked = Instant::now();
    harness.click_card(2);
    let html = harness.render();
    assert!(!html.contains(r#"class="ripple""#), "ripple shown in {html}");

    let opened = harness.drive_until_opened().await;
    assert_eq!(opened, vec!["https://c/3".to_string()]);
    assert!(clicked.elapsed() < Duration::from_millis(100));
}
