use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::{AttributeValue, ElementId, Event, Template, WriteMutations};
use dioxus::html::{
    PlatformEventData, SerializedHtmlEventConverter, SerializedMouseData, set_event_converter,
};
use dioxus::prelude::*;
use portfolio_core::model::{CourseCatalog, CourseItem, CourseStatus, ProfileData};
use portfolio_core::{ElementHandle, PreferenceState};
use services::{
    CatalogFetchError, CatalogSource, IntersectionEntry, ManualPreferenceHost, Pacer,
    RecordingPacer,
};

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::{IntersectionFeed, PortfolioView};

pub enum SourceKind {
    Catalog(CourseCatalog),
    Failing,
}

struct TestSource(SourceKind);

#[async_trait]
impl CatalogSource for TestSource {
    async fn fetch_catalog(&self) -> Result<CourseCatalog, CatalogFetchError> {
        match &self.0 {
            SourceKind::Catalog(catalog) => Ok(catalog.clone()),
            SourceKind::Failing => Err(CatalogFetchError::Unavailable("offline".into())),
        }
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UiLinkOpener for RecordingOpener {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

struct TestApp {
    source: Arc<TestSource>,
    pacer: Arc<RecordingPacer>,
    host: ManualPreferenceHost,
    opener: Arc<RecordingOpener>,
    feed: IntersectionFeed,
}

impl UiApp for TestApp {
    fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        self.source.clone()
    }

    fn pacer(&self) -> Arc<dyn Pacer> {
        self.pacer.clone()
    }

    fn preference_host(&self) -> ManualPreferenceHost {
        self.host.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.opener.clone()
    }

    fn profile(&self) -> ProfileData {
        ProfileData::default_profile()
    }

    fn intersection_feed(&self) -> IntersectionFeed {
        self.feed.clone()
    }

    fn host_bridges(&self) -> bool {
        false
    }
}

/// Keeps the text attributes written to each element so tests can find
/// rendered nodes and send events to them.
#[derive(Default)]
pub struct ElementRecorder {
    attributes: HashMap<ElementId, HashMap<&'static str, String>>,
}

impl ElementRecorder {
    pub fn find(&self, name: &str, value: &str) -> Option<ElementId> {
        self.attributes
            .iter()
            .find(|(_, attrs)| attrs.get(name).is_some_and(|found| found == value))
            .map(|(id, _)| *id)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.attributes.get(&id)?.get(name).map(String::as_str)
    }
}

impl WriteMutations for ElementRecorder {
    fn append_children(&mut self, _: ElementId, _: usize) {}

    fn assign_node_id(&mut self, _: &'static [u8], _: ElementId) {}

    fn create_placeholder(&mut self, _: ElementId) {}

    fn create_text_node(&mut self, _: &str, _: ElementId) {}

    fn load_template(&mut self, _: Template, _: usize, id: ElementId) {
        self.attributes.remove(&id);
    }

    fn replace_node_with(&mut self, _: ElementId, _: usize) {}

    fn replace_placeholder_with_nodes(&mut self, _: &'static [u8], _: usize) {}

    fn insert_nodes_after(&mut self, _: ElementId, _: usize) {}

    fn insert_nodes_before(&mut self, _: ElementId, _: usize) {}

    fn set_attribute(
        &mut self,
        name: &'static str,
        _: Option<&'static str>,
        value: &AttributeValue,
        id: ElementId,
    ) {
        if let AttributeValue::Text(text) = value {
            self.attributes
                .entry(id)
                .or_default()
                .insert(name, text.clone());
        }
    }

    fn set_node_text(&mut self, _: &str, _: ElementId) {}

    fn create_event_listener(&mut self, _: &'static str, _: ElementId) {}

    fn remove_event_listener(&mut self, _: &'static str, _: ElementId) {}

    fn remove_node(&mut self, id: ElementId) {
        self.attributes.remove(&id);
    }

    fn push_root(&mut self, _: ElementId) {}
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PortfolioHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { PortfolioView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub host: ManualPreferenceHost,
    pub pacer: Arc<RecordingPacer>,
    pub opener: Arc<RecordingOpener>,
    pub feed: IntersectionFeed,
    pub elements: ElementRecorder,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild(&mut self.elements);
        self.drive();
    }

    fn drive(&mut self) {
        self.dom.process_events();
        self.dom.render_immediate(&mut self.elements);
        self.dom.process_events();
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut self.elements);
        self.dom.process_events();
    }

    /// Drive until the opener has received a link, or give up.
    pub async fn drive_until_opened(&mut self) -> Vec<String> {
        for _ in 0..40 {
            let opened = self.opener.opened();
            if !opened.is_empty() {
                return opened;
            }
            self.drive_async().await;
        }
        self.opener.opened()
    }

    /// The course card rendered for catalog position `index`.
    pub fn card_element(&self, index: usize) -> ElementId {
        let description = format!("card-description-{index}");
        self.elements
            .find("aria-describedby", &description)
            .unwrap_or_else(|| panic!("no card rendered for index {index}"))
    }

    /// The reveal handle the card at `index` was given.
    pub fn card_handle(&self, index: usize) -> ElementHandle {
        let dom_id = self
            .elements
            .attribute(self.card_element(index), "id")
            .expect("card has a dom id");
        let raw = dom_id
            .strip_prefix("reveal-target-")
            .and_then(|raw| raw.parse().ok())
            .expect("reveal dom id");
        ElementHandle::new(raw)
    }

    fn dispatch(&mut self, name: &str, element: ElementId, data: Box<dyn Any>, bubbles: bool) {
        set_event_converter(Box::new(SerializedHtmlEventConverter));
        let event: Event<dyn Any> =
            Event::new(Rc::new(PlatformEventData::new(data)) as Rc<dyn Any>, bubbles);
        self.dom.runtime().handle_event(name, event, element);
        self.drive();
    }

    /// Tell the card at `index` it has been attached to the page.
    pub fn mount_card(&mut self, index: usize) {
        let element = self.card_element(index);
        self.dispatch("mounted", element, Box::new(()), false);
    }

    pub fn click_card(&mut self, index: usize) {
        let element = self.card_element(index);
        self.dispatch("click", element, Box::new(SerializedMouseData::default()), true);
    }

    /// Report the card at `index` as visible with the given ratio.
    pub fn report_visible(&mut self, index: usize, ratio: f64) {
        let entry = IntersectionEntry {
            element: self.card_handle(index),
            ratio,
            is_intersecting: true,
        };
        assert!(self.feed.report(vec![entry]), "no view is listening");
    }

    /// Drive until the rendered HTML contains `needle`, or give up.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..40 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(source: SourceKind, prefs: PreferenceState) -> ViewHarness {
    setup_view_harness_with_host(source, ManualPreferenceHost::with_state(prefs))
}

/// Harness over a host the test reports into itself.
pub fn setup_view_harness_with_host(source: SourceKind, host: ManualPreferenceHost) -> ViewHarness {
    let feed = IntersectionFeed::new();
    let pacer = Arc::new(RecordingPacer::new());
    let opener = Arc::new(RecordingOpener::default());
    let app = Arc::new(TestApp {
        source: Arc::new(TestSource(source)),
        pacer: Arc::clone(&pacer),
        host: host.clone(),
        opener: Arc::clone(&opener),
        feed: feed.clone(),
    });

    let dom = VirtualDom::new_with_props(PortfolioHarness, HarnessProps { app });

    ViewHarness {
        dom,
        host,
        pacer,
        opener,
        feed,
        elements: ElementRecorder::default(),
    }
}

pub fn three_item_catalog() -> CourseCatalog {
    CourseCatalog::new(
        3,
        vec![
            CourseItem::course("Learning How to Learn", CourseStatus::Completed, "https://c/1"),
            CourseItem::course("Rust Fundamentals", CourseStatus::InProgress, "https://c/2"),
            CourseItem::course("Machine Learning", CourseStatus::Completed, "https://c/3"),
        ],
        Some("https://www.coursera.org/learner/aungmyokyaw".into()),
    )
}
