//! Browser bindings: DOM view, URL hash location and event listeners.
//!
//! The host page supplies the chrome around the rendered content:
//!
//! - `#content-area`, `#loading-spinner`, `#error-message`
//! - one `#nav-<page>` link per page
//! - `#team-modal` with a `#modal-content` body
//! - `#current-year` in the footer

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::carousel::SlideSurface;
use crate::data::BrowserTransport;
use crate::page::PageId;
use crate::render::home::{CAROUSEL_ID, SLIDE_CLASS};
use crate::router::{ContentView, Location, Router};
use crate::timer::BrowserSleeper;

const CONTENT_ID: &str = "content-area";
const SPINNER_ID: &str = "loading-spinner";
const ERROR_ID: &str = "error-message";
const MODAL_ID: &str = "team-modal";
const MODAL_CONTENT_ID: &str = "modal-content";
const YEAR_ID: &str = "current-year";

const HIDDEN: &str = "hidden";
const FADED: &str = "opacity-0";
const NAV_ACTIVE: &[&str] = &["text-gray-900", "font-bold", "border-b-2", "border-gray-900"];
const NAV_INACTIVE: &[&str] = &["text-gray-600", "font-medium"];

pub type BrowserRouter = Router<BrowserTransport, BrowserSleeper>;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn add_classes(element: &Element, classes: &[&str]) {
    let list = element.class_list();
    for class in classes {
        let _ = list.add_1(class);
    }
}

fn remove_classes(element: &Element, classes: &[&str]) {
    let list = element.class_list();
    for class in classes {
        let _ = list.remove_1(class);
    }
}

/// `window.location.hash`.
pub struct WebLocation;

impl Location for WebLocation {
    fn hash(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn set_hash(&self, hash: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(hash) {
                log::warn!("Failed to set location hash: {:?}", e);
            }
        }
    }
}

/// Content region of the host page.
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            log::warn!("Host page has no #{} element", id);
        }
        element
    }
}

impl ContentView for DomView {
    fn begin_loading(&self) {
        if let Some(content) = self.element(CONTENT_ID) {
            add_classes(&content, &[FADED]);
            content.set_inner_html("");
        }
        if let Some(error) = self.element(ERROR_ID) {
            add_classes(&error, &[HIDDEN]);
        }
        if let Some(spinner) = self.element(SPINNER_ID) {
            remove_classes(&spinner, &[HIDDEN]);
        }
    }

    fn install(&self, markup: &str) {
        if let Some(content) = self.element(CONTENT_ID) {
            content.set_inner_html(markup);
        }
    }

    fn show_error(&self) {
        if let Some(error) = self.element(ERROR_ID) {
            remove_classes(&error, &[HIDDEN]);
        }
    }

    fn end_loading(&self) {
        if let Some(spinner) = self.element(SPINNER_ID) {
            add_classes(&spinner, &[HIDDEN]);
        }
    }

    fn highlight_nav(&self, active: PageId) {
        for page in PageId::all() {
            let Some(link) = self.document.get_element_by_id(&page.nav_link_id()) else {
                continue;
            };
            if *page == active {
                remove_classes(&link, NAV_INACTIVE);
                add_classes(&link, NAV_ACTIVE);
            } else {
                remove_classes(&link, NAV_ACTIVE);
                add_classes(&link, NAV_INACTIVE);
            }
        }
    }

    fn scroll_to_top(&self) {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    fn reveal(&self) {
        if let Some(content) = self.element(CONTENT_ID) {
            remove_classes(&content, &[FADED]);
        }
    }

    fn slides(&self) -> Box<dyn SlideSurface> {
        Box::new(DomSlides::collect(&self.document))
    }
}

/// Slides of the news carousel currently in the document.
struct DomSlides {
    slides: Vec<HtmlElement>,
}

impl DomSlides {
    fn collect(document: &Document) -> Self {
        let selector = format!("#{} .{}", CAROUSEL_ID, SLIDE_CLASS);
        let slides = match document.query_selector_all(&selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect(),
            Err(e) => {
                log::warn!("Failed to query carousel slides: {:?}", e);
                Vec::new()
            }
        };
        Self { slides }
    }
}

impl SlideSurface for DomSlides {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_visible(&self, index: usize, visible: bool) {
        let Some(slide) = self.slides.get(index) else {
            return;
        };
        let style = slide.style();
        let (display, opacity) = if visible { ("block", "1") } else { ("none", "0") };
        let _ = style.set_property("display", display);
        let _ = style.set_property("opacity", opacity);
    }
}

/// Closest ancestor (or self) of the event target carrying `attribute`.
fn target_with(event: &Event, attribute: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(&format!("[{}]", attribute)).ok().flatten()
}

fn open_member_modal(router: &BrowserRouter, member_id: &str) {
    let Some(detail) = router.registry().member_detail(member_id) else {
        return;
    };
    let Some(document) = document() else {
        return;
    };
    if let Some(body) = document.get_element_by_id(MODAL_CONTENT_ID) {
        body.set_inner_html(&detail.into_string());
    }
    if let Some(modal) = document.get_element_by_id(MODAL_ID) {
        remove_classes(&modal, &[HIDDEN]);
    }
}

fn close_member_modal() {
    if let Some(modal) = document().and_then(|d| d.get_element_by_id(MODAL_ID)) {
        add_classes(&modal, &[HIDDEN]);
    }
}

fn handle_click(router: &Rc<BrowserRouter>, event: &Event) {
    if let Some(link) = target_with(event, "data-nav") {
        event.prevent_default();
        let token = link.get_attribute("data-nav").unwrap_or_default();
        let router = router.clone();
        wasm_bindgen_futures::spawn_local(async move {
            router.navigate_token(&token).await;
        });
        return;
    }

    if let Some(button) = target_with(event, "data-carousel-step") {
        match button
            .get_attribute("data-carousel-step")
            .and_then(|s| s.parse::<i64>().ok())
        {
            Some(delta) => router.carousel().advance(delta),
            None => log::warn!("Malformed carousel step"),
        }
        return;
    }

    if let Some(card) = target_with(event, "data-member-id") {
        let id = card.get_attribute("data-member-id").unwrap_or_default();
        open_member_modal(router, &id);
        return;
    }

    let on_backdrop = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.id() == MODAL_ID);
    if on_backdrop || target_with(event, "data-modal-close").is_some() {
        close_member_modal();
    }
}

/// Installs the delegated click handler and the hash change listener.
///
/// The listeners live as long as the page.
pub fn install_listeners(router: Rc<BrowserRouter>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; listeners not installed");
        return;
    };
    let Some(document) = window.document() else {
        log::error!("No document; listeners not installed");
        return;
    };

    let click_router = router.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        handle_click(&click_router, &event);
    });
    if let Err(e) =
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        log::error!("Failed to install click listener: {:?}", e);
    }
    on_click.forget();

    let on_hash_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let router = router.clone();
        wasm_bindgen_futures::spawn_local(async move {
            router.handle_location_change().await;
        });
    });
    if let Err(e) = window
        .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref())
    {
        log::error!("Failed to install hashchange listener: {:?}", e);
    }
    on_hash_change.forget();
}

/// Writes the current year into the footer.
pub fn set_current_year() {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(YEAR_ID)) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}
