//! Hash-based page router.
//!
//! The router owns the current page, keeps the URL hash in sync with it and
//! drives one render cycle per navigation:
//!
//! ```text
//! navigate(page) ──► set hash ──► load()
//! hashchange ─────► init_from_location() ──► load()
//!
//! load(): loading ──► PageRegistry::render ──► rendered | errored
//! ```
//!
//! Overlapping loads are resolved last-call-wins: each `load()` takes a
//! generation number and only the newest one may touch the view once its
//! render finishes.

use std::cell::Cell;

use crate::carousel::{Carousel, SlideSurface};
use crate::data::Transport;
use crate::page::PageId;
use crate::registry::PageRegistry;
use crate::timer::Sleeper;

/// The addressable location (URL hash) of the page.
pub trait Location {
    /// Current hash, with or without the leading `#`.
    fn hash(&self) -> String;

    fn set_hash(&self, hash: &str);
}

/// The content region and its surrounding chrome.
pub trait ContentView {
    /// Hides and clears the content, hides the error banner, shows the
    /// busy indicator.
    fn begin_loading(&self);

    /// Replaces the content with rendered markup.
    fn install(&self, markup: &str);

    /// Shows the error banner.
    fn show_error(&self);

    /// Hides the busy indicator.
    fn end_loading(&self);

    /// Marks `active`'s navigation link active and every other inactive.
    fn highlight_nav(&self, active: PageId);

    fn scroll_to_top(&self);

    /// Makes the content visible again.
    fn reveal(&self);

    /// Slides of the news carousel in the installed content.
    fn slides(&self) -> Box<dyn SlideSurface>;
}

/// Progress of the current navigation cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    #[default]
    Idle,
    Loading,
    Rendered,
    Errored,
}

pub struct Router<T, S> {
    registry: PageRegistry<T, S>,
    view: Box<dyn ContentView>,
    location: Box<dyn Location>,
    carousel: Carousel,
    current: Cell<PageId>,
    status: Cell<RenderStatus>,
    generation: Cell<u64>,
}

impl<T: Transport, S: Sleeper> Router<T, S> {
    pub fn new(
        registry: PageRegistry<T, S>,
        view: Box<dyn ContentView>,
        location: Box<dyn Location>,
        carousel: Carousel,
    ) -> Self {
        Self {
            registry,
            view,
            location,
            carousel,
            current: Cell::new(PageId::Home),
            status: Cell::new(RenderStatus::Idle),
            generation: Cell::new(0),
        }
    }

    #[allow(dead_code)] // Queried by tests
    pub fn current_page(&self) -> PageId {
        self.current.get()
    }

    #[allow(dead_code)] // Queried by tests
    pub fn status(&self) -> RenderStatus {
        self.status.get()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Used by the team modal handler
    pub fn registry(&self) -> &PageRegistry<T, S> {
        &self.registry
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Used by the carousel buttons
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Switches to `page`, updates the hash and renders.
    pub async fn navigate(&self, page: PageId) {
        log::info!("Navigating to {}", page);
        self.current.set(page);

        let hash = page.hash();
        if normalize_hash(&self.location.hash()) != hash {
            self.location.set_hash(hash);
        }

        self.load().await;
    }

    /// Navigates by raw token; unknown tokens lead home.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Driven by link clicks
    pub async fn navigate_token(&self, token: &str) {
        let page = PageId::from_token(token).unwrap_or_else(|| {
            log::warn!("Unknown page '{}', showing home", token);
            PageId::Home
        });
        self.navigate(page).await;
    }

    /// Derives the page from the current hash and renders it.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Driven by page start
    pub async fn init_from_location(&self) {
        let page = PageId::from_hash(&self.location.hash());
        self.current.set(page);
        self.load().await;
    }

    /// Reacts to a hash change event.
    ///
    /// A hash that resolves to the current page is ignored. That covers
    /// the echoes of hashes written by `navigate`, however many are queued,
    /// since each navigation loads its page itself.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Driven by hashchange
    pub async fn handle_location_change(&self) {
        let page = PageId::from_hash(&self.location.hash());
        if page == self.current.get() {
            log::debug!("Ignoring hash change to current page {}", page);
            return;
        }
        self.init_from_location().await;
    }

    /// Renders the current page into the view.
    pub async fn load(&self) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        let page = self.current.get();

        self.status.set(RenderStatus::Loading);
        self.carousel.teardown();
        self.view.begin_loading();

        let started = web_time::Instant::now();
        let result = self.registry.render(page).await;

        if self.generation.get() != generation {
            log::debug!("Discarding superseded render of {}", page);
            return;
        }

        match result {
            Ok(markup) => {
                self.view.install(&markup.into_string());
                self.status.set(RenderStatus::Rendered);
                log::info!(
                    "Rendered {} in {} ms",
                    page,
                    started.elapsed().as_millis()
                );
            }
            Err(fault) => {
                log::error!("Error rendering page {}: {}", page, fault);
                self.view.show_error();
                self.status.set(RenderStatus::Errored);
            }
        }

        self.view.end_loading();
        self.view.highlight_nav(page);
        self.view.scroll_to_top();
        self.view.reveal();

        if page == PageId::Home {
            self.carousel.initialize(self.view.slides());
        }
    }
}

fn normalize_hash(hash: &str) -> &str {
    hash.trim_start_matches('#')
}
