//! Application wiring.
//!
//! Builds the data store, page registry, carousel and router from a
//! `SiteConfig` and the platform services they run on. The browser entry
//! point and the tests assemble the site the same way.

use std::rc::Rc;

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::data::{DataStore, Transport};
use crate::registry::PageRegistry;
use crate::router::{ContentView, Location, Router};
use crate::timer::{JitterSource, Scheduler, Sleeper};

/// Platform services the site runs on.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Wired by the wasm entry point
pub struct Platform<T, S> {
    pub transport: T,
    pub sleeper: S,
    pub jitter: Box<dyn JitterSource>,
    pub scheduler: Rc<dyn Scheduler>,
    pub view: Box<dyn ContentView>,
    pub location: Box<dyn Location>,
}

/// Assembles the router and everything behind it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Wired by the wasm entry point
pub fn build_site<T: Transport, S: Sleeper>(
    config: SiteConfig,
    platform: Platform<T, S>,
) -> Rc<Router<T, S>> {
    let config = Rc::new(config);
    log::debug!(
        "Building site for {} (retry: {:?}, carousel every {:?})",
        config.lab_name,
        config.retry,
        config.carousel_interval()
    );

    let store = Rc::new(DataStore::new(
        platform.transport,
        platform.sleeper,
        platform.jitter,
        config.retry,
    ));
    let registry = PageRegistry::new(store, config.clone());
    let carousel = Carousel::new(platform.scheduler, config.carousel_interval());

    Rc::new(Router::new(
        registry,
        platform.view,
        platform.location,
        carousel,
    ))
}
