#![warn(clippy::all)]

//! AICV Lab Site - client-side renderer for the laboratory website.
//!
//! Pages are rendered from JSON and Markdown files published next to the
//! site and swapped into the host page as the URL hash changes.

mod app;
mod carousel;
mod config;
mod data;
mod page;
mod registry;
mod render;
mod router;
mod timer;
#[cfg(target_arch = "wasm32")]
mod web;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let config = config::SiteConfig::default();
    log::info!("{} site renderer", config.lab_name);
    log::info!("This build runs in the browser; build for wasm32 and serve it with the data/ directory.");
    for key in data::ResourceKey::all() {
        log::info!("  {:<12} {}", key.label(), config.resources.path(*key));
    }
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use std::rc::Rc;

    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Redirect `log` messages to `console.log`:
    console_log::init_with_level(log::Level::Debug).ok();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available; site not started");
        return;
    };

    let config = config::SiteConfig::load();
    let router = app::build_site(
        config,
        app::Platform {
            transport: data::BrowserTransport,
            sleeper: timer::BrowserSleeper,
            jitter: Box::new(timer::MathRandom),
            scheduler: Rc::new(timer::BrowserScheduler::default()),
            view: Box::new(web::DomView::new(document)),
            location: Box::new(web::WebLocation),
        },
    );

    web::set_current_year();
    web::install_listeners(router.clone());

    wasm_bindgen_futures::spawn_local(async move {
        router.init_from_location().await;
    });
}
