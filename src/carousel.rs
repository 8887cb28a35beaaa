//! News carousel state machine.
//!
//! The carousel only knows slide indices. Showing and hiding the actual
//! slide elements goes through a `SlideSurface`, and auto-rotation is a
//! repeating task on a `Scheduler`, so the whole thing runs without a DOM.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{Scheduler, TimerHandle};

/// The rendered slides of one carousel.
pub trait SlideSurface {
    /// Number of slides present in the rendered content.
    fn slide_count(&self) -> usize;

    /// Shows (display block, opacity 1) or hides (display none, opacity 0)
    /// one slide.
    fn set_visible(&self, index: usize, visible: bool);
}

/// Index model of the carousel.
#[derive(Default)]
struct CarouselState {
    surface: Option<Box<dyn SlideSurface>>,
    len: usize,
    active_index: usize,
    rotating: bool,
}

impl CarouselState {
    fn show(&mut self, n: i64) {
        if self.len == 0 {
            return;
        }
        let len = i64::try_from(self.len).unwrap_or(i64::MAX);
        // rem_euclid keeps negative targets inside [0, len).
        let index = usize::try_from(n.rem_euclid(len)).unwrap_or(0);
        self.active_index = index;

        if let Some(surface) = &self.surface {
            for i in 0..self.len {
                surface.set_visible(i, i == index);
            }
        }
    }

    fn step_target(&self, delta: i64) -> i64 {
        i64::try_from(self.active_index)
            .unwrap_or(0)
            .saturating_add(delta)
    }
}

/// Rotating slide show with manual stepping.
///
/// At most one rotation timer is alive per carousel: every path that arms
/// a timer clears the previous one first.
pub struct Carousel {
    state: Rc<RefCell<CarouselState>>,
    scheduler: Rc<dyn Scheduler>,
    interval: Duration,
    timer: Cell<Option<TimerHandle>>,
}

impl Carousel {
    pub fn new(scheduler: Rc<dyn Scheduler>, interval: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(CarouselState::default())),
            scheduler,
            interval,
            timer: Cell::new(None),
        }
    }

    /// Takes over freshly rendered slides.
    ///
    /// Any previous rotation is stopped. With no slides the carousel stays
    /// idle; with one slide it shows it without rotating.
    pub fn initialize(&self, surface: Box<dyn SlideSurface>) {
        self.teardown();

        let len = surface.slide_count();
        {
            let mut state = self.state.borrow_mut();
            state.surface = Some(surface);
            state.len = len;
            state.active_index = 0;
        }

        if len == 0 {
            log::debug!("No news slides, carousel idle");
            return;
        }

        self.state.borrow_mut().show(0);
        if len > 1 {
            self.start_rotation();
        }
        log::debug!("News carousel initialized with {} slides", len);
    }

    /// Shows slide `n`, wrapping in both directions.
    #[allow(dead_code)] // Used by tests
    pub fn show(&self, n: i64) {
        self.state.borrow_mut().show(n);
    }

    /// User-triggered step; restarts the rotation period.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Driven by the carousel buttons
    pub fn advance(&self, delta: i64) {
        self.stop_rotation();
        let len = {
            let mut state = self.state.borrow_mut();
            let target = state.step_target(delta);
            state.show(target);
            state.len
        };
        if len > 1 {
            self.start_rotation();
        }
    }

    /// Stops rotation and forgets the slides.
    pub fn teardown(&self) {
        self.stop_rotation();
        *self.state.borrow_mut() = CarouselState::default();
    }

    #[allow(dead_code)] // Queried by tests
    pub fn active_index(&self) -> usize {
        self.state.borrow().active_index
    }

    #[allow(dead_code)] // Queried by tests
    pub fn slide_count(&self) -> usize {
        self.state.borrow().len
    }

    #[allow(dead_code)] // Queried by tests
    pub fn is_rotating(&self) -> bool {
        self.state.borrow().rotating
    }

    fn start_rotation(&self) {
        self.stop_rotation();

        let state = Rc::clone(&self.state);
        let handle = self.scheduler.set_interval(
            self.interval,
            Box::new(move || {
                let mut state = state.borrow_mut();
                let target = state.step_target(1);
                state.show(target);
            }),
        );
        self.timer.set(handle);
        self.state.borrow_mut().rotating = handle.is_some();
    }

    fn stop_rotation(&self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.clear_interval(handle);
        }
        self.state.borrow_mut().rotating = false;
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.stop_rotation();
    }
}
