//! Timed waits and repeating tasks.
//!
//! Retry backoff needs a one-shot async sleep and the news carousel needs a
//! cancellable repeating task. Both go through traits so tests can drive
//! time by hand instead of waiting on a real clock.

use std::future::Future;
use std::time::Duration;

/// One-shot asynchronous delay.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Handle to a running repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Minted by the browser scheduler
pub struct TimerHandle(pub i32);

/// Schedules repeating callbacks.
pub trait Scheduler {
    /// Calls `tick` every `period` until the returned handle is cleared.
    fn set_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> Option<TimerHandle>;

    /// Stops a task. Clearing an unknown handle is a no-op.
    fn clear_interval(&self, handle: TimerHandle);
}

/// Source of uniform random samples in `[0, 1)`.
pub trait JitterSource {
    fn sample(&mut self) -> f64;
}

/// Browser `setTimeout` backed sleeper.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

#[cfg(target_arch = "wasm32")]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, duration: Duration) {
        sleep_ms(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)).await;
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = setTimeout)]
        fn set_timeout(closure: &Closure<dyn FnMut()>, millis: u32) -> i32;
    }

    let (tx, rx) = futures_channel::oneshot::channel::<()>();
    let closure = Closure::once(move || {
        let _ = tx.send(());
    });
    set_timeout(&closure, ms);
    let _ = rx.await;
}

/// `Math.random()` jitter.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl JitterSource for MathRandom {
    fn sample(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// `window.setInterval` backed scheduler.
///
/// Keeps each callback closure alive until its interval is cleared.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct BrowserScheduler {
    closures: std::cell::RefCell<
        std::collections::HashMap<TimerHandle, wasm_bindgen::closure::Closure<dyn FnMut()>>,
    >,
}

#[cfg(target_arch = "wasm32")]
impl Scheduler for BrowserScheduler {
    fn set_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> Option<TimerHandle> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let window = web_sys::window()?;
        let closure = Closure::wrap(tick);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(id) => {
                let handle = TimerHandle(id);
                self.closures.borrow_mut().insert(handle, closure);
                Some(handle)
            }
            Err(e) => {
                log::warn!("Failed to start interval: {:?}", e);
                None
            }
        }
    }

    fn clear_interval(&self, handle: TimerHandle) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle.0);
        }
        self.closures.borrow_mut().remove(&handle);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_manual_scheduler_fires_on_period() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        scheduler.set_interval(
            Duration::from_millis(100),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(count.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        scheduler.advance(Duration::from_millis(250));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_cleared_interval_stops() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = scheduler
            .set_interval(
                Duration::from_millis(10),
                Box::new(move || counter.set(counter.get() + 1)),
            )
            .unwrap();

        scheduler.advance(Duration::from_millis(10));
        scheduler.clear_interval(handle);
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.active_count(), 0);
    }
}
