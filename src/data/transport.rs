//! Network access for data resources.
//!
//! The store only needs "GET this path and give me status + body". On WASM
//! this is the browser's `fetch`; tests plug in scripted transports.

use std::future::Future;

use thiserror::Error;

/// Errors from a single retrieval attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered 404.
    #[error("resource not found")]
    NotFound,
    /// Any other non-success status.
    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },
    /// The request never produced a response.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Raised by the browser transport
    #[error("transport failure: {0}")]
    Transport(String),
    /// The body could not be parsed as JSON.
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::NotFound)
    }
}

/// Raw response to a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests for resource paths.
///
/// Like the storage traits, this does not require `Send`: WASM is
/// single-threaded and JS promises cannot cross threads.
pub trait Transport {
    /// Issues a GET for `path`.
    ///
    /// Any HTTP status is a successful transport result; `Err` means the
    /// request itself failed.
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, FetchError>>;
}

/// Browser `fetch` based transport.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[cfg(target_arch = "wasm32")]
impl Transport for BrowserTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, FetchError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window =
            web_sys::window().ok_or_else(|| FetchError::Transport("no window".to_string()))?;

        let response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(js_error)?
            .dyn_into::<web_sys::Response>()
            .map_err(js_error)?;

        let status = response.status();
        let text_promise = response.text().map_err(js_error)?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> FetchError {
    FetchError::Transport(format!("{:?}", value))
}

/// Scripted transports used by unit tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    /// Scripted reply for one request.
    #[derive(Debug, Clone)]
    pub enum Reply {
        Status(u16, String),
        Offline,
    }

    impl Reply {
        pub fn ok(body: impl Into<String>) -> Self {
            Reply::Status(200, body.into())
        }

        pub fn status(status: u16) -> Self {
            Reply::Status(status, String::new())
        }
    }

    #[derive(Default)]
    struct Script {
        queued: HashMap<String, VecDeque<Reply>>,
        fallback: HashMap<String, Reply>,
        requests: Vec<String>,
    }

    /// Replays queued replies per path, then a per-path fallback.
    ///
    /// Paths with nothing scripted answer 404.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        script: Rc<RefCell<Script>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues one reply for `path`.
        pub fn push(&self, path: &str, reply: Reply) -> &Self {
            self.script
                .borrow_mut()
                .queued
                .entry(path.to_string())
                .or_default()
                .push_back(reply);
            self
        }

        /// Sets the reply used once the queue for `path` is drained.
        pub fn always(&self, path: &str, reply: Reply) -> &Self {
            self.script
                .borrow_mut()
                .fallback
                .insert(path.to_string(), reply);
            self
        }

        pub fn requests_for(&self, path: &str) -> usize {
            self.script
                .borrow()
                .requests
                .iter()
                .filter(|p| p.as_str() == path)
                .count()
        }
    }

    impl Transport for ScriptedTransport {
        async fn get(&self, path: &str) -> Result<HttpResponse, FetchError> {
            let reply = {
                let mut script = self.script.borrow_mut();
                script.requests.push(path.to_string());
                let queued = script.queued.get_mut(path).and_then(VecDeque::pop_front);
                queued
                    .or_else(|| script.fallback.get(path).cloned())
                    .unwrap_or_else(|| Reply::status(404))
            };
            match reply {
                Reply::Status(status, body) => Ok(HttpResponse { status, body }),
                Reply::Offline => Err(FetchError::Transport("network unreachable".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_terminal() {
        assert!(!FetchError::NotFound.is_retryable());
        assert!(FetchError::Http { status: 500 }.is_retryable());
        assert!(FetchError::Transport("offline".into()).is_retryable());
    }

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_ok_range() {
        assert!(response(200).ok());
        assert!(response(204).ok());
        assert!(!response(304).ok());
        assert!(!response(404).ok());
    }
}
