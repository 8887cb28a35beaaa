//! Fetch-with-retry-and-cache access to site data.
//!
//! The store is the only owner of fetched data. A resource that loads
//! successfully once is kept for the rest of the session and never
//! requested again. "Not found" answers are not cached, so a file published
//! later shows up on the next visit to the page.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::resource::{Resource, ResourceFormat, ResourceKey, ResourceValue};
use super::transport::{FetchError, HttpResponse, Transport};
use crate::config::RetryPolicy;
use crate::timer::{JitterSource, Sleeper};

/// Result of resolving a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Fetched now or served from cache.
    Loaded(ResourceValue),
    /// The server answered 404.
    NotFound,
    /// Every attempt failed.
    Exhausted,
}

/// Failure to turn a fetched value into typed records.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{resource} is not a JSON resource")]
    NotJson { resource: ResourceKey },
    #[error("{resource} has an unexpected shape: {source}")]
    Shape {
        resource: ResourceKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Cached, retrying access to data resources.
pub struct DataStore<T, S> {
    transport: T,
    sleeper: S,
    jitter: RefCell<Box<dyn JitterSource>>,
    policy: RetryPolicy,
    cache: RefCell<HashMap<ResourceKey, ResourceValue>>,
}

impl<T: Transport, S: Sleeper> DataStore<T, S> {
    pub fn new(transport: T, sleeper: S, jitter: Box<dyn JitterSource>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            jitter: RefCell::new(jitter),
            policy,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, if any.
    pub fn cached(&self, key: ResourceKey) -> Option<ResourceValue> {
        self.cache.borrow().get(&key).cloned()
    }

    /// Resolves a resource, substituting empty content for a 404.
    ///
    /// Returns `None` only when every attempt failed; callers treat that
    /// the same as empty content.
    pub async fn fetch(&self, resource: &Resource) -> Option<ResourceValue> {
        match self.fetch_outcome(resource).await {
            FetchOutcome::Loaded(value) => Some(value),
            FetchOutcome::NotFound => Some(ResourceValue::empty(resource.format)),
            FetchOutcome::Exhausted => None,
        }
    }

    /// Resolves a resource, reporting how it went.
    ///
    /// Cache hits return without suspending.
    pub async fn fetch_outcome(&self, resource: &Resource) -> FetchOutcome {
        if let Some(value) = self.cached(resource.key) {
            log::debug!("Cache hit for {}", resource.key);
            return FetchOutcome::Loaded(value);
        }

        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 0..max_attempts {
            match self.attempt(resource).await {
                Ok(value) => {
                    log::info!("Loaded {} from {}", resource.key, resource.path);
                    self.cache.borrow_mut().insert(resource.key, value.clone());
                    return FetchOutcome::Loaded(value);
                }
                // A 404 is the only terminal answer.
                Err(e) if !e.is_retryable() => {
                    log::warn!(
                        "Data file not found: {}. Assuming no content for this page.",
                        resource.path
                    );
                    return FetchOutcome::NotFound;
                }
                Err(e) => {
                    log::error!(
                        "Attempt {} failed for {} ({}): {}",
                        attempt + 1,
                        resource.key,
                        resource.path,
                        e
                    );
                    if attempt + 1 < max_attempts {
                        let sample = self.jitter.borrow_mut().sample();
                        let delay = self.policy.backoff(attempt, sample);
                        log::debug!("Retrying {} in {} ms", resource.key, delay.as_millis());
                        self.sleeper.sleep(delay).await;
                    }
                }
            }
        }

        log::warn!(
            "Giving up on {} after {} attempts",
            resource.key,
            max_attempts
        );
        FetchOutcome::Exhausted
    }

    /// Fetches a JSON resource and decodes it into typed records.
    ///
    /// Missing data (404 or exhausted retries) decodes to `R::default()`.
    pub async fn fetch_records<R>(&self, resource: &Resource) -> Result<R, DecodeError>
    where
        R: DeserializeOwned + Default,
    {
        match self.fetch(resource).await {
            None => Ok(R::default()),
            Some(ResourceValue::Json(value)) => decode_records(resource.key, value),
            Some(ResourceValue::Text(_)) => Err(DecodeError::NotJson {
                resource: resource.key,
            }),
        }
    }

    async fn attempt(&self, resource: &Resource) -> Result<ResourceValue, FetchError> {
        let response = self.transport.get(&resource.path).await?;
        parse_response(response, resource.format)
    }
}

fn parse_response(
    response: HttpResponse,
    format: ResourceFormat,
) -> Result<ResourceValue, FetchError> {
    if !response.ok() {
        return Err(match response.status {
            404 => FetchError::NotFound,
            status => FetchError::Http { status },
        });
    }

    match format {
        ResourceFormat::Json => Ok(ResourceValue::Json(serde_json::from_str(&response.body)?)),
        ResourceFormat::Text => Ok(ResourceValue::Text(response.body)),
    }
}

fn decode_records<R>(resource: ResourceKey, value: serde_json::Value) -> Result<R, DecodeError>
where
    R: DeserializeOwned + Default,
{
    let is_empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if is_empty {
        return Ok(R::default());
    }
    serde_json::from_value(value).map_err(|source| DecodeError::Shape { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{HomeContent, Member};
    use crate::data::transport::testing::{Reply, ScriptedTransport};
    use crate::timer::testing::{FixedJitter, RecordingSleeper};
    use futures_util::FutureExt;
    use std::time::Duration;

    fn store(
        transport: &ScriptedTransport,
        sleeper: &RecordingSleeper,
    ) -> DataStore<ScriptedTransport, RecordingSleeper> {
        DataStore::new(
            transport.clone(),
            sleeper.clone(),
            Box::new(FixedJitter(0.25)),
            RetryPolicy::default(),
        )
    }

    fn team() -> Resource {
        Resource::new(ResourceKey::Team, "team.json")
    }

    fn join() -> Resource {
        Resource::new(ResourceKey::Join, "join.md")
    }

    #[test]
    fn test_not_found_yields_empty_and_is_not_cached() {
        let transport = ScriptedTransport::new();
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let first = pollster::block_on(store.fetch(&team()));
        assert_eq!(first, Some(ResourceValue::Json(serde_json::json!([]))));
        let text = pollster::block_on(store.fetch(&join()));
        assert_eq!(
            text,
            Some(ResourceValue::Text("No content available yet.".into()))
        );

        pollster::block_on(store.fetch(&team()));
        assert_eq!(transport.requests_for("team.json"), 2);
        assert!(store.cached(ResourceKey::Team).is_none());
        assert!(sleeper.delays.borrow().is_empty());
    }

    #[test]
    fn test_success_is_cached_forever() {
        let transport = ScriptedTransport::new();
        transport
            .push("team.json", Reply::ok(r#"[{"name": "Ada"}]"#))
            .always("team.json", Reply::Offline);
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let first = pollster::block_on(store.fetch(&team()));
        let second = store
            .fetch(&team())
            .now_or_never()
            .expect("cache hit must not suspend");

        assert_eq!(first, second);
        assert_eq!(transport.requests_for("team.json"), 1);
    }

    #[test]
    fn test_retries_three_times_with_backoff() {
        let transport = ScriptedTransport::new();
        transport.always("team.json", Reply::status(500));
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let outcome = pollster::block_on(store.fetch_outcome(&team()));

        assert_eq!(outcome, FetchOutcome::Exhausted);
        assert_eq!(transport.requests_for("team.json"), 3);
        assert_eq!(
            *sleeper.delays.borrow(),
            vec![Duration::from_millis(1250), Duration::from_millis(2250)]
        );
        assert_eq!(pollster::block_on(store.fetch(&team())), None);
    }

    #[test]
    fn test_recovers_after_transient_failures() {
        let transport = ScriptedTransport::new();
        transport
            .push("join.md", Reply::Offline)
            .push("join.md", Reply::status(503))
            .push("join.md", Reply::ok("# Join"));
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let value = pollster::block_on(store.fetch(&join()));

        assert_eq!(value, Some(ResourceValue::Text("# Join".into())));
        assert_eq!(sleeper.delays.borrow().len(), 2);
        assert!(store.cached(ResourceKey::Join).is_some());
    }

    #[test]
    fn test_not_found_after_failure_stops_retrying() {
        let transport = ScriptedTransport::new();
        transport
            .push("team.json", Reply::status(502))
            .push("team.json", Reply::status(404));
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let outcome = pollster::block_on(store.fetch_outcome(&team()));

        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(transport.requests_for("team.json"), 2);
    }

    #[test]
    fn test_invalid_json_is_retried() {
        let transport = ScriptedTransport::new();
        transport
            .push("team.json", Reply::ok("{oops"))
            .push("team.json", Reply::ok("[]"));
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let value = pollster::block_on(store.fetch(&team()));

        assert_eq!(value, Some(ResourceValue::Json(serde_json::json!([]))));
        assert_eq!(transport.requests_for("team.json"), 2);
    }

    #[test]
    fn test_fetch_records_defaults_and_shape_errors() {
        let transport = ScriptedTransport::new();
        transport.always("team.json", Reply::ok(r#"{"name": "not a list"}"#));
        let sleeper = RecordingSleeper::default();
        let store = store(&transport, &sleeper);

        let home: HomeContent =
            pollster::block_on(store.fetch_records(&Resource::new(ResourceKey::Home, "home.json")))
                .unwrap();
        assert_eq!(home, HomeContent::default());

        let members: Result<Vec<Member>, _> = pollster::block_on(store.fetch_records(&team()));
        assert!(matches!(
            members,
            Err(DecodeError::Shape {
                resource: ResourceKey::Team,
                ..
            })
        ));
    }
}
