//! Site configuration.
//!
//! Everything has a built-in default matching the deployed site layout. A
//! host page may override any part with an inline JSON document:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "retry": { "max_attempts": 5 } }
//! </script>
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::{Resource, ResourceKey};

/// Paths of every data resource, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub team: String,
    pub research: String,
    pub publications: String,
    pub home: String,
    pub join: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            team: "./data/team/team.json".to_string(),
            research: "./data/research/research.txt".to_string(),
            publications: "./data/publications/publications.json".to_string(),
            home: "./data/home/content.json".to_string(),
            join: "./data/join/join.md".to_string(),
        }
    }
}

impl ResourcePaths {
    pub fn path(&self, key: ResourceKey) -> &str {
        match key {
            ResourceKey::Team => &self.team,
            ResourceKey::Research => &self.research,
            ResourceKey::Publications => &self.publications,
            ResourceKey::Home => &self.home,
            ResourceKey::Join => &self.join,
        }
    }

    pub fn resource(&self, key: ResourceKey) -> Resource {
        Resource::new(key, self.path(key))
    }
}

/// Retry schedule for resource fetches.
///
/// Attempt `i` (0-indexed) that fails waits `base_delay * 2^i + jitter`
/// before attempt `i + 1`, with jitter uniform in `[0, max_jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_jitter_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` given a jitter sample in `[0, 1)`.
    pub fn backoff(&self, attempt: u32, jitter_sample: f64) -> Duration {
        let exponential = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt));
        let jitter = (self.max_jitter_ms as f64 * jitter_sample.clamp(0.0, 1.0)).floor() as u64;
        // A sample of exactly 1.0 must stay below the jitter ceiling.
        let jitter = jitter.min(self.max_jitter_ms.saturating_sub(1));
        Duration::from_millis(exponential.saturating_add(jitter))
    }
}

/// Contact card shown on the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub address: Vec<String>,
    pub phone: Option<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "info@researchgroup.edu".to_string(),
            address: Vec::new(),
            phone: None,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub lab_name: String,
    pub resources: ResourcePaths,
    pub retry: RetryPolicy,
    /// Auto-rotation period of the news carousel.
    pub carousel_interval_ms: u64,
    pub contact: ContactInfo,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lab_name: "Artificial Intelligence and Computer Vision Laboratory".to_string(),
            resources: ResourcePaths::default(),
            retry: RetryPolicy::default(),
            carousel_interval_ms: 8000,
            contact: ContactInfo::default(),
        }
    }
}

impl SiteConfig {
    /// Id of the optional inline configuration element.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Read by `load`
    pub const ELEMENT_ID: &'static str = "site-config";

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    /// Parses an override document, falling back to defaults on error.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Called by `load`
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => {
                log::info!("Loaded site configuration overrides");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse site configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Loads configuration from the host page.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Self::default();
        };

        match document
            .get_element_by_id(Self::ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0, 0.0), Duration::from_millis(1000));
        assert_eq!(policy.backoff(1, 0.0), Duration::from_millis(2000));
        assert_eq!(policy.backoff(2, 0.5), Duration::from_millis(4500));
    }

    #[test]
    fn test_backoff_jitter_stays_below_ceiling() {
        let policy = RetryPolicy::default();
        for sample in [0.0, 0.25, 0.999_999, 1.0] {
            let delay = policy.backoff(0, sample).as_millis();
            assert!((1000..2000).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_json_or_default(
            r#"{"retry": {"max_attempts": 5}, "resources": {"join": "/join.md"}}"#,
        );
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 1000);
        assert_eq!(config.resources.join, "/join.md");
        assert_eq!(config.resources.team, "./data/team/team.json");
        assert_eq!(config.carousel_interval(), Duration::from_millis(8000));
    }

    #[test]
    fn test_invalid_override_uses_defaults() {
        assert_eq!(SiteConfig::from_json_or_default("{not json"), SiteConfig::default());
    }

    #[test]
    fn test_resource_table() {
        let paths = ResourcePaths::default();
        let join = paths.resource(ResourceKey::Join);
        assert_eq!(join.path, "./data/join/join.md");
        assert_eq!(join.format, crate::data::ResourceFormat::Text);
    }
}
