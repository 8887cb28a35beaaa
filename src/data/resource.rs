//! Resource definitions for site data.
//!
//! Each page pulls its content from a small, statically configured set of
//! files served next to the site. A resource is addressed by a stable key
//! and knows how its body should be interpreted.

use serde::{Deserialize, Serialize};

/// Stable identifier of a data resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKey {
    Team,
    Research,
    Publications,
    Home,
    Join,
}

impl ResourceKey {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKey::Team => "team",
            ResourceKey::Research => "research",
            ResourceKey::Publications => "publications",
            ResourceKey::Home => "home",
            ResourceKey::Join => "join",
        }
    }

    pub fn all() -> &'static [ResourceKey] {
        &[
            ResourceKey::Team,
            ResourceKey::Research,
            ResourceKey::Publications,
            ResourceKey::Home,
            ResourceKey::Join,
        ]
    }

    /// Body format this resource is published in.
    pub fn format(&self) -> ResourceFormat {
        match self {
            ResourceKey::Team | ResourceKey::Publications | ResourceKey::Home => {
                ResourceFormat::Json
            }
            ResourceKey::Research | ResourceKey::Join => ResourceFormat::Text,
        }
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a fetched body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    Json,
    Text,
}

/// A named data source and where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub key: ResourceKey,
    pub path: String,
    pub format: ResourceFormat,
}

impl Resource {
    pub fn new(key: ResourceKey, path: impl Into<String>) -> Self {
        Self {
            key,
            path: path.into(),
            format: key.format(),
        }
    }
}

/// A successfully fetched (or substituted) resource body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    Json(serde_json::Value),
    Text(String),
}

impl ResourceValue {
    /// The value handed out for a resource that does not exist yet.
    pub fn empty(format: ResourceFormat) -> Self {
        match format {
            ResourceFormat::Json => ResourceValue::Json(serde_json::Value::Array(Vec::new())),
            ResourceFormat::Text => ResourceValue::Text(MISSING_TEXT_PLACEHOLDER.to_string()),
        }
    }
}

/// Placeholder returned for text resources that answered 404.
pub const MISSING_TEXT_PLACEHOLDER: &str = "No content available yet.";
