//! Typed records for the JSON resources.
//!
//! Payloads are hand-edited files, so every optional field is modelled
//! explicitly and unknown fields are ignored.

use serde::{Deserialize, Deserializer};

/// A lab member from `team.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Member {
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    #[serde(deserialize_with = "text_from_scalar")]
    pub years: Option<String>,
    pub bio: Option<String>,
    pub links: Vec<MemberLink>,
    pub details: Vec<DetailSection>,
}

impl Member {
    /// Identifier used to reopen this member's detail view.
    pub fn id(&self) -> &str {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(&self.name)
    }

    /// Position category, defaulting to "Other".
    pub fn position_or_other(&self) -> &str {
        self.position
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("Other")
    }

    /// Up to two initials taken from the words of the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemberLink {
    pub label: String,
    pub url: String,
}

impl MemberLink {
    pub fn is_pdf(&self) -> bool {
        self.url.to_lowercase().ends_with(".pdf")
    }
}

/// A titled block in a member's profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub data: DetailData,
}

/// Body of a profile block: prose, a bullet list, or dated entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetailData {
    Text(String),
    Items(Vec<String>),
    Entries(Vec<DetailEntry>),
    Other(serde_json::Value),
}

impl Default for DetailData {
    fn default() -> Self {
        DetailData::Items(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailEntry {
    pub title: String,
    pub subtitle: Option<String>,
    pub date: Option<String>,
}

/// A paper from `publications.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
}

/// Venue category derived from the free-form `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Venue {
    Journal,
    Conference,
    Other,
}

impl Venue {
    pub fn heading(&self) -> &'static str {
        match self {
            Venue::Journal => "Journals",
            Venue::Conference => "Conferences",
            Venue::Other => "Other",
        }
    }
}

impl Publication {
    pub fn venue(&self) -> Venue {
        let kind = self.kind.as_deref().unwrap_or("").to_lowercase();
        if kind.contains("journal") {
            Venue::Journal
        } else if kind.contains("conference") {
            Venue::Conference
        } else {
            Venue::Other
        }
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Accepts a string or a number; anything else reads as absent.
fn text_from_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Contents of `home/content.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeContent {
    pub has_open_positions: bool,
    pub news: Vec<NewsItem>,
    pub sponsors: Vec<Sponsor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub date: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl NewsItem {
    /// Parses the date as `YYYY-MM-DD` or an RFC 3339 timestamp (UTC).
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.date.trim();
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.naive_utc().date())
            })
    }

    /// Long US-style date, e.g. "May 1, 2024". Falls back to the raw string.
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    pub name: String,
    pub logo: String,
}
