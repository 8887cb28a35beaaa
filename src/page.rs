//! Page identifiers and their location tokens.

/// A top-level page of the site.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    #[default]
    Home,
    Team,
    Research,
    Publications,
    Join,
    Contact,
}

impl PageId {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Used by nav highlighting
    pub fn all() -> &'static [PageId] {
        &[
            PageId::Home,
            PageId::Team,
            PageId::Research,
            PageId::Publications,
            PageId::Join,
            PageId::Contact,
        ]
    }

    /// Token used in the URL hash and in `data-nav` attributes.
    pub fn token(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Team => "team",
            PageId::Research => "research",
            PageId::Publications => "publications",
            PageId::Join => "join",
            PageId::Contact => "contact",
        }
    }

    pub fn from_token(token: &str) -> Option<PageId> {
        PageId::all().iter().copied().find(|p| p.token() == token)
    }

    /// Page addressed by a raw location hash (with or without `#`).
    ///
    /// Empty and unrecognized hashes address the home page.
    pub fn from_hash(hash: &str) -> PageId {
        let token = hash.trim_start_matches('#');
        PageId::from_token(token).unwrap_or_default()
    }

    /// Hash written to the location when this page is navigated to.
    pub fn hash(&self) -> &'static str {
        match self {
            PageId::Home => "",
            other => other.token(),
        }
    }

    /// Element id of this page's navigation link.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Used by nav highlighting
    pub fn nav_link_id(&self) -> String {
        format!("nav-{}", self.token())
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip_for_every_page() {
        for page in PageId::all() {
            assert_eq!(PageId::from_hash(page.hash()), *page);
        }
    }

    #[test]
    fn test_unrecognized_hash_is_home() {
        assert_eq!(PageId::from_hash(""), PageId::Home);
        assert_eq!(PageId::from_hash("#"), PageId::Home);
        assert_eq!(PageId::from_hash("#labs"), PageId::Home);
        assert_eq!(PageId::from_hash("#TEAM"), PageId::Home);
        assert_eq!(PageId::from_hash("#team"), PageId::Team);
        assert_eq!(PageId::from_hash("contact"), PageId::Contact);
    }

    #[test]
    fn test_home_hash_is_empty() {
        assert_eq!(PageId::Home.hash(), "");
        assert_eq!(PageId::Join.hash(), "join");
        assert_eq!(PageId::Publications.nav_link_id(), "nav-publications");
    }
}
