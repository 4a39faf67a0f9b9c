//! Page paths.
//!
//! Every stored document is keyed by the public path of the page it
//! describes. Paths always begin with `/`; the home page is `/`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The key of a page document (`/`, `/buy`, `/store/featured`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PagePath(String);

impl PagePath {
    /// The home page path.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parses a path. A single trailing slash is dropped (`/buy/` → `/buy`).
    pub fn parse(s: &str) -> crate::Result<Self> {
        let invalid = |reason| crate::Error::InvalidPath {
            path: s.to_string(),
            reason,
        };

        if !s.starts_with('/') {
            return Err(invalid("must begin with '/'"));
        }
        if s.contains("//") {
            return Err(invalid("empty segment"));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(invalid("contains whitespace, query or fragment"));
        }

        let trimmed = if s.len() > 1 { s.trim_end_matches('/') } else { s };
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a path from a route slug (`"buy"` → `/buy`).
    pub fn from_slug(slug: &str) -> crate::Result<Self> {
        Self::parse(&format!("/{}", slug.trim_start_matches('/')))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the home page.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The path without its leading slash, `None` for the home page.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        if self.is_root() { None } else { Some(&self.0[1..]) }
    }
}

impl Default for PagePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PagePath {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PagePath {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PagePath> for String {
    fn from(p: PagePath) -> Self {
        p.0
    }
}
