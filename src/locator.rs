//! Resource locators and fragment derivation.
//!
//! Items keep their locators exactly as the source supplied them. Nothing is
//! parsed at construction time, so a malformed base only surfaces when a
//! fragment-qualified locator is derived from it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A raw, unvalidated resource locator (document URL, thumbnail URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Wrap a raw locator string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The locator as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no locator was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the locator as an absolute URL.
    pub fn parse(&self) -> Result<Url> {
        Url::parse(&self.0).map_err(|e| Error::malformed_locator(&self.0, e))
    }

    /// Derive a locator pointing inside this resource.
    ///
    /// Any fragment already present on the base is replaced.
    pub fn with_fragment(&self, fragment: &str) -> Result<Url> {
        let mut url = self.parse()?;
        url.set_fragment(Some(fragment));
        Ok(url)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}
