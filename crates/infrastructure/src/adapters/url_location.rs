//! Location backed by a parsed URL.

use ghkit_application::ports::Location;
use url::Url;

/// The current location as a full URL, e.g. the callback URL the provider
/// redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
    url: Url,
}

impl UrlLocation {
    /// Wraps an already parsed URL.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parses a URL string.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }
}

impl Location for UrlLocation {
    fn path(&self) -> &str {
        self.url.path()
    }

    fn query(&self) -> &str {
        self.url.query().unwrap_or_default()
    }
}
