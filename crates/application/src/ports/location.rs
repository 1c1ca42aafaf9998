//! Current-location port.
//!
//! The host environment (a browser page, a local callback listener, a CLI
//! argument) tells the application where it is: the path the user is on and
//! the query string the provider redirected back with.

/// Read-only view of the current location.
pub trait Location: Send + Sync {
    /// Path component, e.g. `/sprints/12`.
    fn path(&self) -> &str;

    /// Raw query string, with or without the leading `?`.
    fn query(&self) -> &str;
}

/// A fixed location, handy when the path and query are already known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocation {
    path: String,
    query: String,
}

impl StaticLocation {
    /// Creates a location from a path and a query string.
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }
}

impl Location for StaticLocation {
    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> &str {
        &self.query
    }
}
