//! Backend endpoint construction.
//!
//! All calls hang off a caller-supplied API base URL. Path segments are
//! appended with percent-encoding so module names cannot escape their
//! segment.

use serde::{Deserialize, Serialize};
use url::Url;

use super::ApiRequest;
use crate::error::{DomainError, DomainResult};
use crate::token::Token;

/// Validated API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    url: Url,
}

impl ApiBase {
    /// Parses an API base URL such as `https://example.com/api`.
    ///
    /// Any query string or fragment on the base is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL does not parse or
    /// cannot have path segments appended.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let mut url =
            Url::parse(raw.trim()).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
        if url.cannot_be_a_base() {
            return Err(DomainError::InvalidUrl(format!("not a base URL: {raw}")));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { url })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }

    /// `POST {base}/auth?code={code}`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the path cannot be extended.
    pub fn code_exchange(&self, code: &str) -> DomainResult<ApiRequest> {
        let mut url = self.join(&["auth"])?;
        url.query_pairs_mut().append_pair("code", code);
        Ok(ApiRequest::post(url))
    }

    /// `GET {base}/github/issues?repo={module}`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the path cannot be extended.
    pub fn list_issues(&self, query: &IssueQuery) -> DomainResult<ApiRequest> {
        let mut url = self.join(&["github", "issues"])?;
        url.query_pairs_mut().append_pair("repo", &query.module);
        Ok(ApiRequest::get(url))
    }

    /// `POST {base}/github/clone/{module}[/{issue}][?sprint={sprint}]`
    /// with the bearer credential attached.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the path cannot be extended.
    pub fn clone_target(&self, target: &CloneTarget, token: Token) -> DomainResult<ApiRequest> {
        let issue = target.issue.filter(|&n| n != 0).map(|n| n.to_string());
        let mut segments = vec!["github", "clone", target.module.as_str()];
        if let Some(issue) = issue.as_deref() {
            segments.push(issue);
        }

        let mut url = self.join(&segments)?;
        if let Some(sprint) = target.sprint.as_deref() {
            url.query_pairs_mut().append_pair("sprint", sprint);
        }
        Ok(ApiRequest::post(url).with_bearer(token))
    }

    fn join(&self, segments: &[&str]) -> DomainResult<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(format!("not a base URL: {}", self.url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// What a clone operation copies: a whole module or a single issue of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneTarget {
    /// Repository identifier
    pub module: String,
    /// Issue number within the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    /// Sprint to clone into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
}

impl CloneTarget {
    /// Targets a whole module.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCloneTarget` if `module` is blank.
    pub fn module(module: impl Into<String>) -> DomainResult<Self> {
        let module = module.into();
        if module.trim().is_empty() {
            return Err(DomainError::InvalidCloneTarget(
                "module name is empty".to_string(),
            ));
        }
        Ok(Self {
            module,
            issue: None,
            sprint: None,
        })
    }

    /// Narrows the target to one issue. Issue `0` clones the whole module.
    #[must_use]
    pub const fn with_issue(mut self, issue: u64) -> Self {
        self.issue = Some(issue);
        self
    }

    /// Sets the sprint; an empty sprint is treated as absent.
    #[must_use]
    pub fn with_sprint(mut self, sprint: impl Into<String>) -> Self {
        let sprint = sprint.into();
        self.sprint = (!sprint.is_empty()).then_some(sprint);
        self
    }
}

/// Arguments an issue listing is bound to.
///
/// `week` is not sent to the backend; a change of week still counts as a
/// change of arguments and triggers a new fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    /// Repository identifier
    pub module: String,
    /// Week the listing is displayed for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
}

impl IssueQuery {
    /// Creates a query for the given module.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            week: None,
        }
    }

    /// Sets the week.
    #[must_use]
    pub fn with_week(mut self, week: impl Into<String>) -> Self {
        self.week = Some(week.into());
        self
    }
}
