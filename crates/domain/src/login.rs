//! Provider authorization URL construction.

use url::form_urlencoded;

use crate::redirect::RedirectState;

/// GitHub OAuth authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// Scopes every login requests, before any caller-supplied ones.
pub const BASE_SCOPES: [&str; 2] = ["project", "repo"];

/// Builds the provider login URL.
///
/// The query carries exactly `client_id`, `state` (JSON `{"prevPath": ..}`)
/// and `scope`, in that order. Scopes are the base scopes followed by
/// `scopes` in the given order; duplicates are kept.
#[must_use]
pub fn login_url<S: AsRef<str>>(client_id: &str, scopes: &[S], prev_path: &str) -> String {
    let scope = BASE_SCOPES
        .iter()
        .copied()
        .chain(scopes.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ");

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("state", &RedirectState::new(prev_path).encode())
        .append_pair("scope", &scope)
        .finish();

    format!("{AUTHORIZE_URL}?{query}")
}
