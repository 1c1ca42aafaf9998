//! Login URL for the current location.

use ghkit_domain::login_url;

use crate::ports::Location;

/// Builds the provider login URL, remembering the current path so the user
/// comes back to it after authorizing.
#[must_use]
pub fn build_login_url<S: AsRef<str>>(
    location: &dyn Location,
    client_id: &str,
    scopes: &[S],
) -> String {
    login_url(client_id, scopes, location.path())
}
