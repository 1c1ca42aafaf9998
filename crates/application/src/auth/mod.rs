//! Authentication module for ghkit.
//!
//! This module provides:
//! - The authentication controller driving the OAuth code exchange
//! - Provider login URL construction from the current location

mod authenticator;
mod login;

pub use authenticator::Authenticator;
pub use login::build_login_url;
