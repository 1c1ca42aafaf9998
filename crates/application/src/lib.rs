//! ghkit Application - Ports and state controllers
//!
//! This crate contains the controllers a host binds its UI to:
//! - [`Authenticator`]: OAuth callback handling and sign-out
//! - [`CloneMutation`] and [`IssueList`]: backend operations with
//!   observable loading/success/error state
//!
//! External systems (HTTP, token persistence, the current location) are
//! reached only through the traits in [`ports`].

pub mod auth;
pub mod error;
pub mod operation;
pub mod ports;

#[cfg(test)]
mod testing;

pub use auth::{Authenticator, build_login_url};
pub use error::{AuthError, OperationError};
pub use operation::{AsyncOperation, CloneMutation, IssueList, NOT_AUTHENTICATED, SettlePolicy};
pub use ports::{ApiClient, Location, StaticLocation, TokenStore, TokenStoreError, TransportError};
