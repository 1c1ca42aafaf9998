//! ghkit Domain - Core types
//!
//! This crate defines the domain model for the GitHub handoff client:
//! tokens, the authentication and operation state machines, OAuth
//! redirect payloads, and backend request descriptions.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod login;
pub mod redirect;
pub mod reply;
pub mod request;
pub mod state;
pub mod token;

pub use auth::{AuthEvent, AuthPhase, AuthState};
pub use error::{DomainError, DomainResult};
pub use login::{AUTHORIZE_URL, BASE_SCOPES, login_url};
pub use redirect::{CallbackParams, RedirectState};
pub use reply::Reply;
pub use request::{ApiBase, ApiRequest, CloneTarget, HttpMethod, IssueQuery};
pub use state::{OperationEvent, OperationState};
pub use token::Token;
