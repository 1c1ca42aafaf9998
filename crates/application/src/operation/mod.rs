//! Operation controllers.
//!
//! Each controller wraps one backend call in an [`AsyncOperation`] so hosts
//! can bind to its loading/success/error state.

mod clone;
mod controller;
mod issues;

pub use clone::{CloneMutation, NOT_AUTHENTICATED};
pub use controller::{AsyncOperation, SettlePolicy};
pub use issues::IssueList;
