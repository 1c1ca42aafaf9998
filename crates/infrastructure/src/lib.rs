//! ghkit Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, configuration loading, tracing
//! setup and the [`GithubContext`] that wires them together.

pub mod adapters;
pub mod config;
pub mod context;
pub mod persistence;
pub mod telemetry;

pub use adapters::{ReqwestApiClient, UrlLocation};
pub use crate::config::{ClientConfig, ConfigError, default_token_path};
pub use context::{ContextError, GithubContext};
pub use persistence::{FileTokenStore, MemoryTokenStore};
pub use telemetry::init_tracing;
