//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod api_client;
mod location;
mod token_store;

pub use api_client::{ApiClient, TransportError};
pub use location::{Location, StaticLocation};
pub use token_store::{TokenStore, TokenStoreError};
