//! Authentication domain types

mod state;

pub use state::{AuthEvent, AuthPhase, AuthState};
