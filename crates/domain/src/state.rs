//! Asynchronous operation state types for UI binding.
//!
//! This module defines the state machine shared by every operation that
//! wraps a single network call, enabling the UI to display appropriate
//! feedback at each stage.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Represents the current state of an operation in the UI.
///
/// Exactly one variant holds at a time:
/// - `Idle`: never invoked
/// - `Loading`: call in flight, show spinner
/// - `Success`: payload received
/// - `Error`: call failed, show message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum OperationState<T> {
    /// The operation has not been invoked yet.
    Idle,

    /// A call is in progress.
    Loading {
        /// When the call started (for elapsed time display).
        /// Skipped in serialization as Instant is not serializable.
        #[serde(skip)]
        started_at: Option<Instant>,
    },

    /// The last call to settle succeeded.
    Success(T),

    /// The last call to settle failed with a human-readable message.
    Error(String),
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Inputs to the operation state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationEvent<T> {
    /// A new invocation started.
    Started,
    /// A call settled with a payload.
    Succeeded(T),
    /// A call settled with an error message.
    Failed(String),
}

impl<T> OperationState<T> {
    /// Creates a new Loading state with the current timestamp.
    #[must_use]
    pub fn loading() -> Self {
        Self::Loading {
            started_at: Some(Instant::now()),
        }
    }

    /// Applies an event and returns the next state.
    ///
    /// Settlement events apply from any state: when invocations overlap,
    /// whichever call settles last determines the final state.
    #[must_use]
    pub fn transition(self, event: OperationEvent<T>) -> Self {
        match event {
            OperationEvent::Started => Self::loading(),
            OperationEvent::Succeeded(value) => Self::Success(value),
            OperationEvent::Failed(message) => Self::Error(message),
        }
    }

    /// Returns true if the operation was never invoked.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a call is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns the payload if in Success state.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the message if in Error state.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the elapsed time if loading.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Loading {
                started_at: Some(t),
            } => Some(t.elapsed()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operation_state_idle() {
        let state = OperationState::<String>::Idle;
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert_eq!(state.success(), None);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_operation_state_loading() {
        let state = OperationState::<String>::Idle.transition(OperationEvent::Started);
        assert!(state.is_loading());
        assert!(!state.is_idle());
        assert!(state.elapsed().is_some());
    }

    #[test]
    fn test_success_then_error() {
        let state = OperationState::Idle
            .transition(OperationEvent::Started)
            .transition(OperationEvent::Succeeded("ok".to_string()));
        assert_eq!(state, OperationState::Success("ok".to_string()));
        assert_eq!(state.success().map(String::as_str), Some("ok"));
        assert_eq!(state.error(), None);

        let state = state
            .transition(OperationEvent::Started)
            .transition(OperationEvent::Failed("boom".to_string()));
        assert_eq!(state.error(), Some("boom"));
        assert_eq!(state.success(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_started_discards_previous_outcome() {
        let state = OperationState::<String>::Error("boom".to_string())
            .transition(OperationEvent::Started);
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_late_settlement_overrides() {
        let state = OperationState::Success(1)
            .transition(OperationEvent::Succeeded(2));
        assert_eq!(state.success(), Some(&2));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(OperationState::Success("ok".to_string())).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"state": "success", "value": "ok"}))
        );
    }
}
