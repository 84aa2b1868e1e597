//! Start-up decision about a cart saved by an earlier session.

use std::fmt;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the resume decision stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResumeState {
    /// Saved cart not yet inspected.
    #[default]
    Idle,
    /// A non-empty saved cart awaits the shopper's decision.
    PendingResume,
    /// Decided, or nothing to decide.
    Resolved,
}

impl ResumeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeState::Idle => "idle",
            ResumeState::PendingResume => "pending-resume",
            ResumeState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ResumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shopper's answer to the resume prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeAction {
    /// Keep the saved cart.
    Resume,
    /// Discard it and start an empty order.
    StartNew,
}

impl ResumeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeAction::Resume => "resume",
            ResumeAction::StartNew => "start new",
        }
    }
}

/// State machine: `Idle -> PendingResume -> Resolved`, or `Idle -> Resolved`
/// when the saved cart is empty or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeProtocol {
    state: ResumeState,
}

impl ResumeProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResumeState {
        self.state
    }

    /// Check if the shopper still has to choose.
    pub fn needs_decision(&self) -> bool {
        self.state == ResumeState::PendingResume
    }

    /// Inspect the restored cart of `saved_lines` lines.
    ///
    /// Leaves `Idle` for `PendingResume`, or straight for `Resolved` when
    /// nothing was saved. Once started, later calls change nothing.
    pub fn start(&mut self, saved_lines: usize) -> ResumeState {
        if self.state != ResumeState::Idle {
            debug!(state = %self.state, "resume protocol already started");
            return self.state;
        }
        self.state = if saved_lines > 0 {
            ResumeState::PendingResume
        } else {
            ResumeState::Resolved
        };
        debug!(saved_lines, state = %self.state, "resume protocol started");
        self.state
    }

    /// Apply the shopper's decision. Only valid from `PendingResume`.
    ///
    /// The caller discards the cart on [`ResumeAction::StartNew`].
    pub fn resolve(&mut self, action: ResumeAction) -> Result<ResumeAction, CommerceError> {
        if self.state != ResumeState::PendingResume {
            return Err(self.invalid(action.as_str()));
        }
        self.state = ResumeState::Resolved;
        debug!(action = action.as_str(), "resume decision applied");
        Ok(action)
    }

    /// Treat a pending decision as "resume". Returns true if one was pending.
    ///
    /// Used when the shopper changes the cart before answering.
    pub fn resolve_implicitly(&mut self) -> bool {
        if self.needs_decision() {
            self.state = ResumeState::Resolved;
            debug!("pending resume decision taken as resume");
            true
        } else {
            false
        }
    }

    /// Treat a pending decision as "start new". Returns true if one was
    /// pending; the caller empties the cart either way.
    pub fn discard_pending(&mut self) -> bool {
        if self.needs_decision() {
            self.state = ResumeState::Resolved;
            debug!("pending resume decision taken as start new");
            true
        } else {
            false
        }
    }

    fn invalid(&self, action: &str) -> CommerceError {
        CommerceError::InvalidResumeTransition {
            from: self.state.to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_cart_prompts() {
        let mut protocol = ResumeProtocol::new();
        assert_eq!(protocol.state(), ResumeState::Idle);
        assert_eq!(protocol.start(2), ResumeState::PendingResume);
        assert!(protocol.needs_decision());

        assert_eq!(protocol.resolve(ResumeAction::StartNew).unwrap(), ResumeAction::StartNew);
        assert_eq!(protocol.state(), ResumeState::Resolved);
    }

    #[test]
    fn test_empty_cart_skips_prompt() {
        let mut protocol = ResumeProtocol::new();
        assert_eq!(protocol.start(0), ResumeState::Resolved);
        assert!(!protocol.needs_decision());
    }

    #[test]
    fn test_resolve_outside_pending_fails() {
        let mut protocol = ResumeProtocol::new();
        let err = protocol.resolve(ResumeAction::Resume).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidResumeTransition { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid resume transition: cannot resume while idle"
        );

        protocol.start(1);
        protocol.resolve(ResumeAction::Resume).unwrap();
        assert!(protocol.resolve(ResumeAction::Resume).is_err());
    }

    #[test]
    fn test_start_only_once() {
        let mut protocol = ResumeProtocol::new();
        protocol.start(0);
        assert_eq!(protocol.start(1), ResumeState::Resolved);

        let mut protocol = ResumeProtocol::new();
        protocol.start(2);
        protocol.resolve(ResumeAction::Resume).unwrap();
        assert_eq!(protocol.start(2), ResumeState::Resolved);
    }

    #[test]
    fn test_implicit_resolution() {
        let mut protocol = ResumeProtocol::new();
        assert!(!protocol.resolve_implicitly());
        protocol.start(3);
        assert!(protocol.resolve_implicitly());
        assert_eq!(protocol.state(), ResumeState::Resolved);
        assert!(!protocol.resolve_implicitly());
    }

    #[test]
    fn test_discard_pending() {
        let mut protocol = ResumeProtocol::new();
        assert!(!protocol.discard_pending());
        assert_eq!(protocol.state(), ResumeState::Idle);

        protocol.start(1);
        assert!(protocol.discard_pending());
        assert_eq!(protocol.state(), ResumeState::Resolved);
        assert!(!protocol.discard_pending());
    }
}
