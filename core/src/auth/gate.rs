//! Authentication gate state machine.
//!
//! The gate never talks to the device itself. `begin_attempt` hands out an
//! `AuthRequest`, whoever owns the provider runs it, and the result comes
//! back through `complete_attempt`. All mutation happens on the UI thread.

use crate::auth::capability::AuthCapability;
use crate::auth::prompt::Prompt;
use crate::auth::provider::{AuthAttemptResult, AuthMethod, AuthOptions};
use log::{debug, info, warn};

/// Gate states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for the user
    #[default]
    Idle,

    /// An attempt is in flight
    Authenticating,

    /// Terminal; control has left the gate
    Success,

    /// Last attempt failed; retry is enabled
    Failed,
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Idle => write!(f, "idle"),
            GateState::Authenticating => write!(f, "authenticating"),
            GateState::Success => write!(f, "success"),
            GateState::Failed => write!(f, "failed"),
        }
    }
}

/// Identifies one attempt so late or stale results can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptId(u64);

/// Work order for the provider.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub attempt: AttemptId,
    pub options: AuthOptions,
}

/// What the caller must do after a result is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Replace the gate with the dashboard. Returned at most once.
    HandOff,
    /// Attempt failed; show the message and re-enable the control.
    Failed(&'static str),
    /// Result was discarded (duplicate, stale or after teardown).
    Ignored,
}

/// One gate session.
#[derive(Debug, Default)]
pub struct AuthGate {
    state: GateState,
    capability: AuthCapability,
    error: Option<&'static str>,
    current_attempt: Option<AttemptId>,
    attempts: u64,
    torn_down: bool,
}

impl AuthGate {
    /// New gate in `Idle`, assuming the PIN path until a probe resolves.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn capability(&self) -> AuthCapability {
        self.capability
    }

    /// Message from the last failed attempt.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether the authenticate control should be enabled.
    pub fn can_attempt(&self) -> bool {
        !self.torn_down && matches!(self.state, GateState::Idle | GateState::Failed)
    }

    pub fn prompt(&self) -> Prompt {
        Prompt::for_capability(&self.capability)
    }

    /// Store the probe result. Ignored after teardown.
    pub fn apply_capability(&mut self, capability: AuthCapability) {
        if self.torn_down {
            debug!("Capability arrived after teardown, discarding");
            return;
        }
        if capability != self.capability {
            info!(
                "Biometrics {}",
                if capability.biometrics_available() {
                    "available, switching to fingerprint prompt"
                } else {
                    "unavailable, using PIN prompt"
                }
            );
        }
        self.capability = capability;
    }

    /// Start an attempt with the prompt's own method.
    ///
    /// Returns `None` (and changes nothing) when an attempt is already in
    /// flight, the gate already succeeded, or the gate was torn down.
    pub fn begin_attempt(&mut self) -> Option<AuthRequest> {
        let method = self.prompt().method;
        self.begin_with(method)
    }

    /// Start an attempt that goes straight to the PIN path.
    pub fn begin_fallback_attempt(&mut self) -> Option<AuthRequest> {
        self.begin_with(AuthMethod::Pin)
    }

    fn begin_with(&mut self, method: AuthMethod) -> Option<AuthRequest> {
        if !self.can_attempt() {
            debug!("Ignoring authenticate request while gate is {}", self.state);
            return None;
        }

        self.attempts += 1;
        let attempt = AttemptId(self.attempts);
        let options = AuthOptions::from_prompt(&self.prompt(), method);

        info!("Authentication attempt {} started ({:?})", self.attempts, method);
        self.transition(GateState::Authenticating);
        self.error = None;
        self.current_attempt = Some(attempt);

        Some(AuthRequest { attempt, options })
    }

    /// Apply the provider's answer for `attempt`.
    pub fn complete_attempt(
        &mut self,
        attempt: AttemptId,
        result: AuthAttemptResult,
    ) -> GateOutcome {
        if self.torn_down {
            debug!("Authentication result arrived after teardown, discarding");
            return GateOutcome::Ignored;
        }
        if self.state != GateState::Authenticating || self.current_attempt != Some(attempt) {
            debug!(
                "Discarding result for attempt {} while gate is {}",
                attempt.0, self.state
            );
            return GateOutcome::Ignored;
        }

        self.current_attempt = None;
        match result.user_message() {
            None => {
                info!("Authentication succeeded, handing off to dashboard");
                self.transition(GateState::Success);
                GateOutcome::HandOff
            }
            Some(message) => {
                warn!("Authentication attempt {} failed: {:?}", attempt.0, result);
                self.transition(GateState::Failed);
                self.error = Some(message);
                GateOutcome::Failed(message)
            }
        }
    }

    /// Tear the gate down. Pending results are discarded on arrival.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            info!("Authentication gate torn down in state {}", self.state);
        }
        self.torn_down = true;
        self.current_attempt = None;
    }

    fn transition(&mut self, next: GateState) {
        debug!("Gate transition: {} -> {}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let mut gate = AuthGate::new();
        gate.apply_capability(AuthCapability::new(true, true));
        assert_eq!(gate.state(), GateState::Idle);

        let request = gate.begin_attempt().unwrap();
        assert_eq!(gate.state(), GateState::Authenticating);
        assert_eq!(request.options.method, AuthMethod::Biometric);

        let outcome = gate.complete_attempt(request.attempt, AuthAttemptResult::Success);
        assert_eq!(outcome, GateOutcome::HandOff);
        assert_eq!(gate.state(), GateState::Success);
        assert!(!gate.can_attempt());
    }

    #[test]
    fn test_duplicate_begin_is_ignored() {
        let mut gate = AuthGate::new();
        let first = gate.begin_attempt();
        assert!(first.is_some());
        assert!(gate.begin_attempt().is_none());
        assert!(gate.begin_fallback_attempt().is_none());
        assert_eq!(gate.state(), GateState::Authenticating);
    }

    #[test]
    fn test_repeated_success_hands_off_once() {
        let mut gate = AuthGate::new();
        let request = gate.begin_attempt().unwrap();
        assert_eq!(
            gate.complete_attempt(request.attempt, AuthAttemptResult::Success),
            GateOutcome::HandOff
        );
        assert_eq!(
            gate.complete_attempt(request.attempt, AuthAttemptResult::Success),
            GateOutcome::Ignored
        );
        assert!(gate.begin_attempt().is_none());
    }

    #[test]
    fn test_failure_then_retry_clears_error() {
        let mut gate = AuthGate::new();
        let request = gate.begin_attempt().unwrap();
        gate.complete_attempt(request.attempt, AuthAttemptResult::Cancelled);
        assert_eq!(gate.state(), GateState::Failed);
        assert_eq!(
            gate.error_message(),
            Some("Authentication failed. Please try again.")
        );
        assert!(gate.can_attempt());

        let retry = gate.begin_attempt().unwrap();
        assert_eq!(gate.error_message(), None);
        assert_eq!(
            gate.complete_attempt(retry.attempt, AuthAttemptResult::Success),
            GateOutcome::HandOff
        );
    }

    #[test]
    fn test_stale_attempt_is_ignored() {
        let mut gate = AuthGate::new();
        let first = gate.begin_attempt().unwrap();
        gate.complete_attempt(first.attempt, AuthAttemptResult::failure("no match"));

        let second = gate.begin_attempt().unwrap();
        assert_eq!(
            gate.complete_attempt(first.attempt, AuthAttemptResult::Success),
            GateOutcome::Ignored
        );
        assert_eq!(gate.state(), GateState::Authenticating);
        assert_eq!(
            gate.complete_attempt(second.attempt, AuthAttemptResult::Success),
            GateOutcome::HandOff
        );
    }

    #[test]
    fn test_teardown_discards_pending_result() {
        let mut gate = AuthGate::new();
        let request = gate.begin_attempt().unwrap();
        gate.teardown();

        assert_eq!(
            gate.complete_attempt(request.attempt, AuthAttemptResult::Success),
            GateOutcome::Ignored
        );
        assert_eq!(gate.state(), GateState::Authenticating);

        gate.apply_capability(AuthCapability::new(true, true));
        assert_eq!(gate.capability(), AuthCapability::default());
        assert!(gate.begin_attempt().is_none());
    }

    #[test]
    fn test_fallback_attempt_uses_pin() {
        let mut gate = AuthGate::new();
        gate.apply_capability(AuthCapability::new(true, true));
        let request = gate.begin_fallback_attempt().unwrap();
        assert_eq!(request.options.method, AuthMethod::Pin);
        assert_eq!(
            request.options.prompt_message,
            "Enter your PIN to access MedRemind"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GateState::Idle), "idle");
        assert_eq!(format!("{}", GateState::Authenticating), "authenticating");
        assert_eq!(format!("{}", GateState::Success), "success");
        assert_eq!(format!("{}", GateState::Failed), "failed");
    }
}
