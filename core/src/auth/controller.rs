//! Async driver for the gate.
//!
//! Runs probe and attempts against a provider on a single-threaded
//! executor. The gate is borrowed only between suspension points, so a
//! second `authenticate` issued while the first is awaiting the provider
//! sees `Authenticating` and returns immediately.

use crate::auth::capability::{probe_or_default, AuthCapability};
use crate::auth::gate::{AuthGate, AuthRequest, GateOutcome, GateState};
use crate::auth::prompt::Prompt;
use crate::auth::provider::{AuthAttemptResult, AuthProvider};
use log::{error, info};
use std::cell::RefCell;

/// Routing collaborator told when the gate is passed.
pub trait Navigator {
    /// Replace the current screen with the dashboard (not a push).
    fn replace_with_dashboard(&self);
}

/// Drives one gate session.
pub struct GateController<P, N> {
    provider: P,
    navigator: N,
    gate: RefCell<AuthGate>,
}

impl<P: AuthProvider, N: Navigator> GateController<P, N> {
    pub fn new(provider: P, navigator: N) -> Self {
        Self {
            provider,
            navigator,
            gate: RefCell::new(AuthGate::new()),
        }
    }

    pub fn state(&self) -> GateState {
        self.gate.borrow().state()
    }

    pub fn prompt(&self) -> Prompt {
        self.gate.borrow().prompt()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.gate.borrow().error_message()
    }

    pub fn capability(&self) -> AuthCapability {
        self.gate.borrow().capability()
    }

    /// Probe the device and update the prompt. Probe errors become the
    /// PIN capability.
    pub async fn probe_capability(&self) -> AuthCapability {
        let capability = probe_or_default(&self.provider).await;
        self.gate.borrow_mut().apply_capability(capability);
        capability
    }

    /// Run one attempt with the prompt's method.
    ///
    /// Returns `None` when the call was ignored (attempt already in flight,
    /// gate already passed, or torn down).
    pub async fn authenticate(&self) -> Option<AuthAttemptResult> {
        let request = self.gate.borrow_mut().begin_attempt()?;
        Some(self.run(request).await)
    }

    /// Run one attempt on the PIN path.
    pub async fn authenticate_with_fallback(&self) -> Option<AuthAttemptResult> {
        let request = self.gate.borrow_mut().begin_fallback_attempt()?;
        Some(self.run(request).await)
    }

    /// End the session. In-flight results are discarded when they land.
    pub fn teardown(&self) {
        self.gate.borrow_mut().teardown();
    }

    async fn run(&self, request: AuthRequest) -> AuthAttemptResult {
        let result = match self.provider.authenticate(&request.options).await {
            Ok(result) => result,
            Err(e) => {
                error!("Authentication provider error: {}", e);
                AuthAttemptResult::system_error()
            }
        };

        let outcome = self
            .gate
            .borrow_mut()
            .complete_attempt(request.attempt, result.clone());
        if outcome == GateOutcome::HandOff {
            info!("Replacing authentication screen with dashboard");
            self.navigator.replace_with_dashboard();
        }
        result
    }
}
