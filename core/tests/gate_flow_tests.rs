//! Gate scenarios driven through `GateController` with a scripted provider.

use futures_util::future::join;
use medremind_core::auth::{
    AuthAttemptResult, AuthMethod, AuthOptions, AuthProvider, GateController, GateState,
    Navigator,
};
use medremind_core::error::ProviderError;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

enum Reply {
    Now(Result<AuthAttemptResult, String>),
    Later(oneshot::Receiver<AuthAttemptResult>),
}

#[derive(Default)]
struct ScriptedProvider {
    hardware: Option<bool>,
    enrolled: bool,
    replies: RefCell<VecDeque<Reply>>,
    calls: Rc<Cell<usize>>,
    methods: Rc<RefCell<Vec<AuthMethod>>>,
}

impl ScriptedProvider {
    fn with_capability(has_hardware: bool, is_enrolled: bool) -> Self {
        Self {
            hardware: Some(has_hardware),
            enrolled: is_enrolled,
            ..Self::default()
        }
    }

    /// Probe fails at the bus level.
    fn unreachable() -> Self {
        Self::default()
    }

    fn reply(self, reply: Reply) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }
}

impl AuthProvider for ScriptedProvider {
    async fn has_hardware(&self) -> Result<bool, ProviderError> {
        self.hardware
            .ok_or_else(|| ProviderError::Connection("system bus unavailable".to_string()))
    }

    async fn is_enrolled(&self) -> Result<bool, ProviderError> {
        Ok(self.enrolled)
    }

    async fn authenticate(
        &self,
        options: &AuthOptions,
    ) -> Result<AuthAttemptResult, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        self.methods.borrow_mut().push(options.method);

        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("provider called more often than scripted");
        match reply {
            Reply::Now(Ok(result)) => Ok(result),
            Reply::Now(Err(msg)) => Err(ProviderError::Operation(msg)),
            Reply::Later(rx) => Ok(rx.await.expect("reply sender dropped")),
        }
    }
}

#[derive(Clone, Default)]
struct CountingNavigator(Rc<Cell<usize>>);

impl Navigator for CountingNavigator {
    fn replace_with_dashboard(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn controller(
    provider: ScriptedProvider,
) -> (
    GateController<ScriptedProvider, CountingNavigator>,
    CountingNavigator,
    Rc<Cell<usize>>,
) {
    let calls = provider.calls.clone();
    let navigator = CountingNavigator::default();
    (
        GateController::new(provider, navigator.clone()),
        navigator,
        calls,
    )
}

#[tokio::test]
async fn test_biometric_success_hands_off_once() {
    let (tx, rx) = oneshot::channel();
    let provider = ScriptedProvider::with_capability(true, true).reply(Reply::Later(rx));
    let methods = provider.methods.clone();
    let (gate, navigator, calls) = controller(provider);

    assert_eq!(gate.state(), GateState::Idle);
    let capability = gate.probe_capability().await;
    assert!(capability.biometrics_available());
    assert!(gate.prompt().requests_biometrics());

    let (result, ()) = join(gate.authenticate(), async {
        assert_eq!(gate.state(), GateState::Authenticating);
        tx.send(AuthAttemptResult::Success).unwrap();
    })
    .await;

    assert_eq!(result, Some(AuthAttemptResult::Success));
    assert_eq!(gate.state(), GateState::Success);
    assert_eq!(navigator.0.get(), 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(*methods.borrow(), vec![AuthMethod::Biometric]);

    // Terminal: further taps do nothing.
    assert_eq!(gate.authenticate().await, None);
    assert_eq!(navigator.0.get(), 1);
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_duplicate_tap_does_not_reach_provider() {
    let (tx, rx) = oneshot::channel();
    let provider = ScriptedProvider::with_capability(true, true).reply(Reply::Later(rx));
    let (gate, navigator, calls) = controller(provider);
    gate.probe_capability().await;

    let (first, ()) = join(gate.authenticate(), async {
        let error_before = gate.error_message();
        assert_eq!(gate.authenticate().await, None);
        assert_eq!(gate.authenticate_with_fallback().await, None);
        assert_eq!(gate.state(), GateState::Authenticating);
        assert_eq!(gate.error_message(), error_before);
        tx.send(AuthAttemptResult::Success).unwrap();
    })
    .await;

    assert_eq!(first, Some(AuthAttemptResult::Success));
    assert_eq!(calls.get(), 1);
    assert_eq!(navigator.0.get(), 1);
}

#[tokio::test]
async fn test_pin_failure_then_retry_succeeds() {
    let provider = ScriptedProvider::with_capability(false, false)
        .reply(Reply::Now(Ok(AuthAttemptResult::failure("not authorized"))))
        .reply(Reply::Now(Ok(AuthAttemptResult::Success)));
    let methods = provider.methods.clone();
    let (gate, navigator, _calls) = controller(provider);

    gate.probe_capability().await;
    let prompt = gate.prompt();
    assert!(!prompt.requests_biometrics());
    assert_eq!(prompt.message, "Enter your PIN to access MedRemind");

    let result = gate.authenticate().await;
    assert!(matches!(result, Some(AuthAttemptResult::Failure { .. })));
    assert_eq!(gate.state(), GateState::Failed);
    assert_eq!(
        gate.error_message(),
        Some("Authentication failed. Please try again.")
    );
    assert_eq!(navigator.0.get(), 0);

    let retry = gate.authenticate().await;
    assert_eq!(retry, Some(AuthAttemptResult::Success));
    assert_eq!(gate.state(), GateState::Success);
    assert_eq!(gate.error_message(), None);
    assert_eq!(navigator.0.get(), 1);
    assert_eq!(*methods.borrow(), vec![AuthMethod::Pin, AuthMethod::Pin]);
}

#[tokio::test]
async fn test_error_cleared_when_next_attempt_starts() {
    let (tx, rx) = oneshot::channel();
    let provider = ScriptedProvider::with_capability(true, true)
        .reply(Reply::Now(Ok(AuthAttemptResult::Cancelled)))
        .reply(Reply::Later(rx));
    let (gate, _navigator, _calls) = controller(provider);
    gate.probe_capability().await;

    gate.authenticate().await;
    assert!(gate.error_message().is_some());

    join(gate.authenticate(), async {
        assert_eq!(gate.error_message(), None);
        tx.send(AuthAttemptResult::failure("verify-no-match")).unwrap();
    })
    .await;
    assert_eq!(gate.state(), GateState::Failed);
}

#[tokio::test]
async fn test_provider_fault_maps_to_system_error() {
    let provider = ScriptedProvider::with_capability(true, true)
        .reply(Reply::Now(Err("device vanished".to_string())));
    let (gate, navigator, _calls) = controller(provider);
    gate.probe_capability().await;

    let result = gate.authenticate().await;
    assert_eq!(result, Some(AuthAttemptResult::failure("system error")));
    assert_eq!(gate.state(), GateState::Failed);
    assert_eq!(
        gate.error_message(),
        Some("An error occurred. Please try again.")
    );
    assert_eq!(navigator.0.get(), 0);
}

#[tokio::test]
async fn test_probe_failure_falls_back_to_pin() {
    let (gate, _navigator, _calls) = controller(ScriptedProvider::unreachable());

    let capability = gate.probe_capability().await;
    assert!(!capability.biometrics_available());
    assert!(!gate.prompt().requests_biometrics());
    assert_eq!(gate.state(), GateState::Idle);
    assert_eq!(gate.error_message(), None);
}

#[tokio::test]
async fn test_authenticate_before_probe_uses_pin_default() {
    let provider = ScriptedProvider::with_capability(true, true)
        .reply(Reply::Now(Ok(AuthAttemptResult::Success)));
    let methods = provider.methods.clone();
    let (gate, navigator, _calls) = controller(provider);

    assert_eq!(gate.authenticate().await, Some(AuthAttemptResult::Success));
    assert_eq!(*methods.borrow(), vec![AuthMethod::Pin]);
    assert_eq!(navigator.0.get(), 1);
}

#[tokio::test]
async fn test_fallback_attempt_uses_pin_path() {
    let provider = ScriptedProvider::with_capability(true, true)
        .reply(Reply::Now(Ok(AuthAttemptResult::Success)));
    let methods = provider.methods.clone();
    let (gate, navigator, _calls) = controller(provider);
    gate.probe_capability().await;

    assert_eq!(gate.prompt().fallback_label, Some("Use PIN"));
    gate.authenticate_with_fallback().await;
    assert_eq!(*methods.borrow(), vec![AuthMethod::Pin]);
    assert_eq!(navigator.0.get(), 1);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let (tx, rx) = oneshot::channel();
    let provider = ScriptedProvider::with_capability(true, true).reply(Reply::Later(rx));
    let (gate, navigator, _calls) = controller(provider);
    gate.probe_capability().await;

    join(gate.authenticate(), async {
        gate.teardown();
        tx.send(AuthAttemptResult::Success).unwrap();
    })
    .await;

    assert_ne!(gate.state(), GateState::Success);
    assert_eq!(navigator.0.get(), 0);
    assert_eq!(gate.authenticate().await, None);
}
