//! Device authentication boundary.

use crate::auth::prompt::Prompt;
use crate::config::auth as copy;
use crate::error::ProviderError;
use serde::Serialize;
use std::fmt;

/// Which credential the provider should ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthMethod {
    Biometric,
    Pin,
}

/// Options handed to the provider for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOptions {
    pub prompt_message: String,
    pub fallback_label: String,
    pub cancel_label: String,
    pub allow_device_fallback: bool,
    pub method: AuthMethod,
}

impl AuthOptions {
    pub fn from_prompt(prompt: &Prompt, method: AuthMethod) -> Self {
        let prompt_message = match method {
            AuthMethod::Biometric => prompt.message,
            AuthMethod::Pin => copy::PIN_PROMPT,
        };
        Self {
            prompt_message: prompt_message.to_string(),
            fallback_label: copy::FALLBACK_LABEL.to_string(),
            cancel_label: copy::CANCEL_LABEL.to_string(),
            allow_device_fallback: true,
            method,
        }
    }
}

/// Why an attempt failed.
///
/// Only built through `AuthAttemptResult::failure` and
/// `AuthAttemptResult::system_error`, so a provider reason can never pass
/// for a system error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    text: String,
    system: bool,
}

impl FailureReason {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The provider faulted rather than rejecting the user.
    pub fn is_system_error(&self) -> bool {
        self.system
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of exactly one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAttemptResult {
    Success,
    Failure { reason: FailureReason },
    Cancelled,
}

impl AuthAttemptResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        AuthAttemptResult::Failure {
            reason: FailureReason {
                text: reason.into(),
                system: false,
            },
        }
    }

    /// What a provider fault turns into.
    pub fn system_error() -> Self {
        AuthAttemptResult::Failure {
            reason: FailureReason {
                text: copy::SYSTEM_ERROR_REASON.to_string(),
                system: true,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthAttemptResult::Success)
    }

    /// Inline message shown for a failed attempt, `None` on success.
    ///
    /// Cancellation reads the same as a failure.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AuthAttemptResult::Success => None,
            AuthAttemptResult::Failure { reason } if reason.is_system_error() => {
                Some(copy::SYSTEM_ERROR_MESSAGE)
            }
            AuthAttemptResult::Failure { .. } | AuthAttemptResult::Cancelled => {
                Some(copy::FAILURE_MESSAGE)
            }
        }
    }
}

/// The device authentication subsystem.
///
/// Implementations suspend on the device and may be called from a
/// single-threaded executor, so no `Send` bound is imposed here.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// Is there any biometric reader?
    async fn has_hardware(&self) -> Result<bool, ProviderError>;

    /// Does the current user have at least one enrolled print?
    async fn is_enrolled(&self) -> Result<bool, ProviderError>;

    /// Run one authentication. User rejection and dismissal are `Ok`
    /// results; `Err` is reserved for device faults.
    async fn authenticate(
        &self,
        options: &AuthOptions,
    ) -> Result<AuthAttemptResult, ProviderError>;
}
