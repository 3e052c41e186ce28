//! Prompt selection.
//!
//! The prompt is a pure function of the capability and is recomputed on
//! every render.

use crate::auth::capability::AuthCapability;
use crate::auth::gate::GateState;
use crate::auth::provider::AuthMethod;
use crate::config::auth as copy;

/// Copy and affordances for the authentication card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub method: AuthMethod,
    pub message: &'static str,
    pub instruction: &'static str,
    pub button_label: &'static str,
    /// Present only when biometrics are offered.
    pub fallback_label: Option<&'static str>,
    pub icon_name: &'static str,
}

impl Prompt {
    pub fn for_capability(capability: &AuthCapability) -> Self {
        if capability.biometrics_available() {
            Self {
                method: AuthMethod::Biometric,
                message: copy::BIOMETRIC_PROMPT,
                instruction: copy::BIOMETRIC_INSTRUCTION,
                button_label: copy::BIOMETRIC_BUTTON,
                fallback_label: Some(copy::FALLBACK_LABEL),
                icon_name: copy::BIOMETRIC_ICON,
            }
        } else {
            Self {
                method: AuthMethod::Pin,
                message: copy::PIN_PROMPT,
                instruction: copy::PIN_INSTRUCTION,
                button_label: copy::PIN_BUTTON,
                fallback_label: None,
                icon_name: copy::PIN_ICON,
            }
        }
    }

    pub fn requests_biometrics(&self) -> bool {
        self.method == AuthMethod::Biometric
    }

    /// Button text for the given gate state.
    pub fn button_label_for(&self, state: GateState) -> &'static str {
        match state {
            GateState::Authenticating => copy::VERIFYING_BUTTON,
            _ => self.button_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_requests_biometrics_iff_available() {
        for has_hardware in [false, true] {
            for is_enrolled in [false, true] {
                let capability = AuthCapability::new(has_hardware, is_enrolled);
                let prompt = Prompt::for_capability(&capability);
                assert_eq!(
                    prompt.requests_biometrics(),
                    capability.biometrics_available()
                );
                assert_eq!(
                    prompt.fallback_label.is_some(),
                    capability.biometrics_available()
                );
            }
        }
    }

    #[test]
    fn test_pin_prompt_copy() {
        let prompt = Prompt::for_capability(&AuthCapability::default());
        assert_eq!(prompt.message, "Enter your PIN to access MedRemind");
        assert_eq!(prompt.button_label, "Enter PIN");
    }

    #[test]
    fn test_button_reads_verifying_while_authenticating() {
        let prompt = Prompt::for_capability(&AuthCapability::new(true, true));
        assert_eq!(prompt.button_label_for(GateState::Idle), "Authenticate");
        assert_eq!(
            prompt.button_label_for(GateState::Authenticating),
            "Verifying..."
        );
        assert_eq!(prompt.button_label_for(GateState::Failed), "Authenticate");
    }
}
