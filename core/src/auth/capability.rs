//! Biometric capability value and probing.

use crate::auth::provider::AuthProvider;
use crate::error::CapabilityProbeError;
use log::{info, warn};
use serde::Serialize;

/// What the device offers for biometric authentication.
///
/// The default is "no hardware, nothing enrolled", i.e. the PIN path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthCapability {
    pub has_hardware: bool,
    pub is_enrolled: bool,
}

impl AuthCapability {
    pub fn new(has_hardware: bool, is_enrolled: bool) -> Self {
        Self {
            has_hardware,
            is_enrolled,
        }
    }

    /// Biometrics can only be offered when a reader exists and has prints.
    pub fn biometrics_available(&self) -> bool {
        self.has_hardware && self.is_enrolled
    }
}

/// Query hardware presence and enrollment.
///
/// Enrollment is not queried when there is no hardware.
pub async fn probe_capability<P: AuthProvider>(
    provider: &P,
) -> Result<AuthCapability, CapabilityProbeError> {
    let has_hardware = provider.has_hardware().await?;
    let is_enrolled = if has_hardware {
        provider.is_enrolled().await?
    } else {
        false
    };

    let capability = AuthCapability::new(has_hardware, is_enrolled);
    info!(
        "Capability probe complete: hardware={}, enrolled={}",
        capability.has_hardware, capability.is_enrolled
    );
    Ok(capability)
}

/// Probe, falling back to the PIN path if the device query fails.
pub async fn probe_or_default<P: AuthProvider>(provider: &P) -> AuthCapability {
    match probe_capability(provider).await {
        Ok(capability) => capability,
        Err(e) => {
            warn!("{}", e);
            warn!("Assuming no biometrics, PIN entry will be offered");
            AuthCapability::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biometrics_require_hardware_and_enrollment() {
        assert!(AuthCapability::new(true, true).biometrics_available());
        assert!(!AuthCapability::new(true, false).biometrics_available());
        assert!(!AuthCapability::new(false, true).biometrics_available());
        assert!(!AuthCapability::new(false, false).biometrics_available());
    }

    #[test]
    fn test_default_is_pin_path() {
        assert!(!AuthCapability::default().biometrics_available());
    }
}
