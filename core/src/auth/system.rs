//! Linux desktop authentication provider.
//!
//! Biometrics go through fprintd on the system bus. The device credential
//! ("PIN") path asks polkit for the user's password through `pkexec`.

use crate::auth::provider::{AuthAttemptResult, AuthMethod, AuthOptions, AuthProvider};
use crate::config::auth as settings;
use crate::error::ProviderError;
use crate::fprintd::{self, VerifyOutcome};
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::process::Command;

/// pkexec exit status when the authentication dialog was dismissed.
const PKEXEC_DISMISSED: i32 = 126;

/// pkexec exit status when authorization was refused.
const PKEXEC_NOT_AUTHORIZED: i32 = 127;

/// fprintd + polkit provider.
#[derive(Debug, Clone)]
pub struct SystemAuthenticator {
    verify_timeout: Duration,
    pkexec_path: String,
}

impl Default for SystemAuthenticator {
    fn default() -> Self {
        Self {
            verify_timeout: settings::VERIFY_TIMEOUT,
            pkexec_path: settings::PKEXEC_PATH.to_string(),
        }
    }
}

impl SystemAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    pub fn with_pkexec_path(mut self, path: impl Into<String>) -> Self {
        self.pkexec_path = path.into();
        self
    }

    pub fn verify_timeout(&self) -> Duration {
        self.verify_timeout
    }

    pub fn pkexec_path(&self) -> &str {
        &self.pkexec_path
    }

    /// Connect to fprintd system bus.
    async fn connect_to_fprintd() -> Result<fprintd::Client, ProviderError> {
        info!("Connecting to fprintd system bus");
        fprintd::Client::system().await.map_err(|e| {
            error!("Failed to connect to fprintd system bus: {}", e);
            error!("This usually means fprintd service is not running or not installed");
            ProviderError::Connection(e.to_string())
        })
    }

    /// Get the first available fingerprint device, if any.
    async fn find_device() -> Result<Option<fprintd::Device>, ProviderError> {
        let client = Self::connect_to_fprintd().await?;
        match fprintd::first_device(&client).await {
            Ok(device) => Ok(device),
            Err(e) => {
                error!("Failed to enumerate fingerprint devices: {}", e);
                Err(ProviderError::Operation(format!(
                    "Failed to enumerate devices: {}",
                    e
                )))
            }
        }
    }

    async fn verify_fingerprint(&self) -> Result<AuthAttemptResult, ProviderError> {
        let device = Self::find_device().await?.ok_or(ProviderError::NoDevice)?;
        match device.name().await {
            Ok(name) => info!("Using fingerprint reader '{}'", name),
            Err(e) => debug!("Could not read fingerprint reader name: {}", e),
        }
        let claimed = ClaimedDevice::acquire(device).await?;

        let verdict = tokio::time::timeout(
            self.verify_timeout,
            claimed.device().verify(settings::VERIFY_FINGER),
        )
        .await;

        if let Err(e) = claimed.device().verify_stop().await {
            warn!("Failed to stop verification: {}", e);
        }
        claimed.release().await;

        let event = match verdict {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                error!("Fingerprint verification failed: {}", e);
                return Err(ProviderError::Operation(e.to_string()));
            }
            Err(_) => {
                info!(
                    "No finger presented within {}s, treating as dismissed",
                    self.verify_timeout.as_secs()
                );
                return Ok(AuthAttemptResult::Cancelled);
            }
        };

        match event.outcome() {
            VerifyOutcome::Match => Ok(AuthAttemptResult::Success),
            VerifyOutcome::NoMatch | VerifyOutcome::Retry => {
                Ok(AuthAttemptResult::failure(event.result))
            }
            VerifyOutcome::Fatal => Err(ProviderError::Operation(format!(
                "Verification ended with {}",
                event.result
            ))),
        }
    }

    async fn verify_password(&self) -> Result<AuthAttemptResult, ProviderError> {
        info!("Requesting device credential through {}", self.pkexec_path);
        let status = Command::new(&self.pkexec_path)
            .arg(settings::PKEXEC_PROBE_COMMAND)
            .status()
            .await
            .map_err(|source| ProviderError::Spawn {
                program: self.pkexec_path.clone(),
                source,
            })?;

        Ok(match status.code() {
            Some(0) => AuthAttemptResult::Success,
            Some(PKEXEC_DISMISSED) => AuthAttemptResult::Cancelled,
            Some(PKEXEC_NOT_AUTHORIZED) => AuthAttemptResult::failure("not authorized"),
            Some(code) => {
                return Err(ProviderError::Operation(format!(
                    "pkexec exited with status {}",
                    code
                )))
            }
            None => {
                return Err(ProviderError::Operation(
                    "pkexec terminated by signal".to_string(),
                ))
            }
        })
    }
}

impl AuthProvider for SystemAuthenticator {
    async fn has_hardware(&self) -> Result<bool, ProviderError> {
        info!("Looking for available fingerprint devices");
        let found = Self::find_device().await?.is_some();
        if !found {
            warn!("No fingerprint devices detected on this system");
        }
        Ok(found)
    }

    async fn is_enrolled(&self) -> Result<bool, ProviderError> {
        let Some(device) = Self::find_device().await? else {
            return Ok(false);
        };

        let username = std::env::var("USER").unwrap_or_default();
        info!("Checking enrolled fingerprints for user: '{}'", username);
        match device.list_enrolled_fingers(&username).await {
            Ok(list) => {
                info!("Found {} enrolled fingerprint(s)", list.len());
                Ok(!list.is_empty())
            }
            // fprintd answers NoEnrolledPrints with an error
            Err(zbus::Error::MethodError(name, _, _))
                if name.as_str().ends_with("NoEnrolledPrints") =>
            {
                info!("No enrolled fingerprints found for user '{}'", username);
                Ok(false)
            }
            Err(e) => {
                error!("Failed to retrieve enrolled fingerprints: {}", e);
                Err(e.into())
            }
        }
    }

    async fn authenticate(
        &self,
        options: &AuthOptions,
    ) -> Result<AuthAttemptResult, ProviderError> {
        info!("{}", options.prompt_message);
        match options.method {
            AuthMethod::Biometric => self.verify_fingerprint().await,
            AuthMethod::Pin => self.verify_password().await,
        }
    }
}

/// RAII-style claim on a fingerprint device.
///
/// `release` should be awaited on the normal path. If the owning future is
/// dropped mid-verification the claim is released from a spawned task.
struct ClaimedDevice {
    device: fprintd::Device,
    released: bool,
}

impl ClaimedDevice {
    /// Claim the device for exclusive access by the current user.
    async fn acquire(device: fprintd::Device) -> Result<Self, ProviderError> {
        info!("Claiming fingerprint device {}", device.object_path());
        match device.claim("").await {
            Ok(()) => {
                info!("Successfully claimed device");
                Ok(Self {
                    device,
                    released: false,
                })
            }
            Err(e) => {
                error!("Failed to claim device: {}", e);
                Err(ProviderError::Claim(e.to_string()))
            }
        }
    }

    fn device(&self) -> &fprintd::Device {
        &self.device
    }

    async fn release(mut self) {
        self.released = true;
        if let Err(e) = self.device.release().await {
            warn!("Failed to release device: {}", e);
        } else {
            info!("Successfully released fingerprint device");
        }
    }
}

impl Drop for ClaimedDevice {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        info!("Cleaning up device in destructor");
        let device = self.device.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let _ = device.verify_stop().await;
                    if let Err(e) = device.release().await {
                        warn!("Failed to release device during cleanup: {}", e);
                    }
                });
            }
            Err(_) => warn!("No runtime available to release fingerprint device"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::capability::AuthCapability;
    use crate::auth::prompt::Prompt;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn pin_options() -> AuthOptions {
        let prompt = Prompt::for_capability(&AuthCapability::default());
        AuthOptions::from_prompt(&prompt, AuthMethod::Pin)
    }

    /// Write a stand-in for pkexec that exits with `code`.
    fn fake_pkexec(dir: &TempDir, code: i32) -> PathBuf {
        let path = dir.path().join(format!("pkexec-{}", code));
        std::fs::write(&path, format!("#!/bin/sh\nexit {}\n", code)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    async fn run_with_exit_code(
        dir: &TempDir,
        code: i32,
    ) -> Result<AuthAttemptResult, ProviderError> {
        let path = fake_pkexec(dir, code);
        SystemAuthenticator::new()
            .with_pkexec_path(path.to_string_lossy())
            .authenticate(&pin_options())
            .await
    }

    #[tokio::test]
    async fn test_pkexec_exit_codes() {
        let dir = TempDir::new().unwrap();

        assert_eq!(
            run_with_exit_code(&dir, 0).await.unwrap(),
            AuthAttemptResult::Success
        );
        assert_eq!(
            run_with_exit_code(&dir, 126).await.unwrap(),
            AuthAttemptResult::Cancelled
        );

        let refused = run_with_exit_code(&dir, 127).await.unwrap();
        assert_eq!(refused, AuthAttemptResult::failure("not authorized"));
        assert_eq!(
            refused.user_message(),
            Some("Authentication failed. Please try again.")
        );

        assert!(matches!(
            run_with_exit_code(&dir, 3).await,
            Err(ProviderError::Operation(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_pkexec_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-pkexec");

        let result = SystemAuthenticator::new()
            .with_pkexec_path(missing.to_string_lossy())
            .authenticate(&pin_options())
            .await;

        match result {
            Err(ProviderError::Spawn { program, source }) => {
                assert_eq!(program, missing.to_string_lossy());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_overrides() {
        let provider = SystemAuthenticator::new()
            .with_verify_timeout(Duration::from_secs(5))
            .with_pkexec_path("/opt/pkexec");
        assert_eq!(provider.verify_timeout(), Duration::from_secs(5));
        assert_eq!(provider.pkexec_path(), "/opt/pkexec");

        let defaults = SystemAuthenticator::default();
        assert_eq!(defaults.verify_timeout(), settings::VERIFY_TIMEOUT);
        assert_eq!(defaults.pkexec_path(), settings::PKEXEC_PATH);
    }
}
