//! Centralized configuration and constants for the application.

use std::time::Duration;

/// Colors used when painting the progress ring. Widget colors live in the
/// GUI stylesheet.
pub struct ColorScheme {
    pub primary_dark: &'static str,
    pub track: &'static str,
}

/// Default color scheme.
pub const COLORS: ColorScheme = ColorScheme {
    primary_dark: "#6B4CCF", // Deep purple - progress arc
    track: "#E0E0E0",        // Light gray - empty ring track
};

/// Application information constants.
pub mod app_info {
    pub const NAME: &str = "MedRemind";
    pub const ID: &str = "dev.medremind.MedRemind";
    pub const TAGLINE: &str = "Your Personal Medication Assistant";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Authentication copy and device settings.
pub mod auth {
    use super::Duration;

    pub const BIOMETRIC_PROMPT: &str = "Use your fingerprint to access MedRemind";
    pub const PIN_PROMPT: &str = "Enter your PIN to access MedRemind";
    pub const BIOMETRIC_INSTRUCTION: &str =
        "Use your fingerprint or PIN to access your medications";
    pub const PIN_INSTRUCTION: &str = "Enter your PIN to access your medications";
    pub const BIOMETRIC_BUTTON: &str = "Authenticate";
    pub const PIN_BUTTON: &str = "Enter PIN";
    pub const VERIFYING_BUTTON: &str = "Verifying...";
    pub const FALLBACK_LABEL: &str = "Use PIN";
    pub const CANCEL_LABEL: &str = "Cancel";
    pub const BIOMETRIC_ICON: &str = "fingerprint-symbolic";
    pub const PIN_ICON: &str = "dialog-password-symbolic";

    pub const FAILURE_MESSAGE: &str = "Authentication failed. Please try again.";
    pub const SYSTEM_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

    /// Failure reason recorded when the provider itself errors out.
    pub const SYSTEM_ERROR_REASON: &str = "system error";

    /// Give up waiting for a finger after this long and treat it as a dismissal.
    pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

    /// fprintd picks any enrolled finger for this name.
    pub const VERIFY_FINGER: &str = "any";

    /// Polkit front-end used for the device credential path.
    pub const PKEXEC_PATH: &str = "/usr/bin/pkexec";
    pub const PKEXEC_PROBE_COMMAND: &str = "/bin/true";
}

/// Progress ring defaults.
pub mod ring {
    pub const SIZE: f64 = 220.0;
    pub const TRACK_WIDTH: f64 = 15.0;
    pub const ARC_WIDTH: f64 = 18.0;
    pub const ANIMATION_MS: u64 = 1000;
}

/// Get color scheme.
pub fn colors() -> &'static ColorScheme {
    &COLORS
}
