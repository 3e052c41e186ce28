//! Authentication gate.
//!
//! - `capability`: biometric capability value and probing
//! - `prompt`: prompt copy selection from a capability
//! - `provider`: the device authentication boundary
//! - `gate`: the attempt state machine
//! - `controller`: async driver that runs attempts against a provider
//! - `system`: fprintd + polkit provider for Linux desktops

pub mod capability;
pub mod controller;
pub mod gate;
pub mod prompt;
pub mod provider;
pub mod system;

// Re-export commonly used items
pub use capability::{probe_capability, probe_or_default, AuthCapability};
pub use controller::{GateController, Navigator};
pub use gate::{AttemptId, AuthGate, AuthRequest, GateOutcome, GateState};
pub use prompt::Prompt;
pub use provider::{AuthAttemptResult, AuthMethod, AuthOptions, AuthProvider, FailureReason};
pub use system::SystemAuthenticator;
