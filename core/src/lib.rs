//! Core logic for the MedRemind front-end.
//!
//! - `auth`: capability probing and the authentication gate state machine
//! - `progress`: arc geometry and the animated dose progress ring
//! - `dose`: dose summaries, medication drafts and the in-memory store
//! - `fprintd`: async helpers for the fprintd D-Bus interface

pub mod auth;
pub mod config;
pub mod dose;
pub mod error;
pub mod fprintd;
pub mod progress;

// Re-export commonly used items
pub use auth::{
    AuthAttemptResult, AuthCapability, AuthGate, AuthProvider, GateController, GateOutcome,
    GateState, Navigator, Prompt,
};
pub use dose::{DoseSummary, InMemoryStore, MedicationDraft, MedicationStore};
pub use error::{CapabilityProbeError, DraftError, ProviderError, StoreError};
pub use progress::{ArcGeometry, ProgressRing, RingAnimator, RingGeometry};
