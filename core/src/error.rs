//! Error types for the MedRemind core.
//!
//! Authentication failures and cancellations are ordinary values
//! (`AuthAttemptResult`); only device-level faults and data validation
//! problems are errors.

use thiserror::Error;

/// Faults reported by the device authentication subsystem.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("No fingerprint devices available")]
    NoDevice,

    #[error("Failed to claim device: {0}")]
    Claim(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<zbus::Error> for ProviderError {
    fn from(e: zbus::Error) -> Self {
        ProviderError::Operation(e.to_string())
    }
}

/// The capability query failed. Callers fall back to the PIN path.
#[derive(Error, Debug)]
#[error("Capability probe failed: {0}")]
pub struct CapabilityProbeError(#[from] pub ProviderError);

/// Medication draft validation errors, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter medication name")]
    MissingName,

    #[error("Please enter dosage")]
    MissingDosage,

    #[error("Please select medication type")]
    MissingKind,

    #[error("Please select frequency")]
    MissingFrequency,
}

/// Errors from the medication store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid medication: {0}")]
    Invalid(#[from] DraftError),

    #[error("Unknown medication id: {0}")]
    UnknownMedication(u64),

    #[error("No doses remaining today for medication {0}")]
    NoDosesRemaining(u64),
}

/// Unrecognized option id when parsing a medication kind or frequency.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {field}: '{value}'")]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
}
