//! Dose data handed to the dashboard.

pub mod medication;
pub mod store;

pub use medication::{Frequency, MedicationDraft, MedicationKind};
pub use store::{InMemoryStore, Medication, MedicationId, MedicationStore};

use serde::Serialize;

/// Today's dose completion.
///
/// `completed <= total` is expected but not enforced here; the ratio clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DoseSummary {
    pub completed: u32,
    pub total: u32,
}

impl DoseSummary {
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Completion ratio in `[0, 1]`. No doses scheduled reads as empty.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (f64::from(self.completed) / f64::from(self.total)).min(1.0)
    }

    /// Rounded percentage for the ring's center label.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }

    pub fn label(&self) -> String {
        format!("{} of {} doses", self.completed, self.total)
    }
}
