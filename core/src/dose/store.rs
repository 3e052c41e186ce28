//! Medication store collaborator.
//!
//! Only an in-memory implementation is provided; nothing is persisted.

use crate::dose::medication::MedicationDraft;
use crate::dose::DoseSummary;
use crate::error::StoreError;
use log::info;

pub type MedicationId = u64;

/// A committed medication with today's dose tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    pub id: MedicationId,
    pub draft: MedicationDraft,
    pub scheduled_today: u32,
    pub taken_today: u32,
}

/// Read side for the dashboard, write side for the add-medication form.
pub trait MedicationStore {
    fn summary(&self) -> DoseSummary;

    fn commit(&mut self, draft: MedicationDraft) -> Result<MedicationId, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    medications: Vec<Medication>,
    next_id: MedicationId,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// First medication that still has a dose due today.
    pub fn next_pending(&self) -> Option<MedicationId> {
        self.medications
            .iter()
            .find(|m| m.taken_today < m.scheduled_today)
            .map(|m| m.id)
    }

    /// Record one scheduled dose as taken.
    pub fn mark_taken(&mut self, id: MedicationId) -> Result<DoseSummary, StoreError> {
        let medication = self
            .medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::UnknownMedication(id))?;

        if medication.taken_today >= medication.scheduled_today {
            return Err(StoreError::NoDosesRemaining(id));
        }
        medication.taken_today += 1;
        info!(
            "Dose taken for '{}' ({}/{})",
            medication.draft.name, medication.taken_today, medication.scheduled_today
        );
        Ok(self.summary())
    }
}

impl MedicationStore for InMemoryStore {
    fn summary(&self) -> DoseSummary {
        self.medications
            .iter()
            .fold(DoseSummary::default(), |acc, m| DoseSummary {
                completed: acc.completed + m.taken_today,
                total: acc.total + m.scheduled_today,
            })
    }

    fn commit(&mut self, draft: MedicationDraft) -> Result<MedicationId, StoreError> {
        draft.validate()?;

        self.next_id += 1;
        let id = self.next_id;
        let scheduled_today = draft.frequency.map(|f| f.daily_doses()).unwrap_or(0);
        info!(
            "Medication '{}' added with {} dose(s) scheduled today",
            draft.name, scheduled_today
        );
        self.medications.push(Medication {
            id,
            draft,
            scheduled_today,
            taken_today: 0,
        });
        Ok(id)
    }
}
