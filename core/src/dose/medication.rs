//! Medication draft produced by the add-medication form.

use crate::error::{DraftError, ParseOptionError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationKind {
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Inhaler,
    Cream,
}

impl MedicationKind {
    pub const ALL: [MedicationKind; 6] = [
        MedicationKind::Tablet,
        MedicationKind::Capsule,
        MedicationKind::Liquid,
        MedicationKind::Injection,
        MedicationKind::Inhaler,
        MedicationKind::Cream,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MedicationKind::Tablet => "tablet",
            MedicationKind::Capsule => "capsule",
            MedicationKind::Liquid => "liquid",
            MedicationKind::Injection => "injection",
            MedicationKind::Inhaler => "inhaler",
            MedicationKind::Cream => "cream",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MedicationKind::Tablet => "Tablet",
            MedicationKind::Capsule => "Capsule",
            MedicationKind::Liquid => "Liquid",
            MedicationKind::Injection => "Injection",
            MedicationKind::Inhaler => "Inhaler",
            MedicationKind::Cream => "Cream",
        }
    }
}

impl fmt::Display for MedicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MedicationKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ParseOptionError {
                field: "medication type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "once")]
    OnceDaily,
    #[serde(rename = "twice")]
    TwiceDaily,
    #[serde(rename = "three")]
    ThreeTimesDaily,
    #[serde(rename = "four")]
    FourTimesDaily,
    #[serde(rename = "custom")]
    Custom,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::OnceDaily,
        Frequency::TwiceDaily,
        Frequency::ThreeTimesDaily,
        Frequency::FourTimesDaily,
        Frequency::Custom,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Frequency::OnceDaily => "once",
            Frequency::TwiceDaily => "twice",
            Frequency::ThreeTimesDaily => "three",
            Frequency::FourTimesDaily => "four",
            Frequency::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::OnceDaily => "Once daily",
            Frequency::TwiceDaily => "Twice daily",
            Frequency::ThreeTimesDaily => "3 times daily",
            Frequency::FourTimesDaily => "4 times daily",
            Frequency::Custom => "Custom",
        }
    }

    /// Doses scheduled per day. Custom schedules are not expanded.
    pub fn daily_doses(self) -> u32 {
        match self {
            Frequency::OnceDaily => 1,
            Frequency::TwiceDaily => 2,
            Frequency::ThreeTimesDaily => 3,
            Frequency::FourTimesDaily => 4,
            Frequency::Custom => 0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.id() == s)
            .ok_or_else(|| ParseOptionError {
                field: "frequency",
                value: s.to_string(),
            })
    }
}

/// Unvalidated form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDraft {
    pub name: String,
    pub dosage: String,
    pub kind: Option<MedicationKind>,
    pub frequency: Option<Frequency>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_reminder")]
    pub reminder_enabled: bool,
}

fn default_reminder() -> bool {
    true
}

impl Default for MedicationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            dosage: String::new(),
            kind: None,
            frequency: None,
            start_date: chrono::Local::now().date_naive(),
            notes: String::new(),
            reminder_enabled: true,
        }
    }
}

impl MedicationDraft {
    /// Check required fields in form order; the first problem wins.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.dosage.trim().is_empty() {
            return Err(DraftError::MissingDosage);
        }
        if self.kind.is_none() {
            return Err(DraftError::MissingKind);
        }
        if self.frequency.is_none() {
            return Err(DraftError::MissingFrequency);
        }
        Ok(())
    }
}
