use medremind_core::dose::{
    Frequency, InMemoryStore, MedicationDraft, MedicationKind, MedicationStore,
};
use medremind_core::error::{DraftError, StoreError};
use medremind_core::progress::ProgressRing;
use medremind_core::DoseSummary;

fn draft(name: &str, frequency: Frequency) -> MedicationDraft {
    MedicationDraft {
        name: name.to_string(),
        dosage: "10mg".to_string(),
        kind: Some(MedicationKind::Tablet),
        frequency: Some(frequency),
        ..MedicationDraft::default()
    }
}

#[test]
fn test_empty_store_has_no_doses() {
    let store = InMemoryStore::new();
    assert_eq!(store.summary(), DoseSummary::new(0, 0));
    assert_eq!(store.summary().ratio(), 0.0);
}

#[test]
fn test_commit_schedules_daily_doses() {
    let mut store = InMemoryStore::new();
    store.commit(draft("Metformin", Frequency::TwiceDaily)).unwrap();
    store.commit(draft("Vitamin D", Frequency::OnceDaily)).unwrap();
    store.commit(draft("Rescue inhaler", Frequency::Custom)).unwrap();

    assert_eq!(store.medications().len(), 3);
    assert_eq!(store.summary(), DoseSummary::new(0, 3));
}

#[test]
fn test_mark_taken_flows_into_summary() {
    let mut store = InMemoryStore::new();
    let id = store.commit(draft("Metformin", Frequency::TwiceDaily)).unwrap();

    let summary = store.mark_taken(id).unwrap();
    assert_eq!(summary, DoseSummary::new(1, 2));
    assert_eq!(summary.ratio(), 0.5);

    store.mark_taken(id).unwrap();
    assert_eq!(store.mark_taken(id), Err(StoreError::NoDosesRemaining(id)));
    assert_eq!(store.summary().ratio(), 1.0);
}

#[test]
fn test_invalid_draft_is_rejected() {
    let mut store = InMemoryStore::new();
    let mut incomplete = draft("Metformin", Frequency::OnceDaily);
    incomplete.dosage = " ".to_string();

    assert_eq!(
        store.commit(incomplete),
        Err(StoreError::Invalid(DraftError::MissingDosage))
    );
    assert!(store.medications().is_empty());
}

#[test]
fn test_unknown_medication() {
    let mut store = InMemoryStore::new();
    assert_eq!(store.mark_taken(42), Err(StoreError::UnknownMedication(42)));
}

#[test]
fn test_next_pending_walks_scheduled_doses() {
    let mut store = InMemoryStore::new();
    assert_eq!(store.next_pending(), None);

    let custom = store.commit(draft("Rescue inhaler", Frequency::Custom)).unwrap();
    let once = store.commit(draft("Vitamin D", Frequency::OnceDaily)).unwrap();
    let twice = store.commit(draft("Metformin", Frequency::TwiceDaily)).unwrap();
    assert_ne!(store.next_pending(), Some(custom));
    assert_eq!(store.next_pending(), Some(once));

    store.mark_taken(once).unwrap();
    assert_eq!(store.next_pending(), Some(twice));
    store.mark_taken(twice).unwrap();
    store.mark_taken(twice).unwrap();
    assert_eq!(store.next_pending(), None);
    assert_eq!(store.summary(), DoseSummary::new(3, 3));
}

#[test]
fn test_store_changes_drive_ring_animation() {
    let mut store = InMemoryStore::new();
    let mut ring = ProgressRing::default();
    assert!(ring.update(store.summary()).is_none());

    let id = store.commit(draft("Metformin", Frequency::TwiceDaily)).unwrap();
    // 0 of 2 is still a zero ratio
    assert!(ring.update(store.summary()).is_none());

    store.mark_taken(id).unwrap();
    let animation = ring.update(store.summary());
    assert!(animation.is_some());
    assert!(ring.is_animating());
    assert_eq!(ring.summary().label(), "1 of 2 doses");
}
