//! Add-medication dialog.

use crate::config::resources;
use crate::context::AppContext;
use crate::ui::app::extract_widget;
use crate::ui::dashboard_ui;
use gtk4::prelude::*;
use gtk4::{Builder, Button, DropDown, Entry, Label, Window};
use log::{info, warn};
use medremind_core::dose::{Frequency, MedicationDraft, MedicationKind, MedicationStore};

/// Form widgets of one open dialog.
#[derive(Clone)]
struct MedicationForm {
    name: Entry,
    dosage: Entry,
    kind: DropDown,
    frequency: DropDown,
    notes: Entry,
    error: Label,
}

impl MedicationForm {
    fn draft(&self) -> MedicationDraft {
        draft_from_form(
            &self.name.text(),
            &self.dosage.text(),
            self.kind.selected(),
            self.frequency.selected(),
            &self.notes.text(),
        )
    }

    fn show_error(&self, message: &str) {
        self.error.set_text(message);
        self.error.set_visible(true);
    }
}

/// Build a draft from the form's raw values. Dropdown positions index
/// `MedicationKind::ALL` and `Frequency::ALL`; anything out of range is
/// left unselected.
pub fn draft_from_form(
    name: &str,
    dosage: &str,
    kind: u32,
    frequency: u32,
    notes: &str,
) -> MedicationDraft {
    MedicationDraft {
        name: name.to_string(),
        dosage: dosage.to_string(),
        kind: MedicationKind::ALL.get(kind as usize).copied(),
        frequency: Frequency::ALL.get(frequency as usize).copied(),
        notes: notes.to_string(),
        ..MedicationDraft::default()
    }
}

/// Show the dialog; a valid draft is committed and the dashboard refreshed.
pub fn show_add_medication_dialog(ctx: &AppContext) {
    info!("Displaying add medication dialog");
    let builder = Builder::from_resource(resources::ADD_MEDICATION_UI);

    let window: Window = extract_widget(&builder, "add_medication_window");
    let cancel_button: Button = extract_widget(&builder, "cancel_button");
    let save_button: Button = extract_widget(&builder, "save_button");
    let form = MedicationForm {
        name: extract_widget(&builder, "name_entry"),
        dosage: extract_widget(&builder, "dosage_entry"),
        kind: extract_widget(&builder, "kind_dropdown"),
        frequency: extract_widget(&builder, "frequency_dropdown"),
        notes: extract_widget(&builder, "notes_entry"),
        error: extract_widget(&builder, "form_error_label"),
    };

    if let Some(parent) = ctx.ui.stack.root().and_downcast::<Window>() {
        window.set_transient_for(Some(&parent));
    }

    {
        let window_clone = window.clone();
        cancel_button.connect_clicked(move |_| {
            window_clone.close();
        });
    }

    {
        let ctx = ctx.clone();
        let window_clone = window.clone();
        save_button.connect_clicked(move |_| {
            let result = ctx.store.borrow_mut().commit(form.draft());
            match result {
                Ok(id) => {
                    info!("Medication {} saved from dialog", id);
                    window_clone.close();
                    dashboard_ui::refresh_dashboard(&ctx);
                }
                Err(e) => {
                    warn!("Medication not saved: {}", e);
                    form.show_error(&e.to_string());
                }
            }
        });
    }

    window.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use medremind_core::error::DraftError;

    #[test]
    fn test_draft_from_form_maps_positions() {
        let draft = draft_from_form("Metformin", "500mg", 1, 3, "with food");
        assert_eq!(draft.kind, Some(MedicationKind::Capsule));
        assert_eq!(draft.frequency, Some(Frequency::FourTimesDaily));
        assert_eq!(draft.notes, "with food");
        assert!(draft.reminder_enabled);
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_unselected_dropdown_fails_validation() {
        let draft = draft_from_form("Metformin", "500mg", u32::MAX, 0, "");
        assert_eq!(draft.kind, None);
        assert_eq!(draft.validate(), Err(DraftError::MissingKind));
    }
}
