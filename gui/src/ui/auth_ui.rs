//! Authentication card functionality.

use crate::context::AppContext;
use crate::ui::navigation::StackNavigator;
use gtk4::glib;
use gtk4::prelude::*;
use log::{error, info};
use medremind_core::auth::{
    probe_or_default, AuthAttemptResult, AuthCapability, AuthProvider, GateOutcome, GateState,
    Navigator,
};

use std::sync::mpsc::{self, TryRecvError};

/// Wire the card's buttons and kick off the capability probe.
pub fn setup_auth_gate(ctx: &AppContext) {
    {
        let ctx_clone = ctx.clone();
        ctx.ui.auth.button.connect_clicked(move |_| {
            info!("User clicked authenticate button");
            start_attempt(&ctx_clone, false);
        });
    }

    {
        let ctx_clone = ctx.clone();
        ctx.ui.auth.fallback_button.connect_clicked(move |_| {
            info!("User chose PIN fallback");
            start_attempt(&ctx_clone, true);
        });
    }

    update_auth_ui(ctx);
    start_capability_probe(ctx);
}

/// Render the card from the gate's current state.
pub fn update_auth_ui(ctx: &AppContext) {
    let gate = ctx.gate.borrow();
    let prompt = gate.prompt();
    let widgets = &ctx.ui.auth;

    widgets.instruction.set_text(prompt.instruction);
    widgets.button_icon.set_icon_name(Some(prompt.icon_name));
    widgets
        .button_label
        .set_text(prompt.button_label_for(gate.state()));
    widgets.button.set_sensitive(gate.can_attempt());

    match prompt.fallback_label {
        Some(label) => {
            widgets.fallback_button.set_label(label);
            widgets.fallback_button.set_visible(true);
            widgets.fallback_button.set_sensitive(gate.can_attempt());
        }
        None => widgets.fallback_button.set_visible(false),
    }

    match gate.error_message() {
        Some(message) if gate.state() == GateState::Failed => {
            widgets.error_label.set_text(message);
            widgets.error_box.set_visible(true);
        }
        _ => widgets.error_box.set_visible(false),
    }
}

/// Probe hardware and enrollment in the background, then refresh the card.
fn start_capability_probe(ctx: &AppContext) {
    info!("Starting background biometric capability probe");

    let (tx, rx) = mpsc::channel::<AuthCapability>();
    let ctx_clone = ctx.clone();

    glib::idle_add_local(move || match rx.try_recv() {
        Ok(capability) => {
            info!(
                "Capability probe complete: hardware={}, enrolled={}",
                capability.has_hardware, capability.is_enrolled
            );
            ctx_clone.gate.borrow_mut().apply_capability(capability);
            if !ctx_clone.gate.borrow().is_torn_down() {
                update_auth_ui(&ctx_clone);
            }
            glib::ControlFlow::Break
        }
        Err(TryRecvError::Empty) => glib::ControlFlow::Continue,
        Err(TryRecvError::Disconnected) => glib::ControlFlow::Break,
    });

    let provider = ctx.provider.clone();
    ctx.rt.spawn(async move {
        let capability = probe_or_default(&provider).await;
        let _ = tx.send(capability);
    });
}

/// Begin one attempt. Ignored while another attempt is in flight.
fn start_attempt(ctx: &AppContext, fallback: bool) {
    let request = {
        let mut gate = ctx.gate.borrow_mut();
        if fallback {
            gate.begin_fallback_attempt()
        } else {
            gate.begin_attempt()
        }
    };
    let Some(request) = request else {
        return;
    };
    update_auth_ui(ctx);

    let (tx, rx) = mpsc::channel::<AuthAttemptResult>();
    let attempt = request.attempt;
    let ctx_clone = ctx.clone();

    glib::idle_add_local(move || match rx.try_recv() {
        Ok(result) => {
            let outcome = ctx_clone.gate.borrow_mut().complete_attempt(attempt, result);
            match outcome {
                GateOutcome::HandOff => {
                    StackNavigator::new(&ctx_clone).replace_with_dashboard();
                }
                GateOutcome::Failed(_) => update_auth_ui(&ctx_clone),
                GateOutcome::Ignored => {}
            }
            glib::ControlFlow::Break
        }
        Err(TryRecvError::Empty) => glib::ControlFlow::Continue,
        Err(TryRecvError::Disconnected) => glib::ControlFlow::Break,
    });

    let provider = ctx.provider.clone();
    ctx.rt.spawn(async move {
        let result = match provider.authenticate(&request.options).await {
            Ok(result) => result,
            Err(e) => {
                error!("Authentication provider error: {}", e);
                AuthAttemptResult::system_error()
            }
        };
        let _ = tx.send(result);
    });
}
