//! Dashboard: dose progress ring and quick action tiles.

use crate::config::QUICK_ACTIONS;
use crate::context::AppContext;
use crate::ui::navigation;
use crate::util::hex_to_rgb;
use gtk4::prelude::*;
use gtk4::{cairo, glib, Align, Box as GtkBox, Button, Image, Label, Orientation};
use log::{debug, info, warn};
use medremind_core::config::{colors, ring as ring_defaults};
use medremind_core::dose::MedicationStore;
use medremind_core::progress::{AnimationId, ArcGeometry};

use std::f64::consts::PI;

/// Set up the ring drawing function and the quick action tiles.
pub fn setup_dashboard(ctx: &AppContext) {
    // The arc stroke is wider than the track; leave room so it is not clipped.
    let size = (ctx.ring.borrow().geometry().size() + ring_defaults::ARC_WIDTH
        - ring_defaults::TRACK_WIDTH)
        .ceil() as i32;
    let area = &ctx.ui.dashboard.progress_area;
    area.set_content_width(size);
    area.set_content_height(size);

    let ring = ctx.ring.clone();
    area.set_draw_func(move |_, cr, width, height| {
        let geometry = ring.borrow().current();
        let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        if let Err(e) = draw_ring(cr, center, &geometry) {
            warn!("Failed to draw progress ring: {}", e);
        }
    });

    {
        let ctx_clone = ctx.clone();
        ctx.ui
            .dashboard
            .take_dose_button
            .connect_clicked(move |_| take_next_dose(&ctx_clone));
    }

    build_quick_actions(ctx);
}

/// Mark the first pending dose of the day as taken.
fn take_next_dose(ctx: &AppContext) {
    let result = {
        let mut store = ctx.store.borrow_mut();
        match store.next_pending() {
            Some(id) => store.mark_taken(id),
            None => {
                info!("No doses left to take today");
                return;
            }
        }
    };
    match result {
        Ok(summary) => info!("Dose recorded, now {}", summary.label()),
        Err(e) => warn!("Failed to record dose: {}", e),
    }
    refresh_dashboard(ctx);
}

/// Re-read the dose summary and animate the ring toward it.
pub fn refresh_dashboard(ctx: &AppContext) {
    let summary = ctx.store.borrow().summary();
    info!("Dashboard showing {}", summary.label());

    let widgets = &ctx.ui.dashboard;
    widgets
        .percent_label
        .set_text(&format!("{}%", summary.percent()));
    widgets.doses_label.set_text(&summary.label());
    widgets
        .take_dose_button
        .set_sensitive(ctx.store.borrow().next_pending().is_some());

    let animation = ctx.ring.borrow_mut().update(summary);
    match animation {
        Some(id) => start_ring_timer(ctx, id),
        None => widgets.progress_area.queue_draw(),
    }
}

/// Drive the ring with a frame clock tick callback until `id` finishes or is
/// superseded. Any previous timer is removed first.
fn start_ring_timer(ctx: &AppContext, id: AnimationId) {
    ctx.cancel_ring_timer();

    let ring = ctx.ring.clone();
    let slot = ctx.ring_tick.clone();
    let tick_id = ctx
        .ui
        .dashboard
        .progress_area
        .add_tick_callback(move |area, _clock| {
            let mut ring = ring.borrow_mut();
            if !ring.is_current(id) {
                debug!("Ring animation superseded, stopping frame timer");
                return glib::ControlFlow::Break;
            }
            ring.frame();
            area.queue_draw();

            if ring.is_animating() {
                glib::ControlFlow::Continue
            } else {
                slot.borrow_mut().take();
                glib::ControlFlow::Break
            }
        });
    *ctx.ring_tick.borrow_mut() = Some(tick_id);
}

/// Paint the gray track and the progress arc.
fn draw_ring(
    cr: &cairo::Context,
    (cx, cy): (f64, f64),
    geometry: &ArcGeometry,
) -> Result<(), cairo::Error> {
    let scheme = colors();

    let (r, g, b) = hex_to_rgb(scheme.track);
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(ring_defaults::TRACK_WIDTH);
    cr.arc(cx, cy, geometry.radius, 0.0, 2.0 * PI);
    cr.stroke()?;

    if geometry.ratio <= 0.0 {
        return Ok(());
    }

    let (r, g, b) = hex_to_rgb(scheme.primary_dark);
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(ring_defaults::ARC_WIDTH);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.set_dash(&[geometry.dash_array, geometry.dash_array], geometry.dash_offset);
    cr.arc(
        cx,
        cy,
        geometry.radius,
        ArcGeometry::START_ANGLE,
        ArcGeometry::START_ANGLE + 2.0 * PI,
    );
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    Ok(())
}

/// Fill the flow box with one tile per quick action.
fn build_quick_actions(ctx: &AppContext) {
    let flow = &ctx.ui.dashboard.actions_flow;
    while let Some(child) = flow.first_child() {
        flow.remove(&child);
    }

    for action in QUICK_ACTIONS {
        let content = GtkBox::new(Orientation::Vertical, 10);
        content.set_halign(Align::Start);

        let icon = Image::from_icon_name(action.icon);
        icon.set_pixel_size(28);
        icon.add_css_class("action-icon");
        icon.set_halign(Align::Start);

        let label = Label::new(Some(action.label));
        label.set_xalign(0.0);
        label.add_css_class("action-label");

        content.append(&icon);
        content.append(&label);

        let tile = Button::new();
        tile.set_child(Some(&content));
        tile.add_css_class("action-tile");
        tile.add_css_class(action.css_class);
        let ctx_clone = ctx.clone();
        tile.connect_clicked(move |_| navigation::open_quick_action(&ctx_clone, action));

        flow.insert(&tile, -1);
    }
}
