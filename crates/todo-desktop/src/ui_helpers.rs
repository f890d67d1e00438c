//! UI Helpers
//!
//! Shared widgets for the form cards and task rows.

use eframe::egui::{self, Button, Color32, CursorIcon, Response, RichText, TextEdit, Vec2};

use crate::theme;

pub const FIELD_WIDTH: f32 = 320.0;

/// Labeled single-line input with its validation message underneath.
pub fn form_field(
    ui: &mut egui::Ui,
    hint: &str,
    value: &mut String,
    error: Option<&str>,
    password: bool,
    enabled: bool,
) -> Response {
    let edit = TextEdit::singleline(value)
        .hint_text(hint)
        .password(password)
        .text_color(Color32::WHITE)
        .desired_width(FIELD_WIDTH)
        .margin(Vec2::new(10.0, 8.0));
    let response = ui.add_enabled(enabled, edit);

    if let Some(err) = error {
        ui.label(RichText::new(err).size(12.0).color(theme::ERROR_TEXT));
    }
    ui.add_space(10.0);
    response
}

/// Filled button, disabled (and dimmed) when `enabled` is false.
pub fn filled_button(ui: &mut egui::Ui, text: &str, fill: Color32, enabled: bool) -> Response {
    let btn = ui.add_enabled(
        enabled,
        Button::new(RichText::new(text).color(Color32::WHITE).strong())
            .fill(fill)
            .rounding(6.0),
    );
    pointer_on_hover(ui, &btn);
    btn
}

/// Full-width submit button for the auth cards.
pub fn submit_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> Response {
    let btn = ui.add_enabled_ui(enabled, |ui| {
        ui.add_sized(
            [FIELD_WIDTH, 40.0],
            Button::new(RichText::new(text).size(16.0).color(Color32::WHITE).strong())
                .fill(theme::PRIMARY)
                .rounding(8.0),
        )
    });
    pointer_on_hover(ui, &btn.inner);
    btn.inner
}

/// "Prefix Link" line; returns true when the link part is clicked.
pub fn link_line(ui: &mut egui::Ui, prefix: &str, link: &str) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(prefix).size(13.0));
        let resp = ui.add(
            egui::Label::new(RichText::new(link).size(13.0).color(theme::LINK))
                .sense(egui::Sense::click()),
        );
        pointer_on_hover(ui, &resp);
        clicked = resp.clicked();
    });
    clicked
}

fn pointer_on_hover(ui: &egui::Ui, response: &Response) {
    if response.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
    }
}
