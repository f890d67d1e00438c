//! Theme Handler
//!
//! Dark visuals with slightly lifted widget backgrounds.

use eframe::egui::{self, Color32};

pub const BACKGROUND: Color32 = Color32::from_rgb(17, 24, 39);
pub const CARD: Color32 = Color32::from_rgb(31, 41, 55);
pub const INPUT: Color32 = Color32::from_rgb(55, 65, 81);
pub const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113);
pub const LINK: Color32 = Color32::from_rgb(96, 165, 250);

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = CARD;
    visuals.extreme_bg_color = INPUT;
    ctx.set_visuals(visuals);
}
