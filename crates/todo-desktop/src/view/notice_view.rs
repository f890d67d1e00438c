//! Notice View
//!
//! Toast stack anchored to the top-right corner. Each toast has its own
//! close button.

use eframe::egui::{self, Align2, Button, Color32, RichText};

use crate::notice::{NoticeLevel, Notifications};
use crate::theme;

pub fn render_notices(ctx: &egui::Context, notices: &mut Notifications) {
    if notices.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("notices"))
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for notice in notices.iter() {
                let fill = match notice.level {
                    NoticeLevel::Info => theme::SUCCESS,
                    NoticeLevel::Error => theme::DANGER,
                };
                egui::Frame::none()
                    .fill(fill)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                    .show(ui, |ui| {
                        ui.set_max_width(280.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&notice.message).color(Color32::WHITE));
                            let close = Button::new(RichText::new("✕").color(Color32::WHITE));
                            if ui.add(close.frame(false)).clicked() {
                                dismissed.push(notice.id);
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });

    for id in dismissed {
        notices.dismiss(id);
    }
}
