//! Login View
//!
//! Compact login card. Enter in the password field submits.

use eframe::egui::{self, Button, Color32, RichText};

use crate::theme;
use crate::ui_helpers::{form_field, link_line, submit_button};
use crate::viewmodel::LoginViewModel;

pub fn render_login(ctx: &egui::Context, vm: &mut LoginViewModel) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(theme::BACKGROUND).inner_margin(20.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);

                ui.label(RichText::new("🔐").size(40.0));
                ui.add_space(5.0);
                ui.label(RichText::new("Login").size(22.0).color(Color32::WHITE).strong());
                ui.add_space(25.0);

                let enabled = !vm.is_loading;
                form_field(
                    ui,
                    "Email",
                    &mut vm.form.email,
                    vm.field_errors.get("email"),
                    false,
                    enabled,
                );
                let password = form_field(
                    ui,
                    "Password",
                    &mut vm.form.password,
                    vm.field_errors.get("password"),
                    !vm.show_password,
                    enabled,
                );
                let submitted =
                    password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let toggle = if vm.show_password { "Hide password" } else { "Show password" };
                if ui.add(Button::new(RichText::new(toggle).size(12.0)).frame(false)).clicked() {
                    vm.show_password = !vm.show_password;
                }
                ui.add_space(15.0);

                if vm.is_loading {
                    ui.spinner();
                    ui.label(RichText::new("Logging in...").size(12.0).color(Color32::GRAY));
                } else if submit_button(ui, "Login", true).clicked() || submitted {
                    vm.login(ctx);
                }

                if let Some(err) = &vm.server_error {
                    ui.add_space(10.0);
                    ui.label(RichText::new(err).size(12.0).color(theme::ERROR_TEXT));
                }

                ui.add_space(20.0);
                if link_line(ui, "Don't have an account?", "Sign up") {
                    vm.go_to_signup();
                }
            });
        });
}
