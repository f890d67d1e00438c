//! Profile View
//!
//! User picker, new task input and the task list. Row buttons are collected
//! into a [`RowAction`] and applied after the list is drawn.

use eframe::egui::{self, Color32, RichText, TextEdit};

use crate::theme;
use crate::ui_helpers::filled_button;
use crate::viewmodel::ProfileViewModel;

enum RowAction {
    Edit(String),
    Save,
    Cancel,
    Delete(String),
}

pub fn render_profile(ctx: &egui::Context, vm: &mut ProfileViewModel) {
    egui::TopBottomPanel::top("profile_header")
        .frame(egui::Frame::none().fill(theme::CARD).inner_margin(12.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let heading = vm.selected_email().unwrap_or("User Profile").to_string();
                ui.label(RichText::new(heading).size(20.0).color(Color32::WHITE).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if filled_button(ui, "Logout", theme::DANGER, true).clicked() {
                        vm.logout();
                    }
                });
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(theme::BACKGROUND).inner_margin(16.0))
        .show(ctx, |ui| {
            let blocked = vm.prompt.is_some();
            ui.add_enabled_ui(!blocked, |ui| {
                render_user_picker(ui, ctx, vm);
                ui.add_space(12.0);
                render_new_task(ui, ctx, vm);
                ui.add_space(12.0);
                ui.separator();
                render_task_list(ui, ctx, vm);
            });
        });

    render_prompt(ctx, vm);
}

fn render_user_picker(ui: &mut egui::Ui, ctx: &egui::Context, vm: &mut ProfileViewModel) {
    let current = vm.selected_email().map(str::to_owned);
    let mut choice = current.clone();

    ui.horizontal(|ui| {
        ui.label(RichText::new("User").color(Color32::WHITE));
        egui::ComboBox::from_id_salt("user_picker")
            .width(280.0)
            .selected_text(current.as_deref().unwrap_or("Select an Email"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, None, "Select an Email");
                for user in &vm.users {
                    ui.selectable_value(&mut choice, Some(user.email.clone()), &user.email);
                }
            });
        if vm.loading_users {
            ui.spinner();
        }
    });

    if choice != current {
        vm.select_user(choice, ctx);
    }
}

fn render_new_task(ui: &mut egui::Ui, ctx: &egui::Context, vm: &mut ProfileViewModel) {
    ui.horizontal(|ui| {
        let input = ui.add(
            TextEdit::singleline(&mut vm.new_task_title)
                .hint_text("New task")
                .desired_width(420.0),
        );
        let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = filled_button(ui, "Add Task", theme::PRIMARY, !vm.creating).clicked();
        if clicked || entered {
            vm.add_task(ctx);
        }
        if vm.creating {
            ui.spinner();
        }
    });
}

fn render_task_list(ui: &mut egui::Ui, ctx: &egui::Context, vm: &mut ProfileViewModel) {
    if vm.loading_tasks {
        ui.add_space(10.0);
        ui.spinner();
        return;
    }
    if vm.tasks.is_empty() {
        ui.add_space(10.0);
        ui.label(RichText::new("No tasks available for the selected user.").color(Color32::GRAY));
        return;
    }

    let mut action = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for task in vm.tasks.iter() {
            let busy = vm.is_busy(&task.id);
            egui::Frame::none()
                .fill(theme::CARD)
                .rounding(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| match vm.active_edit.as_mut() {
                        Some(edit) if edit.is_for(&task.id) => {
                            ui.add_enabled(
                                !busy,
                                TextEdit::singleline(&mut edit.draft_title).desired_width(380.0),
                            );
                            if filled_button(ui, "Save", theme::SUCCESS, !busy).clicked() {
                                action = Some(RowAction::Save);
                            }
                            if filled_button(ui, "Cancel", theme::INPUT, !busy).clicked() {
                                action = Some(RowAction::Cancel);
                            }
                        }
                        _ => {
                            ui.label(RichText::new(&task.title).color(Color32::WHITE));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if filled_button(ui, "Delete", theme::DANGER, !busy).clicked() {
                                    action = Some(RowAction::Delete(task.id.clone()));
                                }
                                if filled_button(ui, "Edit", theme::WARNING, !busy).clicked() {
                                    action = Some(RowAction::Edit(task.id.clone()));
                                }
                            });
                        }
                    });
                });
            ui.add_space(4.0);
        }
    });

    match action {
        Some(RowAction::Edit(id)) => vm.begin_edit(&id),
        Some(RowAction::Save) => {
            vm.save_edit(ctx);
        }
        Some(RowAction::Cancel) => vm.cancel_edit(),
        Some(RowAction::Delete(id)) => {
            vm.delete_task(&id, ctx);
        }
        None => {}
    }
}

fn render_prompt(ctx: &egui::Context, vm: &mut ProfileViewModel) {
    let Some(message) = vm.prompt.clone() else {
        return;
    };

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(message).color(Color32::WHITE));
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if filled_button(ui, "OK", theme::PRIMARY, true).clicked() {
                    vm.dismiss_prompt();
                }
            });
        });
}
