use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{BackendLabel, DraftField, UserId};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::{
    events::UiEvent,
    notifications::NotificationSeverity,
    orchestration::dispatch_backend_command,
    reducer::{ControllerStatus, ListOrder, UserInterfaceController},
};
use crate::ui::theme::{BackendTheme, CARD_FILL, ERROR_TEXT, FORM_FILL};

const PANEL_MAX_WIDTH: f32 = 500.0;
const LOGO_SIZE: f32 = 80.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub backend: BackendLabel,
    pub logo_path: Option<PathBuf>,
    pub list_order: ListOrder,
    pub notification_ttl: Duration,
}

impl StartupConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            backend: settings.backend_label(),
            logo_path: settings.logo_path(),
            list_order: settings.list_order,
            notification_ttl: settings.notification_ttl,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RowAction {
    Delete(UserId),
    Update(UserId),
}

pub struct UserAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: UserInterfaceController,
    backend: BackendLabel,
    theme: BackendTheme,
    logo_uri: Option<String>,
}

impl UserAdminApp {
    /// Builds the app and issues the initial list fetch.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let logo_uri = match startup.logo_path.as_deref().map(std::fs::canonicalize) {
            Some(Ok(path)) => Some(format!("file://{}", path.display())),
            Some(Err(err)) => {
                tracing::warn!(
                    path = ?startup.logo_path,
                    "backend logo asset unavailable: {err}"
                );
                None
            }
            None => {
                tracing::warn!(
                    backend = %startup.backend,
                    "backend label is not a plain file name; skipping logo"
                );
                None
            }
        };

        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: UserInterfaceController::new(
                startup.list_order,
                startup.notification_ttl,
            ),
            theme: BackendTheme::for_label(&startup.backend),
            backend: startup.backend,
            logo_uri,
        };
        let mount = app.controller.mount();
        app.dispatch(mount);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.controller);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(follow_up) = self.controller.apply(event) {
                self.dispatch(follow_up);
            }
        }
    }

    fn show_backend_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(self.theme.accent)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    if let Some(uri) = &self.logo_uri {
                        ui.add(
                            egui::Image::new(uri.as_str())
                                .fit_to_exact_size(egui::vec2(LOGO_SIZE, LOGO_SIZE)),
                        );
                    }
                    ui.heading(
                        egui::RichText::new(self.backend.display_title())
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                });
                ui.add_space(12.0);
                self.show_create_form(ui);
                ui.add_space(12.0);
                self.show_update_draft_form(ui);
                ui.add_space(8.0);
                self.show_status_line(ui);
                ui.add_space(8.0);
                self.show_user_list(ui);
            });
    }

    fn show_create_form(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        egui::Frame::NONE
            .fill(FORM_FILL)
            .corner_radius(6.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                for field in DraftField::ALL {
                    let mut value = self.controller.draft().field(field).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut value)
                            .hint_text(field.placeholder())
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        self.controller.edit_draft(field, value);
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    if let Some(message) = self.controller.validation_errors().get(field) {
                        ui.label(egui::RichText::new(message).color(ERROR_TEXT).small());
                    }
                    ui.add_space(4.0);
                }

                let add_user = egui::Button::new(
                    egui::RichText::new("Add User").color(egui::Color32::WHITE),
                )
                .fill(egui::Color32::BLACK);
                if ui
                    .add_sized([ui.available_width(), 32.0], add_user)
                    .clicked()
                {
                    submit = true;
                }
            });

        if submit {
            if let Some(cmd) = self.controller.submit_create() {
                self.dispatch(cmd);
            }
        }
    }

    fn show_update_draft_form(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Update draft")
            .id_salt("update_draft")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Sent by every \"Update User\" click.")
                        .small()
                        .weak(),
                );
                for field in DraftField::ALL {
                    let mut value = self.controller.update_draft().field(field).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut value)
                            .hint_text(field.placeholder())
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        self.controller.edit_update_draft(field, value);
                    }
                }
            });
    }

    fn show_status_line(&self, ui: &mut egui::Ui) {
        let label = match self.controller.status() {
            ControllerStatus::Idle => return,
            ControllerStatus::Loading => "Loading users…",
            ControllerStatus::Submitting => "Saving…",
        };
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(label);
        });
    }

    fn show_user_list(&mut self, ui: &mut egui::Ui) {
        let mut action = None;
        for user in self.controller.users() {
            egui::Frame::NONE
                .fill(CARD_FILL)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(format!("Id: {}", user.id))
                                    .small()
                                    .color(egui::Color32::DARK_GRAY),
                            );
                            ui.label(
                                egui::RichText::new(&user.name)
                                    .strong()
                                    .color(egui::Color32::BLACK),
                            );
                            ui.label(
                                egui::RichText::new(&user.email).color(egui::Color32::DARK_GRAY),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.vertical(|ui| {
                                if themed_button(ui, &self.theme, "Delete User").clicked() {
                                    action = Some(RowAction::Delete(user.id));
                                }
                                if themed_button(ui, &self.theme, "Update User").clicked() {
                                    action = Some(RowAction::Update(user.id));
                                }
                            });
                        });
                    });
                });
            ui.add_space(8.0);
        }

        let cmd = match action {
            Some(RowAction::Delete(id)) => self.controller.delete_clicked(id),
            Some(RowAction::Update(id)) => self.controller.update_clicked(id),
            None => return,
        };
        self.dispatch(cmd);
    }

    fn show_notifications(&self, ctx: &egui::Context) {
        if self.controller.notifications().is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for notification in self.controller.notifications().iter() {
                    let fill = match notification.severity {
                        NotificationSeverity::Success => egui::Color32::from_rgb(22, 101, 52),
                        NotificationSeverity::Warning => egui::Color32::from_rgb(161, 98, 7),
                        NotificationSeverity::Error => egui::Color32::from_rgb(111, 53, 53),
                    };
                    let response = egui::Frame::NONE
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&notification.message)
                                    .color(egui::Color32::WHITE),
                            );
                        })
                        .response;
                    if let Some(detail) = &notification.detail {
                        response.on_hover_text(detail.as_str());
                    }
                    ui.add_space(6.0);
                }
            });
    }
}

fn themed_button(ui: &mut egui::Ui, theme: &BackendTheme, label: &str) -> egui::Response {
    ui.scope(|ui| {
        let widgets = &mut ui.visuals_mut().widgets;
        widgets.inactive.weak_bg_fill = theme.button;
        widgets.hovered.weak_bg_fill = theme.button_hover;
        widgets.active.weak_bg_fill = theme.button_hover;
        ui.add(egui::Button::new(
            egui::RichText::new(label).small().color(egui::Color32::WHITE),
        ))
    })
    .inner
}

impl eframe::App for UserAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.controller.expire_notifications(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(PANEL_MAX_WIDTH);
                    self.show_backend_panel(ui);
                });
            });
        });
        self.show_notifications(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
