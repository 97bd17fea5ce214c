use super::ScreenshotUploader;
use crate::upload::{NoticeLevel, UploadStatus};
use crate::utils::color::{self, color};
use eframe::egui::{self, Align2, Color32, Pos2, Rect, RichText, Vec2};

enum UiAction {
    ApiKeyChanged,
    SaveSettings,
    ChangeDirectory,
    OpenLink(String),
    Close,
}

fn at(origin: Pos2, x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::from_min_size(origin + Vec2::new(x, y), Vec2::new(width, height))
}

/// The background keeps its own pixel size, anchored at the top-left corner.
fn background_rect(origin: Pos2, image_size: Vec2) -> Rect {
    Rect::from_min_size(origin, image_size)
}

fn bold(text: &str) -> RichText {
    RichText::new(text).color(Color32::WHITE).strong()
}

impl ScreenshotUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let mut widgets: Vec<Rect> = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let window = ui.max_rect();
                let origin = window.min;

                match &self.background {
                    Some(texture) => {
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        let rect = background_rect(origin, texture.size_vec2());
                        ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
                    }
                    None => {
                        ui.painter()
                            .rect_filled(window, egui::Rounding::same(18.0), color(color::PANEL));
                    }
                }

                let label = ui.put(at(origin, 50.0, 50.0, 140.0, 22.0), egui::Label::new(bold("Remove.bg API Key:")));
                widgets.push(label.rect);
                let key = ui.put(
                    at(origin, 200.0, 50.0, 320.0, 22.0),
                    egui::TextEdit::singleline(&mut self.api_key_input).password(true),
                );
                if key.changed() {
                    actions.push(UiAction::ApiKeyChanged);
                }
                widgets.push(key.rect);

                let toggle = ui.put(
                    at(origin, 50.0, 100.0, 150.0, 26.0),
                    egui::Checkbox::new(&mut self.remove_bg_enabled, bold("Remove Background")),
                );
                if toggle.changed() {
                    actions.push(UiAction::SaveSettings);
                }
                widgets.push(toggle.rect);

                let save = ui.put(
                    at(origin, 200.0, 100.0, 140.0, 28.0),
                    egui::Button::new(bold("Save Settings")).fill(color(color::SAVE)),
                );
                if save.clicked() {
                    actions.push(UiAction::SaveSettings);
                }
                widgets.push(save.rect);

                let change_dir = ui.put(
                    at(origin, 200.0, 150.0, 140.0, 28.0),
                    egui::Button::new(bold("Change Directory")).fill(color(color::DIRECTORY)),
                );
                if change_dir.clicked() {
                    actions.push(UiAction::ChangeDirectory);
                }
                widgets.push(change_dir.rect);

                let watching = match self.service.watcher() {
                    Some(watcher) => format!("Watching {}", watcher.directory().display()),
                    None => "Not watching any folder".to_string(),
                };
                ui.put(
                    at(origin, 350.0, 150.0, 400.0, 28.0),
                    egui::Label::new(RichText::new(watching).color(Color32::LIGHT_GRAY)).truncate(true),
                );

                ui.put(at(origin, 50.0, 200.0, 120.0, 22.0), egui::Label::new(bold("Upload History")));

                let history_rect = at(origin, 50.0, 230.0, 640.0, 300.0);
                widgets.push(history_rect);
                ui.allocate_ui_at_rect(history_rect, |ui| {
                    egui::Frame::none()
                        .fill(color(color::PANEL_LIGHT))
                        .rounding(6.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_min_size(history_rect.size() - Vec2::splat(16.0));
                            egui::ScrollArea::vertical()
                                .max_height(250.0)
                                .stick_to_bottom(true)
                                .show(ui, |ui| {
                                    for url in self.state.history.entries() {
                                        let link = ui.add(
                                            egui::Label::new(RichText::new(url).color(color(color::LINK)))
                                                .sense(egui::Sense::click()),
                                        );
                                        if link.on_hover_text("Open in browser").clicked() {
                                            actions.push(UiAction::OpenLink(url.clone()));
                                        }
                                    }
                                });
                            ui.separator();
                            self.render_status(ui);
                        });
                });

                let close = ui.put(
                    at(origin, 750.0, 10.0, 32.0, 26.0),
                    egui::Button::new(bold("X")).fill(color(color::CLOSE)),
                );
                if close.clicked() {
                    actions.push(UiAction::Close);
                }
                widgets.push(close.rect);

                let pressed_on_surface = ctx.input(|i| {
                    i.pointer.primary_pressed()
                        && i.pointer.interact_pos().map_or(false, |pos| {
                            window.contains(pos) && !widgets.iter().any(|rect| rect.contains(pos))
                        })
                });
                if pressed_on_surface && self.state.notices.is_empty() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }
            });

        self.render_notice(ctx);

        for action in actions {
            match action {
                UiAction::ApiKeyChanged => self.api_key_changed(),
                UiAction::SaveSettings => self.save_settings(),
                UiAction::ChangeDirectory => self.change_directory(),
                UiAction::OpenLink(url) => {
                    if let Err(e) = open::that(&url) {
                        log::error!("Failed to open {}: {}", url, e);
                    }
                }
                UiAction::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(self.state.get_status_text()).color(Color32::LIGHT_GRAY));
            if let Some(last) = self.state.file_statuses.last() {
                let (text, tint) = match &last.status {
                    UploadStatus::Processing => ("⏳".to_string(), Color32::GRAY),
                    UploadStatus::Uploaded(_) => (format!("✅ {}", last.name), Color32::from_rgb(0, 180, 0)),
                    UploadStatus::Error(err) => {
                        (format!("❌ {} - {}", last.name, err), Color32::from_rgb(220, 50, 50))
                    }
                    UploadStatus::Skipped(reason) => (format!("⏩ {}", reason), Color32::GRAY),
                };
                ui.colored_label(tint, text);
            }
        });
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.state.notices.front() else {
            return;
        };

        let tint = match notice.level {
            NoticeLevel::Info => Color32::WHITE,
            NoticeLevel::Error => Color32::from_rgb(220, 50, 50),
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.colored_label(tint, notice.body.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.dismiss_notice();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_not_stretched_to_window() {
        let origin = Pos2::new(0.0, 0.0);
        let rect = background_rect(origin, Vec2::new(640.0, 480.0));
        assert_eq!(rect.min, origin);
        assert_eq!(rect.size(), Vec2::new(640.0, 480.0));

        let large = background_rect(Pos2::new(4.0, 4.0), Vec2::new(1024.0, 700.0));
        assert_eq!(large.max, Pos2::new(1028.0, 704.0));
    }
}
