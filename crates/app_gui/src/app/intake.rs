//! Intake zone: click to pick, drag and drop, paste.

use super::{UiApp, palette};
use crate::clipboard;
use eframe::egui;
use leaf_core::DroppedItem;
use leaf_core::intake::PICKER_EXTENSIONS;
use rfd::FileDialog;

impl UiApp {
    /// Window-level gestures: file hover/drop and the paste shortcut.
    pub(super) fn handle_window_input(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, paste_requested) = ctx.input(|i| {
            let paste = i.events.iter().any(|e| match e {
                egui::Event::Paste(_) => true,
                egui::Event::Key {
                    key: egui::Key::V,
                    pressed: true,
                    modifiers,
                    ..
                } => modifiers.command,
                _ => false,
            });
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                paste,
            )
        });

        if hovering != self.source.is_dragging() {
            self.source.set_hovering(hovering);
        }

        if !dropped.is_empty() {
            let items = dropped
                .into_iter()
                .map(|f| DroppedItem {
                    name: f.name,
                    mime: f.mime,
                    path: f.path,
                    bytes: f.bytes,
                })
                .collect();
            if let Some(file) = self.source.drop_files(items) {
                self.select_image(file);
            }
        }

        if paste_requested && self.paste_listeners.is_listening() {
            self.paste_from_clipboard();
        }
    }

    fn paste_from_clipboard(&mut self) {
        if let Some(file) = self.source.paste(clipboard::read_items()) {
            self.select_image(file);
        } else {
            tracing::debug!("paste ignored: clipboard holds no image");
        }
    }

    fn pick_file(&mut self) {
        let picked = FileDialog::new()
            .add_filter("Images", PICKER_EXTENSIONS)
            .set_directory(".")
            .pick_file();
        if let Some(file) = self.source.pick_files(picked) {
            self.select_image(file);
        }
    }

    pub(super) fn render_intake(&mut self, ui: &mut egui::Ui) {
        if self.controller.file().is_some() {
            self.render_selected(ui);
        } else {
            self.render_drop_zone(ui);
        }
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let dragging = self.source.is_dragging();
        let (stroke, fill) = if dragging {
            (
                egui::Stroke::new(2.0, palette::PRIMARY),
                palette::PRIMARY.gamma_multiply(0.08),
            )
        } else {
            (
                egui::Stroke::new(2.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                ui.visuals().extreme_bg_color,
            )
        };

        let zone = egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::same(40))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let icon_size = if dragging { 52.0 } else { 44.0 };
                    ui.label(egui::RichText::new("⬆").size(icon_size).color(palette::PRIMARY));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Upload Banana Leaf Image").size(20.0).strong());
                    ui.label(
                        egui::RichText::new(
                            "Drag and drop an image here, click to select, or paste from clipboard",
                        )
                        .color(palette::MUTED),
                    );
                    ui.label(
                        egui::RichText::new("Supports: JPG, PNG, WEBP")
                            .small()
                            .color(palette::MUTED),
                    );
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if zone.clicked() {
            self.pick_file();
        }

        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            if ui.small_button("📋 Paste from clipboard").clicked() {
                self.paste_from_clipboard();
            }
        });
    }

    fn render_selected(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if let Some(file) = self.controller.file() {
                        ui.label(egui::RichText::new(file.name()).color(palette::MUTED));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Change Image").clicked() {
                            self.pick_file();
                        }
                    });
                });
                ui.vertical_centered(|ui| match (&self.preview_tex, &self.preview_error) {
                    (Some(tex), _) => {
                        ui.add(
                            egui::Image::new(tex)
                                .max_height(500.0)
                                .max_width(ui.available_width()),
                        );
                    }
                    (None, Some(err)) => {
                        ui.add_space(24.0);
                        ui.colored_label(palette::WARNING, format!("Preview unavailable: {err}"));
                        ui.add_space(24.0);
                    }
                    (None, None) => {
                        ui.add_space(40.0);
                        ui.add(egui::Spinner::new());
                        ui.add_space(40.0);
                    }
                });
            });
    }
}
