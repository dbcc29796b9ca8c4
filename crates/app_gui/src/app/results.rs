use super::{UiApp, palette};
use eframe::egui;
use leaf_core::{Icon, SeverityTier, Verdict};

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::CheckCircle => "✔",
        Icon::AlertCircle => "⚠",
    }
}

fn tier_color(tier: SeverityTier) -> egui::Color32 {
    match tier {
        SeverityTier::None => palette::SUCCESS,
        SeverityTier::Moderate => palette::WARNING,
        SeverityTier::Severe => palette::DESTRUCTIVE,
    }
}

impl UiApp {
    pub(super) fn render_results(&self, ui: &mut egui::Ui) {
        // Nothing to show until a prediction has landed.
        let Some(verdict) = self.controller.verdict() else {
            return;
        };
        render_verdict(ui, &verdict);
    }
}

fn render_verdict(ui: &mut egui::Ui, verdict: &Verdict) {
    let accent = tier_color(verdict.severity);
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, palette::PRIMARY.gamma_multiply(0.3)))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(20))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(
                    egui::RichText::new(icon_glyph(verdict.icon))
                        .size(32.0)
                        .color(accent),
                );
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(verdict.title).size(22.0).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(verdict.confidence_text()).color(palette::MUTED),
                            );
                        });
                    });
                    ui.add_space(4.0);
                    ui.label(verdict.description);
                    ui.add_space(10.0);

                    egui::Frame::new()
                        .fill(ui.visuals().faint_bg_color)
                        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                        .corner_radius(egui::CornerRadius::same(8))
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(egui::RichText::new("ℹ Recommended Action:").strong());
                            ui.label(egui::RichText::new(verdict.action).color(accent));
                        });

                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(format!("🍃 {}", verdict.caption))
                            .small()
                            .color(palette::MUTED),
                    );
                });
            });
        });
}
