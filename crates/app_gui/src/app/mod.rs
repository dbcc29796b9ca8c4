//! The single analysis page: intake, analyze control, results.

mod intake;
mod results;
mod toasts;

use eframe::{App, Frame, egui};
use leaf_core::{
    AnalysisController, ImageFile, ImageSource, JobEvent, Jobs, PasteListeners, Predictor,
};
use std::sync::Arc;
use toasts::Toasts;

const APP_VERSION: &str = env!("LEAFSCAN_VERSION");

pub(crate) mod palette {
    use eframe::egui::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(46, 125, 50);
    pub const SUCCESS: Color32 = Color32::from_rgb(56, 142, 60);
    pub const WARNING: Color32 = Color32::from_rgb(245, 124, 0);
    pub const DESTRUCTIVE: Color32 = Color32::from_rgb(211, 47, 47);
    pub const MUTED: Color32 = Color32::from_gray(140);
}

pub struct UiApp {
    controller: AnalysisController,
    source: ImageSource,
    paste_listeners: PasteListeners,
    jobs: Jobs,
    toasts: Toasts,
    preview_tex: Option<egui::TextureHandle>,
    preview_error: Option<String>,
    simulated: bool,
}

impl UiApp {
    pub fn new(cc: &eframe::CreationContext<'_>, predictor: Arc<dyn Predictor>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let paste_listeners = PasteListeners::new();
        let simulated = predictor.is_simulated();
        Self {
            controller: AnalysisController::new(),
            source: ImageSource::new(&paste_listeners),
            paste_listeners,
            jobs: Jobs::new(predictor).with_waker(move || ctx.request_repaint()),
            toasts: Toasts::default(),
            preview_tex: None,
            preview_error: None,
            simulated,
        }
    }

    /// Entry point for every intake gesture.
    fn select_image(&mut self, file: ImageFile) {
        let ticket = self.controller.select_image(file.clone(), &mut self.toasts);
        self.preview_tex = None;
        self.preview_error = None;
        self.jobs.decode_preview(ticket, file);
    }

    fn start_analysis(&mut self) {
        if let Some(request) = self.controller.begin_analysis() {
            self.jobs.predict(request);
        }
    }

    fn drain_jobs(&mut self, ctx: &egui::Context) {
        while let Some(event) = self.jobs.try_next() {
            match event {
                JobEvent::Preview { ticket, result } => match result {
                    Ok(preview) => {
                        let color =
                            egui::ColorImage::from_rgba_unmultiplied(preview.size(), &preview.rgba);
                        if self.controller.attach_preview(ticket, preview) {
                            self.preview_tex = Some(ctx.load_texture(
                                "leaf-preview",
                                color,
                                egui::TextureOptions::LINEAR,
                            ));
                        }
                    }
                    Err(e) => {
                        if ticket == self.controller.ticket() {
                            tracing::warn!("preview failed: {e}");
                            self.preview_error = Some(e.to_string());
                        }
                    }
                },
                JobEvent::Prediction { ticket, result } => {
                    self.controller.finish_analysis(ticket, result, &mut self.toasts);
                }
            }
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🍃").size(28.0).color(palette::PRIMARY));
            ui.vertical(|ui| {
                ui.heading(egui::RichText::new("Banana Leaf Disease Detector").strong());
                ui.label(
                    egui::RichText::new("AI-powered disease detection using KNN model")
                        .small()
                        .color(palette::MUTED),
                );
            });
        });
    }

    fn render_banner(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(palette::PRIMARY.gamma_multiply(0.12))
            .stroke(egui::Stroke::new(1.0, palette::PRIMARY.gamma_multiply(0.4)))
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("How It Works").strong());
                ui.label(
                    "Upload a clear image of a banana leaf. Our K-Nearest Neighbors (KNN) machine \
                     learning model will analyze the leaf and detect potential diseases including \
                     Sigatoka, Panama Disease, Bunchy Top Virus, and Cordana Leaf Spot.",
                );
                if self.simulated {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(
                            "Note: Currently using mock predictions. Connect your Python backend \
                             to enable real-time analysis.",
                        )
                        .small()
                        .italics()
                        .color(palette::MUTED),
                    );
                }
            });
    }

    fn render_analyze_button(&mut self, ui: &mut egui::Ui) {
        if self.controller.file().is_none() {
            return;
        }
        ui.vertical_centered(|ui| {
            if self.controller.is_busy() {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.add_enabled(false, egui::Button::new("Analyzing Leaf..."));
                });
            } else {
                let button = egui::Button::new(egui::RichText::new("✨ Detect Disease").size(18.0))
                    .min_size(egui::vec2(200.0, 44.0));
                if ui
                    .add_enabled(self.controller.can_analyze(), button)
                    .clicked()
                {
                    self.start_analysis();
                }
            }
        });
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_jobs(ctx);
        self.handle_window_input(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_header(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Banana Leaf Disease Detection System • v{APP_VERSION}"
                    ))
                    .small()
                    .color(palette::MUTED),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_banner(ui);
                    ui.add_space(16.0);
                    self.render_intake(ui);
                    ui.add_space(16.0);
                    self.render_analyze_button(ui);
                    ui.add_space(16.0);
                    self.render_results(ui);
                });
        });

        self.toasts.show(ctx);
    }
}
