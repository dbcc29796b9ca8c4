#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod clipboard;

use anyhow::Context;
use directories_next::ProjectDirs;
use eframe::{NativeOptions, egui};
use leaf_core::config::{self, CONFIG_FILE};
use leaf_core::{MockPredictor, Predictor};
use std::path::PathBuf;
use std::sync::Arc;

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "LeafScan", "LeafScan").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn build_predictor() -> Arc<dyn Predictor> {
    let path = config_path();
    let cfg = config::load_or_default(path.as_deref());
    match cfg
        .predictor
        .build()
        .with_context(|| format!("predictor {:?} unavailable", cfg.predictor.kind))
    {
        Ok(predictor) => {
            tracing::info!(kind = ?cfg.predictor.kind, "prediction backend ready");
            predictor
        }
        Err(e) => {
            tracing::warn!("{e:#}; falling back to mock predictions");
            Arc::new(MockPredictor::default())
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let predictor = build_predictor();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 860.0])
            .with_drag_and_drop(true)
            .with_title("Banana Leaf Disease Detector"),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native(
        "LeafScan",
        options,
        Box::new(move |cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(app::UiApp::new(
                cc, predictor,
            )))
        }),
    ) {
        tracing::error!("application stopped with error: {e}");
        eprintln!("Application stopped with error: {e}");
    }
}
