//! Timed notifications in the bottom-right corner.

use super::palette;
use eframe::egui;
use leaf_core::{Notice, NoticeKind, Notifier};
use std::time::Instant;

const MAX_VISIBLE: usize = 4;

struct Toast {
    notice: Notice,
    expires_at: Instant,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, "toast");
        let expires_at = Instant::now() + notice.kind.display_duration();
        self.items.push(Toast { notice, expires_at });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
    }
}

impl Toasts {
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.items.retain(|t| t.expires_at > now);
        let Some(next_expiry) = self.items.iter().map(|t| t.expires_at).min() else {
            return;
        };
        ctx.request_repaint_after(next_expiry - now);

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (idx, toast) in self.items.iter().enumerate() {
                    let accent = match toast.notice.kind {
                        NoticeKind::Info => palette::PRIMARY,
                        NoticeKind::Success => palette::SUCCESS,
                        NoticeKind::Error => palette::DESTRUCTIVE,
                    };
                    let resp = egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(egui::RichText::new(&toast.notice.title).strong().color(accent));
                            ui.label(&toast.notice.description);
                        })
                        .response
                        .interact(egui::Sense::click());
                    if resp.clicked() {
                        dismissed = Some(idx);
                    }
                    ui.add_space(6.0);
                }
            });
        if let Some(idx) = dismissed {
            self.items.remove(idx);
        }
    }
}
