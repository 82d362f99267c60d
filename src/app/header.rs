//! Header bar with scene and frame stats

use eframe::egui;

use super::BackdropApp;
use crate::core::BoundedPool;
use crate::theme::colors;
use crate::time::now_ms;

impl BackdropApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick();

        let scene = self.backdrop.scene();
        let entities = self.backdrop.entity_count();

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(scene.label())
                    .color(colors::NEON_GREEN)
                    .size(11.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_MUTED)
                        .monospace()
                        .size(11.0),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED).size(11.0));
                ui.label(
                    egui::RichText::new(format!("{entities} entities"))
                        .color(colors::TEXT_MUTED)
                        .monospace()
                        .size(11.0),
                );
            });
        });
    }
}

/// Frame rate over the last 60 frames
pub struct FpsCounter {
    frames: BoundedPool<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: BoundedPool::new(60),
        }
    }

    pub fn tick(&mut self) {
        self.frames.push(now_ms());
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed == 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
