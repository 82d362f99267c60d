//! Browser host for the backdrop
//!
//! eframe app that ticks the `Backdrop` once per frame with the panel size
//! and paints whatever the active engine holds.

mod canvas;
mod header;

use eframe::egui;
use tracing::info;

use crate::core::{Backdrop, BackdropConfig};
use crate::theme::{backdrop_visuals, colors};
use crate::time::now_ms;

pub use header::FpsCounter;

pub struct BackdropApp {
    pub(crate) backdrop: Backdrop,
    pub(crate) fps_counter: FpsCounter,
    /// Toggle header visibility
    pub(crate) show_header: bool,
}

impl BackdropApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: BackdropConfig) -> Result<Self, crate::core::ConfigError> {
        cc.egui_ctx.set_visuals(backdrop_visuals());
        let backdrop = Backdrop::new(config, None)?;
        info!(scenes = backdrop.config().cycle.scenes.len(), "Backdrop app created");
        Ok(Self {
            backdrop,
            fps_counter: FpsCounter::new(),
            show_header: true,
        })
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Animation runs every frame
        ctx.request_repaint();

        let now = now_ms();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                if self.show_header {
                    self.render_header(ui);
                    ui.add_space(4.0);
                }

                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let rect = response.rect;

                self.backdrop.tick(now, rect.width(), rect.height());
                canvas::paint(&painter, rect, &self.backdrop, now);

                if response.double_clicked() {
                    self.show_header = !self.show_header;
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.backdrop.stop();
    }
}
