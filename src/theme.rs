//! Dark neon theme and colour conversion for the egui host

use egui::Color32;

use crate::core::Rgb;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(5, 5, 12);          // #05050C - darker-bg
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(14, 14, 28);      // #0E0E1C - dark-bg

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 253, 245);   // #ECFDF5
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 110, 100);     // #5A6E64

    // === Accents ===
    pub const NEON_GREEN: Color32 = Color32::from_rgb(16, 185, 129);      // #10B981

    /// Grid line alpha (10%)
    pub const GRID_ALPHA: f32 = 0.1;
}

/// Convert a palette colour, scaling alpha by `opacity` in `[0, 1]`.
pub fn color32(rgb: Rgb, opacity: f32) -> Color32 {
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, a)
}

/// Dark visuals so the backdrop shows through
pub fn backdrop_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.hyperlink_color = NEON_GREEN;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
