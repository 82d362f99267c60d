//! Painting the active scene with the egui painter

use eframe::egui::{self, emath::Rot2, epaint::TextShape, Align2, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::core::{palette, Backdrop, SceneKind, GRID_SPACING};
use crate::theme::{color32, colors};

pub(super) fn paint(painter: &Painter, rect: Rect, backdrop: &Backdrop, now: f64) {
    let fade = backdrop.opacity(now);
    match backdrop.scene() {
        SceneKind::GlyphRain => paint_rain(painter, rect, backdrop, fade * 0.4),
        SceneKind::SalesChart => paint_chart(painter, rect, backdrop, fade * 0.3),
        SceneKind::Matrix => paint_matrix(painter, rect, backdrop, fade * 0.6),
    }
}

#[inline]
fn to_screen(rect: Rect, x: f32, y: f32) -> Pos2 {
    rect.min + egui::vec2(x, y)
}

fn paint_rain(painter: &Painter, rect: Rect, backdrop: &Backdrop, layer: f32) {
    backdrop.rain().for_each_entity(|p| {
        let color = color32(p.color, p.opacity * layer);
        let galley = painter.layout_no_wrap(p.glyph.to_string(), FontId::monospace(p.size), color);
        // TextShape rotates around its top-left corner; shift so the glyph spins in place
        let half = galley.size() / 2.0;
        let center = to_screen(rect, p.position.x, p.position.y);
        let pos = center - Rot2::from_angle(p.rotation) * half;

        painter.circle_filled(center, p.size * 0.6, color32(p.color, p.opacity * layer * 0.15));
        painter.add(TextShape::new(pos, galley, color).with_angle(p.rotation));
    });
}

fn paint_chart(painter: &Painter, rect: Rect, backdrop: &Backdrop, layer: f32) {
    let chart = backdrop.chart();
    let grid = Stroke::new(1.0, color32(palette::GRID, colors::GRID_ALPHA * layer));

    let phase = chart.grid_phase();
    let mut x = 0.0;
    while x < rect.width() {
        let sx = rect.min.x + x - phase;
        painter.line_segment([Pos2::new(sx, rect.min.y), Pos2::new(sx, rect.max.y)], grid);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < rect.height() {
        let sy = rect.min.y + y;
        painter.line_segment([Pos2::new(rect.min.x, sy), Pos2::new(rect.max.x, sy)], grid);
        y += GRID_SPACING;
    }

    let amplitude = chart.config().wobble_amplitude;
    chart.for_each_line(|line| {
        let points: Vec<Pos2> = line
            .wobbled(chart.time_ms(), amplitude)
            .map(|v| to_screen(rect, v.x, v.y))
            .collect();
        if points.len() < 2 {
            return;
        }
        // Wide faint pass first as the glow
        painter.add(Shape::line(
            points.clone(),
            Stroke::new(line.stroke_width * 4.0, color32(line.color, layer * 0.3)),
        ));
        painter.add(Shape::line(points, Stroke::new(line.stroke_width, color32(line.color, layer))));
    });

    for tag in chart.price_tags() {
        let c = to_screen(rect, tag.center.x, tag.center.y);
        let s = tag.scale;
        let outline = [(-30.0, -15.0), (30.0, -15.0), (30.0, 15.0), (-30.0, 15.0), (-40.0, 0.0)]
            .iter()
            .map(|&(dx, dy)| c + egui::vec2(dx * s, dy * s))
            .collect();
        painter.add(Shape::convex_polygon(
            outline,
            color32(palette::PRICE_TAG, 0.2),
            Stroke::new(2.0, color32(palette::PRICE_TAG, 1.0)),
        ));
        painter.text(
            c,
            Align2::CENTER_CENTER,
            tag.label,
            FontId::monospace(14.0 * s),
            color32(palette::PRICE_TAG, 1.0),
        );
    }
}

fn paint_matrix(painter: &Painter, rect: Rect, backdrop: &Backdrop, layer: f32) {
    let matrix = backdrop.matrix();
    let font = FontId::monospace(matrix.font_size());
    let small = FontId::monospace(matrix.font_size() - 2.0);

    for cell in matrix.cells() {
        let pos = to_screen(rect, cell.position.x, cell.position.y);
        if !rect.expand(matrix.font_size()).contains(pos) {
            continue;
        }
        let color = color32(cell.color, cell.alpha * layer);
        if cell.glow {
            painter.circle_filled(pos, matrix.font_size() * 0.7, color32(cell.color, cell.alpha * layer * 0.2));
        }
        let font = if cell.text.chars().nth(1).is_some() { small.clone() } else { font.clone() };
        painter.text(pos, Align2::LEFT_BOTTOM, cell.text, font, color);
    }
}
