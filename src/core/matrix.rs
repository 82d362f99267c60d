//! Terminal-style glyph columns
//!
//! The viewport is split into fixed-width columns, each with a drop that
//! moves down one row per frame. Every frame a column prints one glyph at
//! its drop position; the last `trail_len` prints are kept so the host can
//! fade them out. Once a drop is below the bottom edge it restarts at the
//! top with a small probability per frame, which staggers the columns.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;
use tracing::debug;

use super::config::MatrixConfig;
use super::error::ConfigError;
use super::geometry::{Point, Viewport};
use super::palette::Rgb;
use super::pool::BoundedPool;

/// Upper bound on columns, whatever the viewport width
pub const MAX_COLUMNS: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
struct Print {
    y: f32,
    term: usize,
    /// Byte range into the term
    span: Range<usize>,
    color: Rgb,
    glow: bool,
}

#[derive(Clone, Debug)]
struct Column {
    /// Current row
    drop: u32,
    trail: BoundedPool<Print>,
}

impl Column {
    fn new(trail_len: usize) -> Self {
        Self {
            drop: 1,
            trail: BoundedPool::new(trail_len),
        }
    }
}

/// One glyph to paint this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixCell<'a> {
    pub position: Point,
    pub text: &'a str,
    pub color: Rgb,
    pub glow: bool,
    /// 1.0 for the newest print, approaching 0 for the oldest
    pub alpha: f32,
}

pub struct MatrixRain<R> {
    config: MatrixConfig,
    /// Non-empty terms only
    terms: Vec<String>,
    rng: R,
    columns: Vec<Column>,
    viewport: Viewport,
    active: bool,
}

impl<R: Rng> MatrixRain<R> {
    pub fn new(rng: R) -> Self {
        Self {
            config: MatrixConfig::default(),
            terms: Vec::new(),
            rng,
            columns: Vec::new(),
            viewport: Viewport::default(),
            active: false,
        }
    }

    pub fn start(&mut self, config: &MatrixConfig, viewport: Viewport) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config.clone();
        self.terms = config.terms.iter().filter(|t| !t.is_empty()).cloned().collect();
        self.columns.clear();
        self.viewport = viewport;
        self.fit_columns(viewport);
        self.active = true;
        debug!(columns = self.columns.len(), terms = self.terms.len(), "Matrix rain started");
        Ok(())
    }

    /// Column count for `viewport`; zero when it is degenerate.
    fn columns_for(&self, viewport: Viewport) -> usize {
        if viewport.is_degenerate() {
            0
        } else {
            let count = (viewport.width / self.config.column_width).floor() as usize;
            count.min(MAX_COLUMNS)
        }
    }

    fn fit_columns(&mut self, viewport: Viewport) {
        let count = self.columns_for(viewport);
        if count != self.columns.len() {
            debug!(from = self.columns.len(), to = count, "Matrix column count changed");
            let trail_len = self.config.trail_len;
            self.columns.resize_with(count, || Column::new(trail_len));
        }
    }

    /// Print one glyph per column and advance the drops. No-op while stopped.
    pub fn tick(&mut self, _timestamp_ms: f64, width: f32, height: f32) {
        if !self.active {
            return;
        }

        let viewport = Viewport::new(width, height);
        self.viewport = viewport;
        self.fit_columns(viewport);

        let row = self.config.column_width;
        for column in self.columns.iter_mut() {
            let term = self.rng.gen_range(0..self.terms.len());
            let text = &self.terms[term];

            let span = if self.rng.gen::<f32>() < self.config.phrase_chance {
                let end = text
                    .char_indices()
                    .nth(self.config.phrase_len)
                    .map_or(text.len(), |(i, _)| i);
                0..end
            } else {
                let nth = self.rng.gen_range(0..text.chars().count());
                text.char_indices()
                    .nth(nth)
                    .map_or(0..text.len(), |(i, c)| i..i + c.len_utf8())
            };

            let y = column.drop as f32 * row;
            column.trail.push(Print {
                y,
                term,
                span,
                color: self.config.palette.choose(&mut self.rng).copied().unwrap_or_default(),
                glow: self.rng.gen::<f32>() < self.config.glow_chance,
            });

            if y > height && self.rng.gen::<f32>() < self.config.reset_chance {
                column.drop = 0;
            }
            column.drop += 1;
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn stop(&mut self) {
        if self.active {
            debug!(columns = self.columns.len(), "Matrix rain stopped");
        }
        self.active = false;
        self.columns.clear();
    }

    /// Every kept print, column by column, oldest first within a column.
    pub fn cells(&self) -> impl Iterator<Item = MatrixCell<'_>> + '_ {
        let row = self.config.column_width;
        self.columns.iter().enumerate().flat_map(move |(i, column)| {
            let len = column.trail.len() as f32;
            column.trail.iter().enumerate().map(move |(k, print)| MatrixCell {
                position: Point::new(i as f32 * row, print.y),
                text: &self.terms[print.term][print.span.clone()],
                color: print.color,
                glow: print.glow,
                alpha: (k + 1) as f32 / len,
            })
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Current drop row per column
    pub fn drops(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.iter().map(|c| c.drop)
    }

    pub fn cell_count(&self) -> usize {
        self.columns.iter().map(|c| c.trail.len()).sum()
    }

    pub fn font_size(&self) -> f32 {
        self.config.column_width
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
