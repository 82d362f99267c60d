//! Scrolling sales-chart lines
//!
//! Each line is a bounded list of vertices in screen space. Every frame the
//! vertices shift left, the ones far past the left edge are dropped, and new
//! vertices are appended on the right as soon as the rightmost one scrolls
//! into view. Vertex y values follow a random walk inside a horizontal band.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::ChartConfig;
use super::error::ConfigError;
use super::geometry::{Point, Viewport};
use super::palette::Rgb;
use super::pool::BoundedPool;
use super::spawn::sample;

/// Spacing of the scrolling background grid
pub const GRID_SPACING: f32 = 50.0;

/// Floating price tags: viewport fractions and label
const PRICE_TAGS: [(f32, f32, &str); 3] = [(0.2, 0.3, "$99"), (0.5, 0.6, "$249"), (0.8, 0.4, "$549")];

#[derive(Clone, Debug)]
pub struct ChartLine {
    vertices: BoundedPool<Point>,
    pub color: Rgb,
    pub stroke_width: f32,
}

impl ChartLine {
    /// Vertices left to right
    pub fn vertices(&self) -> impl Iterator<Item = &Point> + '_ {
        self.vertices.iter()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Display points with a slow vertical sway. Does not touch state.
    pub fn wobbled(&self, time_ms: f64, amplitude: f32) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().enumerate().map(move |(i, v)| {
            let phase = (time_ms + i as f64 * 100.0) * 0.001;
            Point::new(v.x, v.y + phase.sin() as f32 * amplitude)
        })
    }
}

/// A pulsing price label anchored to a fixed viewport fraction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceTag {
    pub center: Point,
    pub label: &'static str,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChartStats {
    pub appended: u64,
    pub dropped: u64,
    pub evicted: u64,
    /// Dropped for holding a NaN or infinite coordinate
    pub non_finite: u64,
}

pub struct ChartEngine<R> {
    config: ChartConfig,
    rng: R,
    lines: Vec<ChartLine>,
    viewport: Viewport,
    active: bool,
    time_ms: f64,
    /// Grid scroll phase in `[0, GRID_SPACING)`
    grid_phase: f32,
    stats: ChartStats,
    degenerate: bool,
    saw_non_finite: bool,
}

impl<R: Rng> ChartEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            config: ChartConfig::default(),
            rng,
            lines: Vec::new(),
            viewport: Viewport::default(),
            active: false,
            time_ms: 0.0,
            grid_phase: 0.0,
            stats: ChartStats::default(),
            degenerate: false,
            saw_non_finite: false,
        }
    }

    /// Validate `config` and seed `line_count` lines spanning the viewport.
    pub fn start(&mut self, config: &ChartConfig, viewport: Viewport) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config.clone();
        self.viewport = viewport;
        self.time_ms = 0.0;
        self.grid_phase = 0.0;
        self.stats = ChartStats::default();
        self.degenerate = viewport.is_degenerate();
        self.saw_non_finite = false;

        let segments = config.segments;
        let segment_width = segment_width(viewport, segments);
        let (center, spread) = (config.band_center, config.band_spread);
        let height = viewport.height.max(0.0);

        self.lines = (0..config.line_count)
            .map(|i| {
                let mut vertices = BoundedPool::new(config.max_vertices);
                for j in 0..=segments {
                    let y = height * center + (self.rng.gen::<f32>() - 0.5) * height * spread;
                    vertices.push(Point::new(j as f32 * segment_width, y));
                }
                ChartLine {
                    vertices,
                    color: config.palette[i % config.palette.len()],
                    stroke_width: sample(&mut self.rng, config.stroke_width),
                }
            })
            .collect();
        self.active = true;

        debug!(
            lines = self.lines.len(),
            segments,
            max_vertices = config.max_vertices,
            "Chart engine started"
        );
        Ok(())
    }

    /// Scroll one frame. No-op while stopped.
    pub fn tick(&mut self, timestamp_ms: f64, width: f32, height: f32) {
        if !self.active {
            return;
        }

        let viewport = Viewport::new(width, height);
        self.viewport = viewport;
        self.time_ms = timestamp_ms;

        let speed = self.config.scroll_speed;
        self.grid_phase = (self.grid_phase + speed) % GRID_SPACING;

        let degenerate = viewport.is_degenerate();
        if degenerate && !self.degenerate {
            warn!(width, height, "Degenerate viewport, chart lines only scroll");
        }
        self.degenerate = degenerate;

        let drop_margin = self.config.drop_margin;
        let segment_width = segment_width(viewport, self.config.segments);
        let (mut appended, mut dropped, mut evicted) = (0usize, 0usize, 0usize);
        let mut non_finite = 0usize;

        for line in self.lines.iter_mut() {
            for v in line.vertices.iter_mut() {
                v.x -= speed;
            }

            let bad = line.vertices.retain(|v| v.is_finite());
            non_finite += bad;
            dropped += bad;
            if degenerate {
                continue;
            }
            dropped += line.vertices.retain(|v| v.x >= -drop_margin);

            // Never add more than one pool's worth per frame
            for _ in 0..self.config.max_vertices {
                let (x, from) = match line.vertices.back() {
                    Some(last) if last.x > width => break,
                    Some(last) => (last.x + segment_width, last.y),
                    None => (0.0, f32::NAN),
                };
                let y = random_walk(&mut self.rng, &self.config, from, height);
                evicted += line.vertices.push(Point::new(x, y));
                appended += 1;
            }
        }

        self.stats.appended += appended as u64;
        self.stats.dropped += dropped as u64;
        self.stats.evicted += evicted as u64;
        self.stats.non_finite += non_finite as u64;
        if non_finite > 0 && !self.saw_non_finite {
            warn!(count = non_finite, "Dropped chart vertices with non-finite coordinates");
        }
        self.saw_non_finite = non_finite > 0;
        trace!(timestamp_ms, appended, dropped, evicted, "chart tick");
    }

    /// Record a new surface size; lines adapt on the next `tick`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn stop(&mut self) {
        if self.active {
            debug!(vertices = self.vertex_count(), "Chart engine stopped");
        }
        self.active = false;
        self.lines.clear();
        self.time_ms = 0.0;
        self.grid_phase = 0.0;
        self.stats = ChartStats::default();
    }

    pub fn lines(&self) -> &[ChartLine] {
        &self.lines
    }

    pub fn for_each_line<F>(&self, mut draw: F)
    where
        F: FnMut(&ChartLine),
    {
        for line in &self.lines {
            draw(line);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(ChartLine::len).sum()
    }

    pub fn price_tags(&self) -> impl Iterator<Item = PriceTag> + '_ {
        let bob = (self.time_ms * 0.002).sin() as f32 * 10.0;
        let scale = (self.time_ms * 0.003).sin() as f32 * 0.2 + 0.8;
        let vp = self.viewport;
        PRICE_TAGS.iter().map(move |&(fx, fy, label)| PriceTag {
            center: Point::new(vp.width * fx, vp.height * fy + bob),
            label,
            scale,
        })
    }

    pub fn grid_phase(&self) -> f32 {
        self.grid_phase
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn stats(&self) -> ChartStats {
        self.stats
    }
}

fn segment_width(viewport: Viewport, segments: usize) -> f32 {
    if viewport.is_degenerate() || segments == 0 {
        0.0
    } else {
        viewport.width / segments as f32
    }
}

/// Next y after `from`, kept inside the configured band. A non-finite
/// `from` restarts at the band center.
fn random_walk<R: Rng>(rng: &mut R, config: &ChartConfig, from: f32, height: f32) -> f32 {
    let center = height * config.band_center;
    if !from.is_finite() {
        return center;
    }
    let half = (height * config.band_spread / 2.0).abs();
    let step = (rng.gen::<f32>() - 0.5) * 2.0 * config.walk_step * height;
    (from + step).max(center - half).min(center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> ChartEngine<StdRng> {
        ChartEngine::new(StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_start_seeds_full_width_lines() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(1000.0, 500.0)).unwrap();

        assert_eq!(chart.lines().len(), 5);
        for line in chart.lines() {
            let xs: Vec<f32> = line.vertices().map(|v| v.x).collect();
            assert_eq!(xs.len(), 11);
            assert_eq!(xs[0], 0.0);
            assert_eq!(xs[10], 1000.0);
            // 250 ± 75
            assert!(line.vertices().all(|v| (175.0..=325.0).contains(&v.y)));
            assert!((1.0..3.0).contains(&line.stroke_width));
        }
        assert_eq!(chart.lines()[2].color, crate::core::palette::CHART_COLORS[2]);
    }

    #[test]
    fn test_tick_scrolls_and_extends() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(1000.0, 500.0)).unwrap();
        chart.tick(16.0, 1000.0, 500.0);

        let line = &chart.lines()[0];
        let xs: Vec<f32> = line.vertices().map(|v| v.x).collect();
        assert_eq!(xs[0], -0.5);
        // Rightmost was at 999.5, in view, so one vertex was appended past it
        assert_eq!(xs.len(), 12);
        assert_eq!(*xs.last().unwrap(), 1099.5);
        assert!(line.vertices().all(|v| (175.0..=325.0).contains(&v.y)));
    }

    #[test]
    fn test_vertices_dropped_past_left_margin() {
        let mut chart = engine();
        let config = ChartConfig { scroll_speed: 10.0, ..Default::default() };
        chart.start(&config, Viewport::new(500.0, 300.0)).unwrap();

        for frame in 0..400 {
            chart.tick(frame as f64 * 16.0, 500.0, 300.0);
            for line in chart.lines() {
                assert!(line.vertices().all(|v| v.x >= -100.0));
                assert!(line.vertices().last().is_some_and(|v| v.x > 500.0));
            }
        }
        assert!(chart.stats().dropped > 0);
    }

    #[test]
    fn test_narrow_viewport_stays_bounded() {
        let mut chart = engine();
        let config = ChartConfig { max_vertices: 16, ..Default::default() };
        chart.start(&config, Viewport::new(10.0, 300.0)).unwrap();

        for frame in 0..1000 {
            chart.tick(frame as f64, 10.0, 300.0);
            assert!(chart.lines().iter().all(|l| l.len() <= 16));
        }
        assert!(chart.stats().evicted > 0);

        // Oldest (leftmost) vertices went first
        let xs: Vec<f32> = chart.lines()[0].vertices().map(|v| v.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_viewport_only_shifts() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(800.0, 600.0)).unwrap();
        let before = chart.vertex_count();

        for frame in 0..1000 {
            chart.tick(frame as f64, 0.0, 0.0);
        }
        assert_eq!(chart.vertex_count(), before);
        assert_eq!(chart.lines()[0].vertices().next().map(|v| v.x), Some(-500.0));
    }

    #[test]
    fn test_non_finite_vertices_dropped() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(1000.0, 500.0)).unwrap();
        chart.lines[0].vertices.push(Point::new(f32::NAN, 10.0));
        chart.lines[1].vertices.push(Point::new(500.0, f32::INFINITY));

        chart.tick(1.0, 1000.0, 500.0);
        assert_eq!(chart.stats().non_finite, 2);
        for line in chart.lines() {
            assert!(line.vertices().all(|v| v.is_finite()));
        }

        chart.lines[0].vertices.push(Point::new(f32::NAN, 0.0));
        chart.tick(2.0, 0.0, 0.0);
        assert_eq!(chart.stats().non_finite, 3);
    }

    #[test]
    fn test_widening_fills_new_space() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(400.0, 300.0)).unwrap();
        chart.tick(1.0, 1200.0, 300.0);

        for line in chart.lines() {
            assert!(line.vertices().last().is_some_and(|v| v.x > 1200.0));
        }
    }

    #[test]
    fn test_stop_clears_and_ignores_ticks() {
        let mut chart = engine();
        chart.stop();
        chart.start(&ChartConfig::default(), Viewport::new(400.0, 300.0)).unwrap();
        chart.stop();
        chart.stop();
        chart.tick(5.0, 400.0, 300.0);

        assert!(!chart.is_active());
        assert_eq!(chart.vertex_count(), 0);
        assert_eq!(chart.stats(), ChartStats::default());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut chart = engine();
        let config = ChartConfig { scroll_speed: 0.0, ..Default::default() };
        assert!(matches!(
            chart.start(&config, Viewport::new(10.0, 10.0)),
            Err(ConfigError::InvalidScrollSpeed(_))
        ));
        assert!(!chart.is_active());
    }

    #[test]
    fn test_wobble_and_price_tags() {
        let mut chart = engine();
        chart.start(&ChartConfig::default(), Viewport::new(1000.0, 500.0)).unwrap();

        let line = &chart.lines()[0];
        let raw: Vec<Point> = line.vertices().copied().collect();
        let swayed: Vec<Point> = line.wobbled(0.0, 20.0).collect();
        assert_eq!(swayed[0], raw[0]);
        assert!((swayed[1].y - raw[1].y - (0.1f64.sin() as f32 * 20.0)).abs() < 1e-3);

        let tags: Vec<PriceTag> = chart.price_tags().collect();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[1].label, "$249");
        assert!((tags[1].center.x - 500.0).abs() < 1e-3);
        assert!((tags[1].center.y - 300.0).abs() < 1e-3);
        assert!((tags[0].scale - 0.8).abs() < 1e-6);
    }
}
