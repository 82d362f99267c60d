//! Headless CLI that drives the backdrop engines at display rate
//!
//! Run with: cargo run --features cli --bin backdrop-cli
//!
//! Environment:
//! - `BACKDROP_CONFIG`: path to a JSON config (defaults otherwise)
//! - `BACKDROP_SECONDS`: run length, default 10
//! - `BACKDROP_SEED`: RNG seed for reproducible runs
//! - `BACKDROP_VIEWPORT`: `WIDTHxHEIGHT`, default 1280x720

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use backdrop_fx::core::{Backdrop, BackdropConfig};
    use backdrop_fx::time::now_ms;
    use std::time::Duration;
    use tokio::time::{interval, MissedTickBehavior};
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,backdrop_fx=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("BACKDROP_CONFIG") {
        Ok(path) => BackdropConfig::load(&path)?,
        Err(_) => BackdropConfig::default(),
    };
    let seconds = match std::env::var("BACKDROP_SECONDS") {
        Ok(s) => s.parse::<f64>().unwrap_or_else(|e| {
            warn!(value = %s, error = %e, "Invalid BACKDROP_SECONDS, using 10");
            10.0
        }),
        Err(_) => 10.0,
    };
    let seed = std::env::var("BACKDROP_SEED").ok().and_then(|s| s.parse::<u64>().ok());
    let (width, height) = std::env::var("BACKDROP_VIEWPORT")
        .ok()
        .and_then(|s| parse_viewport(&s))
        .unwrap_or((1280.0, 720.0));

    let mut backdrop = Backdrop::new(config, seed)?;
    info!(width, height, seconds, ?seed, "Running backdrop");

    let mut frames = interval(Duration::from_micros(16_667));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_interval = interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let start = now_ms();
    let mut frame_count = 0u64;
    let mut frames_last_interval = 0u64;

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let now = now_ms() - start;
                if now >= seconds * 1000.0 {
                    break;
                }
                backdrop.tick(now, width, height);
                frame_count += 1;
                frames_last_interval += 1;
            }
            _ = stats_interval.tick() => {
                let stats = backdrop.stats();
                info!(
                    scene = stats.scene.label(),
                    entities = stats.entities,
                    fps = frames_last_interval,
                    spawned = stats.rain.spawned,
                    culled = stats.rain.culled,
                    evicted = stats.rain.evicted,
                    "stats"
                );
                frames_last_interval = 0;
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }

    info!(frames = frame_count, "Done");
    println!("{}", serde_json::to_string_pretty(&backdrop.stats())?);
    backdrop.stop();
    Ok(())
}

/// Parse `WIDTHxHEIGHT`
#[cfg(not(target_arch = "wasm32"))]
fn parse_viewport(s: &str) -> Option<(f32, f32)> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let w: f32 = w.trim().parse().ok()?;
    let h: f32 = h.trim().parse().ok()?;
    (w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0).then_some((w, h))
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x720"), Some((1280.0, 720.0)));
        assert_eq!(parse_viewport(" 640 X 480 "), Some((640.0, 480.0)));
        assert_eq!(parse_viewport("0x0"), Some((0.0, 0.0)));
        assert_eq!(parse_viewport("1280"), None);
        assert_eq!(parse_viewport("-1x10"), None);
        assert_eq!(parse_viewport("axb"), None);
    }
}
