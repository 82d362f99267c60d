//! Backdrop FX - frame-driven decorative backgrounds
//!
//! Platform-agnostic engines live in [`core`]: a bounded particle engine
//! (falling currency glyphs), scrolling chart lines and terminal glyph
//! columns, rotated by a scene cycle. The host supplies timestamps and the
//! surface size each frame and paints what the engines hold.
//!
//! With the `wasm` feature on `wasm32` the crate also ships an eframe app
//! that paints the backdrop into the `#canvas` element.

pub mod core;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod app;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod theme;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::BackdropApp;
    use crate::core::BackdropConfig;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async {
            let canvas = web_sys::window()
                .expect("no window")
                .document()
                .expect("no document")
                .get_element_by_id("canvas")
                .expect("no canvas element")
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .expect("not a canvas element");

            eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| {
                        let app = BackdropApp::new(cc, BackdropConfig::default())?;
                        Ok(Box::new(app))
                    }),
                )
                .await
                .expect("Failed to start eframe");
        });
    }
}
