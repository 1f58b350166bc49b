//! Sinewire Web - WebGL2 viewer for the sinusoidal surface
//!
//! Bootstraps the renderer on a named canvas, wires mouse dragging to the
//! trackball, and redraws on every rotation.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use sinewire_core::{bootstrap, report_failure, Renderer, Trackball, ViewerConfig};
use wasm_bindgen::prelude::*;

pub mod controls;
pub mod dom;
pub mod webgl;

use dom::DomHost;
use webgl::WebGl;

/// Renderer plus the camera state that drives it
pub struct ViewerState {
    renderer: Renderer<WebGl>,
    trackball: Trackball,
}

impl ViewerState {
    fn render(&self) {
        self.renderer.render(&self.trackball.view_matrix());
    }
}

/// Handle to a running viewer
#[wasm_bindgen]
pub struct SurfaceViewer {
    state: Rc<RefCell<ViewerState>>,
}

#[wasm_bindgen]
impl SurfaceViewer {
    /// Redraw with the current view
    pub fn render(&self) {
        self.state.borrow().render();
    }

    /// Return to the initial orientation and redraw
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&self) {
        let mut state = self.state.borrow_mut();
        state.trackball.reset();
        state.render();
    }
}

/// Start the viewer with the default configuration.
///
/// Initialization failures are shown in the page and yield `undefined`.
#[wasm_bindgen]
pub fn init() -> Result<Option<SurfaceViewer>, JsValue> {
    start_viewer(&ViewerConfig::default())
}

/// Start the viewer with a JSON configuration; omitted fields use defaults.
#[wasm_bindgen(js_name = initWithConfig)]
pub fn init_with_config(json: &str) -> Result<Option<SurfaceViewer>, JsValue> {
    let config = ViewerConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    start_viewer(&config)
}

fn start_viewer(config: &ViewerConfig) -> Result<Option<SurfaceViewer>, JsValue> {
    let mut host = DomHost::new(&config.holder_id)?;
    let renderer = match bootstrap(&mut host, config) {
        Ok(renderer) => renderer,
        // Already reported in the page
        Err(_) => return Ok(None),
    };
    let Some(canvas) = host.canvas().cloned() else {
        return Err(JsValue::from_str("canvas missing after bootstrap"));
    };

    let state = Rc::new(RefCell::new(ViewerState {
        renderer,
        trackball: Trackball::new(config.trackball.view_distance),
    }));
    if let Err(e) = controls::attach(&canvas, state.clone()) {
        // Reported in the page like the other start-up failures
        report_failure(&mut host, "attach mouse controls", &format!("{e:?}"));
        return Ok(None);
    }

    state.borrow().render();
    info!("sinewire viewer running");
    Ok(Some(SurfaceViewer { state }))
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}
