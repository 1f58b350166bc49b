//! Mouse input wired to the trackball
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::ViewerState;

/// Canvas-relative pointer position and the canvas' displayed size
fn pointer(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32, f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Press on the canvas starts a drag; moves anywhere on the page rotate
/// and redraw; release anywhere ends it.
pub fn attach(canvas: &HtmlCanvasElement, state: Rc<RefCell<ViewerState>>) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("missing document"))?;

    let mousedown = {
        let canvas = canvas.clone();
        let state = state.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let (x, y, width, height) = pointer(&canvas, &event);
            state.borrow_mut().trackball.begin_drag(x, y, width, height);
        }) as Box<dyn FnMut(_)>)
    };
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    let mousemove = {
        let canvas = canvas.clone();
        let state = state.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let mut state = state.borrow_mut();
            if !state.trackball.is_dragging() {
                return;
            }
            let (x, y, width, height) = pointer(&canvas, &event);
            if state.trackball.drag_to(x, y, width, height) {
                state.render();
            }
        }) as Box<dyn FnMut(_)>)
    };
    document.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
    mousemove.forget();

    let mouseup = Closure::wrap(Box::new(move |_event: MouseEvent| {
        state.borrow_mut().trackball.end_drag();
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
    mouseup.forget();

    Ok(())
}
