//! The host page: a named canvas and the element that holds it
use log::warn;
use sinewire_core::{Host, ViewerConfig};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, WebGl2RenderingContext};

use crate::webgl::WebGl;

/// Looks up the configured canvas and holder in the current document.
///
/// Only a `"webgl2"` context is requested: the bundled shaders are GLSL ES
/// 3.00, so a browser limited to WebGL1 gets the no-context message rather
/// than a partially working surface.
pub struct DomHost {
    document: Document,
    holder_id: String,
    canvas: Option<HtmlCanvasElement>,
}

impl DomHost {
    pub fn new(holder_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("missing document"))?;
        Ok(Self {
            document,
            holder_id: holder_id.to_string(),
            canvas: None,
        })
    }

    /// The canvas the context was acquired from, once acquisition succeeded
    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    fn find_context(
        &self,
        canvas_id: &str,
    ) -> Result<(HtmlCanvasElement, WebGl2RenderingContext), JsValue> {
        let canvas = self
            .document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("webgl2 context unavailable"))?
            .dyn_into::<WebGl2RenderingContext>()?;
        Ok((canvas, gl))
    }
}

impl Host for DomHost {
    type Gl = WebGl;

    fn acquire_context(&mut self, config: &ViewerConfig) -> Option<WebGl> {
        match self.find_context(&config.canvas_id) {
            Ok((canvas, gl)) => {
                self.canvas = Some(canvas);
                Some(WebGl::new(gl))
            }
            Err(e) => {
                warn!("context acquisition on `{}` failed: {e:?}", config.canvas_id);
                None
            }
        }
    }

    fn report(&mut self, message: &str) {
        let Some(holder) = self.document.get_element_by_id(&self.holder_id) else {
            warn!("holder `{}` not found; message was: {message}", self.holder_id);
            return;
        };
        let paragraph = match self.document.create_element("p") {
            Ok(paragraph) => paragraph,
            Err(e) => {
                warn!("could not create message element: {e:?}");
                return;
            }
        };
        paragraph.set_text_content(Some(message));
        holder.set_inner_html("");
        if let Err(e) = holder.append_child(&paragraph) {
            warn!("could not show message: {e:?}");
        }
    }
}
