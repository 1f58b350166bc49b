//! Viewer start-up against a host page
use std::fmt;

use log::{error, info, warn};

use crate::config::ViewerConfig;
use crate::error::RenderError;
use crate::gpu::GlContext;
use crate::renderer::Renderer;

pub const NO_CONTEXT_MESSAGE: &str = "Sorry, could not get a WebGL graphics context.";

/// The page the viewer is embedded in.
pub trait Host {
    type Gl: GlContext;

    /// Request a graphics context from the configured drawing surface
    fn acquire_context(&mut self, config: &ViewerConfig) -> Option<Self::Gl>;

    /// Replace the drawing area with a user-visible message
    fn report(&mut self, message: &str);
}

/// Acquire a context and build the renderer.
///
/// Every failure is reported to the host before being returned; callers only
/// need to stop, not to surface the error again.
pub fn bootstrap<H: Host>(
    host: &mut H,
    config: &ViewerConfig,
) -> Result<Renderer<H::Gl>, RenderError> {
    let Some(gl) = host.acquire_context(config) else {
        warn!("no graphics context on `{}`", config.canvas_id);
        host.report(NO_CONTEXT_MESSAGE);
        return Err(RenderError::ContextUnavailable);
    };

    match Renderer::initialize(gl, config) {
        Ok(renderer) => {
            info!("viewer initialized on `{}`", config.canvas_id);
            Ok(renderer)
        }
        Err(e) => {
            report_failure(host, "initialize the WebGL graphics context", &e);
            Err(e)
        }
    }
}

/// Log a start-up failure and show it in place of the drawing area
pub fn report_failure<H: Host>(host: &mut H, action: &str, detail: &dyn fmt::Display) {
    error!("could not {action}: {detail}");
    host.report(&format!("Sorry, could not {action}: {detail}"));
}
