mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{stage_to_screen_px, Viewport, STAGE_SPAN};
