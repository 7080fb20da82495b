#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Stage coordinates run 0..=100 on both axes, origin top-left, y down.
pub const STAGE_SPAN: f32 = 100.0;

/// Maps a stage point onto the framebuffer. The stage stretches over the
/// whole viewport, so each axis scales independently.
pub fn stage_to_screen_px(stage_x: f32, stage_y: f32, viewport: Viewport) -> (i32, i32) {
    let x = stage_x / STAGE_SPAN * viewport.width as f32;
    let y = stage_y / STAGE_SPAN * viewport.height as f32;
    (x.round() as i32, y.round() as i32)
}
