use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use pixels::{Error, Pixels, SurfaceTexture};
use tracing::warn;
use winit::window::Window;

use crate::app::hud::{draw_hud_panels, draw_missing_scene_notice};
use crate::app::view::{FrameView, StagePlacement, StageView};
use crate::asset_keys::validate_asset_key;

use super::transform::{stage_to_screen_px, Viewport};

const CLEAR_COLOR: [u8; 4] = [20, 22, 28, 255];
const MISSING_SPRITE_FILL: [u8; 4] = [120, 84, 132, 255];

struct LoadedSprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenRectPx {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    asset_root: PathBuf,
    sprite_cache: HashMap<String, Option<LoadedSprite>>,
    warned_missing_sprite_keys: HashSet<String>,
}

impl Renderer {
    pub fn new(window: Arc<Window>, asset_root: PathBuf) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            asset_root,
            sprite_cache: HashMap::new(),
            warned_missing_sprite_keys: HashSet::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, view: &FrameView) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let viewport = self.viewport;
        let asset_root = self.asset_root.as_path();
        let sprite_cache = &mut self.sprite_cache;
        let warned_missing_sprite_keys = &mut self.warned_missing_sprite_keys;
        let frame = self.pixels.frame_mut();

        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }

        match view {
            FrameView::Stage(stage) => draw_stage(
                frame,
                viewport,
                stage,
                sprite_cache,
                warned_missing_sprite_keys,
                asset_root,
            ),
            FrameView::MissingScene { scene_id } => {
                draw_missing_scene_notice(frame, viewport.width, viewport.height, scene_id);
            }
        }

        self.pixels.render()
    }
}

fn draw_stage(
    frame: &mut [u8],
    viewport: Viewport,
    stage: &StageView,
    sprite_cache: &mut HashMap<String, Option<LoadedSprite>>,
    warned_missing_sprite_keys: &mut HashSet<String>,
    asset_root: &Path,
) {
    let full_frame = ScreenRectPx {
        left: 0,
        top: 0,
        right: viewport.width as i32,
        bottom: viewport.height as i32,
    };
    // Missing backdrop falls through to the clear color.
    if let Some(backdrop) = resolve_cached_sprite(
        sprite_cache,
        warned_missing_sprite_keys,
        asset_root,
        &stage.backdrop_key,
    ) {
        draw_sprite_into_rect(frame, viewport.width, viewport.height, full_frame, backdrop);
    }

    for instance in &stage.sprites {
        let rect = placement_rect_px(instance.placement, viewport);
        match resolve_cached_sprite(
            sprite_cache,
            warned_missing_sprite_keys,
            asset_root,
            &instance.sprite_key,
        ) {
            Some(sprite) => {
                draw_sprite_into_rect(frame, viewport.width, viewport.height, rect, sprite)
            }
            None => fill_rect_clipped(
                frame,
                viewport.width,
                viewport.height,
                rect,
                MISSING_SPRITE_FILL,
            ),
        }
    }

    draw_hud_panels(frame, viewport.width, viewport.height, &stage.hud);
}

fn placement_rect_px(placement: StagePlacement, viewport: Viewport) -> ScreenRectPx {
    let (left, top) = stage_to_screen_px(placement.x, placement.y, viewport);
    let (right, bottom) = stage_to_screen_px(
        placement.x + placement.width,
        placement.y + placement.height,
        viewport,
    );
    ScreenRectPx {
        left,
        top,
        right,
        bottom,
    }
}

fn resolve_cached_sprite<'a>(
    cache: &'a mut HashMap<String, Option<LoadedSprite>>,
    warned_missing_sprite_keys: &mut HashSet<String>,
    asset_root: &Path,
    key: &str,
) -> Option<&'a LoadedSprite> {
    if !cache.contains_key(key) {
        let sprite = match resolve_sprite_image_path(asset_root, key) {
            Ok(path) => match load_sprite_rgba(&path) {
                Ok(sprite) => Some(sprite),
                Err(reason) => {
                    warn_sprite_load_once(
                        warned_missing_sprite_keys,
                        key,
                        Some(path.as_path()),
                        reason.as_str(),
                    );
                    None
                }
            },
            Err(reason) => {
                warn_sprite_load_once(warned_missing_sprite_keys, key, None, reason.as_str());
                None
            }
        };
        cache.insert(key.to_string(), sprite);
    }
    cache.get(key).and_then(Option::as_ref)
}

fn resolve_sprite_image_path(asset_root: &Path, key: &str) -> Result<PathBuf, String> {
    validate_asset_key(key).map_err(|error| format!("invalid_key:{error}"))?;
    Ok(asset_root
        .join("base")
        .join("sprites")
        .join(format!("{key}.png")))
}

fn load_sprite_rgba(path: &Path) -> Result<LoadedSprite, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn warn_sprite_load_once(
    warned_keys: &mut HashSet<String>,
    key: &str,
    resolved_path: Option<&Path>,
    reason: &str,
) {
    if !warned_keys.insert(key.to_string()) {
        return;
    }
    let path_display = resolved_path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unresolved>".to_string());
    warn!(
        sprite_key = key,
        path = %path_display,
        reason = reason,
        "renderer_sprite_load_failed_using_fallback"
    );
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

fn fill_rect_clipped(frame: &mut [u8], width: u32, height: u32, rect: ScreenRectPx, color: [u8; 4]) {
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right.min(width as i32);
    let bottom = rect.bottom.min(height as i32);
    for y in top..bottom {
        for x in left..right {
            write_pixel_rgba_clipped(frame, width as usize, x, y, color);
        }
    }
}

/// Stretches the sprite over the rect with nearest sampling. Fully
/// transparent source pixels are skipped so sprites keep their cutout shape.
fn draw_sprite_into_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: ScreenRectPx,
    sprite: &LoadedSprite,
) {
    if sprite.width == 0 || sprite.height == 0 || width == 0 || height == 0 {
        return;
    }
    let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
    if sprite.rgba.len() < expected_rgba_len {
        return;
    }
    let rect_w = rect.right - rect.left;
    let rect_h = rect.bottom - rect.top;
    if rect_w <= 0 || rect_h <= 0 {
        return;
    }

    let draw_left = rect.left.max(0);
    let draw_top = rect.top.max(0);
    let draw_right = rect.right.min(width as i32);
    let draw_bottom = rect.bottom.min(height as i32);
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let frame_width = width as usize;
    let sprite_width = sprite.width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = (out_y - rect.top) as f32;
        let src_y = (dy * sprite.height as f32 / rect_h as f32).floor() as u32;
        let src_y = src_y.min(sprite.height - 1) as usize;
        let src_row_offset = src_y * sprite_width * 4;
        let dst_row_offset = out_y as usize * frame_width * 4;

        for out_x in draw_left..draw_right {
            let dx = (out_x - rect.left) as f32;
            let src_x = (dx * sprite.width as f32 / rect_w as f32).floor() as u32;
            let src_x = src_x.min(sprite.width - 1) as usize;
            let src_offset = src_row_offset + src_x * 4;
            let alpha = sprite.rgba[src_offset + 3];
            if alpha == 0 {
                continue;
            }
            let dst_offset = dst_row_offset + out_x as usize * 4;
            frame[dst_offset] = sprite.rgba[src_offset];
            frame[dst_offset + 1] = sprite.rgba[src_offset + 1];
            frame[dst_offset + 2] = sprite.rgba[src_offset + 2];
            frame[dst_offset + 3] = alpha;
        }
    }
}
