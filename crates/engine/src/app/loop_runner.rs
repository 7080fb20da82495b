use std::sync::Arc;

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::audio::build_cue_player;
use crate::{resolve_app_paths, StartupError};

use super::game::Game;
use super::input::{is_quit_key, translate_key_event};
use super::view::FrameView;
use super::Renderer;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub disable_audio: bool,
    pub preload_cues: Vec<String>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Backyard".to_string(),
            window_width: 960,
            window_height: 720,
            disable_audio: false,
            preload_cues: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, mut game: Box<dyn Game>) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        base_assets_dir = %app_paths.base_assets_dir.display(),
        "startup"
    );

    let mut cue_player = build_cue_player(
        app_paths.base_assets_dir.join("audio"),
        config.disable_audio,
        &config.preload_cues,
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let window_for_loop = Arc::clone(&window);
    let asset_root = app_paths.root.join("assets");
    let mut renderer = Renderer::new(window, asset_root).map_err(AppError::CreateRenderer)?;

    // Nothing advances without input, so the loop sleeps between events.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                        window_for_loop.request_redraw();
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                        window_for_loop.request_redraw();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if is_quit_key(event.physical_key)
                            && event.state == ElementState::Pressed
                        {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                            return;
                        }
                        // OS key repeat is forwarded as further presses.
                        let Some(key_event) =
                            translate_key_event(event.physical_key, event.state)
                        else {
                            return;
                        };
                        let cues = game.on_key(&key_event);
                        for cue in &cues {
                            cue_player.play(cue);
                        }
                        window_for_loop.request_redraw();
                    }
                    WindowEvent::RedrawRequested => {
                        let view = game.frame_view();
                        if let Err(error) = renderer.render(&view) {
                            warn!(error = %error, "renderer_draw_failed");
                            window_target.exit();
                        }
                        let next_title = stage_window_title(&config.window_title, &view);
                        if next_title != last_applied_title {
                            match &next_title {
                                Some(title) => window_for_loop.set_title(title),
                                None => window_for_loop.set_title(&config.window_title),
                            }
                            last_applied_title = next_title;
                        }
                    }
                    _ => {}
                }
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn stage_window_title(base_title: &str, view: &FrameView) -> Option<String> {
    match view {
        FrameView::Stage(stage) => Some(format!("{base_title} - {}", stage.scene_name)),
        FrameView::MissingScene { .. } => None,
    }
}
