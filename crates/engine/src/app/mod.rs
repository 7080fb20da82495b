mod game;
mod hud;
mod input;
mod loop_runner;
mod rendering;
mod view;

pub use game::Game;
pub use input::{GameKey, KeyEvent, MoveDirection};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{stage_to_screen_px, Renderer, Viewport, STAGE_SPAN};
pub use view::{
    ControlLine, FrameView, HudView, ObjectiveLine, SpriteInstance, StagePlacement, StageView,
};
