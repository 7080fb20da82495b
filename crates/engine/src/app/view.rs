/// Placement of a sprite on the stage, in percent-of-viewport units
/// (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    pub sprite_key: String,
    pub placement: StagePlacement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveLine {
    pub label: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlLine {
    pub key: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub objectives: Vec<ObjectiveLine>,
    pub controls: Vec<ControlLine>,
    pub pressed_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub scene_name: String,
    pub backdrop_key: String,
    pub sprites: Vec<SpriteInstance>,
    pub hud: HudView,
}

/// What the game asks the engine to draw. A frame is either a stage or a
/// full-screen notice for a scene id with no definition.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameView {
    Stage(StageView),
    MissingScene { scene_id: String },
}
