use super::input::KeyEvent;
use super::view::FrameView;

/// Implemented by the game crate. The loop owns the window, renderer and
/// audio player; the game owns all state and is called back one event at a
/// time, so a key event is always processed to completion before the next.
pub trait Game {
    /// Handles one translated key event. Returned cue names are played in
    /// order, fire-and-forget.
    fn on_key(&mut self, event: &KeyEvent) -> Vec<String>;

    /// Snapshot of everything the renderer needs for the next frame.
    fn frame_view(&self) -> FrameView;
}
