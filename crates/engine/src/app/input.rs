use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Direction of a movement key in stage space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Keys the game reacts to. Everything else is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Enter,
    Space,
    Move(MoveDirection),
}

/// A keyboard event translated out of winit terms. `key` is `None` for keys
/// with no gameplay meaning; `label` is `None` for keys the HUD cannot show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Option<GameKey>,
    pub label: Option<&'static str>,
    pub pressed: bool,
}

pub(crate) fn translate_key_event(
    physical_key: PhysicalKey,
    state: ElementState,
) -> Option<KeyEvent> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let key = game_key_for_code(code);
    let label = key_label(code);
    if key.is_none() && label.is_none() {
        return None;
    }
    Some(KeyEvent {
        key,
        label,
        pressed: state == ElementState::Pressed,
    })
}

pub(crate) fn is_quit_key(physical_key: PhysicalKey) -> bool {
    matches!(physical_key, PhysicalKey::Code(KeyCode::Escape))
}

fn game_key_for_code(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Enter | KeyCode::NumpadEnter => Some(GameKey::Enter),
        KeyCode::Space => Some(GameKey::Space),
        KeyCode::KeyW | KeyCode::ArrowUp => Some(GameKey::Move(MoveDirection::Up)),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(GameKey::Move(MoveDirection::Down)),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(GameKey::Move(MoveDirection::Left)),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(GameKey::Move(MoveDirection::Right)),
        _ => None,
    }
}

fn key_label(code: KeyCode) -> Option<&'static str> {
    let label = match code {
        KeyCode::KeyA => "A",
        KeyCode::KeyB => "B",
        KeyCode::KeyC => "C",
        KeyCode::KeyD => "D",
        KeyCode::KeyE => "E",
        KeyCode::KeyF => "F",
        KeyCode::KeyG => "G",
        KeyCode::KeyH => "H",
        KeyCode::KeyI => "I",
        KeyCode::KeyJ => "J",
        KeyCode::KeyK => "K",
        KeyCode::KeyL => "L",
        KeyCode::KeyM => "M",
        KeyCode::KeyN => "N",
        KeyCode::KeyO => "O",
        KeyCode::KeyP => "P",
        KeyCode::KeyQ => "Q",
        KeyCode::KeyR => "R",
        KeyCode::KeyS => "S",
        KeyCode::KeyT => "T",
        KeyCode::KeyU => "U",
        KeyCode::KeyV => "V",
        KeyCode::KeyW => "W",
        KeyCode::KeyX => "X",
        KeyCode::KeyY => "Y",
        KeyCode::KeyZ => "Z",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::Space => "SPACE",
        KeyCode::Enter | KeyCode::NumpadEnter => "ENTER",
        KeyCode::ArrowUp => "UP",
        KeyCode::ArrowDown => "DOWN",
        KeyCode::ArrowLeft => "LEFT",
        KeyCode::ArrowRight => "RIGHT",
        KeyCode::ShiftLeft | KeyCode::ShiftRight => "SHIFT",
        KeyCode::ControlLeft | KeyCode::ControlRight => "CTRL",
        KeyCode::AltLeft | KeyCode::AltRight => "ALT",
        KeyCode::Tab => "TAB",
        _ => return None,
    };
    Some(label)
}
