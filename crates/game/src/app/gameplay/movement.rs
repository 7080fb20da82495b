use engine::{MoveDirection, STAGE_SPAN};

use super::types::Position;

/// Distance one key press moves the object, in percent units.
pub(crate) const MOVE_STEP_UNITS: f32 = 2.0;

/// An x at or below this counts as the left edge.
pub(crate) const EDGE_MARGIN_UNITS: f32 = 5.0;

/// An x at or above `RIGHT_EDGE_BASE_UNITS - width` counts as the right edge.
pub(crate) const RIGHT_EDGE_BASE_UNITS: f32 = 90.0;

/// Steps `current` along the pressed axis, clamped so the object stays
/// fully inside the stage. The other axis passes through unchanged.
pub(crate) fn step_position(
    current: Position,
    direction: MoveDirection,
    width: f32,
    height: f32,
) -> Position {
    match direction {
        MoveDirection::Left => Position {
            x: (current.x - MOVE_STEP_UNITS).max(0.0),
            ..current
        },
        MoveDirection::Right => Position {
            x: (current.x + MOVE_STEP_UNITS).min(STAGE_SPAN - width),
            ..current
        },
        MoveDirection::Up => Position {
            y: (current.y - MOVE_STEP_UNITS).max(0.0),
            ..current
        },
        MoveDirection::Down => Position {
            y: (current.y + MOVE_STEP_UNITS).min(STAGE_SPAN - height),
            ..current
        },
    }
}

/// Edge status is purely horizontal: within the margin of the left border,
/// or at `RIGHT_EDGE_BASE_UNITS - width` and beyond on the right. Vertical
/// moves re-derive it from their unchanged x.
pub(crate) fn edge_status(x: f32, width: f32) -> bool {
    x <= EDGE_MARGIN_UNITS || x >= RIGHT_EDGE_BASE_UNITS - width
}
