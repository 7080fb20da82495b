use crate::app::catalog::SceneDef;

use super::missions::{all_complete, ObjectiveStatus};
use super::types::SceneId;

/// Decides whether the scene hands off to its successor. A transition needs
/// a non-empty, fully complete objective list and a declared next scene.
pub(crate) fn transition_target(
    scene: &SceneDef,
    objectives: &[ObjectiveStatus],
) -> Option<SceneId> {
    if !all_complete(objectives) {
        return None;
    }
    scene.next_scene.clone()
}
