use std::collections::BTreeSet;

use engine::{
    ControlLine, FrameView, HudView, ObjectiveLine, SpriteInstance, StagePlacement, StageView,
};

use crate::app::catalog::{SceneCatalog, SceneDef};

use super::missions::{evaluate_objectives, ObjectiveStatus, MISSION_CUT_ROPE};
use super::store::GameStateStore;
use super::types::{Position, SceneId};

/// Builds the frame the renderer draws, entirely from the store snapshot
/// and the catalog. Unknown scene ids become a missing-scene notice.
pub(crate) fn build_frame_view(
    store: &GameStateStore,
    catalog: &SceneCatalog,
    pressed_keys: &BTreeSet<&'static str>,
) -> FrameView {
    let scene_id = store.current_scene();
    let Some(scene) = catalog.scene(scene_id) else {
        return FrameView::MissingScene {
            scene_id: scene_id.to_string(),
        };
    };
    let objectives = evaluate_objectives(store, scene_id, &scene.missions);
    FrameView::Stage(StageView {
        scene_name: scene.name.clone(),
        backdrop_key: backdrop_key(store, scene_id, scene),
        sprites: sprite_instances(store, scene_id, scene),
        hud: HudView {
            objectives: objective_lines(&objectives),
            controls: control_lines(store, scene_id, scene),
            pressed_keys: pressed_keys.iter().map(|label| label.to_string()).collect(),
        },
    })
}

/// Scene progress picks the backdrop: the cleared art once the player has
/// moved away, the rope-cut art once the rope is cut, the default otherwise.
/// Scenes without a variant stay on the default.
fn backdrop_key(store: &GameStateStore, scene_id: &SceneId, scene: &SceneDef) -> String {
    if store.has_moved(scene_id) {
        if let Some(key) = &scene.backdrop.cleared {
            return key.clone();
        }
    }
    if store.rope_cut(scene_id) {
        if let Some(key) = &scene.backdrop.rope_cut {
            return key.clone();
        }
    }
    scene.backdrop.default.clone()
}

/// The player object stays painted into the backdrop art until its first
/// move; other visible objects always draw from their template.
fn sprite_instances(
    store: &GameStateStore,
    scene_id: &SceneId,
    scene: &SceneDef,
) -> Vec<SpriteInstance> {
    let mut sprites = Vec::new();
    for (object_id, object) in &scene.objects {
        if !object.visible {
            continue;
        }
        let is_player = scene.player_object.as_ref() == Some(object_id);
        if is_player && !store.has_moved(scene_id) {
            continue;
        }
        let position = store
            .object_position(scene_id, object_id)
            .unwrap_or(Position {
                x: object.x,
                y: object.y,
            });
        sprites.push(SpriteInstance {
            sprite_key: object.sprite.clone(),
            placement: StagePlacement {
                x: position.x,
                y: position.y,
                width: object.width,
                height: object.height,
            },
        });
    }
    sprites
}

fn objective_lines(objectives: &[ObjectiveStatus]) -> Vec<ObjectiveLine> {
    objectives
        .iter()
        .map(|objective| ObjectiveLine {
            label: objective.description.clone(),
            complete: objective.complete,
        })
        .collect()
}

fn control_lines(store: &GameStateStore, scene_id: &SceneId, scene: &SceneDef) -> Vec<ControlLine> {
    let mut controls = vec![control("SPACE", "Barks")];
    let rope_cut = store.rope_cut(scene_id);
    let has_rope_mission = scene
        .missions
        .iter()
        .any(|mission| mission.id == MISSION_CUT_ROPE);
    if has_rope_mission && !rope_cut {
        controls.push(control("ENTER", "Cut the rope"));
    }
    if rope_cut {
        controls.push(control("ARROWS/WASD", "Move"));
    }
    controls
}

fn control(key: &str, action: &str) -> ControlLine {
    ControlLine {
        key: key.to_string(),
        action: action.to_string(),
    }
}
