use std::collections::BTreeMap;

use engine::{GameKey, KeyEvent};

use crate::app::catalog::{BackdropSet, MissionDef, SceneCatalog, SceneDef, SceneObjectDef};

use super::missions::{MISSION_BARK_TWICE, MISSION_CUT_ROPE, MISSION_WALK_TO_EDGE};
use super::types::{ObjectId, SceneId};

pub(crate) const DOG_X: f32 = 30.0;
pub(crate) const DOG_Y: f32 = 35.0;
pub(crate) const DOG_WIDTH: f32 = 25.0;
pub(crate) const DOG_HEIGHT: f32 = 40.0;

pub(crate) fn scene1() -> SceneId {
    SceneId::new("scene1")
}

pub(crate) fn scene2() -> SceneId {
    SceneId::new("scene2")
}

pub(crate) fn dog_id() -> ObjectId {
    ObjectId::new("dog")
}

/// Catalog shaped like the shipped one: a mission scene handing off to a
/// terminal scene without missions.
pub(crate) fn two_scene_catalog() -> SceneCatalog {
    let mut scenes = BTreeMap::new();
    scenes.insert(scene1(), mission_scene());
    scenes.insert(scene2(), terminal_scene());
    SceneCatalog::new(scene1(), scenes)
}

pub(crate) fn mission_scene() -> SceneDef {
    SceneDef {
        name: "Pluto Tied to a Tree".to_string(),
        backdrop: BackdropSet {
            default: "p1".to_string(),
            rope_cut: Some("p1-rope-cut".to_string()),
            cleared: Some("p1-without-pluto".to_string()),
        },
        objects: BTreeMap::from([(dog_id(), dog_object(DOG_X, DOG_Y))]),
        player_object: Some(dog_id()),
        missions: vec![
            mission(MISSION_CUT_ROPE, "Cut the rope"),
            mission(MISSION_BARK_TWICE, "Bark twice"),
            mission(MISSION_WALK_TO_EDGE, "Walk to either side"),
        ],
        next_scene: Some(scene2()),
    }
}

pub(crate) fn terminal_scene() -> SceneDef {
    SceneDef {
        name: "Backyard".to_string(),
        backdrop: BackdropSet {
            default: "p2".to_string(),
            rope_cut: None,
            cleared: None,
        },
        objects: BTreeMap::from([(dog_id(), dog_object(10.0, 20.0))]),
        player_object: Some(dog_id()),
        missions: Vec::new(),
        next_scene: None,
    }
}

pub(crate) fn dog_object(x: f32, y: f32) -> SceneObjectDef {
    SceneObjectDef {
        name: "Dog".to_string(),
        sprite: "dog".to_string(),
        x,
        y,
        width: DOG_WIDTH,
        height: DOG_HEIGHT,
        visible: true,
    }
}

pub(crate) fn mission(id: &str, description: &str) -> MissionDef {
    MissionDef {
        id: id.to_string(),
        description: description.to_string(),
    }
}

pub(crate) fn press(key: GameKey) -> KeyEvent {
    KeyEvent {
        key: Some(key),
        label: None,
        pressed: true,
    }
}

pub(crate) fn labeled_press(key: Option<GameKey>, label: &'static str) -> KeyEvent {
    KeyEvent {
        key,
        label: Some(label),
        pressed: true,
    }
}

pub(crate) fn release(label: &'static str) -> KeyEvent {
    KeyEvent {
        key: None,
        label: Some(label),
        pressed: false,
    }
}
