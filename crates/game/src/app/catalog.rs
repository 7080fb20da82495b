use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use engine::STAGE_SPAN;
use serde::Deserialize;
use tracing::warn;

use super::gameplay::missions::KNOWN_MISSION_IDS;
use super::gameplay::types::{ObjectId, SceneId};

pub(crate) type CatalogResult<T> = Result<T, String>;

/// Backdrop art for one scene. The default always exists; the variants are
/// swapped in as scene progress unlocks them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct BackdropSet {
    pub(crate) default: String,
    #[serde(default)]
    pub(crate) rope_cut: Option<String>,
    #[serde(default)]
    pub(crate) cleared: Option<String>,
}

/// Template for one placeable object: sprite key plus its default placement
/// in percent-of-stage units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SceneObjectDef {
    pub(crate) name: String,
    pub(crate) sprite: String,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    #[serde(default = "default_visible")]
    pub(crate) visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct MissionDef {
    pub(crate) id: String,
    pub(crate) description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SceneDef {
    pub(crate) name: String,
    pub(crate) backdrop: BackdropSet,
    #[serde(default)]
    pub(crate) objects: BTreeMap<ObjectId, SceneObjectDef>,
    #[serde(default)]
    pub(crate) player_object: Option<ObjectId>,
    #[serde(default)]
    pub(crate) missions: Vec<MissionDef>,
    #[serde(default)]
    pub(crate) next_scene: Option<SceneId>,
}

/// Immutable scene registry loaded once at startup. The session reads it;
/// nothing writes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SceneCatalog {
    initial_scene: SceneId,
    scenes: BTreeMap<SceneId, SceneDef>,
}

impl SceneCatalog {
    #[cfg(test)]
    pub(crate) fn new(initial_scene: SceneId, scenes: BTreeMap<SceneId, SceneDef>) -> Self {
        Self {
            initial_scene,
            scenes,
        }
    }

    pub(crate) fn initial_scene(&self) -> &SceneId {
        &self.initial_scene
    }

    pub(crate) fn scene(&self, id: &SceneId) -> Option<&SceneDef> {
        self.scenes.get(id)
    }

    pub(crate) fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

/// Reads and validates the scene catalog. Every id a running session can
/// reach is checked here, so later lookups fail only into the
/// missing-scene notice.
pub(crate) fn load_scene_catalog(path: &Path) -> CatalogResult<SceneCatalog> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read catalog '{}': {error}", path.display()))?;
    parse_scene_catalog(&raw)
}

pub(crate) fn parse_scene_catalog(raw: &str) -> CatalogResult<SceneCatalog> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let catalog = match serde_path_to_error::deserialize::<_, SceneCatalog>(&mut deserializer) {
        Ok(catalog) => catalog,
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                return Err(format!("parse catalog json: {source}"));
            }
            return Err(format!("parse catalog json at {path}: {source}"));
        }
    };
    validate_scene_catalog(&catalog)?;
    Ok(catalog)
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("validation failed at {path}: {}", message.into())
}

fn expected_actual(path: &str, expected: impl Display, actual: impl Display) -> String {
    validation_err(path, format!("expected {expected}, got {actual}"))
}

fn validate_scene_catalog(catalog: &SceneCatalog) -> CatalogResult<()> {
    if catalog.scenes.is_empty() {
        return Err(validation_err("scenes", "catalog defines no scenes"));
    }
    if !catalog.scenes.contains_key(&catalog.initial_scene) {
        return Err(validation_err(
            "initial_scene",
            format!("scene '{}' is not defined", catalog.initial_scene),
        ));
    }
    for (scene_id, scene) in &catalog.scenes {
        validate_scene(catalog, scene_id, scene)?;
    }
    Ok(())
}

fn validate_scene(
    catalog: &SceneCatalog,
    scene_id: &SceneId,
    scene: &SceneDef,
) -> CatalogResult<()> {
    if let Some(next) = &scene.next_scene {
        if !catalog.scenes.contains_key(next) {
            return Err(validation_err(
                &format!("scenes.{scene_id}.next_scene"),
                format!("scene '{next}' is not defined"),
            ));
        }
    }
    if let Some(player) = &scene.player_object {
        if !scene.objects.contains_key(player) {
            return Err(validation_err(
                &format!("scenes.{scene_id}.player_object"),
                format!("object '{player}' is not defined in this scene"),
            ));
        }
    } else if !scene.missions.is_empty() {
        warn!(scene = %scene_id, "scene_has_missions_but_no_player_object");
    }
    for (object_id, object) in &scene.objects {
        validate_object_geometry(scene_id, object_id, object)?;
    }
    for mission in &scene.missions {
        if !KNOWN_MISSION_IDS.contains(&mission.id.as_str()) {
            warn!(
                scene = %scene_id,
                mission = %mission.id,
                "unknown_mission_id_never_completes"
            );
        }
    }
    Ok(())
}

fn validate_object_geometry(
    scene_id: &SceneId,
    object_id: &ObjectId,
    object: &SceneObjectDef,
) -> CatalogResult<()> {
    let fields = [
        ("x", object.x),
        ("y", object.y),
        ("width", object.width),
        ("height", object.height),
    ];
    for (field, value) in fields {
        let path = format!("scenes.{scene_id}.objects.{object_id}.{field}");
        if !value.is_finite() {
            return Err(expected_actual(&path, "finite number", value));
        }
        if !(0.0..=STAGE_SPAN).contains(&value) {
            return Err(expected_actual(
                &path,
                format!("number in [0, {STAGE_SPAN}]"),
                value,
            ));
        }
    }
    Ok(())
}
