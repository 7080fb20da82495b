use std::collections::HashMap;

use tracing::debug;

use super::types::{ObjectId, Position, SceneId};

/// One mutation of the session state. Every command applies fully or not at
/// all, none of them can fail, and none of them consults the scene catalog.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StateCommand {
    ChangeScene {
        scene: SceneId,
    },
    UpdateObjectPosition {
        scene: SceneId,
        object: ObjectId,
        position: Position,
    },
    IncrementSpacebarCount {
        scene: SceneId,
    },
    ResetSpacebarCount {
        scene: SceneId,
    },
    SetRopeCut {
        scene: SceneId,
        cut: bool,
    },
    SetHasMoved {
        scene: SceneId,
        moved: bool,
    },
    SetDogOnEdge {
        scene: SceneId,
        on_edge: bool,
    },
}

/// Mutable session state. Per-scene fields live in maps keyed by scene id;
/// a scene with no entry reads as its default (count 0, flags false, no
/// position override), so entering a scene needs no setup pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameStateStore {
    current_scene: SceneId,
    object_positions: HashMap<SceneId, HashMap<ObjectId, Position>>,
    spacebar_counts: HashMap<SceneId, u32>,
    rope_cut_flags: HashMap<SceneId, bool>,
    has_moved_flags: HashMap<SceneId, bool>,
    dog_on_edge_flags: HashMap<SceneId, bool>,
}

impl GameStateStore {
    pub(crate) fn new(initial_scene: SceneId) -> Self {
        Self {
            current_scene: initial_scene,
            object_positions: HashMap::new(),
            spacebar_counts: HashMap::new(),
            rope_cut_flags: HashMap::new(),
            has_moved_flags: HashMap::new(),
            dog_on_edge_flags: HashMap::new(),
        }
    }

    pub(crate) fn apply(&mut self, command: StateCommand) {
        match command {
            StateCommand::ChangeScene { scene } => {
                // Entering a scene resets its progress. Position overrides
                // survive so a revisit keeps object placement.
                self.spacebar_counts.insert(scene.clone(), 0);
                self.rope_cut_flags.insert(scene.clone(), false);
                self.has_moved_flags.insert(scene.clone(), false);
                self.dog_on_edge_flags.insert(scene.clone(), false);
                debug!(scene = %scene, "scene_progress_reset");
                self.current_scene = scene;
            }
            StateCommand::UpdateObjectPosition {
                scene,
                object,
                position,
            } => {
                self.object_positions
                    .entry(scene)
                    .or_default()
                    .insert(object, position);
            }
            StateCommand::IncrementSpacebarCount { scene } => {
                let count = self.spacebar_counts.entry(scene).or_insert(0);
                *count = count.saturating_add(1);
            }
            StateCommand::ResetSpacebarCount { scene } => {
                self.spacebar_counts.insert(scene, 0);
            }
            StateCommand::SetRopeCut { scene, cut } => {
                self.rope_cut_flags.insert(scene, cut);
            }
            StateCommand::SetHasMoved { scene, moved } => {
                self.has_moved_flags.insert(scene, moved);
            }
            StateCommand::SetDogOnEdge { scene, on_edge } => {
                self.dog_on_edge_flags.insert(scene, on_edge);
            }
        }
    }

    /// Applies a batch as one logical update. Input handling is
    /// single-threaded, so nothing can observe a half-applied batch.
    pub(crate) fn apply_batch(&mut self, commands: Vec<StateCommand>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub(crate) fn current_scene(&self) -> &SceneId {
        &self.current_scene
    }

    /// Stored override for an object, `None` until a move commits one.
    /// Callers fall back to the catalog template position.
    pub(crate) fn object_position(&self, scene: &SceneId, object: &ObjectId) -> Option<Position> {
        self.object_positions
            .get(scene)
            .and_then(|positions| positions.get(object))
            .copied()
    }

    /// Bark presses since the scene was last entered, 0 if none.
    pub(crate) fn spacebar_count(&self, scene: &SceneId) -> u32 {
        self.spacebar_counts.get(scene).copied().unwrap_or(0)
    }

    /// Whether the rope was cut in this scene, false until set.
    pub(crate) fn rope_cut(&self, scene: &SceneId) -> bool {
        self.rope_cut_flags.get(scene).copied().unwrap_or(false)
    }

    /// Whether any successful move happened in this scene, false until set.
    pub(crate) fn has_moved(&self, scene: &SceneId) -> bool {
        self.has_moved_flags.get(scene).copied().unwrap_or(false)
    }

    /// Whether the player object sits within the edge margin, false until
    /// a move derives it.
    pub(crate) fn dog_on_edge(&self, scene: &SceneId) -> bool {
        self.dog_on_edge_flags.get(scene).copied().unwrap_or(false)
    }
}
