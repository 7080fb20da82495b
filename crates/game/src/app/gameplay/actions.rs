use engine::{GameKey, MoveDirection};

use crate::app::catalog::SceneCatalog;

use super::missions::MISSION_CUT_ROPE;
use super::movement::{edge_status, step_position};
use super::store::{GameStateStore, StateCommand};
use super::types::Position;

pub(crate) const CUE_ROPE_CUT: &str = "rope-cut";
pub(crate) const CUE_BARK: &str = "bark";
pub(crate) const CUE_SNIFF: &str = "sniff";

/// Presses 1 through this count play the bark cue; later presses sniff.
pub(crate) const BARK_CUE_LIMIT: u32 = 3;

/// Cue names worth decoding at startup instead of on first use.
pub(crate) fn cue_preload_list() -> Vec<String> {
    vec![
        CUE_ROPE_CUT.to_string(),
        CUE_BARK.to_string(),
        CUE_SNIFF.to_string(),
    ]
}

/// Everything one key press wants to happen: state commands committed as a
/// unit, an optional sound cue, and whether objectives should be re-checked
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ActionPlan {
    pub(crate) commands: Vec<StateCommand>,
    pub(crate) cue: Option<&'static str>,
    pub(crate) check_transition: bool,
}

/// Maps a pressed key to its action plan against the current state. Returns
/// `None` when the key is gated off or its targets are missing from the
/// catalog; the caller then changes nothing.
pub(crate) fn plan_key_action(
    store: &GameStateStore,
    catalog: &SceneCatalog,
    key: GameKey,
) -> Option<ActionPlan> {
    match key {
        GameKey::Enter => plan_rope_cut(store, catalog),
        GameKey::Space => Some(plan_bark(store)),
        GameKey::Move(direction) => plan_move(store, catalog, direction),
    }
}

/// The rope can be cut once, and only in a scene whose missions include it.
fn plan_rope_cut(store: &GameStateStore, catalog: &SceneCatalog) -> Option<ActionPlan> {
    let scene_id = store.current_scene();
    let scene = catalog.scene(scene_id)?;
    let has_rope_mission = scene
        .missions
        .iter()
        .any(|mission| mission.id == MISSION_CUT_ROPE);
    if !has_rope_mission || store.rope_cut(scene_id) {
        return None;
    }
    Some(ActionPlan {
        commands: vec![StateCommand::SetRopeCut {
            scene: scene_id.clone(),
            cut: true,
        }],
        cue: Some(CUE_ROPE_CUT),
        check_transition: false,
    })
}

/// Barking always counts. The cue is picked from the count this press
/// produces, not from a stale read.
fn plan_bark(store: &GameStateStore) -> ActionPlan {
    let scene_id = store.current_scene().clone();
    let new_count = store.spacebar_count(&scene_id).saturating_add(1);
    let cue = if new_count > BARK_CUE_LIMIT {
        CUE_SNIFF
    } else {
        CUE_BARK
    };
    ActionPlan {
        commands: vec![StateCommand::IncrementSpacebarCount { scene: scene_id }],
        cue: Some(cue),
        check_transition: true,
    }
}

/// Movement needs the rope cut and a resolvable player object. The new
/// position, the first-move flag and the edge flag commit together.
fn plan_move(
    store: &GameStateStore,
    catalog: &SceneCatalog,
    direction: MoveDirection,
) -> Option<ActionPlan> {
    let scene_id = store.current_scene();
    if !store.rope_cut(scene_id) {
        return None;
    }
    let scene = catalog.scene(scene_id)?;
    let object_id = scene.player_object.as_ref()?;
    let object = scene.objects.get(object_id)?;

    let current = store
        .object_position(scene_id, object_id)
        .unwrap_or(Position {
            x: object.x,
            y: object.y,
        });
    let next = step_position(current, direction, object.width, object.height);

    let mut commands = vec![StateCommand::UpdateObjectPosition {
        scene: scene_id.clone(),
        object: object_id.clone(),
        position: next,
    }];
    if !store.has_moved(scene_id) {
        commands.push(StateCommand::SetHasMoved {
            scene: scene_id.clone(),
            moved: true,
        });
    }
    commands.push(StateCommand::SetDogOnEdge {
        scene: scene_id.clone(),
        on_edge: edge_status(next.x, object.width),
    });
    Some(ActionPlan {
        commands,
        cue: None,
        check_transition: true,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{dog_id, scene1, scene2, two_scene_catalog, DOG_X, DOG_Y};
    use super::super::types::SceneId;
    use super::*;

    fn store_in_scene1() -> GameStateStore {
        GameStateStore::new(scene1())
    }

    fn rope_cut_store() -> GameStateStore {
        let mut store = store_in_scene1();
        store.apply(StateCommand::SetRopeCut {
            scene: scene1(),
            cut: true,
        });
        store
    }

    #[test]
    fn enter_cuts_the_rope_once() {
        let catalog = two_scene_catalog();
        let mut store = store_in_scene1();

        let plan = plan_key_action(&store, &catalog, GameKey::Enter).expect("plan");
        assert_eq!(plan.cue, Some(CUE_ROPE_CUT));
        assert!(!plan.check_transition);
        store.apply_batch(plan.commands);
        assert!(store.rope_cut(&scene1()));

        assert_eq!(plan_key_action(&store, &catalog, GameKey::Enter), None);
    }

    #[test]
    fn enter_does_nothing_in_a_scene_without_the_rope_mission() {
        let catalog = two_scene_catalog();
        let mut store = store_in_scene1();
        store.apply(StateCommand::ChangeScene { scene: scene2() });

        assert_eq!(plan_key_action(&store, &catalog, GameKey::Enter), None);
    }

    #[test]
    fn bark_cue_switches_to_sniff_above_the_limit() {
        let catalog = two_scene_catalog();
        let mut store = store_in_scene1();

        for expected in [CUE_BARK, CUE_BARK, CUE_BARK, CUE_SNIFF, CUE_SNIFF] {
            let plan = plan_key_action(&store, &catalog, GameKey::Space).expect("plan");
            assert_eq!(plan.cue, Some(expected));
            assert!(plan.check_transition);
            store.apply_batch(plan.commands);
        }
        assert_eq!(store.spacebar_count(&scene1()), 5);
    }

    #[test]
    fn movement_is_gated_until_the_rope_is_cut() {
        let catalog = two_scene_catalog();
        let store = store_in_scene1();

        let plan = plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Left));

        assert_eq!(plan, None);
    }

    #[test]
    fn first_move_commits_position_flag_and_edge_together() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();

        let plan =
            plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Left)).expect("plan");
        assert_eq!(plan.cue, None);
        assert!(plan.check_transition);
        store.apply_batch(plan.commands);

        let position = store.object_position(&scene1(), &dog_id()).expect("moved");
        assert!((position.x - (DOG_X - 2.0)).abs() <= 1e-6);
        assert!((position.y - DOG_Y).abs() <= 1e-6);
        assert!(store.has_moved(&scene1()));
        assert!(!store.dog_on_edge(&scene1()));
    }

    #[test]
    fn later_moves_skip_the_first_move_flag() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();

        let first =
            plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Up)).expect("plan");
        store.apply_batch(first.commands);
        let second =
            plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Up)).expect("plan");

        let sets_moved = second
            .commands
            .iter()
            .any(|command| matches!(command, StateCommand::SetHasMoved { .. }));
        assert!(!sets_moved);
    }

    #[test]
    fn moves_build_on_the_stored_override() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();

        for _ in 0..3 {
            let plan = plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Right))
                .expect("plan");
            store.apply_batch(plan.commands);
        }

        let position = store.object_position(&scene1(), &dog_id()).expect("moved");
        assert!((position.x - (DOG_X + 6.0)).abs() <= 1e-6);
    }

    #[test]
    fn reaching_the_left_margin_raises_the_edge_flag() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();

        // 30 -> 4 in steps of 2; the edge flag flips at x <= 5.
        for _ in 0..13 {
            let plan = plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Left))
                .expect("plan");
            store.apply_batch(plan.commands);
        }

        assert!(store.dog_on_edge(&scene1()));
        let position = store.object_position(&scene1(), &dog_id()).expect("moved");
        assert!((position.x - 4.0).abs() <= 1e-6);
    }

    #[test]
    fn vertical_moves_rederive_edge_from_the_unchanged_x() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();
        store.apply_batch(vec![
            StateCommand::UpdateObjectPosition {
                scene: scene1(),
                object: dog_id(),
                position: Position { x: 4.0, y: 35.0 },
            },
            StateCommand::SetDogOnEdge {
                scene: scene1(),
                on_edge: true,
            },
        ]);

        let plan =
            plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Down)).expect("plan");
        store.apply_batch(plan.commands);

        assert!(store.dog_on_edge(&scene1()));
        let position = store.object_position(&scene1(), &dog_id()).expect("moved");
        assert!((position.y - 37.0).abs() <= 1e-6);
    }

    #[test]
    fn move_in_an_unknown_scene_is_a_no_op() {
        let catalog = two_scene_catalog();
        let mut store = rope_cut_store();
        store.apply(StateCommand::ChangeScene {
            scene: SceneId::new("nowhere"),
        });
        store.apply(StateCommand::SetRopeCut {
            scene: SceneId::new("nowhere"),
            cut: true,
        });

        let plan = plan_key_action(&store, &catalog, GameKey::Move(MoveDirection::Left));

        assert_eq!(plan, None);
    }
}
