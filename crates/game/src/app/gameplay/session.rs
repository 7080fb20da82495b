use std::collections::BTreeSet;

use engine::{FrameView, Game, KeyEvent};
use tracing::{debug, info};

use crate::app::catalog::SceneCatalog;

use super::actions::plan_key_action;
use super::missions::evaluate_objectives;
use super::present::build_frame_view;
use super::progression::transition_target;
use super::store::{GameStateStore, StateCommand};

/// Owns the whole game: the state store, the catalog and the pressed-key
/// display set. The engine loop drives it one key event at a time, so every
/// event is handled to completion before the next arrives.
pub(crate) struct GameSession {
    store: GameStateStore,
    catalog: SceneCatalog,
    pressed_keys: BTreeSet<&'static str>,
}

impl GameSession {
    pub(crate) fn new(catalog: SceneCatalog) -> Self {
        let store = GameStateStore::new(catalog.initial_scene().clone());
        Self {
            store,
            catalog,
            pressed_keys: BTreeSet::new(),
        }
    }

    /// Objective check after a bark or a move. At most one scene change can
    /// come out of a single key event; once the scene switches, the new
    /// scene's freshly reset progress gates any further one.
    fn check_scene_transition(&mut self) {
        let scene_id = self.store.current_scene().clone();
        let Some(scene) = self.catalog.scene(&scene_id) else {
            return;
        };
        let objectives = evaluate_objectives(&self.store, &scene_id, &scene.missions);
        let Some(target) = transition_target(scene, &objectives) else {
            return;
        };
        info!(from = %scene_id, to = %target, "scene_switched");
        self.store.apply(StateCommand::ChangeScene { scene: target });
    }
}

impl Game for GameSession {
    fn on_key(&mut self, event: &KeyEvent) -> Vec<String> {
        if !event.pressed {
            // Releases only clear the display set; actions are
            // edge-triggered on presses.
            if let Some(label) = event.label {
                self.pressed_keys.remove(label);
            }
            return Vec::new();
        }
        if let Some(label) = event.label {
            self.pressed_keys.insert(label);
        }
        let Some(key) = event.key else {
            return Vec::new();
        };
        let Some(plan) = plan_key_action(&self.store, &self.catalog, key) else {
            debug!(?key, "key_action_gated");
            return Vec::new();
        };

        let cue = plan.cue;
        let check_transition = plan.check_transition;
        self.store.apply_batch(plan.commands);
        if check_transition {
            // Objectives see the state this very event just wrote.
            self.check_scene_transition();
        }
        cue.into_iter().map(str::to_string).collect()
    }

    fn frame_view(&self) -> FrameView {
        build_frame_view(&self.store, &self.catalog, &self.pressed_keys)
    }
}

#[cfg(test)]
mod tests {
    use engine::{GameKey, MoveDirection};

    use super::super::test_support::{
        dog_id, labeled_press, press, release, scene1, scene2, two_scene_catalog,
    };
    use super::*;

    fn session() -> GameSession {
        GameSession::new(two_scene_catalog())
    }

    fn press_times(session: &mut GameSession, key: GameKey, times: usize) -> Vec<String> {
        let mut cues = Vec::new();
        for _ in 0..times {
            cues.extend(session.on_key(&press(key)));
        }
        cues
    }

    #[test]
    fn first_bark_counts_and_cues_bark() {
        let mut session = session();

        let cues = session.on_key(&press(GameKey::Space));

        assert_eq!(cues, vec!["bark".to_string()]);
        assert_eq!(session.store.spacebar_count(&scene1()), 1);
    }

    #[test]
    fn fourth_bark_cues_sniff() {
        let mut session = session();

        let cues = press_times(&mut session, GameKey::Space, 4);

        assert_eq!(cues, vec!["bark", "bark", "bark", "sniff"]);
        assert_eq!(session.store.spacebar_count(&scene1()), 4);
    }

    #[test]
    fn enter_cuts_the_rope_once_and_stays_cut() {
        let mut session = session();

        let first = session.on_key(&press(GameKey::Enter));
        assert_eq!(first, vec!["rope-cut".to_string()]);
        assert!(session.store.rope_cut(&scene1()));

        let snapshot = session.store.clone();
        let second = session.on_key(&press(GameKey::Enter));
        assert!(second.is_empty());
        assert_eq!(session.store, snapshot);
    }

    #[test]
    fn movement_before_the_rope_cut_changes_nothing() {
        let mut session = session();
        let snapshot = session.store.clone();

        let cues = session.on_key(&press(GameKey::Move(MoveDirection::Left)));

        assert!(cues.is_empty());
        assert_eq!(session.store, snapshot);
    }

    #[test]
    fn full_run_reaches_the_backyard() {
        let mut session = session();

        session.on_key(&press(GameKey::Enter));
        press_times(&mut session, GameKey::Space, 2);
        // 30 -> 4 in steps of 2; the edge flag flips at x <= 5.
        press_times(&mut session, GameKey::Move(MoveDirection::Left), 13);

        assert_eq!(session.store.current_scene(), &scene2());
        assert_eq!(session.store.spacebar_count(&scene2()), 0);
        assert!(!session.store.rope_cut(&scene2()));
        assert!(!session.store.has_moved(&scene2()));
    }

    #[test]
    fn transition_waits_for_the_last_objective() {
        let mut session = session();

        session.on_key(&press(GameKey::Enter));
        press_times(&mut session, GameKey::Move(MoveDirection::Left), 13);
        assert_eq!(session.store.current_scene(), &scene1());

        session.on_key(&press(GameKey::Space));
        assert_eq!(session.store.current_scene(), &scene1());

        // The completing bark is evaluated with its own fresh count.
        session.on_key(&press(GameKey::Space));
        assert_eq!(session.store.current_scene(), &scene2());
    }

    #[test]
    fn no_transition_without_the_edge() {
        let mut session = session();

        session.on_key(&press(GameKey::Enter));
        press_times(&mut session, GameKey::Space, 2);
        press_times(&mut session, GameKey::Move(MoveDirection::Left), 5);

        assert_eq!(session.store.current_scene(), &scene1());
    }

    #[test]
    fn terminal_scene_swallows_further_progress() {
        let mut session = session();
        session.on_key(&press(GameKey::Enter));
        press_times(&mut session, GameKey::Space, 2);
        press_times(&mut session, GameKey::Move(MoveDirection::Left), 13);
        assert_eq!(session.store.current_scene(), &scene2());

        press_times(&mut session, GameKey::Space, 3);
        let cues = session.on_key(&press(GameKey::Move(MoveDirection::Right)));

        assert!(cues.is_empty());
        assert_eq!(session.store.current_scene(), &scene2());
        assert_eq!(session.store.spacebar_count(&scene2()), 3);
        assert!(session
            .store
            .object_position(&scene2(), &dog_id())
            .is_none());
    }

    #[test]
    fn held_key_repeats_count_as_presses() {
        let mut session = session();

        session.on_key(&labeled_press(Some(GameKey::Space), "SPACE"));
        session.on_key(&labeled_press(Some(GameKey::Space), "SPACE"));

        assert_eq!(session.store.spacebar_count(&scene1()), 2);
    }

    #[test]
    fn releases_only_clear_the_display_set() {
        let mut session = session();

        session.on_key(&labeled_press(Some(GameKey::Space), "SPACE"));
        session.on_key(&labeled_press(None, "B"));
        assert!(session.pressed_keys.contains("SPACE"));
        assert!(session.pressed_keys.contains("B"));

        let cues = session.on_key(&release("SPACE"));

        assert!(cues.is_empty());
        assert!(!session.pressed_keys.contains("SPACE"));
        assert_eq!(session.store.spacebar_count(&scene1()), 1);
    }

    #[test]
    fn display_only_keys_never_touch_game_state() {
        let mut session = session();
        let snapshot = session.store.clone();

        session.on_key(&labeled_press(None, "B"));

        assert_eq!(session.store, snapshot);
    }
}
