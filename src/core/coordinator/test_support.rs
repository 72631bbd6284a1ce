//=========================================================================
// Coordinator Test Fixtures
//=========================================================================
//
// Shared game states, scenes and surfaces for coordinator tests.
//
// GamePhase table:
//   Loading  → Playing
//   Playing  → Paused, Loading
//   Paused   → Playing
//   GameOver   (never registered)
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::{CoordinatorBuilder, GameContext, GameCoordinator, GameStateBox};
use crate::core::diagnostics::{CapturingLogger, Diagnostics};
use crate::core::lifecycle::LifecycleCenter;
use crate::core::scene::{share_scene, PresentationSurface, Scene, SharedScene};
use crate::core::state::{State, StateKind};

//=== GamePhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GamePhase {
    Loading,
    Playing,
    Paused,
    GameOver,
}

impl StateKind for GamePhase {}

//=== Journal =============================================================

/// Ordered record of hook calls shared between states, scenes and observers.
#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

//=== PhaseState ==========================================================

pub(crate) struct PhaseState {
    kind: GamePhase,
    allowed: Vec<GamePhase>,
    journal: Journal,
    scene: Option<SharedScene>,
}

impl PhaseState {
    pub(crate) fn boxed(kind: GamePhase, allowed: &[GamePhase], journal: &Journal) -> GameStateBox<GamePhase> {
        Box::new(Self {
            kind,
            allowed: allowed.to_vec(),
            journal: journal.clone(),
            scene: None,
        })
    }

    /// A state presenting `scene` whenever it is entered.
    pub(crate) fn presenting(
        kind: GamePhase,
        allowed: &[GamePhase],
        journal: &Journal,
        scene: SharedScene,
    ) -> GameStateBox<GamePhase> {
        Box::new(Self {
            kind,
            allowed: allowed.to_vec(),
            journal: journal.clone(),
            scene: Some(scene),
        })
    }
}

impl State<GamePhase, GameContext<GamePhase>> for PhaseState {
    fn kind(&self) -> GamePhase {
        self.kind
    }

    fn is_valid_next_state(&self, next: GamePhase) -> bool {
        self.allowed.contains(&next)
    }

    fn did_enter(&mut self, _previous: Option<GamePhase>, context: &mut GameContext<GamePhase>) {
        self.journal.push(format!("enter {:?}", self.kind));
        if let Some(scene) = &self.scene {
            context.present_scene(scene.clone());
        }
    }

    fn will_exit(&mut self, _next: GamePhase, _context: &mut GameContext<GamePhase>) {
        self.journal.push(format!("exit {:?}", self.kind));
    }
}

pub(crate) fn phase_states(journal: &Journal) -> Vec<GameStateBox<GamePhase>> {
    vec![
        PhaseState::boxed(GamePhase::Loading, &[GamePhase::Playing], journal),
        PhaseState::boxed(GamePhase::Playing, &[GamePhase::Paused, GamePhase::Loading], journal),
        PhaseState::boxed(GamePhase::Paused, &[GamePhase::Playing], journal),
    ]
}

//=== RecordingScene ======================================================

pub(crate) struct RecordingScene {
    name: String,
    journal: Journal,
}

impl RecordingScene {
    pub(crate) fn shared(name: &str, journal: &Journal) -> SharedScene {
        share_scene(Self {
            name: name.to_string(),
            journal: journal.clone(),
        })
    }
}

impl Scene for RecordingScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn application_will_enter_foreground(&mut self) {
        self.journal.push(format!("{} will enter foreground", self.name));
    }

    fn application_did_become_active(&mut self) {
        self.journal.push(format!("{} did become active", self.name));
    }

    fn application_will_resign_active(&mut self) {
        self.journal.push(format!("{} will resign active", self.name));
    }

    fn application_did_enter_background(&mut self) {
        self.journal.push(format!("{} did enter background", self.name));
    }
}

//=== RecordingSurface ====================================================

#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub(crate) presented: RefCell<Vec<String>>,
}

impl RecordingSurface {
    pub(crate) fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl PresentationSurface for RecordingSurface {
    fn present_scene(&self, scene: &SharedScene) {
        self.presented.borrow_mut().push(scene.borrow().name().to_string());
    }
}

//=== Fixture =============================================================

pub(crate) struct Fixture {
    pub(crate) center: LifecycleCenter,
    pub(crate) journal: Journal,
    pub(crate) logger: Arc<CapturingLogger>,
    pub(crate) coordinator: GameCoordinator<GamePhase>,
}

impl Fixture {
    /// Coordinator over the standard phase table, initial state Loading.
    pub(crate) fn new() -> Self {
        let journal = Journal::default();
        let states = phase_states(&journal);
        Self::build(journal, states)
    }

    /// Like [`Fixture::new`], but Loading presents a "loading" scene.
    pub(crate) fn with_loading_scene() -> Self {
        let journal = Journal::default();
        let scene = RecordingScene::shared("loading", &journal);
        let states = vec![
            PhaseState::presenting(GamePhase::Loading, &[GamePhase::Playing], &journal, scene),
            PhaseState::boxed(GamePhase::Playing, &[GamePhase::Paused, GamePhase::Loading], &journal),
            PhaseState::boxed(GamePhase::Paused, &[GamePhase::Playing], &journal),
        ];
        Self::build(journal, states)
    }

    fn build(journal: Journal, states: Vec<GameStateBox<GamePhase>>) -> Self {
        let center = LifecycleCenter::new();
        let logger = Arc::new(CapturingLogger::default());

        let coordinator = CoordinatorBuilder::new(GamePhase::Loading)
            .with_states(states)
            .with_diagnostics(Diagnostics::with_logger(logger.clone()))
            .build(&center);
        logger.clear();

        Self {
            center,
            journal,
            logger,
            coordinator,
        }
    }

    /// Posts `signal` on the fixture's center and pumps the coordinator.
    pub(crate) fn signal(&mut self, signal: crate::core::lifecycle::LifecycleSignal) -> usize {
        self.center.post(signal);
        self.coordinator.process_lifecycle_events()
    }
}
