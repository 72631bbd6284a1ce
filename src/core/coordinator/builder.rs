//=========================================================================
// Coordinator Builder
//=========================================================================
//
// Fluent configuration for a `GameCoordinator`.
//
// ```text
//     CoordinatorBuilder ──build(&center)──> GameCoordinator
//         ├─ with_state() / with_states()
//         ├─ with_world_name()
//         ├─ with_diagnostics()
//         └─ with_surface()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::{Rc, Weak};

use crossbeam_channel::unbounded;

//=== Internal Dependencies ===============================================

use super::{GameContext, GameCoordinator, GameStateBox};
use crate::core::diagnostics::Diagnostics;
use crate::core::entity::Entity;
use crate::core::error::ConfigurationError;
use crate::core::lifecycle::{LifecycleCenter, LifecycleSignal};
use crate::core::scene::PresentationSurface;
use crate::core::state::{State, StateKind, StateMachine};

//=== CoordinatorBuilder ==================================================

/// Builder for configuring and constructing a [`GameCoordinator`].
///
/// # Default Values
///
/// - **World name**: `"world"`
/// - **Diagnostics**: [`Diagnostics::global`]
/// - **Surface**: none (attach later with
///   [`GameCoordinator::attach_surface`])
pub struct CoordinatorBuilder<K: StateKind> {
    states: Vec<GameStateBox<K>>,
    initial_state: K,
    world_name: String,
    diagnostics: Diagnostics,
    surface: Option<Weak<dyn PresentationSurface>>,
}

impl<K: StateKind> CoordinatorBuilder<K> {
    /// Default name of the world entity.
    pub const DEFAULT_WORLD_NAME: &'static str = "world";

    /// Creates a builder whose coordinator will bootstrap into `initial_state`.
    pub fn new(initial_state: K) -> Self {
        Self {
            states: Vec::new(),
            initial_state,
            world_name: Self::DEFAULT_WORLD_NAME.to_string(),
            diagnostics: Diagnostics::global(),
            surface: None,
        }
    }

    //--- States -----------------------------------------------------------

    /// Registers one game state.
    pub fn with_state<S>(mut self, state: S) -> Self
    where
        S: State<K, GameContext<K>> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Registers already boxed game states, keeping their order.
    pub fn with_states(mut self, states: Vec<GameStateBox<K>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Replaces the state entered on first activation.
    pub fn with_initial_state(mut self, initial_state: K) -> Self {
        self.initial_state = initial_state;
        self
    }

    //--- Ambient ----------------------------------------------------------

    /// Sets the name of the world entity.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn with_world_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "World name must not be empty");
        self.world_name = name;
        self
    }

    /// Routes coordinator diagnostics through `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Attaches a presentation surface without taking ownership of it.
    pub fn with_surface<S: PresentationSurface + 'static>(mut self, surface: &Rc<S>) -> Self {
        let weak = Rc::downgrade(surface);
        let weak: Weak<dyn PresentationSurface> = weak;
        self.surface = Some(weak);
        self
    }

    //--- Build ------------------------------------------------------------

    /// Builds the coordinator and subscribes it to `center`.
    ///
    /// # Panics
    ///
    /// Panics on any [`ConfigurationError`].
    pub fn build(self, center: &LifecycleCenter) -> GameCoordinator<K> {
        match self.try_build(center) {
            Ok(coordinator) => coordinator,
            Err(e) => panic!("Invalid coordinator configuration: {}", e),
        }
    }

    /// Builds the coordinator, reporting configuration errors.
    pub fn try_build(self, center: &LifecycleCenter) -> Result<GameCoordinator<K>, ConfigurationError> {
        let machine = StateMachine::new(self.states)?;

        if !machine.contains(self.initial_state) {
            return Err(ConfigurationError::MissingInitialState(format!(
                "{:?}",
                self.initial_state
            )));
        }

        let world = Entity::new(self.world_name);
        let mut context = GameContext::new(world, self.diagnostics);
        if let Some(surface) = self.surface {
            context.attach_surface(surface);
        }

        let (tx, rx) = unbounded();
        let subscriptions = center.subscribe_all(&LifecycleSignal::ALL, tx);

        context.diagnostics().info(format_args!(
            "Coordinator created with {} states (initial: {:?}, world: {})",
            machine.len(),
            self.initial_state,
            context.world().id()
        ));

        Ok(GameCoordinator::from_parts(
            machine,
            context,
            self.initial_state,
            rx,
            subscriptions,
        ))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
