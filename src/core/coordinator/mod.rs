//=========================================================================
// Game Coordinator
//=========================================================================
//
// Owns the game state machine, the world entity, and the current scene.
//
// Architecture:
//   GameCoordinator<K>
//     ├─ machine: StateMachine<K, GameContext<K>>
//     ├─ context: GameContext<K>   (world, scene, surface, observers)
//     ├─ lifecycle: Receiver<LifecycleSignal>
//     └─ subscriptions: SubscriptionSet   (cancelled on drop)
//
// Flow:
//   enter(k) → can_enter? → observers.notify(State) → machine.enter(k)
//   DidBecomeActive (no scene, not bootstrapped) → enter_initial_state()
//
// The coordinator is single-threaded: scenes and the surface are held
// through `Rc`, so it never leaves the thread that built it.
//
//=========================================================================

//=== Module Declarations =================================================

mod builder;
mod context;
mod lifecycle_bridge;
mod observer;

#[cfg(test)]
pub(crate) mod test_support;

//=== External Dependencies ===============================================

use std::rc::{Rc, Weak};

use crossbeam_channel::Receiver;

//=== Internal Dependencies ===============================================

use crate::core::diagnostics::Diagnostics;
use crate::core::entity::Entity;
use crate::core::error::ConfigurationError;
use crate::core::lifecycle::{LifecycleCenter, LifecycleSignal, SubscriptionSet};
use crate::core::scene::{PresentationSurface, SharedScene};
use crate::core::state::{State, StateKind, StateMachine};

//=== Public API ==========================================================

pub use builder::CoordinatorBuilder;
pub use context::GameContext;
pub use observer::{CoordinatorChange, ObserverId};

/// Boxed game state as registered with a [`GameCoordinator`].
pub type GameStateBox<K> = Box<dyn State<K, GameContext<K>>>;

//=== GameCoordinator =====================================================

/// State-machine-driven controller for game states and scenes.
///
/// Build one with [`CoordinatorBuilder`] (or [`GameCoordinator::new`]) against
/// the [`LifecycleCenter`](crate::core::LifecycleCenter) the platform posts to.
/// The initial state is entered exactly once, normally when the first
/// `DidBecomeActive` signal arrives while no scene is current.
///
/// # Examples
///
/// ```rust
/// use aetheric_gamekit::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Phase { Loading, Playing }
/// impl StateKind for Phase {}
///
/// struct Loading;
/// impl State<Phase, GameContext<Phase>> for Loading {
///     fn kind(&self) -> Phase { Phase::Loading }
///     fn is_valid_next_state(&self, next: Phase) -> bool { next == Phase::Playing }
/// }
///
/// struct Playing;
/// impl State<Phase, GameContext<Phase>> for Playing {
///     fn kind(&self) -> Phase { Phase::Playing }
/// }
///
/// let center = LifecycleCenter::new();
/// let mut coordinator = CoordinatorBuilder::new(Phase::Loading)
///     .with_state(Loading)
///     .with_state(Playing)
///     .build(&center);
///
/// center.post(LifecycleSignal::DidBecomeActive);
/// coordinator.process_lifecycle_events();
///
/// assert!(coordinator.entered_initial_state());
/// assert!(coordinator.enter(Phase::Playing));
/// ```
pub struct GameCoordinator<K: StateKind> {
    machine: StateMachine<K, GameContext<K>>,
    context: GameContext<K>,
    initial_state: K,
    entered_initial_state: bool,
    lifecycle: Receiver<LifecycleSignal>,
    subscriptions: SubscriptionSet,
}

impl<K: StateKind> GameCoordinator<K> {
    //--- Construction -----------------------------------------------------

    /// Builds a coordinator with default world name and global diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if two states share a kind or `initial_state` is not among
    /// `states`.
    pub fn new(
        states: Vec<GameStateBox<K>>,
        initial_state: K,
        center: &LifecycleCenter,
    ) -> Self {
        CoordinatorBuilder::new(initial_state)
            .with_states(states)
            .build(center)
    }

    /// Fallible variant of [`GameCoordinator::new`].
    pub fn try_new(
        states: Vec<GameStateBox<K>>,
        initial_state: K,
        center: &LifecycleCenter,
    ) -> Result<Self, ConfigurationError> {
        CoordinatorBuilder::new(initial_state)
            .with_states(states)
            .try_build(center)
    }

    pub(crate) fn from_parts(
        machine: StateMachine<K, GameContext<K>>,
        context: GameContext<K>,
        initial_state: K,
        lifecycle: Receiver<LifecycleSignal>,
        subscriptions: SubscriptionSet,
    ) -> Self {
        Self {
            machine,
            context,
            initial_state,
            entered_initial_state: false,
            lifecycle,
            subscriptions,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Returns true if the machine may move to `kind` right now.
    pub fn can_enter(&self, kind: K) -> bool {
        self.machine.can_enter(kind)
    }

    /// Moves to `kind`, notifying observers before the change lands.
    ///
    /// Illegal transitions return false and notify nobody. A legal one
    /// always commits, so every notification is followed by its mutation.
    pub fn enter(&mut self, kind: K) -> bool {
        if !self.machine.can_enter(kind) {
            self.context.diagnostics().debug(format_args!(
                "Transition {:?} -> {:?} is not allowed",
                self.machine.current_kind(),
                kind
            ));
            return false;
        }

        let from = self.machine.current_kind();
        self.context
            .observers
            .notify(CoordinatorChange::State { from, to: kind });

        self.machine.enter(kind, &mut self.context)
    }

    /// Enters the initial state, at most once over the coordinator's life.
    ///
    /// Returns false without side effects if the initial state was already
    /// entered, otherwise the result of the transition.
    pub fn enter_initial_state(&mut self) -> bool {
        if self.entered_initial_state {
            self.context.diagnostics().info(format_args!(
                "Initial state {:?} was already entered",
                self.initial_state
            ));
            return false;
        }

        if !self.context.has_surface() {
            self.context.diagnostics().warn(format_args!(
                "Entering initial state {:?} without a presentation surface; scenes will not be shown until one is attached",
                self.initial_state
            ));
        }

        let entered = self.enter(self.initial_state);
        if entered {
            self.entered_initial_state = true;
        }

        entered
    }

    //--- State Queries ----------------------------------------------------

    /// The current game state.
    ///
    /// Logs a warning and returns `None` if the machine reports a current
    /// kind with no registered state behind it.
    pub fn current_game_state(&self) -> Option<&dyn State<K, GameContext<K>>> {
        let kind = self.machine.current_kind()?;

        match self.machine.state(kind) {
            Some(state) if state.kind() == kind => Some(state),
            _ => {
                self.context.diagnostics().warn(format_args!(
                    "Current state {:?} does not resolve to a registered game state",
                    kind
                ));
                None
            }
        }
    }

    /// Kind of the current state, `None` before the first entry.
    pub fn current_kind(&self) -> Option<K> {
        self.machine.current_kind()
    }

    /// Kind entered by [`enter_initial_state`](Self::enter_initial_state).
    pub fn initial_state(&self) -> K {
        self.initial_state
    }

    /// Returns true once the initial state has been entered.
    pub fn entered_initial_state(&self) -> bool {
        self.entered_initial_state
    }

    /// Registered state kinds in registration order.
    pub fn state_kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.machine.kinds()
    }

    //--- Scenes -----------------------------------------------------------

    /// The current scene, if any.
    pub fn current_scene(&self) -> Option<SharedScene> {
        self.context.current_scene()
    }

    /// Makes `scene` current. See [`GameContext::present_scene`].
    pub fn present_scene(&mut self, scene: SharedScene) {
        self.context.present_scene(scene);
    }

    /// Clears the current scene. See [`GameContext::dismiss_scene`].
    pub fn dismiss_scene(&mut self) -> Option<SharedScene> {
        self.context.dismiss_scene()
    }

    //--- Presentation Surface ---------------------------------------------

    /// Stores a non-owning reference to `surface`.
    pub fn attach_surface<S: PresentationSurface + 'static>(&mut self, surface: &Rc<S>) {
        let weak = Rc::downgrade(surface);
        let weak: Weak<dyn PresentationSurface> = weak;
        self.context.attach_surface(weak);
    }

    /// Forgets the presentation surface.
    pub fn detach_surface(&mut self) {
        self.context.detach_surface();
    }

    /// Returns true if a surface is attached and still alive.
    pub fn has_surface(&self) -> bool {
        self.context.has_surface()
    }

    //--- World & Context --------------------------------------------------

    /// The world entity, kept across state and scene changes.
    pub fn world(&self) -> &Entity {
        self.context.world()
    }

    /// Mutable access to the world entity.
    pub fn world_mut(&mut self) -> &mut Entity {
        self.context.world_mut()
    }

    /// The context handed to state hooks.
    pub fn context(&self) -> &GameContext<K> {
        &self.context
    }

    /// Diagnostics handle shared with the context.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.context.diagnostics()
    }

    //--- Observers --------------------------------------------------------

    /// Registers `callback` to run before every state or scene change.
    pub fn observe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&CoordinatorChange<K>) + 'static,
    {
        self.context.observers.observe(callback)
    }

    /// Unregisters a callback, returning false if it was unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.context.observers.remove(id)
    }

    /// Opens a channel receiving every future change notification.
    pub fn change_receiver(&mut self) -> Receiver<CoordinatorChange<K>> {
        self.context.observers.receiver()
    }

    /// Number of registered callbacks and open channels.
    pub fn observer_count(&self) -> usize {
        self.context.observers.len()
    }
}

impl<K: StateKind> std::fmt::Debug for GameCoordinator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameCoordinator")
            .field("current", &self.machine.current_kind())
            .field("initial_state", &self.initial_state)
            .field("entered_initial_state", &self.entered_initial_state)
            .field("world", self.context.world())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
