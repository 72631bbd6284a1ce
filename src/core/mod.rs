//=========================================================================
// Core Systems
//
// Platform-independent game coordination.
//
// Responsibilities:
// - Generic state machine with per-state transition predicates
// - Game coordinator owning states, world entity and current scene
// - Lifecycle signal distribution and scene forwarding
// - Will-change notifications for observers (UI layers)
//
// Notes:
// Nothing in `core` talks to the OS. The `platform` module translates
// winit callbacks into `LifecycleSignal`s and posts them to a
// `LifecycleCenter`; the coordinator consumes them on its own thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod coordinator;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod scene;
pub mod state;

//=== Public API ==========================================================

pub use coordinator::{
    CoordinatorBuilder, CoordinatorChange, GameContext, GameCoordinator, GameStateBox, ObserverId,
};
pub use diagnostics::Diagnostics;
pub use entity::{Component, Entity, EntityId};
pub use error::ConfigurationError;
pub use lifecycle::{LifecycleCenter, LifecycleSignal, SubscriptionId, SubscriptionSet};
pub use scene::{share_scene, PresentationSurface, Scene, SharedScene};
pub use state::{State, StateKind, StateMachine};
