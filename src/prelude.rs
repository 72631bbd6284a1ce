//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_gamekit::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// State machine
pub use crate::core::state::{State, StateKind};

// Coordinator
pub use crate::core::coordinator::{
    CoordinatorBuilder, CoordinatorChange, GameContext, GameCoordinator, GameStateBox,
};

// Lifecycle
pub use crate::core::lifecycle::{LifecycleCenter, LifecycleSignal};

// Scenes and world
pub use crate::core::entity::Entity;
pub use crate::core::scene::{share_scene, PresentationSurface, Scene, SharedScene};
