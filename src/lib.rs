//=========================================================================
// Aetheric Gamekit: Library Root
//
// Game state coordination on top of winit.
//
// Responsibilities:
// - Expose the platform-independent coordinator (`core`)
// - Expose the `Engine` facade that runs it on the winit event loop
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_gamekit::prelude::*;
//
// let engine = EngineBuilder::new().build();
// let coordinator = CoordinatorBuilder::new(MyPhase::Loading)
//     .with_states(my_states())
//     .build(engine.lifecycle_center());
// engine.run(coordinator);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state machine, coordinator, world entity, scenes and
// the lifecycle notification center. None of it depends on winit.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` translates winit callbacks into lifecycle signals and is not
// part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
