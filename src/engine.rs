//=========================================================================
// Aetheric Gamekit Engine
//
// Main entry point: owns the lifecycle center and hands a coordinator to
// the platform event loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(coordinator)──>  [Event Loop]
//         │                          │
//         ├─ with_title()            ├─ lifecycle_center()
//         └─ with_window_size()      └─ blocks until the window closes
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::coordinator::GameCoordinator;
use crate::core::lifecycle::LifecycleCenter;
use crate::core::state::StateKind;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: `"Aetheric Gamekit"`
/// - **Window size**: 800x600 (logical pixels)
///
/// # Examples
///
/// ```no_run
/// use aetheric_gamekit::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Phase { Menu }
/// impl StateKind for Phase {}
///
/// struct Menu;
/// impl State<Phase, GameContext<Phase>> for Menu {
///     fn kind(&self) -> Phase { Phase::Menu }
/// }
///
/// let engine = EngineBuilder::new()
///     .with_title("Asteroids")
///     .with_window_size(1280, 720)
///     .build();
///
/// let coordinator = CoordinatorBuilder::new(Phase::Menu)
///     .with_state(Menu)
///     .build(engine.lifecycle_center());
///
/// engine.run(coordinator);
/// ```
pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Aetheric Gamekit".to_string(),
            width: 800,
            height: 600,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// Default: 800x600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Builds the engine and its lifecycle center.
    pub fn build(self) -> Engine {
        info!("Building engine (title: {:?}, window: {}x{})", self.title, self.width, self.height);

        Engine {
            config: WindowConfig {
                title: self.title,
                width: self.width,
                height: self.height,
            },
            center: LifecycleCenter::new(),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Gamekit runtime.
///
/// Create via [`EngineBuilder`], build the coordinator against
/// [`Engine::lifecycle_center`], then hand it to [`Engine::run`].
pub struct Engine {
    config: WindowConfig,
    center: LifecycleCenter,
}

impl Engine {
    /// Center the platform posts lifecycle signals to.
    pub fn lifecycle_center(&self) -> &LifecycleCenter {
        &self.center
    }

    /// Runs the platform event loop and blocks until the application exits.
    ///
    /// The coordinator is moved onto the event-loop thread. Signals posted
    /// to [`Engine::lifecycle_center`] from other threads are applied the
    /// next time the loop goes idle.
    ///
    /// Platform failures are logged, not returned.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on macOS/iOS.
    pub fn run<K: StateKind>(self, coordinator: GameCoordinator<K>) {
        info!(
            "Starting engine runtime ({} states, initial: {:?})",
            coordinator.state_kinds().count(),
            coordinator.initial_state()
        );

        let platform = Platform::new(self.config, self.center, coordinator);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::test_support::*;
    use crate::core::coordinator::CoordinatorBuilder;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.title, "Aetheric Gamekit");
        assert_eq!((builder.width, builder.height), (800, 600));
    }

    #[test]
    fn builder_with_title() {
        let builder = EngineBuilder::new().with_title("Asteroids");
        assert_eq!(builder.title, "Asteroids");
    }

    #[test]
    fn builder_with_window_size() {
        let builder = EngineBuilder::new().with_window_size(1280, 720);
        assert_eq!((builder.width, builder.height), (1280, 720));
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero_width() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero_height() {
        EngineBuilder::new().with_window_size(800, 0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::default()
            .with_title("Asteroids")
            .with_window_size(1024, 768)
            .build();

        assert_eq!(
            engine.config,
            WindowConfig {
                title: "Asteroids".to_string(),
                width: 1024,
                height: 768,
            }
        );
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn coordinator_subscribes_to_engine_center() {
        let engine = EngineBuilder::new().build();
        assert_eq!(engine.lifecycle_center().subscriber_count(), 0);

        let journal = Journal::default();
        let _coordinator = CoordinatorBuilder::new(GamePhase::Loading)
            .with_states(phase_states(&journal))
            .build(engine.lifecycle_center());

        assert_eq!(engine.lifecycle_center().subscriber_count(), 5);
    }
}
