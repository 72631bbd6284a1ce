//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level application callbacks) with the game
// coordinator through the lifecycle notification center.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                    │
//  │   ├─ new_events(Init)   → AppEvent::Launched         │
//  │   ├─ resumed()          → AppEvent::Resumed          │
//  │   ├─ suspended()        → AppEvent::Suspended        │
//  │   └─ Focused(bool)      → AppEvent::Focused          │
//  │   ↓                                                  │
//  │  LifecycleTracker  (dedup, ordering)                 │
//  │   ↓ LifecycleSignal                                  │
//  │  LifecycleCenter::post ──> coordinator channel       │
//  │   ↓                                                  │
//  │  GameCoordinator::process_lifecycle_events()         │
//  └──────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pump after every post**: the coordinator is `!Send` and lives on
//   the event-loop thread, so it is drained right after each translated
//   callback and again in `about_to_wait` for signals posted elsewhere
// - **Lazy window**: created in `resumed()` (mobile compatibility)
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod lifecycle_tracker;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::coordinator::GameCoordinator;
use crate::core::lifecycle::LifecycleCenter;
use crate::core::state::StateKind;
use lifecycle_tracker::{AppEvent, LifecycleTracker};

//=== WindowConfig ========================================================

/// Window parameters applied when the window is created.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop no lifecycle signal is ever
/// produced.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop terminated with an error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== Platform ============================================================

/// Window owner and lifecycle signal source.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, center, coordinator)`
/// 2. **Execution**: `platform.run()` blocks on the winit event loop
/// 3. **Event processing**: winit calls `ApplicationHandler` methods,
///    which post signals and pump the coordinator
/// 4. **Shutdown**: close request → `event_loop.exit()` → `run()` returns
///
/// # Thread Safety
///
/// Not `Send`: it owns the coordinator, which holds `Rc` handles.
pub(crate) struct Platform<K: StateKind> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Center the coordinator is subscribed to.
    center: LifecycleCenter,

    coordinator: GameCoordinator<K>,

    tracker: LifecycleTracker,
}

impl<K: StateKind> Platform<K> {
    //--- Construction -----------------------------------------------------

    /// Creates the platform. The window is created lazily in `resumed()`.
    ///
    /// `coordinator` must have been built against `center`, otherwise it
    /// never sees the signals posted here.
    pub(crate) fn new(config: WindowConfig, center: LifecycleCenter, coordinator: GameCoordinator<K>) -> Self {
        if coordinator.lifecycle_subscription_count() == 0 {
            warn!(target: "platform", "Coordinator holds no lifecycle subscriptions");
        }

        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            center,
            coordinator,
            tracker: LifecycleTracker::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Translates `event`, posts the resulting signals and pumps the
    /// coordinator. Returns the number of signals the coordinator handled.
    fn dispatch(&mut self, event: AppEvent) -> usize {
        let signals = self.tracker.translate(event);
        if signals.is_empty() {
            trace!(target: "platform", "{:?} produced no lifecycle signal", event);
            return 0;
        }

        for signal in signals {
            let delivered = self.center.post(signal);
            debug!(target: "platform", "Posted {:?} to {} subscribers", signal, delivered);
        }

        self.coordinator.process_lifecycle_events()
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
                true
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
                false
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn coordinator(&self) -> &GameCoordinator<K> {
        &self.coordinator
    }
}

//=== Winit Integration ===================================================

impl<K: StateKind> ApplicationHandler for Platform<K> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            self.dispatch(AppEvent::Launched);
        }
    }

    /// Called on startup and on every mobile resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && !self.create_window(event_loop) {
            return;
        }

        self.dispatch(AppEvent::Resumed);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispatch(AppEvent::Suspended);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                trace!(target: "platform", "Window focus changed: {}", focused);
                self.dispatch(AppEvent::Focused(focused));
            }

            _ => {}
        }
    }

    /// Applies signals posted to the center from other threads.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.coordinator.process_lifecycle_events();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(
            target: "platform",
            "Event loop exiting in state {:?}",
            self.coordinator.current_kind()
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::test_support::*;
    use crate::core::lifecycle::LifecycleSignal;

    fn config() -> WindowConfig {
        WindowConfig {
            title: "Test".to_string(),
            width: 320,
            height: 240,
        }
    }

    fn platform() -> (Platform<GamePhase>, Journal) {
        let fixture = Fixture::with_loading_scene();
        let journal = fixture.journal.clone();
        (Platform::new(config(), fixture.center, fixture.coordinator), journal)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (platform, _) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(!platform.coordinator().entered_initial_state());
    }

    #[test]
    fn launch_alone_does_not_bootstrap() {
        let (mut platform, journal) = platform();

        assert_eq!(platform.dispatch(AppEvent::Launched), 1);

        assert!(!platform.coordinator().entered_initial_state());
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn resume_bootstraps_initial_state() {
        let (mut platform, journal) = platform();
        platform.dispatch(AppEvent::Launched);

        assert_eq!(platform.dispatch(AppEvent::Resumed), 1);

        assert_eq!(platform.coordinator().current_kind(), Some(GamePhase::Loading));
        assert_eq!(journal.entries(), vec!["enter Loading"]);
    }

    #[test]
    fn focus_after_resume_is_not_a_second_activation() {
        let (mut platform, journal) = platform();
        platform.dispatch(AppEvent::Launched);
        platform.dispatch(AppEvent::Resumed);

        assert_eq!(platform.dispatch(AppEvent::Focused(true)), 0);
        assert_eq!(journal.entries(), vec!["enter Loading"]);
    }

    #[test]
    fn suspend_resume_cycle_reaches_scene() {
        let (mut platform, journal) = platform();
        platform.dispatch(AppEvent::Resumed);
        journal.clear();

        platform.dispatch(AppEvent::Suspended);
        platform.dispatch(AppEvent::Resumed);

        assert_eq!(
            journal.entries(),
            vec![
                "loading will resign active",
                "loading did enter background",
                "loading will enter foreground",
                "loading did become active",
            ]
        );
    }

    #[test]
    fn foreign_posts_are_applied_on_pump() {
        let (mut platform, journal) = platform();
        platform.dispatch(AppEvent::Resumed);
        journal.clear();

        let center = platform.center.clone();
        std::thread::spawn(move || {
            center.post(LifecycleSignal::WillResignActive);
        })
        .join()
        .unwrap();

        assert_eq!(platform.coordinator.process_lifecycle_events(), 1);
        assert_eq!(journal.entries(), vec!["loading will resign active"]);
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn window_config_is_cloneable() {
        let config = config();
        assert_eq!(config.clone(), config);
    }
}
