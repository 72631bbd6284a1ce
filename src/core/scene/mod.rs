//=========================================================================
// Scene System
//=========================================================================
//
// Collaborator interfaces for scenes and the surface presenting them.
//
// Scenes are shared: the coordinator tracks the current one while the
// presentation layer may hold it too. The surface is never owned by the
// coordinator; it only keeps a `Weak` back-reference.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Shared Handles ======================================================

/// Shared handle to a scene.
pub type SharedScene = Rc<RefCell<dyn Scene>>;

/// Wraps a scene into a [`SharedScene`].
pub fn share_scene<S: Scene + 'static>(scene: S) -> SharedScene {
    Rc::new(RefCell::new(scene))
}

//=== Scene Trait =========================================================

/// Presentation/simulation unit receiving application lifecycle hooks.
///
/// Every hook defaults to doing nothing:
///
/// ```rust
/// # use aetheric_gamekit::prelude::*;
/// struct TitleScene {
///     paused: bool,
/// }
///
/// impl Scene for TitleScene {
///     fn application_will_resign_active(&mut self) {
///         self.paused = true;
///     }
///
///     fn application_did_become_active(&mut self) {
///         self.paused = false;
///     }
/// }
/// ```
pub trait Scene {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn application_will_enter_foreground(&mut self) {}

    fn application_did_become_active(&mut self) {}

    fn application_will_resign_active(&mut self) {}

    fn application_did_enter_background(&mut self) {}
}

//=== Presentation Surface ================================================

/// View that displays the coordinator's current scene.
///
/// The surface's lifetime is managed by the host application.
pub trait PresentationSurface {
    /// Called when `scene` becomes the current scene.
    fn present_scene(&self, _scene: &SharedScene) {}
}
