//=========================================================================
// Game Context
//=========================================================================
//
// Coordinator-owned data handed to game state hooks.
//
// Contains:
// - world: the long-lived world entity
// - current_scene: shared handle to the active scene
// - surface: non-owning back-reference to the presentation surface
// - observers: will-change subscribers
//
// Every mutation of the current scene notifies observers first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::{Rc, Weak};

//=== Internal Dependencies ===============================================

use super::observer::{ChangeObservers, CoordinatorChange};
use crate::core::diagnostics::Diagnostics;
use crate::core::entity::Entity;
use crate::core::scene::{PresentationSurface, SharedScene};
use crate::core::state::StateKind;

//=== GameContext =========================================================

/// Shared data game states act on during their entry and exit hooks.
pub struct GameContext<K: StateKind> {
    world: Entity,
    current_scene: Option<SharedScene>,
    surface: Option<Weak<dyn PresentationSurface>>,
    pub(crate) observers: ChangeObservers<K>,
    diagnostics: Diagnostics,
}

impl<K: StateKind> GameContext<K> {
    pub(crate) fn new(world: Entity, diagnostics: Diagnostics) -> Self {
        Self {
            world,
            current_scene: None,
            surface: None,
            observers: ChangeObservers::new(),
            diagnostics,
        }
    }

    //--- World ------------------------------------------------------------

    /// The coordinator's world entity.
    pub fn world(&self) -> &Entity {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut Entity {
        &mut self.world
    }

    //--- Scenes -----------------------------------------------------------

    /// The current scene, if any.
    pub fn current_scene(&self) -> Option<SharedScene> {
        self.current_scene.clone()
    }

    /// Makes `scene` current and hands it to the surface.
    ///
    /// Observers are notified before the scene is swapped. Without a live
    /// surface the scene still becomes current; it simply is not shown.
    pub fn present_scene(&mut self, scene: SharedScene) {
        self.observers.notify(CoordinatorChange::Scene);
        self.current_scene = Some(scene.clone());

        match self.surface() {
            Some(surface) => surface.present_scene(&scene),
            None => self.diagnostics.debug(format_args!(
                "Scene {} became current without a presentation surface",
                Self::scene_name(&scene)
            )),
        }
    }

    /// Clears the current scene, returning it.
    pub fn dismiss_scene(&mut self) -> Option<SharedScene> {
        if self.current_scene.is_none() {
            return None;
        }

        self.observers.notify(CoordinatorChange::Scene);
        self.current_scene.take()
    }

    //--- Surface ----------------------------------------------------------

    /// Returns true if a presentation surface is attached and still alive.
    pub fn has_surface(&self) -> bool {
        self.surface().is_some()
    }

    pub(crate) fn attach_surface(&mut self, surface: Weak<dyn PresentationSurface>) {
        self.surface = Some(surface);
    }

    pub(crate) fn detach_surface(&mut self) {
        self.surface = None;
    }

    fn surface(&self) -> Option<Rc<dyn PresentationSurface>> {
        self.surface.as_ref().and_then(Weak::upgrade)
    }

    //--- Diagnostics ------------------------------------------------------

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn scene_name(scene: &SharedScene) -> String {
        match scene.try_borrow() {
            Ok(scene) => scene.name().to_string(),
            Err(_) => "<busy>".to_string(),
        }
    }
}
