//=========================================================================
// Lifecycle Bridge
//=========================================================================
//
// Routes application lifecycle signals to the current scene, and
// bootstraps the initial state on first activation.
//
// Routing:
//   DidFinishLaunching   → log only
//   WillEnterForeground  → scene.application_will_enter_foreground()
//   DidBecomeActive      → scene.application_did_become_active()
//                          else (no scene, not bootstrapped)
//                            → enter_initial_state()
//   WillResignActive     → scene.application_will_resign_active()
//   DidEnterBackground   → scene.application_did_enter_background()
//
// Forwarding to an existing scene takes precedence over bootstrap, so a
// scene presented by the initial state never receives a second
// activation for the same signal.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{GameContext, GameCoordinator};
use crate::core::lifecycle::LifecycleSignal;
use crate::core::scene::Scene;
use crate::core::state::StateKind;

//=== Lifecycle Handling ==================================================

impl<K: StateKind> GameCoordinator<K> {
    /// Applies one lifecycle signal.
    pub fn handle_lifecycle(&mut self, signal: LifecycleSignal) {
        match signal {
            LifecycleSignal::DidFinishLaunching => {
                self.context
                    .diagnostics()
                    .info(format_args!("Application did finish launching"));
            }

            LifecycleSignal::WillEnterForeground => {
                self.forward_to_scene(signal, |scene| scene.application_will_enter_foreground());
            }

            LifecycleSignal::DidBecomeActive => {
                let forwarded =
                    self.forward_to_scene(signal, |scene| scene.application_did_become_active());

                if !forwarded && !self.entered_initial_state {
                    self.context.diagnostics().debug(format_args!(
                        "First activation without a scene, entering initial state {:?}",
                        self.initial_state
                    ));
                    self.enter_initial_state();
                }
            }

            LifecycleSignal::WillResignActive => {
                self.forward_to_scene(signal, |scene| scene.application_will_resign_active());
            }

            LifecycleSignal::DidEnterBackground => {
                self.forward_to_scene(signal, |scene| scene.application_did_enter_background());
            }
        }
    }

    /// Handles every signal delivered since the last call, in order.
    ///
    /// Returns the number of signals handled.
    pub fn process_lifecycle_events(&mut self) -> usize {
        let mut handled = 0;

        while let Ok(signal) = self.lifecycle.try_recv() {
            self.handle_lifecycle(signal);
            handled += 1;
        }

        handled
    }

    /// Number of live lifecycle subscriptions held by this coordinator.
    pub fn lifecycle_subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Calls `hook` on the current scene. Returns false if there is no scene.
    fn forward_to_scene<F>(&self, signal: LifecycleSignal, hook: F) -> bool
    where
        F: FnOnce(&mut dyn Scene),
    {
        let Some(scene) = self.context.current_scene() else {
            return false;
        };

        match scene.try_borrow_mut() {
            Ok(mut scene) => hook(&mut *scene),
            Err(_) => {
                self.context.diagnostics().warn(format_args!(
                    "Scene {} is borrowed elsewhere, dropping {:?}",
                    GameContext::<K>::scene_name(&scene),
                    signal
                ));
            }
        }

        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::core::lifecycle::LifecycleSignal;
    use log::Level;

    //=====================================================================
    // Subscription Tests
    //=====================================================================

    #[test]
    fn coordinator_subscribes_to_every_signal() {
        let fixture = Fixture::new();
        assert_eq!(fixture.coordinator.lifecycle_subscription_count(), 5);
        assert_eq!(fixture.center.subscriber_count(), 5);
    }

    #[test]
    fn dropping_coordinator_cancels_subscriptions() {
        let Fixture {
            center, coordinator, ..
        } = Fixture::new();
        assert_eq!(center.subscriber_count(), 5);

        drop(coordinator);

        assert_eq!(center.subscriber_count(), 0);
        assert_eq!(center.post(LifecycleSignal::DidBecomeActive), 0);
    }

    #[test]
    fn process_returns_number_of_handled_signals() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.coordinator.process_lifecycle_events(), 0);

        fixture.center.post(LifecycleSignal::DidFinishLaunching);
        fixture.center.post(LifecycleSignal::DidBecomeActive);

        assert_eq!(fixture.coordinator.process_lifecycle_events(), 2);
        assert_eq!(fixture.coordinator.process_lifecycle_events(), 0);
    }

    //=====================================================================
    // Bootstrap Tests
    //=====================================================================

    #[test]
    fn first_activation_without_scene_enters_initial_state() {
        let mut fixture = Fixture::new();

        fixture.signal(LifecycleSignal::DidBecomeActive);

        assert!(fixture.coordinator.entered_initial_state());
        assert_eq!(fixture.coordinator.current_kind(), Some(GamePhase::Loading));
    }

    #[test]
    fn activation_with_scene_forwards_instead_of_bootstrapping() {
        let mut fixture = Fixture::new();
        let scene = RecordingScene::shared("title", &fixture.journal);
        fixture.coordinator.present_scene(scene);

        fixture.signal(LifecycleSignal::DidBecomeActive);

        assert!(!fixture.coordinator.entered_initial_state());
        assert_eq!(fixture.coordinator.current_kind(), None);
        assert_eq!(fixture.journal.entries(), vec!["title did become active"]);
    }

    #[test]
    fn scene_from_initial_state_is_not_activated_twice() {
        let mut fixture = Fixture::with_loading_scene();

        fixture.signal(LifecycleSignal::DidBecomeActive);

        assert!(fixture.coordinator.entered_initial_state());
        assert_eq!(fixture.journal.entries(), vec!["enter Loading"]);

        fixture.signal(LifecycleSignal::DidBecomeActive);

        assert_eq!(
            fixture.journal.entries(),
            vec!["enter Loading", "loading did become active"]
        );
    }

    #[test]
    fn later_activations_without_scene_do_nothing() {
        let mut fixture = Fixture::new();
        fixture.signal(LifecycleSignal::DidBecomeActive);
        fixture.journal.clear();

        fixture.signal(LifecycleSignal::DidBecomeActive);

        assert!(fixture.journal.entries().is_empty());
        assert!(fixture.logger.messages(Level::Info).iter().all(|m| !m.contains("already entered")));
    }

    #[test]
    fn launch_signal_only_logs() {
        let mut fixture = Fixture::new();

        fixture.signal(LifecycleSignal::DidFinishLaunching);

        assert!(!fixture.coordinator.entered_initial_state());
        assert_eq!(
            fixture.logger.messages(Level::Info),
            vec!["Application did finish launching"]
        );
    }

    //=====================================================================
    // Forwarding Tests
    //=====================================================================

    #[test]
    fn full_background_cycle_reaches_scene_in_order() {
        let mut fixture = Fixture::with_loading_scene();
        fixture.signal(LifecycleSignal::DidFinishLaunching);
        fixture.signal(LifecycleSignal::DidBecomeActive);
        fixture.journal.clear();

        fixture.center.post(LifecycleSignal::WillResignActive);
        fixture.center.post(LifecycleSignal::DidEnterBackground);
        fixture.center.post(LifecycleSignal::WillEnterForeground);
        fixture.center.post(LifecycleSignal::DidBecomeActive);
        assert_eq!(fixture.coordinator.process_lifecycle_events(), 4);

        assert_eq!(
            fixture.journal.entries(),
            vec![
                "loading will resign active",
                "loading did enter background",
                "loading will enter foreground",
                "loading did become active",
            ]
        );
    }

    #[test]
    fn signals_without_scene_are_dropped_quietly() {
        let mut fixture = Fixture::new();

        fixture.signal(LifecycleSignal::WillEnterForeground);
        fixture.signal(LifecycleSignal::WillResignActive);
        fixture.signal(LifecycleSignal::DidEnterBackground);

        assert!(fixture.journal.entries().is_empty());
        assert!(!fixture.coordinator.entered_initial_state());
    }

    #[test]
    fn busy_scene_drops_signal_with_warning() {
        let mut fixture = Fixture::new();
        let scene = RecordingScene::shared("title", &fixture.journal);
        fixture.coordinator.present_scene(scene.clone());

        let _held = scene.borrow_mut();
        fixture.signal(LifecycleSignal::WillResignActive);

        let warnings = fixture.logger.messages(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("borrowed elsewhere"));
        assert!(warnings[0].contains("WillResignActive"));
    }

    #[test]
    fn handle_lifecycle_applies_signal_directly() {
        let mut fixture = Fixture::new();

        fixture.coordinator.handle_lifecycle(LifecycleSignal::DidBecomeActive);

        assert!(fixture.coordinator.entered_initial_state());
    }
}
