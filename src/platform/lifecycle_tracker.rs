//=========================================================================
// Lifecycle Tracker
//
// Converts winit application callbacks into ordered `LifecycleSignal`s.
//
// Responsibilities:
// - Emit `DidFinishLaunching` exactly once, before anything else
// - Pair suspend/resume with resign/background and foreground/active
// - Suppress duplicates (focus gain right after `resumed`, repeated
//   focus loss, resume without a prior suspend)
//
// Notes:
// Desktop platforms never suspend, so activity there is driven by window
// focus alone. Mobile platforms drive it through resume/suspend.
//
//=========================================================================

use crate::core::lifecycle::LifecycleSignal;

//=== AppEvent ============================================================
//
// The subset of winit callbacks that affect the application lifecycle.
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppEvent {
    Launched,
    Resumed,
    Suspended,
    Focused(bool),
}

//=== LifecycleTracker ====================================================

#[derive(Debug, Default)]
pub(crate) struct LifecycleTracker {
    launched: bool,
    active: bool,
    backgrounded: bool,
}

impl LifecycleTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- translate() ------------------------------------------------------
    //
    // Updates the tracked state and returns the signals `event` implies,
    // in delivery order. Returns an empty Vec for redundant events.
    //
    pub(crate) fn translate(&mut self, event: AppEvent) -> Vec<LifecycleSignal> {
        let mut signals = Vec::with_capacity(2);

        match event {
            AppEvent::Launched => self.launch(&mut signals),

            AppEvent::Resumed => {
                self.launch(&mut signals);

                if self.backgrounded {
                    self.backgrounded = false;
                    signals.push(LifecycleSignal::WillEnterForeground);
                }
                self.activate(&mut signals);
            }

            AppEvent::Suspended => {
                self.resign(&mut signals);

                if !self.backgrounded {
                    self.backgrounded = true;
                    signals.push(LifecycleSignal::DidEnterBackground);
                }
            }

            AppEvent::Focused(true) => {
                // Focus cannot reactivate a backgrounded app; resume does.
                if self.launched && !self.backgrounded {
                    self.activate(&mut signals);
                }
            }

            AppEvent::Focused(false) => self.resign(&mut signals),
        }

        signals
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub(crate) fn is_backgrounded(&self) -> bool {
        self.backgrounded
    }

    //--- Internal Helpers -------------------------------------------------

    fn launch(&mut self, signals: &mut Vec<LifecycleSignal>) {
        if !self.launched {
            self.launched = true;
            signals.push(LifecycleSignal::DidFinishLaunching);
        }
    }

    fn activate(&mut self, signals: &mut Vec<LifecycleSignal>) {
        if !self.active {
            self.active = true;
            signals.push(LifecycleSignal::DidBecomeActive);
        }
    }

    fn resign(&mut self, signals: &mut Vec<LifecycleSignal>) {
        if self.active {
            self.active = false;
            signals.push(LifecycleSignal::WillResignActive);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
