//=========================================================================
// Application Lifecycle
//=========================================================================
//
// OS-level application lifecycle signals and their distribution.
//
// Architecture:
//   Platform ──post()──> LifecycleCenter ──Sender──> subscriber channels
//                              │
//                              └─ SubscriptionSet (cancel-all on drop)
//
//=========================================================================

//=== Module Declarations =================================================

mod notification_center;

//=== Public API ==========================================================

pub use notification_center::{LifecycleCenter, SubscriptionId, SubscriptionSet};

//=== LifecycleSignal =====================================================

/// Application lifecycle notifications, in the order a typical launch
/// produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSignal {
    /// The process finished launching.
    DidFinishLaunching,

    /// The application is about to leave the background.
    WillEnterForeground,

    /// The application became active and receives input.
    DidBecomeActive,

    /// The application is about to stop receiving input.
    WillResignActive,

    /// The application moved to the background.
    DidEnterBackground,
}

impl LifecycleSignal {
    /// Every signal, in lifecycle order.
    pub const ALL: [LifecycleSignal; 5] = [
        LifecycleSignal::DidFinishLaunching,
        LifecycleSignal::WillEnterForeground,
        LifecycleSignal::DidBecomeActive,
        LifecycleSignal::WillResignActive,
        LifecycleSignal::DidEnterBackground,
    ];
}
