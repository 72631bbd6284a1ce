//=========================================================================
// Lifecycle Notification Center
//=========================================================================
//
// Fan-out of lifecycle signals to subscriber channels.
//
// Architecture:
//   subscribe(signal, Sender) → SubscriptionId
//   post(signal)              → every matching Sender, in subscription order
//   cancel(&[ids])            → removed under a single lock
//
// Senders are cloned out of the table before delivery so a bounded
// subscriber channel can never block other callers on the table lock.
// Subscribers whose receiver is gone are pruned on the next post.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::Sender;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::LifecycleSignal;

//=== SubscriptionId ======================================================

/// Handle identifying one subscription on a [`LifecycleCenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

//=== LifecycleCenter =====================================================

struct Subscriber {
    id: SubscriptionId,
    signal: LifecycleSignal,
    sender: Sender<LifecycleSignal>,
}

#[derive(Default)]
struct CenterState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Shared hub distributing lifecycle signals to subscribed channels.
///
/// Cloning produces another handle to the same subscriber table.
#[derive(Clone, Default)]
pub struct LifecycleCenter {
    state: Arc<Mutex<CenterState>>,
}

impl LifecycleCenter {
    //--- Construction -----------------------------------------------------

    /// Creates a center with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Subscription -----------------------------------------------------

    /// Delivers every future `signal` to `sender`.
    pub fn subscribe(&self, signal: LifecycleSignal, sender: Sender<LifecycleSignal>) -> SubscriptionId {
        let mut state = self.lock();
        Self::insert(&mut state, signal, sender)
    }

    /// Subscribes `sender` to each of `signals` under a single lock.
    ///
    /// The returned set cancels all of them together when dropped.
    pub fn subscribe_all(
        &self,
        signals: &[LifecycleSignal],
        sender: Sender<LifecycleSignal>,
    ) -> SubscriptionSet {
        let ids = {
            let mut state = self.lock();
            signals
                .iter()
                .map(|&signal| Self::insert(&mut state, signal, sender.clone()))
                .collect()
        };

        SubscriptionSet {
            center: self.clone(),
            ids,
        }
    }

    /// Removes the given subscriptions, returning how many were active.
    pub fn cancel(&self, ids: &[SubscriptionId]) -> usize {
        let mut state = self.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|s| !ids.contains(&s.id));
        before - state.subscribers.len()
    }

    //--- Delivery ---------------------------------------------------------

    /// Sends `signal` to every subscriber of it.
    ///
    /// Returns the number of channels the signal was delivered to.
    pub fn post(&self, signal: LifecycleSignal) -> usize {
        let targets: Vec<(SubscriptionId, Sender<LifecycleSignal>)> = self
            .lock()
            .subscribers
            .iter()
            .filter(|s| s.signal == signal)
            .map(|s| (s.id, s.sender.clone()))
            .collect();

        let mut delivered = 0;
        let mut disconnected = Vec::new();

        for (id, sender) in targets {
            if sender.send(signal).is_ok() {
                delivered += 1;
            } else {
                disconnected.push(id);
            }
        }

        if !disconnected.is_empty() {
            debug!("Pruning {} disconnected lifecycle subscribers", disconnected.len());
            self.cancel(&disconnected);
        }

        trace!("Posted {:?} to {} subscribers", signal, delivered);
        delivered
    }

    //--- Query API --------------------------------------------------------

    /// Number of active subscriptions across all signals.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(
        state: &mut CenterState,
        signal: LifecycleSignal,
        sender: Sender<LifecycleSignal>,
    ) -> SubscriptionId {
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.subscribers.push(Subscriber { id, signal, sender });
        id
    }

    fn lock(&self) -> MutexGuard<'_, CenterState> {
        // A panic while holding the lock cannot leave the table half-edited.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for LifecycleCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleCenter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

//=== SubscriptionSet =====================================================

/// Group of subscriptions cancelled together.
///
/// Dropping the set cancels every subscription it holds.
pub struct SubscriptionSet {
    center: LifecycleCenter,
    ids: Vec<SubscriptionId>,
}

impl SubscriptionSet {
    /// Subscription handles in creation order.
    pub fn ids(&self) -> &[SubscriptionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Cancels every subscription in the set.
    pub fn cancel_all(&mut self) {
        if self.ids.is_empty() {
            return;
        }

        let cancelled = self.center.cancel(&self.ids);
        debug!("Cancelled {} lifecycle subscriptions", cancelled);
        self.ids.clear();
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
