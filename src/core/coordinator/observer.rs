//=========================================================================
// Change Observers
//=========================================================================
//
// Will-change notification fan-out for the coordinator.
//
// Pattern: notify(change) → callbacks (registration order) → channels
//          → caller mutates
//
// Observers hear about a change before it lands, so a UI layer can
// invalidate derived values and re-read once the coordinator returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== Internal Dependencies ===============================================

use crate::core::state::StateKind;

//=== CoordinatorChange ===================================================

/// Mutation the coordinator is about to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorChange<K: StateKind> {
    /// The current game state is about to move from `from` to `to`.
    State { from: Option<K>, to: K },

    /// The current scene is about to be replaced or dismissed.
    Scene,
}

//=== ObserverId ==========================================================

/// Handle returned by [`observe`](crate::core::GameCoordinator::observe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

//=== ChangeObservers =====================================================

type ChangeCallback<K> = Box<dyn FnMut(&CoordinatorChange<K>)>;

pub(crate) struct ChangeObservers<K: StateKind> {
    next_id: u64,
    callbacks: Vec<(ObserverId, ChangeCallback<K>)>,
    channels: Vec<Sender<CoordinatorChange<K>>>,
}

impl<K: StateKind> ChangeObservers<K> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
            channels: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    pub(crate) fn observe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&CoordinatorChange<K>) + 'static,
    {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(observer, _)| *observer != id);
        self.callbacks.len() != before
    }

    /// Opens a channel that receives every future notification.
    pub(crate) fn receiver(&mut self) -> Receiver<CoordinatorChange<K>> {
        let (tx, rx) = unbounded();
        self.channels.push(tx);
        rx
    }

    //--- Notification -----------------------------------------------------

    /// Delivers `change` to every observer, returning how many were reached.
    pub(crate) fn notify(&mut self, change: CoordinatorChange<K>) -> usize {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(&change);
        }

        // Dropped receivers are pruned here.
        self.channels.retain(|tx| tx.send(change).is_ok());

        self.callbacks.len() + self.channels.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len() + self.channels.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
