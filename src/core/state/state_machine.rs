//=========================================================================
// State Machine
//=========================================================================
//
// Enforces legal transitions between a fixed set of registered states.
//
// Legality is decided entirely by the current state's predicate; before
// the first entry every registered kind may be entered. Transitions are
// all-or-nothing: a rejected `enter` leaves no trace.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{State, StateKind};
use crate::core::error::ConfigurationError;

//=== State Machine =======================================================

/// Finite state machine over a fixed set of states, at most one per kind.
///
/// The machine starts uninitialized (no current state). Every successful
/// [`enter`](Self::enter) runs the outgoing state's exit hook, commits the
/// new current kind, then runs the incoming state's entry hook.
pub struct StateMachine<K: StateKind, C> {
    states: Vec<Box<dyn State<K, C>>>,
    index: HashMap<K, usize>,
    current: Option<K>,
}

impl<K: StateKind, C> StateMachine<K, C> {
    //--- Construction -----------------------------------------------------

    /// Builds a machine over `states`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateStateKind`] if two states
    /// report the same kind.
    pub fn new(states: Vec<Box<dyn State<K, C>>>) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(states.len());

        for (position, state) in states.iter().enumerate() {
            let kind = state.kind();
            if index.insert(kind, position).is_some() {
                return Err(ConfigurationError::DuplicateStateKind(format!("{:?}", kind)));
            }
        }

        debug!("State machine created with {} states", states.len());

        Ok(Self {
            states,
            index,
            current: None,
        })
    }

    //--- Transitions ------------------------------------------------------

    /// Returns true if `kind` is registered and the current state (if any)
    /// allows moving to it.
    pub fn can_enter(&self, kind: K) -> bool {
        if !self.index.contains_key(&kind) {
            return false;
        }

        match self.current_state() {
            Some(current) => current.is_valid_next_state(kind),
            None => true,
        }
    }

    /// Moves the machine to `kind`.
    ///
    /// Returns false without touching any state when the transition is
    /// not legal.
    pub fn enter(&mut self, kind: K, context: &mut C) -> bool {
        if !self.can_enter(kind) {
            trace!("Rejected transition {:?} -> {:?}", self.current, kind);
            return false;
        }

        let previous = self.current;

        if let Some(outgoing) = previous.and_then(|prev| self.state_mut(prev)) {
            outgoing.will_exit(kind, context);
        }

        self.current = Some(kind);
        debug!("State transition {:?} -> {:?}", previous, kind);

        if let Some(incoming) = self.state_mut(kind) {
            incoming.did_enter(previous, context);
        }

        true
    }

    //--- Queries ----------------------------------------------------------

    /// Kind of the current state, `None` before the first entry.
    pub fn current_kind(&self) -> Option<K> {
        self.current
    }

    /// The current state, `None` before the first entry.
    pub fn current_state(&self) -> Option<&dyn State<K, C>> {
        self.current.and_then(|kind| self.state(kind))
    }

    /// The registered state for `kind`.
    pub fn state(&self, kind: K) -> Option<&dyn State<K, C>> {
        self.index.get(&kind).map(|&position| &*self.states[position])
    }

    /// Returns true if a state is registered for `kind`.
    pub fn contains(&self, kind: K) -> bool {
        self.index.contains_key(&kind)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.states.iter().map(|state| state.kind())
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no states are registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn state_mut(&mut self, kind: K) -> Option<&mut Box<dyn State<K, C>>> {
        let position = *self.index.get(&kind)?;
        self.states.get_mut(position)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
