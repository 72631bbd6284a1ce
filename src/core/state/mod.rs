//=========================================================================
// State System
//=========================================================================
//
// Named, enterable phases and the machine that moves between them.
//
// Architecture:
//   StateMachine<K, C>
//     ├─ states: Vec<Box<dyn State<K, C>>>   (registration order)
//     ├─ index: HashMap<K, usize>            (one state per kind)
//     └─ current: Option<K>
//
// Flow:
//   can_enter(k) → current.is_valid_next_state(k)
//   enter(k)     → current.will_exit() → current = k → k.did_enter()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Module Declarations =================================================

mod state_machine;

//=== Public API ==========================================================

pub use state_machine::StateMachine;

//=== State Kind Trait ====================================================

/// Marker trait for state identifiers.
///
/// A state kind is the tag a [`StateMachine`] uses to look up, compare and
/// transition between states. Typically implemented by game-specific enums.
pub trait StateKind: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== State Trait =========================================================

/// One phase of the application, registered once in a [`StateMachine`].
///
/// `C` is the context handed to the entry and exit hooks, letting a state
/// act on whatever owns the machine.
///
/// # Minimal Implementation
///
/// Only `kind()` is required. The predicate defaults to allowing every
/// registered kind and both hooks default to doing nothing:
///
/// ```rust
/// # use aetheric_gamekit::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Phase { Menu, Playing }
/// impl StateKind for Phase {}
///
/// struct Menu;
///
/// impl State<Phase, ()> for Menu {
///     fn kind(&self) -> Phase {
///         Phase::Menu
///     }
///
///     fn is_valid_next_state(&self, next: Phase) -> bool {
///         next == Phase::Playing
///     }
/// }
/// ```
pub trait State<K: StateKind, C> {
    /// The kind this state is registered under.
    fn kind(&self) -> K;

    /// Whether the machine may move from this state to `next`.
    fn is_valid_next_state(&self, _next: K) -> bool {
        true
    }

    /// Called after this state became current.
    ///
    /// `previous` is `None` on the machine's first entry.
    fn did_enter(&mut self, _previous: Option<K>, _context: &mut C) {}

    /// Called before the machine leaves this state for `next`.
    fn will_exit(&mut self, _next: K, _context: &mut C) {}
}
