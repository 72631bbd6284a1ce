//=========================================================================
// World Entity
//=========================================================================
//
// Named, type-keyed component container.
//
// Architecture:
//   Entity
//     ├─ id: EntityId          (process-unique)
//     ├─ name: String
//     └─ components: HashMap<TypeId, Box<dyn Any>>
//
// One component per type. The coordinator owns a single entity for data
// that must survive scene and state changes (scores, settings, progress).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Component Trait =====================================================

/// Marker trait for types that can be stored on an [`Entity`].
///
/// Automatically implemented for all `'static` types.
pub trait Component: 'static {}

// Blanket implementation
impl<T: 'static> Component for T {}

//=== EntityId ============================================================

/// Process-unique entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Entity ==============================================================

/// Long-lived data container addressed by component type.
pub struct Entity {
    id: EntityId,
    name: String,
    components: HashMap<TypeId, Box<dyn Any>>,
}

impl Entity {
    //--- Construction -----------------------------------------------------

    /// Creates an empty entity with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::next(),
            name: name.into(),
            components: HashMap::new(),
        }
    }

    //--- Identity ---------------------------------------------------------

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    //--- Component Operations ---------------------------------------------

    /// Stores `component`, returning the previous value of the same type.
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        self.components
            .insert(TypeId::of::<T>(), Box::new(component))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Returns the component of type `T`, if present.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref::<T>())
    }

    /// Returns the component of type `T` mutably, if present.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|c| c.downcast_mut::<T>())
    }

    /// Removes and returns the component of type `T`.
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        self.components
            .remove(&TypeId::of::<T>())
            .and_then(|c| c.downcast::<T>().ok())
            .map(|c| *c)
    }

    /// Returns true if a component of type `T` is stored.
    pub fn contains<T: Component>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<T>())
    }

    //--- Query API --------------------------------------------------------

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Drops every component, keeping id and name.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
