//=========================================================================
// Configuration Errors
//=========================================================================
//
// Construction-time failures for state machines and coordinators.
//
// These indicate programming errors (bad state tables), not runtime
// conditions. Builders panic with the `Display` message; the `try_*`
// constructors surface them as values instead.
//
//=========================================================================

//=== ConfigurationError ==================================================

/// Invalid state configuration detected at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two registered states report the same state kind.
    DuplicateStateKind(String),

    /// The designated initial state kind is not among the registered states.
    MissingInitialState(String),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStateKind(kind) => {
                write!(f, "State kind {} is registered more than once", kind)
            }
            Self::MissingInitialState(kind) => {
                write!(f, "Initial state {} is not a registered state", kind)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

//=========================================================================
// Unit Tests
//=========================================================================
