use std::fmt;

/// Main error type for the battle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error related to injected data lookup.
    Dex(DexError),
    /// Error related to an illegal player action.
    Action(ActionError),
    /// Error related to an inconsistent battle state.
    State(StateError),
}

/// Errors related to the injected data registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexError {
    /// The named species is not present in the registry.
    UnknownSpecies(String),
    /// The named move is not present in the registry.
    UnknownMove(String),
}

/// Errors related to player actions. The engine rejects these up front
/// instead of indexing out of bounds deep in turn resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move slot outside 0..4 (and not the Struggle sentinel -1).
    InvalidMoveSlot(i8),
    /// The slot exists but holds no move.
    EmptyMoveSlot(usize),
    /// Switch target outside the team.
    InvalidSwitchTarget(usize),
    /// Switch target has fainted.
    SwitchTargetFainted(usize),
    /// Switch target is already the active combatant.
    SwitchTargetActive(usize),
}

/// Errors related to battle state validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A side has an empty team, which no battle should reach.
    EmptyTeam(usize),
    /// The active index points outside the team.
    ActiveOutOfRange(usize),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Dex(err) => write!(f, "dex error: {}", err),
            EngineError::Action(err) => write!(f, "action error: {}", err),
            EngineError::State(err) => write!(f, "state error: {}", err),
        }
    }
}

impl fmt::Display for DexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DexError::UnknownSpecies(name) => write!(f, "unknown species: {}", name),
            DexError::UnknownMove(name) => write!(f, "unknown move: {}", name),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveSlot(slot) => write!(f, "invalid move slot: {}", slot),
            ActionError::EmptyMoveSlot(slot) => write!(f, "no move in slot {}", slot),
            ActionError::InvalidSwitchTarget(idx) => write!(f, "invalid switch target: {}", idx),
            ActionError::SwitchTargetFainted(idx) => {
                write!(f, "cannot switch to fainted team slot {}", idx)
            }
            ActionError::SwitchTargetActive(idx) => {
                write!(f, "team slot {} is already active", idx)
            }
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::EmptyTeam(side) => write!(f, "side {} has an empty team", side),
            StateError::ActiveOutOfRange(idx) => {
                write!(f, "active index {} outside the team", idx)
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for DexError {}
impl std::error::Error for ActionError {}
impl std::error::Error for StateError {}

impl From<DexError> for EngineError {
    fn from(err: DexError) -> Self {
        EngineError::Dex(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

impl From<StateError> for EngineError {
    fn from(err: StateError) -> Self {
        EngineError::State(err)
    }
}

/// Type alias for Results using EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using DexError.
pub type DexResult<T> = Result<T, DexError>;
