//! pokemon-duel battle engine
//!
//! A deterministic two-player creature battle engine: actions go in, an
//! ordered list of atomic state events comes out. The RNG seed lives
//! inside the battle state, so a host and a peer holding the same snapshot
//! and the same actions resolve identical turns, which is what the wire
//! protocol in `net` relies on.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod dex;
pub mod errors;
pub mod net;
pub mod rng;
pub mod side;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// Core data definitions from the `schema` crate.
pub use schema::{
    dual_effectiveness, effectiveness, AilmentKind, BaseStats, DamageClass, MoveData, MoveKind,
    MoveMeta, MoveTarget, Nature, SpeciesData, StatChange, StatKind, Type,
};

// Turn resolution.
pub use battle::engine::{process_turn, validate_action};
pub use battle::events::{EventQueue, StateEvent};
pub use battle::state::{BattleState, TurnKind, TurnResult, Weather};

// The heuristic opponent.
pub use battle::ai::{HeuristicOpponent, Opponent};

// Core runtime types.
pub use combatant::{Ability, Ailment, Combatant, MoveSlot};
pub use dex::Dex;
pub use rng::BattleRng;
pub use side::{Action, Side, SideId, TurnClock};

// Wire surface.
pub use net::{NetError, PeerLink, WireMessage};

// Crate-specific error and result types.
pub use errors::{ActionError, DexError, EngineError, EngineResult, StateError};
