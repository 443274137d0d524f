// Shared data-model definitions for the pokemon-duel battle engine.
// This crate contains the immutable shapes of the injected game data
// (species tables, move tables, the type chart, natures) so that the
// engine and any out-of-band loader/team-builder tooling agree on them.

pub use moves::*;
pub use natures::*;
pub use species::*;
pub use stats::*;
pub use types::*;

pub mod moves;
pub mod natures;
pub mod species;
pub mod stats;
pub mod types;
