use serde::{Deserialize, Serialize};

use crate::stats::BaseStats;
use crate::types::Type;

/// The immutable definition of a species. The engine queries these by name
/// through an injected registry; where the data comes from is not its
/// concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub dex_number: u16,
    pub name: String,
    pub types: (Type, Option<Type>),
    pub base_stats: BaseStats,
    /// Abilities a member of this species may carry, normal ones first.
    pub abilities: Vec<String>,
    /// Moves a member of this species may know.
    pub moves: Vec<String>,
}

impl SpeciesData {
    pub fn can_learn(&self, move_name: &str) -> bool {
        self.moves.iter().any(|m| m == move_name)
    }
}
