//! The injected data registry.
//!
//! Species and move tables are read-only external data: something upstream
//! loads and validates them, then hands the engine a `Dex`. The engine
//! threads a `&Dex` through turn resolution instead of consulting a global
//! store, so tests and embedders can supply whatever tables they want.

use std::collections::HashMap;

use schema::{MoveData, SpeciesData};

use crate::errors::{DexError, DexResult};

#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: HashMap<String, SpeciesData>,
    moves: HashMap<String, MoveData>,
    items: Vec<String>,
}

impl Dex {
    pub fn new(
        species: impl IntoIterator<Item = SpeciesData>,
        moves: impl IntoIterator<Item = MoveData>,
    ) -> Self {
        Dex {
            species: species
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
            moves: moves.into_iter().map(|m| (m.name.clone(), m)).collect(),
            items: Vec::new(),
        }
    }

    /// Attach the global held-item name list.
    pub fn with_items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn species(&self, name: &str) -> DexResult<&SpeciesData> {
        self.species
            .get(name)
            .ok_or_else(|| DexError::UnknownSpecies(name.to_string()))
    }

    pub fn move_data(&self, name: &str) -> DexResult<&MoveData> {
        self.moves
            .get(name)
            .ok_or_else(|| DexError::UnknownMove(name.to_string()))
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}
