use crate::battle::state::BattleState;
use crate::combatant::Combatant;
use crate::dex::Dex;
use crate::rng::BattleRng;
use crate::side::Side;
use crate::teams::{demo_dex, make_combatant};

/// The shared test dex.
pub fn dex() -> Dex {
    demo_dex()
}

/// A combatant with full IVs, neutral nature, and the species' first
/// ability. Tests tweak fields directly afterwards when they need a
/// status, an ability override, or a specific HP.
pub fn combatant(dex: &Dex, species: &str, level: u8, moves: &[&str]) -> Combatant {
    make_combatant(dex, species, level, moves)
        .unwrap_or_else(|err| panic!("failed to build {}: {}", species, err))
}

/// A 1v1 battle with a fixed seed.
pub fn battle_1v1(host: Combatant, client: Combatant, seed: u64) -> BattleState {
    battle(vec![host], vec![client], seed)
}

/// A battle over full teams with a fixed seed.
pub fn battle(host_team: Vec<Combatant>, client_team: Vec<Combatant>, seed: u64) -> BattleState {
    BattleState::new(
        Side::new("Host", host_team, 300),
        Side::new("Client", client_team, 300),
        BattleRng::from_seed(seed, seed.rotate_left(17) ^ 0xdead_beef),
    )
}
