//! A module defining the heuristic opponent used for solo battles.

use ordered_float::OrderedFloat;

use schema::{AilmentKind, MoveTarget, StatKind};

use crate::battle::abilities::effective_speed;
use crate::battle::damage::damage;
use crate::battle::state::BattleState;
use crate::dex::Dex;
use crate::side::{Action, SideId};

/// A trait for any system that can decide on a battle action. This gives
/// the control loop a common interface whether the action comes from a
/// human, the heuristic below, or something smarter.
pub trait Opponent {
    fn choose(&self, state: &BattleState, side: SideId, dex: &Dex) -> Action;
}

/// The built-in opponent. It simulates the damage calculator against every
/// candidate move and falls back through a fixed ladder of preferences.
pub struct HeuristicOpponent;

impl HeuristicOpponent {
    pub fn new() -> Self {
        Self
    }

    /// Best expected damage over the non-empty move slots, crits forced
    /// off. Draws spread rolls from a copy of the seed so evaluation never
    /// consumes the authoritative randomness stream.
    fn best_damage_move(&self, state: &BattleState, side: SideId, dex: &Dex) -> Option<usize> {
        let attacker = state.active(side);
        let defender = state.active(side.opponent());
        let weather = state.weather;
        let mut trial_rng = state.rng;

        let scored: Vec<(usize, f32)> = attacker
            .moves
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| {
                let entry = entry.as_ref()?;
                if entry.pp == 0 {
                    return None;
                }
                let mv = dex.move_data(&entry.name).ok()?;
                let dealt = damage(attacker, defender, mv, false, weather, &mut trial_rng);
                let accuracy = mv.accuracy.unwrap_or(100) as f32 / 100.0;
                Some((slot, dealt as f32 * accuracy))
            })
            .collect();

        scored
            .into_iter()
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .filter(|(_, score)| *score > 0.0)
            .map(|(slot, _)| slot)
    }

    /// When outsped: a move that drops the opponent's speed, or one that
    /// paralyzes (only worth it on an unstatused target). The candidate
    /// with the best accuracy-times-chance wins.
    fn speed_control_move(&self, state: &BattleState, side: SideId, dex: &Dex) -> Option<usize> {
        let attacker = state.active(side);
        let defender = state.active(side.opponent());

        let scored: Vec<(usize, f32)> = attacker
            .moves
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| {
                let entry = entry.as_ref()?;
                if entry.pp == 0 {
                    return None;
                }
                let mv = dex.move_data(&entry.name).ok()?;
                let lowers_speed = mv.target == MoveTarget::Opponent
                    && mv
                        .meta
                        .stat_changes
                        .iter()
                        .any(|change| change.stat == StatKind::Speed && change.delta < 0);
                let paralyzes = mv.meta.ailment == Some(AilmentKind::Paralysis)
                    && defender.ailment.is_none();
                if !lowers_speed && !paralyzes {
                    return None;
                }
                let chance = if lowers_speed {
                    if mv.meta.stat_chance == 0 {
                        100
                    } else {
                        mv.meta.stat_chance
                    }
                } else if mv.meta.ailment_chance == 0 {
                    100
                } else {
                    mv.meta.ailment_chance
                };
                let accuracy = mv.accuracy.unwrap_or(100) as f32;
                Some((slot, accuracy * chance as f32 / 100.0))
            })
            .collect();

        scored
            .into_iter()
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(slot, _)| slot)
    }

    /// Last resort before Struggle: the first usable move found by a
    /// deterministically shuffled scan of the slots.
    fn shuffled_usable_move(&self, state: &BattleState, side: SideId) -> Option<usize> {
        let mut rng = state.rng;
        let mut order = [0usize, 1, 2, 3];
        for i in (1..order.len()).rev() {
            let j = rng.range(0, i as u64) as usize;
            order.swap(i, j);
        }
        let attacker = state.active(side);
        order
            .into_iter()
            .find(|&slot| attacker.move_slot(slot).is_some_and(|ms| ms.pp > 0))
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for HeuristicOpponent {
    fn choose(&self, state: &BattleState, side: SideId, dex: &Dex) -> Action {
        let own = state.side(side);

        // A downed active combatant leaves exactly one kind of legal
        // action: bring out the first living teammate.
        if own.active_combatant().is_fainted() {
            if let Some(&slot) = own.living_benched_slots().first() {
                return Action::Switch { target: slot };
            }
            return Action::Skip;
        }

        let my_speed = effective_speed(state.active(side), state.weather);
        let their_speed = effective_speed(state.active(side.opponent()), state.weather);
        if my_speed < their_speed {
            if let Some(slot) = self.speed_control_move(state, side, dex) {
                return Action::Attack { slot: slot as i8 };
            }
        }

        if let Some(slot) = self.best_damage_move(state, side, dex) {
            return Action::Attack { slot: slot as i8 };
        }

        if let Some(slot) = self.shuffled_usable_move(state, side) {
            return Action::Attack { slot: slot as i8 };
        }

        Action::Attack { slot: -1 }
    }
}
