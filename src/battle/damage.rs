//! The damage formula.
//!
//! Deterministic given its inputs; the only randomness is the 85-100%
//! spread drawn from the caller's RNG. The modifier order and the rounding
//! rule applied at each step are load-bearing: weather, crit, spread, STAB,
//! effectiveness, burn, pinch, with half-up rounding after weather, STAB,
//! burn and pinch, and a plain floor after crit, spread and effectiveness.

use schema::{dual_effectiveness, DamageClass, MoveData, StatKind};

use crate::battle::abilities;
use crate::battle::state::Weather;
use crate::combatant::{Ailment, Combatant};
use crate::rng::BattleRng;

/// Round half up: 2.5 -> 3, distinct from Rust's round-half-away and from
/// banker's rounding. Negative inputs never occur here.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Compute one hit's damage. Returns 0 for status moves, immune targets,
/// and immunity abilities.
pub fn damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &MoveData,
    is_crit: bool,
    weather: Weather,
    rng: &mut BattleRng,
) -> u16 {
    if mv.power == 0 || mv.damage_class == DamageClass::Status {
        return 0;
    }

    let effectiveness = dual_effectiveness(mv.move_type, defender.current_types());
    if effectiveness == 0.0 {
        return 0;
    }
    if abilities::immunity_blocks(defender, mv.move_type, effectiveness) {
        return 0;
    }

    let (attack_kind, defense_kind) = match mv.damage_class {
        DamageClass::Physical => (StatKind::Attack, StatKind::Defense),
        DamageClass::Special => (StatKind::SpecialAttack, StatKind::SpecialDefense),
        DamageClass::Status => unreachable!(),
    };

    let crit = is_crit && !abilities::cancels_crit(defender);

    // A crit reads both stats with their stages stripped.
    let (attack, defense) = if crit {
        (
            attacker.raw_stat(attack_kind) as f64,
            defender.raw_stat(defense_kind) as f64,
        )
    } else {
        (
            attacker.stat_value(attack_kind) as f64,
            defender.stat_value(defense_kind) as f64,
        )
    };

    let attack = (attack * abilities::attack_multiplier(attacker, mv.damage_class)).floor();
    let defense =
        (defense * abilities::defense_multiplier(defender, mv.damage_class)).floor().max(1.0);

    let level_term = 2.0 * attacker.level as f64 / 5.0 + 2.0;
    let base = (((level_term * mv.power as f64).floor() * attack / defense).floor() / 50.0
        + 2.0)
        .floor();

    let mut dmg = round_half_up(base * weather_modifier(weather, mv));
    if crit {
        dmg = (dmg * 1.5).floor();
    }
    let spread = rng.range(85, 100) as f64 / 100.0;
    dmg = (dmg * spread).floor();
    if attacker.has_type(mv.move_type) {
        dmg = round_half_up(dmg * 1.5);
    }
    dmg = (dmg * effectiveness).floor();
    if mv.damage_class == DamageClass::Physical
        && matches!(attacker.ailment, Some(Ailment::Burn))
        && !matches!(
            abilities::id_of(attacker),
            Some(abilities::AbilityId::Guts)
        )
    {
        dmg = round_half_up(dmg * 0.5);
    }
    if abilities::pinch_bonus(attacker, mv.move_type) {
        dmg = round_half_up(dmg * 1.5);
    }

    (dmg as u16).max(1)
}

fn weather_modifier(weather: Weather, mv: &MoveData) -> f64 {
    use schema::Type;
    match (weather, mv.move_type) {
        (Weather::Sun, Type::Fire) | (Weather::Rain, Type::Water) => 1.5,
        (Weather::Sun, Type::Water) | (Weather::Rain, Type::Fire) => 0.5,
        _ => 1.0,
    }
}

/// The confusion self-hit: a fixed 40-power typeless physical strike
/// against the combatant's own defense. No STAB, no effectiveness, no
/// crits; only the random spread applies.
pub fn confusion_self_hit(combatant: &Combatant, rng: &mut BattleRng) -> u16 {
    let attack = combatant.stat_value(StatKind::Attack) as f64;
    let defense = (combatant.stat_value(StatKind::Defense) as f64).max(1.0);
    let level_term = 2.0 * combatant.level as f64 / 5.0 + 2.0;
    let base = (((level_term * 40.0).floor() * attack / defense).floor() / 50.0 + 2.0).floor();
    let spread = rng.range(85, 100) as f64 / 100.0;
    ((base * spread).floor() as u16).max(1)
}

/// Crit chance in percent for a crit stage.
pub fn crit_chance(stage: u8) -> u8 {
    match stage {
        0 => 6,
        1 => 12,
        2 => 25,
        3 => 33,
        _ => 50,
    }
}
