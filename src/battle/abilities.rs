//! Ability behavior, centralized.
//!
//! Every hook point the engine exposes (switch-in, switch-out, pre-damage
//! modifiers, accuracy, contact, end-of-turn, stat-change attempts, trap
//! checks, ailment immunities) dispatches through the closed [`AbilityId`]
//! enum here, so the full hook surface of an ability is visible in one
//! file instead of being scattered across call sites. Unknown ability
//! names simply resolve to no behavior.

use phf::phf_map;
use schema::{AilmentKind, DamageClass, StatKind, Type};

use crate::battle::events::StateEvent;
use crate::battle::state::{BattleState, Weather};
use crate::combatant::{Ailment, Combatant};
use crate::rng::BattleRng;
use crate::side::SideId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityId {
    Drizzle,
    Drought,
    SandStream,
    SnowWarning,
    Intimidate,
    Trace,
    NaturalCure,
    Forecast,
    ShadowTag,
    ArenaTrap,
    MagnetPull,
    Truant,
    SwiftSwim,
    Chlorophyll,
    HugePower,
    PurePower,
    Hustle,
    MarvelScale,
    Guts,
    WonderGuard,
    Levitate,
    LightningRod,
    BattleArmor,
    ShellArmor,
    Overgrow,
    Blaze,
    Torrent,
    Swarm,
    Limber,
    Insomnia,
    WaterVeil,
    Immunity,
    MagmaArmor,
    FlameBody,
    PoisonPoint,
    EffectSpore,
    RoughSkin,
    CuteCharm,
    CompoundEyes,
    SandVeil,
    CloudNine,
    AirLock,
    Pressure,
    SpeedBoost,
    ShedSkin,
    RainDish,
    ClearBody,
    WhiteSmoke,
    KeenEye,
    HyperCutter,
}

static ABILITY_IDS: phf::Map<&'static str, AbilityId> = phf_map! {
    "drizzle" => AbilityId::Drizzle,
    "drought" => AbilityId::Drought,
    "sand-stream" => AbilityId::SandStream,
    "snow-warning" => AbilityId::SnowWarning,
    "intimidate" => AbilityId::Intimidate,
    "trace" => AbilityId::Trace,
    "natural-cure" => AbilityId::NaturalCure,
    "forecast" => AbilityId::Forecast,
    "shadow-tag" => AbilityId::ShadowTag,
    "arena-trap" => AbilityId::ArenaTrap,
    "magnet-pull" => AbilityId::MagnetPull,
    "truant" => AbilityId::Truant,
    "swift-swim" => AbilityId::SwiftSwim,
    "chlorophyll" => AbilityId::Chlorophyll,
    "huge-power" => AbilityId::HugePower,
    "pure-power" => AbilityId::PurePower,
    "hustle" => AbilityId::Hustle,
    "marvel-scale" => AbilityId::MarvelScale,
    "guts" => AbilityId::Guts,
    "wonder-guard" => AbilityId::WonderGuard,
    "levitate" => AbilityId::Levitate,
    "lightning-rod" => AbilityId::LightningRod,
    "battle-armor" => AbilityId::BattleArmor,
    "shell-armor" => AbilityId::ShellArmor,
    "overgrow" => AbilityId::Overgrow,
    "blaze" => AbilityId::Blaze,
    "torrent" => AbilityId::Torrent,
    "swarm" => AbilityId::Swarm,
    "limber" => AbilityId::Limber,
    "insomnia" => AbilityId::Insomnia,
    "water-veil" => AbilityId::WaterVeil,
    "immunity" => AbilityId::Immunity,
    "magma-armor" => AbilityId::MagmaArmor,
    "flame-body" => AbilityId::FlameBody,
    "poison-point" => AbilityId::PoisonPoint,
    "effect-spore" => AbilityId::EffectSpore,
    "rough-skin" => AbilityId::RoughSkin,
    "cute-charm" => AbilityId::CuteCharm,
    "compound-eyes" => AbilityId::CompoundEyes,
    "sand-veil" => AbilityId::SandVeil,
    "cloud-nine" => AbilityId::CloudNine,
    "air-lock" => AbilityId::AirLock,
    "pressure" => AbilityId::Pressure,
    "speed-boost" => AbilityId::SpeedBoost,
    "shed-skin" => AbilityId::ShedSkin,
    "rain-dish" => AbilityId::RainDish,
    "clear-body" => AbilityId::ClearBody,
    "white-smoke" => AbilityId::WhiteSmoke,
    "keen-eye" => AbilityId::KeenEye,
    "hyper-cutter" => AbilityId::HyperCutter,
};

pub fn ability_id(name: &str) -> Option<AbilityId> {
    ABILITY_IDS.get(name).copied()
}

pub fn id_of(combatant: &Combatant) -> Option<AbilityId> {
    ability_id(&combatant.ability.name)
}

/// "huge-power" -> "Huge Power", for battle messages.
pub fn pretty_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Speed after stages, weather abilities, and paralysis. This is the value
/// every ordering decision in the engine uses.
pub fn effective_speed(combatant: &Combatant, weather: Weather) -> u16 {
    let mut speed = combatant.stat_value(StatKind::Speed);
    match (id_of(combatant), weather) {
        (Some(AbilityId::SwiftSwim), Weather::Rain) => speed = speed.saturating_mul(2),
        (Some(AbilityId::Chlorophyll), Weather::Sun) => speed = speed.saturating_mul(2),
        _ => {}
    }
    if matches!(combatant.ailment, Some(Ailment::Paralysis)) {
        speed /= 2;
    }
    speed
}

/// Trapping check for a voluntary switch. Returns the opposing trapper when
/// the switch is blocked; type immunities punch through.
pub fn blocks_switch(state: &BattleState, side: SideId) -> Option<AbilityId> {
    let leaver = state.active(side);
    let trapper = state.active(side.opponent());
    if trapper.is_fainted() {
        return None;
    }
    match id_of(trapper)? {
        AbilityId::ShadowTag => Some(AbilityId::ShadowTag),
        AbilityId::ArenaTrap if !leaver.has_type(Type::Flying) => Some(AbilityId::ArenaTrap),
        AbilityId::MagnetPull if leaver.has_type(Type::Steel) => Some(AbilityId::MagnetPull),
        _ => None,
    }
}

/// Attack-side stat multiplier applied before the base damage formula.
pub fn attack_multiplier(attacker: &Combatant, class: DamageClass) -> f64 {
    let mut multiplier = 1.0;
    match id_of(attacker) {
        Some(AbilityId::HugePower) | Some(AbilityId::PurePower)
            if class == DamageClass::Physical =>
        {
            multiplier *= 2.0;
        }
        Some(AbilityId::Hustle) if class == DamageClass::Physical => {
            multiplier *= 1.5;
        }
        _ => {}
    }
    if matches!(id_of(attacker), Some(AbilityId::Guts)) && attacker.ailment.is_some() {
        multiplier *= 1.5;
    }
    multiplier
}

/// Defense-side stat multiplier applied before the base damage formula.
pub fn defense_multiplier(defender: &Combatant, class: DamageClass) -> f64 {
    if matches!(id_of(defender), Some(AbilityId::MarvelScale))
        && class == DamageClass::Physical
        && defender.ailment.is_some()
    {
        1.5
    } else {
        1.0
    }
}

/// Full-damage immunities that zero the hit outright.
pub fn immunity_blocks(defender: &Combatant, move_type: Type, effectiveness: f64) -> bool {
    match id_of(defender) {
        Some(AbilityId::WonderGuard) => effectiveness <= 1.0,
        Some(AbilityId::Levitate) => move_type == Type::Ground,
        Some(AbilityId::LightningRod) => move_type == Type::Electric,
        _ => false,
    }
}

pub fn cancels_crit(defender: &Combatant) -> bool {
    matches!(
        id_of(defender),
        Some(AbilityId::BattleArmor) | Some(AbilityId::ShellArmor)
    )
}

/// The pinch abilities: 1.5x on matching-type moves at a third of max HP.
pub fn pinch_bonus(attacker: &Combatant, move_type: Type) -> bool {
    if attacker.hp.current > attacker.hp.max / 3 {
        return false;
    }
    matches!(
        (id_of(attacker), move_type),
        (Some(AbilityId::Overgrow), Type::Grass)
            | (Some(AbilityId::Blaze), Type::Fire)
            | (Some(AbilityId::Torrent), Type::Water)
            | (Some(AbilityId::Swarm), Type::Bug)
    )
}

/// Combined ability accuracy modifier for one hit.
pub fn accuracy_multiplier(
    attacker: &Combatant,
    defender: &Combatant,
    class: DamageClass,
    weather: Weather,
) -> f64 {
    let mut multiplier = 1.0;
    if matches!(id_of(attacker), Some(AbilityId::CompoundEyes)) {
        multiplier *= 1.3;
    }
    if matches!(id_of(attacker), Some(AbilityId::Hustle)) && class == DamageClass::Physical {
        multiplier *= 0.8;
    }
    if matches!(id_of(defender), Some(AbilityId::SandVeil)) && weather == Weather::Sandstorm {
        multiplier *= 0.8;
    }
    multiplier
}

/// Ability that makes the defender immune to this ailment, if any.
pub fn ailment_immunity(defender: &Combatant, kind: AilmentKind) -> Option<AbilityId> {
    let id = id_of(defender)?;
    match (id, kind) {
        (AbilityId::Limber, AilmentKind::Paralysis)
        | (AbilityId::Insomnia, AilmentKind::Sleep)
        | (AbilityId::WaterVeil, AilmentKind::Burn)
        | (AbilityId::Immunity, AilmentKind::Poison)
        | (AbilityId::Immunity, AilmentKind::Toxic)
        | (AbilityId::MagmaArmor, AilmentKind::Freeze) => Some(id),
        _ => None,
    }
}

/// Ability blocking a hostile stat drop, if any.
pub fn blocks_stat_drop(defender: &Combatant, stat: StatKind) -> Option<AbilityId> {
    let id = id_of(defender)?;
    match (id, stat) {
        (AbilityId::ClearBody, _) | (AbilityId::WhiteSmoke, _) => Some(id),
        (AbilityId::KeenEye, StatKind::Accuracy) => Some(id),
        (AbilityId::HyperCutter, StatKind::Attack) => Some(id),
        _ => None,
    }
}

pub fn suppresses_weather(combatant: &Combatant) -> bool {
    matches!(
        id_of(combatant),
        Some(AbilityId::CloudNine) | Some(AbilityId::AirLock)
    )
}

pub fn weather_suppressor_active(state: &BattleState) -> bool {
    SideId::both()
        .iter()
        .any(|&id| !state.active(id).is_fainted() && suppresses_weather(state.active(id)))
}

/// PP drained per move use against this defender.
pub fn pp_cost_against(defender: &Combatant) -> u8 {
    if matches!(id_of(defender), Some(AbilityId::Pressure)) {
        2
    } else {
        1
    }
}

/// Events triggered by the combatant that just stepped onto the field.
pub fn on_switch_in(state: &mut BattleState, side: SideId) -> Vec<StateEvent> {
    let mut follow_ups = Vec::new();
    let incoming = state.active(side);
    let ability_name = incoming.ability.name.clone();
    let incoming_name = incoming.nickname.clone();

    match id_of(incoming) {
        Some(AbilityId::Drizzle) if state.weather != Weather::Rain => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
            follow_ups.push(StateEvent::WeatherChange {
                weather: Weather::Rain,
            });
        }
        Some(AbilityId::Drought) if state.weather != Weather::Sun => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
            follow_ups.push(StateEvent::WeatherChange {
                weather: Weather::Sun,
            });
        }
        Some(AbilityId::SandStream) if state.weather != Weather::Sandstorm => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
            follow_ups.push(StateEvent::WeatherChange {
                weather: Weather::Sandstorm,
            });
        }
        Some(AbilityId::SnowWarning) if state.weather != Weather::Hail => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
            follow_ups.push(StateEvent::WeatherChange {
                weather: Weather::Hail,
            });
        }
        Some(AbilityId::Intimidate) => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
            follow_ups.push(StateEvent::StatChange {
                side: side.opponent(),
                stat: StatKind::Attack,
                delta: -1,
            });
        }
        Some(AbilityId::Trace) => {
            let traced = state.active(side.opponent()).ability.clone();
            if ability_id(&traced.name).is_some() {
                let message = format!(
                    "{} traced the foe's {}!",
                    incoming_name,
                    pretty_name(&traced.name)
                );
                state.active_mut(side).ability = traced;
                follow_ups.push(StateEvent::Message { text: message });
            }
        }
        Some(AbilityId::Forecast) => {
            if let Some(new_type) = forecast_type(state.weather) {
                follow_ups.push(StateEvent::TypeChange { side, new_type });
            }
        }
        Some(AbilityId::CloudNine) | Some(AbilityId::AirLock) => {
            if state.weather != Weather::None {
                state.suppressed_weather = Some(state.weather);
                state.weather = Weather::None;
            }
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: ability_name,
            });
        }
        _ => {}
    }
    follow_ups
}

/// Hooks for the combatant leaving the field. Returns messages only; the
/// cure itself happens here.
pub fn on_switch_out(state: &mut BattleState, side: SideId) -> Vec<String> {
    let mut messages = Vec::new();
    let leaver = state.active_mut(side);
    if matches!(ability_id(&leaver.ability.name), Some(AbilityId::NaturalCure))
        && leaver.ailment.is_some()
        && !leaver.is_fainted()
    {
        leaver.ailment = None;
        messages.push(format!(
            "{}'s Natural Cure healed its status!",
            leaver.nickname
        ));
    }
    messages
}

/// Contact retaliation rolled when a contact move lands on the defender.
pub fn on_contact(
    attacker: &Combatant,
    defender: &Combatant,
    attacker_side: SideId,
    rng: &mut BattleRng,
) -> Vec<StateEvent> {
    let defender_side = attacker_side.opponent();
    let mut follow_ups = Vec::new();
    match id_of(defender) {
        Some(AbilityId::FlameBody) => {
            if attacker.ailment.is_none() && rng.chance(30) {
                follow_ups.push(StateEvent::AbilityActivation {
                    side: defender_side,
                    ability: defender.ability.name.clone(),
                });
                follow_ups.push(StateEvent::Ailment {
                    side: attacker_side,
                    kind: AilmentKind::Burn,
                });
            }
        }
        Some(AbilityId::PoisonPoint) => {
            if attacker.ailment.is_none() && rng.chance(30) {
                follow_ups.push(StateEvent::AbilityActivation {
                    side: defender_side,
                    ability: defender.ability.name.clone(),
                });
                follow_ups.push(StateEvent::Ailment {
                    side: attacker_side,
                    kind: AilmentKind::Poison,
                });
            }
        }
        Some(AbilityId::EffectSpore) => {
            if attacker.ailment.is_none() && rng.chance(30) {
                let kind = match rng.range(0, 2) {
                    0 => AilmentKind::Sleep,
                    1 => AilmentKind::Poison,
                    _ => AilmentKind::Paralysis,
                };
                follow_ups.push(StateEvent::AbilityActivation {
                    side: defender_side,
                    ability: defender.ability.name.clone(),
                });
                follow_ups.push(StateEvent::Ailment {
                    side: attacker_side,
                    kind,
                });
            }
        }
        Some(AbilityId::RoughSkin) => {
            follow_ups.push(StateEvent::AbilityActivation {
                side: defender_side,
                ability: defender.ability.name.clone(),
            });
            follow_ups.push(StateEvent::Damage {
                side: attacker_side,
                amount: (attacker.hp.max / 16).max(1),
            });
        }
        Some(AbilityId::CuteCharm) => {
            if !attacker.infatuated && rng.chance(30) {
                follow_ups.push(StateEvent::AbilityActivation {
                    side: defender_side,
                    ability: defender.ability.name.clone(),
                });
                follow_ups.push(StateEvent::Infatuate {
                    side: attacker_side,
                });
            }
        }
        _ => {}
    }
    follow_ups
}

/// End-of-turn ability effects for one side.
pub fn end_of_turn(state: &mut BattleState, side: SideId) -> Vec<StateEvent> {
    let mut follow_ups = Vec::new();
    let combatant = state.active(side);
    if combatant.is_fainted() {
        return follow_ups;
    }
    match id_of(combatant) {
        Some(AbilityId::SpeedBoost) => {
            follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: combatant.ability.name.clone(),
            });
            follow_ups.push(StateEvent::StatChange {
                side,
                stat: StatKind::Speed,
                delta: 1,
            });
        }
        Some(AbilityId::ShedSkin) => {
            if combatant.ailment.is_some() {
                let mut rng = state.rng;
                let cured = rng.chance(30);
                state.rng = rng;
                if cured {
                    let name = state.active(side).nickname.clone();
                    state.active_mut(side).ailment = None;
                    follow_ups.push(StateEvent::Message {
                        text: format!("{} shed its skin and was cured!", name),
                    });
                }
            }
        }
        Some(AbilityId::RainDish) => {
            if state.weather == Weather::Rain && combatant.hp.current < combatant.hp.max {
                follow_ups.push(StateEvent::AbilityActivation {
                    side,
                    ability: combatant.ability.name.clone(),
                });
                follow_ups.push(StateEvent::Heal {
                    side,
                    amount: (combatant.hp.max / 16).max(1),
                });
            }
        }
        _ => {}
    }
    follow_ups
}

/// Forecast's derived type for the current weather.
pub fn forecast_type(weather: Weather) -> Option<Type> {
    match weather {
        Weather::Sun => Some(Type::Fire),
        Weather::Rain => Some(Type::Water),
        Weather::Hail => Some(Type::Ice),
        Weather::Sandstorm | Weather::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogued_name_resolves() {
        for name in ABILITY_IDS.keys() {
            assert!(ability_id(name).is_some());
        }
        assert_eq!(ABILITY_IDS.len(), 50);
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        assert_eq!(ability_id("rock-head"), None);
        assert_eq!(ability_id(""), None);
    }

    #[test]
    fn pretty_names_read_like_the_games() {
        assert_eq!(pretty_name("huge-power"), "Huge Power");
        assert_eq!(pretty_name("guts"), "Guts");
    }
}
