//! The event engine.
//!
//! A turn resolves into a flat list of `StateEvent`s. Each event mutates
//! the battle state and may return follow-up events plus user-facing
//! messages. The queue drains depth-first: follow-ups are prepended to the
//! front, so everything an event causes happens before anything that was
//! queued earlier. The status gates rely on this to interleave their
//! message, then the carried attack, before the next independent action.
//!
//! Every variant carries an explicit serde tag so a resolved turn can cross
//! the wire and be reconstructed variant-for-variant on the other side.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use schema::{
    dual_effectiveness, AilmentKind, DamageClass, MoveKind, MoveTarget, StatKind, Type,
};

use crate::battle::abilities;
use crate::battle::damage::{confusion_self_hit, crit_chance, damage};
use crate::battle::state::{BattleState, Weather};
use crate::combatant::{accuracy_stage_multiplier, Ailment};
use crate::dex::Dex;
use crate::errors::EngineResult;
use crate::side::SideId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StateEvent {
    TurnStart { turn: u32 },
    Truant { side: SideId },
    Switch { side: SideId, slot: usize },
    Attack { side: SideId, slot: i8 },
    Damage { side: SideId, amount: u16 },
    Heal { side: SideId, amount: u16 },
    HealPercent { side: SideId, percent: u8 },
    Ailment { side: SideId, kind: AilmentKind },
    StatChange { side: SideId, stat: StatKind, delta: i8 },
    WeatherChange { weather: Weather },
    AbilityActivation { side: SideId, ability: String },
    TypeChange { side: SideId, new_type: Type },
    Infatuate { side: SideId },
    Flinch { side: SideId },
    Faint { side: SideId },
    FrozenGate { side: SideId, attack: Box<StateEvent> },
    ParalysisGate { side: SideId, attack: Box<StateEvent> },
    SleepGate { side: SideId, attack: Box<StateEvent> },
    ConfusionGate { side: SideId, attack: Box<StateEvent> },
    SandstormDamage { side: SideId },
    HailDamage { side: SideId },
    StatusDamage { side: SideId },
    EndOfTurnAbility { side: SideId },
    FinalUpdates,
    Message { text: String },
}

/// What applying one event produced.
#[derive(Debug, Default)]
pub struct EventOutcome {
    pub follow_ups: Vec<StateEvent>,
    pub messages: Vec<String>,
}

impl EventOutcome {
    fn message(text: String) -> Self {
        EventOutcome {
            follow_ups: Vec::new(),
            messages: vec![text],
        }
    }
}

impl StateEvent {
    /// Mutate the state and report follow-ups and messages. Applying the
    /// same event to the same state (seed included) is fully deterministic,
    /// which is what lets a peer replay a received turn.
    pub fn apply(&self, state: &mut BattleState, dex: &Dex) -> EngineResult<EventOutcome> {
        match self {
            StateEvent::TurnStart { turn } => {
                // Turn-boundary flag resets live here, not in the
                // orchestrator, so a replayed event list reproduces them.
                for side in SideId::both() {
                    let combatant = state.active_mut(side);
                    combatant.can_attack = true;
                    combatant.switched_in = false;
                }
                Ok(EventOutcome::message(format!("=== Turn {} ===", turn)))
            }
            StateEvent::Truant { side } => {
                let combatant = state.active_mut(*side);
                combatant.can_attack = false;
                combatant.truant_pending = false;
                let name = combatant.nickname.clone();
                Ok(EventOutcome {
                    follow_ups: Vec::new(),
                    messages: vec![
                        format!("{}'s Truant!", name),
                        format!("{} is loafing around!", name),
                    ],
                })
            }
            StateEvent::Switch { side, slot } => apply_switch(state, *side, *slot),
            StateEvent::Attack { side, slot } => apply_attack(state, dex, *side, *slot),
            StateEvent::Damage { side, amount } => Ok(apply_damage(state, *side, *amount)),
            StateEvent::Heal { side, amount } => Ok(apply_heal(state, *side, *amount)),
            StateEvent::HealPercent { side, percent } => {
                let amount = {
                    let target = state.active(*side);
                    (target.hp.max as u32 * *percent as u32 / 100).max(1) as u16
                };
                Ok(apply_heal(state, *side, amount))
            }
            StateEvent::Ailment { side, kind } => Ok(apply_ailment(state, *side, *kind)),
            StateEvent::StatChange { side, stat, delta } => {
                Ok(apply_stat_change(state, *side, *stat, *delta))
            }
            StateEvent::WeatherChange { weather } => Ok(apply_weather_change(state, *weather)),
            StateEvent::AbilityActivation { side, ability } => {
                Ok(EventOutcome::message(format!(
                    "{}'s {}!",
                    state.active(*side).nickname,
                    abilities::pretty_name(ability)
                )))
            }
            StateEvent::TypeChange { side, new_type } => {
                let target = state.active_mut(*side);
                target.type_override = Some(*new_type);
                Ok(EventOutcome::message(format!(
                    "{} transformed into the {} type!",
                    target.nickname, new_type
                )))
            }
            StateEvent::Infatuate { side } => {
                let target = state.active_mut(*side);
                target.infatuated = true;
                Ok(EventOutcome::message(format!(
                    "{} fell in love!",
                    target.nickname
                )))
            }
            StateEvent::Flinch { side } => {
                let target = state.active_mut(*side);
                target.can_attack = false;
                Ok(EventOutcome::message(format!(
                    "{} flinched!",
                    target.nickname
                )))
            }
            StateEvent::Faint { side } => {
                let name = state.active(*side).nickname.clone();
                state.side_mut(*side).fainted_this_turn = true;
                Ok(EventOutcome::message(format!("{} fainted!", name)))
            }
            StateEvent::FrozenGate { side, attack } => Ok(apply_frozen_gate(state, *side, attack)),
            StateEvent::ParalysisGate { side, attack } => {
                Ok(apply_paralysis_gate(state, *side, attack))
            }
            StateEvent::SleepGate { side, attack } => Ok(apply_sleep_gate(state, *side, attack)),
            StateEvent::ConfusionGate { side, attack } => {
                Ok(apply_confusion_gate(state, *side, attack))
            }
            StateEvent::SandstormDamage { side } => Ok(apply_weather_chip(
                state,
                *side,
                Weather::Sandstorm,
                "{} is buffeted by the sandstorm!",
            )),
            StateEvent::HailDamage { side } => Ok(apply_weather_chip(
                state,
                *side,
                Weather::Hail,
                "{} is pelted by the hail!",
            )),
            StateEvent::StatusDamage { side } => Ok(apply_status_damage(state, *side)),
            StateEvent::EndOfTurnAbility { side } => Ok(EventOutcome {
                follow_ups: abilities::end_of_turn(state, *side),
                messages: Vec::new(),
            }),
            StateEvent::FinalUpdates => Ok(apply_final_updates(state)),
            StateEvent::Message { text } => Ok(EventOutcome::message(text.clone())),
        }
    }
}

/// FIFO queue with priority reinsertion: follow-ups jump the line.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<StateEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            events: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, event: StateEvent) {
        self.events.push_back(event);
    }

    pub fn push_front(&mut self, event: StateEvent) {
        self.events.push_front(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain the queue depth-first. Each processed event is recorded into
    /// `processed` in execution order and its messages land in the state's
    /// rolling log.
    pub fn drain(
        &mut self,
        state: &mut BattleState,
        dex: &Dex,
        processed: &mut Vec<StateEvent>,
    ) -> EngineResult<()> {
        while let Some(event) = self.events.pop_front() {
            let outcome = event.apply(state, dex)?;
            processed.push(event);
            for message in outcome.messages {
                state.push_log(message);
            }
            // Reversed so the first follow-up is processed first.
            for follow_up in outcome.follow_ups.into_iter().rev() {
                self.events.push_front(follow_up);
            }
        }
        Ok(())
    }
}

fn apply_switch(state: &mut BattleState, side: SideId, slot: usize) -> EngineResult<EventOutcome> {
    let mut out = EventOutcome::default();
    let leaver_fainted = state.active(side).is_fainted();

    if !leaver_fainted {
        if let Some(_trapper) = abilities::blocks_switch(state, side) {
            let trapper = state.active(side.opponent());
            out.messages.push(format!(
                "{} is trapped by {}'s {}!",
                state.active(side).nickname,
                trapper.nickname,
                abilities::pretty_name(&trapper.ability.name)
            ));
            return Ok(out);
        }
        out.messages.extend(abilities::on_switch_out(state, side));
        out.messages.push(format!(
            "{}, that's enough! Come back!",
            state.active(side).nickname
        ));
    }

    state.active_mut(side).clear_volatile();
    state.side_mut(side).active = slot;

    let incoming = state.active_mut(side);
    incoming.switched_in = true;
    incoming.can_attack = true;
    if let Some(Ailment::Toxic { counter }) = &mut incoming.ailment {
        *counter = 1;
    }
    out.messages.push(format!(
        "{} sent out {}!",
        state.side(side).name,
        state.active(side).nickname
    ));

    out.follow_ups.extend(abilities::on_switch_in(state, side));
    Ok(out)
}

fn apply_attack(
    state: &mut BattleState,
    dex: &Dex,
    attacker_id: SideId,
    slot: i8,
) -> EngineResult<EventOutcome> {
    let defender_id = attacker_id.opponent();
    let mut out = EventOutcome::default();

    if state.active(attacker_id).is_fainted()
        || state.active(defender_id).is_fainted()
        || !state.active(attacker_id).can_attack
    {
        return Ok(out);
    }

    // Slot -1 and exhausted slots both fall back to Struggle.
    let (move_name, pp_slot) = {
        let attacker = state.active(attacker_id);
        if slot < 0 {
            ("struggle".to_string(), None)
        } else {
            match attacker.move_slot(slot as usize) {
                Some(ms) if ms.pp > 0 => (ms.name.clone(), Some(slot as usize)),
                _ => ("struggle".to_string(), None),
            }
        }
    };
    let mv = dex.move_data(&move_name)?.clone();
    let attacker_name = state.active(attacker_id).nickname.clone();
    let defender_name = state.active(defender_id).nickname.clone();

    if state.active(attacker_id).taunt_turns > 0 && mv.damage_class == DamageClass::Status {
        out.messages.push(format!(
            "{} can't use {} after the taunt!",
            attacker_name,
            abilities::pretty_name(&mv.name)
        ));
        return Ok(out);
    }

    if state.active(attacker_id).infatuated {
        out.messages
            .push(format!("{} is in love with its foe!", attacker_name));
        if state.rng.chance(50) {
            out.messages
                .push(format!("{} is immobilized by love!", attacker_name));
            return Ok(out);
        }
    }

    if let Some(s) = pp_slot {
        let cost = abilities::pp_cost_against(state.active(defender_id));
        if let Some(ms) = state.active_mut(attacker_id).move_slot_mut(s) {
            ms.pp = ms.pp.saturating_sub(cost);
        }
    }

    if matches!(
        abilities::id_of(state.active(attacker_id)),
        Some(abilities::AbilityId::Truant)
    ) {
        state.active_mut(attacker_id).truant_pending = true;
    }

    out.messages.push(format!(
        "{} used {}!",
        attacker_name,
        abilities::pretty_name(&mv.name)
    ));

    // Snapshots decouple the damage math from the state borrow; nothing
    // below mutates the combatants directly, only via follow-up events.
    let attacker = state.active(attacker_id).clone();
    let defender = state.active(defender_id).clone();
    let weather = state.weather;

    if let Some(base_accuracy) = mv.accuracy {
        let stage = (attacker.accuracy_stage - defender.evasion_stage).clamp(-6, 6);
        let modified = base_accuracy as f64
            * accuracy_stage_multiplier(stage)
            * abilities::accuracy_multiplier(&attacker, &defender, mv.damage_class, weather);
        let threshold = modified.round().clamp(1.0, 100.0) as u8;
        if !state.rng.chance(threshold) {
            out.messages
                .push(format!("{}'s attack missed!", attacker_name));
            return Ok(out);
        }
    }

    let effectiveness = dual_effectiveness(mv.move_type, defender.current_types());
    let offensive = !matches!(mv.meta.kind, MoveKind::Ailment | MoveKind::NetGoodStats)
        && mv.damage_class != DamageClass::Status;
    if offensive {
        if effectiveness == 0.0 {
            out.messages
                .push(format!("It doesn't affect {}...", defender_name));
            return Ok(out);
        }
        if abilities::immunity_blocks(&defender, mv.move_type, effectiveness) {
            out.follow_ups.push(StateEvent::AbilityActivation {
                side: defender_id,
                ability: defender.ability.name.clone(),
            });
            out.messages
                .push(format!("It doesn't affect {}...", defender_name));
            return Ok(out);
        }
    }

    match mv.meta.kind {
        MoveKind::Damage
        | MoveKind::DamageAilment
        | MoveKind::DamageLower
        | MoveKind::DamageRaise
        | MoveKind::Unique => {
            let crit = state.rng.chance(crit_chance(attacker.crit_stage))
                && !abilities::cancels_crit(&defender);
            let amount = damage(&attacker, &defender, &mv, crit, weather, &mut state.rng);
            if crit {
                out.messages.push("A critical hit!".to_string());
            }
            if effectiveness > 1.0 {
                out.messages.push("It's super effective!".to_string());
            } else if effectiveness < 1.0 {
                out.messages.push("It's not very effective...".to_string());
            }
            out.follow_ups.push(StateEvent::Damage {
                side: defender_id,
                amount,
            });

            if mv.meta.drain > 0 {
                out.follow_ups.push(StateEvent::Message {
                    text: format!("{} had its energy drained!", defender_name),
                });
                out.follow_ups.push(StateEvent::Heal {
                    side: attacker_id,
                    amount: (amount as u32 * mv.meta.drain as u32 / 100).max(1) as u16,
                });
            } else if mv.meta.drain < 0 {
                out.follow_ups.push(StateEvent::Message {
                    text: format!("{} is damaged by recoil!", attacker_name),
                });
                out.follow_ups.push(StateEvent::Damage {
                    side: attacker_id,
                    amount: (amount as u32 * (-mv.meta.drain) as u32 / 100).max(1) as u16,
                });
            }

            if mv.meta.kind == MoveKind::Unique && mv.name == "struggle" {
                out.follow_ups.push(StateEvent::Message {
                    text: format!("{} is hit with recoil!", attacker_name),
                });
                out.follow_ups.push(StateEvent::Damage {
                    side: attacker_id,
                    amount: (amount / 4).max(1),
                });
            }

            if mv.meta.kind == MoveKind::DamageAilment {
                if let Some(kind) = mv.meta.ailment {
                    if mv.meta.ailment_chance == 0 || state.rng.chance(mv.meta.ailment_chance) {
                        out.follow_ups.push(StateEvent::Ailment {
                            side: defender_id,
                            kind,
                        });
                    }
                }
            }

            if matches!(mv.meta.kind, MoveKind::DamageLower | MoveKind::DamageRaise) {
                let target_id = if mv.meta.kind == MoveKind::DamageRaise {
                    attacker_id
                } else {
                    defender_id
                };
                if mv.meta.stat_chance == 0 || state.rng.chance(mv.meta.stat_chance) {
                    for change in &mv.meta.stat_changes {
                        out.follow_ups.push(StateEvent::StatChange {
                            side: target_id,
                            stat: change.stat,
                            delta: change.delta,
                        });
                    }
                }
            }

            if mv.meta.flinch_chance > 0 && state.rng.chance(mv.meta.flinch_chance) {
                out.follow_ups.push(StateEvent::Flinch { side: defender_id });
            }

            if mv.meta.makes_contact {
                out.follow_ups.extend(abilities::on_contact(
                    &attacker,
                    &defender,
                    attacker_id,
                    &mut state.rng,
                ));
            }
        }
        MoveKind::Ailment => {
            let target_id = match mv.target {
                MoveTarget::User => attacker_id,
                MoveTarget::Opponent => defender_id,
            };
            match mv.meta.ailment {
                Some(kind) => {
                    let target = state.active(target_id);
                    let occupied = match kind {
                        AilmentKind::Confusion => target.confusion_turns > 0,
                        _ => target.ailment.is_some(),
                    };
                    if occupied {
                        out.messages.push("But it failed!".to_string());
                    } else if mv.meta.ailment_chance == 0
                        || state.rng.chance(mv.meta.ailment_chance)
                    {
                        out.follow_ups.push(StateEvent::Ailment {
                            side: target_id,
                            kind,
                        });
                    }
                }
                None => out.messages.push("But it failed!".to_string()),
            }
        }
        MoveKind::NetGoodStats => {
            let target_id = match mv.target {
                MoveTarget::User => attacker_id,
                MoveTarget::Opponent => defender_id,
            };
            if mv.meta.stat_chance == 0 || state.rng.chance(mv.meta.stat_chance) {
                for change in &mv.meta.stat_changes {
                    out.follow_ups.push(StateEvent::StatChange {
                        side: target_id,
                        stat: change.stat,
                        delta: change.delta,
                    });
                }
            }
        }
        MoveKind::Heal => {
            if attacker.hp.current == attacker.hp.max {
                out.messages.push("But it failed!".to_string());
            } else {
                out.follow_ups.push(StateEvent::HealPercent {
                    side: attacker_id,
                    percent: mv.meta.healing,
                });
            }
        }
        MoveKind::Ohko => {
            out.messages.push("It's a one-hit KO!".to_string());
            out.follow_ups.push(StateEvent::Damage {
                side: defender_id,
                amount: defender.hp.current,
            });
        }
        MoveKind::ForceSwitch => {
            let slots = state.side(defender_id).living_benched_slots();
            if slots.is_empty() {
                out.messages.push("But it failed!".to_string());
            } else {
                let pick = slots[state.rng.range(0, slots.len() as u64 - 1) as usize];
                out.messages
                    .push(format!("{} was dragged out!", defender_name));
                out.follow_ups.push(StateEvent::Switch {
                    side: defender_id,
                    slot: pick,
                });
            }
        }
    }

    Ok(out)
}

fn apply_damage(state: &mut BattleState, side: SideId, amount: u16) -> EventOutcome {
    let mut out = EventOutcome::default();
    let target = state.active_mut(side);
    if target.is_fainted() {
        return out;
    }
    let before = target.hp.current;
    let fainted = target.take_damage(amount);
    let dealt = before - target.hp.current;
    out.messages
        .push(format!("{} took {} damage!", target.nickname, dealt));
    if fainted {
        out.follow_ups.push(StateEvent::Faint { side });
    }
    out
}

fn apply_heal(state: &mut BattleState, side: SideId, amount: u16) -> EventOutcome {
    let mut out = EventOutcome::default();
    let target = state.active_mut(side);
    if target.is_fainted() {
        return out;
    }
    target.heal(amount);
    out.messages
        .push(format!("{} regained health!", target.nickname));
    out
}

fn apply_ailment(state: &mut BattleState, side: SideId, kind: AilmentKind) -> EventOutcome {
    let mut out = EventOutcome::default();
    if state.active(side).is_fainted() {
        return out;
    }

    if kind == AilmentKind::Confusion {
        let turns = state.rng.range(2, 5) as u8;
        let target = state.active_mut(side);
        if target.confusion_turns == 0 {
            target.confusion_turns = turns;
            out.messages
                .push(format!("{} became confused!", target.nickname));
        }
        return out;
    }

    if state.active(side).ailment.is_some() {
        return out;
    }
    if type_blocks_ailment(state, side, kind) {
        return out;
    }
    if let Some(_id) = abilities::ailment_immunity(state.active(side), kind) {
        out.follow_ups.push(StateEvent::AbilityActivation {
            side,
            ability: state.active(side).ability.name.clone(),
        });
        return out;
    }

    let name = state.active(side).nickname.clone();
    let (ailment, text) = match kind {
        AilmentKind::Burn => (Ailment::Burn, format!("{} was burned!", name)),
        AilmentKind::Paralysis => (
            Ailment::Paralysis,
            format!("{} is paralyzed! It may be unable to move!", name),
        ),
        AilmentKind::Sleep => (
            Ailment::Sleep {
                turns: state.rng.range(1, 3) as u8,
            },
            format!("{} fell asleep!", name),
        ),
        AilmentKind::Freeze => (Ailment::Freeze, format!("{} was frozen solid!", name)),
        AilmentKind::Poison => (Ailment::Poison, format!("{} was poisoned!", name)),
        AilmentKind::Toxic => (
            Ailment::Toxic { counter: 1 },
            format!("{} was badly poisoned!", name),
        ),
        AilmentKind::Confusion => unreachable!(),
    };
    state.active_mut(side).ailment = Some(ailment);
    out.messages.push(text);
    out
}

/// Typing blocks some ailments outright: fire can't burn, poison and steel
/// can't be poisoned, ice can't freeze.
fn type_blocks_ailment(state: &BattleState, side: SideId, kind: AilmentKind) -> bool {
    let target = state.active(side);
    match kind {
        AilmentKind::Burn => target.has_type(Type::Fire),
        AilmentKind::Poison | AilmentKind::Toxic => {
            target.has_type(Type::Poison) || target.has_type(Type::Steel)
        }
        AilmentKind::Freeze => target.has_type(Type::Ice),
        _ => false,
    }
}

fn apply_stat_change(
    state: &mut BattleState,
    side: SideId,
    stat: StatKind,
    delta: i8,
) -> EventOutcome {
    let mut out = EventOutcome::default();
    if state.active(side).is_fainted() {
        return out;
    }

    if delta < 0 {
        if let Some(_id) = abilities::blocks_stat_drop(state.active(side), stat) {
            out.follow_ups.push(StateEvent::AbilityActivation {
                side,
                ability: state.active(side).ability.name.clone(),
            });
            return out;
        }
    }

    let target = state.active_mut(side);
    let moved = target.shift_stage(stat, delta);
    let stat_name = abilities::pretty_name(&stat.to_string());
    if moved == 0 {
        let direction = if delta > 0 { "higher" } else { "lower" };
        out.messages.push(format!(
            "{}'s {} won't go any {}!",
            target.nickname, stat_name, direction
        ));
    } else {
        let verb = match delta {
            d if d >= 2 => "sharply rose",
            d if d > 0 => "rose",
            d if d <= -2 => "harshly fell",
            _ => "fell",
        };
        out.messages
            .push(format!("{}'s {} {}!", target.nickname, stat_name, verb));
    }
    out
}

fn apply_weather_change(state: &mut BattleState, weather: Weather) -> EventOutcome {
    let mut out = EventOutcome::default();
    if abilities::weather_suppressor_active(state) {
        state.suppressed_weather = Some(weather);
        out.messages
            .push("The effects of the weather disappeared.".to_string());
        return out;
    }

    state.weather = weather;
    state.suppressed_weather = None;
    if let Some(text) = weather.start_message() {
        out.messages.push(text.to_string());
    }
    // Forecast holders re-derive their type with the sky.
    for side in SideId::both() {
        let combatant = state.active(side);
        if combatant.is_fainted() {
            continue;
        }
        if matches!(
            abilities::id_of(combatant),
            Some(abilities::AbilityId::Forecast)
        ) {
            match abilities::forecast_type(weather) {
                Some(new_type) => out.follow_ups.push(StateEvent::TypeChange { side, new_type }),
                None => {
                    let name = state.active(side).nickname.clone();
                    state.active_mut(side).type_override = None;
                    out.messages
                        .push(format!("{} returned to its usual form!", name));
                }
            }
        }
    }
    out
}

fn apply_frozen_gate(state: &mut BattleState, side: SideId, attack: &StateEvent) -> EventOutcome {
    let mut out = EventOutcome::default();
    let combatant = state.active(side);
    if combatant.is_fainted() {
        return out;
    }
    if !matches!(combatant.ailment, Some(Ailment::Freeze)) {
        out.follow_ups.push(attack.clone());
        return out;
    }
    let name = combatant.nickname.clone();
    if state.rng.chance(20) {
        state.active_mut(side).ailment = None;
        out.messages.push(format!("{} thawed out!", name));
        out.follow_ups.push(attack.clone());
    } else {
        out.messages.push(format!("{} is frozen solid!", name));
    }
    out
}

fn apply_paralysis_gate(
    state: &mut BattleState,
    side: SideId,
    attack: &StateEvent,
) -> EventOutcome {
    let mut out = EventOutcome::default();
    let combatant = state.active(side);
    if combatant.is_fainted() {
        return out;
    }
    if !matches!(combatant.ailment, Some(Ailment::Paralysis)) {
        out.follow_ups.push(attack.clone());
        return out;
    }
    let name = combatant.nickname.clone();
    if state.rng.chance(50) {
        out.messages.push(format!("{} is fully paralyzed!", name));
    } else {
        out.follow_ups.push(attack.clone());
    }
    out
}

fn apply_sleep_gate(state: &mut BattleState, side: SideId, attack: &StateEvent) -> EventOutcome {
    let mut out = EventOutcome::default();
    let combatant = state.active(side);
    if combatant.is_fainted() {
        return out;
    }
    match combatant.ailment {
        Some(Ailment::Sleep { turns }) => {
            let name = combatant.nickname.clone();
            if turns <= 1 {
                state.active_mut(side).ailment = None;
                out.messages.push(format!("{} woke up!", name));
                out.follow_ups.push(attack.clone());
            } else {
                state.active_mut(side).ailment = Some(Ailment::Sleep { turns: turns - 1 });
                out.messages.push(format!("{} is fast asleep.", name));
            }
        }
        _ => out.follow_ups.push(attack.clone()),
    }
    out
}

fn apply_confusion_gate(
    state: &mut BattleState,
    side: SideId,
    attack: &StateEvent,
) -> EventOutcome {
    let mut out = EventOutcome::default();
    let combatant = state.active(side);
    if combatant.is_fainted() {
        return out;
    }
    if combatant.confusion_turns == 0 {
        out.follow_ups.push(attack.clone());
        return out;
    }
    let name = combatant.nickname.clone();
    state.active_mut(side).confusion_turns -= 1;
    if state.active(side).confusion_turns == 0 {
        out.messages
            .push(format!("{} snapped out of confusion!", name));
        out.follow_ups.push(attack.clone());
        return out;
    }
    out.messages.push(format!("{} is confused!", name));
    if state.rng.chance(33) {
        let amount = {
            let snapshot = state.active(side).clone();
            confusion_self_hit(&snapshot, &mut state.rng)
        };
        out.messages
            .push("It hurt itself in its confusion!".to_string());
        out.follow_ups.push(StateEvent::Damage { side, amount });
    } else {
        out.follow_ups.push(attack.clone());
    }
    out
}

fn apply_weather_chip(
    state: &mut BattleState,
    side: SideId,
    weather: Weather,
    template: &str,
) -> EventOutcome {
    let mut out = EventOutcome::default();
    if state.weather != weather {
        return out;
    }
    let target = state.active(side);
    if target.is_fainted() || weather_chip_immune(target, weather) {
        return out;
    }
    let amount = target.hp.max.div_ceil(16);
    out.messages
        .push(template.replace("{}", &target.nickname));
    out.follow_ups.push(StateEvent::Damage { side, amount });
    out
}

fn weather_chip_immune(combatant: &crate::combatant::Combatant, weather: Weather) -> bool {
    match weather {
        Weather::Sandstorm => {
            combatant.has_type(Type::Rock)
                || combatant.has_type(Type::Ground)
                || combatant.has_type(Type::Steel)
        }
        Weather::Hail => combatant.has_type(Type::Ice),
        _ => false,
    }
}

fn apply_status_damage(state: &mut BattleState, side: SideId) -> EventOutcome {
    let mut out = EventOutcome::default();
    let target = state.active(side);
    if target.is_fainted() {
        return out;
    }
    let name = target.nickname.clone();
    let max_hp = target.hp.max;
    match target.ailment {
        Some(Ailment::Burn) => {
            out.messages.push(format!("{} is hurt by its burn!", name));
            out.follow_ups.push(StateEvent::Damage {
                side,
                amount: (max_hp / 8).max(1),
            });
        }
        Some(Ailment::Poison) => {
            out.messages.push(format!("{} is hurt by poison!", name));
            out.follow_ups.push(StateEvent::Damage {
                side,
                amount: (max_hp / 8).max(1),
            });
        }
        Some(Ailment::Toxic { counter }) => {
            out.messages.push(format!("{} is hurt by poison!", name));
            let amount = (max_hp as u32 * counter as u32 / 16).max(1) as u16;
            out.follow_ups.push(StateEvent::Damage { side, amount });
            // The counter deepens every turn the poison persists.
            state.active_mut(side).ailment = Some(Ailment::Toxic {
                counter: counter.saturating_add(1),
            });
        }
        _ => {}
    }
    out
}

fn apply_final_updates(state: &mut BattleState) -> EventOutcome {
    let mut out = EventOutcome::default();
    for side in SideId::both() {
        let combatant = state.active_mut(side);
        if combatant.taunt_turns > 0 {
            combatant.taunt_turns -= 1;
            if combatant.taunt_turns == 0 {
                out.messages
                    .push(format!("{}'s taunt wore off!", combatant.nickname));
            }
        }
    }
    if state.suppressed_weather.is_some() && !abilities::weather_suppressor_active(state) {
        let weather = state.suppressed_weather.take().unwrap();
        state.weather = weather;
        if let Some(text) = weather.start_message() {
            out.messages.push(text.to_string());
        }
    }
    out
}
