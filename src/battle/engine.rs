//! Turn orchestration.
//!
//! `process_turn` owns the battle state for the duration of one turn: it
//! validates the submitted actions, sequences switch events ahead of
//! everything else, orders the remaining actions by priority then speed,
//! drains the event queue, and classifies the outcome. Terminal
//! classification runs against a throwaway clone of the pre-turn state so
//! the check never touches the authoritative copy.

use std::cmp::Reverse;

use crate::battle::abilities::{self, AbilityId};
use crate::battle::events::{EventQueue, StateEvent};
use crate::battle::state::{BattleState, TurnKind, TurnResult, Weather};
use crate::combatant::Ailment;
use crate::dex::Dex;
use crate::errors::{ActionError, EngineResult};
use crate::side::{Action, SideId};

/// Reject malformed intents before any state is touched. The wire layer is
/// expected to only ever deliver valid actions; this is the backstop.
pub fn validate_action(state: &BattleState, side: SideId, action: &Action) -> EngineResult<()> {
    match action {
        Action::Skip => Ok(()),
        Action::Attack { slot } => {
            if *slot == -1 {
                return Ok(());
            }
            if *slot < 0 || *slot >= 4 {
                return Err(ActionError::InvalidMoveSlot(*slot).into());
            }
            let slot = *slot as usize;
            if state.active(side).move_slot(slot).is_none() {
                return Err(ActionError::EmptyMoveSlot(slot).into());
            }
            Ok(())
        }
        Action::Switch { target } => {
            let side_state = state.side(side);
            if *target >= side_state.team.len() {
                return Err(ActionError::InvalidSwitchTarget(*target).into());
            }
            if side_state.team[*target].is_fainted() {
                return Err(ActionError::SwitchTargetFainted(*target).into());
            }
            if *target == side_state.active {
                return Err(ActionError::SwitchTargetActive(*target).into());
            }
            Ok(())
        }
    }
}

/// Wrap a prepared attack in the conditional gates its user's status
/// demands. The gates re-emit the carried attack as a follow-up or swallow
/// it with a message; the queue's depth-first drain keeps the interleaving
/// right.
fn wrap_in_gates(state: &BattleState, side: SideId, attack: StateEvent) -> StateEvent {
    let combatant = state.active(side);
    let mut event = attack;
    if combatant.confusion_turns > 0 {
        event = StateEvent::ConfusionGate {
            side,
            attack: Box::new(event),
        };
    }
    match combatant.ailment {
        Some(Ailment::Paralysis) => StateEvent::ParalysisGate {
            side,
            attack: Box::new(event),
        },
        Some(Ailment::Sleep { .. }) => StateEvent::SleepGate {
            side,
            attack: Box::new(event),
        },
        Some(Ailment::Freeze) => StateEvent::FrozenGate {
            side,
            attack: Box::new(event),
        },
        _ => event,
    }
}

/// Replay the produced events on a clone of the pre-turn state and inspect
/// the trial for a terminal outcome. Follow-ups regenerated during the
/// replay are discarded: every event they would produce is already in the
/// recorded list.
fn classify(
    snapshot: &BattleState,
    events: &[StateEvent],
    dex: &Dex,
) -> EngineResult<Option<(TurnKind, SideId)>> {
    let mut trial = snapshot.clone();
    for event in events {
        let _ = event.apply(&mut trial, dex)?;
    }
    for side in SideId::both() {
        if !trial.side(side).has_living_combatant() {
            return Ok(Some((TurnKind::GameOver, side)));
        }
    }
    for side in SideId::both() {
        if trial.active(side).is_fainted() {
            return Ok(Some((TurnKind::ForceSwitch, side)));
        }
    }
    Ok(None)
}

/// Resolve one full turn from the pair of submitted actions.
pub fn process_turn(
    state: &mut BattleState,
    actions: [Action; 2],
    dex: &Dex,
) -> EngineResult<TurnResult> {
    for side in SideId::both() {
        validate_action(state, side, &actions[side.index()])?;
    }

    let snapshot = state.clone();
    let mut processed = Vec::new();
    let mut queue = EventQueue::new();

    let returning = state.sides.iter().any(|s| s.fainted_this_turn);

    if !returning {
        // TurnStart resets both actives' turn flags as it applies.
        queue.push_back(StateEvent::TurnStart { turn: state.turn });
    }

    // Switches first, fastest switcher first. The sort is stable, so equal
    // speeds keep submission order (host before client).
    let mut switches: Vec<(SideId, usize)> = Vec::new();
    for side in SideId::both() {
        if let Action::Switch { target } = actions[side.index()] {
            switches.push((side, target));
        }
    }
    switches.sort_by_key(|(side, _)| {
        Reverse(abilities::effective_speed(state.active(*side), state.weather))
    });
    for (side, target) in switches {
        queue.push_back(StateEvent::Switch { side, slot: target });
    }
    queue.drain(state, dex, &mut processed)?;

    if returning {
        for side_state in state.sides.iter_mut() {
            side_state.fainted_this_turn = false;
        }
        state.turn += 1;
        return Ok(TurnResult {
            kind: TurnKind::Resolved,
            side: SideId::Host,
            events: processed,
        });
    }

    // Truant skips the queue: there is no user-visible failure to animate,
    // the combatant simply loafs. The event is applied directly but still
    // recorded so replays reproduce the suppression.
    for side in SideId::both() {
        let combatant = state.active(side);
        if matches!(abilities::id_of(combatant), Some(AbilityId::Truant))
            && combatant.truant_pending
        {
            let event = StateEvent::Truant { side };
            let outcome = event.apply(state, dex)?;
            processed.push(event);
            for message in outcome.messages {
                state.push_log(message);
            }
        }
    }

    // Remaining actions by move priority, then effective speed. Stable
    // sort again: ties fall back to submission order.
    let mut others: Vec<(SideId, i8, u16, Action)> = Vec::new();
    for side in SideId::both() {
        let action = actions[side.index()];
        match action {
            Action::Switch { .. } => {}
            Action::Skip | Action::Attack { .. } => {
                let priority = action_priority(state, side, &action, dex);
                let speed = abilities::effective_speed(state.active(side), state.weather);
                others.push((side, priority, speed, action));
            }
        }
    }
    others.sort_by_key(|(_, priority, speed, _)| (Reverse(*priority), Reverse(*speed)));
    for (side, _, _, action) in others {
        if let Action::Attack { slot } = action {
            let attack = StateEvent::Attack { side, slot };
            queue.push_back(wrap_in_gates(state, side, attack));
        }
    }
    queue.drain(state, dex, &mut processed)?;

    if let Some((kind, side)) = classify(&snapshot, &processed, dex)? {
        log::debug!("turn {} classified {:?} for {:?}", state.turn, kind, side);
        return Ok(TurnResult {
            kind,
            side,
            events: processed,
        });
    }

    // End of turn: status chip, weather chip, ability ticks, bookkeeping.
    for side in SideId::both() {
        queue.push_back(StateEvent::StatusDamage { side });
    }
    match state.weather {
        Weather::Sandstorm => {
            for side in SideId::both() {
                queue.push_back(StateEvent::SandstormDamage { side });
            }
        }
        Weather::Hail => {
            for side in SideId::both() {
                queue.push_back(StateEvent::HailDamage { side });
            }
        }
        _ => {}
    }
    for side in SideId::both() {
        queue.push_back(StateEvent::EndOfTurnAbility { side });
    }
    queue.push_back(StateEvent::FinalUpdates);
    queue.drain(state, dex, &mut processed)?;

    // Chip damage can end things too.
    if let Some((kind, side)) = classify(&snapshot, &processed, dex)? {
        return Ok(TurnResult {
            kind,
            side,
            events: processed,
        });
    }

    state.turn += 1;
    Ok(TurnResult {
        kind: TurnKind::Resolved,
        side: SideId::Host,
        events: processed,
    })
}

fn action_priority(state: &BattleState, side: SideId, action: &Action, dex: &Dex) -> i8 {
    match action {
        Action::Attack { slot } if *slot >= 0 => state
            .active(side)
            .move_slot(*slot as usize)
            .filter(|ms| ms.pp > 0)
            .and_then(|ms| dex.move_data(&ms.name).ok())
            .map(|mv| mv.priority)
            .unwrap_or(0),
        _ => 0,
    }
}
