use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;

/// Identifies one of the two sides. The host is always index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideId {
    Host,
    Client,
}

impl SideId {
    pub fn index(self) -> usize {
        match self {
            SideId::Host => 0,
            SideId::Client => 1,
        }
    }

    pub fn opponent(self) -> SideId {
        match self {
            SideId::Host => SideId::Client,
            SideId::Client => SideId::Host,
        }
    }

    pub fn from_index(index: usize) -> SideId {
        match index {
            0 => SideId::Host,
            1 => SideId::Client,
            _ => panic!("invalid side index: {}", index),
        }
    }

    pub fn both() -> [SideId; 2] {
        [SideId::Host, SideId::Client]
    }
}

/// A player's intent for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Bring out the combatant at this team index.
    Switch { target: usize },
    /// Use the move in this slot; -1 is the Struggle sentinel used when no
    /// move has PP remaining.
    Attack { slot: i8 },
    /// Do nothing this turn.
    Skip,
}

/// The multiplayer turn clock. One per side; it only counts down while that
/// side is the one being waited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    pub remaining_secs: u32,
    pub paused: bool,
}

impl TurnClock {
    pub fn new(secs: u32) -> Self {
        TurnClock {
            remaining_secs: secs,
            paused: false,
        }
    }

    /// One tick of the countdown. Returns true exactly when the clock runs
    /// out, which the caller turns into a unilateral game-over.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

/// One player's half of the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub name: String,
    pub team: Vec<Combatant>,
    pub active: usize,
    /// Set when the active combatant goes down; survives the force-switch
    /// sub-phase and is only cleared at a true turn boundary.
    pub fainted_this_turn: bool,
    pub clock: TurnClock,
}

impl Side {
    pub fn new(name: &str, team: Vec<Combatant>, clock_secs: u32) -> Self {
        Side {
            name: name.to_string(),
            team,
            active: 0,
            fainted_this_turn: false,
            clock: TurnClock::new(clock_secs),
        }
    }

    pub fn active_combatant(&self) -> &Combatant {
        &self.team[self.active]
    }

    pub fn active_combatant_mut(&mut self) -> &mut Combatant {
        &mut self.team[self.active]
    }

    pub fn has_living_combatant(&self) -> bool {
        self.team.iter().any(|c| !c.is_fainted())
    }

    /// Team slots (other than the active one) that still have a living
    /// combatant, in team order.
    pub fn living_benched_slots(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != self.active && !c.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_id_round_trips() {
        assert_eq!(SideId::Host.index(), 0);
        assert_eq!(SideId::Client.index(), 1);
        assert_eq!(SideId::from_index(0), SideId::Host);
        assert_eq!(SideId::Host.opponent(), SideId::Client);
        assert_eq!(SideId::Client.opponent(), SideId::Host);
    }

    #[test]
    fn clock_counts_down_and_signals_expiry() {
        let mut clock = TurnClock::new(2);
        assert!(!clock.tick());
        assert!(clock.tick());
        assert!(!clock.tick());
    }

    #[test]
    fn paused_clock_holds_still() {
        let mut clock = TurnClock::new(5);
        clock.pause();
        for _ in 0..10 {
            assert!(!clock.tick());
        }
        assert_eq!(clock.remaining_secs, 5);
        clock.resume();
        assert!(!clock.tick());
        assert_eq!(clock.remaining_secs, 4);
    }
}
