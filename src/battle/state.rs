use serde::{Deserialize, Serialize};

use crate::battle::events::StateEvent;
use crate::combatant::Combatant;
use crate::rng::BattleRng;
use crate::side::{Side, SideId};

/// Most recent battle messages kept in the rolling history.
const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    None,
    Sun,
    Rain,
    Sandstorm,
    Hail,
}

impl Weather {
    pub fn start_message(self) -> Option<&'static str> {
        match self {
            Weather::None => None,
            Weather::Sun => Some("The sunlight turned harsh!"),
            Weather::Rain => Some("It started to rain!"),
            Weather::Sandstorm => Some("A sandstorm kicked up!"),
            Weather::Hail => Some("It started to hail!"),
        }
    }
}

/// The whole authoritative battle. Cloning deep-copies both teams, which is
/// exactly what the speculative replay and the AI rely on; the RNG seed
/// rides along so a clone replays identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub sides: [Side; 2],
    pub turn: u32,
    pub weather: Weather,
    /// Weather parked here while a weather-suppressing ability is on the
    /// field; restored by the end-of-turn final updates once the
    /// suppressor leaves.
    pub suppressed_weather: Option<Weather>,
    pub rng: BattleRng,
    pub log: Vec<String>,
}

impl BattleState {
    pub fn new(host: Side, client: Side, rng: BattleRng) -> Self {
        BattleState {
            sides: [host, client],
            turn: 1,
            weather: Weather::None,
            suppressed_weather: None,
            rng,
            log: Vec::new(),
        }
    }

    pub fn side(&self, id: SideId) -> &Side {
        &self.sides[id.index()]
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut Side {
        &mut self.sides[id.index()]
    }

    pub fn active(&self, id: SideId) -> &Combatant {
        self.side(id).active_combatant()
    }

    pub fn active_mut(&mut self, id: SideId) -> &mut Combatant {
        self.side_mut(id).active_combatant_mut()
    }

    pub fn push_log(&mut self, message: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.remove(0);
        }
        self.log.push(message);
    }
}

/// How a resolved turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnKind {
    /// The turn ran to completion; request the next pair of actions.
    Resolved,
    /// An active combatant went down; the named side must switch before
    /// the battle continues.
    ForceSwitch,
    /// The named side is out of usable combatants and has lost.
    GameOver,
}

/// What the orchestrator hands back: the terminal classification plus the
/// flat, ordered record of everything that happened. The event list is what
/// travels to the peer inside a `TurnResolve` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub kind: TurnKind,
    /// The side the classification concerns: who must switch, or who lost.
    /// `Host` by convention for `Resolved`.
    pub side: SideId,
    pub events: Vec<StateEvent>,
}
