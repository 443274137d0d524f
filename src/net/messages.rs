use serde::{Deserialize, Serialize};

use crate::battle::state::TurnResult;
use crate::side::{Action, SideId};

/// Timer synchronization payload. The host's clock is authoritative; the
/// client echoes pauses back through the `ClientPause` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerUpdate {
    pub directive: TimerDirective,
    pub host_secs: u32,
    pub client_secs: u32,
    pub host_paused: bool,
    pub client_paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerDirective {
    Sync,
    ClientPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    /// A side's turn clock ran out. A normal, if unilateral, outcome.
    Timeout,
    Concession,
    Defeat,
}

/// Everything that crosses the wire, tagged so the decoder reconstructs
/// the exact variant. A `TurnResolve` carries the full ordered event list
/// of a resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "kebab-case")]
pub enum WireMessage {
    SendAction { action: Action },
    TurnResolve { result: TurnResult },
    UpdateTimer(TimerUpdate),
    GameOver { side: SideId, reason: GameOverReason },
}
