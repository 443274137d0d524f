use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::stats::{DamageClass, StatKind};
use crate::types::Type;

/// Primary ailments plus confusion, as they appear in move metadata.
/// Confusion never occupies the primary ailment slot on a combatant; the
/// engine tracks it as a separate counter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AilmentKind {
    Burn,
    Paralysis,
    Sleep,
    Freeze,
    Poison,
    Toxic,
    Confusion,
}

/// Broad behavior family of a move. Each family has exactly one handler in
/// the engine's attack resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    Damage,
    Ailment,
    DamageAilment,
    NetGoodStats,
    DamageLower,
    DamageRaise,
    Heal,
    Ohko,
    ForceSwitch,
    Unique,
}

/// Who a move's stat changes and ailments land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveTarget {
    User,
    Opponent,
}

/// One entry of a move's stat-change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatKind,
    pub delta: i8,
}

/// Secondary-effect metadata attached to every move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveMeta {
    pub kind: MoveKind,
    /// Ailment inflicted by ailment-family moves. `ailment_chance` of 0
    /// means the ailment always lands when the move hits.
    pub ailment: Option<AilmentKind>,
    pub ailment_chance: u8,
    pub flinch_chance: u8,
    pub stat_changes: Vec<StatChange>,
    /// Chance for the stat-change list to apply; 0 means always.
    pub stat_chance: u8,
    /// Percent of dealt damage recovered (positive) or taken as recoil
    /// (negative).
    pub drain: i8,
    /// Percent of max HP restored by heal-family moves.
    pub healing: u8,
    pub makes_contact: bool,
}

impl MoveMeta {
    /// Plain damaging move with no secondary effect.
    pub fn damage(makes_contact: bool) -> Self {
        MoveMeta {
            kind: MoveKind::Damage,
            ailment: None,
            ailment_chance: 0,
            flinch_chance: 0,
            stat_changes: Vec::new(),
            stat_chance: 0,
            drain: 0,
            healing: 0,
            makes_contact,
        }
    }
}

/// The immutable definition of a move. PP is not here: remaining uses are
/// battle state, stored per combatant per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: Type,
    /// `None` means the move never misses.
    pub accuracy: Option<u8>,
    pub power: u16,
    pub priority: i8,
    pub damage_class: DamageClass,
    pub target: MoveTarget,
    pub meta: MoveMeta,
    pub max_pp: u8,
}
