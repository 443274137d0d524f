use serde::{Deserialize, Serialize};

use schema::{Nature, StatKind, Type};

use crate::dex::Dex;
use crate::errors::EngineResult;

/// Primary status ailment. A combatant holds at most one; confusion and
/// taunt are separate counters because they stack with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ailment", rename_all = "kebab-case")]
pub enum Ailment {
    Burn,
    Paralysis,
    Sleep { turns: u8 },
    Freeze,
    Poison,
    Toxic { counter: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

impl Ability {
    pub fn named(name: &str) -> Self {
        Ability {
            name: name.to_string(),
            hidden: false,
        }
    }
}

/// HP carries no stage; only its current and max values ever matter in
/// battle, so it gets its own shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpStat {
    pub current: u16,
    pub max: u16,
    pub iv: u8,
    pub ev: u8,
}

/// One of the five staged stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStat {
    pub value: u16,
    pub iv: u8,
    pub ev: u8,
    pub stage: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub name: String,
    pub pp: u8,
}

/// A single battling creature: immutable identity plus the volatile fields
/// that only exist inside a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub species: String,
    pub nickname: String,
    pub level: u8,
    pub types: (Type, Option<Type>),
    pub nature: Nature,
    pub ability: Ability,
    pub held_item: String,
    pub hp: HpStat,
    /// ATK, DEF, SP.ATK, SP.DEF, SPD.
    pub stats: [BattleStat; 5],
    pub moves: [Option<MoveSlot>; 4],

    // Volatile battle-only fields, never persisted outside a battle.
    pub ailment: Option<Ailment>,
    pub confusion_turns: u8,
    pub taunt_turns: u8,
    pub infatuated: bool,
    pub crit_stage: u8,
    pub accuracy_stage: i8,
    pub evasion_stage: i8,
    pub can_attack: bool,
    pub switched_in: bool,
    pub truant_pending: bool,
    pub type_override: Option<Type>,
}

impl Combatant {
    /// Build a combatant from species data, deriving stats with the gen-3
    /// formula. Move slots are filled left to right with full PP.
    pub fn from_species(
        dex: &Dex,
        species_name: &str,
        nickname: &str,
        level: u8,
        ivs: [u8; 6],
        evs: [u8; 6],
        nature: Nature,
        ability: Ability,
        held_item: &str,
        move_names: &[&str],
    ) -> EngineResult<Self> {
        let species = dex.species(species_name)?;
        let base = species.base_stats.as_array();

        let max_hp = hp_formula(base[0], ivs[0], evs[0], level);
        let hp = HpStat {
            current: max_hp,
            max: max_hp,
            iv: ivs[0],
            ev: evs[0],
        };

        let stat_kinds = [
            StatKind::Attack,
            StatKind::Defense,
            StatKind::SpecialAttack,
            StatKind::SpecialDefense,
            StatKind::Speed,
        ];
        let mut stats = [BattleStat {
            value: 0,
            iv: 0,
            ev: 0,
            stage: 0,
        }; 5];
        for i in 0..5 {
            stats[i] = BattleStat {
                value: stat_formula(base[i + 1], ivs[i + 1], evs[i + 1], level, nature, stat_kinds[i]),
                iv: ivs[i + 1],
                ev: evs[i + 1],
                stage: 0,
            };
        }

        let mut slots: [Option<MoveSlot>; 4] = [const { None }; 4];
        for (i, name) in move_names.iter().take(4).enumerate() {
            let data = dex.move_data(name)?;
            slots[i] = Some(MoveSlot {
                name: data.name.clone(),
                pp: data.max_pp,
            });
        }

        Ok(Combatant {
            species: species.name.clone(),
            nickname: nickname.to_string(),
            level,
            types: species.types,
            nature,
            ability,
            held_item: held_item.to_string(),
            hp,
            stats,
            moves: slots,
            ailment: None,
            confusion_turns: 0,
            taunt_turns: 0,
            infatuated: false,
            crit_stage: 0,
            accuracy_stage: 0,
            evasion_stage: 0,
            can_attack: true,
            switched_in: false,
            truant_pending: false,
            type_override: None,
        })
    }

    pub fn is_fainted(&self) -> bool {
        self.hp.current == 0
    }

    /// Returns true if this damage faints the combatant.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.hp.current = self.hp.current.saturating_sub(amount);
        self.is_fainted()
    }

    pub fn heal(&mut self, amount: u16) {
        self.hp.current = (self.hp.current + amount).min(self.hp.max);
    }

    /// Types in effect right now; a transient override replaces both.
    pub fn current_types(&self) -> (Type, Option<Type>) {
        match self.type_override {
            Some(t) => (t, None),
            None => self.types,
        }
    }

    pub fn has_type(&self, t: Type) -> bool {
        let (a, b) = self.current_types();
        a == t || b == Some(t)
    }

    pub fn has_ability(&self, name: &str) -> bool {
        self.ability.name == name
    }

    /// Stage-modified stat value. HP never routes through here.
    pub fn stat_value(&self, kind: StatKind) -> u16 {
        let stat = &self.stats[stat_index(kind)];
        apply_stage(stat.value, stat.stage)
    }

    /// Stat value ignoring stages, used by critical hits.
    pub fn raw_stat(&self, kind: StatKind) -> u16 {
        self.stats[stat_index(kind)].value
    }

    pub fn stage(&self, kind: StatKind) -> i8 {
        match kind {
            StatKind::Accuracy => self.accuracy_stage,
            StatKind::Evasion => self.evasion_stage,
            _ => self.stats[stat_index(kind)].stage,
        }
    }

    /// Clamped stage write; returns the actual movement applied.
    pub fn shift_stage(&mut self, kind: StatKind, delta: i8) -> i8 {
        let current = self.stage(kind);
        let next = (current + delta).clamp(-6, 6);
        match kind {
            StatKind::Accuracy => self.accuracy_stage = next,
            StatKind::Evasion => self.evasion_stage = next,
            _ => self.stats[stat_index(kind)].stage = next,
        }
        next - current
    }

    /// Volatile state that leaves with the combatant on switch-out.
    pub fn clear_volatile(&mut self) {
        for stat in self.stats.iter_mut() {
            stat.stage = 0;
        }
        self.accuracy_stage = 0;
        self.evasion_stage = 0;
        self.confusion_turns = 0;
        self.taunt_turns = 0;
        self.infatuated = false;
        self.crit_stage = 0;
        self.type_override = None;
        self.truant_pending = false;
    }

    pub fn move_slot(&self, slot: usize) -> Option<&MoveSlot> {
        self.moves.get(slot).and_then(|s| s.as_ref())
    }

    pub fn move_slot_mut(&mut self, slot: usize) -> Option<&mut MoveSlot> {
        self.moves.get_mut(slot).and_then(|s| s.as_mut())
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves
            .iter()
            .flatten()
            .any(|slot| slot.pp > 0)
    }
}

fn stat_index(kind: StatKind) -> usize {
    match kind {
        StatKind::Attack => 0,
        StatKind::Defense => 1,
        StatKind::SpecialAttack => 2,
        StatKind::SpecialDefense => 3,
        StatKind::Speed => 4,
        StatKind::Accuracy | StatKind::Evasion => {
            panic!("accuracy/evasion have stages but no stat value")
        }
    }
}

fn hp_formula(base: u8, iv: u8, ev: u8, level: u8) -> u16 {
    let core = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    (core * level as u32 / 100 + level as u32 + 10) as u16
}

fn stat_formula(base: u8, iv: u8, ev: u8, level: u8, nature: Nature, kind: StatKind) -> u16 {
    let core = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let flat = core * level as u32 / 100 + 5;
    (flat as f64 * nature.multiplier(kind)).floor() as u16
}

/// Stage multipliers for the five staged stats: (2+stage)/2 going up,
/// 2/(2+|stage|) going down.
pub fn apply_stage(value: u16, stage: i8) -> u16 {
    let stage = stage.clamp(-6, 6);
    if stage == 0 {
        return value;
    }
    let multiplier = if stage > 0 {
        (2.0 + stage as f64) / 2.0
    } else {
        2.0 / (2.0 - stage as f64)
    };
    (value as f64 * multiplier).round() as u16
}

/// Accuracy and evasion use the thirds table instead.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    match stage.clamp(-6, 6) {
        -6 => 3.0 / 9.0,
        -5 => 3.0 / 8.0,
        -4 => 3.0 / 7.0,
        -3 => 3.0 / 6.0,
        -2 => 3.0 / 5.0,
        -1 => 3.0 / 4.0,
        0 => 1.0,
        1 => 4.0 / 3.0,
        2 => 5.0 / 3.0,
        3 => 6.0 / 3.0,
        4 => 7.0 / 3.0,
        5 => 8.0 / 3.0,
        _ => 9.0 / 3.0,
    }
}
