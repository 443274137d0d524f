//! A code-defined demo dataset and prefab teams.
//!
//! The engine itself never loads data; embedders inject whatever tables
//! they have. This module is the battery-included counterpart used by the
//! demo binary and the test suite: a small dex of well-known species and
//! moves, plus ready-made teams.

use schema::{
    AilmentKind, BaseStats, DamageClass, MoveData, MoveKind, MoveMeta, MoveTarget, Nature,
    SpeciesData, StatChange, StatKind, Type,
};

use crate::combatant::{Ability, Combatant};
use crate::dex::Dex;
use crate::errors::EngineResult;
use crate::side::Side;

fn species(
    dex_number: u16,
    name: &str,
    types: (Type, Option<Type>),
    stats: [u8; 6],
    abilities: &[&str],
    moves: &[&str],
) -> SpeciesData {
    SpeciesData {
        dex_number,
        name: name.to_string(),
        types,
        base_stats: BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            sp_attack: stats[3],
            sp_defense: stats[4],
            speed: stats[5],
        },
        abilities: abilities.iter().map(|a| a.to_string()).collect(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
    }
}

fn strike(
    name: &str,
    move_type: Type,
    power: u16,
    accuracy: Option<u8>,
    class: DamageClass,
    contact: bool,
    pp: u8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        accuracy,
        power,
        priority: 0,
        damage_class: class,
        target: MoveTarget::Opponent,
        meta: MoveMeta::damage(contact),
        max_pp: pp,
    }
}

fn ailment_move(
    name: &str,
    move_type: Type,
    accuracy: Option<u8>,
    kind: AilmentKind,
    pp: u8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        accuracy,
        power: 0,
        priority: 0,
        damage_class: DamageClass::Status,
        target: MoveTarget::Opponent,
        meta: MoveMeta {
            kind: MoveKind::Ailment,
            ailment: Some(kind),
            ailment_chance: 0,
            flinch_chance: 0,
            stat_changes: Vec::new(),
            stat_chance: 0,
            drain: 0,
            healing: 0,
            makes_contact: false,
        },
        max_pp: pp,
    }
}

fn stat_move(
    name: &str,
    target: MoveTarget,
    changes: &[(StatKind, i8)],
    accuracy: Option<u8>,
    pp: u8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type: Type::Normal,
        accuracy,
        power: 0,
        priority: 0,
        damage_class: DamageClass::Status,
        target,
        meta: MoveMeta {
            kind: MoveKind::NetGoodStats,
            ailment: None,
            ailment_chance: 0,
            flinch_chance: 0,
            stat_changes: changes
                .iter()
                .map(|&(stat, delta)| StatChange { stat, delta })
                .collect(),
            stat_chance: 0,
            drain: 0,
            healing: 0,
            makes_contact: false,
        },
        max_pp: pp,
    }
}

/// Build the demo dex. Numbers are the classic base stats; the move set is
/// the slice of the full table the demo teams and the test suite exercise.
pub fn demo_dex() -> Dex {
    let species_table = vec![
        species(
            1,
            "bulbasaur",
            (Type::Grass, Some(Type::Poison)),
            [45, 49, 49, 65, 65, 45],
            &["overgrow"],
            &["tackle", "vine-whip", "growl", "toxic", "giga-drain"],
        ),
        species(
            4,
            "charmander",
            (Type::Fire, None),
            [39, 52, 43, 60, 50, 65],
            &["blaze"],
            &["scratch", "tackle", "ember", "growl", "tail-whip", "scary-face"],
        ),
        species(
            6,
            "charizard",
            (Type::Fire, Some(Type::Flying)),
            [78, 84, 78, 109, 85, 100],
            &["blaze"],
            &[
                "tackle",
                "ember",
                "flamethrower",
                "scary-face",
                "tail-whip",
                "earthquake",
                "roar",
            ],
        ),
        species(
            7,
            "squirtle",
            (Type::Water, None),
            [44, 48, 65, 50, 64, 43],
            &["torrent"],
            &["tackle", "water-gun", "tail-whip", "confuse-ray"],
        ),
        species(
            25,
            "pikachu",
            (Type::Electric, None),
            [35, 55, 40, 50, 50, 90],
            &["lightning-rod"],
            &["tackle", "quick-attack", "thunderbolt", "thunder-wave"],
        ),
        species(
            74,
            "geodude",
            (Type::Rock, Some(Type::Ground)),
            [40, 80, 100, 30, 30, 20],
            &["rock-head"],
            &["tackle", "rock-slide", "earthquake", "fissure"],
        ),
        species(
            130,
            "gyarados",
            (Type::Water, Some(Type::Flying)),
            [95, 125, 79, 60, 100, 81],
            &["intimidate"],
            &["bite", "surf", "earthquake", "double-edge"],
        ),
        species(
            248,
            "tyranitar",
            (Type::Rock, Some(Type::Dark)),
            [100, 134, 110, 95, 100, 61],
            &["sand-stream"],
            &["crunch", "rock-slide", "earthquake", "scary-face"],
        ),
        species(
            287,
            "slakoth",
            (Type::Normal, None),
            [60, 60, 60, 35, 35, 30],
            &["truant"],
            &["scratch", "tackle"],
        ),
    ];

    let mut move_table = vec![
        strike("tackle", Type::Normal, 40, Some(100), DamageClass::Physical, true, 35),
        strike("scratch", Type::Normal, 40, Some(100), DamageClass::Physical, true, 35),
        strike("vine-whip", Type::Grass, 45, Some(100), DamageClass::Physical, true, 25),
        strike("water-gun", Type::Water, 40, Some(100), DamageClass::Special, false, 25),
        strike("surf", Type::Water, 90, Some(100), DamageClass::Special, false, 15),
        strike("earthquake", Type::Ground, 100, Some(100), DamageClass::Physical, false, 10),
        ailment_move("thunder-wave", Type::Electric, Some(90), AilmentKind::Paralysis, 20),
        ailment_move("toxic", Type::Poison, Some(90), AilmentKind::Toxic, 10),
        ailment_move("confuse-ray", Type::Ghost, Some(100), AilmentKind::Confusion, 10),
        stat_move("tail-whip", MoveTarget::Opponent, &[(StatKind::Defense, -1)], Some(100), 30),
        stat_move("growl", MoveTarget::Opponent, &[(StatKind::Attack, -1)], Some(100), 40),
        stat_move("scary-face", MoveTarget::Opponent, &[(StatKind::Speed, -2)], Some(100), 10),
        stat_move("swords-dance", MoveTarget::User, &[(StatKind::Attack, 2)], None, 20),
    ];

    // The entries below need meta tweaks the helpers don't cover.
    let mut ember = strike("ember", Type::Fire, 40, Some(100), DamageClass::Special, false, 25);
    ember.meta.kind = MoveKind::DamageAilment;
    ember.meta.ailment = Some(AilmentKind::Burn);
    ember.meta.ailment_chance = 10;
    move_table.push(ember);

    let mut flamethrower =
        strike("flamethrower", Type::Fire, 90, Some(100), DamageClass::Special, false, 15);
    flamethrower.meta.kind = MoveKind::DamageAilment;
    flamethrower.meta.ailment = Some(AilmentKind::Burn);
    flamethrower.meta.ailment_chance = 10;
    move_table.push(flamethrower);

    let mut thunderbolt =
        strike("thunderbolt", Type::Electric, 90, Some(100), DamageClass::Special, false, 15);
    thunderbolt.meta.kind = MoveKind::DamageAilment;
    thunderbolt.meta.ailment = Some(AilmentKind::Paralysis);
    thunderbolt.meta.ailment_chance = 10;
    move_table.push(thunderbolt);

    let mut quick_attack =
        strike("quick-attack", Type::Normal, 40, Some(100), DamageClass::Physical, true, 30);
    quick_attack.priority = 1;
    move_table.push(quick_attack);

    let mut rock_slide =
        strike("rock-slide", Type::Rock, 75, Some(90), DamageClass::Physical, false, 10);
    rock_slide.meta.flinch_chance = 30;
    move_table.push(rock_slide);

    let mut bite = strike("bite", Type::Dark, 60, Some(100), DamageClass::Physical, true, 25);
    bite.meta.flinch_chance = 30;
    move_table.push(bite);

    let mut crunch = strike("crunch", Type::Dark, 80, Some(100), DamageClass::Physical, true, 15);
    crunch.meta.kind = MoveKind::DamageLower;
    crunch.meta.stat_changes = vec![StatChange {
        stat: StatKind::SpecialDefense,
        delta: -1,
    }];
    crunch.meta.stat_chance = 20;
    move_table.push(crunch);

    let mut giga_drain =
        strike("giga-drain", Type::Grass, 60, Some(100), DamageClass::Special, false, 5);
    giga_drain.meta.drain = 50;
    move_table.push(giga_drain);

    let mut double_edge =
        strike("double-edge", Type::Normal, 120, Some(100), DamageClass::Physical, true, 15);
    double_edge.meta.drain = -33;
    move_table.push(double_edge);

    let mut recover = MoveData {
        name: "recover".to_string(),
        move_type: Type::Normal,
        accuracy: None,
        power: 0,
        priority: 0,
        damage_class: DamageClass::Status,
        target: MoveTarget::User,
        meta: MoveMeta::damage(false),
        max_pp: 10,
    };
    recover.meta.kind = MoveKind::Heal;
    recover.meta.healing = 50;
    move_table.push(recover);

    let mut fissure = strike("fissure", Type::Ground, 0, Some(30), DamageClass::Physical, false, 5);
    fissure.meta.kind = MoveKind::Ohko;
    move_table.push(fissure);

    let mut roar = MoveData {
        name: "roar".to_string(),
        move_type: Type::Normal,
        accuracy: None,
        power: 0,
        priority: -6,
        damage_class: DamageClass::Status,
        target: MoveTarget::Opponent,
        meta: MoveMeta::damage(false),
        max_pp: 20,
    };
    roar.meta.kind = MoveKind::ForceSwitch;
    move_table.push(roar);

    let mut struggle =
        strike("struggle", Type::Normal, 50, None, DamageClass::Physical, true, 1);
    struggle.meta.kind = MoveKind::Unique;
    move_table.push(struggle);

    Dex::new(species_table, move_table)
        .with_items(["oran-berry", "leftovers", "choice-band"].map(String::from))
}

/// Convenience constructor used by the demo and the tests: full IVs, no
/// EVs, neutral nature, the species' first listed ability.
pub fn make_combatant(
    dex: &Dex,
    species_name: &str,
    level: u8,
    moves: &[&str],
) -> EngineResult<Combatant> {
    let ability_name = dex
        .species(species_name)?
        .abilities
        .first()
        .cloned()
        .unwrap_or_default();
    let nickname = {
        let mut chars = species_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    Combatant::from_species(
        dex,
        species_name,
        &nickname,
        level,
        [31; 6],
        [0; 6],
        Nature::Hardy,
        Ability::named(&ability_name),
        "",
        moves,
    )
}

/// The demo host team.
pub fn demo_host_side(dex: &Dex, clock_secs: u32) -> EngineResult<Side> {
    let team = vec![
        make_combatant(dex, "charizard", 50, &["ember", "flamethrower", "scary-face", "roar"])?,
        make_combatant(dex, "squirtle", 50, &["water-gun", "tackle", "tail-whip", "confuse-ray"])?,
        make_combatant(dex, "pikachu", 50, &["thunderbolt", "quick-attack", "thunder-wave", "tackle"])?,
    ];
    Ok(Side::new("Host", team, clock_secs))
}

/// The demo client team.
pub fn demo_client_side(dex: &Dex, clock_secs: u32) -> EngineResult<Side> {
    let team = vec![
        make_combatant(dex, "gyarados", 50, &["bite", "surf", "earthquake", "double-edge"])?,
        make_combatant(dex, "bulbasaur", 50, &["vine-whip", "giga-drain", "toxic", "growl"])?,
        make_combatant(dex, "geodude", 50, &["rock-slide", "earthquake", "tackle", "fissure"])?,
    ];
    Ok(Side::new("Client", team, clock_secs))
}
