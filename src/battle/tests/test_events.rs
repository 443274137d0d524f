use super::common::{battle, battle_1v1, combatant, dex};
use crate::battle::engine::process_turn;
use crate::battle::events::{EventQueue, StateEvent};
use crate::battle::state::Weather;
use crate::combatant::{Ability, Ailment};
use crate::side::{Action, SideId};

/// The core ordering invariant: everything an event causes is processed
/// before anything that was queued earlier than it.
#[test]
fn follow_ups_run_before_previously_queued_events() {
    let dex = dex();
    let mut charizard = combatant(&dex, "charizard", 50, &["ember"]);
    charizard.ailment = Some(Ailment::Sleep { turns: 1 });
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle_1v1(charizard, bulbasaur, 81);

    let mut queue = EventQueue::new();
    queue.push_back(StateEvent::SleepGate {
        side: SideId::Host,
        attack: Box::new(StateEvent::Attack {
            side: SideId::Host,
            slot: 0,
        }),
    });
    queue.push_back(StateEvent::Message {
        text: "sentinel".to_string(),
    });

    let mut processed = Vec::new();
    queue.drain(&mut state, &dex, &mut processed).unwrap();

    // Waking re-emits the carried attack, whose own follow-up (the damage)
    // must all land before the sentinel that was queued first.
    let attack_pos = processed
        .iter()
        .position(|e| matches!(e, StateEvent::Attack { .. }))
        .expect("the carried attack must be processed");
    let damage_pos = processed
        .iter()
        .position(|e| matches!(e, StateEvent::Damage { .. }))
        .expect("the attack's damage must be processed");
    let sentinel_pos = processed
        .iter()
        .position(|e| matches!(e, StateEvent::Message { .. }))
        .expect("the sentinel must be processed");
    assert!(attack_pos < sentinel_pos);
    assert!(damage_pos < sentinel_pos);
    assert!(attack_pos < damage_pos);
}

#[test]
fn trapping_ability_blocks_the_switch() {
    let dex = dex();
    let mut trapper = combatant(&dex, "geodude", 50, &["tackle"]);
    trapper.ability = Ability::named("arena-trap");
    let squirtle = combatant(&dex, "squirtle", 50, &["tackle"]);
    let pikachu = combatant(&dex, "pikachu", 50, &["tackle"]);
    let mut state = battle(vec![trapper], vec![squirtle, pikachu], 82);

    process_turn(&mut state, [Action::Skip, Action::Switch { target: 1 }], &dex).unwrap();

    assert_eq!(
        state.side(SideId::Client).active,
        0,
        "arena trap must pin the grounded switcher"
    );
    assert!(state
        .log
        .iter()
        .any(|l| l == "Squirtle is trapped by Geodude's Arena Trap!"));
}

#[test]
fn fliers_slip_past_arena_trap() {
    let dex = dex();
    let mut trapper = combatant(&dex, "geodude", 50, &["tackle"]);
    trapper.ability = Ability::named("arena-trap");
    let charizard = combatant(&dex, "charizard", 50, &["ember"]);
    let pikachu = combatant(&dex, "pikachu", 50, &["tackle"]);
    let mut state = battle(vec![trapper], vec![charizard, pikachu], 82);

    process_turn(&mut state, [Action::Skip, Action::Switch { target: 1 }], &dex).unwrap();

    assert_eq!(state.side(SideId::Client).active, 1);
}

#[test]
fn intimidate_drops_the_opposing_attack_on_entry() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let gyarados = combatant(&dex, "gyarados", 50, &["bite"]);
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle(vec![charmander, gyarados], vec![bulbasaur], 83);

    process_turn(&mut state, [Action::Switch { target: 1 }, Action::Skip], &dex).unwrap();

    assert_eq!(
        state.active(SideId::Client).stage(schema::StatKind::Attack),
        -1
    );
    assert!(state.log.iter().any(|l| l == "Gyarados's Intimidate!"));
}

#[test]
fn trace_copies_the_opposing_ability_on_entry() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let mut tracer = combatant(&dex, "pikachu", 50, &["tackle"]);
    tracer.ability = Ability::named("trace");
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle(vec![charmander, tracer], vec![bulbasaur], 84);

    process_turn(&mut state, [Action::Switch { target: 1 }, Action::Skip], &dex).unwrap();

    assert_eq!(state.active(SideId::Host).ability.name, "overgrow");
    assert!(state
        .log
        .iter()
        .any(|l| l == "Pikachu traced the foe's Overgrow!"));
}

#[test]
fn stat_stages_clamp_at_the_floor() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["growl"]);
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle_1v1(charmander, bulbasaur, 85);

    for _ in 0..7 {
        process_turn(&mut state, [Action::Attack { slot: 0 }, Action::Skip], &dex).unwrap();
    }

    assert_eq!(
        state.active(SideId::Client).stage(schema::StatKind::Attack),
        -6
    );
    assert!(state
        .log
        .iter()
        .any(|l| l == "Bulbasaur's Attack won't go any lower!"));
}

#[test]
fn hostile_stat_drops_bounce_off_clear_body() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["growl"]);
    let mut bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    bulbasaur.ability = Ability::named("clear-body");
    let mut state = battle_1v1(charmander, bulbasaur, 86);

    process_turn(&mut state, [Action::Attack { slot: 0 }, Action::Skip], &dex).unwrap();

    assert_eq!(
        state.active(SideId::Client).stage(schema::StatKind::Attack),
        0
    );
    assert!(state.log.iter().any(|l| l == "Bulbasaur's Clear Body!"));
}

#[test]
fn lightning_rod_grounds_out_electric_hits() {
    let dex = dex();
    let host = combatant(&dex, "pikachu", 50, &["thunderbolt"]);
    let rod = combatant(&dex, "pikachu", 50, &["tackle"]);
    let rod_max = rod.hp.max;
    let mut state = battle_1v1(host, rod, 87);

    process_turn(&mut state, [Action::Attack { slot: 0 }, Action::Skip], &dex).unwrap();

    assert_eq!(state.active(SideId::Client).hp.current, rod_max);
    assert!(state.log.iter().any(|l| l == "It doesn't affect Pikachu..."));
}

#[test]
fn forecast_re_derives_type_with_the_sky() {
    let dex = dex();
    let mut caster = combatant(&dex, "squirtle", 50, &["tackle"]);
    caster.ability = Ability::named("forecast");
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle_1v1(caster, bulbasaur, 88);

    let mut queue = EventQueue::new();
    queue.push_back(StateEvent::WeatherChange {
        weather: Weather::Sun,
    });
    let mut processed = Vec::new();
    queue.drain(&mut state, &dex, &mut processed).unwrap();

    assert_eq!(
        state.active(SideId::Host).type_override,
        Some(schema::Type::Fire)
    );
    assert!(processed
        .iter()
        .any(|e| matches!(e, StateEvent::TypeChange { .. })));
}

#[test]
fn ailment_immunity_redirects_to_an_ability_activation() {
    let dex = dex();
    let pikachu = combatant(&dex, "pikachu", 50, &["thunder-wave"]);
    let mut limber = combatant(&dex, "squirtle", 50, &["tackle"]);
    limber.ability = Ability::named("limber");
    let mut state = battle_1v1(pikachu, limber, 89);

    // Thunder Wave is 90% accurate; retry across seeds until it connects.
    let mut landed = false;
    for seed in 0..20u64 {
        let mut trial = state.clone();
        trial.rng = crate::rng::BattleRng::from_seed(seed, seed + 1);
        let result = process_turn(
            &mut trial,
            [Action::Attack { slot: 0 }, Action::Skip],
            &dex,
        )
        .unwrap();
        if trial.log.iter().any(|l| l == "Pikachu's attack missed!") {
            continue;
        }
        landed = true;
        assert_eq!(trial.active(SideId::Client).ailment, None);
        assert!(
            result
                .events
                .iter()
                .any(|e| matches!(e, StateEvent::AbilityActivation { side: SideId::Client, .. })),
            "immunity must surface as an ability activation event"
        );
        break;
    }
    assert!(landed, "thunder wave missed in 20 straight trials");
}

#[test]
fn pressure_doubles_pp_spent_against_it() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let mut presser = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    presser.ability = Ability::named("pressure");
    let mut state = battle_1v1(charmander, presser, 90);

    let pp_before = state.active(SideId::Host).move_slot(0).unwrap().pp;
    process_turn(&mut state, [Action::Attack { slot: 0 }, Action::Skip], &dex).unwrap();
    assert_eq!(
        state.active(SideId::Host).move_slot(0).unwrap().pp,
        pp_before - 2
    );
}

#[test]
fn rough_skin_rakes_contact_attackers() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let charmander_max = charmander.hp.max;
    let mut spiky = combatant(&dex, "squirtle", 50, &["tackle"]);
    spiky.ability = Ability::named("rough-skin");
    let spiky_max = spiky.hp.max;
    let mut state = battle_1v1(charmander, spiky, 91);

    process_turn(&mut state, [Action::Attack { slot: 0 }, Action::Skip], &dex).unwrap();

    assert!(
        state.active(SideId::Host).hp.current < charmander_max,
        "contact into rough skin must cost the attacker HP"
    );
    assert_eq!(
        charmander_max - state.active(SideId::Host).hp.current,
        (charmander_max / 16).max(1)
    );
    assert!(state.active(SideId::Client).hp.current < spiky_max);
}

#[test]
fn struggle_recoils_on_the_user() {
    let dex = dex();
    let mut charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    for slot in charmander.moves.iter_mut().flatten() {
        slot.pp = 0;
    }
    let charmander_max = charmander.hp.max;
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let bulbasaur_max = bulbasaur.hp.max;
    let mut state = battle_1v1(charmander, bulbasaur, 92);

    process_turn(&mut state, [Action::Attack { slot: -1 }, Action::Skip], &dex).unwrap();

    assert!(state.active(SideId::Client).hp.current < bulbasaur_max);
    assert!(
        state.active(SideId::Host).hp.current < charmander_max,
        "struggle recoil must come back on the user"
    );
    assert!(state.log.iter().any(|l| l == "Charmander used Struggle!"));
}
