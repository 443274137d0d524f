use super::common::{battle, battle_1v1, combatant, dex};
use crate::battle::abilities::effective_speed;
use crate::battle::damage::damage;
use crate::battle::engine::process_turn;
use crate::battle::state::Weather;
use crate::combatant::Ability;
use crate::rng::BattleRng;
use crate::side::{Action, SideId};

#[test]
fn sandstorm_chips_exactly_ceil_of_a_sixteenth() {
    let dex = dex();
    let squirtle = combatant(&dex, "squirtle", 50, &["tackle"]);
    let max_hp = squirtle.hp.max;
    let geodude = combatant(&dex, "geodude", 50, &["tackle"]);
    let geodude_max = geodude.hp.max;
    let mut state = battle_1v1(squirtle, geodude, 70);
    state.weather = Weather::Sandstorm;

    process_turn(&mut state, [Action::Skip, Action::Skip], &dex).unwrap();

    assert_eq!(
        state.active(SideId::Host).hp.current,
        max_hp - max_hp.div_ceil(16),
        "non-immune combatant takes ceil(max/16)"
    );
    assert_eq!(
        state.active(SideId::Client).hp.current,
        geodude_max,
        "rock/ground is immune to sandstorm chip"
    );
}

#[test]
fn hail_spares_ice_types_only() {
    let dex = dex();
    let mut squirtle = combatant(&dex, "squirtle", 50, &["tackle"]);
    squirtle.type_override = Some(schema::Type::Ice);
    let max_hp = squirtle.hp.max;
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let charmander_max = charmander.hp.max;
    let mut state = battle_1v1(squirtle, charmander, 71);
    state.weather = Weather::Hail;

    process_turn(&mut state, [Action::Skip, Action::Skip], &dex).unwrap();

    assert_eq!(state.active(SideId::Host).hp.current, max_hp);
    assert_eq!(
        state.active(SideId::Client).hp.current,
        charmander_max - charmander_max.div_ceil(16)
    );
}

#[test]
fn sand_stream_kicks_up_a_sandstorm_on_entry() {
    let dex = dex();
    let charmander = combatant(&dex, "charmander", 50, &["scratch"]);
    let tyranitar = combatant(&dex, "tyranitar", 50, &["crunch"]);
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let bulbasaur_max = bulbasaur.hp.max;
    let mut state = battle(vec![charmander, tyranitar], vec![bulbasaur], 72);

    process_turn(&mut state, [Action::Switch { target: 1 }, Action::Skip], &dex).unwrap();

    assert_eq!(state.weather, Weather::Sandstorm);
    assert!(state.log.iter().any(|l| l == "A sandstorm kicked up!"));
    // The storm already chips the non-immune side on the turn it starts.
    assert_eq!(
        state.active(SideId::Client).hp.current,
        bulbasaur_max - bulbasaur_max.div_ceil(16)
    );
}

#[test]
fn rain_halves_fire_and_boosts_water() {
    let dex = dex();
    let charizard = combatant(&dex, "charizard", 50, &["flamethrower"]);
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let flamethrower = dex.move_data("flamethrower").unwrap().clone();

    // Identical rng streams isolate the weather modifier.
    let mut dry_rng = BattleRng::from_seed(7, 9);
    let mut wet_rng = BattleRng::from_seed(7, 9);
    let dry = damage(
        &charizard,
        &bulbasaur,
        &flamethrower,
        false,
        Weather::None,
        &mut dry_rng,
    );
    let wet = damage(
        &charizard,
        &bulbasaur,
        &flamethrower,
        false,
        Weather::Rain,
        &mut wet_rng,
    );
    assert!(wet < dry, "rain must weaken fire: {} vs {}", wet, dry);

    let squirtle = combatant(&dex, "squirtle", 50, &["water-gun"]);
    let water_gun = dex.move_data("water-gun").unwrap().clone();
    let mut dry_rng = BattleRng::from_seed(7, 9);
    let mut wet_rng = BattleRng::from_seed(7, 9);
    let dry = damage(
        &squirtle,
        &charizard,
        &water_gun,
        false,
        Weather::None,
        &mut dry_rng,
    );
    let wet = damage(
        &squirtle,
        &charizard,
        &water_gun,
        false,
        Weather::Rain,
        &mut wet_rng,
    );
    assert!(wet > dry, "rain must boost water: {} vs {}", wet, dry);
}

#[test]
fn weather_abilities_double_speed_in_their_weather() {
    let dex = dex();
    let mut squirtle = combatant(&dex, "squirtle", 50, &["tackle"]);
    let base = effective_speed(&squirtle, Weather::None);
    squirtle.ability = Ability::named("swift-swim");
    assert_eq!(effective_speed(&squirtle, Weather::Rain), base * 2);
    assert_eq!(effective_speed(&squirtle, Weather::Sun), base);

    let mut bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let base = effective_speed(&bulbasaur, Weather::None);
    bulbasaur.ability = Ability::named("chlorophyll");
    assert_eq!(effective_speed(&bulbasaur, Weather::Sun), base * 2);
    assert_eq!(effective_speed(&bulbasaur, Weather::Sandstorm), base);
}

#[test]
fn a_suppressor_parks_the_weather_and_it_returns_when_they_leave() {
    let dex = dex();
    let tyranitar = combatant(&dex, "tyranitar", 50, &["crunch"]);
    let mut suppressor = combatant(&dex, "pikachu", 50, &["tackle"]);
    suppressor.ability = Ability::named("cloud-nine");
    let bulbasaur = combatant(&dex, "bulbasaur", 50, &["tackle"]);
    let mut state = battle(
        vec![tyranitar],
        vec![bulbasaur, suppressor],
        73,
    );
    state.weather = Weather::Sandstorm;

    // Cloud Nine walks in: the storm is parked, nobody takes chip damage.
    process_turn(&mut state, [Action::Skip, Action::Switch { target: 1 }], &dex).unwrap();
    assert_eq!(state.weather, Weather::None);
    assert_eq!(state.suppressed_weather, Some(Weather::Sandstorm));

    // Cloud Nine leaves: final updates put the storm back.
    process_turn(&mut state, [Action::Skip, Action::Switch { target: 0 }], &dex).unwrap();
    assert_eq!(state.weather, Weather::Sandstorm);
    assert_eq!(state.suppressed_weather, None);
}
