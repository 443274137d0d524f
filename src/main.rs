//! AI-vs-AI demo battle over the built-in demo dex, printing the rolling
//! message log as turns resolve.

use pokemon_duel::battle::ai::{HeuristicOpponent, Opponent};
use pokemon_duel::battle::engine::process_turn;
use pokemon_duel::battle::state::{BattleState, TurnKind};
use pokemon_duel::rng::BattleRng;
use pokemon_duel::side::SideId;
use pokemon_duel::teams::{demo_client_side, demo_dex, demo_host_side};

fn main() {
    let dex = demo_dex();
    let host = demo_host_side(&dex, 300).expect("demo host team");
    let client = demo_client_side(&dex, 300).expect("demo client team");
    let mut state = BattleState::new(host, client, BattleRng::from_entropy());

    let brain = HeuristicOpponent::new();

    for _ in 0..200 {
        let actions = [
            brain.choose(&state, SideId::Host, &dex),
            brain.choose(&state, SideId::Client, &dex),
        ];
        let result = match process_turn(&mut state, actions, &dex) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("turn failed: {}", err);
                return;
            }
        };

        for line in &state.log {
            println!("{}", line);
        }
        state.log.clear();

        if result.kind == TurnKind::GameOver {
            let winner = state.side(result.side.opponent());
            println!("{} wins the battle!", winner.name);
            return;
        }
    }
    println!("Battle called after 200 resolutions.");
}
