use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use seabattle::{Coordinate, Fleet, GameError, GameState, PlayerSlot, ShotResult, NUM_SHIPS};

/// Both fleets placed at random, then up to `shots` random fire attempts by
/// whichever player holds the turn (including repeats and rejected shots).
fn random_game(seed: u64, shots: usize) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = GameState::new();
    for slot in PlayerSlot::ALL {
        let cells: Vec<Coordinate> = Fleet::random(&mut rng).cells().collect();
        game.place_ships(slot, &cells).unwrap();
    }
    for _ in 0..shots {
        if game.is_over() {
            break;
        }
        let target = Coordinate::from_index(rng.random_range(0..100)).unwrap();
        let _ = game.fire(game.current_turn(), target);
    }
    game
}

fn assert_invariants(game: &GameState) -> Result<(), TestCaseError> {
    for slot in PlayerSlot::ALL {
        let p = game.player(slot);
        let ships = p.fleet.grid();
        prop_assert!(ships.count_ones() == 0 || ships.count_ones() == NUM_SHIPS);
        prop_assert!(p.hits.is_subset_of(&ships));
        prop_assert!(p.hits.is_disjoint(&p.misses));
    }
    let sunk: Vec<_> = PlayerSlot::ALL
        .into_iter()
        .filter(|s| game.player(*s).fleet.is_placed() && game.player(*s).ships_remaining() == 0)
        .collect();
    match game.winner() {
        Some(w) => prop_assert_eq!(sunk, vec![w.opponent()]),
        None => prop_assert!(sunk.is_empty()),
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn random_games_keep_invariants(seed in any::<u64>(), shots in 0usize..250) {
        let game = random_game(seed, shots);
        assert_invariants(&game)?;
    }

    #[test]
    fn turn_passes_only_on_miss(seed in any::<u64>(), shots in 0usize..150, idx in 0usize..100) {
        let mut game = random_game(seed, shots);
        let turn = game.current_turn();
        let target = Coordinate::from_index(idx).unwrap();
        let before = game.clone();
        match game.fire(turn, target) {
            Ok(shot) => {
                let expected = if shot.result == ShotResult::Miss { turn.opponent() } else { turn };
                prop_assert_eq!(game.current_turn(), expected);
                prop_assert_eq!(shot.game_over, shot.result == ShotResult::Victory);
            }
            Err(GameError::AlreadyShotHere(_)) | Err(GameError::AlreadyGameOver) => {
                prop_assert_eq!(game, before);
            }
            Err(e) => prop_assert!(false, "unexpected rejection {:?}", e),
        }
    }

    #[test]
    fn out_of_turn_never_changes_state(seed in any::<u64>(), shots in 0usize..150, idx in 0usize..100) {
        let mut game = random_game(seed, shots);
        let before = game.clone();
        let target = Coordinate::from_index(idx).unwrap();
        let err = game.fire(game.current_turn().opponent(), target).unwrap_err();
        prop_assert!(matches!(err, GameError::NotYourTurn | GameError::AlreadyGameOver));
        prop_assert_eq!(game, before);
    }

    #[test]
    fn reset_is_observably_fresh(seed in any::<u64>(), shots in 0usize..250) {
        let mut game = random_game(seed, shots);
        game.reset();
        let fresh = GameState::new().snapshot();
        let snap = game.snapshot();
        prop_assert_eq!(snap.players, fresh.players);
        prop_assert_eq!(snap.current_turn, PlayerSlot::Player1);
        prop_assert!(!snap.game_over);
        prop_assert_eq!(snap.winner, None);
    }
}
