use std::sync::Arc;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;

use seabattle::{
    transport::in_memory::InMemoryTransport, Coordinate, Fleet, GameService, PlayerSlot, Skeleton,
    Stub,
};

/// Random shooter that never repeats a target.
async fn take_turn(
    stub: &mut Stub<InMemoryTransport>,
    me: PlayerSlot,
    rng: &mut SmallRng,
    untried: &mut Vec<Coordinate>,
) -> anyhow::Result<()> {
    let idx = rng.random_range(0..untried.len());
    let target = untried.swap_remove(idx);
    stub.fire(me.as_str(), &target.to_string()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let mut rngs = [SmallRng::seed_from_u64(seed1), SmallRng::seed_from_u64(seed2)];

    let service = Arc::new(GameService::new());
    let mut stubs = Vec::new();
    for _ in PlayerSlot::ALL {
        let (client, server) = InMemoryTransport::pair();
        let mut skeleton = Skeleton::new(service.clone(), server);
        tokio::spawn(async move { skeleton.run().await });
        stubs.push(Stub::new(client));
    }

    for (i, me) in PlayerSlot::ALL.into_iter().enumerate() {
        let ships: Vec<String> = Fleet::random(&mut rngs[i])
            .cells()
            .map(|c| c.to_string())
            .collect();
        stubs[i].place_ships(me.as_str(), ships.as_slice()).await?;
    }

    let mut untried = [
        Coordinate::all().collect::<Vec<_>>(),
        Coordinate::all().collect::<Vec<_>>(),
    ];
    let mut shots = [0usize; 2];
    let snapshot = loop {
        let snapshot = stubs[0].status().await?;
        if snapshot.game_over {
            break snapshot;
        }
        let i = match snapshot.current_turn {
            PlayerSlot::Player1 => 0,
            PlayerSlot::Player2 => 1,
        };
        take_turn(&mut stubs[i], snapshot.current_turn, &mut rngs[i], &mut untried[i]).await?;
        shots[i] += 1;
    };

    let result = json!({
        "player1": {"shots": shots[0], "ships_left": snapshot.player(PlayerSlot::Player1).ships_remaining},
        "player2": {"shots": shots[1], "ships_left": snapshot.player(PlayerSlot::Player2).ships_remaining},
        "winner": snapshot.winner,
        "version": snapshot.version,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
