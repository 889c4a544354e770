use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

use seabattle::{
    awaiting_my_fleet, init_logging, render_boards, serve, turn_banner, ClientError, Coordinate, Fleet, GameService,
    Phase, PlayerSlot, Snapshot, Stub, TcpTransport, DEFAULT_BIND_ADDR, DEFAULT_CLIENT_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_SERVER_ADDR,
};

#[derive(Parser)]
#[command(author, version, about = "Two-player grid battle game server and client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct Conn {
    /// Address of the game server.
    #[arg(long, env = "SEABATTLE_SERVER", default_value = DEFAULT_SERVER_ADDR)]
    server: String,
    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = DEFAULT_CLIENT_TIMEOUT_MS)]
    timeout_ms: u64,
}

impl Conn {
    async fn connect(&self) -> Result<Stub<TcpTransport>, ClientError> {
        Stub::connect(self.server.as_str(), Duration::from_millis(self.timeout_ms)).await
    }
}

#[derive(Args, Clone)]
struct FleetArgs {
    /// Ship cells, e.g. A1 C7 J10.
    ships: Vec<String>,
    /// Place a random fleet instead.
    #[arg(long, conflicts_with = "ships")]
    random: bool,
    #[arg(long, help = "Fix RNG seed for reproducible random fleets (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl FleetArgs {
    fn cells(&self) -> Vec<String> {
        if self.random || self.ships.is_empty() {
            let mut rng = match self.seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            Fleet::random(&mut rng).cells().map(|c| c.to_string()).collect()
        } else {
            self.ships.clone()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game server.
    Serve {
        #[arg(long, env = "SEABATTLE_BIND", default_value = DEFAULT_BIND_ADDR)]
        bind: String,
    },
    /// Submit a fleet of five ships.
    Place {
        #[command(flatten)]
        conn: Conn,
        #[arg(long)]
        player: String,
        #[command(flatten)]
        fleet: FleetArgs,
    },
    /// Fire at a cell of the opponent's ocean.
    Fire {
        #[command(flatten)]
        conn: Conn,
        #[arg(long)]
        player: String,
        target: String,
    },
    /// Print the current game status.
    Status {
        #[command(flatten)]
        conn: Conn,
        /// Render the boards from this player's side.
        #[arg(long)]
        player: Option<PlayerSlot>,
    },
    /// Reset the game to a fresh session.
    Restart {
        #[command(flatten)]
        conn: Conn,
    },
    /// Clear a player's readiness flag.
    ResetReady {
        #[command(flatten)]
        conn: Conn,
        #[arg(long)]
        player: String,
    },
    /// Place a fleet and play interactively, polling for the opponent's moves.
    Play {
        #[command(flatten)]
        conn: Conn,
        #[arg(long)]
        player: PlayerSlot,
        #[command(flatten)]
        fleet: FleetArgs,
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            info!("game server starting at {}", bind);
            serve(listener, Arc::new(GameService::new())).await?;
        }
        Commands::Place { conn, player, fleet } => {
            let ships = fleet.cells();
            let placement = conn.connect().await?.place_ships(&player, ships.as_slice()).await?;
            println!("Ships placed at {}", ships.join(" "));
            println!(
                "ready: {}, both ready: {}",
                placement.ready, placement.both_ready
            );
        }
        Commands::Fire {
            conn,
            player,
            target,
        } => {
            let report = conn.connect().await?.fire(&player, &target).await?;
            print_report(&report.message, &report.shot);
        }
        Commands::Status { conn, player } => {
            let snapshot = conn.connect().await?.status().await?;
            print_status(&snapshot);
            if let Some(me) = player {
                println!("{}", render_boards(&snapshot, me, &[]));
                println!("{}", turn_banner(&snapshot, me));
            }
        }
        Commands::Restart { conn } => {
            println!("{}", conn.connect().await?.restart().await?);
        }
        Commands::ResetReady { conn, player } => {
            println!("{}", conn.connect().await?.reset_ready(&player).await?);
        }
        Commands::Play {
            conn,
            player,
            fleet,
            interval_ms,
        } => {
            play(conn, player, fleet, Duration::from_millis(interval_ms)).await?;
        }
    }
    Ok(())
}

fn print_report(message: &str, shot: &seabattle::Shot) {
    println!("{} {}", shot.target, message);
    println!(
        "turn: {}, game over: {}, winner: {}, enemy ships left: {}",
        shot.turn,
        shot.game_over,
        shot.winner.map_or("-", |w| w.as_str()),
        shot.ships_remaining
    );
}

fn print_status(s: &Snapshot) {
    println!(
        "version {} | phase {:?} | turn {} | game over {} | winner {}",
        s.version,
        s.phase,
        s.current_turn,
        s.game_over,
        s.winner.map_or("-", |w| w.as_str())
    );
    for view in &s.players {
        let list = |cells: &[Coordinate]| {
            cells.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        };
        println!(
            "{}: ready {} | ships left {} | hits [{}] | misses [{}]",
            view.player,
            view.ready,
            view.ships_remaining,
            list(&view.hits),
            list(&view.misses)
        );
    }
}

async fn prompt_target() -> anyhow::Result<String> {
    tokio::task::spawn_blocking(|| -> anyhow::Result<String> {
        print!("Target> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed");
        }
        Ok(line.trim().to_uppercase())
    })
    .await?
}

async fn play(conn: Conn, me: PlayerSlot, fleet: FleetArgs, interval: Duration) -> anyhow::Result<()> {
    let ships = fleet.cells();
    let my_ships: Vec<Coordinate> = ships.iter().filter_map(|s| s.parse().ok()).collect();
    let mut stub = conn.connect().await?;
    stub.place_ships(me.as_str(), ships.as_slice()).await?;
    println!("Ships placed at {}", ships.join(" "));

    let mut last_version = None;
    loop {
        let snapshot = match stub.status().await {
            Ok(s) => s,
            Err(e) => {
                warn!("{}", e);
                println!("{}", e);
                sleep(interval).await;
                if let Ok(fresh) = conn.connect().await {
                    stub = fresh;
                }
                continue;
            }
        };
        if last_version != Some(snapshot.version) {
            last_version = Some(snapshot.version);
            println!("\n{}", render_boards(&snapshot, me, &my_ships));
            println!("{}", turn_banner(&snapshot, me));
        }
        if snapshot.game_over {
            return Ok(());
        }
        if awaiting_my_fleet(&snapshot, me) {
            info!("{} has no fleet on the server, placing again", me);
            match stub.place_ships(me.as_str(), ships.as_slice()).await {
                Ok(_) => println!("Game restarted. Ships placed again at {}", ships.join(" ")),
                Err(ClientError::Rejected(e)) => anyhow::bail!("cannot place ships again: {}", e),
                Err(e) => {
                    warn!("{}", e);
                    println!("{}", e);
                    sleep(interval).await;
                }
            }
            continue;
        }
        if snapshot.phase == Phase::Battling && snapshot.current_turn == me {
            let target = prompt_target().await?;
            match stub.fire(me.as_str(), &target).await {
                Ok(report) => print_report(&report.message, &report.shot),
                Err(ClientError::Rejected(e)) => println!("{}", e),
                Err(e) => {
                    warn!("{}", e);
                    println!("{}", e);
                }
            }
            continue;
        }
        sleep(interval).await;
    }
}
