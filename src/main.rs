//! Goban: command line driver for the goban-core board.
//!
//! ## Usage
//!
//! - `goban` - Show a demo
//! - `goban demo` - Play a scripted game with a capture, a ko and undo
//! - `goban selfplay` - Play random games and report statistics
//! - `goban show D4 E4 ...` - Play moves and print the board

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use goban_core::selfplay::{GameStats, play_random_game};
use goban_core::{Board, Color, Rules, Setup, parse_coord, str_coord};

/// Goban: an incremental Go board with undo and superko detection
#[derive(Parser)]
#[command(name = "goban")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short scripted game showing a capture, a ko and undo
    Demo,
    /// Play random games and report statistics
    Selfplay {
        /// Board size
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: usize,
        /// Random seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Rule set: chinese, cgos, kgs or japanese
        #[arg(long, default_value = "chinese")]
        rules: Rules,
        /// Allow suicide
        #[arg(long)]
        allow_suicide: bool,
        /// Recompute the whole board after every move
        #[arg(long)]
        check: bool,
    },
    /// Play a sequence of moves, alternating colors, and print the board
    Show {
        /// Board size
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Rule set: chinese, cgos, kgs or japanese
        #[arg(long, default_value = "chinese")]
        rules: Rules,
        /// Moves such as D4, pass
        moves: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay {
            size,
            games,
            seed,
            mut rules,
            allow_suicide,
            check,
        }) => {
            rules.allow_suicide |= allow_suicide;
            run_selfplay(size, games, seed, rules, check)
        }
        Some(Commands::Show { size, rules, moves }) => run_show(size, rules, &moves),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_selfplay(size: usize, games: usize, seed: u64, rules: Rules, check: bool) -> anyhow::Result<()> {
    let mut board = Board::new(size, rules, Setup::new()).context("cannot create board")?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut total = GameStats::default();
    for game in 0..games {
        board.init(size, rules, Setup::new())?;
        let stats = play_random_game(&mut board, &mut rng, check)
            .with_context(|| format!("board inconsistent in game {}\n{board}", game + 1))?;
        log::info!(
            "game {}: {} moves, captures {}/{}",
            game + 1,
            stats.moves,
            stats.captures[0],
            stats.captures[1]
        );
        total.merge(&stats);
    }
    println!("{board}\n");
    println!("games:       {}", total.games);
    println!("moves:       {}", total.moves);
    println!("passes:      {}", total.passes);
    println!("captures:    black {} white {}", total.captures[0], total.captures[1]);
    println!("rejected:    {}", total.rejected);
    println!("suicides:    {}", total.suicides);
    println!("repetitions: {}", total.repetitions);
    println!("plays:       {}", board.count_play());
    Ok(())
}

fn run_show(size: usize, rules: Rules, moves: &[String]) -> anyhow::Result<()> {
    let mut board = Board::new(size, rules, Setup::new())?;
    for mv in moves {
        let p = parse_coord(mv, size)?;
        let c = board.to_play();
        board.play(p, c).with_context(|| format!("cannot play {c} {mv}"))?;
        let info = board.last_move_info();
        if !board.is_legal() {
            board.undo()?;
            bail!("{c} {mv} is illegal: {info:?}\n{board}");
        }
        if info.capturing {
            let stones: Vec<String> = board.captured_stones().iter().map(|&s| str_coord(s)).collect();
            println!("{c} {mv} captures {}", stones.join(" "));
        }
    }
    println!("{board}");
    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    println!("Goban: incremental Go board\n");

    println!("=== Capture and ko ===");
    let mut board = Board::new(9, "japanese".parse()?, Setup::new())?;
    for mv in ["D4", "E4", "C5", "F5", "D6", "E6", "E5", "D5"] {
        let c = board.to_play();
        board.play(parse_coord(mv, 9)?, c)?;
    }
    println!("{board}\n");
    let e5 = parse_coord("E5", 9)?;
    println!("Black retakes at E5 at once: legal = {}", board.is_legal_move(e5, Color::Black));
    board.play(parse_coord("J9", 9)?, Color::Black)?;
    board.play(parse_coord("J1", 9)?, Color::White)?;
    println!("After an exchange elsewhere: legal = {}", board.is_legal_move(e5, Color::Black));

    println!("\n=== Snapshot ===");
    board.take_snapshot();
    let hash = board.hash();
    for mv in ["E5", "A1", "B1"] {
        let c = board.to_play();
        board.play(parse_coord(mv, 9)?, c)?;
    }
    println!("{} moves played, hash {:#018x}", board.move_number(), board.hash());
    board.restore_snapshot()?;
    println!(
        "restored to move {}, hash matches: {}",
        board.move_number(),
        board.hash() == hash
    );

    println!("\n=== Undo ===");
    while board.can_undo() {
        board.undo()?;
    }
    println!("all moves undone, empty board: {}", board.hash() == 0);
    Ok(())
}
