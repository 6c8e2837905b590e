//! Headless autoplay runner (default binary).
//!
//! Plays one session against a random input source and prints the final
//! snapshot as JSON. There is no rendering and no keyboard; timer ticks are
//! simulated back to back. `RUST_LOG=debug` shows what the engine does.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};

use classic_tetris::core::{Flow, GameConfig, GameEvents, GameLoop, GameOverChoice, SimpleRng};
use classic_tetris::types::Command;

/// Give up on a session that somehow never tops out.
const MAX_TICKS: u64 = 1_000_000;

const PIECE_COMMANDS: [Command; 5] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::RotateClockwise,
    Command::RotateCounterClockwise,
    Command::HardDrop,
];

/// Logs what a real front end would draw or ask.
#[derive(Debug, Default)]
struct Console {
    pieces: u32,
}

impl GameEvents for Console {
    fn lines_cleared(&mut self, cleared: u32, total: u32) {
        log::info!("cleared {} line(s), score {}", cleared, total);
    }

    fn timer_started(&mut self) {
        log::debug!("timer started");
    }

    fn timer_stopped(&mut self) {
        log::debug!("timer stopped");
    }

    fn game_over(&mut self, final_lines: u32) -> GameOverChoice {
        log::info!(
            "game over after {} piece(s), score {}",
            self.pieces,
            final_lines
        );
        GameOverChoice::Quit
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let seed = SystemTime::now().duration_since(UNIX_EPOCH)?.subsec_nanos();
    let config = GameConfig::default().with_seed(seed);
    log::info!("seed {}", seed);

    let mut game = GameLoop::new(config, Console::default());
    let mut input = SimpleRng::new(seed.rotate_left(16));

    game.start();
    let ticks = run(&mut game, &mut input)?;

    let snapshot = game.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    log::info!(
        "{} tick(s), {:?} of play time at {:?} per tick",
        ticks,
        game.tick_interval() * ticks as u32,
        game.tick_interval()
    );
    Ok(())
}

fn run(game: &mut GameLoop<Console>, input: &mut SimpleRng) -> Result<u64> {
    for tick in 0..MAX_TICKS {
        // Commands land between timer callbacks, on the same thread.
        if game.board().active().is_some() && input.next_range(3) == 0 {
            let command = PIECE_COMMANDS[input.next_range(PIECE_COMMANDS.len() as u32) as usize];
            if game.apply(command) && command == Command::HardDrop {
                game.events_mut().pieces += 1;
            }
        }

        let had_piece = game.board().active().is_some();
        if game.on_tick() == Flow::Exit {
            return Ok(tick + 1);
        }
        if had_piece && game.board().active().is_none() {
            game.events_mut().pieces += 1;
        }
    }

    bail!("session still running after {} ticks", MAX_TICKS)
}
