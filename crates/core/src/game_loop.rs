//! Game loop module - session lifecycle around the board
//!
//! The loop owns the board, the line counter and the pause/game-over flags.
//! A presentation layer calls [`GameLoop::on_tick`] once per timer interval
//! and [`GameLoop::apply`] for each input command, both from the same thread.
//! Nothing here blocks or sleeps; the caller owns the actual timer and is
//! told when to start or stop it through [`GameEvents`].

use std::time::Duration;

use crate::board::{Board, TickOutcome};
use crate::events::{GameEvents, GameOverChoice, NoEvents};
use crate::snapshot::GameSnapshot;
use crate::stats::Stats;
use crate::types::{Command, FALL_INTERVAL_MS};

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Time between two gravity ticks. Constant for the whole session.
    pub tick_interval: Duration,
    /// Seed for shape selection and block colors
    pub seed: u32,
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(FALL_INTERVAL_MS as u64),
            seed: 1,
        }
    }
}

/// Whether the driver should keep going after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The player chose to quit at game over
    Exit,
}

/// Session status, as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Created (or reset) but the timer has not started yet
    Ready,
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::GameOver => "gameOver",
        }
    }
}

/// One game session: board, statistics, and the flags that gate them
#[derive(Debug)]
pub struct GameLoop<E: GameEvents = NoEvents> {
    board: Board,
    stats: Stats,
    paused: bool,
    game_over: bool,
    /// Whether the driver's timer is supposed to be running
    running: bool,
    config: GameConfig,
    events: E,
}

impl GameLoop<NoEvents> {
    /// A session nobody listens to (tests, simulations)
    pub fn headless(config: GameConfig) -> Self {
        Self::new(config, NoEvents)
    }
}

impl<E: GameEvents> GameLoop<E> {
    pub fn new(config: GameConfig, events: E) -> Self {
        Self::with_board(config, Board::new(config.seed), events)
    }

    /// Start a session on a prepared board
    pub fn with_board(config: GameConfig, board: Board, events: E) -> Self {
        Self {
            board,
            stats: Stats::new(),
            paused: false,
            game_over: false,
            running: false,
            config,
            events,
        }
    }

    /// Start the timer. No-op if it already runs or the game is over.
    pub fn start(&mut self) -> bool {
        if self.running || self.game_over {
            return false;
        }
        self.running = true;
        log::info!("session started, tick every {:?}", self.config.tick_interval);
        self.events.timer_started();
        true
    }

    /// Timer callback: advance the board by one step unless paused or over
    pub fn on_tick(&mut self) -> Flow {
        if self.paused || self.game_over {
            return Flow::Continue;
        }

        match self.board.tick(&mut self.stats) {
            TickOutcome::Spawned { cleared, .. } => self.report_cleared(cleared),
            TickOutcome::GameOver { cleared } => {
                self.report_cleared(cleared);
                self.events.redraw();
                return self.finish();
            }
            TickOutcome::Fell | TickOutcome::Locked | TickOutcome::Halted => {}
        }

        self.events.redraw();
        Flow::Continue
    }

    /// Apply one input command. Returns whether anything changed.
    ///
    /// Everything is rejected after game over; piece commands are also
    /// rejected while paused or when no piece is falling.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.game_over {
            return false;
        }
        if command.moves_piece() && (self.paused || self.board.active().is_none()) {
            return false;
        }

        let changed = match command {
            Command::MoveLeft => self.board.move_horizontal(false),
            Command::MoveRight => self.board.move_horizontal(true),
            Command::RotateClockwise => self.board.rotate(true),
            Command::RotateCounterClockwise => self.board.rotate(false),
            Command::HardDrop => self.board.hard_drop().is_some(),
            Command::TogglePause => {
                self.toggle_pause();
                true
            }
        };

        if changed && command.moves_piece() {
            self.events.redraw();
        }
        changed
    }

    /// Flip the pause flag. Returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.set_paused(!self.paused);
        }
        self.paused
    }

    /// Set the pause flag. The falling piece stays where it is.
    /// Ignored after game over.
    pub fn set_paused(&mut self, paused: bool) {
        if self.game_over || self.paused == paused {
            return;
        }
        self.paused = paused;
        log::info!("{}", if paused { "paused" } else { "resumed" });
        self.events.redraw();
    }

    /// Begin a fresh session: flags cleared, counter zeroed, board emptied,
    /// timer restarted
    pub fn reset_game(&mut self) {
        self.paused = false;
        self.game_over = false;
        self.running = false;
        self.stats.reset();
        self.board.reset();
        log::info!("new game");
        self.events.redraw();
        self.start();
    }

    fn report_cleared(&mut self, cleared: u32) {
        if cleared > 0 {
            self.events
                .lines_cleared(cleared, self.stats.removed_lines());
        }
    }

    fn finish(&mut self) -> Flow {
        self.game_over = true;
        self.running = false;
        self.events.timer_stopped();

        let lines = self.stats.removed_lines();
        log::info!("game over with {} line(s)", lines);

        match self.events.game_over(lines) {
            GameOverChoice::PlayAgain => {
                self.reset_game();
                Flow::Continue
            }
            GameOverChoice::Quit => Flow::Exit,
        }
    }

    pub fn status(&self) -> Status {
        if self.game_over {
            Status::GameOver
        } else if self.paused {
            Status::Paused
        } else if self.running {
            Status::Running
        } else {
            Status::Ready
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Lines cleared this session
    pub fn lines(&self) -> u32 {
        self.stats.removed_lines()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    /// Read model for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.board, self.lines(), self.status())
    }
}
