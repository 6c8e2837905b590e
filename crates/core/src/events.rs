//! Notifications from the engine to whatever drives and draws it.
//!
//! The engine never calls into UI code. A presentation layer implements
//! [`GameEvents`] and reacts to the callbacks (repaint, update the score
//! label, start/stop its timer, ask the player about another round).

/// Answer to the game-over question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    PlayAgain,
    Quit,
}

/// Callbacks emitted by [`crate::GameLoop`]. All methods default to no-ops.
pub trait GameEvents {
    /// State visible to the player changed
    fn redraw(&mut self) {}

    /// `cleared` rows were removed; `total` is the session count so far
    fn lines_cleared(&mut self, _cleared: u32, _total: u32) {}

    /// The tick timer should (re)start
    fn timer_started(&mut self) {}

    /// The tick timer should stop
    fn timer_stopped(&mut self) {}

    /// The session ended with `final_lines` cleared lines
    fn game_over(&mut self, _final_lines: u32) -> GameOverChoice {
        GameOverChoice::Quit
    }
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl GameEvents for NoEvents {}

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Redraw,
    LinesCleared { cleared: u32, total: u32 },
    TimerStarted,
    TimerStopped,
    GameOver { final_lines: u32 },
}

/// Keeps every notification in order and answers game over with a fixed choice
#[derive(Debug, Clone)]
pub struct EventRecorder {
    events: Vec<GameEvent>,
    on_game_over: GameOverChoice,
}

impl EventRecorder {
    pub fn new(on_game_over: GameOverChoice) -> Self {
        Self {
            events: Vec::new(),
            on_game_over,
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_game_over_choice(&mut self, choice: GameOverChoice) {
        self.on_game_over = choice;
    }

    /// Number of recorded events matching `event`
    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new(GameOverChoice::Quit)
    }
}

impl GameEvents for EventRecorder {
    fn redraw(&mut self) {
        self.events.push(GameEvent::Redraw);
    }

    fn lines_cleared(&mut self, cleared: u32, total: u32) {
        self.events.push(GameEvent::LinesCleared { cleared, total });
    }

    fn timer_started(&mut self) {
        self.events.push(GameEvent::TimerStarted);
    }

    fn timer_stopped(&mut self) {
        self.events.push(GameEvent::TimerStopped);
    }

    fn game_over(&mut self, final_lines: u32) -> GameOverChoice {
        self.events.push(GameEvent::GameOver { final_lines });
        self.on_game_over
    }
}

impl<E: GameEvents + ?Sized> GameEvents for &mut E {
    fn redraw(&mut self) {
        (**self).redraw()
    }

    fn lines_cleared(&mut self, cleared: u32, total: u32) {
        (**self).lines_cleared(cleared, total)
    }

    fn timer_started(&mut self) {
        (**self).timer_started()
    }

    fn timer_stopped(&mut self) {
        (**self).timer_stopped()
    }

    fn game_over(&mut self, final_lines: u32) -> GameOverChoice {
        (**self).game_over(final_lines)
    }
}
