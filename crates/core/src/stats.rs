//! Session statistics.

/// Counter of cleared lines for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    removed_lines: u32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed_lines(&self) -> u32 {
        self.removed_lines
    }

    pub fn increment_removed_lines(&mut self) {
        self.removed_lines = self.removed_lines.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.removed_lines = 0;
    }
}
