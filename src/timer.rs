//! Pomodoro practice timer model.
//!
//! Pure state machine; the CLI drives the countdown. Only completed focus
//! intervals count as practice.

use serde::Serialize;

use crate::config::TimerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
        }
    }
}

/// What finishing the current interval produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalOutcome {
    pub finished: Phase,
    /// Practice minutes to record; only set for focus intervals.
    pub practice_minutes: Option<u32>,
    pub next: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticeTimer {
    config: TimerConfig,
    phase: Phase,
    completed_focus: u32,
}

impl PracticeTimer {
    #[must_use]
    pub const fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Focus,
            completed_focus: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus
    }

    #[must_use]
    pub const fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.config.focus_minutes,
            Phase::ShortBreak => self.config.short_break_minutes,
            Phase::LongBreak => self.config.long_break_minutes,
        }
    }

    #[must_use]
    pub fn current_seconds(&self) -> u64 {
        u64::from(self.minutes_for(self.phase)) * 60
    }

    /// Finish the current interval and move to the next phase. Every
    /// `long_break_every`-th focus session is followed by a long break.
    pub fn complete_interval(&mut self) -> IntervalOutcome {
        let finished = self.phase;
        let (practice_minutes, next) = match finished {
            Phase::Focus => {
                self.completed_focus = self.completed_focus.saturating_add(1);
                let every = self.config.long_break_every.max(1);
                let next = if self.completed_focus % every == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                (Some(self.config.focus_minutes), next)
            }
            Phase::ShortBreak | Phase::LongBreak => (None, Phase::Focus),
        };
        self.phase = next;
        IntervalOutcome {
            finished,
            practice_minutes,
            next,
        }
    }

    /// Abandon the current interval and start over in focus. Nothing is
    /// recorded.
    pub const fn reset(&mut self) {
        self.phase = Phase::Focus;
    }
}

/// `MM:SS` countdown text.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
