//! # engine::clock
//!
//! **Game Clock** — fixed-length countdown.
//!
//! ```text
//!   Idle ──start()──▶ Running ──tick() reaches 0──▶ Ended
//!                        │                            ▲
//!                        └────────── stop() ──────────┘
//!   Ended ──start()──▶ Running
//! ```
//!
//! The clock knows nothing about wall time; whoever owns it calls `tick()`
//! once per clock second.

use serde::Serialize;

use crate::error::ClockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockPhase {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    duration_secs: u64,
    remaining_secs: u64,
    phase: ClockPhase,
}

impl GameClock {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            phase: ClockPhase::Idle,
        }
    }

    /// `Idle`/`Ended` → `Running` with a full countdown.
    pub fn start(&mut self) -> Result<(), ClockError> {
        if self.phase == ClockPhase::Running {
            return Err(ClockError::AlreadyRunning);
        }
        self.remaining_secs = self.duration_secs;
        self.phase = ClockPhase::Running;
        Ok(())
    }

    /// One clock second. Returns the phase after the tick; a no-op unless
    /// running.
    pub fn tick(&mut self) -> ClockPhase {
        if self.phase == ClockPhase::Running {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.phase = ClockPhase::Ended;
            }
        }
        self.phase
    }

    /// Force `Running` → `Ended`.
    pub fn stop(&mut self) -> Result<(), ClockError> {
        if self.phase != ClockPhase::Running {
            return Err(ClockError::NotRunning);
        }
        self.phase = ClockPhase::Ended;
        Ok(())
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }
}
