//! Day-cycle clock — minutes-of-day counter, phase boundaries, lighting.
//!
//! The clock is the only writer of its own state. It advances in whole
//! sim-minutes, wraps modulo one day, and derives the phase and lighting
//! from a fixed boundary table so transitions always happen at the same
//! simulated times.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the simulated day in minutes.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Default session start time (noon).
pub const NOON: u32 = 720;

/// Clock failures. Advancing by zero or a negative delta is rejected to
/// keep the cycle monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("clock advance must be a positive number of minutes, got {0}")]
    InvalidAdvance(i32),
}

/// Discrete time-of-day phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl DayPhase {
    /// Phase for a given minutes-of-day value.
    /// Boundaries: dawn [5:00, 8:00), day [8:00, 18:00), dusk [18:00, 21:00),
    /// night otherwise.
    pub fn from_minutes(minutes_of_day: u32) -> Self {
        let hour = (minutes_of_day % MINUTES_PER_DAY) / 60;
        match hour {
            5..=7 => Self::Dawn,
            8..=17 => Self::Day,
            18..=20 => Self::Dusk,
            _ => Self::Night,
        }
    }

    /// Ambient and directional light intensity for this phase.
    pub fn lighting(&self) -> Lighting {
        match self {
            Self::Dawn => Lighting {
                ambient: 0.3,
                directional: 0.6,
            },
            Self::Day => Lighting {
                ambient: 0.5,
                directional: 1.0,
            },
            Self::Dusk => Lighting {
                ambient: 0.4,
                directional: 0.7,
            },
            Self::Night => Lighting {
                ambient: 0.2,
                directional: 0.3,
            },
        }
    }

    /// Sky/background color for this phase.
    pub fn sky_color(&self) -> &'static str {
        match self {
            Self::Dawn => "#FFB347",
            Self::Day => "#87CEEB",
            Self::Dusk => "#FF6347",
            Self::Night => "#191970",
        }
    }
}

/// Light intensities handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
}

/// Read-only snapshot of the clock for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockState {
    pub minutes_of_day: u32,
    pub phase: DayPhase,
    pub lighting: Lighting,
    pub sky_color: &'static str,
}

/// The environment clock. Created once at session start; never resets.
#[derive(Debug, Clone)]
pub struct WorldClock {
    minutes_of_day: u32,
}

impl WorldClock {
    /// Clock starting at noon.
    pub fn new() -> Self {
        Self::starting_at(NOON)
    }

    /// Clock starting at an arbitrary offset (wrapped into [0, 1440)).
    pub fn starting_at(minutes_of_day: u32) -> Self {
        Self {
            minutes_of_day: minutes_of_day % MINUTES_PER_DAY,
        }
    }

    /// Advance the clock by a positive number of minutes, wrapping at
    /// midnight.
    pub fn advance(&mut self, delta_minutes: i32) -> Result<(), ClockError> {
        if delta_minutes <= 0 {
            return Err(ClockError::InvalidAdvance(delta_minutes));
        }
        self.minutes_of_day =
            (self.minutes_of_day + delta_minutes as u32) % MINUTES_PER_DAY;
        Ok(())
    }

    /// Current snapshot. Pure read.
    pub fn state(&self) -> ClockState {
        let phase = DayPhase::from_minutes(self.minutes_of_day);
        ClockState {
            minutes_of_day: self.minutes_of_day,
            phase,
            lighting: phase.lighting(),
            sky_color: phase.sky_color(),
        }
    }

    pub fn phase(&self) -> DayPhase {
        DayPhase::from_minutes(self.minutes_of_day)
    }

    /// Render the current time as `HH:MM` for the HUD.
    pub fn format_time(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.minutes_of_day / 60,
            self.minutes_of_day % 60
        )
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}
