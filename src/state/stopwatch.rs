//! Stopwatch clock and segment bookkeeping
//!
//! All operations take the current [`Instant`] explicitly so the controller
//! decides when "now" is and tests can drive the clock deterministically.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One recorded split. Field names follow the run data store layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position within the run
    #[serde(rename = "segment_num")]
    pub index: u32,
    /// Seconds since the previous split (or run start)
    #[serde(rename = "segment_time")]
    pub segment_duration: f64,
    /// Seconds since run start
    #[serde(rename = "total_time")]
    pub cumulative_duration: f64,
}

/// Stopwatch state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockStatus {
    Idle,
    Running,
    Paused,
}

impl ClockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClockStatus::Idle => "ready",
            ClockStatus::Running => "running",
            ClockStatus::Paused => "paused",
        }
    }
}

/// Copyable view of the clock, enough to compute elapsed time at any instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub status: ClockStatus,
    /// Elapsed time accumulated before the current running window
    pub baseline: Duration,
    /// Start of the current running window
    pub anchor: Option<Instant>,
}

impl ClockReading {
    pub fn idle() -> Self {
        Self {
            status: ClockStatus::Idle,
            baseline: Duration::ZERO,
            anchor: None,
        }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.status, self.anchor) {
            (ClockStatus::Running, Some(anchor)) => self
                .baseline
                .saturating_add(now.saturating_duration_since(anchor)),
            _ => self.baseline,
        }
    }
}

impl Default for ClockReading {
    fn default() -> Self {
        Self::idle()
    }
}

/// Session clock state plus the segment list of the current run
#[derive(Debug, Clone)]
pub struct Stopwatch {
    clock: ClockReading,
    segments: Vec<Segment>,
    last_split_cumulative: f64,
    /// Segments were restored from a saved record rather than split this run
    restored: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            clock: ClockReading::idle(),
            segments: Vec::new(),
            last_split_cumulative: 0.0,
            restored: false,
        }
    }

    /// Idle stopwatch showing the segments of a previous run
    pub fn with_restored_segments(segments: Vec<Segment>) -> Self {
        let last_split_cumulative = segments
            .last()
            .map(|segment| segment.cumulative_duration)
            .unwrap_or(0.0);
        Self {
            clock: ClockReading::idle(),
            restored: !segments.is_empty(),
            segments,
            last_split_cumulative,
        }
    }

    pub fn status(&self) -> ClockStatus {
        self.clock.status
    }

    pub fn reading(&self) -> ClockReading {
        self.clock
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.clock.elapsed_at(now)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn last_split_cumulative(&self) -> f64 {
        self.last_split_cumulative
    }

    /// Start, pause or resume. Always legal.
    pub fn toggle_at(&mut self, now: Instant) -> ClockStatus {
        match self.clock.status {
            ClockStatus::Idle => {
                if self.restored {
                    self.segments.clear();
                    self.last_split_cumulative = 0.0;
                    self.restored = false;
                }
                self.clock = ClockReading {
                    status: ClockStatus::Running,
                    baseline: Duration::ZERO,
                    anchor: Some(now),
                };
            }
            ClockStatus::Paused => {
                self.clock.status = ClockStatus::Running;
                self.clock.anchor = Some(now);
            }
            ClockStatus::Running => self.pause_at(now),
        }
        self.clock.status
    }

    /// Pause if running, otherwise leave the clock alone
    pub fn freeze_at(&mut self, now: Instant) {
        if self.clock.status == ClockStatus::Running {
            self.pause_at(now);
        }
    }

    fn pause_at(&mut self, now: Instant) {
        self.clock = ClockReading {
            status: ClockStatus::Paused,
            baseline: self.clock.elapsed_at(now),
            anchor: None,
        };
    }

    /// Record a split. Returns `None` unless running.
    pub fn split_at(&mut self, now: Instant) -> Option<Segment> {
        if self.clock.status != ClockStatus::Running {
            return None;
        }
        let cumulative = self.clock.elapsed_at(now).as_secs_f64();
        let segment = Segment {
            index: self.segments.len() as u32 + 1,
            segment_duration: (cumulative - self.last_split_cumulative).max(0.0),
            cumulative_duration: cumulative,
        };
        self.segments.push(segment);
        self.last_split_cumulative = cumulative;
        Some(segment)
    }

    /// Drop all segments without touching the clock. Returns how many were removed.
    pub fn clear_segments(&mut self) -> usize {
        let removed = self.segments.len();
        self.segments.clear();
        self.last_split_cumulative = 0.0;
        self.restored = false;
        removed
    }

    /// Return to idle, handing back the segments of the finished run
    pub fn reset(&mut self) -> Vec<Segment> {
        self.clock = ClockReading::idle();
        self.last_split_cumulative = 0.0;
        self.restored = false;
        std::mem::take(&mut self.segments)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
