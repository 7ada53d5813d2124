//! Stopwatch session bound to one title

use std::time::Instant;
use serde::{Deserialize, Serialize};

use super::{ClockStatus, Segment, Stopwatch, Title};

/// Persisted per-title state, in the run data store layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub last_segment_time: f64,
    #[serde(default)]
    pub personal_best: Option<f64>,
}

/// Everything an export needs about a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub title: String,
    pub personal_best: Option<f64>,
    pub segments: Vec<Segment>,
    pub final_duration: f64,
}

/// Outcome of the first half of a reset, decided before any prompting
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReset {
    pub final_duration: f64,
    /// The run beats (or sets) the personal best and should be offered
    pub best_candidate: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    title: Title,
    stopwatch: Stopwatch,
    personal_best: Option<f64>,
}

impl Session {
    /// Open a session with the segments and best from a saved record
    pub fn open(title: Title, record: RunRecord) -> Self {
        Self {
            title,
            stopwatch: Stopwatch::with_restored_segments(record.segments),
            personal_best: record.personal_best,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn personal_best(&self) -> Option<f64> {
        self.personal_best
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn status(&self) -> ClockStatus {
        self.stopwatch.status()
    }

    pub fn toggle(&mut self, now: Instant) -> ClockStatus {
        self.stopwatch.toggle_at(now)
    }

    pub fn split(&mut self, now: Instant) -> Option<Segment> {
        self.stopwatch.split_at(now)
    }

    pub fn clear_segments(&mut self) -> usize {
        self.stopwatch.clear_segments()
    }

    /// Most recent `count` segments, oldest first
    pub fn recent_segments(&self, count: usize) -> &[Segment] {
        let segments = self.stopwatch.segments();
        &segments[segments.len().saturating_sub(count)..]
    }

    /// Freeze the clock and decide what the reset has to settle.
    ///
    /// Returns `None` when nothing ran and no segments exist, in which case
    /// the caller can go straight to [`Session::finish_reset`].
    pub fn begin_reset(&mut self, now: Instant) -> Option<PendingReset> {
        self.stopwatch.freeze_at(now);
        let final_duration = self.stopwatch.elapsed_at(now).as_secs_f64();
        if final_duration <= 0.0 && self.stopwatch.segments().is_empty() {
            return None;
        }
        Some(PendingReset {
            final_duration,
            best_candidate: final_duration > 0.0 && self.is_new_best(final_duration),
        })
    }

    pub fn is_new_best(&self, seconds: f64) -> bool {
        match self.personal_best {
            None => true,
            Some(best) => seconds < best,
        }
    }

    /// Adopt `seconds` as the personal best if it is strictly better
    pub fn adopt_best(&mut self, seconds: f64) -> bool {
        if seconds > 0.0 && self.is_new_best(seconds) {
            self.personal_best = Some(seconds);
            true
        } else {
            false
        }
    }

    /// Clear the run and return to idle
    pub fn finish_reset(&mut self) -> Vec<Segment> {
        self.stopwatch.reset()
    }

    pub fn run_record(&self) -> RunRecord {
        RunRecord {
            segments: self.stopwatch.segments().to_vec(),
            last_segment_time: self.stopwatch.last_split_cumulative(),
            personal_best: self.personal_best,
        }
    }

    pub fn snapshot(&self, final_duration: f64) -> RunSnapshot {
        RunSnapshot {
            title: self.title.to_string(),
            personal_best: self.personal_best,
            segments: self.stopwatch.segments().to_vec(),
            final_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session_with_best(best: Option<f64>) -> Session {
        Session::open(
            Title::parse("Any%").unwrap(),
            RunRecord {
                personal_best: best,
                ..RunRecord::default()
            },
        )
    }

    #[test]
    fn untouched_session_has_nothing_to_settle() {
        let mut session = session_with_best(Some(65.0));
        assert!(session.begin_reset(Instant::now()).is_none());
    }

    #[test]
    fn faster_run_is_a_best_candidate() {
        let t0 = Instant::now();
        let mut session = session_with_best(Some(65.0));
        session.toggle(t0);

        let pending = session.begin_reset(t0 + Duration::from_secs(60)).unwrap();
        assert_eq!(pending.final_duration, 60.0);
        assert!(pending.best_candidate);
        assert_eq!(session.status(), ClockStatus::Paused);

        assert!(session.adopt_best(pending.final_duration));
        assert_eq!(session.personal_best(), Some(60.0));
    }

    #[test]
    fn slower_run_is_not_offered() {
        let t0 = Instant::now();
        let mut session = session_with_best(Some(65.0));
        session.toggle(t0);
        let pending = session.begin_reset(t0 + Duration::from_secs(70)).unwrap();
        assert!(!pending.best_candidate);
        assert!(!session.adopt_best(70.0));
        assert_eq!(session.personal_best(), Some(65.0));
    }

    #[test]
    fn first_run_sets_a_best() {
        let t0 = Instant::now();
        let mut session = session_with_best(None);
        session.toggle(t0);
        let pending = session.begin_reset(t0 + Duration::from_secs(90)).unwrap();
        assert!(pending.best_candidate);
    }

    #[test]
    fn restored_segments_offer_export_but_not_a_zero_best() {
        let record = RunRecord {
            segments: vec![Segment {
                index: 1,
                segment_duration: 3.0,
                cumulative_duration: 3.0,
            }],
            last_segment_time: 3.0,
            personal_best: None,
        };
        let mut session = Session::open(Title::parse("Glitchless").unwrap(), record);
        let pending = session.begin_reset(Instant::now()).unwrap();
        assert_eq!(pending.final_duration, 0.0);
        assert!(!pending.best_candidate);
    }

    #[test]
    fn recent_segments_are_the_last_three() {
        let t0 = Instant::now();
        let mut session = session_with_best(None);
        session.toggle(t0);
        for n in 1..=5 {
            session.split(t0 + Duration::from_secs(n));
        }
        let recent: Vec<u32> = session.recent_segments(3).iter().map(|s| s.index).collect();
        assert_eq!(recent, vec![3, 4, 5]);
    }

    #[test]
    fn run_record_carries_segments_and_best() {
        let t0 = Instant::now();
        let mut session = session_with_best(Some(80.0));
        session.toggle(t0);
        session.split(t0 + Duration::from_secs(20));

        let record = session.run_record();
        assert_eq!(record.segments.len(), 1);
        assert_eq!(record.last_segment_time, 20.0);
        assert_eq!(record.personal_best, Some(80.0));

        session.finish_reset();
        assert!(session.run_record().segments.is_empty());
    }

    #[test]
    fn record_parses_legacy_layout() {
        let json = r#"{
            "segments": [{"segment_num": 1, "segment_time": 12.5, "total_time": 12.5}],
            "last_segment_time": 12.5,
            "personal_best": null
        }"#;
        let record: RunRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.segments[0].index, 1);
        assert_eq!(record.segments[0].cumulative_duration, 12.5);
        assert_eq!(record.personal_best, None);
    }
}
