//! Phase timing for a single run.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Step of the linear compute procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Resolve,
    Compile,
    Upload,
    Dispatch,
    ReadBack,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Resolve => "resolve",
            Phase::Compile => "compile",
            Phase::Upload => "upload",
            Phase::Dispatch => "dispatch",
            Phase::ReadBack => "read-back",
        }
    }
}

/// A completed phase.
#[derive(Debug, Clone)]
pub struct PhaseRecord {
    pub phase: Phase,
    pub start: Instant,
    pub duration: Duration,
}

/// Ordered record of the phases a run went through.
#[derive(Debug, Default)]
pub struct Timeline {
    records: Mutex<Vec<PhaseRecord>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a phase. It is recorded when the guard drops.
    pub fn enter(&self, phase: Phase) -> PhaseGuard<'_> {
        PhaseGuard {
            phase,
            start: Instant::now(),
            timeline: self,
        }
    }

    /// Phases recorded so far, in completion order.
    pub fn records(&self) -> Vec<PhaseRecord> {
        self.records.lock().clone()
    }

    /// Number of recorded phases.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn total(&self) -> Duration {
        self.total_since(0)
    }

    /// Sum of the phases recorded at or after position `mark`.
    pub fn total_since(&self, mark: usize) -> Duration {
        self.records
            .lock()
            .iter()
            .skip(mark)
            .map(|r| r.duration)
            .sum()
    }

    /// Drop every record for which `keep` returns false.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&PhaseRecord) -> bool,
    {
        self.records.lock().retain(keep);
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

/// Closes its phase on drop, including on early `?` returns.
#[derive(Debug)]
pub struct PhaseGuard<'a> {
    phase: Phase,
    start: Instant,
    timeline: &'a Timeline,
}

impl<'a> PhaseGuard<'a> {
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl<'a> Drop for PhaseGuard<'a> {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        log::debug!("phase {} took {:?}", self.phase.name(), duration);
        self.timeline.records.lock().push(PhaseRecord {
            phase: self.phase,
            start: self.start,
            duration,
        });
    }
}
