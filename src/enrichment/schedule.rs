//! Batch schedule for enrichment.
//!
//! Pure bookkeeping over `{batches remaining, current index, last result}`.
//! It decides what to fetch next and whether a pause is due, but never
//! sleeps or fetches itself; the driver in `enrichment` does that.

use std::ops::Range;
use std::time::Duration;

/// What happened to one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Lookup succeeded; `updated` records merged, `ignored` response ids unknown
    Applied { updated: usize, ignored: usize },
    /// Lookup failed; records in the batch keep their prior values
    Failed(String),
    /// Lookup exceeded the configured batch timeout
    TimedOut,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Applied { .. })
    }
}

/// Where the schedule stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleState {
    /// Batch `next` is ready to be fetched
    Ready { next: usize },
    /// Batch `completed` finished; pause before `next`
    Pacing { completed: usize, next: usize },
    /// All batches done
    Finished,
    /// Stopped early at a batch boundary
    Cancelled { next: usize },
}

#[derive(Debug, Clone)]
pub struct BatchSchedule {
    batches: Vec<Range<usize>>,
    state: ScheduleState,
    last_outcome: Option<BatchOutcome>,
    delay: Duration,
}

impl BatchSchedule {
    /// Positional batches of `batch_size` over `record_count` records
    pub fn new(record_count: usize, batch_size: usize, delay: Duration) -> Self {
        let batch_size = batch_size.max(1);
        let batches: Vec<Range<usize>> = (0..record_count)
            .step_by(batch_size)
            .map(|start| start..(start + batch_size).min(record_count))
            .collect();
        let state = if batches.is_empty() {
            ScheduleState::Finished
        } else {
            ScheduleState::Ready { next: 0 }
        };

        Self {
            batches,
            state,
            last_outcome: None,
            delay,
        }
    }

    pub fn total_batches(&self) -> usize {
        self.batches.len()
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn last_outcome(&self) -> Option<&BatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Batches not yet started
    pub fn remaining(&self) -> usize {
        match self.state {
            ScheduleState::Ready { next }
            | ScheduleState::Pacing { next, .. }
            | ScheduleState::Cancelled { next } => self.batches.len() - next,
            ScheduleState::Finished => 0,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ScheduleState::Finished | ScheduleState::Cancelled { .. })
    }

    /// The batch to fetch now, if the schedule is `Ready`
    pub fn current(&self) -> Option<(usize, Range<usize>)> {
        match self.state {
            ScheduleState::Ready { next } => Some((next, self.batches[next].clone())),
            _ => None,
        }
    }

    /// Record the outcome of the current batch. Moves to `Pacing` when
    /// more batches remain, otherwise to `Finished`.
    pub fn complete(&mut self, outcome: BatchOutcome) {
        if let ScheduleState::Ready { next } = self.state {
            self.last_outcome = Some(outcome);
            let following = next + 1;
            self.state = if following < self.batches.len() {
                ScheduleState::Pacing {
                    completed: next,
                    next: following,
                }
            } else {
                ScheduleState::Finished
            };
        }
    }

    /// Pause owed before the next batch; `None` outside `Pacing`
    pub fn pending_delay(&self) -> Option<Duration> {
        match self.state {
            ScheduleState::Pacing { .. } => Some(self.delay),
            _ => None,
        }
    }

    /// Pause is over
    pub fn resume(&mut self) {
        if let ScheduleState::Pacing { next, .. } = self.state {
            self.state = ScheduleState::Ready { next };
        }
    }

    /// Stop before the next batch. No effect once finished.
    pub fn cancel(&mut self) {
        if let ScheduleState::Ready { next } | ScheduleState::Pacing { next, .. } = self.state {
            self.state = ScheduleState::Cancelled { next };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_batches() {
        let schedule = BatchSchedule::new(45, 20, Duration::from_millis(100));
        assert_eq!(schedule.total_batches(), 3);
        assert_eq!(schedule.batches, vec![0..20, 20..40, 40..45]);
        assert_eq!(schedule.current(), Some((0, 0..20)));
        assert_eq!(schedule.remaining(), 3);
    }

    #[test]
    fn test_empty_is_finished() {
        let schedule = BatchSchedule::new(0, 20, Duration::ZERO);
        assert!(schedule.is_done());
        assert_eq!(schedule.current(), None);
        assert_eq!(schedule.remaining(), 0);
    }

    #[test]
    fn test_transitions() {
        let delay = Duration::from_millis(100);
        let mut schedule = BatchSchedule::new(30, 20, delay);

        schedule.complete(BatchOutcome::Failed("boom".into()));
        assert_eq!(schedule.state(), &ScheduleState::Pacing { completed: 0, next: 1 });
        assert_eq!(schedule.pending_delay(), Some(delay));
        assert_eq!(schedule.current(), None);
        assert_eq!(schedule.last_outcome(), Some(&BatchOutcome::Failed("boom".into())));

        schedule.resume();
        assert_eq!(schedule.current(), Some((1, 20..30)));

        schedule.complete(BatchOutcome::Applied { updated: 10, ignored: 0 });
        assert_eq!(schedule.state(), &ScheduleState::Finished);
        // No pause after the final batch
        assert_eq!(schedule.pending_delay(), None);
        assert!(schedule.is_done());
    }

    #[test]
    fn test_cancel_at_boundary() {
        let mut schedule = BatchSchedule::new(60, 20, Duration::ZERO);
        schedule.complete(BatchOutcome::Applied { updated: 20, ignored: 0 });
        schedule.cancel();
        assert_eq!(schedule.state(), &ScheduleState::Cancelled { next: 1 });
        assert_eq!(schedule.remaining(), 2);
        assert!(schedule.is_done());
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let schedule = BatchSchedule::new(3, 0, Duration::ZERO);
        assert_eq!(schedule.total_batches(), 3);
    }
}
