//! Sequential wait-then-send dispatch.
//!
//! One batch runs on a single thread: sleep until the next assignment's
//! slot, send, move on. A failed send is logged and skipped; it never
//! aborts the rest of the batch. Slots already in the past (late start)
//! are sent immediately, still in time order. The clock is a trait so
//! tests can simulate a whole afternoon without real waiting.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::slots::WinnerAssignment;
use crate::source::MessageSender;

/// Time source and suspension point for the dispatch loop.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Drives one batch of timed sends.
pub struct DispatchScheduler<'a, C: Clock, S: MessageSender + ?Sized> {
    clock: &'a C,
    sender: &'a S,
}

impl<'a, C: Clock, S: MessageSender + ?Sized> DispatchScheduler<'a, C, S> {
    pub fn new(clock: &'a C, sender: &'a S) -> Self {
        Self { clock, sender }
    }

    /// Wait for and send every assignment in time order.
    ///
    /// Slots resolve against the current UTC date. Returns the names that
    /// were successfully notified; delivery failures are logged and the
    /// loop continues.
    pub fn run<F>(&self, assignments: &[WinnerAssignment], build_body: F) -> BTreeSet<String>
    where
        F: Fn(&WinnerAssignment) -> String,
    {
        let mut sent = BTreeSet::new();
        if assignments.is_empty() {
            tracing::info!("no winners to notify");
            return sent;
        }

        // Input is expected sorted already; re-sort defensively.
        let mut batch: Vec<&WinnerAssignment> = assignments.iter().collect();
        batch.sort_by_key(|a| a.minute_of_day);

        let midnight = self
            .clock
            .now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        for assignment in batch {
            let slot = midnight + TimeDelta::minutes(assignment.minute_of_day as i64);
            let delay = slot - self.clock.now();

            if delay > TimeDelta::zero() {
                tracing::info!(
                    recipient = %assignment.name,
                    slot = %assignment.time_of_day(),
                    "waiting {}s until slot",
                    delay.num_seconds()
                );
                self.clock.sleep(delay.to_std().unwrap_or_default());
            } else {
                tracing::info!(
                    recipient = %assignment.name,
                    slot = %assignment.time_of_day(),
                    "slot already passed, sending immediately"
                );
            }

            let body = build_body(assignment);
            match self.sender.send(&assignment.name, &body) {
                Ok(()) => {
                    tracing::info!(recipient = %assignment.name, "invitation sent");
                    sent.insert(assignment.name.clone());
                }
                Err(e) => {
                    tracing::warn!(recipient = %assignment.name, "delivery failed: {e}");
                }
            }
        }

        tracing::info!(sent = sent.len(), "dispatch finished");
        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use std::cell::{Cell, RefCell};
    use std::io;

    /// Clock that advances instantly instead of sleeping.
    struct FakeClock {
        now: Cell<DateTime<Utc>>,
        slept: RefCell<Vec<Duration>>,
    }

    impl FakeClock {
        fn at_minute(minute: u32) -> Self {
            let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
            Self {
                now: Cell::new(midnight + TimeDelta::minutes(minute as i64)),
                slept: RefCell::new(Vec::new()),
            }
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
            let advanced = self.now.get()
                + TimeDelta::from_std(duration).unwrap_or_else(|_| TimeDelta::zero());
            self.now.set(advanced);
        }
    }

    /// Sender that records calls and fails for configured names.
    struct RecordingSender {
        calls: RefCell<Vec<(String, String)>>,
        failing: Vec<String>,
    }

    impl RecordingSender {
        fn new(failing: &[&str]) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                failing: failing.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl MessageSender for RecordingSender {
        fn send(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
            self.calls.borrow_mut().push((to.to_string(), body.to_string()));
            if self.failing.iter().any(|f| f == to) {
                return Err(DeliveryError::Spawn {
                    program: "mailer".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "gone"),
                });
            }
            Ok(())
        }
    }

    fn assignment(name: &str, minute: u32) -> WinnerAssignment {
        WinnerAssignment {
            name: name.to_string(),
            from_level: 100,
            to_level: 103,
            delta: 3,
            minute_of_day: minute,
        }
    }

    #[test]
    fn test_waits_exactly_until_each_slot() {
        let clock = FakeClock::at_minute(700);
        let sender = RecordingSender::new(&[]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![assignment("A", 720), assignment("B", 735)];
        let sent = scheduler.run(&batch, |a| format!("hi {}", a.name));

        assert_eq!(sent.len(), 2);
        let slept = clock.slept.borrow();
        assert_eq!(slept.len(), 2);
        assert_eq!(slept[0], Duration::from_secs(20 * 60));
        assert_eq!(slept[1], Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_past_slots_send_immediately_without_sleeping() {
        let clock = FakeClock::at_minute(1100);
        let sender = RecordingSender::new(&[]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![assignment("A", 720), assignment("B", 900)];
        let sent = scheduler.run(&batch, |a| a.name.clone());

        assert_eq!(sent.len(), 2);
        assert!(clock.slept.borrow().is_empty());
    }

    #[test]
    fn test_unsorted_input_is_dispatched_in_time_order() {
        let clock = FakeClock::at_minute(600);
        let sender = RecordingSender::new(&[]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![assignment("late", 900), assignment("early", 700)];
        scheduler.run(&batch, |a| a.name.clone());

        let calls = sender.calls.borrow();
        assert_eq!(calls[0].0, "early");
        assert_eq!(calls[1].0, "late");
    }

    #[test]
    fn test_one_failure_never_aborts_the_batch() {
        let clock = FakeClock::at_minute(600);
        let sender = RecordingSender::new(&["B"]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![
            assignment("A", 700),
            assignment("B", 720),
            assignment("C", 740),
        ];
        let sent = scheduler.run(&batch, |a| a.name.clone());

        assert_eq!(sender.calls.borrow().len(), 3);
        assert!(sent.contains("A"));
        assert!(!sent.contains("B"));
        assert!(sent.contains("C"));
    }

    #[test]
    fn test_success_set_is_subset_of_input_names() {
        let clock = FakeClock::at_minute(600);
        let sender = RecordingSender::new(&["A"]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![assignment("A", 700), assignment("B", 750)];
        let sent = scheduler.run(&batch, |a| a.name.clone());

        for name in &sent {
            assert!(batch.iter().any(|a| &a.name == name));
        }
    }

    #[test]
    fn test_empty_batch_returns_empty_set() {
        let clock = FakeClock::at_minute(600);
        let sender = RecordingSender::new(&[]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        assert!(scheduler.run(&[], |a| a.name.clone()).is_empty());
        assert!(sender.calls.borrow().is_empty());
    }

    #[test]
    fn test_body_builder_receives_each_assignment() {
        let clock = FakeClock::at_minute(600);
        let sender = RecordingSender::new(&[]);
        let scheduler = DispatchScheduler::new(&clock, &sender);

        let batch = vec![assignment("A", 700)];
        scheduler.run(&batch, |a| format!("greetings {} (+{})", a.name, a.delta));

        let calls = sender.calls.borrow();
        assert_eq!(calls[0].1, "greetings A (+3)");
    }
}
