//! [`ReminderLoop`]: the appliance's control loop.
//!
//! One `step` per tick: keep the clock synchronized, run the scheduler,
//! dispatch what fired, and keep the idle clock face current. Nothing that
//! happens inside a step ends the loop; only the shutdown signal does.

use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use helping_core::{ClockSource, SyncError};
use helping_notify::{Dispatcher, RenderSink};
use helping_rules::Scheduler;

use crate::metrics::LoopStats;
use crate::types::{LoopSettings, StepReport};

/// Owns the clock, the scheduler and the dispatcher.
pub struct ReminderLoop<C: ClockSource, S: RenderSink> {
    clock: C,
    scheduler: Scheduler,
    dispatcher: Dispatcher<S>,
    settings: LoopSettings,
    stats: LoopStats,
    last_sync_attempt: Option<Instant>,
    last_fire: Option<Instant>,
    /// Minute key of the last idle face drawn.
    last_idle_minute: Option<u64>,
}

impl<C: ClockSource, S: RenderSink> ReminderLoop<C, S> {
    pub fn new(
        clock: C,
        scheduler: Scheduler,
        dispatcher: Dispatcher<S>,
        settings: LoopSettings,
    ) -> Self {
        Self {
            clock,
            scheduler,
            dispatcher,
            settings,
            stats: LoopStats::default(),
            last_sync_attempt: None,
            last_fire: None,
            last_idle_minute: None,
        }
    }

    /// One iteration: sync if due, tick, dispatch, refresh the idle face.
    pub async fn step(&mut self) -> StepReport {
        let sync_attempted = self.synchronize_if_due().await;

        let events = self.scheduler.tick(&self.clock);
        let fired: Vec<_> = events.iter().map(|e| e.task).collect();
        if !events.is_empty() {
            let results = self.dispatcher.dispatch(&events);
            self.stats.render_failures += results.iter().filter(|r| !r.success).count() as u64;
            self.last_fire = Some(Instant::now());
        }

        let idle_refreshed = self.refresh_idle_if_due();

        let report = StepReport {
            synchronized: self.clock.is_synchronized(),
            sync_attempted,
            fired,
            idle_refreshed,
        };
        self.stats.record_step(&report);
        report
    }

    /// Drive `step` every `tick_interval` until `shutdown` is notified.
    ///
    /// Ticks missed while a step was running are skipped, not replayed.
    pub async fn run(&mut self, shutdown: Arc<Notify>) {
        self.dispatcher.show_startup();

        let mut ticker = tokio::time::interval(self.settings.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            clock = self.clock.name(),
            rules = self.scheduler.rules().len(),
            tick_ms = self.settings.tick_interval.as_millis() as u64,
            "reminder loop started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.notified() => {
                    info!("shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.step().await;
                }
            }
        }

        info!(
            steps = self.stats.steps,
            fired = self.stats.total_fired(),
            sync_failures = self.stats.sync_failures,
            "reminder loop stopped"
        );
    }

    /// While unsynchronized, retry every `sync_retry`; once synchronized,
    /// resync every `resync_interval`. The first attempt is immediate.
    async fn synchronize_if_due(&mut self) -> bool {
        let synchronized = self.clock.is_synchronized();
        let interval = if synchronized {
            self.settings.resync_interval
        } else {
            self.settings.sync_retry
        };
        let due = self
            .last_sync_attempt
            .map_or(true, |last| last.elapsed() >= interval);
        if !due {
            return false;
        }

        self.last_sync_attempt = Some(Instant::now());
        let outcome = tokio::time::timeout(self.settings.sync_timeout, self.clock.synchronize()).await;
        let ok = match outcome {
            Ok(ok) => ok,
            Err(_) => {
                let err = SyncError::Timeout(self.settings.sync_timeout.as_millis() as u64);
                warn!(clock = self.clock.name(), error = %err, "clock sync abandoned");
                false
            }
        };
        self.stats.record_sync(ok);

        if !ok && !synchronized {
            debug!(
                clock = self.clock.name(),
                retry_secs = self.settings.sync_retry.as_secs(),
                "still unsynchronized"
            );
        }
        true
    }

    /// Redraw the idle face on the first step of each new minute, unless a
    /// reminder is still being held on screen. A failed redraw is not
    /// retried until the next minute.
    fn refresh_idle_if_due(&mut self) -> bool {
        let Ok(now) = self.clock.now() else {
            return false;
        };
        if self.last_idle_minute == Some(now.minute_key()) {
            return false;
        }
        if let Some(fired) = self.last_fire {
            if fired.elapsed() < self.settings.reminder_hold {
                return false;
            }
        }
        self.last_idle_minute = Some(now.minute_key());
        self.dispatcher.show_idle(&now)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use helping_core::{ClockError, ManualClock, WallClockTime};
    use helping_notify::{RecordingSink, RenderCall, TaskCatalog};
    use helping_rules::{ReminderRuleSet, SchedulerState, TaskId};

    fn at(hour: u8, minute: u8) -> WallClockTime {
        WallClockTime::from_day_and_time(20, hour, minute, 0).unwrap()
    }

    fn build<C: ClockSource>(clock: C) -> ReminderLoop<C, RecordingSink> {
        ReminderLoop::new(
            clock,
            Scheduler::new(ReminderRuleSet::defaults()),
            Dispatcher::new(TaskCatalog::defaults(), RecordingSink::new()),
            LoopSettings::default(),
        )
    }

    /// A clock whose sync never completes.
    struct HangingClock;

    #[async_trait]
    impl ClockSource for HangingClock {
        fn now(&self) -> Result<WallClockTime, ClockError> {
            Err(ClockError::Unsynchronized)
        }

        async fn synchronize(&mut self) -> bool {
            std::future::pending::<()>().await;
            true
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sync_is_retried_only_after_retry_interval() {
        let mut clock = ManualClock::new(at(9, 5));
        clock.fail_next_syncs(2);
        let mut reminder_loop = build(clock);

        let first = reminder_loop.step().await;
        assert!(first.sync_attempted);
        assert!(!first.synchronized);
        assert!(first.fired.is_empty());

        let second = reminder_loop.step().await;
        assert!(!second.sync_attempted);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(reminder_loop.step().await.sync_attempted);
        assert_eq!(reminder_loop.clock().sync_attempts(), 2);

        tokio::time::advance(Duration::from_secs(30)).await;
        let synced = reminder_loop.step().await;
        assert!(synced.synchronized);
        assert_eq!(synced.fired, vec![TaskId::Restroom]);
        assert_eq!(reminder_loop.stats().sync_failures, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unsynchronized_steps_fire_and_draw_nothing() {
        let mut clock = ManualClock::new(at(8, 30));
        clock.fail_next_syncs(u32::MAX);
        let mut reminder_loop = build(clock);

        for _ in 0..3 {
            let report = reminder_loop.step().await;
            assert!(report.fired.is_empty());
            assert!(!report.idle_refreshed);
        }
        assert_eq!(reminder_loop.scheduler().state(), SchedulerState::Unsynchronized);
        assert!(reminder_loop.scheduler().tracker().is_empty());
        assert!(reminder_loop.dispatcher().sink().calls().is_empty());
        assert_eq!(reminder_loop.stats().unsynchronized_steps, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn resync_happens_after_resync_interval() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(9, 1)));

        assert!(reminder_loop.step().await.sync_attempted);
        assert!(!reminder_loop.step().await.sync_attempted);

        tokio::time::advance(Duration::from_secs(6 * 3_600)).await;
        assert!(reminder_loop.step().await.sync_attempted);
        assert_eq!(reminder_loop.clock().sync_attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_sync_is_bounded_by_timeout() {
        let mut reminder_loop = build(HangingClock);
        let report = reminder_loop.step().await;
        assert!(report.sync_attempted);
        assert!(!report.synchronized);
        assert_eq!(reminder_loop.stats().sync_failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reminder_is_dispatched_to_sink() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(8, 30)));
        let report = reminder_loop.step().await;

        assert_eq!(report.fired, vec![TaskId::Restroom, TaskId::Breakfast]);
        assert_eq!(
            reminder_loop.dispatcher().sink().messages(),
            vec!["Time to try to use the restroom!", "mmm yummy oatmeal"]
        );
        // Same minute again: nothing new.
        assert!(reminder_loop.step().await.fired.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_face_refreshes_once_per_minute() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(9, 1)));

        assert!(reminder_loop.step().await.idle_refreshed);
        assert!(!reminder_loop.step().await.idle_refreshed);

        reminder_loop.clock_mut().advance_minutes(1);
        assert!(reminder_loop.step().await.idle_refreshed);
        assert_eq!(reminder_loop.dispatcher().sink().idle_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_idle_refresh_waits_for_next_minute() {
        let mut sink = RecordingSink::new();
        sink.fail_next(1);
        let mut reminder_loop = ReminderLoop::new(
            ManualClock::synchronized_at(at(9, 1)),
            Scheduler::new(ReminderRuleSet::defaults()),
            Dispatcher::new(TaskCatalog::defaults(), sink),
            LoopSettings::default(),
        );

        assert!(!reminder_loop.step().await.idle_refreshed);
        for _ in 0..5 {
            assert!(!reminder_loop.step().await.idle_refreshed);
        }
        assert_eq!(reminder_loop.dispatcher().sink().idle_count(), 1);

        reminder_loop.clock_mut().advance_minutes(1);
        assert!(reminder_loop.step().await.idle_refreshed);
        assert_eq!(reminder_loop.dispatcher().sink().idle_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_face_waits_while_reminder_is_held() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(9, 5)));

        let fired = reminder_loop.step().await;
        assert_eq!(fired.fired, vec![TaskId::Restroom]);
        assert!(!fired.idle_refreshed);

        tokio::time::advance(Duration::from_secs(1)).await;
        reminder_loop.clock_mut().advance_minutes(1);
        assert!(!reminder_loop.step().await.idle_refreshed);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(reminder_loop.step().await.idle_refreshed);

        let calls = reminder_loop.dispatcher().sink().calls();
        assert!(matches!(calls.last(), Some(RenderCall::Idle { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_until_shutdown() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(9, 1)));
        let shutdown = Arc::new(Notify::new());

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(3_500)).await;
            trigger.notify_one();
        });

        reminder_loop.run(shutdown).await;

        assert!(reminder_loop.stats().steps >= 3);
        let calls = reminder_loop.dispatcher().sink().calls();
        assert_eq!(calls.first(), Some(&RenderCall::Startup));
    }

    #[tokio::test(start_paused = true)]
    async fn run_returns_at_once_when_already_shut_down() {
        let mut reminder_loop = build(ManualClock::synchronized_at(at(9, 1)));
        let shutdown = Arc::new(Notify::new());
        shutdown.notify_one();

        reminder_loop.run(shutdown).await;
        assert_eq!(reminder_loop.stats().steps, 0);
    }
}
