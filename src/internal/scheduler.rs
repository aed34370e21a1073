//! Recurring timer and the single background worker that runs refresh cycles.

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::api::StorySource;
use crate::internal::refresh::RefreshCycle;

/// Work the scheduler runs on every tick. Blocking is fine: it runs on a
/// blocking worker, never on the timer task.
pub trait CycleRunner: Send + 'static {
    fn run_cycle(&mut self);
}

impl<S> CycleRunner for RefreshCycle<S>
where
    S: StorySource + Send + 'static,
{
    fn run_cycle(&mut self) {
        self.run();
    }
}

/// Messages sent to the scheduler thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerCommand {
    /// Run a cycle now, after any in-flight one finishes.
    Refresh,
    /// Change the period. The next tick comes one new period from now.
    SetInterval(Duration),
    Shutdown,
}

/// Cloneable handle for sending commands from the UI thread.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    tx: UnboundedSender<SchedulerCommand>,
}

impl SchedulerHandle {
    pub fn refresh(&self) {
        self.send(SchedulerCommand::Refresh);
    }

    pub fn set_interval(&self, period: Duration) {
        self.send(SchedulerCommand::SetInterval(period));
    }

    pub fn shutdown(&self) {
        self.send(SchedulerCommand::Shutdown);
    }

    fn send(&self, command: SchedulerCommand) {
        if self.tx.send(command.clone()).is_err() {
            tracing::warn!(?command, "Scheduler is not running; command dropped");
        }
    }

    /// Handle wired to a plain channel, for driving the UI without a worker.
    pub fn detached() -> (Self, UnboundedReceiver<SchedulerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

pub struct Scheduler {
    handle: SchedulerHandle,
    thread: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Start the worker thread. The first cycle runs immediately, then every `period`.
    pub fn spawn<R: CycleRunner>(runner: R, period: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("failed to build scheduler runtime")?;

        let thread = thread::Builder::new()
            .name("hn-refresh".to_string())
            .spawn(move || {
                let runner = Arc::new(Mutex::new(runner));
                runtime.block_on(run_loop(Arc::clone(&runner), rx, period));
                // An abandoned cycle keeps its blocking thread; don't wait for it.
                runtime.shutdown_background();
                drop(runner);
                tracing::info!("Scheduler stopped");
            })
            .context("failed to spawn scheduler thread")?;

        Ok(Self {
            handle: SchedulerHandle { tx },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    /// Ask the worker to stop and wait for its thread.
    ///
    /// Returns without waiting for an in-flight cycle; that cycle is abandoned.
    pub fn shutdown(mut self) {
        self.handle.shutdown();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("Scheduler thread panicked");
        }
    }
}

/// Longest period the timer accepts. Longer intervals are clamped to it.
pub const MAX_PERIOD: Duration = Duration::from_secs(u32::MAX as u64);

/// First-tick delay when `now + period` is not representable.
const FALLBACK_DELAY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn clamp_period(period: Duration) -> Duration {
    period.clamp(Duration::from_secs(1), MAX_PERIOD)
}

fn ticker_from(start: Instant, period: Duration) -> Interval {
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

enum Trigger {
    Tick,
    Command(Option<SchedulerCommand>),
}

async fn run_loop<R: CycleRunner>(
    runner: Arc<Mutex<R>>,
    mut rx: UnboundedReceiver<SchedulerCommand>,
    period: Duration,
) {
    let mut period = clamp_period(period);
    let mut ticker = ticker_from(Instant::now(), period);
    let mut queued = VecDeque::new();
    tracing::info!(period_secs = period.as_secs(), "Scheduler started");

    loop {
        let trigger = match queued.pop_front() {
            Some(command) => Trigger::Command(Some(command)),
            None => tokio::select! {
                _ = ticker.tick() => Trigger::Tick,
                command = rx.recv() => Trigger::Command(command),
            },
        };

        let run_cycle = match trigger {
            Trigger::Tick => true,
            Trigger::Command(Some(SchedulerCommand::Refresh)) => {
                tracing::info!("Manual refresh requested");
                true
            }
            Trigger::Command(Some(SchedulerCommand::SetInterval(requested))) => {
                let new_period = clamp_period(requested);
                if new_period != requested {
                    tracing::warn!(
                        requested_secs = requested.as_secs(),
                        period_secs = new_period.as_secs(),
                        "Update interval clamped"
                    );
                }
                if new_period != period {
                    tracing::info!(period_secs = new_period.as_secs(), "Changing update interval");
                    period = new_period;
                    let now = Instant::now();
                    let start = now.checked_add(period).unwrap_or(now + FALLBACK_DELAY);
                    ticker = ticker_from(start, period);
                }
                false
            }
            Trigger::Command(Some(SchedulerCommand::Shutdown)) | Trigger::Command(None) => break,
        };

        if run_cycle && run_once(&runner, &mut rx, &mut queued).await.is_break() {
            tracing::info!("Shutdown requested during refresh; abandoning cycle");
            break;
        }
    }
}

/// Run one cycle on the blocking pool and wait for it, so cycles never overlap.
///
/// Commands arriving meanwhile are queued, except `Shutdown`, which returns at once.
async fn run_once<R: CycleRunner>(
    runner: &Arc<Mutex<R>>,
    rx: &mut UnboundedReceiver<SchedulerCommand>,
    queued: &mut VecDeque<SchedulerCommand>,
) -> ControlFlow<()> {
    let runner = Arc::clone(runner);
    let mut cycle = tokio::task::spawn_blocking(move || {
        let mut guard = runner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.run_cycle();
    });

    loop {
        tokio::select! {
            joined = &mut cycle => {
                if let Err(e) = joined {
                    tracing::error!("Refresh cycle panicked: {}", e);
                }
                return ControlFlow::Continue(());
            }
            command = rx.recv() => match command {
                Some(SchedulerCommand::Shutdown) | None => return ControlFlow::Break(()),
                // Any number of refresh clicks during a cycle add one more cycle.
                Some(SchedulerCommand::Refresh) if queued.contains(&SchedulerCommand::Refresh) => {}
                Some(command) => queued.push_back(command),
            }
        }
    }
}
