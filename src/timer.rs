/// Owned, cancellable scheduled tasks on a millisecond clock.
///
/// Nothing here reads the wall clock: the game loop feeds elapsed time into
/// `Timers::advance_clock` and asks `collect_firings` how many times each
/// task fired.  Tests drive the clock by hand.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Schedule {
    Repeating { period_ms: f64 },
    Once,
}

/// A single pending task.  Dropping it cancels it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTask {
    schedule: Schedule,
    due_ms: f64,
}

impl ScheduledTask {
    pub fn repeating(now_ms: f64, period_ms: f64) -> Self {
        Self {
            schedule: Schedule::Repeating { period_ms },
            due_ms: now_ms + period_ms,
        }
    }

    pub fn once(now_ms: f64, delay_ms: f64) -> Self {
        Self { schedule: Schedule::Once, due_ms: now_ms + delay_ms }
    }

    pub fn due_ms(&self) -> f64 {
        self.due_ms
    }

    /// Number of firings up to and including `now_ms`.  A one-shot task
    /// fires at most once; the caller drops it afterwards.
    fn poll(&mut self, now_ms: f64) -> u32 {
        match self.schedule {
            Schedule::Once => u32::from(now_ms >= self.due_ms),
            Schedule::Repeating { period_ms } => {
                let mut fired = 0;
                while now_ms >= self.due_ms {
                    fired += 1;
                    self.due_ms += period_ms;
                }
                fired
            }
        }
    }
}

/// What fired during one `collect_firings` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerFirings {
    pub spawns: u32,
    pub removal: bool,
}

/// The controller's two timers: the repeating spawn task and the one-shot
/// match-removal task.  At most one of each is live at any time.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    now_ms: f64,
    spawn: Option<ScheduledTask>,
    removal: Option<ScheduledTask>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Replaces any live spawn task; the new one starts a fresh period.
    pub fn start_spawn(&mut self, period_ms: f64) {
        self.spawn = Some(ScheduledTask::repeating(self.now_ms, period_ms));
    }

    pub fn cancel_spawn(&mut self) {
        self.spawn = None;
    }

    pub fn spawn_task(&self) -> Option<&ScheduledTask> {
        self.spawn.as_ref()
    }

    /// Replaces any pending removal task.
    pub fn start_removal(&mut self, delay_ms: f64) {
        self.removal = Some(ScheduledTask::once(self.now_ms, delay_ms));
    }

    pub fn cancel_removal(&mut self) {
        self.removal = None;
    }

    pub fn removal_pending(&self) -> bool {
        self.removal.is_some()
    }

    pub fn cancel_all(&mut self) {
        self.cancel_spawn();
        self.cancel_removal();
    }

    pub fn is_idle(&self) -> bool {
        self.spawn.is_none() && self.removal.is_none()
    }

    /// Move the clock forward without firing anything.  Tasks started
    /// afterwards are timed from the new instant.
    pub fn advance_clock(&mut self, elapsed_ms: f64) {
        self.now_ms += elapsed_ms.max(0.0);
    }

    /// Fire everything due at the current instant.
    pub fn collect_firings(&mut self) -> TimerFirings {
        let now = self.now_ms;

        let spawns = self.spawn.as_mut().map_or(0, |task| task.poll(now));

        let removal = self.removal.as_mut().map_or(false, |task| task.poll(now) > 0);
        if removal {
            self.removal = None;
        }

        TimerFirings { spawns, removal }
    }

    pub fn advance(&mut self, elapsed_ms: f64) -> TimerFirings {
        self.advance_clock(elapsed_ms);
        self.collect_firings()
    }
}
