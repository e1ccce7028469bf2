use rand::Rng;

/// Synthetic progress never passes this value until the upload answers.
pub const PROGRESS_CAP: f32 = 90.0;
/// Exclusive upper bound of a single tick's increment.
pub const MAX_TICK_STEP: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Idle,
    Running,
    Completed,
}

/// Handle of the repeating tick timer. Only one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Fabricated progress for a request that reports none.
///
/// The value climbs by random steps while a timer is held, never exceeds
/// [`PROGRESS_CAP`] and is only snapped to 100 by [`ProgressManager::complete`].
#[derive(Debug)]
pub struct ProgressManager {
    value: f32,
    phase: ProgressPhase,
    timer: Option<TimerHandle>,
    next_timer: u64,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            phase: ProgressPhase::Idle,
            timer: None,
            next_timer: 0,
        }
    }

    pub fn start(&mut self) -> TimerHandle {
        self.clear_timer();
        self.value = 0.0;
        self.phase = ProgressPhase::Running;

        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.timer = Some(handle);
        handle
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != ProgressPhase::Running || self.value >= PROGRESS_CAP {
            return;
        }
        let step = rng.random_range(0.0..MAX_TICK_STEP);
        self.value = (self.value + step).min(PROGRESS_CAP);
    }

    pub fn complete(&mut self) {
        self.clear_timer();
        self.value = 100.0;
        self.phase = ProgressPhase::Completed;
    }

    /// Release the timer without completing; the bar keeps its last value.
    pub fn stop(&mut self) {
        self.clear_timer();
        if self.phase == ProgressPhase::Running {
            self.phase = ProgressPhase::Idle;
        }
    }

    fn clear_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            tracing::trace!(?handle, "Cleared progress timer");
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Displayed percentage, `round(value)`
    pub fn percent(&self) -> u32 {
        self.value.round() as u32
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }
}
