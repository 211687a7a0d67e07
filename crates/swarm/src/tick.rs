//! # Tick Loop
//!
//! Fixed-timestep cadence for `World::tick`. The core has no clock; this
//! loop decides when a tick is due and keeps timing statistics.

use std::time::{Duration, Instant};

/// Fixed-timestep tick loop controller.
pub struct TickLoop {
    /// Target tick duration.
    tick_duration: Duration,
    /// Time the accumulator was last advanced.
    last_poll: Instant,
    /// Time owed to the simulation.
    accumulator: Duration,
    /// Total ticks executed.
    tick_count: u64,
    /// Tick timing statistics.
    stats: TickStats,
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Fastest tick observed, in microseconds.
    pub min_tick_us: u64,
    /// Slowest tick observed, in microseconds.
    pub max_tick_us: u64,
    /// Rolling average tick duration, in microseconds.
    pub avg_tick_us: u64,
    /// Ticks that took longer than the budget.
    pub late_ticks: u64,
}

impl TickLoop {
    /// Creates a tick loop running at `tick_rate` ticks per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_duration = Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)));

        Self {
            tick_duration,
            last_poll: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: TickStats {
                min_tick_us: u64::MAX,
                max_tick_us: 0,
                avg_tick_us: 0,
                late_ticks: 0,
            },
        }
    }

    /// Returns true if at least one tick is owed.
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_poll);
        self.last_poll = now;

        self.accumulator >= self.tick_duration
    }

    /// Consumes one tick's worth of time and returns the tick start time.
    #[must_use]
    pub fn begin_tick(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.tick_duration);
        self.tick_count += 1;
        Instant::now()
    }

    /// Records how long the tick started at `start` took.
    pub fn end_tick(&mut self, start: Instant) {
        let duration = start.elapsed();
        let duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        self.stats.min_tick_us = self.stats.min_tick_us.min(duration_us);
        self.stats.max_tick_us = self.stats.max_tick_us.max(duration_us);
        self.stats.avg_tick_us = if self.tick_count <= 1 {
            duration_us
        } else {
            (self.stats.avg_tick_us * 15 + duration_us) / 16
        };

        if duration > self.tick_duration {
            self.stats.late_ticks += 1;
        }
    }

    /// Sleeps until the accumulator owes a full tick.
    pub fn wait_for_next_tick(&self) {
        let owed = self.accumulator + self.last_poll.elapsed();
        if owed < self.tick_duration {
            std::thread::sleep(self.tick_duration - owed);
        }
    }

    /// Returns the number of ticks begun so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns tick statistics.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Returns the target tick duration.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}
