use std::time::{Duration, Instant};

/// Nominal playback position measured in host ticks.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    fps: u32,
    ticks: u64,
}

impl PlaybackClock {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            ticks: 0,
        }
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time the ticks so far would take at the nominal rate.
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.ticks as f64 / f64::from(self.fps))
    }
}

/// Limits a loop to a fixed number of iterations per second.
///
/// Deadlines are scheduled from the previous deadline rather than from the
/// wake-up time, so sleep jitter does not accumulate. A loop that falls more
/// than one period behind is rescheduled from now instead of bursting to
/// catch up.
#[derive(Debug)]
pub struct Pacer {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Pacer {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks until the next tick is due and returns how long it slept.
    /// The first call returns immediately and starts the schedule.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let Some(deadline) = self.next_deadline else {
            self.next_deadline = Some(now + self.period);
            return Duration::ZERO;
        };

        if deadline > now {
            let slept = deadline - now;
            std::thread::sleep(slept);
            self.next_deadline = Some(deadline + self.period);
            slept
        } else {
            let behind = now - deadline;
            if behind > self.period {
                tracing::trace!(?behind, "pacer fell behind, resynchronising");
                self.next_deadline = Some(now + self.period);
            } else {
                self.next_deadline = Some(deadline + self.period);
            }
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_nominal_elapsed_time() {
        let mut clock = PlaybackClock::new(31);
        for _ in 0..62 {
            clock.advance();
        }
        assert_eq!(clock.ticks(), 62);
        assert!((clock.elapsed().as_secs_f64() - 2.0).abs() < 1e-9);

        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn zero_fps_is_clamped() {
        assert_eq!(Pacer::new(0).period(), Duration::from_secs(1));
        assert_eq!(PlaybackClock::new(0).fps, 1);
    }

    #[test]
    fn pacer_holds_the_requested_rate() {
        let mut pacer = Pacer::new(200);
        let start = Instant::now();
        for _ in 0..11 {
            pacer.wait();
        }
        // Ten full periods follow the first, immediate tick.
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn pacer_resynchronises_after_a_stall() {
        let mut pacer = Pacer::new(1000);
        pacer.wait();
        std::thread::sleep(Duration::from_millis(20));
        let stalled_until = Instant::now();

        assert_eq!(pacer.wait(), Duration::ZERO);
        let deadline = pacer.next_deadline.unwrap();
        assert!(deadline > stalled_until);
    }
}
