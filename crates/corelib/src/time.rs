use std::time::Instant;

/// Frame clock: delta and elapsed time, advanced once per frame.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    delta_time: f32,
    elapsed: f32,
    frame_count: u64,
    /// Exponential moving average of the frame rate.
    smoothed_fps: f32,
}

impl FrameClock {
    /// 5% new sample, 95% history.
    const FPS_SMOOTHING: f32 = 0.05;

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_tick: start,
            delta_time: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            smoothed_fps: 60.0,
        }
    }

    /// Advance to now.
    pub fn update(&mut self) {
        self.update_to(Instant::now());
    }

    /// Advance to `now`. Instants earlier than the last tick give a zero
    /// delta.
    pub fn update_to(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = self.last_tick.max(now);
        self.delta_time = delta.as_secs_f32();
        self.elapsed = self
            .last_tick
            .saturating_duration_since(self.start)
            .as_secs_f32();
        self.frame_count += 1;

        if self.delta_time > 0.0 {
            let instant_fps = 1.0 / self.delta_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - Self::FPS_SMOOTHING)
                + instant_fps * Self::FPS_SMOOTHING;
        }
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    #[inline]
    pub fn seconds_elapsed_since_start(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
