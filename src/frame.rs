use std::time::Instant;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and the time since the previous tick
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub delta: f32,
}

/// Ticks once per presented frame and keeps a smoothed FPS figure.
pub struct FrameClock {
    frame_number: u64,
    last_frame_time: Instant,
    frames_in_window: u32,
    window_elapsed: f32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            last_frame_time: now,
            frames_in_window: 0,
            window_elapsed: 0.0,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.record(delta);

        let info = FrameInfo {
            number: self.frame_number,
            delta,
        };
        self.frame_number += 1;
        info
    }

    /// Frames per second over the last completed one-second window.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    fn record(&mut self, delta: f32) {
        self.frames_in_window += 1;
        self.window_elapsed += delta;
        if self.window_elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames_in_window as f32 / self.window_elapsed;
            self.frames_in_window = 0;
            self.window_elapsed = 0.0;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
