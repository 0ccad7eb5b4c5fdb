use rand::Rng;

use crate::wave::DropTarget;

pub const MIN_INTENSITY: u32 = 1;
pub const DEFAULT_INTENSITY: u32 = 3;
pub const DEFAULT_MAX_INTENSITY: u32 = 10;

/// Rainfall policy over a [`DropTarget`]: while active, drops `intensity`
/// uniformly placed drops per tick.
#[derive(Debug, Clone)]
pub struct RainDriver {
    active: bool,
    intensity: u32,
    max_intensity: u32,
}

impl Default for RainDriver {
    fn default() -> Self {
        RainDriver::new(DEFAULT_INTENSITY, DEFAULT_MAX_INTENSITY)
    }
}

impl RainDriver {
    /// Starts inactive. `max_intensity` below 1 is raised to 1 and
    /// `intensity` is clamped into `[1, max_intensity]`.
    pub fn new(intensity: u32, max_intensity: u32) -> RainDriver {
        let max_intensity = max_intensity.max(MIN_INTENSITY);
        RainDriver {
            active: false,
            intensity: intensity.clamp(MIN_INTENSITY, max_intensity),
            max_intensity,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    pub fn max_intensity(&self) -> u32 {
        self.max_intensity
    }

    /// Adds `delta` drops per tick, clamped to `[1, max_intensity]`.
    pub fn adjust_intensity(&mut self, delta: i32) -> u32 {
        let next = (self.intensity as i64 + delta as i64)
            .clamp(MIN_INTENSITY as i64, self.max_intensity as i64);
        self.intensity = next as u32;
        log::debug!("rain intensity -> {}", self.intensity);
        self.intensity
    }

    /// Injects `intensity` drops at uniform positions in
    /// `[0, width) x [0, height)`. Does nothing while inactive, while the
    /// target is paused, or for an empty area.
    pub fn tick<T, R>(&self, target: &mut T, width: f32, height: f32, rng: &mut R)
    where
        T: DropTarget + ?Sized,
        R: Rng,
    {
        if !self.active || target.is_paused() {
            return;
        }
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        for _ in 0..self.intensity {
            let x = rng.gen_range(0.0..width);
            let y = rng.gen_range(0.0..height);
            target.inject(x, y);
        }
    }
}
