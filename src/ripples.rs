// ripples.rs - Kinematic rain and expanding rings
//
// No grid and no PDE: rings grow and fade at fixed rates, drops fall in a
// straight line pushed sideways by the wind, and a drop that reaches the
// water line turns into a ring.

use std::ops::{Range, RangeInclusive};

use glam::Vec2;
use rand::Rng;

pub const BASE_RADIUS: f32 = 5.0;
pub const DEFAULT_EXPANSION_SPEED: f32 = 0.8; // radius growth per tick
pub const MIN_EXPANSION_SPEED: f32 = 0.2;
pub const EXPANSION_STEP: f32 = 0.2;
pub const FADE_SPEED: f32 = 0.02; // opacity lost per tick
pub const WIND_STEP: f32 = 0.5;

const SPAWN_COUNT: RangeInclusive<u32> = 3..=5;
const FALL_SPEED: Range<f32> = 2.0..5.0;
const DRIFT: Range<f32> = -1.0..1.0;
const DROP_SIZE: Range<f32> = 8.0..20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub pos: Vec2,
    pub fall_speed: f32,
    pub drift_x: f32,
    pub size: f32,
}

/// Ellipse the drops fall from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Cloud {
    fn default() -> Self {
        Cloud {
            center: Vec2::new(400.0, 550.0),
            width: 200.0,
            height: 60.0,
        }
    }
}

impl Cloud {
    /// Inclusive integer x span drops spawn across.
    fn spawn_span(&self) -> RangeInclusive<i32> {
        let cx = self.center.x as i32;
        let half = (self.width / 2.0).floor() as i32;
        cx - half..=cx + half
    }

    /// Height drops start at: the cloud's lower edge.
    fn base(&self) -> f32 {
        self.center.y - (self.height / 2.0).floor()
    }
}

#[derive(Debug, Clone)]
pub struct RippleField {
    pub ripples: Vec<Ripple>,
    pub raindrops: Vec<Raindrop>,
    pub cloud: Cloud,
    wind: f32,
    expansion_speed: f32,
    paused: bool,
}

impl Default for RippleField {
    fn default() -> Self {
        RippleField::new(Cloud::default())
    }
}

impl RippleField {
    pub fn new(cloud: Cloud) -> RippleField {
        RippleField {
            ripples: Vec::new(),
            raindrops: Vec::new(),
            cloud,
            wind: 0.0,
            expansion_speed: DEFAULT_EXPANSION_SPEED,
            paused: false,
        }
    }

    pub fn wind(&self) -> f32 {
        self.wind
    }

    pub fn expansion_speed(&self) -> f32 {
        self.expansion_speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Positive pushes drops right, negative left.
    pub fn adjust_wind(&mut self, delta: f32) -> f32 {
        self.wind += delta;
        log::debug!("wind -> {:.1}", self.wind);
        self.wind
    }

    pub fn calm_wind(&mut self) {
        self.wind = 0.0;
    }

    /// No upper bound; the floor is `MIN_EXPANSION_SPEED`.
    pub fn adjust_expansion_speed(&mut self, delta: f32) -> f32 {
        self.expansion_speed = (self.expansion_speed + delta).max(MIN_EXPANSION_SPEED);
        log::debug!("ripple expansion speed -> {:.1}", self.expansion_speed);
        self.expansion_speed
    }

    /// New ring at full opacity. Allowed while paused.
    pub fn add_ripple(&mut self, center: Vec2) {
        self.ripples.push(Ripple {
            center,
            radius: BASE_RADIUS,
            opacity: 1.0,
        });
    }

    /// One frame: rings, then drops, then new drops. Frozen while paused.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        if self.paused {
            return;
        }
        self.update_ripples();
        self.update_raindrops();
        self.spawn_raindrops(rng);
    }

    pub fn update_ripples(&mut self) {
        let speed = self.expansion_speed;
        self.ripples.retain_mut(|r| {
            r.radius += speed;
            r.opacity -= FADE_SPEED;
            r.opacity > 0.0
        });
    }

    /// Moves every drop; those at or below the water line become rings.
    pub fn update_raindrops(&mut self) {
        let wind = self.wind;
        let ripples = &mut self.ripples;
        self.raindrops.retain_mut(|d| {
            d.pos.x += d.drift_x + wind;
            d.pos.y -= d.fall_speed;
            if d.pos.y > 0.0 {
                return true;
            }
            ripples.push(Ripple {
                center: Vec2::new(d.pos.x, 0.0),
                radius: BASE_RADIUS + d.size,
                opacity: 1.0,
            });
            false
        });
    }

    /// Releases 3 to 5 drops from the cloud's lower edge.
    pub fn spawn_raindrops<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let count = rng.gen_range(SPAWN_COUNT);
        let span = self.cloud.spawn_span();
        let y = self.cloud.base();
        for _ in 0..count {
            let size = rng.gen_range(DROP_SIZE);
            let x = rng.gen_range(span.clone()) as f32;
            self.raindrops.push(Raindrop {
                pos: Vec2::new(x, y),
                fall_speed: rng.gen_range(FALL_SPEED),
                drift_x: rng.gen_range(DRIFT),
                size,
            });
        }
        count
    }
}
