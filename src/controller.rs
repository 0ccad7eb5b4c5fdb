//! Input and tick handling for the two simulations.
//!
//! A host forwards window events to a [`Controller`]; the controller owns the
//! simulation state outright, so every mutation happens through `&mut self`
//! on the host's event thread.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::rain::RainDriver;
use crate::ripples::{Cloud, EXPANSION_STEP, RippleField, WIND_STEP};
use crate::viewport::Viewport;
use crate::wave::{WAVE_SPEED_STEP, WaveGrid};

/// Arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
}

pub trait Controller {
    /// `x`, `y` in window coordinates (top-left origin).
    fn on_pointer_down(&mut self, x: f32, y: f32);
    fn on_key(&mut self, key: char);
    fn on_special_key(&mut self, key: SpecialKey);
    fn on_tick(&mut self);
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("rng seed {seed}");
    ChaCha8Rng::seed_from_u64(seed)
}

pub struct WaveController {
    pub grid: WaveGrid,
    pub rain: RainDriver,
    rng: ChaCha8Rng,
}

impl WaveController {
    pub fn new(config: &SimConfig) -> WaveController {
        WaveController::with_rng(config, seeded_rng(config.seed))
    }

    pub fn with_rng(config: &SimConfig, rng: ChaCha8Rng) -> WaveController {
        let viewport = Viewport::new(config.width, config.height, config.resolution);
        WaveController {
            grid: WaveGrid::with_params(
                viewport,
                config.wave_speed,
                config.damping,
                config.drop_amount,
            ),
            rain: RainDriver::new(config.rain_intensity, config.rain_max_intensity),
            rng,
        }
    }

    /// Clears the water and stops the rain.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.rain.set_active(false);
        log::info!("simulation reset");
    }
}

impl Controller for WaveController {
    fn on_pointer_down(&mut self, x: f32, y: f32) {
        let y = self.grid.viewport().flip_y(y);
        self.grid.inject(x, y);
    }

    fn on_key(&mut self, key: char) {
        match key {
            ' ' => {
                let paused = self.grid.toggle_paused();
                log::info!("paused: {paused}");
            }
            'r' => {
                let active = self.rain.toggle();
                log::info!("rain: {active}");
            }
            'c' => self.reset(),
            _ => {}
        }
    }

    fn on_special_key(&mut self, key: SpecialKey) {
        match key {
            SpecialKey::Up => {
                self.grid.adjust_wave_speed(WAVE_SPEED_STEP);
            }
            SpecialKey::Down => {
                self.grid.adjust_wave_speed(-WAVE_SPEED_STEP);
            }
            SpecialKey::Right => {
                self.rain.adjust_intensity(1);
            }
            SpecialKey::Left => {
                self.rain.adjust_intensity(-1);
            }
        }
    }

    fn on_tick(&mut self) {
        let vp = *self.grid.viewport();
        self.rain.tick(&mut self.grid, vp.width, vp.height, &mut self.rng);
        self.grid.step();
    }
}

pub struct RippleController {
    pub field: RippleField,
    height: f32,
    rng: ChaCha8Rng,
}

impl RippleController {
    pub fn new(config: &SimConfig) -> RippleController {
        RippleController::with_rng(config, seeded_rng(config.seed))
    }

    pub fn with_rng(config: &SimConfig, rng: ChaCha8Rng) -> RippleController {
        RippleController {
            field: RippleField::new(Cloud::default()),
            height: config.height,
            rng,
        }
    }
}

impl Controller for RippleController {
    fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.field.add_ripple(Vec2::new(x, self.height - y));
    }

    fn on_key(&mut self, key: char) {
        match key {
            ' ' => {
                let paused = self.field.toggle_paused();
                log::info!("paused: {paused}");
            }
            'w' => {
                self.field.adjust_wind(WIND_STEP);
            }
            'a' => {
                self.field.adjust_wind(-WIND_STEP);
            }
            's' => {
                self.field.calm_wind();
                log::info!("wind calmed");
            }
            _ => {}
        }
    }

    fn on_special_key(&mut self, key: SpecialKey) {
        match key {
            SpecialKey::Up => {
                self.field.adjust_expansion_speed(EXPANSION_STEP);
            }
            SpecialKey::Down => {
                self.field.adjust_expansion_speed(-EXPANSION_STEP);
            }
            SpecialKey::Left | SpecialKey::Right => {}
        }
    }

    fn on_tick(&mut self) {
        self.field.tick(&mut self.rng);
    }
}
