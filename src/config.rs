use std::fmt;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::rain::{DEFAULT_INTENSITY, DEFAULT_MAX_INTENSITY, MIN_INTENSITY};
use crate::wave::{
    DEFAULT_DAMPING, DEFAULT_DROP_AMOUNT, DEFAULT_RESOLUTION, DEFAULT_WAVE_SPEED, MAX_WAVE_SPEED,
    MIN_WAVE_SPEED,
};

/// Which simulation the window runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Height-field wave grid with click drops and rain.
    #[default]
    Wave,
    /// Expanding rings and falling raindrops, no grid.
    Ripple,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Wave => write!(f, "wave"),
            Variant::Ripple => write!(f, "ripple"),
        }
    }
}

/// Startup settings. Read once; nothing here changes while running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub variant: Variant,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub resolution: usize,
    pub wave_speed: f32,
    pub damping: f32,
    pub drop_amount: f32,
    pub rain_intensity: u32,
    pub rain_max_intensity: u32,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            variant: Variant::Wave,
            title: "Water Ripple Simulation".to_string(),
            width: 800.0,
            height: 600.0,
            resolution: DEFAULT_RESOLUTION,
            wave_speed: DEFAULT_WAVE_SPEED,
            damping: DEFAULT_DAMPING,
            drop_amount: DEFAULT_DROP_AMOUNT,
            rain_intensity: DEFAULT_INTENSITY,
            rain_max_intensity: DEFAULT_MAX_INTENSITY,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<SimConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.resolution >= 3,
            "resolution must be at least 3, got {}",
            self.resolution
        );
        ensure!(
            self.width > 0.0 && self.height > 0.0,
            "window size must be positive, got {}x{}",
            self.width,
            self.height
        );
        if !(0.0..1.0).contains(&self.damping) {
            bail!("damping must be in [0, 1), got {}", self.damping);
        }
        if !(MIN_WAVE_SPEED..=MAX_WAVE_SPEED).contains(&self.wave_speed) {
            bail!(
                "wave speed must be in [{MIN_WAVE_SPEED}, {MAX_WAVE_SPEED}], got {}",
                self.wave_speed
            );
        }
        ensure!(
            self.rain_max_intensity >= MIN_INTENSITY,
            "rain max intensity must be at least {MIN_INTENSITY}"
        );
        ensure!(
            (MIN_INTENSITY..=self.rain_max_intensity).contains(&self.rain_intensity),
            "rain intensity must be in [{MIN_INTENSITY}, {}], got {}",
            self.rain_max_intensity,
            self.rain_intensity
        );
        Ok(())
    }
}
