//! Interactive water surface simulations.
//!
//! [`wave::WaveGrid`] is a damped 2D wave equation on a square height field,
//! fed by clicks and by [`rain::RainDriver`]. [`ripples::RippleField`] is the
//! lighter kinematic alternative: rings and raindrops, no grid. Both are
//! driven through a [`controller::Controller`] owned by the host loop.

pub mod config;
pub mod controller;
pub mod rain;
pub mod ripples;
pub mod viewport;
pub mod wave;

pub use config::{SimConfig, Variant};
pub use controller::{Controller, RippleController, SpecialKey, WaveController};
pub use rain::RainDriver;
pub use ripples::RippleField;
pub use viewport::Viewport;
pub use wave::{DropTarget, WaveGrid};
