use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use ggez::event;
use ggez::graphics::{self, Color, DrawMode, DrawParam, Image, ImageFormat, MeshBuilder, Sampler};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::input::mouse::MouseButton;
use ggez::{Context, GameResult};
use rayon::prelude::*;

use ripple_sim::viewport::height_color;
use ripple_sim::{
    Controller, RippleController, RippleField, SimConfig, SpecialKey, Variant, WaveController,
    WaveGrid,
};

const TICKS_PER_SECOND: u32 = 60;

const WATER_BACKDROP: Color = Color::new(0.1, 0.2, 0.4, 1.0);
const OCEAN: Color = Color::new(0.1, 0.3, 0.6, 1.0);
const CLOUD: Color = Color::new(0.8, 0.8, 0.8, 1.0);
const RAINDROP: Color = Color::new(0.5, 0.5, 1.0, 1.0);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliVariant {
    Wave,
    Ripple,
}

impl From<CliVariant> for Variant {
    fn from(value: CliVariant) -> Self {
        match value {
            CliVariant::Wave => Variant::Wave,
            CliVariant::Ripple => Variant::Ripple,
        }
    }
}

/// Interactive water ripple simulation
#[derive(Parser, Debug)]
#[command(name = "ripple-sim", version, about)]
struct Cli {
    /// Simulation to run (defaults to the config file's, then wave)
    #[arg(long, value_enum)]
    variant: Option<CliVariant>,

    /// JSON config file; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for rain
    #[arg(long)]
    seed: Option<u64>,

    /// Wave grid cells per side
    #[arg(long)]
    resolution: Option<usize>,

    /// Upper bound for rain drops per tick
    #[arg(long)]
    rain_max_intensity: Option<u32>,
}

fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(variant) = cli.variant {
        config.variant = variant.into();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(resolution) = cli.resolution {
        config.resolution = resolution;
    }
    if let Some(max) = cli.rain_max_intensity {
        config.rain_max_intensity = max;
        config.rain_intensity = config.rain_intensity.min(max);
    }
    config.validate()?;
    Ok(config)
}

enum Scene {
    Wave(WaveController),
    Ripple(RippleController),
}

struct MainState {
    scene: Scene,
    // RGBA staging buffer for the height field image
    pixels: Vec<u8>,
    height: f32,
}

impl MainState {
    fn new(config: &SimConfig) -> MainState {
        let scene = match config.variant {
            Variant::Wave => Scene::Wave(WaveController::new(config)),
            Variant::Ripple => Scene::Ripple(RippleController::new(config)),
        };
        MainState {
            scene,
            pixels: Vec::new(),
            height: config.height,
        }
    }

    fn controller(&mut self) -> &mut dyn Controller {
        match &mut self.scene {
            Scene::Wave(ctl) => ctl,
            Scene::Ripple(ctl) => ctl,
        }
    }
}

fn key_char(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Space => Some(' '),
        KeyCode::R => Some('r'),
        KeyCode::C => Some('c'),
        KeyCode::W => Some('w'),
        KeyCode::A => Some('a'),
        KeyCode::S => Some('s'),
        _ => None,
    }
}

fn special_key(code: KeyCode) -> Option<SpecialKey> {
    match code {
        KeyCode::Up => Some(SpecialKey::Up),
        KeyCode::Down => Some(SpecialKey::Down),
        KeyCode::Left => Some(SpecialKey::Left),
        KeyCode::Right => Some(SpecialKey::Right),
        _ => None,
    }
}

// one texel per cell, stretched over the window
fn draw_wave(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    grid: &WaveGrid,
    pixels: &mut Vec<u8>,
) -> GameResult {
    let n = grid.resolution();
    let heights = grid.heights();
    pixels.resize(n * n * 4, 255);

    // grid rows grow upward, image rows downward
    pixels
        .par_chunks_mut(n * 4)
        .enumerate()
        .for_each(|(image_row, out)| {
            let row = n - 1 - image_row;
            for (col, texel) in out.chunks_exact_mut(4).enumerate() {
                let [r, g, b] = height_color(heights[row * n + col]);
                let (r, g, b, a) = Color::new(r, g, b, 1.0).to_rgba();
                texel.copy_from_slice(&[r, g, b, a]);
            }
        });

    let image = Image::from_pixels(ctx, pixels, ImageFormat::Rgba8UnormSrgb, n as u32, n as u32);
    let vp = grid.viewport();
    canvas.set_sampler(Sampler::nearest_clamp());
    canvas.draw(
        &image,
        DrawParam::new().scale([vp.width / n as f32, vp.height / n as f32]),
    );
    Ok(())
}

fn draw_ripples(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    field: &RippleField,
    height: f32,
) -> GameResult {
    let flip = |p: Vec2| [p.x, height - p.y];
    let mut mb = MeshBuilder::new();

    let cloud = field.cloud;
    mb.ellipse(
        DrawMode::fill(),
        flip(cloud.center),
        cloud.width / 2.0,
        cloud.height / 2.0,
        0.5,
        CLOUD,
    )?;

    for drop in &field.raindrops {
        let tail = drop.pos - Vec2::new(0.0, drop.size);
        mb.line(&[flip(drop.pos), flip(tail)], 1.0, RAINDROP)?;
    }

    for ripple in &field.ripples {
        mb.circle(
            DrawMode::stroke(1.0),
            flip(ripple.center),
            ripple.radius,
            0.5,
            Color::new(0.5, 0.8, 1.0, ripple.opacity),
        )?;
    }

    let mesh = graphics::Mesh::from_data(ctx, mb.build());
    canvas.draw(&mesh, DrawParam::default());
    Ok(())
}

impl event::EventHandler<ggez::GameError> for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        while ctx.time.check_update_time(TICKS_PER_SECOND) {
            self.controller().on_tick();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        match &self.scene {
            Scene::Wave(ctl) => {
                let mut canvas = graphics::Canvas::from_frame(ctx, WATER_BACKDROP);
                draw_wave(ctx, &mut canvas, &ctl.grid, &mut self.pixels)?;
                canvas.finish(ctx)?;
            }
            Scene::Ripple(ctl) => {
                let mut canvas = graphics::Canvas::from_frame(ctx, OCEAN);
                draw_ripples(ctx, &mut canvas, &ctl.field, self.height)?;
                canvas.finish(ctx)?;
            }
        }
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        if button == MouseButton::Left {
            self.controller().on_pointer_down(x, y);
        }
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        let Some(code) = input.keycode else {
            return Ok(());
        };
        if code == KeyCode::Escape {
            ctx.request_quit();
        } else if let Some(key) = key_char(code) {
            self.controller().on_key(key);
        } else if let Some(key) = special_key(code) {
            self.controller().on_special_key(key);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    log::info!(
        "starting {} simulation: {}x{} window, resolution {}",
        config.variant,
        config.width,
        config.height,
        config.resolution
    );

    let cb = ggez::ContextBuilder::new("ripple_sim", "ripple-sim")
        .window_setup(ggez::conf::WindowSetup::default().title(&config.title))
        .window_mode(ggez::conf::WindowMode::default().dimensions(config.width, config.height));

    let (ctx, event_loop) = cb
        .build()
        .map_err(|e| anyhow!("failed to create window: {e}"))?;
    let state = MainState::new(&config);
    event::run(ctx, event_loop, state)
}
