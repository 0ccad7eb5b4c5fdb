use rayon::prelude::*;

use crate::viewport::Viewport;

pub const DEFAULT_RESOLUTION: usize = 200;
pub const DEFAULT_DAMPING: f32 = 0.015;
pub const DEFAULT_WAVE_SPEED: f32 = 0.3;
pub const MIN_WAVE_SPEED: f32 = 0.05;
pub const MAX_WAVE_SPEED: f32 = 1.0;
pub const WAVE_SPEED_STEP: f32 = 0.05; // per arrow key press
pub const DEFAULT_DROP_AMOUNT: f32 = 3.0; // energy added by one drop

/// Anything that can receive drops at screen positions.
///
/// `WaveGrid` is the real target; tests swap in a recorder.
pub trait DropTarget {
    fn is_paused(&self) -> bool;
    fn inject(&mut self, x: f32, y: f32);
}

/// N x N height field advanced with an explicit leapfrog scheme.
///
/// Fields are row-major, `row * N + col`. Border cells are never written by
/// `step`, so they act as a fixed zero (Dirichlet) boundary.
#[derive(Debug, Clone)]
pub struct WaveGrid {
    viewport: Viewport,
    current: Vec<f32>,
    previous: Vec<f32>,
    // scratch for the step being computed; holds the discarded `previous`
    // between steps
    next: Vec<f32>,
    wave_speed: f32,
    damping: f32,
    drop_amount: f32,
    paused: bool,
}

impl WaveGrid {
    pub fn new(viewport: Viewport) -> WaveGrid {
        WaveGrid::with_params(viewport, DEFAULT_WAVE_SPEED, DEFAULT_DAMPING, DEFAULT_DROP_AMOUNT)
    }

    /// # Panics
    /// If `viewport.resolution < 3`; such a grid has no interior cell.
    pub fn with_params(
        viewport: Viewport,
        wave_speed: f32,
        damping: f32,
        drop_amount: f32,
    ) -> WaveGrid {
        let n = viewport.resolution;
        assert!(n >= 3, "wave grid resolution must be at least 3, got {n}");

        WaveGrid {
            viewport,
            current: vec![0.0; n * n],
            previous: vec![0.0; n * n],
            next: vec![0.0; n * n],
            wave_speed: wave_speed.clamp(MIN_WAVE_SPEED, MAX_WAVE_SPEED),
            damping,
            drop_amount,
            paused: false,
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.viewport.resolution
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current height field, row-major.
    pub fn heights(&self) -> &[f32] {
        &self.current
    }

    /// Height field from one step ago, row-major.
    pub fn previous_heights(&self) -> &[f32] {
        &self.previous
    }

    pub fn height(&self, row: usize, col: usize) -> f32 {
        self.current[row * self.resolution() + col]
    }

    pub fn wave_speed(&self) -> f32 {
        self.wave_speed
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn drop_amount(&self) -> f32 {
        self.drop_amount
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

    /// Adds `delta` and clamps to `[MIN_WAVE_SPEED, MAX_WAVE_SPEED]`.
    pub fn adjust_wave_speed(&mut self, delta: f32) -> f32 {
        self.wave_speed = (self.wave_speed + delta).clamp(MIN_WAVE_SPEED, MAX_WAVE_SPEED);
        log::debug!("wave speed -> {:.2}", self.wave_speed);
        self.wave_speed
    }

    /// Drops the default amount at a screen point.
    pub fn inject(&mut self, x: f32, y: f32) {
        self.inject_amount(x, y, self.drop_amount);
    }

    /// Adds `amount` to the cell under `(x, y)`. Points outside the viewport
    /// are ignored.
    pub fn inject_amount(&mut self, x: f32, y: f32, amount: f32) {
        if let Some((row, col)) = self.viewport.screen_to_cell(x, y) {
            self.inject_cell(row, col, amount);
        }
    }

    /// Adds `amount` directly to `(row, col)`. Returns false, changing
    /// nothing, when the cell is outside the grid.
    pub fn inject_cell(&mut self, row: usize, col: usize, amount: f32) -> bool {
        let n = self.resolution();
        if row >= n || col >= n {
            return false;
        }
        self.current[row * n + col] += amount;
        true
    }

    /// Advances the field by exactly one step; no-op while paused.
    //
    // leapfrog update of d2h/dt2 = c^2 * laplacian(h):
    //   next = 2*h - h_prev + c * (avg4(h) - h)
    // with c = wave_speed standing in for c^2 * (dt/dx)^2, then the whole
    // field is attenuated by (1 - damping).
    pub fn step(&mut self) {
        if self.paused {
            return;
        }

        let n = self.resolution();
        let c = self.wave_speed;
        let keep = 1.0 - self.damping;
        let current = &self.current;
        let previous = &self.previous;

        self.next.fill(0.0);
        self.next
            .par_chunks_mut(n)
            .enumerate()
            .skip(1)
            .take(n - 2)
            .for_each(|(row, out)| {
                for col in 1..n - 1 {
                    let i = row * n + col;
                    let neighbors =
                        0.25 * (current[i - n] + current[i + n] + current[i - 1] + current[i + 1]);
                    out[col] = (2.0 * current[i] - previous[i] + c * (neighbors - current[i])) * keep;
                }
            });

        // previous <- current, current <- next; the old previous becomes scratch
        std::mem::swap(&mut self.previous, &mut self.current);
        std::mem::swap(&mut self.current, &mut self.next);
        log::trace!("wave step");
    }

    /// Zeroes both fields and unpauses. Resolution and wave speed are kept.
    pub fn reset(&mut self) {
        self.current.fill(0.0);
        self.previous.fill(0.0);
        self.next.fill(0.0);
        self.paused = false;
    }
}

impl DropTarget for WaveGrid {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn inject(&mut self, x: f32, y: f32) {
        WaveGrid::inject(self, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn grid(n: usize) -> WaveGrid {
        WaveGrid::new(Viewport::new(800.0, 600.0, n))
    }

    fn border_is_zero(g: &WaveGrid) -> bool {
        let n = g.resolution();
        (0..n).all(|k| {
            g.height(0, k) == 0.0
                && g.height(n - 1, k) == 0.0
                && g.height(k, 0) == 0.0
                && g.height(k, n - 1) == 0.0
        })
    }

    #[test]
    fn test_new_grid_is_flat() {
        let g = grid(7);
        assert_eq!(g.heights().len(), 49);
        assert!(g.heights().iter().all(|&h| h == 0.0));
        assert!(g.previous_heights().iter().all(|&h| h == 0.0));
        assert!(!g.is_paused());
        assert_eq!(g.wave_speed(), DEFAULT_WAVE_SPEED);
    }

    #[test]
    fn test_zero_field_is_fixed_point() {
        let mut g = grid(3);
        for _ in 0..10 {
            g.step();
        }
        assert!(g.heights().iter().all(|&h| h == 0.0));
        assert!(g.previous_heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_single_impulse() {
        let mut g = grid(9);
        g.inject_cell(4, 4, 1.0);
        g.step();

        let c = g.wave_speed();
        let keep = 1.0 - g.damping();
        assert!((g.height(4, 4) - (2.0 - c) * keep).abs() < EPS);
        for (r, col) in [(3, 4), (5, 4), (4, 3), (4, 5)] {
            assert!((g.height(r, col) - 0.25 * c * keep).abs() < EPS);
        }
        assert_eq!(g.height(3, 3), 0.0);
        assert!(border_is_zero(&g));
        // old current became previous
        assert_eq!(g.previous_heights()[4 * 9 + 4], 1.0);
    }

    #[test]
    fn test_impulse_next_to_border_does_not_leak() {
        let mut g = grid(5);
        g.inject_cell(1, 1, 1.0);
        g.step();
        assert!(border_is_zero(&g));
        assert!(g.height(1, 2) > 0.0);
        assert!(g.height(2, 1) > 0.0);
    }

    #[test]
    fn test_border_injection_is_cleared_by_step() {
        let mut g = grid(5);
        assert!(g.inject_cell(0, 2, 2.0));
        g.step();
        assert!(border_is_zero(&g));
        // interior neighbour still feels it
        assert!((g.height(1, 2) - 0.25 * g.wave_speed() * 2.0 * (1.0 - g.damping())).abs() < EPS);
    }

    #[test]
    fn test_paused_step_is_noop() {
        let mut g = grid(6);
        g.inject_cell(2, 3, 1.5);
        g.step();
        g.set_paused(true);
        let cur = g.heights().to_vec();
        let prev = g.previous_heights().to_vec();
        for _ in 0..5 {
            g.step();
        }
        assert_eq!(g.heights(), &cur[..]);
        assert_eq!(g.previous_heights(), &prev[..]);
    }

    #[test]
    fn test_inject_hits_one_cell() {
        let mut g = grid(5);
        g.inject(400.0, 300.0);
        assert_eq!(g.height(2, 2), DEFAULT_DROP_AMOUNT);
        let touched = g.heights().iter().filter(|&&h| h != 0.0).count();
        assert_eq!(touched, 1);

        g.inject_amount(400.0, 300.0, 0.5);
        assert_eq!(g.height(2, 2), DEFAULT_DROP_AMOUNT + 0.5);
        assert!(g.previous_heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_inject_outside_is_ignored() {
        let mut g = grid(10);
        for (x, y) in [(-1.0, 10.0), (10.0, -1.0), (800.0, 10.0), (10.0, 600.0), (1e6, 1e6)] {
            g.inject(x, y);
        }
        assert!(g.heights().iter().all(|&h| h == 0.0));
        assert!(!g.inject_cell(10, 0, 1.0));
        assert!(!g.inject_cell(0, 10, 1.0));
    }

    #[test]
    fn test_wave_speed_clamps() {
        let mut g = grid(3);
        for _ in 0..30 {
            g.adjust_wave_speed(WAVE_SPEED_STEP);
        }
        assert_eq!(g.wave_speed(), MAX_WAVE_SPEED);
        assert_eq!(g.adjust_wave_speed(WAVE_SPEED_STEP), 1.0);

        for _ in 0..30 {
            g.adjust_wave_speed(-WAVE_SPEED_STEP);
        }
        assert_eq!(g.wave_speed(), MIN_WAVE_SPEED);
        assert_eq!(g.adjust_wave_speed(-WAVE_SPEED_STEP), 0.05);
    }

    #[test]
    fn test_reset() {
        let mut g = grid(6);
        g.adjust_wave_speed(0.2);
        let speed = g.wave_speed();
        g.inject_cell(2, 2, 4.0);
        g.step();
        g.inject_cell(3, 3, 1.0);
        g.set_paused(true);

        g.reset();
        assert!(g.heights().iter().all(|&h| h == 0.0));
        assert!(g.previous_heights().iter().all(|&h| h == 0.0));
        assert!(!g.is_paused());
        assert_eq!(g.resolution(), 6);
        assert_eq!(g.wave_speed(), speed);
    }

    #[test]
    #[should_panic]
    fn test_tiny_grid_panics() {
        grid(2);
    }
}
