//! Electron particle animation for the tunneling view
//!
//! While tunneling is active, electron tokens spawn at the tip on a fixed
//! interval and travel to a randomly chosen surface atom along a quadratic
//! Bezier arc whose control point is jittered every frame. The jitter is
//! purely visual noise; it never affects a token's progress. Each token keeps
//! a short fading trail of its recent positions.
//!
//! Randomness (target selection and jitter) goes through the system's own
//! RNG so tests can seed it and assert exact trajectories.

use crate::constants::{MAX_ELECTRONS, PROGRESS_STEP, SPAWN_PERIOD, TRAIL_LENGTH};
use crate::timer::Periodic;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Horizontal positions of the surface atoms electrons can land on
pub const ATOM_POSITIONS: [f64; 4] = [2.0, 4.0, 6.0, 8.0];

/// Height of the sample surface in scene coordinates
pub const SURFACE_Y: f64 = 0.5;

/// Horizontal position of the tip apex
pub const TIP_X: f64 = 5.0;

/// One animated electron
///
/// Lifecycle: spawned at the tip, advanced once per frame, removed as soon as
/// `progress` reaches 1. There is no transition back; clearing the tunneling
/// state retires every live token at once.
#[derive(Debug, Clone)]
pub struct ElectronToken {
    pub id: u64,
    pub start: DVec2,
    pub end: DVec2,
    /// Path completion in [0, 1)
    pub progress: f64,
    /// Recent interpolated positions, oldest first, capped at 10
    pub trail: Vec<DVec2>,
}

impl ElectronToken {
    /// Latest interpolated position, if the token has advanced at least once
    pub fn position(&self) -> Option<DVec2> {
        self.trail.last().copied()
    }

    /// Quadratic Bezier between start and end through `control`
    fn bezier(&self, t: f64, control: DVec2) -> DVec2 {
        let u = 1.0 - t;
        u * u * self.start + 2.0 * u * t * control + t * t * self.end
    }
}

/// Discrete-time particle clock driving spawn, advance and retirement
#[derive(Debug)]
pub struct ParticleSystem {
    electrons: Vec<ElectronToken>,
    next_id: u64,
    spawn_timer: Periodic,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic system for tests: fixed seed, reproducible trails
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            electrons: Vec::new(),
            next_id: 0,
            spawn_timer: Periodic::new(SPAWN_PERIOD),
            rng,
        }
    }

    /// Live tokens, oldest first
    pub fn electrons(&self) -> &[ElectronToken] {
        &self.electrons
    }

    /// Advance the particle clock by one frame of `dt` seconds.
    ///
    /// Tunneling going inactive is an abrupt cancellation: every live token
    /// is dropped immediately and the spawn timer stops.
    pub fn update(&mut self, dt: f64, tunneling_active: bool, distance: f64) {
        if !tunneling_active {
            if !self.electrons.is_empty() {
                log::debug!("tunneling stopped, clearing {} electrons", self.electrons.len());
            }
            self.electrons.clear();
            self.spawn_timer.stop();
            return;
        }

        if !self.spawn_timer.is_active() {
            self.spawn_timer.start();
        }
        for _ in 0..self.spawn_timer.tick(dt) {
            self.spawn(distance);
        }

        self.advance_frame();
    }

    /// Create one token from the tip apex toward a random surface atom
    fn spawn(&mut self, distance: f64) {
        let tip_y = SURFACE_Y + distance;
        let target = ATOM_POSITIONS[self.rng.gen_range(0..ATOM_POSITIONS.len())];

        let token = ElectronToken {
            id: self.next_id,
            start: DVec2::new(TIP_X, tip_y - 0.5),
            end: DVec2::new(target, SURFACE_Y),
            progress: 0.0,
            trail: Vec::new(),
        };
        self.next_id += 1;

        if self.electrons.len() >= MAX_ELECTRONS {
            self.electrons.remove(0);
        }
        self.electrons.push(token);
    }

    /// One animation frame: fixed progress step, jittered Bezier position,
    /// trail append, retirement at progress >= 1
    fn advance_frame(&mut self) {
        let Self { electrons, rng, .. } = self;
        electrons.retain_mut(|e| {
            e.progress += PROGRESS_STEP;
            if e.progress >= 1.0 {
                return false;
            }

            let midpoint = (e.start + e.end) * 0.5;
            let jitter = DVec2::new(
                (rng.gen::<f64>() - 0.5) * 2.0,
                (rng.gen::<f64>() - 0.5) * 1.0,
            );
            let position = e.bezier(e.progress, midpoint + jitter);

            e.trail.push(position);
            if e.trail.len() > TRAIL_LENGTH {
                e.trail.remove(0);
            }
            true
        });
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
