//! STM Tunneling Simulator Core
//!
//! This crate provides the computational core of an interactive Scanning
//! Tunneling Microscopy (STM) teaching tool:
//!
//! - **Equation Registry**: catalog of tunneling-current models and their
//!   parameter schemas
//! - **Current Evaluator**: closed-form current as a function of tip-sample
//!   distance and applied voltage, gated by the tunneling threshold
//! - **Curve Sampler**: fixed-resolution (distance, current) sweep for plotting
//! - **Derived Quantities**: half-life, slope, FWHM and term decompositions for
//!   the explanation panel
//! - **Particle Simulation**: discrete-time electron tokens with Bezier paths
//!   and fading trails while tunneling is active
//!
//! The presentation layer (sliders, plot, canvas) is an external collaborator:
//! it feeds distance/voltage/equation changes into [`simulation::StmSimulation`]
//! and renders the snapshots it exposes.

pub mod equations;
pub mod evaluator;
pub mod curve;
pub mod derived;
pub mod particles;
pub mod timer;
pub mod simulation;

/// Physical constants and fixed simulation parameters
pub mod constants {
    /// Electron mass in kg
    pub const ELECTRON_MASS: f64 = 9.10938356e-31;

    /// Reduced Planck constant in J*s
    pub const HBAR: f64 = 1.054571817e-34;

    /// Electron-volt to Joule conversion
    pub const EV_TO_JOULES: f64 = 1.602176634e-19;

    /// Nanometers to meters
    pub const NM_TO_METERS: f64 = 1e-9;

    /// Scale factor mapping the quantum transmission output to nanoamps
    pub const NANOAMP_SCALE: f64 = 1e9;

    /// Tip-sample distance above which no tunneling current flows (nm)
    pub const TUNNELING_THRESHOLD: f64 = 3.0;

    /// Closest allowed tip approach (nm)
    pub const MIN_DISTANCE: f64 = 0.3;

    /// Fully retracted tip (nm)
    pub const MAX_DISTANCE: f64 = 8.0;

    /// Bias voltage range (V)
    pub const MIN_VOLTAGE: f64 = 0.1;
    pub const MAX_VOLTAGE: f64 = 2.0;

    /// Plotted curve domain (nm) and resolution
    pub const CURVE_MIN: f64 = 0.1;
    pub const CURVE_MAX: f64 = 5.0;
    pub const CURVE_STEP: f64 = 0.1;

    /// Auto-approach timer: period in seconds, step in nm per tick
    pub const PLAY_PERIOD: f64 = 0.1;
    pub const PLAY_STEP: f64 = 0.1;

    /// Electron spawn period while tunneling (seconds)
    pub const SPAWN_PERIOD: f64 = 0.3;

    /// Progress gained per advance frame; a token lives ceil(1/0.02) frames
    pub const PROGRESS_STEP: f64 = 0.02;

    /// At most this many live electron tokens
    pub const MAX_ELECTRONS: usize = 8;

    /// Trail points kept per electron
    pub const TRAIL_LENGTH: usize = 10;

    /// Bounded measurement history length
    pub const MEASUREMENT_HISTORY: usize = 20;
}
