//! Simulation state and the facade driven by the presentation layer
//!
//! [`StmSimulation`] owns the whole simulator: the physical state (distance,
//! voltage, active equation, parameters), the derived tunneling flag and
//! current, the auto-approach timer, the electron particle clock and the
//! bounded measurement history. The presentation layer calls the mutating
//! operations from its input handlers and `update(dt)` once per frame, then
//! renders the exposed snapshots.
//!
//! The derived fields are recomputed by a single `refresh` on every mutation,
//! so `tunneling_active` and `current` can never drift from the inputs they
//! are functions of. All recomputation is synchronous: no partially updated
//! state is ever observable between operations.

use crate::constants::{
    MAX_DISTANCE, MAX_VOLTAGE, MEASUREMENT_HISTORY, MIN_DISTANCE, MIN_VOLTAGE, PLAY_PERIOD,
    PLAY_STEP, TUNNELING_THRESHOLD,
};
use crate::curve::{sample_curve, CurveSample};
use crate::derived::{derived_quantities, DerivedQuantities};
use crate::equations::{EquationId, ParameterSet};
use crate::evaluator::evaluate;
use crate::particles::{ElectronToken, ParticleSystem};
use crate::timer::Periodic;

/// Complete observable state of the simulator
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Tip-sample distance in nm, within [0.3, 8.0]
    pub distance: f64,
    /// Bias voltage in V, within [0.1, 2.0]
    pub voltage: f64,
    /// Active equation; `None` after an unrecognized key was selected, in
    /// which case the evaluator's fallback decay applies
    pub equation: Option<EquationId>,
    pub parameters: ParameterSet,
    /// Derived: distance below the tunneling threshold
    pub tunneling_active: bool,
    /// Derived: gated current in nA
    pub current: f64,
}

/// One recorded (time, distance, current) sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Simulation-clock seconds since construction
    pub time: f64,
    pub distance: f64,
    pub current: f64,
}

/// The interactive STM simulator core
pub struct StmSimulation {
    state: SimulationState,
    playing: bool,
    play_timer: Periodic,
    particles: ParticleSystem,
    /// Most-recent-last, capped at 20
    measurements: Vec<Measurement>,
    curve: Vec<CurveSample>,
    curve_dirty: bool,
    /// Elapsed simulation time in seconds
    time: f64,
}

impl StmSimulation {
    pub fn new() -> Self {
        Self::with_particles(ParticleSystem::new())
    }

    /// Deterministic simulator for tests: the particle jitter is seeded
    pub fn with_seed(seed: u64) -> Self {
        Self::with_particles(ParticleSystem::with_seed(seed))
    }

    fn with_particles(particles: ParticleSystem) -> Self {
        let mut sim = Self {
            state: SimulationState {
                distance: MAX_DISTANCE,
                voltage: 0.5,
                equation: Some(EquationId::Exponential),
                parameters: ParameterSet::defaults(EquationId::Exponential),
                tunneling_active: false,
                current: 0.0,
            },
            playing: false,
            play_timer: Periodic::new(PLAY_PERIOD),
            particles,
            measurements: Vec::new(),
            curve: Vec::new(),
            curve_dirty: true,
            time: 0.0,
        };
        sim.refresh();
        sim
    }

    /// Recompute the derived fields from the rest of the state and record a
    /// measurement while tunneling is active. Called after every mutation.
    fn refresh(&mut self) {
        let s = &mut self.state;
        s.tunneling_active = s.distance < TUNNELING_THRESHOLD;
        s.current = evaluate(s.distance, s.equation, &s.parameters, s.voltage);

        if s.tunneling_active {
            if self.measurements.len() >= MEASUREMENT_HISTORY {
                self.measurements.remove(0);
            }
            self.measurements.push(Measurement {
                time: self.time,
                distance: s.distance,
                current: s.current,
            });
        }
    }

    /// Move the tip. Manual positioning halts a running auto-approach.
    pub fn set_distance(&mut self, distance: f64) {
        if self.playing {
            self.playing = false;
            self.play_timer.stop();
        }
        self.state.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.refresh();
    }

    pub fn set_voltage(&mut self, voltage: f64) {
        self.state.voltage = voltage.clamp(MIN_VOLTAGE, MAX_VOLTAGE);
        // The quantum barrier curve depends on the bias
        self.curve_dirty = true;
        self.refresh();
    }

    /// Switch equations; parameters reset to the variant's defaults
    pub fn select_equation(&mut self, id: EquationId) {
        log::info!("selected equation: {}", id.variant().name);
        self.state.equation = Some(id);
        self.state.parameters = ParameterSet::defaults(id);
        self.curve_dirty = true;
        self.refresh();
    }

    /// String-keyed selection for external callers. Unrecognized keys switch
    /// to the documented fallback decay instead of failing.
    pub fn select_equation_key(&mut self, key: &str) {
        match EquationId::parse(key) {
            Some(id) => self.select_equation(id),
            None => {
                log::warn!("unknown equation key {:?}, using default decay", key);
                self.state.equation = None;
                self.curve_dirty = true;
                self.refresh();
            }
        }
    }

    /// Adjust one parameter of the active equation, clamped to its declared
    /// range. Keys the variant does not declare are ignored.
    pub fn set_parameter(&mut self, key: &str, value: f64) {
        let Some(id) = self.state.equation else {
            log::warn!("no active equation, ignoring parameter {}", key);
            return;
        };
        if self.state.parameters.set(id.variant(), key, value).is_some() {
            self.curve_dirty = true;
            self.refresh();
        }
    }

    /// Retract the tip fully and halt the auto-approach
    pub fn reset(&mut self) {
        self.playing = false;
        self.play_timer.stop();
        self.state.distance = MAX_DISTANCE;
        self.refresh();
    }

    /// Start or pause the auto-approach. Starting always re-arms the timer
    /// from zero; a stale schedule can never double-fire.
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.playing = false;
            self.play_timer.stop();
        } else {
            self.playing = true;
            self.play_timer.start();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance the simulation clock by one frame of `dt` seconds: fire due
    /// auto-approach ticks, then drive the particle animation.
    pub fn update(&mut self, dt: f64) {
        self.time += dt;

        if self.playing {
            let ticks = self.play_timer.tick(dt);
            for _ in 0..ticks {
                self.state.distance -= PLAY_STEP;
                if self.state.distance <= MIN_DISTANCE {
                    self.state.distance = MIN_DISTANCE;
                    self.playing = false;
                    self.play_timer.stop();
                    log::info!("auto-approach reached minimum distance");
                    break;
                }
            }
            if ticks > 0 {
                self.refresh();
            }
        }

        self.particles.update(
            dt,
            self.state.tunneling_active,
            self.state.distance,
        );
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Sampled plot curve, regenerated lazily after equation, parameter or
    /// voltage changes
    pub fn curve_samples(&mut self) -> &[CurveSample] {
        if self.curve_dirty {
            self.curve = sample_curve(
                self.state.equation,
                &self.state.parameters,
                self.state.voltage,
            );
            self.curve_dirty = false;
        }
        &self.curve
    }

    /// Analytical readouts for the explanation panel at the current distance
    pub fn derived_quantities(&self) -> Option<DerivedQuantities> {
        derived_quantities(
            self.state.equation,
            &self.state.parameters,
            self.state.distance,
            self.state.voltage,
        )
    }

    /// Live electron tokens, oldest first
    pub fn electrons(&self) -> &[ElectronToken] {
        self.particles.electrons()
    }

    /// Recorded measurements, most recent last, at most 20
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

impl Default for StmSimulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ELECTRONS;

    #[test]
    fn retracted_tip_has_no_current() {
        let sim = StmSimulation::with_seed(1);
        assert_eq!(sim.state().distance, 8.0);
        assert!(!sim.state().tunneling_active);
        assert_eq!(sim.state().current, 0.0);
    }

    #[test]
    fn exponential_current_at_close_approach() {
        let mut sim = StmSimulation::with_seed(1);
        sim.set_distance(1.5);
        let s = sim.state();
        assert!(s.tunneling_active);
        // I0 = 1.0, alpha = 2.0: I = e^(-3.0) ~= 0.0498
        assert!((s.current - (-3.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn inputs_are_clamped() {
        let mut sim = StmSimulation::with_seed(1);
        sim.set_distance(100.0);
        assert_eq!(sim.state().distance, 8.0);
        sim.set_distance(0.0);
        assert_eq!(sim.state().distance, 0.3);
        sim.set_voltage(99.0);
        assert_eq!(sim.state().voltage, 2.0);
        sim.set_voltage(0.0);
        assert_eq!(sim.state().voltage, 0.1);
    }

    #[test]
    fn auto_approach_halts_at_minimum_distance() {
        let mut sim = StmSimulation::with_seed(1);
        sim.toggle_play();
        assert!(sim.is_playing());

        let mut steps = 0;
        while sim.is_playing() {
            sim.update(PLAY_PERIOD);
            steps += 1;
            assert!(steps < 1000, "approach never halted");
        }

        assert_eq!(sim.state().distance, MIN_DISTANCE);
        assert!(sim.state().tunneling_active);
        // 8.0 -> 0.3 at 0.1 nm per tick
        assert!((76..=78).contains(&steps), "took {} steps", steps);
    }

    #[test]
    fn manual_positioning_stops_the_approach() {
        let mut sim = StmSimulation::with_seed(1);
        sim.toggle_play();
        sim.update(PLAY_PERIOD);
        assert!(sim.is_playing());
        sim.set_distance(4.0);
        assert!(!sim.is_playing());
        assert_eq!(sim.state().distance, 4.0);
    }

    #[test]
    fn reset_retracts_and_stops() {
        let mut sim = StmSimulation::with_seed(1);
        sim.toggle_play();
        for _ in 0..30 {
            sim.update(PLAY_PERIOD);
        }
        sim.reset();
        assert!(!sim.is_playing());
        assert_eq!(sim.state().distance, 8.0);
        assert_eq!(sim.state().current, 0.0);
    }

    #[test]
    fn selecting_an_equation_resets_its_parameters() {
        let mut sim = StmSimulation::with_seed(1);
        sim.set_parameter("alpha", 5.0);
        assert_eq!(sim.state().parameters.get("alpha"), Some(5.0));

        sim.select_equation(EquationId::Gaussian);
        assert_eq!(sim.state().parameters.get("sigma"), Some(0.5));

        sim.select_equation(EquationId::Exponential);
        assert_eq!(sim.state().parameters.get("alpha"), Some(2.0));
    }

    #[test]
    fn unknown_equation_key_uses_fallback_decay() {
        let mut sim = StmSimulation::with_seed(1);
        sim.select_equation_key("wavelet");
        assert_eq!(sim.state().equation, None);

        sim.set_distance(1.5);
        assert_eq!(sim.state().current, (-3.0_f64).exp());
        assert_eq!(sim.derived_quantities(), None);

        // A valid key recovers normal dispatch
        sim.select_equation_key("gaussian");
        assert_eq!(sim.state().equation, Some(EquationId::Gaussian));
    }

    #[test]
    fn curve_regenerates_only_when_inputs_change() {
        let mut sim = StmSimulation::with_seed(1);
        let before = sim.curve_samples()[5];
        assert_eq!(sim.curve_samples()[5], before);

        sim.set_parameter("alpha", 4.0);
        let after = sim.curve_samples()[5];
        assert!(after.current < before.current);
        assert_eq!(after.distance, before.distance);
    }

    #[test]
    fn measurement_history_is_a_bounded_fifo() {
        let mut sim = StmSimulation::with_seed(1);
        for i in 0..30 {
            sim.update(0.1);
            sim.set_distance(1.0 + (i % 10) as f64 * 0.05);
        }

        let measurements = sim.measurements();
        assert_eq!(measurements.len(), MEASUREMENT_HISTORY);
        // Oldest evicted first: the survivors are the most recent, in order
        for pair in measurements.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        assert!(measurements[0].time > 0.5);
    }

    #[test]
    fn no_measurements_outside_tunneling_range() {
        let mut sim = StmSimulation::with_seed(1);
        sim.set_distance(5.0);
        sim.set_voltage(1.0);
        assert!(sim.measurements().is_empty());
    }

    #[test]
    fn electrons_flow_only_while_tunneling() {
        let mut sim = StmSimulation::with_seed(9);
        sim.set_distance(1.0);
        for _ in 0..120 {
            sim.update(1.0 / 60.0);
        }
        let live = sim.electrons().len();
        assert!(live > 0 && live <= MAX_ELECTRONS);

        sim.set_distance(6.0);
        sim.update(1.0 / 60.0);
        assert!(sim.electrons().is_empty());
    }
}
