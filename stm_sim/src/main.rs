//! STM Tunneling Simulator - headless demo
//!
//! Runs an automated tip approach from full retraction down to the minimum
//! distance, logging the tunneling current, electron activity and the
//! equation panel along the way.
//!
//! Run with `RUST_LOG=info` to see the approach log.

use stm_sim::derived::DerivedQuantities;
use stm_sim::equations::{variants, EquationId};
use stm_sim::simulation::StmSimulation;

const FRAME_DT: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mut sim = StmSimulation::new();

    println!("Available equation models:");
    for variant in variants() {
        println!("  {:<22} {}", variant.name, variant.formula);
    }
    println!();

    sim.select_equation(EquationId::Exponential);
    sim.set_voltage(0.5);
    sim.toggle_play();

    let mut frame = 0u64;
    while sim.is_playing() {
        sim.update(FRAME_DT);
        frame += 1;

        // Report roughly twice a second
        if frame % 30 == 0 {
            let s = sim.state();
            log::info!(
                "d = {:.2} nm  I = {:.4} nA  tunneling = {}  electrons = {}",
                s.distance,
                s.current,
                s.tunneling_active,
                sim.electrons().len()
            );
        }
    }

    let s = sim.state();
    println!(
        "Approach complete: d = {:.2} nm, I = {:.4} nA",
        s.distance, s.current
    );

    if let Some(DerivedQuantities::Exponential { half_life, slope }) = sim.derived_quantities() {
        println!("Half-life distance: {:.3} nm, local slope: {:.4} nA/nm", half_life, slope);
    }

    let peak = stm_sim::curve::max_current(sim.curve_samples());
    println!("Plotted curve peak: {:.3} nA over 50 samples", peak);

    if let Some(last) = sim.measurements().last() {
        println!(
            "Last measurement: t = {:.1} s, d = {:.2} nm, I = {:.4} nA",
            last.time, last.distance, last.current
        );
    }
}
