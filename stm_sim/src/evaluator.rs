//! Tunneling current evaluation
//!
//! Pure closed-form evaluation of the tunneling current for every registered
//! equation variant. [`evaluate`] applies the physical tunneling-threshold
//! gate before dispatching; [`raw_current`] skips the gate and is what the
//! curve sampler and derived-quantity calculator use, since the plotted curve
//! shows the mathematical function over the whole domain.

use crate::constants::{
    ELECTRON_MASS, EV_TO_JOULES, HBAR, NANOAMP_SCALE, NM_TO_METERS, TUNNELING_THRESHOLD,
};
use crate::equations::{EquationId, ParameterSet};

/// Instantaneous tunneling current in nA at the given tip-sample distance.
///
/// Returns exactly `0.0` for any distance at or beyond the tunneling
/// threshold, regardless of variant. `None` selects the compatibility
/// fallback `e^(-2d)` used when an unrecognized equation key was requested.
///
/// Deterministic: identical inputs produce bit-identical output.
pub fn evaluate(
    distance: f64,
    variant: Option<EquationId>,
    params: &ParameterSet,
    voltage: f64,
) -> f64 {
    if distance >= TUNNELING_THRESHOLD {
        return 0.0;
    }
    raw_current(distance, variant, params, voltage)
}

/// Ungated current: the bare equation value, with no tunneling threshold.
pub fn raw_current(
    distance: f64,
    variant: Option<EquationId>,
    params: &ParameterSet,
    voltage: f64,
) -> f64 {
    match variant {
        Some(EquationId::Exponential) => {
            let i0 = params.value_or("I0", 1.0);
            let alpha = params.value_or("alpha", 2.0);
            i0 * (-alpha * distance).exp()
        }
        Some(EquationId::Quantum) => quantum_current(distance, params, voltage),
        Some(EquationId::Power) => {
            let a = params.value_or("A", 1.0);
            let n = params.value_or("n", 2.0);
            a * distance.powf(-n)
        }
        Some(EquationId::Gaussian) => {
            let i0 = params.value_or("I0", 1.0);
            let mu = params.value_or("mu", 2.0);
            let sigma = params.value_or("sigma", 0.5);
            i0 * (-(distance - mu).powi(2) / (2.0 * sigma * sigma)).exp()
        }
        Some(EquationId::Custom) => {
            let a = params.value_or("a", 1.0);
            let b = params.value_or("b", 1.0);
            let c = params.value_or("c", 1.0);
            a * (-b * distance).exp() + c * distance.powi(-2)
        }
        // Compatibility fallback for unrecognized equation keys
        None => (-2.0 * distance).exp(),
    }
}

/// Rectangular-barrier transmission model with real physical constants.
///
/// The unit chain (eV -> J, nm -> m, final x1e9 to nA) is kept as-is for
/// compatibility with the reference behavior; it is physically approximate,
/// not a dimensionally rigorous current.
///
/// When the bias energy exceeds the work function, `phi - voltage < 0` and
/// the square root produces NaN. That NaN is deliberately passed through so
/// callers can detect the domain error instead of seeing a silent zero.
fn quantum_current(distance: f64, params: &ParameterSet, voltage: f64) -> f64 {
    let i0 = params.value_or("I0", 1.0);
    let phi = params.value_or("phi", 4.5);

    let d_m = distance * NM_TO_METERS;
    let barrier_j = phi * EV_TO_JOULES;
    let energy_j = voltage * EV_TO_JOULES;

    // Decay constant K = sqrt(2m(V - E)) / hbar; NaN when E > V
    let kappa = (2.0 * ELECTRON_MASS * (barrier_j - energy_j)).sqrt() / HBAR;
    let transmission = 4.0 * (-2.0 * kappa * d_m).exp();

    i0 * transmission * NANOAMP_SCALE
}

/// Decay constant K in 1/m for the quantum barrier model (NaN when E > V)
pub fn quantum_kappa(phi: f64, voltage: f64) -> f64 {
    (2.0 * ELECTRON_MASS * (phi - voltage) * EV_TO_JOULES).sqrt() / HBAR
}
