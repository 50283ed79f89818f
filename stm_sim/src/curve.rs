//! Sampled current-vs-distance curve for plotting
//!
//! The plotted curve covers a fixed domain at fixed resolution and is
//! regenerated wholesale whenever the equation or a parameter changes; it is
//! never patched incrementally. Sampling uses the ungated equation value so
//! the curve shows the mathematical function everywhere, independent of the
//! tunneling-threshold gate applied to the live current readout.

use crate::constants::{CURVE_MAX, CURVE_MIN, CURVE_STEP};
use crate::equations::{EquationId, ParameterSet};
use crate::evaluator::raw_current;

/// One point of the plotted curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Tip-sample distance in nm
    pub distance: f64,
    /// Ungated current in nA
    pub current: f64,
}

/// Sample the active equation over the fixed plot domain [0.1, 5.0] nm.
///
/// Index-based stepping keeps the sample count exact (50 points) instead of
/// accumulating floating-point step error.
pub fn sample_curve(
    variant: Option<EquationId>,
    params: &ParameterSet,
    voltage: f64,
) -> Vec<CurveSample> {
    let count = ((CURVE_MAX - CURVE_MIN) / CURVE_STEP).round() as usize + 1;
    (0..count)
        .map(|i| {
            let distance = CURVE_MIN + i as f64 * CURVE_STEP;
            CurveSample {
                distance,
                current: raw_current(distance, variant, params, voltage),
            }
        })
        .collect()
}

/// Largest sampled current, used by consumers to scale the plot's y axis.
/// NaN samples (quantum domain error) are skipped.
pub fn max_current(samples: &[CurveSample]) -> f64 {
    samples
        .iter()
        .map(|s| s.current)
        .filter(|c| !c.is_nan())
        .fold(0.0, f64::max)
}

/// Normalize a sample value against the curve maximum for plotting.
/// A flat all-zero curve maps to 0.0 rather than dividing by zero.
pub fn normalized(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}
