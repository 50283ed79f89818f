//! Derived quantities for the explanation panel
//!
//! Cheap analytical scalars (half-life, local slope, FWHM, term
//! decomposition) evaluated at the current tip position. These are display
//! values recomputed on demand, never cached.

use crate::constants::NM_TO_METERS;
use crate::equations::{EquationId, ParameterSet};
use crate::evaluator::{quantum_kappa, raw_current};

/// Gaussian FWHM factor, approximately 2*sqrt(2 ln 2)
const FWHM_FACTOR: f64 = 2.355;

/// Variant-specific analytical readouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedQuantities {
    Exponential {
        /// Distance over which the current halves: ln(2)/alpha (nm)
        half_life: f64,
        /// Local slope dI/dd = -alpha * I (nA/nm)
        slope: f64,
    },
    Quantum {
        /// Barrier decay constant K (1/m); NaN when the bias exceeds the
        /// work function
        kappa: f64,
        /// Transmission probability 4e^(-2Kd)
        transmission: f64,
    },
    Power {
        exponent: f64,
        /// Local slope dI/dd = -n * A * d^(-n-1) (nA/nm)
        slope: f64,
    },
    Gaussian {
        /// Distance of maximum tunneling: mu (nm)
        peak_distance: f64,
        width: f64,
        /// Full width at half maximum: 2.355 * sigma (nm)
        fwhm: f64,
    },
    Custom {
        /// a * e^(-b*d) contribution at the current distance
        exp_term: f64,
        /// c * d^(-2) contribution at the current distance
        power_term: f64,
        total: f64,
    },
}

/// Compute the panel values for the active equation at the current distance.
/// The compatibility fallback formula has no panel, hence the `Option`.
pub fn derived_quantities(
    variant: Option<EquationId>,
    params: &ParameterSet,
    distance: f64,
    voltage: f64,
) -> Option<DerivedQuantities> {
    let id = variant?;
    let quantities = match id {
        EquationId::Exponential => {
            let alpha = params.value_or("alpha", 2.0);
            let current = raw_current(distance, variant, params, voltage);
            DerivedQuantities::Exponential {
                half_life: 2.0_f64.ln() / alpha,
                slope: -alpha * current,
            }
        }
        EquationId::Quantum => {
            let phi = params.value_or("phi", 4.5);
            let kappa = quantum_kappa(phi, voltage);
            DerivedQuantities::Quantum {
                kappa,
                transmission: 4.0 * (-2.0 * kappa * distance * NM_TO_METERS).exp(),
            }
        }
        EquationId::Power => {
            let a = params.value_or("A", 1.0);
            let n = params.value_or("n", 2.0);
            DerivedQuantities::Power {
                exponent: n,
                slope: -n * a * distance.powf(-n - 1.0),
            }
        }
        EquationId::Gaussian => {
            let mu = params.value_or("mu", 2.0);
            let sigma = params.value_or("sigma", 0.5);
            DerivedQuantities::Gaussian {
                peak_distance: mu,
                width: sigma,
                fwhm: FWHM_FACTOR * sigma,
            }
        }
        EquationId::Custom => {
            let a = params.value_or("a", 1.0);
            let b = params.value_or("b", 1.0);
            let c = params.value_or("c", 1.0);
            let exp_term = a * (-b * distance).exp();
            let power_term = c * distance.powi(-2);
            DerivedQuantities::Custom {
                exp_term,
                power_term,
                total: exp_term + power_term,
            }
        }
    };
    Some(quantities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_half_life_is_ln2_over_alpha() {
        let params = ParameterSet::defaults(EquationId::Exponential);
        let got = derived_quantities(Some(EquationId::Exponential), &params, 1.0, 0.5).unwrap();
        match got {
            DerivedQuantities::Exponential { half_life, slope } => {
                assert!((half_life - 2.0_f64.ln() / 2.0).abs() < 1e-12);
                assert!((slope - (-2.0 * (-2.0_f64).exp())).abs() < 1e-12);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn power_slope_matches_derivative() {
        let params = ParameterSet::defaults(EquationId::Power);
        let got = derived_quantities(Some(EquationId::Power), &params, 2.0, 0.5).unwrap();
        match got {
            DerivedQuantities::Power { exponent, slope } => {
                assert_eq!(exponent, 2.0);
                // -n * A * d^(-n-1) = -2 * 2^(-3) = -0.25
                assert!((slope + 0.25).abs() < 1e-12);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn gaussian_fwhm_scales_with_sigma() {
        let params = ParameterSet::defaults(EquationId::Gaussian);
        let got = derived_quantities(Some(EquationId::Gaussian), &params, 1.0, 0.5).unwrap();
        match got {
            DerivedQuantities::Gaussian { peak_distance, width, fwhm } => {
                assert_eq!(peak_distance, 2.0);
                assert_eq!(width, 0.5);
                assert!((fwhm - 2.355 * 0.5).abs() < 1e-12);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn custom_terms_decompose_the_current() {
        let params = ParameterSet::defaults(EquationId::Custom);
        let d = 1.5;
        let got = derived_quantities(Some(EquationId::Custom), &params, d, 0.5).unwrap();
        match got {
            DerivedQuantities::Custom { exp_term, power_term, total } => {
                let current = raw_current(d, Some(EquationId::Custom), &params, 0.5);
                assert!((exp_term + power_term - current).abs() < 1e-12);
                assert!((total - current).abs() < 1e-12);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn quantum_panel_reports_nan_kappa_on_domain_error() {
        let variant = EquationId::Quantum.variant();
        let mut params = ParameterSet::defaults(EquationId::Quantum);
        params.set(variant, "phi", 0.5);
        let got = derived_quantities(Some(EquationId::Quantum), &params, 1.0, 2.0).unwrap();
        match got {
            DerivedQuantities::Quantum { kappa, transmission } => {
                assert!(kappa.is_nan());
                assert!(transmission.is_nan());
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn fallback_variant_has_no_panel() {
        assert_eq!(derived_quantities(None, &ParameterSet::default(), 1.0, 0.5), None);
    }
}
