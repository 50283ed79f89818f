//! Equation registry for tunneling current models
//!
//! Defines the catalog of selectable current-vs-distance equations together
//! with their display strings and parameter schemas. The registry is static
//! and read-only; the evaluator and the UI-facing schema consumer both read
//! the same tables.

use std::collections::HashMap;

/// Identifier for a registered equation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationId {
    Exponential,
    Quantum,
    Power,
    Gaussian,
    Custom,
}

impl EquationId {
    /// All variants, in registry order
    pub const ALL: [EquationId; 5] = [
        EquationId::Exponential,
        EquationId::Quantum,
        EquationId::Power,
        EquationId::Gaussian,
        EquationId::Custom,
    ];

    /// Stable string key used by string-keyed callers
    pub fn key(&self) -> &'static str {
        match self {
            EquationId::Exponential => "exponential",
            EquationId::Quantum => "quantum",
            EquationId::Power => "power",
            EquationId::Gaussian => "gaussian",
            EquationId::Custom => "custom",
        }
    }

    /// Parse a string key. Unknown keys return `None`; the evaluator maps
    /// `None` to its compatibility fallback rather than failing.
    pub fn parse(key: &str) -> Option<EquationId> {
        EquationId::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// Full registry entry for this variant
    pub fn variant(&self) -> &'static EquationVariant {
        &VARIANTS[*self as usize]
    }
}

/// Schema for a single adjustable parameter
///
/// Invariant: `min <= default <= max` and `step > 0`.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterSpec {
    /// Clamp a value into the declared range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// A registered equation with display strings and parameter schema
#[derive(Debug, Clone, Copy)]
pub struct EquationVariant {
    pub id: EquationId,
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
    pub params: &'static [ParameterSpec],
}

impl EquationVariant {
    /// Look up the schema for one parameter key
    pub fn param(&self, key: &str) -> Option<&'static ParameterSpec> {
        self.params.iter().find(|p| p.key == key)
    }
}

/// The full equation catalog, indexed by `EquationId as usize`
pub static VARIANTS: [EquationVariant; 5] = [
    EquationVariant {
        id: EquationId::Exponential,
        name: "Exponential Tunneling",
        formula: "I = I₀ × e^(-αd)",
        description: "Standard STM tunneling current equation",
        params: &[
            ParameterSpec {
                key: "I0",
                label: "I₀ (Base Current)",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "alpha",
                label: "α (Decay Constant)",
                default: 2.0,
                min: 0.5,
                max: 5.0,
                step: 0.1,
            },
        ],
    },
    EquationVariant {
        id: EquationId::Quantum,
        name: "Quantum Barrier",
        formula: "I = I₀ × 4e^(-2Kd)",
        description: "Transmission through a rectangular vacuum barrier",
        params: &[
            ParameterSpec {
                key: "I0",
                label: "I₀ (Base Current)",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "phi",
                label: "φ (Work Function, eV)",
                default: 4.5,
                min: 0.5,
                max: 6.0,
                step: 0.1,
            },
        ],
    },
    EquationVariant {
        id: EquationId::Power,
        name: "Power Law",
        formula: "I = A × d^(-n)",
        description: "Power law relationship for current vs distance",
        params: &[
            ParameterSpec {
                key: "A",
                label: "A (Amplitude)",
                default: 1.0,
                min: 0.1,
                max: 5.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "n",
                label: "n (Power)",
                default: 2.0,
                min: 1.0,
                max: 4.0,
                step: 0.1,
            },
        ],
    },
    EquationVariant {
        id: EquationId::Gaussian,
        name: "Gaussian Tunneling",
        formula: "I = I₀ × e^(-(d-μ)²/2σ²)",
        description: "Gaussian distribution for tunneling probability",
        params: &[
            ParameterSpec {
                key: "I0",
                label: "I₀ (Peak Current)",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "mu",
                label: "μ (Mean Distance)",
                default: 2.0,
                min: 0.5,
                max: 4.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "sigma",
                label: "σ (Standard Deviation)",
                default: 0.5,
                min: 0.1,
                max: 2.0,
                step: 0.1,
            },
        ],
    },
    EquationVariant {
        id: EquationId::Custom,
        name: "Custom Equation",
        formula: "I = a × e^(-b×d) + c × d^(-2)",
        description: "Combined exponential and inverse-square decay",
        params: &[
            ParameterSpec {
                key: "a",
                label: "Parameter A",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "b",
                label: "Parameter B",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
            ParameterSpec {
                key: "c",
                label: "Parameter C",
                default: 1.0,
                min: 0.1,
                max: 10.0,
                step: 0.1,
            },
        ],
    },
];

/// All registered variants, in selection order
pub fn variants() -> &'static [EquationVariant] {
    &VARIANTS
}

/// Current values for the active variant's parameters
///
/// Lookups fall back to a caller-supplied default so a partially populated
/// set still evaluates; mutation goes through [`ParameterSet::set`], which
/// clamps against the schema and ignores keys the variant does not declare.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: HashMap<&'static str, f64>,
}

impl ParameterSet {
    /// Build a set holding every default for the given variant
    pub fn defaults(id: EquationId) -> Self {
        let values = id
            .variant()
            .params
            .iter()
            .map(|p| (p.key, p.default))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value for `key`, or `default` when the key is absent
    pub fn value_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    /// Set a parameter, clamped to its declared range. Returns the applied
    /// value, or `None` when the variant has no such parameter.
    pub fn set(&mut self, variant: &EquationVariant, key: &str, value: f64) -> Option<f64> {
        match variant.param(key) {
            Some(spec) => {
                let clamped = spec.clamp(value);
                if clamped != value {
                    log::warn!(
                        "parameter {} = {} outside [{}, {}], clamped to {}",
                        key,
                        value,
                        spec.min,
                        spec.max,
                        clamped
                    );
                }
                self.values.insert(spec.key, clamped);
                Some(clamped)
            }
            None => {
                log::warn!("ignoring unknown parameter {} for {}", key, variant.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_and_indexed_by_id() {
        assert_eq!(variants().len(), 5);
        for id in EquationId::ALL {
            assert_eq!(id.variant().id, id);
        }
    }

    #[test]
    fn schema_invariants_hold() {
        for variant in variants() {
            assert!(!variant.params.is_empty());
            for p in variant.params {
                assert!(p.min <= p.default, "{}.{}", variant.name, p.key);
                assert!(p.default <= p.max, "{}.{}", variant.name, p.key);
                assert!(p.step > 0.0, "{}.{}", variant.name, p.key);
            }
        }
    }

    #[test]
    fn parse_round_trips_keys() {
        for id in EquationId::ALL {
            assert_eq!(EquationId::parse(id.key()), Some(id));
        }
        assert_eq!(EquationId::parse("resonant"), None);
        assert_eq!(EquationId::parse(""), None);
    }

    #[test]
    fn defaults_populate_every_key() {
        let params = ParameterSet::defaults(EquationId::Gaussian);
        assert_eq!(params.get("I0"), Some(1.0));
        assert_eq!(params.get("mu"), Some(2.0));
        assert_eq!(params.get("sigma"), Some(0.5));
        assert_eq!(params.get("alpha"), None);
    }

    #[test]
    fn set_clamps_at_both_bounds() {
        let variant = EquationId::Exponential.variant();
        let mut params = ParameterSet::defaults(EquationId::Exponential);

        assert_eq!(params.set(variant, "alpha", 99.0), Some(5.0));
        assert_eq!(params.get("alpha"), Some(5.0));

        assert_eq!(params.set(variant, "alpha", -1.0), Some(0.5));
        assert_eq!(params.get("alpha"), Some(0.5));

        assert_eq!(params.set(variant, "alpha", 3.3), Some(3.3));
    }

    #[test]
    fn set_ignores_unknown_keys() {
        let variant = EquationId::Power.variant();
        let mut params = ParameterSet::defaults(EquationId::Power);

        assert_eq!(params.set(variant, "sigma", 1.0), None);
        assert_eq!(params.get("sigma"), None);
    }

    #[test]
    fn value_or_falls_back_when_absent() {
        let params = ParameterSet::default();
        assert_eq!(params.value_or("I0", 1.0), 1.0);
    }
}
