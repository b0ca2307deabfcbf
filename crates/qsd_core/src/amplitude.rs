//! Basis-state amplitudes and per-session formatting configuration.

use num_complex::Complex64;

/// A single basis-state amplitude delivered by the enumeration engine.
///
/// Transient by contract: an instance exists only for the duration of one
/// callback invocation and is never stored beyond the current rendering
/// step. The index is the computational-basis index whose bits are qubit
/// values, least significant bit first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasisAmplitude {
    /// Computational-basis index of this state.
    pub index: u64,
    /// Complex coefficient of this basis state in the state vector.
    pub amplitude: Complex64,
}

impl BasisAmplitude {
    /// Wraps the raw `(index, re, im)` triple of an enumeration callback.
    pub fn new(index: u64, re: f64, im: f64) -> Self {
        Self {
            index,
            amplitude: Complex64::new(re, im),
        }
    }
}

/// Formatting knobs for one dump session, immutable once the session starts.
#[derive(Clone, Copy, Debug)]
pub struct FormatConfig {
    /// Number of fractional digits kept when rendering magnitudes.
    pub precision: usize,
    /// Components with absolute value below this are treated as zero.
    pub zero_tolerance: f64,
    /// Remove the global phase of the first non-negligible amplitude.
    pub relative_phases: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            zero_tolerance: 1e-10,
            relative_phases: false,
        }
    }
}

/// Returns true when both components are below the tolerance.
///
/// Both components are compared by absolute value, so negative amplitudes
/// are judged by magnitude like positive ones. States that pass this test
/// contribute nothing to a Dirac-mode dump.
pub fn is_negligible(z: Complex64, tolerance: f64) -> bool {
    z.re.abs() < tolerance && z.im.abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negligible_requires_both_components_small() {
        let tol = 1e-7;
        assert!(is_negligible(Complex64::new(0.0, 0.0), tol));
        assert!(is_negligible(Complex64::new(1e-9, -1e-9), tol));
        assert!(!is_negligible(Complex64::new(0.5, 0.0), tol));
        assert!(!is_negligible(Complex64::new(0.0, 0.5), tol));
    }

    #[test]
    fn negligible_uses_absolute_value() {
        // A large negative component must not slip under the tolerance.
        assert!(!is_negligible(Complex64::new(-0.7071, 0.0), 1e-7));
        assert!(!is_negligible(Complex64::new(0.0, -0.7071), 1e-7));
    }
}
