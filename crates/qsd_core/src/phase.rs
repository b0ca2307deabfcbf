//! Global-phase removal for relative-phase dumps.

use num_complex::Complex64;

/// Unit phase captured from the first non-negligible amplitude of a session.
///
/// Captured once per session and reused for every subsequent amplitude.
/// Rotating by the conjugate of the reference phase leaves the reference
/// amplitude itself real and non-negative while preserving the relative
/// phases between basis states. Measurement probabilities are unaffected.
#[derive(Clone, Copy, Debug)]
pub struct PhaseReference {
    conjugate: Complex64,
}

impl PhaseReference {
    /// Captures the phase angle of `z` via `atan2(im, re)`.
    pub fn capture(z: Complex64) -> Self {
        let theta = z.im.atan2(z.re);
        Self {
            conjugate: Complex64::new(theta.cos(), -theta.sin()),
        }
    }

    /// Rotates `z` by the negated reference phase:
    /// `re' = re*cos + im*sin`, `im' = im*cos - re*sin`.
    pub fn rotate(&self, z: Complex64) -> Complex64 {
        z * self.conjugate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn reference_amplitude_becomes_real_non_negative() {
        let first = Complex64::new(0.0, 0.7071);
        let reference = PhaseReference::capture(first);
        let rotated = reference.rotate(first);
        assert!(rotated.im.abs() < EPS);
        assert!(rotated.re >= 0.0);
        assert!((rotated.re - 0.7071).abs() < EPS);
    }

    #[test]
    fn negative_real_reference_flips_to_positive() {
        let first = Complex64::new(-0.6, 0.0);
        let reference = PhaseReference::capture(first);
        let rotated = reference.rotate(first);
        assert!((rotated.re - 0.6).abs() < EPS);
        assert!(rotated.im.abs() < EPS);
    }

    #[test]
    fn relative_phase_between_states_is_preserved() {
        let a = Complex64::new(0.0, 0.5);
        let b = Complex64::new(0.5, 0.5);
        let reference = PhaseReference::capture(a);
        let (ra, rb) = (reference.rotate(a), reference.rotate(b));
        // The ratio b/a is invariant under a common rotation.
        let before = b / a;
        let after = rb / ra;
        assert!((before - after).norm() < EPS);
    }

    #[test]
    fn rotation_preserves_magnitude() {
        let z = Complex64::new(0.3, -0.4);
        let reference = PhaseReference::capture(Complex64::new(0.1, 0.9));
        assert!((reference.rotate(z).norm() - z.norm()).abs() < EPS);
    }
}
