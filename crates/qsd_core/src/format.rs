//! Fixed-precision rendering of complex amplitudes.

use num_complex::Complex64;

/// Rendered magnitude text plus the sign the surrounding expression needs.
///
/// The text never carries a leading sign of its own; the session decides
/// whether `positive` becomes a `" + "` or `" - "` separator, or a bare
/// `-` prefix on the first term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmplitudeText {
    /// Sign of the dominant component: the real part, or the imaginary part
    /// when the amplitude is purely imaginary.
    pub positive: bool,
    /// Magnitude text, e.g. `0.707`, `0.5i` or `(0.5 - 0.5i)`.
    pub text: String,
}

/// Renders one complex amplitude at the given precision.
///
/// Components with absolute value below `zero_tolerance` are collapsed:
/// a near-zero imaginary part yields a plain real magnitude, a near-zero
/// real part yields an `i`-suffixed imaginary magnitude, and when both
/// components are significant the result is a parenthesized pair whose
/// inner separator is `+` when the components share a sign and `-`
/// otherwise. Callers are expected to have filtered out amplitudes where
/// both components are negligible.
pub fn format_amplitude(z: Complex64, precision: usize, zero_tolerance: f64) -> AmplitudeText {
    if z.im.abs() < zero_tolerance {
        AmplitudeText {
            positive: z.re > 0.0,
            text: round_trim(z.re.abs(), precision),
        }
    } else if z.re.abs() < zero_tolerance {
        AmplitudeText {
            positive: z.im > 0.0,
            text: format!("{}i", round_trim(z.im.abs(), precision)),
        }
    } else {
        let sep = if (z.re > 0.0) == (z.im > 0.0) { '+' } else { '-' };
        AmplitudeText {
            positive: z.re > 0.0,
            text: format!(
                "({} {} {}i)",
                round_trim(z.re.abs(), precision),
                sep,
                round_trim(z.im.abs(), precision)
            ),
        }
    }
}

/// Rounds to `precision` fractional digits, then drops trailing zeros and
/// a dangling decimal point, so `1.0` at precision 3 renders as `1`.
fn round_trim(value: f64, precision: usize) -> String {
    let fixed = format!("{value:.precision$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
