//! In-memory state-vector engine backing the CLI and the tests.

use crate::engine::{AmplitudeCallback, StateEnumerator};
use num_complex::Complex64;

/// Tolerance for the rank-1 separability check.
const SEPARABILITY_TOLERANCE: f64 = 1e-9;

/// Enumeration engine over a full state vector held in memory.
///
/// Enumerating the whole register walks the vector directly. Enumerating a
/// subset first checks that the state factors into (subset) x (rest); if it
/// does, the normalized subset vector is enumerated, otherwise the subset
/// is reported as entangled.
pub struct VectorEngine {
    amplitudes: Vec<Complex64>,
    qubit_count: usize,
}

impl VectorEngine {
    /// Wraps a state vector. The length must be a non-zero power of two.
    pub fn new(amplitudes: Vec<Complex64>) -> Self {
        assert!(
            !amplitudes.is_empty() && amplitudes.len().is_power_of_two(),
            "state vector length must be a non-zero power of two"
        );
        let qubit_count = amplitudes.len().trailing_zeros() as usize;
        Self {
            amplitudes,
            qubit_count,
        }
    }

    /// Extracts the reduced state over `qubits` when the full state factors
    /// as (subset) x (rest); returns `None` when the subset is entangled.
    ///
    /// Viewing the amplitudes as a matrix indexed by (subset bits, rest
    /// bits), the state is separable exactly when that matrix has rank one,
    /// checked here via vanishing 2x2 cross-ratios against the strongest
    /// entry. The returned subset vector is normalized.
    fn reduce(&self, qubits: &[usize]) -> Option<Vec<Complex64>> {
        let rest: Vec<usize> = (0..self.qubit_count)
            .filter(|p| !qubits.contains(p))
            .collect();
        let subset_dim = 1usize << qubits.len();
        let rest_dim = 1usize << rest.len();

        let mut matrix = vec![Complex64::new(0.0, 0.0); subset_dim * rest_dim];
        for (index, &amp) in self.amplitudes.iter().enumerate() {
            let s = gather_bits(index, qubits);
            let r = gather_bits(index, &rest);
            matrix[s * rest_dim + r] = amp;
        }

        let (mut s0, mut r0, mut best) = (0, 0, 0.0f64);
        for s in 0..subset_dim {
            for r in 0..rest_dim {
                let norm = matrix[s * rest_dim + r].norm_sqr();
                if norm > best {
                    (s0, r0, best) = (s, r, norm);
                }
            }
        }

        let pivot = matrix[s0 * rest_dim + r0];
        for s in 0..subset_dim {
            for r in 0..rest_dim {
                let cross =
                    matrix[s * rest_dim + r] * pivot - matrix[s * rest_dim + r0] * matrix[s0 * rest_dim + r];
                if cross.norm() > SEPARABILITY_TOLERANCE {
                    return None;
                }
            }
        }

        let column: Vec<Complex64> = (0..subset_dim)
            .map(|s| matrix[s * rest_dim + r0])
            .collect();
        let norm = column.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        Some(column.into_iter().map(|amp| amp / norm).collect())
    }
}

/// Packs the bits of `index` found at `positions` into a dense index,
/// position j becoming bit j.
fn gather_bits(index: usize, positions: &[usize]) -> usize {
    positions
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &p)| acc | (((index >> p) & 1) << j))
}

impl StateEnumerator for VectorEngine {
    fn qubit_ids(&self) -> Vec<usize> {
        (0..self.qubit_count).collect()
    }

    fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    fn enumerate_all(&self, callback: AmplitudeCallback) -> bool {
        for (index, amp) in self.amplitudes.iter().enumerate() {
            if !callback(index as u64, amp.re, amp.im) {
                break;
            }
        }
        true
    }

    fn enumerate_subset(&self, qubits: &[usize], callback: AmplitudeCallback) -> bool {
        let Some(reduced) = self.reduce(qubits) else {
            return false;
        };
        for (index, amp) in reduced.iter().enumerate() {
            if !callback(index as u64, amp.re, amp.im) {
                break;
            }
        }
        true
    }
}
