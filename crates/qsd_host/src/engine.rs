//! Boundary to the amplitude-enumeration engine.

/// Callback invoked once per basis state with `(index, re, im)`.
///
/// Returning `false` tells the engine to stop enumerating; the engine must
/// not invoke the callback again after that.
pub type AmplitudeCallback<'a> = &'a mut dyn FnMut(u64, f64, f64) -> bool;

/// Amplitude-enumeration engine.
///
/// The engine owns qubit allocation, the actual linear-algebra state and
/// entanglement detection; dump orchestration only asks it to enumerate
/// basis-state amplitudes. Both enumeration entry points invoke the
/// callback sequentially from within the call itself and return whether
/// the enumeration completed: `false` means the requested qubits could
/// not be separated from the rest of the register.
pub trait StateEnumerator {
    /// Identifiers of all allocated qubits, least significant bit first.
    fn qubit_ids(&self) -> Vec<usize>;

    /// Number of allocated qubits.
    fn qubit_count(&self) -> usize;

    /// Enumerates the joint state of every allocated qubit.
    fn enumerate_all(&self, callback: AmplitudeCallback) -> bool;

    /// Enumerates the reduced state of `qubits`.
    ///
    /// Returns `false` when the subset is entangled with qubits outside it,
    /// in which case no amplitudes delivered so far are meaningful.
    fn enumerate_subset(&self, qubits: &[usize], callback: AmplitudeCallback) -> bool;
}
