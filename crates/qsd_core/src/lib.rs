//! Core rendering pipeline for quantum state dumps.
//!
//! This crate turns a stream of basis-state amplitudes, delivered one at a
//! time by an enumeration engine, into a single rendered line of text. It
//! owns the numeric side of the pipeline (negligibility tests, global-phase
//! removal, fixed-precision complex formatting, little-endian ket labels)
//! and the session state machine that accumulates terms and flushes exactly
//! once. It performs no I/O and knows nothing about sinks or files.

use thiserror::Error;

/// Basis-state amplitudes and per-session formatting configuration.
///
/// Defines the transient amplitude record handed to the session once per
/// enumeration callback, the immutable formatting knobs of a dump session,
/// and the shared negligibility test applied before any rendering happens.
pub mod amplitude;

/// Fixed-precision rendering of complex amplitudes.
///
/// Converts one complex amplitude into magnitude text plus the sign the
/// surrounding expression needs, collapsing near-zero components into the
/// purely-real or purely-imaginary forms. Stateless and independent of the
/// basis index.
pub mod format;

/// Little-endian ket labels for basis indices.
///
/// Renders a basis index as a `|b0b1...⟩` bit-string label with the least
/// significant bit first, matching the qubit ordering convention of the
/// enumeration engine, and parses such labels back into indices.
pub mod ket;

/// Global-phase removal for relative-phase dumps.
///
/// Captures the phase of the first non-negligible amplitude seen in a
/// session and rotates every subsequent amplitude by its conjugate, leaving
/// the reference amplitude real and non-negative while preserving the
/// relative phases between basis states.
pub mod phase;

/// One enumeration pass: countdown, accumulation, single flush.
///
/// Implements the dump session state machine. Each callback decrements a
/// countdown of remaining basis states; the accumulated buffer is handed
/// over exactly once, when the countdown reaches zero, or discarded entirely
/// when the engine signals entanglement.
pub mod session;

/// Contract violations between the session and the enumeration engine.
///
/// These are never recovered from silently: a broken enumeration protocol
/// indicates a faulty engine, and the dump call that observes it fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpError {
    /// A basis-state callback arrived after the countdown was exhausted.
    ///
    /// The engine promised one invocation per basis state and has already
    /// delivered all of them; the session has flushed or been discarded.
    #[error("basis-state callback arrived after all states were consumed")]
    CallbackAfterCompletion,

    /// An entanglement signal arrived after the session already flushed.
    ///
    /// The engine reported an incomplete enumeration even though every basis
    /// state was delivered and the rendered buffer was handed over.
    #[error("entanglement signal arrived after the session was flushed")]
    EntangledAfterFlush,
}
