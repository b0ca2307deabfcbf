//! I/O plumbing for quantum state dumps.
//!
//! Provides the output-target resolution used by dump calls, the message
//! channel and append-file sinks the rendered text is written to, and a
//! reader for plain-text state-vector files consumed by the host CLI.
//! Rendering itself lives in `qsd_core`; this crate only moves text.

/// Plain-text state-vector file reader.
///
/// Parses files holding one `re im` amplitude pair per line into a complex
/// vector, validating that the amplitude count is a power of two so the
/// vector describes a whole register.
pub mod reader;

/// Message channel and dump sink plumbing.
///
/// Defines the single-line message channel used for console output and
/// warning diagnostics, and the per-call dump sink that writes either to
/// that channel or to an append-mode file.
pub mod sink;

/// Output-target resolution for dump calls.
///
/// Maps the caller-provided location value to a concrete target: an absent
/// or empty location resolves to the console channel, anything else is
/// treated as a file path.
pub mod target;
