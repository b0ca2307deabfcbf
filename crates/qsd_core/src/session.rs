//! One enumeration pass: countdown, accumulation, single flush.

use crate::DumpError;
use crate::amplitude::{BasisAmplitude, FormatConfig, is_negligible};
use crate::format::format_amplitude;
use crate::ket::render_ket;
use crate::phase::PhaseReference;

/// How a session renders each basis state into the running buffer.
#[derive(Clone, Copy, Debug)]
pub enum RenderMode {
    /// Every basis state's `(re, im)` pair reported verbatim, as one array.
    Raw,
    /// Dirac notation: fixed-precision amplitudes with ket labels, skipping
    /// negligible states.
    Dirac(FormatConfig),
}

/// Tagged session state. The single-flush invariant is structural: the
/// buffer only exists while accumulating, and both exits are terminal.
enum SessionState {
    Accumulating {
        /// Basis states still expected; strictly decreases once per callback.
        remaining: u64,
        /// Rendered output, owned exclusively by this session.
        buffer: String,
        /// Terms emitted so far; decides separator placement.
        terms: usize,
        /// Reference phase, set by the first non-negligible amplitude when
        /// relative phases are enabled and never recomputed afterwards.
        reference: Option<PhaseReference>,
    },
    Flushed,
    Discarded,
}

/// Outcome of feeding one amplitude to the session.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionStep {
    /// More basis states are expected; the engine should keep enumerating.
    Continue,
    /// The countdown reached zero; the rendered text is handed over. This
    /// happens exactly once per session.
    Finished(String),
}

/// Accumulates one full enumeration pass over `2^qubit_count` basis states.
///
/// The engine invokes [`DumpSession::on_amplitude`] once per basis state.
/// The buffer is flushed exactly once, when the countdown reaches zero, or
/// the whole session is discarded by [`DumpSession::on_entangled`] — never
/// both. Each dump call constructs a fresh session; nothing is shared
/// across sessions.
pub struct DumpSession {
    mode: RenderMode,
    qubit_count: usize,
    state: SessionState,
}

impl DumpSession {
    /// Creates a session expecting all `2^qubit_count` basis states.
    pub fn new(mode: RenderMode, qubit_count: usize) -> Self {
        debug_assert!(qubit_count < u64::BITS as usize);
        let buffer = match mode {
            RenderMode::Raw => String::from("["),
            RenderMode::Dirac(_) => String::new(),
        };
        Self {
            mode,
            qubit_count,
            state: SessionState::Accumulating {
                remaining: 1u64 << qubit_count,
                buffer,
                terms: 0,
                reference: None,
            },
        }
    }

    /// Consumes one basis-state amplitude.
    ///
    /// Decrements the countdown, renders the state according to the session
    /// mode, and returns [`SessionStep::Finished`] with the complete text
    /// when the countdown reaches zero. Negligible amplitudes in Dirac mode
    /// are skipped but still count against the countdown. Calling this
    /// after the session has flushed or been discarded is a protocol
    /// violation by the engine.
    pub fn on_amplitude(&mut self, amp: BasisAmplitude) -> Result<SessionStep, DumpError> {
        let SessionState::Accumulating {
            remaining,
            buffer,
            terms,
            reference,
        } = &mut self.state
        else {
            return Err(DumpError::CallbackAfterCompletion);
        };
        *remaining -= 1;

        match self.mode {
            RenderMode::Raw => {
                if *terms > 0 {
                    buffer.push_str(", ");
                }
                buffer.push_str(&format!("({}, {})", amp.amplitude.re, amp.amplitude.im));
                *terms += 1;
            }
            RenderMode::Dirac(config) => {
                if !is_negligible(amp.amplitude, config.zero_tolerance) {
                    let mut z = amp.amplitude;
                    if config.relative_phases {
                        let phase = reference.get_or_insert_with(|| PhaseReference::capture(z));
                        z = phase.rotate(z);
                    }
                    let rendered = format_amplitude(z, config.precision, config.zero_tolerance);
                    if *terms == 0 {
                        if !rendered.positive {
                            buffer.push('-');
                        }
                    } else {
                        buffer.push_str(if rendered.positive { " + " } else { " - " });
                    }
                    buffer.push_str(&rendered.text);
                    buffer.push_str(&render_ket(amp.index, self.qubit_count));
                    *terms += 1;
                }
            }
        }

        if *remaining == 0 {
            let mut text = std::mem::take(buffer);
            if matches!(self.mode, RenderMode::Raw) {
                text.push(']');
            }
            self.state = SessionState::Flushed;
            return Ok(SessionStep::Finished(text));
        }
        Ok(SessionStep::Continue)
    }

    /// Abandons the session because the engine signalled entanglement.
    ///
    /// Any partially built buffer is discarded; the orchestrator substitutes
    /// a fixed diagnostic line. Signalling entanglement after the buffer was
    /// already flushed is a protocol violation by the engine.
    pub fn on_entangled(&mut self) -> Result<(), DumpError> {
        if matches!(self.state, SessionState::Flushed) {
            return Err(DumpError::EntangledAfterFlush);
        }
        self.state = SessionState::Discarded;
        Ok(())
    }
}
