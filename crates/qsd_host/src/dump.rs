//! Dump orchestration: sink resolution, header, enumeration, failure policy.

use crate::engine::StateEnumerator;
use anyhow::{Result, bail, ensure};
use qsd_core::DumpError;
use qsd_core::amplitude::{BasisAmplitude, FormatConfig};
use qsd_core::session::{DumpSession, RenderMode, SessionStep};
use qsd_io::sink::{DumpSink, MessageChannel, warn_sink_failure};
use qsd_io::target::OutputTarget;
use tracing::debug;

/// Fixed line substituted when the requested qubits cannot be separated
/// from the rest of the register.
const ENTANGLED_MESSAGE: &str =
    "Qubits were entangled with an external qubit. Cannot dump the corresponding wave function.";

/// Dumps the joint state of every allocated qubit as raw amplitude pairs.
pub fn dump_all<E: StateEnumerator>(
    engine: &E,
    channel: &mut dyn MessageChannel,
    target: &OutputTarget,
) -> Result<()> {
    run_dump(engine, channel, target, None, RenderMode::Raw)
}

/// Dumps the reduced state of `qubits` as raw amplitude pairs.
///
/// The subset must be non-empty and name distinct allocated qubits; a bad
/// subset is an invalid argument surfaced to the caller. The engine may
/// still report the subset as entangled, which produces a diagnostic line
/// instead of amplitudes.
pub fn dump_subset<E: StateEnumerator>(
    engine: &E,
    channel: &mut dyn MessageChannel,
    target: &OutputTarget,
    qubits: &[usize],
) -> Result<()> {
    validate_subset(engine, qubits)?;
    run_dump(engine, channel, target, Some(qubits), RenderMode::Raw)
}

/// Dumps in Dirac notation, over all qubits or a subset.
pub fn dump_dirac<E: StateEnumerator>(
    engine: &E,
    channel: &mut dyn MessageChannel,
    target: &OutputTarget,
    qubits: Option<&[usize]>,
    config: FormatConfig,
) -> Result<()> {
    if let Some(qubits) = qubits {
        validate_subset(engine, qubits)?;
    }
    run_dump(engine, channel, target, qubits, RenderMode::Dirac(config))
}

fn validate_subset<E: StateEnumerator>(engine: &E, qubits: &[usize]) -> Result<()> {
    ensure!(!qubits.is_empty(), "qubit subset must not be empty");
    for (i, &q) in qubits.iter().enumerate() {
        ensure!(
            q < engine.qubit_count(),
            "qubit id {q} out of range for a {}-qubit register",
            engine.qubit_count()
        );
        ensure!(
            !qubits[..i].contains(&q),
            "qubit id {q} listed more than once"
        );
    }
    Ok(())
}

/// Shared orchestration shell for all dump variants.
///
/// Resolves the sink, writes the header line naming the dumped qubit ids,
/// drives the enumeration through a fresh session, and writes either the
/// rendered result or the entanglement diagnostic. Sink failures are
/// converted into a single warning on the message channel and the call
/// returns normally; only invalid arguments and engine protocol violations
/// propagate as errors.
fn run_dump<E: StateEnumerator>(
    engine: &E,
    channel: &mut dyn MessageChannel,
    target: &OutputTarget,
    qubits: Option<&[usize]>,
    mode: RenderMode,
) -> Result<()> {
    let ids = match qubits {
        Some(qubits) => qubits.to_vec(),
        None => engine.qubit_ids(),
    };
    let qubit_count = ids.len();

    let mut sink = match DumpSink::open(target) {
        Ok(sink) => sink,
        Err(cause) => {
            warn_sink_failure(channel, target, &cause);
            return Ok(());
        }
    };

    let header = format!(
        "# state dump for qubit ids (least to most significant): {}",
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";")
    );
    if let Err(cause) = sink.write_line(channel, &header) {
        warn_sink_failure(channel, target, &cause);
        return Ok(());
    }

    let mut session = DumpSession::new(mode, qubit_count);
    let mut rendered: Option<String> = None;
    let mut violation: Option<DumpError> = None;
    let completed = {
        let mut callback = |index: u64, re: f64, im: f64| -> bool {
            match session.on_amplitude(BasisAmplitude::new(index, re, im)) {
                Ok(SessionStep::Continue) => true,
                Ok(SessionStep::Finished(text)) => {
                    rendered = Some(text);
                    false
                }
                Err(err) => {
                    violation = Some(err);
                    false
                }
            }
        };
        match qubits {
            Some(qubits) => engine.enumerate_subset(qubits, &mut callback),
            None => engine.enumerate_all(&mut callback),
        }
    };
    if let Some(err) = violation {
        return Err(err.into());
    }

    let body = if completed {
        match rendered {
            Some(text) => text,
            None => bail!(
                "enumeration engine stopped before delivering all {} basis states",
                1u64 << qubit_count
            ),
        }
    } else {
        session.on_entangled()?;
        ENTANGLED_MESSAGE.to_string()
    };

    if let Err(cause) = sink.write_line(channel, &body) {
        warn_sink_failure(channel, target, &cause);
        return Ok(());
    }
    debug!(?mode, qubits = qubit_count, completed, "state dump finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_engine::VectorEngine;
    use num_complex::Complex64;
    use std::path::PathBuf;

    struct VecChannel(Vec<String>);

    impl MessageChannel for VecChannel {
        fn line(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    fn bell_engine() -> VectorEngine {
        VectorEngine::new(vec![
            Complex64::new(0.7071, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.7071, 0.0),
        ])
    }

    fn dirac_config() -> FormatConfig {
        FormatConfig {
            precision: 3,
            zero_tolerance: 1e-7,
            relative_phases: false,
        }
    }

    #[test]
    fn dirac_dump_renders_header_and_terms() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        dump_dirac(
            &engine,
            &mut channel,
            &OutputTarget::Console,
            None,
            dirac_config(),
        )
        .unwrap();
        assert_eq!(
            channel.0,
            vec![
                "# state dump for qubit ids (least to most significant): 0;1".to_string(),
                "0.707|00⟩ + 0.707|11⟩".to_string(),
            ]
        );
    }

    #[test]
    fn raw_dump_reports_every_pair() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        dump_all(&engine, &mut channel, &OutputTarget::Console).unwrap();
        assert_eq!(channel.0.len(), 2);
        assert_eq!(
            channel.0[1],
            "[(0.7071, 0), (0, 0), (0, 0), (0.7071, 0)]"
        );
    }

    #[test]
    fn entangled_subset_yields_only_the_diagnostic() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        dump_subset(&engine, &mut channel, &OutputTarget::Console, &[0]).unwrap();
        assert_eq!(channel.0.len(), 2);
        assert_eq!(
            channel.0[1],
            "Qubits were entangled with an external qubit. Cannot dump the corresponding wave function."
        );
    }

    #[test]
    fn empty_subset_is_an_invalid_argument() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        assert!(dump_subset(&engine, &mut channel, &OutputTarget::Console, &[]).is_err());
        assert!(channel.0.is_empty());
    }

    #[test]
    fn out_of_range_qubit_is_an_invalid_argument() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        assert!(dump_subset(&engine, &mut channel, &OutputTarget::Console, &[5]).is_err());
    }

    #[test]
    fn duplicate_qubit_is_an_invalid_argument() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        assert!(dump_subset(&engine, &mut channel, &OutputTarget::Console, &[0, 0]).is_err());
    }

    #[test]
    fn unwritable_path_warns_once_and_returns_ok() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        let target = OutputTarget::File(PathBuf::from("/nonexistent-dir/qsd/dump.txt"));
        dump_all(&engine, &mut channel, &target).unwrap();
        assert_eq!(channel.0.len(), 1);
        assert!(
            channel.0[0]
                .starts_with("[warning] Unable to write state to '/nonexistent-dir/qsd/dump.txt'")
        );
    }

    #[test]
    fn file_dump_writes_header_and_body() {
        let engine = bell_engine();
        let mut channel = VecChannel(Vec::new());
        let mut path = std::env::temp_dir();
        path.push(format!("qsd_dump_{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        dump_dirac(
            &engine,
            &mut channel,
            &OutputTarget::File(path.clone()),
            None,
            dirac_config(),
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# state dump for qubit ids (least to most significant): 0;1\n\
             0.707|00⟩ + 0.707|11⟩\n"
        );
        assert!(channel.0.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn dirac_subset_of_product_state_renders_reduced_state() {
        // |0> (x) |+>: dumping qubit 1 alone is separable.
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let engine = VectorEngine::new(vec![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
        ]);
        let mut channel = VecChannel(Vec::new());
        dump_dirac(
            &engine,
            &mut channel,
            &OutputTarget::Console,
            Some(&[1]),
            dirac_config(),
        )
        .unwrap();
        assert_eq!(
            channel.0,
            vec![
                "# state dump for qubit ids (least to most significant): 1".to_string(),
                "0.707|0⟩ + 0.707|1⟩".to_string(),
            ]
        );
    }
}
