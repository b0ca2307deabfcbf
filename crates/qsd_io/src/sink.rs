//! Message channel and dump sink plumbing.

use crate::target::OutputTarget;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Single-line text output.
///
/// Used both for normal console-mode dump output and for warning
/// diagnostics. Writes through the channel are infallible; fallible sinks
/// (files) report their errors through [`DumpSink::write_line`] instead.
pub trait MessageChannel {
    /// Emits one line of text.
    fn line(&mut self, text: &str);
}

/// Message channel backed by standard output.
pub struct StdoutChannel;

impl MessageChannel for StdoutChannel {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Per-call dump sink: either the message channel or an append-mode file.
///
/// Opened once per dump call and released by scope on every exit path.
/// File open and write errors surface as `Err` so the orchestrator can
/// convert them into a warning; they are never raised past the dump call.
pub enum DumpSink {
    /// Route lines through the message channel.
    Console,
    /// Append lines to an exclusively owned file writer.
    File { path: PathBuf, writer: File },
}

impl DumpSink {
    /// Opens the sink for one dump call.
    ///
    /// File targets are opened in append mode, creating the file when it
    /// does not exist yet.
    pub fn open(target: &OutputTarget) -> Result<Self> {
        match target {
            OutputTarget::Console => Ok(DumpSink::Console),
            OutputTarget::File(path) => {
                let writer = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open '{}'", path.display()))?;
                debug!(path = %path.display(), "dump sink opened");
                Ok(DumpSink::File {
                    path: path.clone(),
                    writer,
                })
            }
        }
    }

    /// Writes one line to the sink.
    ///
    /// Console lines go through `channel` and cannot fail; file lines
    /// return an error when the underlying write does.
    pub fn write_line(&mut self, channel: &mut dyn MessageChannel, text: &str) -> Result<()> {
        match self {
            DumpSink::Console => {
                channel.line(text);
                Ok(())
            }
            DumpSink::File { path, writer } => writeln!(writer, "{text}")
                .with_context(|| format!("failed to write '{}'", path.display())),
        }
    }
}

/// Converts a sink failure into a single warning line on the message
/// channel.
///
/// Dump calls inspect a running computation and must never abort it, so
/// this is the one place where an I/O error is deliberately swallowed: the
/// caller of the dump still sees a normal return.
pub fn warn_sink_failure(channel: &mut dyn MessageChannel, target: &OutputTarget, cause: &anyhow::Error) {
    let path = match target {
        OutputTarget::File(path) => path.display().to_string(),
        OutputTarget::Console => String::from("<console>"),
    };
    warn!(%path, "state dump sink failure: {cause:#}");
    channel.line(&format!("[warning] Unable to write state to '{path}' ({cause:#})"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    struct VecChannel(Vec<String>);

    impl MessageChannel for VecChannel {
        fn line(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("qsd_sink_{}_{}", std::process::id(), name));
        path
    }

    #[test]
    fn console_sink_routes_through_channel() {
        let mut channel = VecChannel(Vec::new());
        let mut sink = DumpSink::open(&OutputTarget::Console).unwrap();
        sink.write_line(&mut channel, "hello").unwrap();
        assert_eq!(channel.0, vec!["hello".to_string()]);
    }

    #[test]
    fn file_sink_appends_lines() {
        let path = temp_path("append");
        let _ = std::fs::remove_file(&path);
        let target = OutputTarget::File(path.clone());
        let mut channel = VecChannel(Vec::new());

        for line in ["first", "second"] {
            let mut sink = DumpSink::open(&target).unwrap();
            sink.write_line(&mut channel, line).unwrap();
        }

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");
        assert!(channel.0.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn opening_an_impossible_path_fails() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent-dir/qsd/dump.txt"));
        assert!(DumpSink::open(&target).is_err());
    }

    #[test]
    fn warning_line_names_the_path() {
        let mut channel = VecChannel(Vec::new());
        let target = OutputTarget::File(PathBuf::from("dump.txt"));
        let cause = anyhow::anyhow!("disk full");
        warn_sink_failure(&mut channel, &target, &cause);
        assert_eq!(channel.0.len(), 1);
        assert!(channel.0[0].starts_with("[warning] Unable to write state to 'dump.txt'"));
        assert!(channel.0[0].contains("disk full"));
    }
}
