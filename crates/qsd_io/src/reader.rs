//! Plain-text state-vector file reader.

use anyhow::{Context, Result, bail, ensure};
use num_complex::Complex64;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Loads a state-vector file.
///
/// The format is one `re im` pair per line in basis-index order, with
/// blank lines and `#` comments ignored. The amplitude count must be a
/// power of two so the vector describes a whole register.
pub fn load_state_file<P: AsRef<Path>>(path: P) -> Result<Vec<Complex64>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open state file '{}'", path.display()))?;
    let amplitudes = parse_state_lines(BufReader::new(file))?;
    debug!(path = %path.display(), amplitudes = amplitudes.len(), "state file loaded");
    Ok(amplitudes)
}

/// Parses amplitude lines from any buffered reader.
pub fn parse_state_lines<R: BufRead>(reader: R) -> Result<Vec<Complex64>> {
    let mut amplitudes = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let (Some(re), Some(im)) = (parts.next(), parts.next()) else {
            bail!("line {}: expected `re im`", line_no + 1);
        };
        ensure!(
            parts.next().is_none(),
            "line {}: trailing fields after `re im`",
            line_no + 1
        );
        let re: f64 = re
            .parse()
            .with_context(|| format!("line {}: bad real component", line_no + 1))?;
        let im: f64 = im
            .parse()
            .with_context(|| format!("line {}: bad imaginary component", line_no + 1))?;
        amplitudes.push(Complex64::new(re, im));
    }

    ensure!(
        !amplitudes.is_empty() && amplitudes.len().is_power_of_two(),
        "state file holds {} amplitudes, expected a non-zero power of two",
        amplitudes.len()
    );
    Ok(amplitudes)
}
