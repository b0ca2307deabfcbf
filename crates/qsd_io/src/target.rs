//! Output-target resolution for dump calls.

use std::path::PathBuf;

/// Where a dump call sends its rendered text.
///
/// Resolved once per call from the caller-provided location value and fixed
/// for the duration of that call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// The process-visible message channel.
    Console,
    /// Append to the file at this path.
    File(PathBuf),
}

impl OutputTarget {
    /// Resolves a caller-provided location.
    ///
    /// An absent or blank location means console output; anything else is
    /// interpreted as a file path.
    pub fn resolve(location: Option<&str>) -> Self {
        match location {
            None => OutputTarget::Console,
            Some(s) if s.trim().is_empty() => OutputTarget::Console,
            Some(s) => OutputTarget::File(PathBuf::from(s)),
        }
    }
}
