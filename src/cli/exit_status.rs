use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed normally, even if no markers were found
/// - `Error` (2): Command failed (git invocation failed, config error, etc.)
///
/// Unresolved markers are not a failure state: a marker whose commit has not
/// shipped in any release yet is expected and simply left in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed normally.
    Success,
    /// Command failed due to an internal or external error.
    Error,
}

impl ExitStatus {
    fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
