//! Exit codes.

/// Exit codes for the namedupe application.
///
/// Diagnostics such as a missing report are not failures and exit with
/// [`ExitCode::Success`]; only errors that end a run early use
/// [`ExitCode::GeneralError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The requested operation ran to completion.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "ND000",
            Self::GeneralError => "ND001",
        }
    }
}
