use std::fmt;
use std::io;
use std::path::Path;

use crate::error::NearMissError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the directory exists and the path is correct.",
        PermissionDenied => "Check permissions or choose another --log path.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn near_miss_cli_error(context: &str, err: NearMissError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &NearMissError) -> String {
    use NearMissError::*;
    match err {
        InvalidExponent(_) => format!("{err}. Pass -n with a value from 3 to 11."),
        InvalidBound(_) => format!("{err}. Pass -k with a value of at least 11."),
        Parse { .. } => format!("{err}. Enter a whole number."),
        InputClosed(_) => format!("{err}. Pass -n and -k on the command line instead."),
        Io(io) => format!("{io}"),
        Csv(e) => format!("{e}. Check the CSV log file."),
        Json(e) => format!("{e}. This is a bug."),
    }
}
