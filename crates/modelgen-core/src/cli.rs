//! CLI-specific types.
//!
//! Strong types for the command-line surface: output format selection for
//! run reports and process exit codes.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::cli::{ExitCode, OutputFormat};
//!
//! let format = OutputFormat::Pretty;
//! assert_eq!(format.as_str(), "pretty");
//!
//! let code = ExitCode::INVALID_INPUT;
//! assert_eq!(code.as_i32(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// # Examples
///
/// ```
/// use modelgen_core::cli::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Colored output for humans
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code.
///
/// # Examples
///
/// ```
/// use modelgen_core::cli::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert!(!ExitCode::from_i32(1).is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful run (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// Generation failed (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Configuration or argument error (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps an error to the exit code the CLI reports for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::{Error, cli::ExitCode};
    ///
    /// let err = Error::ConfigError { message: "no source".into() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
    /// ```
    #[must_use]
    pub const fn for_error(error: &crate::Error) -> Self {
        if error.is_config_error() {
            Self::INVALID_INPUT
        } else {
            Self::ERROR
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::ERROR.as_i32(), 1);
        assert_eq!(ExitCode::INVALID_INPUT.as_i32(), 2);
        assert_eq!(i32::from(ExitCode::default()), 0);
    }

    #[test]
    fn test_exit_code_for_error() {
        let err = crate::Error::SchemaClosureDiverged { passes: 101 };
        assert_eq!(ExitCode::for_error(&err), ExitCode::ERROR);

        let err = crate::Error::SettingsNotFound {
            path: "x.json".into(),
        };
        assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
    }
}
