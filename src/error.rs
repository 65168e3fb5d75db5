//! Structured error types for tree building.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Config resolution failures
    ConfigReadFailed,
    ConfigParseFailed,
    ConfigNotMapping,

    // Filesystem
    WalkFailed,

    // Tool settings
    InvalidSettings,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigReadFailed => "CONFIG_READ_FAILED",
            ErrorCode::ConfigParseFailed => "CONFIG_PARSE_FAILED",
            ErrorCode::ConfigNotMapping => "CONFIG_NOT_MAPPING",
            ErrorCode::WalkFailed => "WALK_FAILED",
            ErrorCode::InvalidSettings => "INVALID_SETTINGS",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while walking a directory or building its tree.
///
/// None of these are recovered inside the builder. The first failure in a
/// fan-out aborts the enclosing join and surfaces at the top-level build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("config file {} must contain a mapping at the top level", path.display())]
    ConfigNotMapping { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(String),
}

impl BuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BuildError::ConfigRead { .. } => ErrorCode::ConfigReadFailed,
            BuildError::ConfigParse { .. } => ErrorCode::ConfigParseFailed,
            BuildError::ConfigNotMapping { .. } => ErrorCode::ConfigNotMapping,
            BuildError::Walk { .. } => ErrorCode::WalkFailed,
            BuildError::Settings(_) => ErrorCode::InvalidSettings,
        }
    }

    /// True for failures caused by a config file inside the scanned tree.
    pub fn is_config_failure(&self) -> bool {
        matches!(
            self,
            BuildError::ConfigRead { .. }
                | BuildError::ConfigParse { .. }
                | BuildError::ConfigNotMapping { .. }
        )
    }

    /// Log this error with its code and wrap it for the top-level report.
    pub fn into_report(self, what: impl Into<String>) -> anyhow::Error {
        let code = self.code();
        error!(code = %code, config_failure = self.is_config_failure(), "{self}");
        anyhow::Error::new(self).context(format!("{} ({code})", what.into()))
    }

    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        BuildError::ConfigParse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for build operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::ConfigParseFailed).unwrap();
        assert_eq!(json, "\"CONFIG_PARSE_FAILED\"");
    }

    #[test]
    fn test_display_matches_serialized_code() {
        for code in [
            ErrorCode::ConfigReadFailed,
            ErrorCode::ConfigParseFailed,
            ErrorCode::ConfigNotMapping,
            ErrorCode::WalkFailed,
            ErrorCode::InvalidSettings,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{code}\""));
        }
    }

    #[test]
    fn test_report_carries_code_and_cause() {
        let report = BuildError::parse("lib/a.config.yml", "bad indent")
            .into_report("failed to build component tree");
        assert_eq!(
            report.to_string(),
            "failed to build component tree (CONFIG_PARSE_FAILED)"
        );
        let cause = report.downcast_ref::<BuildError>().unwrap();
        assert_eq!(cause.code(), ErrorCode::ConfigParseFailed);
    }

    #[test]
    fn test_config_failure_classification() {
        let err = BuildError::parse("a/b.config.yml", "bad indent");
        assert!(err.is_config_failure());
        assert_eq!(err.code(), ErrorCode::ConfigParseFailed);
        assert!(err.to_string().contains("a/b.config.yml"));
        assert!(err.to_string().contains("bad indent"));

        let err = BuildError::Settings("nope".into());
        assert!(!err.is_config_failure());
    }
}
