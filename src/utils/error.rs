use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("Cannot read layers directory {}: {source}", .path.display())]
    DirectoryReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {file} to {}: {source}", .destination.display())]
    MoveError {
        file: String,
        destination: PathBuf,
        completed: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination directory {} does not exist (needed by {file})", .dir.display())]
    MissingDestinationDir {
        file: String,
        dir: PathBuf,
        completed: usize,
    },

    #[error("Destination {} already exists (needed by {file})", .destination.display())]
    DestinationExists {
        file: String,
        destination: PathBuf,
        completed: usize,
    },

    #[error("Failed to create directory {}: {source}", .dir.display())]
    CreateDirError {
        dir: PathBuf,
        completed: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsafe destination segment '{segment}' derived from {file}")]
    UnsafeDestination { file: String, segment: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Output error: {message}")]
    OutputError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Directory,
    Move,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LayerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayerError::DirectoryReadError { .. } => ErrorCategory::Directory,
            LayerError::MoveError { .. }
            | LayerError::MissingDestinationDir { .. }
            | LayerError::DestinationExists { .. }
            | LayerError::CreateDirError { .. }
            | LayerError::UnsafeDestination { .. } => ErrorCategory::Move,
            LayerError::ConfigError { .. }
            | LayerError::ConfigValidationError { .. }
            | LayerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LayerError::IoError(_)
            | LayerError::SerializationError(_)
            | LayerError::CsvError(_)
            | LayerError::OutputError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Directory => ErrorSeverity::Critical,
            ErrorCategory::Move | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Number of files already moved when a fail-fast error stopped the batch.
    pub fn completed_moves(&self) -> Option<usize> {
        match self {
            LayerError::MoveError { completed, .. }
            | LayerError::MissingDestinationDir { completed, .. }
            | LayerError::DestinationExists { completed, .. }
            | LayerError::CreateDirError { completed, .. } => Some(*completed),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LayerError::DirectoryReadError { .. } => {
                "Check that --layers-dir points to an existing, readable directory".to_string()
            }
            LayerError::MissingDestinationDir { dir, .. } => format!(
                "Create '{}' first or re-run with --create-dirs",
                dir.display()
            ),
            LayerError::DestinationExists { .. } => {
                "Remove the conflicting file or re-run with --overwrite".to_string()
            }
            LayerError::UnsafeDestination { .. } => {
                "Rename the layer so the part before the delimiter is a plain folder name"
                    .to_string()
            }
            LayerError::MoveError { .. } | LayerError::CreateDirError { .. } => {
                "Check file permissions inside the layers directory".to_string()
            }
            LayerError::ConfigError { .. }
            | LayerError::ConfigValidationError { .. }
            | LayerError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
            LayerError::IoError(_)
            | LayerError::SerializationError(_)
            | LayerError::CsvError(_)
            | LayerError::OutputError { .. } => {
                "Retry with --format text".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.completed_moves() {
            Some(0) => format!("{} (no files were moved)", self),
            Some(n) => format!("{} ({} file(s) were already moved before the failure)", self, n),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayerError>;
