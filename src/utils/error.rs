use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input for '{field}': '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Report generation error: {message}")]
    ReportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn validation(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimatorError::ValidationError {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::ValidationError { .. } | EstimatorError::CsvError(_) => {
                ErrorCategory::Input
            }
            EstimatorError::TomlError(_)
            | EstimatorError::ConfigError { .. }
            | EstimatorError::MissingConfigError { .. }
            | EstimatorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EstimatorError::IoError(_) => ErrorCategory::Io,
            EstimatorError::SerializationError(_) | EstimatorError::ReportError { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimatorError::ValidationError { field, reason, .. } => {
                format!("The value given for {} is not usable: {}", field, reason)
            }
            EstimatorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            EstimatorError::MissingConfigError { field } => {
                format!("Required configuration '{}' was not provided", field)
            }
            EstimatorError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            EstimatorError::CsvError(_) => "The request file could not be read as CSV".to_string(),
            EstimatorError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that every numeric field is a plain number and at least one product is selected"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file sections and the command line flags"
            }
            ErrorCategory::Io => "Make sure the paths exist and are readable/writable",
            ErrorCategory::Output => "Try a different output format or output directory",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
