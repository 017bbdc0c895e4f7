use thiserror::Error;

#[derive(Error, Debug)]
pub enum VarfishError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}: {body}")]
    HttpStatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VarfishError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VarfishError::ApiError(_) | VarfishError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            VarfishError::ConfigError { .. }
            | VarfishError::MissingConfigError { .. }
            | VarfishError::InvalidConfigValueError { .. }
            | VarfishError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            VarfishError::CsvError(_)
            | VarfishError::SerializationError(_)
            | VarfishError::ValidationError { .. } => ErrorCategory::Data,
            VarfishError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Timeouts and 5xx responses are worth retrying.
            VarfishError::ApiError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            VarfishError::HttpStatusError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            VarfishError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            VarfishError::ApiError(e) if e.is_timeout() => {
                "The server did not answer in time; retry or raise --timeout".to_string()
            }
            VarfishError::ApiError(_) => {
                "Check network connectivity and the server URL (--varfish-server-url)".to_string()
            }
            VarfishError::HttpStatusError { status: 401, .. }
            | VarfishError::HttpStatusError { status: 403, .. } => {
                "Check your API token (--varfish-api-token or varfish_api_token in ~/.varfishrc.toml)"
                    .to_string()
            }
            VarfishError::HttpStatusError { status: 404, .. } => {
                "Check that the UUID exists and that you have access to it".to_string()
            }
            VarfishError::HttpStatusError { status, .. } if *status >= 500 => {
                "The server failed to handle the request; try again later".to_string()
            }
            VarfishError::HttpStatusError { .. } => {
                "Inspect the server response above for details".to_string()
            }
            VarfishError::MissingConfigError { field } => format!(
                "Pass --{} on the command line or set {} in the [global] section of ~/.varfishrc.toml",
                field.replace('_', "-"),
                field
            ),
            VarfishError::ConfigError { .. }
            | VarfishError::InvalidConfigValueError { .. }
            | VarfishError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            VarfishError::SerializationError(_) => {
                "The server response could not be decoded; check server and client versions"
                    .to_string()
            }
            VarfishError::CsvError(_) => "Check the output delimiter and output file".to_string(),
            VarfishError::ValidationError { .. } => {
                "Fix the input and run again".to_string()
            }
            VarfishError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not talk to the VarFish server: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Invalid data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, VarfishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_severity() {
        let server_error = VarfishError::HttpStatusError {
            status: 503,
            url: "https://varfish.example.com/".to_string(),
            body: String::new(),
        };
        assert_eq!(server_error.severity(), ErrorSeverity::Medium);
        assert_eq!(server_error.category(), ErrorCategory::Network);

        let forbidden = VarfishError::HttpStatusError {
            status: 403,
            url: "https://varfish.example.com/".to_string(),
            body: "forbidden".to_string(),
        };
        assert_eq!(forbidden.severity(), ErrorSeverity::High);
        assert!(forbidden.recovery_suggestion().contains("API token"));
    }

    #[test]
    fn test_missing_config_suggestion_names_flag_and_key() {
        let err = VarfishError::MissingConfigError {
            field: "varfish_server_url".to_string(),
        };
        let suggestion = err.recovery_suggestion();
        assert!(suggestion.contains("--varfish-server-url"));
        assert!(suggestion.contains("varfish_server_url"));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = VarfishError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("System error"));
    }
}
