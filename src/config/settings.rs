use std::fmt;

use crate::adapters::output::{parse_delimiter, OutputFormat, OutputTarget};
use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Connection settings shared by all commands.
#[derive(Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub varfish_server_url: String,
    pub varfish_api_token: String,
    pub verify_ssl: bool,
    pub timeout_seconds: u64,
}

impl fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("varfish_server_url", &self.varfish_server_url)
            .field("varfish_api_token", &"***")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct GlobalOverrides {
    pub varfish_server_url: Option<String>,
    pub varfish_api_token: Option<String>,
    pub no_verify_ssl: bool,
    pub timeout_seconds: Option<u64>,
}

impl GlobalConfig {
    /// Command line wins over the `[global]` section of the TOML file, which wins over defaults.
    pub fn resolve(overrides: &GlobalOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let toml_global = toml_config.global();

        let server_url = overrides
            .varfish_server_url
            .clone()
            .or(toml_global.varfish_server_url);
        let api_token = overrides
            .varfish_api_token
            .clone()
            .or(toml_global.varfish_api_token);

        let varfish_server_url = validate_required_field("varfish_server_url", &server_url)?;
        let varfish_api_token = validate_required_field("varfish_api_token", &api_token)?;

        let verify_ssl = if overrides.no_verify_ssl {
            false
        } else {
            toml_global.verify_ssl.unwrap_or(true)
        };

        Ok(Self {
            varfish_server_url: varfish_server_url.clone(),
            varfish_api_token: varfish_api_token.clone(),
            verify_ssl,
            timeout_seconds: overrides
                .timeout_seconds
                .or(toml_global.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        })
    }
}

impl Validate for GlobalConfig {
    fn validate(&self) -> Result<()> {
        validate_url("varfish_server_url", &self.varfish_server_url)?;
        validate_non_empty_string("varfish_api_token", &self.varfish_api_token)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

/// How a listing is rendered and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub fields: Vec<String>,
    pub delimiter: u8,
    pub target: OutputTarget,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            fields: Vec::new(),
            delimiter: b',',
            target: OutputTarget::Stdout,
        }
    }
}

impl OutputConfig {
    pub fn new(
        format: OutputFormat,
        fields: Vec<String>,
        delimiter: &str,
        target: &str,
    ) -> Result<Self> {
        Ok(Self {
            format,
            fields,
            delimiter: parse_delimiter(delimiter)?,
            target: target.parse()?,
        })
    }

    /// Use the command's table columns when the user picked no fields. CSV and JSON keep every field.
    pub fn with_default_fields(mut self, table_fields: &[&str]) -> Self {
        if self.fields.is_empty() && self.format == OutputFormat::Table {
            self.fields = table_fields.iter().map(|f| f.to_string()).collect();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::VarfishError;

    fn toml(content: &str) -> TomlConfig {
        TomlConfig::from_toml_str(content).unwrap()
    }

    #[test]
    fn test_resolve_prefers_command_line() {
        let toml_config = toml(
            r#"
[global]
varfish_server_url = "https://from-file.example.com"
varfish_api_token = "file-token"
verify_ssl = true
timeout_seconds = 10
"#,
        );
        let overrides = GlobalOverrides {
            varfish_server_url: Some("https://from-cli.example.com".to_string()),
            varfish_api_token: None,
            no_verify_ssl: true,
            timeout_seconds: None,
        };

        let config = GlobalConfig::resolve(&overrides, &toml_config).unwrap();
        assert_eq!(config.varfish_server_url, "https://from-cli.example.com");
        assert_eq!(config.varfish_api_token, "file-token");
        assert!(!config.verify_ssl);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_resolve_defaults() {
        let overrides = GlobalOverrides {
            varfish_server_url: Some("https://varfish.example.com".to_string()),
            varfish_api_token: Some("token".to_string()),
            ..Default::default()
        };

        let config = GlobalConfig::resolve(&overrides, &TomlConfig::default()).unwrap();
        assert!(config.verify_ssl);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_missing_token() {
        let overrides = GlobalOverrides {
            varfish_server_url: Some("https://varfish.example.com".to_string()),
            ..Default::default()
        };

        match GlobalConfig::resolve(&overrides, &TomlConfig::default()) {
            Err(VarfishError::MissingConfigError { field }) => assert_eq!(field, "varfish_api_token"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_debug_masks_token() {
        let config = GlobalConfig {
            varfish_server_url: "https://varfish.example.com".to_string(),
            varfish_api_token: "super-secret".to_string(),
            verify_ssl: true,
            timeout_seconds: 60,
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = GlobalConfig {
            varfish_server_url: "https://varfish.example.com".to_string(),
            varfish_api_token: "token".to_string(),
            verify_ssl: true,
            timeout_seconds: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_default_fields() {
        const TABLE_FIELDS: &[&str] = &["sodar_uuid", "title"];

        let table = OutputConfig::default().with_default_fields(TABLE_FIELDS);
        assert_eq!(table.fields, vec!["sodar_uuid", "title"]);

        let csv = OutputConfig {
            format: OutputFormat::Csv,
            ..Default::default()
        }
        .with_default_fields(TABLE_FIELDS);
        assert!(csv.fields.is_empty());

        let chosen = OutputConfig {
            fields: vec!["title".to_string()],
            ..Default::default()
        }
        .with_default_fields(TABLE_FIELDS);
        assert_eq!(chosen.fields, vec!["title"]);
    }

    #[test]
    fn test_output_config_new_rejects_bad_delimiter() {
        assert!(OutputConfig::new(OutputFormat::Csv, vec![], "::", "-").is_err());
        let config = OutputConfig::new(OutputFormat::Csv, vec![], "\\t", "out.tsv").unwrap();
        assert_eq!(config.delimiter, b'\t');
        assert_eq!(config.target.to_string(), "out.tsv");
    }
}
