use crate::utils::error::{Result, VarfishError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `~/.varfishrc.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub global: Option<TomlGlobal>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TomlGlobal {
    pub varfish_server_url: Option<String>,
    pub varfish_api_token: Option<String>,
    pub verify_ssl: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for TomlGlobal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomlGlobal")
            .field("varfish_server_url", &self.varfish_server_url)
            .field(
                "varfish_api_token",
                &self.varfish_api_token.as_ref().map(|_| "***"),
            )
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// `~/.varfishrc.toml`, if a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".varfishrc.toml"))
}

impl TomlConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VarfishError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Like [`TomlConfig::from_file`], but a missing file yields an empty configuration.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No configuration file at {}", path.display());
            return Ok(Self::default());
        }
        tracing::debug!("Loading configuration from {}", path.display());
        Self::from_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VarfishError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the value of the environment variable; unset variables stay as they are.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VarfishError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn global(&self) -> TomlGlobal {
        self.global.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_global_section() {
        let toml_content = r#"
[global]
varfish_server_url = "https://varfish.example.com/"
varfish_api_token = "secret-token"
verify_ssl = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let global = config.global();

        assert_eq!(
            global.varfish_server_url.as_deref(),
            Some("https://varfish.example.com/")
        );
        assert_eq!(global.varfish_api_token.as_deref(), Some("secret-token"));
        assert_eq!(global.verify_ssl, Some(false));
        assert_eq!(global.timeout_seconds, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VARFISH_TOML_TEST_TOKEN", "from-env");

        let toml_content = r#"
[global]
varfish_api_token = "${VARFISH_TOML_TEST_TOKEN}"
varfish_server_url = "${VARFISH_TOML_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let global = config.global();
        assert_eq!(global.varfish_api_token.as_deref(), Some("from-env"));
        assert_eq!(
            global.varfish_server_url.as_deref(),
            Some("${VARFISH_TOML_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("VARFISH_TOML_TEST_TOKEN");
    }

    #[test]
    fn test_values_are_kept_unchecked() {
        let config = TomlConfig::from_toml_str(
            r#"
[global]
varfish_server_url = "invalid-url"
timeout_seconds = 0
"#,
        )
        .unwrap();
        let global = config.global();
        assert_eq!(global.varfish_server_url.as_deref(), Some("invalid-url"));
        assert_eq!(global.timeout_seconds, Some(0));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[global\nfoo = ").unwrap_err();
        assert!(matches!(err, VarfishError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file_and_missing_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[global]\nvarfish_server_url = \"https://varfish.example.com\"\n")
            .unwrap();

        let config = TomlConfig::load_optional(temp_file.path()).unwrap();
        assert!(config.global().varfish_server_url.is_some());

        let dir = tempfile::tempdir().unwrap();
        let missing = TomlConfig::load_optional(dir.path().join("nope.toml")).unwrap();
        assert!(missing.global.is_none());
    }

    #[test]
    fn test_debug_masks_token() {
        let global = TomlGlobal {
            varfish_api_token: Some("super-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", global);
        assert!(!rendered.contains("super-secret"));
    }
}
