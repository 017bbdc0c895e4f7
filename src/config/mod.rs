pub mod settings;
pub mod toml_config;

use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::adapters::output::OutputFormat;
use crate::config::settings::{GlobalOverrides, OutputConfig};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "varfish-cli")]
#[command(version, about = "Command line client for the VarFish REST API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Args)]
pub struct GlobalArgs {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(
        long,
        global = true,
        env = "VARFISH_CONFIG_PATH",
        help = "Path to configuration file [default: ~/.varfishrc.toml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "VARFISH_SERVER_URL")]
    pub varfish_server_url: Option<String>,

    #[arg(long, global = true, env = "VARFISH_API_TOKEN", hide_env_values = true)]
    pub varfish_api_token: Option<String>,

    #[arg(long, global = true, help = "Disable SSL certificate verification")]
    pub no_verify_ssl: bool,

    #[arg(long, global = true, help = "Request timeout in seconds [default: 60]")]
    pub timeout: Option<u64>,
}

impl fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("verbose", &self.verbose)
            .field("log_format", &self.log_format)
            .field("config", &self.config)
            .field("varfish_server_url", &self.varfish_server_url)
            .field(
                "varfish_api_token",
                &self.varfish_api_token.as_ref().map(|_| "***"),
            )
            .field("no_verify_ssl", &self.no_verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GlobalArgs {
    pub fn overrides(&self) -> GlobalOverrides {
        GlobalOverrides {
            varfish_server_url: self.varfish_server_url.clone(),
            varfish_api_token: self.varfish_api_token.clone(),
            no_verify_ssl: self.no_verify_ssl,
            timeout_seconds: self.timeout,
        }
    }
}

/// Options shared by all listing commands.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,

    #[arg(long, value_delimiter = ',', help = "Fields to output, comma separated")]
    pub output_fields: Vec<String>,

    #[arg(long, default_value = ",", help = "Field delimiter for CSV output")]
    pub output_delimiter: String,

    #[arg(long, default_value = "-", help = "Output file, '-' for stdout")]
    pub output_file: String,
}

impl OutputArgs {
    pub fn to_config(&self) -> Result<OutputConfig> {
        OutputConfig::new(
            self.output_format,
            self.output_fields.clone(),
            &self.output_delimiter,
            &self.output_file,
        )
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Project related commands
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Case related commands
    #[command(subcommand)]
    Case(CaseCommand),
    /// Variant annotation set related commands
    #[command(subcommand)]
    Varannos(VarannosCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProjectCommand {
    /// List all projects visible to the token's user
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CaseCommand {
    /// List the cases of a project
    List {
        /// UUID of the project
        project_uuid: Uuid,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show a single case
    Retrieve {
        /// UUID of the case
        case_uuid: Uuid,
    },
    /// List the case import infos of a project
    ListImportInfo {
        /// UUID of the project
        project_uuid: Uuid,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the small variant queries of a case
    SmallVarQueryList {
        /// UUID of the case
        case_uuid: Uuid,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a small variant query from a JSON settings file
    SmallVarQueryCreate {
        /// UUID of the case to query
        case_uuid: Uuid,
        /// Path to the JSON file with the query settings
        query_settings: PathBuf,
        #[arg(long, help = "Name of the query")]
        name: Option<String>,
        #[arg(long, help = "Make the query visible to other users")]
        public: bool,
    },
    /// Show the status of a small variant query
    SmallVarQueryStatus {
        /// UUID of the query
        query_uuid: Uuid,
    },
    /// Fetch the results of a small variant query
    SmallVarQueryFetchResults {
        /// UUID of the query
        query_uuid: Uuid,
    },
    /// Ask the server for query settings built from presets
    SmallVarQuerySettingsShortcut {
        /// UUID of the case
        case_uuid: Uuid,
        #[arg(
            long = "preset",
            value_parser = parse_key_val,
            help = "Preset as KEY=VALUE, e.g. quick_preset=de_novo; may be repeated"
        )]
        presets: Vec<(String, String)>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum VarannosCommand {
    /// List the variant annotation sets of a project
    VarannosetList {
        /// UUID of the project
        project_uuid: Uuid,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show a single variant annotation set
    VarannosetRetrieve {
        /// UUID of the variant annotation set
        varannoset_uuid: Uuid,
    },
    /// List the entries of a variant annotation set
    VarannosetentryList {
        /// UUID of the VarAnnoSet to list VarAnnoSetEntry objects for
        varannoset_uuid: Uuid,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no `=` found in `{}`", s)),
    }
}
