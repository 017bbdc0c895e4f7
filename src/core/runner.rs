use std::io::Write;

use crate::adapters::http::HttpVarfishClient;
use crate::app::commands::{case, project, varannos};
use crate::config::settings::GlobalConfig;
use crate::config::toml_config::{default_config_path, TomlConfig};
use crate::config::{CaseCommand, Cli, Commands, ProjectCommand, VarannosCommand};
use crate::domain::ports::VarfishApi;
use crate::utils::error::{ErrorSeverity, Result, VarfishError};
use crate::utils::validation::Validate;

/// Dispatches parsed commands to their implementation against a [`VarfishApi`].
pub struct CommandRunner<A: VarfishApi> {
    api: A,
}

impl<A: VarfishApi> CommandRunner<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run(&self, command: &Commands, stdout: &mut dyn Write) -> Result<()> {
        tracing::debug!("Running command: {:?}", command);

        match command {
            Commands::Project(ProjectCommand::List { output }) => {
                project::list(&self.api, output.to_config()?, stdout).await
            }

            Commands::Case(CaseCommand::List {
                project_uuid,
                output,
            }) => case::list(&self.api, *project_uuid, output.to_config()?, stdout).await,
            Commands::Case(CaseCommand::Retrieve { case_uuid }) => {
                case::retrieve(&self.api, *case_uuid, stdout).await
            }
            Commands::Case(CaseCommand::ListImportInfo {
                project_uuid,
                output,
            }) => {
                case::list_import_info(&self.api, *project_uuid, output.to_config()?, stdout).await
            }
            Commands::Case(CaseCommand::SmallVarQueryList { case_uuid, output }) => {
                case::small_var_query_list(&self.api, *case_uuid, output.to_config()?, stdout)
                    .await
            }
            Commands::Case(CaseCommand::SmallVarQueryCreate {
                case_uuid,
                query_settings,
                name,
                public,
            }) => {
                case::small_var_query_create(
                    &self.api,
                    *case_uuid,
                    query_settings,
                    name.clone(),
                    *public,
                    stdout,
                )
                .await
            }
            Commands::Case(CaseCommand::SmallVarQueryStatus { query_uuid }) => {
                case::small_var_query_status(&self.api, *query_uuid, stdout).await
            }
            Commands::Case(CaseCommand::SmallVarQueryFetchResults { query_uuid }) => {
                case::small_var_query_fetch_results(&self.api, *query_uuid, stdout).await
            }
            Commands::Case(CaseCommand::SmallVarQuerySettingsShortcut { case_uuid, presets }) => {
                case::small_var_query_settings_shortcut(&self.api, *case_uuid, presets, stdout)
                    .await
            }

            Commands::Varannos(VarannosCommand::VarannosetList {
                project_uuid,
                output,
            }) => {
                varannos::varannoset_list(&self.api, *project_uuid, output.to_config()?, stdout)
                    .await
            }
            Commands::Varannos(VarannosCommand::VarannosetRetrieve { varannoset_uuid }) => {
                varannos::varannoset_retrieve(&self.api, *varannoset_uuid, stdout).await
            }
            Commands::Varannos(VarannosCommand::VarannosetentryList {
                varannoset_uuid,
                output,
            }) => {
                varannos::varannosetentry_list(
                    &self.api,
                    *varannoset_uuid,
                    output.to_config()?,
                    stdout,
                )
                .await
            }
        }
    }
}

/// Load the TOML file, resolve and validate the connection settings, then run the command.
pub async fn run_cli(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let toml_config = match cli.global.config.clone().or_else(default_config_path) {
        Some(path) => TomlConfig::load_optional(path)?,
        None => TomlConfig::default(),
    };

    let global_config = GlobalConfig::resolve(&cli.global.overrides(), &toml_config)?;
    global_config.validate()?;
    tracing::info!("Global configuration: {:?}", global_config);

    let runner = CommandRunner::new(HttpVarfishClient::new(&global_config)?);
    runner.run(&cli.command, stdout).await
}

/// Process exit code for a failed run.
pub fn exit_code(error: &VarfishError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
