use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::adapters::output::{write_json, write_titled_json};
use crate::app::commands::common::write_listing;
use crate::config::settings::OutputConfig;
use crate::domain::ports::VarfishApi;
use crate::domain::query_settings::{CaseQuerySettingsV1, CaseQueryV1};
use crate::utils::error::Result;

const CASE_TABLE_FIELDS: &[&str] = &[
    "sodar_uuid",
    "name",
    "index",
    "num_small_vars",
    "num_svs",
    "date_modified",
];

const IMPORT_INFO_TABLE_FIELDS: &[&str] = &[
    "sodar_uuid",
    "name",
    "index",
    "release",
    "state",
    "date_modified",
];

const QUERY_TABLE_FIELDS: &[&str] = &["sodar_uuid", "date_created", "name", "public"];

pub async fn list<A: VarfishApi + ?Sized>(
    api: &A,
    project_uuid: Uuid,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(CASE_TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing cases of project {}", project_uuid);
    let cases = api.case_list(project_uuid).await?;
    write_listing(&cases, &output, stdout)
}

pub async fn retrieve<A: VarfishApi + ?Sized>(
    api: &A,
    case_uuid: Uuid,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!("Configuration: case_uuid={}", case_uuid);
    tracing::info!("Retrieving case {}", case_uuid);
    let case = api.case_retrieve(case_uuid).await?;
    write_json(stdout, &case)
}

pub async fn list_import_info<A: VarfishApi + ?Sized>(
    api: &A,
    project_uuid: Uuid,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(IMPORT_INFO_TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing case import infos of project {}", project_uuid);
    let infos = api.case_import_info_list(project_uuid).await?;
    write_listing(&infos, &output, stdout)
}

pub async fn small_var_query_list<A: VarfishApi + ?Sized>(
    api: &A,
    case_uuid: Uuid,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(QUERY_TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing small variant queries of case {}", case_uuid);
    let queries = api.small_var_query_list(case_uuid).await?;
    write_listing(&queries, &output, stdout)
}

/// Create a query. The settings file is validated before the server is contacted.
pub async fn small_var_query_create<A: VarfishApi + ?Sized>(
    api: &A,
    case_uuid: Uuid,
    settings_path: &Path,
    name: Option<String>,
    public: bool,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!(
        "Configuration: case_uuid={}, query_settings={}, name={:?}, public={}",
        case_uuid,
        settings_path.display(),
        name,
        public
    );
    tracing::info!("Loading query settings from {}", settings_path.display());
    let query_settings = CaseQuerySettingsV1::from_file(settings_path)?;
    let query = CaseQueryV1 {
        name,
        public,
        query_settings: Some(query_settings),
    };

    tracing::info!("Creating small variant query for case {}", case_uuid);
    let created = api.small_var_query_create(case_uuid, &query).await?;
    tracing::info!("Created query {}", created.sodar_uuid);
    write_json(stdout, &created)
}

pub async fn small_var_query_status<A: VarfishApi + ?Sized>(
    api: &A,
    query_uuid: Uuid,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!("Configuration: query_uuid={}", query_uuid);
    tracing::info!("Getting query status");
    let status = api.small_var_query_status(query_uuid).await?;
    write_titled_json(stdout, "Query Status", &status)?;
    stdout.flush()?;
    Ok(())
}

pub async fn small_var_query_fetch_results<A: VarfishApi + ?Sized>(
    api: &A,
    query_uuid: Uuid,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!("Configuration: query_uuid={}", query_uuid);
    tracing::info!("Fetching results");
    let results = api.small_var_query_fetch_results(query_uuid).await?;
    write_titled_json(stdout, "Query Results", &results)?;
    stdout.flush()?;
    Ok(())
}

pub async fn small_var_query_settings_shortcut<A: VarfishApi + ?Sized>(
    api: &A,
    case_uuid: Uuid,
    presets: &[(String, String)],
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!(
        "Configuration: case_uuid={}, presets={:?}",
        case_uuid,
        presets
    );
    tracing::info!("Fetching query settings shortcut");
    let settings = api
        .small_var_query_settings_shortcut(case_uuid, presets)
        .await?;
    write_titled_json(stdout, "Query Settings", &settings)?;
    stdout.flush()?;
    Ok(())
}
