use std::io::Write;

use crate::app::commands::common::write_listing;
use crate::config::settings::OutputConfig;
use crate::domain::ports::VarfishApi;
use crate::utils::error::Result;

const TABLE_FIELDS: &[&str] = &["sodar_uuid", "title", "type", "parent"];

pub async fn list<A: VarfishApi + ?Sized>(
    api: &A,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing projects");
    let projects = api.project_list().await?;
    tracing::debug!("Received {} projects", projects.len());

    write_listing(&projects, &output, stdout)
}
