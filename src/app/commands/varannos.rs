use std::io::Write;
use uuid::Uuid;

use crate::adapters::output::write_json;
use crate::app::commands::common::write_listing;
use crate::config::settings::OutputConfig;
use crate::domain::ports::VarfishApi;
use crate::utils::error::Result;

const VARANNOSET_TABLE_FIELDS: &[&str] = &["sodar_uuid", "date_modified", "title", "release"];

const VARANNOSETENTRY_TABLE_FIELDS: &[&str] = &[
    "sodar_uuid",
    "date_modified",
    "varannoset",
    "release",
    "chromosome",
    "start",
    "reference",
    "alternative",
    "payload",
];

pub async fn varannoset_list<A: VarfishApi + ?Sized>(
    api: &A,
    project_uuid: Uuid,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(VARANNOSET_TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing VarAnnoSets");
    let sets = api.varannoset_list(project_uuid).await?;
    write_listing(&sets, &output, stdout)
}

pub async fn varannoset_retrieve<A: VarfishApi + ?Sized>(
    api: &A,
    varannoset_uuid: Uuid,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!("Configuration: varannoset_uuid={}", varannoset_uuid);
    tracing::info!("Retrieving VarAnnoSet {}", varannoset_uuid);
    let set = api.varannoset_retrieve(varannoset_uuid).await?;
    write_json(stdout, &set)
}

pub async fn varannosetentry_list<A: VarfishApi + ?Sized>(
    api: &A,
    varannoset_uuid: Uuid,
    output: OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output = output.with_default_fields(VARANNOSETENTRY_TABLE_FIELDS);
    tracing::info!("Configuration: {:?}", output);

    tracing::info!("Listing VarAnnoSetEntrys");
    let entries = api.varannosetentry_list(varannoset_uuid).await?;
    write_listing(&entries, &output, stdout)
}
