use std::io::Write;

use crate::adapters::output::{header_for, tabular_output, write_output};
use crate::config::settings::OutputConfig;
use crate::domain::model::TabularRecord;
use crate::utils::error::Result;

/// Render `values` according to `config` and write them to the configured target.
pub fn write_listing<T: TabularRecord>(
    values: &[T],
    config: &OutputConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    tracing::info!("Generating output");
    let header = header_for::<T>(&config.fields);
    let output = tabular_output(values, &header)?;

    tracing::info!("Writing output");
    let mut writer = config.target.open(stdout)?;
    write_output(&output, &mut *writer, config.format, config.delimiter)?;
    writer.flush()?;

    tracing::info!("All done. Have a nice day!");
    Ok(())
}
