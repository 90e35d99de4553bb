/// Batch application driver
///
/// Ties together all subsystems: data loading, the processing pipeline,
/// output and the reproducibility log.

use std::io;
use std::path::PathBuf;

use nsl_core::NslError;
use thiserror::Error;

use crate::data::{self, DataError, DataFormat, DataTable};
use crate::log::reproducibility::ReproLog;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::processing::Signal;
use crate::pipeline;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Processing error: {0}")]
    Numeric(#[from] NslError),

    #[error("Pipeline file error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Everything one batch run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub format: DataFormat,
    /// Column count of binary input
    pub columns: usize,
    pub config: PipelineConfig,
    /// Output path, `-` for stdout
    pub output: String,
    pub output_format: DataFormat,
    pub log_text: Option<PathBuf>,
    pub log_json: Option<PathBuf>,
    pub save_pipeline: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub operations: usize,
}

/// Reads a pipeline file.
pub fn load_pipeline(path: &std::path::Path) -> Result<PipelineConfig, AppError> {
    let text = std::fs::read_to_string(path)?;
    let config = PipelineConfig::from_json(&text)?;
    log::info!(
        "Pipeline {}: {} operations",
        path.display(),
        config.operations.len()
    );
    Ok(config)
}

/// Runs the pipeline over the selected columns of `table`.
pub fn process_table(table: &DataTable, config: &PipelineConfig, log: &mut ReproLog) -> Result<DataTable, AppError> {
    let mut signal = Signal::from_table(
        table,
        config.x_column,
        config.y_column,
        config.error_column,
        config.x_range,
    )?;
    log.add_entry(
        "Select",
        &format!(
            "x = '{}', y = '{}', {} of {} rows",
            signal.x_name,
            signal.y_name,
            signal.len(),
            table.row_count()
        ),
        "",
    );
    pipeline::execute(&mut signal, config, log)?;
    Ok(signal.into_table())
}

/// Load, process, write and export the log.
pub fn run(opts: &RunOptions) -> Result<RunSummary, AppError> {
    let mut log = ReproLog::new();
    log.set_source(&opts.input.display().to_string());

    let table = data::load(&opts.input, opts.format, opts.columns)?;
    log.add_entry(
        "Load",
        &format!(
            "{} ({:?}, {} rows x {} columns)",
            opts.input.display(),
            opts.format,
            table.row_count(),
            table.column_count()
        ),
        "",
    );

    let result = process_table(&table, &opts.config, &mut log)?;

    data::save(&opts.output, &result, opts.output_format)?;
    log.add_entry(
        "Save",
        &format!("{} ({:?}, {} rows)", opts.output, opts.output_format, result.row_count()),
        "",
    );

    if let Some(path) = &opts.log_text {
        log.save_text(path)?;
    }
    if let Some(path) = &opts.log_json {
        log.save_json(path)?;
    }
    if let Some(path) = &opts.save_pipeline {
        log.save_pipeline(path, &opts.config)?;
    }

    Ok(RunSummary {
        rows_in: table.row_count(),
        rows_out: result.row_count(),
        operations: opts.config.operations.len(),
    })
}
