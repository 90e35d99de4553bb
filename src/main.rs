mod app;
mod data;
mod log;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use nsl_core::{DerivOrder, DftResultType, DftXScale, HilbertResultType, WindowType};
use serde::de::DeserializeOwned;

use app::RunOptions;
use data::DataFormat;
use pipeline::config::PipelineConfig;
use pipeline::processing::ProcessingOp;

/// Parses a snake_case tag (`hann`, `norm_db`, ...) the way pipeline files spell it.
fn parse_tag<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|e| e.to_string())
}

fn parse_op(s: &str) -> Result<ProcessingOp, String> {
    serde_json::from_str(s).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(
    name = "nsl",
    version,
    about = "Apply windows, DFT, Hilbert transforms, derivatives and fit models to tabular data"
)]
struct Cli {
    /// Input data file
    #[arg(short, long)]
    input: PathBuf,

    /// Input layout
    #[arg(short, long, value_enum, default_value_t = DataFormat::Ascii)]
    format: DataFormat,

    /// Number of columns per record of binary input
    #[arg(long, default_value_t = 2)]
    columns: usize,

    /// Pipeline file (JSON); its steps run before any given on the command line
    #[arg(short, long)]
    pipeline: Option<PathBuf>,

    /// x column (0-based), overrides the pipeline file
    #[arg(short = 'x', long)]
    x_column: Option<usize>,

    /// y column (0-based), overrides the pipeline file
    #[arg(short = 'y', long)]
    y_column: Option<usize>,

    /// Error column (0-based) for weighted parameter derivatives
    #[arg(long)]
    error_column: Option<usize>,

    /// DFT abscissa: frequency, index or period
    #[arg(long, value_parser = parse_tag::<DftXScale>)]
    x_scale: Option<DftXScale>,

    /// Extra step as JSON, e.g. '{"op":"hilbert","result":"envelope"}' (repeatable)
    #[arg(long = "op", value_parser = parse_op)]
    ops: Vec<ProcessingOp>,

    /// Shortcut: apply a window (runs first among the shortcuts)
    #[arg(long, value_parser = parse_tag::<WindowType>)]
    window: Option<WindowType>,

    /// Shortcut: differentiate with the default accuracy
    #[arg(long, value_parser = parse_tag::<DerivOrder>)]
    derivative: Option<DerivOrder>,

    /// Shortcut: Hilbert transform (imag or envelope)
    #[arg(long, value_parser = parse_tag::<HilbertResultType>)]
    hilbert: Option<HilbertResultType>,

    /// Shortcut: one-sided DFT with the given result (runs last)
    #[arg(long, value_parser = parse_tag::<DftResultType>)]
    dft: Option<DftResultType>,

    /// Output file (or - for stdout)
    #[arg(short, long, default_value = "-")]
    out: String,

    /// Output layout
    #[arg(long, value_enum, default_value_t = DataFormat::Ascii)]
    out_format: DataFormat,

    /// Write the reproducibility log as text
    #[arg(long)]
    log_text: Option<PathBuf>,

    /// Write the reproducibility log as JSON
    #[arg(long)]
    log_json: Option<PathBuf>,

    /// Write a pipeline file replaying this run
    #[arg(long)]
    save_pipeline: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    verb: bool,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig, app::AppError> {
        let mut config = match &self.pipeline {
            Some(path) => app::load_pipeline(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(c) = self.x_column {
            config.x_column = c;
        }
        if let Some(c) = self.y_column {
            config.y_column = c;
        }
        if self.error_column.is_some() {
            config.error_column = self.error_column;
        }
        if let Some(scale) = self.x_scale {
            config.x_scale = scale;
        }

        config.operations.extend(self.ops.iter().cloned());
        if let Some(window) = self.window {
            config.operations.push(ProcessingOp::Window { window });
        }
        if let Some(order) = self.derivative {
            config.operations.push(ProcessingOp::Differentiate { order, accuracy: None });
        }
        if let Some(result) = self.hilbert {
            config.operations.push(ProcessingOp::Hilbert { result });
        }
        if let Some(result) = self.dft {
            config.operations.push(ProcessingOp::Dft {
                result,
                two_sided: false,
                shifted: false,
                window: WindowType::Uniform,
            });
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    ::log::info!("Starting nsl-workbench v{}", env!("CARGO_PKG_VERSION"));

    let opts = RunOptions {
        input: cli.input.clone(),
        format: cli.format,
        columns: cli.columns,
        config: cli.pipeline_config()?,
        output: cli.out.clone(),
        output_format: cli.out_format,
        log_text: cli.log_text.clone(),
        log_json: cli.log_json.clone(),
        save_pipeline: cli.save_pipeline.clone(),
    };
    if opts.config.operations.is_empty() {
        ::log::warn!("No operations given; the selected columns are copied unchanged");
    }

    if cli.verb {
        eprintln!("Pipeline:\n{}", opts.config.to_json());
    }

    let summary = app::run(&opts)?;

    if cli.verb {
        eprintln!(
            "Processed {} rows -> {} rows with {} operations.",
            summary.rows_in, summary.rows_out, summary.operations
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(parse_tag::<WindowType>("blackman_harris"), Ok(WindowType::BlackmanHarris));
        assert_eq!(parse_tag::<DftResultType>("norm_db"), Ok(DftResultType::NormDb));
        assert!(parse_tag::<WindowType>("kaiser").is_err());
    }

    #[test]
    fn test_shortcuts_follow_json_steps() {
        let cli = Cli::parse_from([
            "nsl",
            "-i",
            "in.dat",
            "--op",
            r#"{"op":"differentiate","order":"second","accuracy":2}"#,
            "--dft",
            "amplitude",
            "--window",
            "hann",
            "-y",
            "2",
        ]);
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.y_column, 2);
        assert_eq!(
            config.operations,
            vec![
                ProcessingOp::Differentiate {
                    order: DerivOrder::Second,
                    accuracy: Some(2)
                },
                ProcessingOp::Window {
                    window: WindowType::Hann
                },
                ProcessingOp::Dft {
                    result: DftResultType::Amplitude,
                    two_sided: false,
                    shifted: false,
                    window: WindowType::Uniform
                },
            ]
        );
    }
}
