pub mod config;
pub mod processing;

use nsl_core::NslResult;

use crate::log::reproducibility::ReproLog;
use config::PipelineConfig;
use processing::Signal;

/// Runs every operation of `config` on `signal` in order, stopping at the first failure.
pub fn execute(signal: &mut Signal, config: &PipelineConfig, log: &mut ReproLog) -> NslResult<()> {
    for (i, op) in config.operations.iter().enumerate() {
        processing::apply(op, signal, config.x_scale, log).map_err(|e| {
            log::error!("Step {} ({}) failed: {}", i + 1, op, e);
            e
        })?;
    }
    Ok(())
}
