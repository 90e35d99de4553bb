//! Pipeline files: column selection plus an ordered list of operations.

use nsl_core::DftXScale;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use super::processing::ProcessingOp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub x_column: usize,
    pub y_column: usize,
    /// Error column used by weighted parameter derivatives
    pub error_column: Option<usize>,
    /// Only rows with x inside this range are processed
    pub x_range: Option<(f64, f64)>,
    /// Abscissa of DFT output
    pub x_scale: DftXScale,
    pub operations: Vec<ProcessingOp>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            x_column: 0,
            y_column: 1,
            error_column: None,
            x_range: None,
            x_scale: DftXScale::Frequency,
            operations: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsl_core::{DerivOrder, WindowType};

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = PipelineConfig::from_json(r#"{"operations":[{"op":"window","window":"triangle_ii"}]}"#).unwrap();
        assert_eq!(config.x_column, 0);
        assert_eq!(config.y_column, 1);
        assert_eq!(config.x_scale, DftXScale::Frequency);
        assert_eq!(
            config.operations,
            vec![ProcessingOp::Window {
                window: WindowType::TriangleII
            }]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PipelineConfig {
            y_column: 3,
            x_range: Some((-1.0, 2.5)),
            x_scale: DftXScale::Period,
            operations: vec![ProcessingOp::Differentiate {
                order: DerivOrder::Fourth,
                accuracy: Some(3),
            }],
            ..PipelineConfig::default()
        };
        let back = PipelineConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(PipelineConfig::from_json(r#"{"operations":[{"op":"phase"}]}"#).is_err());
    }
}
