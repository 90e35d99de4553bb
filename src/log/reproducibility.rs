/// Reproducibility logging system
///
/// Every operation applied to a data table is recorded with:
/// - Timestamp
/// - Operation description
/// - The operation itself as a JSON pipeline step
/// - Sequential order
///
/// The log can be exported as:
/// - Human-readable text
/// - JSON
/// - A pipeline file that replays the recorded steps

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::pipeline::config::PipelineConfig;
use crate::pipeline::processing::ProcessingOp;

/// A single log entry representing one operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential operation number (1-based)
    pub sequence: usize,
    pub timestamp: DateTime<Local>,
    pub operation: String,
    pub description: String,
    /// JSON form of the pipeline step, empty for I/O and other non-replayable entries
    pub command: String,
}

impl LogEntry {
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}\n      Step: {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.description,
            if self.command.is_empty() {
                "(n/a)"
            } else {
                self.command.as_str()
            }
        )
    }

    /// The recorded pipeline step, if the entry has one.
    pub fn replay_op(&self) -> Option<Result<ProcessingOp, serde_json::Error>> {
        if self.command.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&self.command))
        }
    }
}

/// The reproducibility log, recording all operations in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproLog {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    pub source_file: String,
    pub software_version: String,
    pub entries: Vec<LogEntry>,
}

impl ReproLog {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source_file: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.source_file = source.to_string();
    }

    /// Add an operation to the log
    pub fn add_entry(&mut self, operation: &str, description: &str, command: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            description: description.to_string(),
            command: command.to_string(),
        });
        log::info!("[LOG {:03}] {}: {}", seq, operation, description);
    }

    /// Records a pipeline step together with its replayable JSON form.
    pub fn add_op(&mut self, op: &ProcessingOp, description: &str) {
        let command = serde_json::to_string(op).unwrap_or_default();
        self.add_entry(&op.to_string(), description, &command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("  NSL Workbench Reproducibility Log\n");
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Source:      {}\n", self.source_file));
        out.push_str(&format!("  Software:    nsl-workbench v{}\n", self.software_version));
        out.push_str(&format!("  Operations:  {}\n", self.entries.len()));
        out.push_str("───────────────────────────────────────────────────────────────\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push_str("\n\n");
        }

        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!(
            "  Log exported: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// Rebuilds a pipeline from the recorded steps, keeping the column
    /// selection and x-scale of `base`.
    pub fn to_pipeline(&self, base: &PipelineConfig) -> Result<PipelineConfig, serde_json::Error> {
        let operations = self
            .entries
            .iter()
            .filter_map(LogEntry::replay_op)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PipelineConfig {
            operations,
            ..base.clone()
        })
    }

    pub fn save_text(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_text())
    }

    pub fn save_json(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_json())
    }

    /// Save the replayable pipeline
    pub fn save_pipeline(&self, path: &Path, base: &PipelineConfig) -> io::Result<()> {
        let config = self.to_pipeline(base)?;
        config.save(path)
    }
}

impl Default for ReproLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsl_core::{HilbertResultType, WindowType};

    #[test]
    fn test_log_creation_and_entries() {
        let mut log = ReproLog::new();
        assert!(log.is_empty());

        log.add_entry("Load", "input.dat (3 columns)", "");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].sequence, 1);
        assert_eq!(log.entries[0].operation, "Load");

        log.add_op(&ProcessingOp::Window { window: WindowType::Hann }, "64 samples");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries[1].sequence, 2);
        assert!(log.entries[1].command.contains("\"op\":\"window\""));
    }

    #[test]
    fn test_text_export() {
        let mut log = ReproLog::new();
        log.set_source("trace.dat");
        log.add_op(
            &ProcessingOp::Hilbert {
                result: HilbertResultType::Envelope,
            },
            "128 samples",
        );
        let text = log.to_text();
        assert!(text.contains("trace.dat"));
        assert!(text.contains("128 samples"));
        assert!(text.contains("\"result\":\"envelope\""));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = ReproLog::new();
        log.add_entry("Test", "test desc", "");
        let json = log.to_json();
        let parsed: ReproLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.session_id, log.session_id);
    }

    #[test]
    fn test_pipeline_replay_skips_io_entries() {
        let mut log = ReproLog::new();
        log.add_entry("Load", "input.dat", "");
        let ops = vec![
            ProcessingOp::Window { window: WindowType::Welch },
            ProcessingOp::Hilbert {
                result: HilbertResultType::Imag,
            },
        ];
        for op in &ops {
            log.add_op(op, "");
        }
        log.add_entry("Save", "out.dat", "");

        let base = PipelineConfig {
            y_column: 2,
            ..PipelineConfig::default()
        };
        let replay = log.to_pipeline(&base).unwrap();
        assert_eq!(replay.operations, ops);
        assert_eq!(replay.y_column, 2);
    }
}
