//! Output formatting for human and JSON modes
//!
//! Command results go to stdout, rendered either as human-readable text or
//! machine-parseable JSON. Log records never share this stream.

use serde::Serialize;
use serde_json::Value;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Outcome of an update command
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Project the update targeted
    pub project_id: u64,
    /// Human-readable message
    pub message: String,
}

/// A fetched project document
#[derive(Debug, Serialize)]
pub struct ProjectResult {
    /// Requested project id
    pub project_id: u64,
    /// The project as returned by the server
    pub project: Value,
}

/// Result of a form field lookup
#[derive(Debug, Serialize)]
pub struct FieldValueResult {
    /// Form title searched for
    pub form: String,
    /// Field label searched for
    pub field: String,
    /// Field value, `None` when the form or field is missing
    pub value: Option<String>,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl ProjectResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Project {}", self.project_id);
        if let Some(name) = self.project.get("name").and_then(Value::as_str) {
            println!("  Name:   {name}");
        }
        if let Some(status) = self.project.pointer("/status/current").and_then(Value::as_str) {
            println!("  Status: {status}");
        }
        let forms = self
            .project
            .get("dataForms")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        println!("  Forms:  {forms}");
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl FieldValueResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if let Some(value) = &self.value {
                    println!("{value}");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
