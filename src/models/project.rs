//! Partial project documents
//!
//! The server applies partial-update semantics: only the fields present in a
//! [`ProjectPatch`] are modified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DataForm;

/// Project status block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatus {
    /// Name of the status (workflow event) the project moves to
    pub current: String,
}

/// A project code attached to a project
///
/// Only `value` is interpreted here; any other attributes the server knows
/// about are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCode {
    /// Code value
    pub value: String,

    /// Remaining attributes (module, type, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ProjectCode {
    /// Create a code with only a value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attributes: Map::new(),
        }
    }
}

/// A partial project document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPatch {
    /// Id of the project being updated
    pub id: u64,

    /// New status, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,

    /// Forms to replace
    #[serde(rename = "dataForms", skip_serializing_if = "Option::is_none")]
    pub data_forms: Option<Vec<DataForm>>,

    /// Project codes to attach
    #[serde(rename = "projectCodes", skip_serializing_if = "Option::is_none")]
    pub project_codes: Option<Vec<ProjectCode>>,

    /// Any other top-level project fields
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ProjectPatch {
    /// A patch that touches nothing but identifies the project
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            status: None,
            data_forms: None,
            project_codes: None,
            other: Map::new(),
        }
    }

    /// Set the project's current status
    #[must_use]
    pub fn with_status(mut self, current: impl Into<String>) -> Self {
        self.status = Some(ProjectStatus {
            current: current.into(),
        });
        self
    }

    /// Replace a single data form
    #[must_use]
    pub fn with_form(mut self, form: DataForm) -> Self {
        self.data_forms = Some(vec![form]);
        self
    }

    /// Attach project codes
    #[must_use]
    pub fn with_codes(mut self, codes: Vec<ProjectCode>) -> Self {
        self.project_codes = Some(codes);
        self
    }

    /// Set an arbitrary top-level field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.other.insert(name.into(), value);
        self
    }
}
