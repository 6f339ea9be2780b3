//! Shared type definitions for pipeline parameter validation and reporting.
//!
//! These types are consumed by the engine (schema loading, cleaning,
//! validation, summary building) and by the report renderers. They carry no
//! behaviour beyond small conversions so every consumer sees the same data
//! model.

pub mod diagnostic;
pub mod schema;
pub mod summary;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticKind, ValidationOutcome};
pub use schema::{ParamSpec, ParamType, SchemaGroup};
pub use summary::{CORE_OPTIONS_GROUP, ParamsSummary, SummaryEntry, WorkflowIdentity};
pub use value::{ByteSize, ParamValue, ParamValueError, ParameterMap, format_duration};

use serde::{Deserialize, Serialize};

/// Styling switches passed explicitly to every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// When true every colour token renders as an empty string.
    pub monochrome: bool,
}

impl RenderOptions {
    pub fn monochrome() -> Self {
        Self { monochrome: true }
    }
}
