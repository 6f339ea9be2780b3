//! # Paramcheck Engine
//!
//! Loads grouped parameter schemas, validates user-supplied pipeline
//! parameters against them and computes the default-versus-supplied diff used
//! by run summaries.
//!
//! ## Usage
//!
//! ```rust
//! use paramcheck_engine::{JsonSchemaEngine, ParameterValidator, SchemaModel};
//! use paramcheck_types::{ParamValue, ParameterMap};
//! use serde_json::json;
//!
//! let schema = SchemaModel::from_document(json!({
//!     "definitions": {
//!         "input_output_options": {
//!             "title": "Input/output options",
//!             "properties": { "outdir": { "type": "string", "default": "./results" } }
//!         }
//!     }
//! }))?;
//!
//! let mut params = ParameterMap::new();
//! params.insert("outdir".into(), ParamValue::from("./out"));
//! params.insert("gamma".into(), ParamValue::Integer(3));
//!
//! let outcome = ParameterValidator::new(&schema, &JsonSchemaEngine).validate(&params)?;
//! assert!(!outcome.has_error);
//! assert_eq!(outcome.unexpected_params, vec!["gamma".to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`schema_model`**: schema loading and flattening
//! - **`cleaner`**: normalisation of the parameter map before validation
//! - **`schema_engine`**: the seam to the JSON-schema validator
//! - **`validator`**: diagnostics, reserved-option and unexpected checks
//! - **`summary_builder`**: the run summary diff

pub mod cleaner;
pub mod reserved;
pub mod schema_engine;
pub mod schema_model;
pub mod summary_builder;
pub mod unexpected;
pub mod validator;

pub use schema_engine::{JsonSchemaEngine, SchemaEngine, ViolationNode};
pub use schema_model::{SchemaLoadError, SchemaModel};
pub use summary_builder::{SUMMARY_BLACKLIST, build_summary, resolve_default};
pub use unexpected::IGNORE_PARAMS_KEY;
pub use validator::{CHOICE_DISPLAY_LIMIT, ParameterValidator, ValidationError, ensure_valid};
