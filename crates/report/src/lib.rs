//! Text and HTML renderings of schemas, summaries and validation outcomes.
//!
//! Every renderer takes [`RenderOptions`](paramcheck_types::RenderOptions)
//! explicitly; monochrome output contains no escape sequences.

pub mod help;
pub mod summary;
pub mod validation;

pub use help::{HelpRequest, render_help, render_parameter};
pub use summary::{ReportError, ReportFragment, parse_fragment, render_summary_fragment, render_summary_text};
pub use validation::{render_errors, render_warnings};
