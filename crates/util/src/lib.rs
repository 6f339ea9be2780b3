//! Text layout, styling and settings helpers shared by the paramcheck crates.

pub mod colours;
pub mod html;
pub mod path_processing;
pub mod settings;
pub mod text_layout;

pub use colours::LogColours;
pub use html::{escape_html, unescape_html};
pub use path_processing::expand_tilde;
pub use settings::{DEFAULT_LINE_WIDTH, Settings, SettingsError};
pub use text_layout::{dashed_line, pad_right, wrap_words};
