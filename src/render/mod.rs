//! Rendering of report tables to JSON and Markdown.

mod json;
mod markdown;
mod options;

pub use json::{to_json, to_json_value, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
