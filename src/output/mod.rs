/// Result renderers - Gateway
mod json;
mod text;

pub use json::render_json;
pub use text::render_text;
