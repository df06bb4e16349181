pub mod json;

pub use json::{ReportError, update_json};
