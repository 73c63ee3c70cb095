//! CLI command handlers. Each command is in its own file.

mod completions;
mod tables;
mod upload;
mod view;

pub use completions::run_completions;
pub use tables::run_tables;
pub use upload::run_upload;
pub use view::run_view;
