// Forbid accidental stdout/stderr writes in the library portion of the TUI.
#![deny(clippy::print_stdout, clippy::print_stderr)]

mod app;
mod app_event;
mod auth;
mod dropped_path;
mod dual_input;
mod footer;
mod platform_picker;
mod project;
mod text_buffer;
mod tui;

pub use app::App;
pub use app::AppOutcome;
pub use project::GenerateRequest;
pub use tui::RecastTui;
