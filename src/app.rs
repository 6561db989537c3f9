//! Application module: the session controller and the view model it
//! projects for the TUI.
//!
//! `app::model` holds the plain state types, `app::session` the command
//! dispatch and `app::view` the per-frame projection.

mod model;
mod session;
mod view;

pub use model::*;
pub use session::{Command, Session, SessionOptions};
pub use view::{InfoLine, ProgressView, SessionView, format_clock};
