use std::path::Path;

use crate::app::{Session, SessionOptions};
use crate::audio::RodioEngine;
use crate::error::AppError;
use crate::library;
use crate::logging;

mod event_loop;
mod settings;
mod terminal;

use terminal::TerminalGuard;

/// Build the catalog, start the session and run the interactive loop.
///
/// Every failure before the loop starts is returned before the terminal is touched.
pub fn run(input: &Path) -> Result<(), AppError> {
    let settings = settings::load_settings();
    logging::init(&settings.log);

    let root = std::path::absolute(input).map_err(|source| AppError::InvalidPath {
        path: input.to_path_buf(),
        source,
    })?;

    let catalog = library::scan(&root, &settings.library)?;
    if catalog.is_empty() {
        return Err(AppError::NoSongs(root));
    }
    tracing::info!(root = %catalog.root().display(), tracks = catalog.len(), "starting session");

    let mut session = Session::new(
        &catalog,
        RodioEngine::new(),
        SessionOptions::from(&settings),
    );

    let mut guard = TerminalGuard::acquire().map_err(AppError::Terminal)?;
    let result = event_loop::run(guard.terminal_mut(), &settings, &mut session);

    // Audio goes first, then the terminal is handed back.
    session.shutdown();
    drop(guard);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "session ended with an error");
    }
    result
}
