use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Command, NextPolicy, Session};
use crate::audio::PlaybackEngine;
use crate::config::{ControlsSettings, Settings};
use crate::error::AppError;
use crate::ui;

use super::terminal::Tui;

/// Period of the position timer.
pub const TICK: Duration = Duration::from_secs(1);

/// Deadline of the tick after the one due at `due`. A deadline already
/// missed by a full period restarts from `now` instead of firing a burst.
pub fn next_deadline(due: Instant, now: Instant) -> Instant {
    let next = due + TICK;
    if next <= now { now + TICK } else { next }
}

/// What a key press asks the loop to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Translate a key press into an `Input`; unbound keys yield `None`.
pub fn map_key(key: KeyEvent, controls: &ControlsSettings) -> Option<Input> {
    let seek = i64::try_from(controls.seek_seconds).unwrap_or(i64::MAX);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Quit),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Char('q') => return Some(Input::Quit),
        KeyCode::Enter => Command::SelectHighlighted,
        KeyCode::Char('p') => Command::TogglePlayPause,
        KeyCode::Esc => Command::Stop,
        KeyCode::Up => Command::CursorUp,
        KeyCode::Down => Command::CursorDown,
        KeyCode::Left => Command::SeekBy(-seek),
        KeyCode::Right => Command::SeekBy(seek),
        KeyCode::Char('r') => Command::TogglePolicy(NextPolicy::Random),
        KeyCode::Char('s') => Command::TogglePolicy(NextPolicy::Single),
        KeyCode::Char('+' | '=') => Command::VolumeUp,
        KeyCode::Char('-' | '_') => Command::VolumeDown,
        _ => return None,
    };
    Some(Input::Command(cmd))
}

/// Main terminal event loop: redraw, then wait for either a key press or the
/// next tick and dispatch exactly one command. Returns `Ok(())` on quit.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Tui,
    settings: &Settings,
    session: &mut Session<'_, E>,
) -> Result<(), AppError> {
    let mut next_tick = Instant::now() + TICK;

    loop {
        let view = session.view();
        terminal.draw(|f| ui::draw(f, &view, &settings.ui, &settings.controls))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            // Resize and other events fall through to the redraw at the top.
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match map_key(key, &settings.controls) {
                    Some(Input::Quit) => break,
                    Some(Input::Command(cmd)) => session.dispatch(cmd),
                    None => {}
                }
            }
        } else {
            session.dispatch(Command::Tick);
            next_tick = next_deadline(next_tick, Instant::now());
        }
    }

    tracing::info!("quit requested");
    Ok(())
}
