//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders a `SessionView` with `ratatui`; it holds no state of its own.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{InfoLine, PlaybackState, ProgressView, SessionView};
use crate::config::{ControlsSettings, UiSettings};

fn accent() -> Style {
    Style::default().fg(Color::Green)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(accent())
        .title(Span::styled(title, accent()))
}

fn info_item(line: &InfoLine) -> ListItem<'_> {
    match line {
        InfoLine::Field { label, value } => ListItem::new(Line::from(vec![
            Span::styled(format!("{label}:"), accent()),
            Span::raw(format!(" {value}")),
        ])),
        InfoLine::Text(text) => ListItem::new(text.as_str()),
        InfoLine::Error(msg) => ListItem::new(Line::from(vec![
            Span::styled("Error:", Style::default().fg(Color::Red)),
            Span::raw(format!(" {msg}")),
        ])),
    }
}

fn progress_gauge(progress: &ProgressView) -> Gauge<'_> {
    let bg = match progress.state {
        PlaybackState::Playing => Color::Green,
        PlaybackState::Paused => Color::Yellow,
        PlaybackState::Stopped => Color::Red,
    };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            progress.state.label(),
            Style::default().fg(Color::Black).bg(bg),
        )))
        .gauge_style(Style::default().fg(Color::White))
        .percent(progress.percent.min(100))
        .label(progress.label.as_str())
}

fn volume_gauge(volume: u8) -> Gauge<'static> {
    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Volume", accent())),
        )
        .gauge_style(Style::default().fg(Color::White))
        .percent(u16::from(volume.min(100)))
}

/// Key legend; the seek labels follow the configured step.
fn controls_line(seek_seconds: u64) -> Line<'static> {
    let forward = format!("+{seek_seconds}s");
    let back = format!("-{seek_seconds}s");
    let controls: [(&str, String); 10] = [
        (" Enter ", "Select".into()),
        (" p ", "Play/Pause".into()),
        ("Esc", "Stop".into()),
        (" r ", "Random".into()),
        (" s ", "Single".into()),
        ("Right", forward),
        ("Left", back),
        (" + ", "+Volume".into()),
        (" - ", "-Volume".into()),
        (" q ", "Exit".into()),
    ];
    let spans: Vec<Span> = controls
        .into_iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(key, Style::default().fg(Color::Black).bg(Color::White)),
                Span::styled(action, Style::default().fg(Color::Black).bg(Color::Green)),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn split_main(area: Rect, show_controls: bool) -> (Rect, Option<Rect>) {
    if !show_controls {
        return (area, None);
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(90), Constraint::Percentage(10)])
        .split(area);
    (rows[0], Some(rows[1]))
}

/// Render the entire UI into `frame` from the session's view model.
pub fn draw(
    frame: &mut Frame,
    view: &SessionView,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let (main, controls) = split_main(frame.area(), ui_settings.show_controls);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(80),
            Constraint::Percentage(10),
            Constraint::Percentage(10),
        ])
        .split(cols[0]);

    let info = List::new(view.info.iter().map(info_item)).block(panel("Song info"));
    frame.render_widget(info, left[0]);
    frame.render_widget(progress_gauge(&view.progress), left[1]);
    frame.render_widget(volume_gauge(view.volume), left[2]);

    let items: Vec<ListItem> = view
        .playlist
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if view.now_playing == Some(i) {
                ListItem::new(Line::from(vec![Span::styled(*name, accent())]))
            } else {
                ListItem::new(*name)
            }
        })
        .collect();
    let playlist = List::new(items)
        .block(panel(&ui_settings.playlist_title))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Green));
    let mut state = ListState::default();
    if !view.playlist.is_empty() {
        state.select(Some(view.cursor.min(view.playlist.len() - 1)));
    }
    frame.render_stateful_widget(playlist, cols[1], &mut state);

    if let Some(area) = controls {
        let footer = Paragraph::new(controls_line(controls_settings.seek_seconds)).wrap(Wrap { trim: true });
        frame.render_widget(footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draw_renders_panels_and_labels() {
        let view = SessionView {
            info: vec![
                InfoLine::Text("No song info".to_string()),
                InfoLine::Error("seek failed".to_string()),
            ],
            progress: ProgressView {
                state: PlaybackState::Paused,
                percent: 50,
                label: "0:45 / 1:30".to_string(),
            },
            volume: 80,
            playlist: vec!["[1] a.mp3", "[2] b.flac"],
            cursor: 1,
            now_playing: Some(0),
        };

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| {
                draw(
                    f,
                    &view,
                    &UiSettings::default(),
                    &ControlsSettings::default(),
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        for needle in [
            "Song info",
            "No song info",
            "Error: seek failed",
            "Paused",
            "0:45 / 1:30",
            "Volume",
            "Playlist",
            "[2] b.flac",
            "Play/Pause",
            "+10s",
        ] {
            assert!(text.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn draw_tolerates_empty_playlist_and_hidden_controls() {
        let view = SessionView {
            info: Vec::new(),
            progress: ProgressView {
                state: PlaybackState::Stopped,
                percent: 0,
                label: "0:00 / 0:00".to_string(),
            },
            volume: 0,
            playlist: Vec::new(),
            cursor: 3,
            now_playing: None,
        };
        let settings = UiSettings {
            show_controls: false,
            ..UiSettings::default()
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| draw(f, &view, &settings, &ControlsSettings::default()))
            .unwrap();
        assert!(!buffer_text(&terminal).contains("Play/Pause"));
    }
}
