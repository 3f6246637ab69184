//! UI rendering helpers for the terminal user interface.
//!
//! This module renders a `PlaybackSession` with `ratatui`. It never mutates the
//! session; it reports where the interactive panes ended up so mouse gestures
//! can be hit-tested against them.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::audio::AudioOutput;
use crate::config::{ControlsSettings, UiSettings};
use crate::session::{PlaybackSession, PlaybackState};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "select".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("s".to_string(), "stop".to_string());
    map.insert("h/l".to_string(), "swipe prev/next".to_string());
    // H/L is filled dynamically from config.
    map.insert("r".to_string(), "shake".to_string());
    map.insert("click".to_string(), "seek".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Screen areas the runtime hit-tests mouse events against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiLayout {
    pub artwork: Rect,
    pub slider: Rect,
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "enter", "space/p", "s", "h/l", "H/L", "r", "click", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn transport_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "▶ Playing",
        PlaybackState::Paused => "⏸ Paused",
        PlaybackState::Stopped => "■ Stopped",
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw<O: AudioOutput>(
    frame: &mut Frame,
    session: &PlaybackSession<O>,
    cursor: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiLayout {
    let view = session.view();
    let catalog = session.catalog();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" soundbite ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    // Track list
    {
        let items: Vec<ListItem> = catalog
            .iter()
            .enumerate()
            .map(|(i, track)| {
                if i == view.current_index {
                    ListItem::new(format!("♪ {}", track.name)).bold()
                } else {
                    ListItem::new(format!("  {}", track.name))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" sounds "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !catalog.is_empty() {
            state.select(Some(cursor.min(catalog.len() - 1)));
        }
        frame.render_stateful_widget(list, body[0], &mut state);
    }

    // Artwork
    let artwork_block = Block::default()
        .borders(Borders::ALL)
        .title(" artwork ")
        .title_bottom(Line::from(" ◀ swipe ▶ ").centered());
    let artwork_area = artwork_block.inner(body[1]);
    {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(track) = session.current_track() {
            // Vertically center the few lines we draw.
            let pad = artwork_area.height.saturating_sub(4) / 2;
            lines.extend((0..pad).map(|_| Line::default()));

            lines.push(Line::from(track.name.clone()).bold().centered());
            lines.push(Line::default());
            match &track.artwork {
                Some(art) => {
                    lines.push(Line::from(format!("[ {} ]", art.name)).centered());
                    lines.push(
                        Line::from(art.path.display().to_string())
                            .dim()
                            .centered(),
                    );
                }
                None => lines.push(Line::from("no artwork").dim().centered()),
            }
        }
        let artwork = Paragraph::new(lines)
            .block(artwork_block)
            .wrap(Wrap { trim: true });
        frame.render_widget(artwork, body[1]);
    }

    // Slider
    let slider_block = Block::default().borders(Borders::ALL).title(" position ");
    let slider_area = slider_block.inner(chunks[2]);
    let label = match view.loaded {
        Some(_) => format!(
            "{} / {}",
            format_mmss(view.elapsed),
            format_mmss(view.duration)
        ),
        None => "--:-- / --:--".to_string(),
    };
    let gauge = Gauge::default()
        .block(slider_block)
        .gauge_style(Style::default().fg(if view.is_playing() {
            Color::Cyan
        } else {
            Color::Gray
        }))
        .ratio(view.progress())
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Status
    let status = {
        let mut spans: Vec<Span> = vec![
            Span::raw(transport_text(view.state)).bold(),
            Span::raw(" • "),
            Span::raw(format_mmss(view.elapsed)),
        ];
        if let Some(track) = session.current_track() {
            spans.push(Span::raw(format!(
                " • #{} {} ({}/{})",
                track.id,
                track.name,
                view.current_index + 1,
                catalog.len()
            )));
        }
        if let Some(err) = session.last_error() {
            spans.push(Span::raw(" • "));
            spans.push(Span::styled(format!("⚠ {}", err), Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    };
    let status_par = Paragraph::new(status).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[3]);

    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    UiLayout {
        artwork: artwork_area,
        slider: slider_area,
    }
}
