//! UI rendering for the terminal user interface.
//!
//! Reads the browse model and the screen state from the coordinator and
//! draws them with `ratatui`. Nothing here mutates state.

mod cover;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Row,
        Sparkline, Table, TableState, Wrap,
    },
};

use crate::app::{App, Focus};
use crate::config::VisualizerStyle;
use crate::coordinator::Coordinator;
use crate::cover::CoverArt;
use crate::theme::{COMPACT_WIDTH, Theme};
use crate::view::Screen;

use cover::HalfBlocks;

const CONTROLS: [(&str, &str); 12] = [
    ("/", "search"),
    ("enter", "play"),
    ("space", "play/pause"),
    ("s", "stop"),
    ("j/k", "move"),
    ("←/→", "seek"),
    ("[/]", "big seek"),
    ("-/=", "volume"),
    ("a", "auto-continue"),
    ("n", "normalize"),
    ("d", "device"),
    ("t", "theme"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .chain(std::iter::once("[q] quit".to_string()))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// First lyric row to show so the highlighted line sits mid-pane.
fn lyric_scroll(highlighted: Option<usize>, height: u16) -> u16 {
    let half = usize::from(height / 2);
    highlighted
        .map(|i| i.saturating_sub(half))
        .unwrap_or(0)
        .try_into()
        .unwrap_or(u16::MAX)
}

/// Gauge fill for a percent; `Gauge::ratio` rejects anything outside `0..=1`.
fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn panel<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(title)
        .style(theme.base())
}

/// Render the entire UI.
pub fn draw(frame: &mut Frame, c: &Coordinator) {
    let theme = c.theme();
    let mut area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);
    if theme.compact && area.width > COMPACT_WIDTH {
        area.x += (area.width - COMPACT_WIDTH) / 2;
        area.width = COMPACT_WIDTH;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    draw_search(frame, rows[0], c.app(), theme);

    let side = if theme.compact { 32 } else { 44 };
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(side)])
        .split(rows[1]);
    draw_results(frame, main[0], c, theme);
    draw_side(frame, main[1], c, theme);

    draw_status(frame, rows[2], c, theme);

    let footer = Paragraph::new(controls_text())
        .style(theme.muted())
        .block(panel(" controls ", theme).padding(Padding::horizontal(1)))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, rows[3]);

    if c.app().focus == Focus::Devices {
        draw_devices(frame, rows[1], c.app(), theme);
    }
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let editing = app.focus == Focus::Search;
    let text = if editing {
        Line::from(vec![
            Span::raw(app.query.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if app.query.is_empty() {
        Line::styled("Press / to search", theme.muted())
    } else {
        Line::raw(app.query.as_str())
    };
    let mut block = panel(" search ", theme).padding(Padding::horizontal(1));
    if editing {
        block = block.border_style(Style::default().fg(theme.secondary));
    }
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_results(frame: &mut Frame, area: Rect, c: &Coordinator, theme: &Theme) {
    let app = c.app();
    let active = c.playback().active().map(|a| (a.index, a.track.id.as_str()));

    let title = match &app.last_query {
        Some(q) => format!(" results: {q} "),
        None => " results ".to_string(),
    };

    if !app.has_results() {
        let empty = Paragraph::new("No results")
            .style(theme.muted())
            .alignment(Alignment::Center)
            .block(panel(title, theme));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if active == Some((i, t.id.as_str())) {
                "▶"
            } else {
                " "
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(t.title.as_str()),
                Cell::from(t.artist.as_str()),
                Cell::from(t.album.as_str()),
                Cell::from(t.duration.as_str()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["", "Title", "Artist", "Album", "Time"])
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    )
    .block(panel(title, theme))
    .row_highlight_style(theme.highlight());

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_side(frame: &mut Frame, area: Rect, c: &Coordinator, theme: &Theme) {
    let screen = c.screen();
    let visualizer_height = match c.visualizer_style() {
        VisualizerStyle::Sparkline => 5,
        VisualizerStyle::Bars => 10,
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(visualizer_height),
            Constraint::Min(3),
        ])
        .split(area);

    draw_cover(frame, parts[0], screen, theme);

    let np = &screen.now_playing;
    let now_playing = Paragraph::new(vec![
        Line::from(format!("Title: {}", np.title)),
        Line::from(format!("Artist: {}", np.artist)),
        Line::from(format!("Album: {}", np.album)),
        Line::from(format!("Duration: {}", np.duration)),
    ])
    .block(panel(" now playing ", theme))
    .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, parts[1]);

    let gauge = Gauge::default()
        .block(panel(format!(" {} ", screen.transport_label), theme))
        .gauge_style(Style::default().fg(theme.accent).bg(theme.panel))
        .ratio(gauge_ratio(screen.progress.percent))
        .label(screen.progress.label.as_str());
    frame.render_widget(gauge, parts[2]);

    match c.visualizer_style() {
        VisualizerStyle::Sparkline => {
            let width = usize::from(parts[3].width.saturating_sub(2));
            let skip = screen.energy.len().saturating_sub(width);
            let spark = Sparkline::default()
                .block(panel(" visualizer ", theme))
                .style(Style::default().fg(theme.accent))
                .max(100)
                .data(screen.energy.iter().skip(skip).copied());
            frame.render_widget(spark, parts[3]);
        }
        VisualizerStyle::Bars => {
            let lines: Vec<Line> = screen.bars.iter().map(|r| Line::raw(r.as_str())).collect();
            let bars = Paragraph::new(lines)
                .style(Style::default().fg(theme.accent))
                .block(panel(" visualizer ", theme));
            frame.render_widget(bars, parts[3]);
        }
    }

    draw_lyrics(frame, parts[4], screen, theme);
}

fn draw_cover(frame: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let block = panel(" cover ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    match &screen.cover {
        CoverArt::Blocks(pixels) => frame.render_widget(HalfBlocks::new(pixels), inner),
        CoverArt::Ascii(lines) => {
            let text: Vec<Line> = lines.iter().map(|l| Line::raw(l.as_str())).collect();
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        }
        CoverArt::Text(msg) => {
            let text = Paragraph::new(msg.as_str())
                .style(theme.muted())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(text, inner);
        }
    }
}

fn draw_lyrics(frame: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let pane = &screen.lyrics;
    let lines: Vec<Line> = pane
        .lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if pane.highlighted == Some(i) {
                Line::styled(l.as_str(), theme.lyric_active())
            } else {
                Line::raw(l.as_str())
            }
        })
        .collect();
    let height = area.height.saturating_sub(2);
    let lyrics = Paragraph::new(lines)
        .block(panel(format!(" {} ", pane.title), theme))
        .wrap(Wrap { trim: true })
        .scroll((lyric_scroll(pane.highlighted, height), 0));
    frame.render_widget(lyrics, area);
}

fn draw_status(frame: &mut Frame, area: Rect, c: &Coordinator, theme: &Theme) {
    let screen = c.screen();
    let playback = c.playback();
    let on_off = |b: bool| if b { "on" } else { "off" };
    let device = playback.device().map(|d| d.name.as_str()).unwrap_or("auto");

    let mut parts = vec![
        playback.state().label().to_string(),
        screen.volume_label.clone(),
        format!("Auto: {}", on_off(playback.auto_continue())),
        format!("Norm: {}", on_off(playback.normalize())),
        format!("Audio: {device}"),
    ];
    if !screen.controls_enabled {
        parts.push("controls disabled".to_string());
    }

    let text = Line::from(vec![
        Span::raw(screen.status.as_str()),
        Span::styled(format!("  [{}]", parts.join(" • ")), theme.muted()),
    ]);
    let status = Paragraph::new(text).block(panel(" status ", theme).padding(Padding::horizontal(1)));
    frame.render_widget(status, area);
}

fn draw_devices(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(picker) = &app.picker else {
        return;
    };
    let height = u16::try_from(picker.devices.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_rect_sized(60, height, area);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = picker
        .devices
        .iter()
        .map(|d| ListItem::new(format!("{} ({})", d.description, d.name)))
        .collect();
    let list = List::new(items)
        .block(panel(" audio device (enter selects, esc closes) ", theme))
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(picker.selected));
    frame.render_stateful_widget(list, popup, &mut state);
}

#[cfg(test)]
mod tests;
