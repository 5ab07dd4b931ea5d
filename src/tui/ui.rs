//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::Snapshot;
use crate::features::focus::SessionType;
use crate::features::tasks::MAX_VISIBLE_TASKS;
use crate::tui::app::{App, Mode, TaskForm};
use crate::tui::event::HELP;

/// Colors for one session type and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Text and borders.
    pub foreground: Color,
    /// Secondary text.
    pub muted: Color,
}

/// Pick the palette for a session type.
#[must_use]
pub const fn palette(session_type: SessionType, dark_mode: bool) -> Palette {
    if dark_mode {
        let foreground = match session_type {
            SessionType::Focus => Color::Rgb(240, 128, 128),
            SessionType::ShortBreak => Color::Rgb(135, 206, 235),
            SessionType::LongBreak => Color::Rgb(152, 251, 152),
        };
        Palette {
            background: Color::Rgb(24, 24, 27),
            foreground,
            muted: Color::DarkGray,
        }
    } else {
        let (background, foreground) = match session_type {
            SessionType::Focus => (Color::Rgb(186, 73, 73), Color::White),
            SessionType::ShortBreak => (Color::Rgb(135, 206, 235), Color::Black),
            SessionType::LongBreak => (Color::Rgb(152, 251, 152), Color::Black),
        };
        Palette {
            background,
            foreground,
            muted: Color::DarkGray,
        }
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let snapshot = app.snapshot();
    let colors = palette(snapshot.session_type, snapshot.dark_mode_enabled);

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.foreground)),
        frame.area(),
    );

    // Header, timer, tasks, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, &snapshot, colors, chunks[0]);
    render_timer(frame, &snapshot, app.progress(), colors, chunks[1]);
    render_tasks(frame, &snapshot, app.selected, colors, chunks[2]);
    render_status_bar(frame, app, colors, chunks[3]);

    if let Mode::AddTask(form) = &app.mode {
        render_task_form(frame, form, colors);
    }
}

/// Render the session tabs.
fn render_header(frame: &mut Frame<'_>, snapshot: &Snapshot, colors: Palette, area: Rect) {
    let mut spans = Vec::new();
    for (i, session_type) in SessionType::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, session_type.display_name());
        let style = if *session_type == snapshot.session_type {
            Style::default()
                .fg(colors.background)
                .bg(colors.foreground)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors.muted))
                .title(Span::styled(
                    " pomofocus ",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(header, area);
}

/// Render the countdown, progress and daily count.
fn render_timer(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot,
    progress: f64,
    colors: Palette,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let time = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            snapshot.formatted_time.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(time, rows[0]);

    let [gauge_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(rows[1]);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(colors.foreground).bg(colors.muted))
        .ratio(progress.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, gauge_area);

    let button = if snapshot.active { "[ PAUSE ]" } else { "[ START ]" };
    let button = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(button, Style::default().add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(button, rows[2]);

    let cycle = Paragraph::new(format!(
        "#{} of {}",
        snapshot.cycle_count % snapshot.pomodoros_per_cycle.max(1) + 1,
        snapshot.pomodoros_per_cycle
    ))
    .style(Style::default().fg(colors.muted))
    .alignment(Alignment::Center);
    frame.render_widget(cycle, rows[3]);

    let daily = Paragraph::new(format!("Pomodoros today: {}", snapshot.daily_count))
        .alignment(Alignment::Center);
    frame.render_widget(daily, rows[4]);
}

/// Render the task list.
fn render_tasks(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot,
    selected: usize,
    colors: Palette,
    area: Rect,
) {
    let title = format!(" Tasks ({}/{MAX_VISIBLE_TASKS}) ", snapshot.tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.muted))
        .title(title);

    if snapshot.tasks.is_empty() {
        let empty = Paragraph::new("No tasks. Press a to add one.")
            .style(Style::default().fg(colors.muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = snapshot
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let marker = if i == selected { "> " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(task.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {} pomodoros", task.pomodoros_needed),
                    Style::default().fg(colors.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, colors: Palette, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(colors.muted));

    frame.render_widget(status, area);
}

/// Render the add-task form over the screen.
fn render_task_form(frame: &mut Frame<'_>, form: &TaskForm, colors: Palette) {
    let [row] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(row);

    let save_style = if form.can_submit() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };

    let body = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(colors.muted)),
            Span::raw(form.name.clone()),
            Span::raw("_"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Est. pomodoros: ", Style::default().fg(colors.muted)),
            Span::raw(format!("< {} >", form.pomodoros)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter: save", save_style),
            Span::styled("  Esc: cancel", Style::default().fg(colors.muted)),
        ]),
    ];

    let popup = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Add task ")
            .style(Style::default().bg(colors.background).fg(colors.foreground)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
