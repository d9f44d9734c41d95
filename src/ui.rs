//! Terminal rendering. Pure view over [`App`] state; recomputed on every
//! draw, so the list always reflects the store and filter as of this
//! tick.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};

use crate::app::App;
use taskvox_core::{CategoryFilter, Config, RecorderState, Task, TaskCategory};

pub fn render(frame: &mut Frame, app: &App, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], config);
    render_tasks(frame, chunks[1], app);
    render_voice(frame, chunks[2], app);
    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, config: &Config) {
    let now = Local::now();
    let greeting = match config.name() {
        Some(name) => format!("Hey {name} 👋"),
        None => "Hey there 👋".to_string(),
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            greeting,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{}  ·  {}",
                now.format("%A, %B %-d, %Y"),
                now.format("%-I:%M %p")
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, area);
}

fn render_tasks(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_tasks();
    let count = visible.len();
    let title = format!(
        "Today's Tasks ({count} task{})",
        if count == 1 { "" } else { "s" }
    );

    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    render_filter_tabs(frame, rows[0], app.filter());

    if visible.is_empty() {
        let copy = if app.store().is_empty() {
            "No tasks yet. Record one to get started."
        } else {
            "No tasks found for this category"
        };
        let empty = Paragraph::new(Span::styled(
            copy,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = visible.iter().copied().map(task_item).collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::Indexed(236)))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn render_filter_tabs(frame: &mut Frame, area: Rect, filter: CategoryFilter) {
    let mut titles = vec![CategoryFilter::All.label()];
    titles.extend(TaskCategory::ALL.iter().map(|c| c.label()));

    let selected = match filter {
        CategoryFilter::All => 0,
        CategoryFilter::Only(category) => {
            1 + TaskCategory::ALL
                .iter()
                .position(|c| *c == category)
                .unwrap_or(0)
        }
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn task_item(task: &Task) -> ListItem<'_> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let mut title_style = Style::default();
    if task.completed {
        title_style = title_style
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    let mut spans = vec![
        Span::raw(checkbox),
        Span::styled(task.title.clone(), title_style),
    ];
    if let Some(time) = &task.time {
        spans.push(Span::styled(
            format!("  {time}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(description) = &task.description {
        spans.push(Span::styled(
            format!("  — {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!("  #{}", task.category),
        Style::default().fg(Color::Blue),
    ));

    ListItem::new(Line::from(spans))
}

fn render_voice(frame: &mut Frame, area: Rect, app: &App) {
    let (symbol, color) = match app.state() {
        RecorderState::Idle => ("○", Color::DarkGray),
        RecorderState::Recording => ("●", Color::Red),
        RecorderState::Processing => ("◌", Color::Yellow),
    };
    let title = Line::from(vec![
        Span::raw("Voice Assistant "),
        Span::styled(symbol, Style::default().fg(color)),
        Span::styled(
            format!(" {}", app.state().label()),
            Style::default().fg(color),
        ),
    ]);
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = match app.state() {
        RecorderState::Recording => Span::styled(
            "Listening...",
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ),
        RecorderState::Processing => Span::styled(
            "Processing your request...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ),
        RecorderState::Idle => match app.last_transcript() {
            Some(transcript) => Span::raw(transcript.to_string()),
            None => Span::styled(
                "Press r and start speaking to create new tasks",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        },
    };
    frame.render_widget(
        Paragraph::new(Line::from(body)).wrap(ratatui::widgets::Wrap { trim: true }),
        inner,
    );
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Span::styled(
        " q quit · r record · ↑/↓ select · space done · d delete · tab filter",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, area);
}
