use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Agent table
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_agents(f, chunks[1], app);
    draw_footer(f, chunks[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let dim = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled("uaswitch", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  browser: ", dim),
        Span::styled(app.browser(), value),
        Span::styled("  os: ", dim),
        Span::styled(app.os(), value),
        Span::styled("  sort: ", dim),
        Span::styled(app.prefs.sort.label(), value),
    ];

    if app.loading {
        spans.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_agents(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["#", "", "Browser", "OS", "User-Agent"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::UNDERLINED),
    );

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| {
            let marker = if row.is_active { "●" } else { "" };
            let style = if row.is_active {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![
                row.rank.to_string(),
                marker.to_string(),
                row.record.browser.label(),
                row.record.os.label(),
                row.record.ua.clone(),
            ])
            .style(style)
        })
        .collect();

    let title = if app.loading {
        " Agents (loading) ".to_string()
    } else {
        format!(" Agents ({}) ", app.rows.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Length(24),
            Constraint::Length(18),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status_message {
        Some(msg) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            " b/B browser  o/O os  s sort  j/k move  Enter set active  r refresh  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(text), area);
}
