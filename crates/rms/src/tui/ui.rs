//! UI rendering

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, StatefulWidget},
};
use rms_search::{ContainerContent, Leading, ResultNode};
use rms_ui::time_ago;

use super::app::App;
use crate::display::{badge_to_ratatui, leading_text};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Results panel
            Constraint::Length(1), // Tabs + result count
            Constraint::Length(1), // Status bar (shortcuts + refresh)
            Constraint::Length(1), // Toast line
            Constraint::Length(1), // Search input
        ])
        .split(frame.area());

    render_results(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
    render_toast_line(frame, app, chunks[3]);
    render_search_input(frame, app, chunks[4]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = &app.active_tab().input;
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let (before, after) = input.text.split_at(input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = cursor_char.map(|c| &after[c.len_utf8()..]).unwrap_or("");

    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];
    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled("█", Style::default().fg(Color::White))),
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor, text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn result_lines(node: &ResultNode, is_selected: bool) -> Vec<Line<'static>> {
    let leading_style = match &node.view.leading {
        Leading::Badge { color, .. } => Style::default().fg(badge_to_ratatui(*color)),
        Leading::Avatar(_) => Style::default().fg(Color::Cyan),
        Leading::Image(_) | Leading::ImagePlaceholder => Style::default().fg(Color::DarkGray),
    };
    let title_style = if is_selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    vec![
        Line::from(vec![
            Span::styled(leading_text(&node.view.leading), leading_style),
            Span::raw(" "),
            Span::styled(node.view.title.clone(), title_style),
        ]),
        Line::from(Span::styled(
            format!("    {}", node.view.detail),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Render the active tab's results container
fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let selection_bg = Color::Rgb(38, 38, 38);
    let search_type = app.tabs[app.active].search_type;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", search_type.label()));

    let selected = app.tabs[app.active].list_state.selected();
    let content = app
        .controller
        .board()
        .container(search_type)
        .map(|container| container.content());

    match content {
        Some(ContainerContent::Results(nodes)) => {
            let items: Vec<ListItem> = nodes
                .iter()
                .enumerate()
                .map(|(i, node)| {
                    let is_selected = selected == Some(i);
                    let item = ListItem::new(result_lines(node, is_selected));
                    if is_selected {
                        item.style(Style::default().bg(selection_bg))
                    } else {
                        item
                    }
                })
                .collect();

            let list = List::new(items).block(block);
            let state = &mut app.tabs[app.active].list_state;
            StatefulWidget::render(list, area, frame.buffer_mut(), state);
        }
        Some(ContainerContent::Placeholder(message)) => {
            let para = Paragraph::new(Span::styled(
                message.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .block(block);
            frame.render_widget(para, area);
        }
        Some(ContainerContent::Blank) | None => {
            let hint = format!(
                "Type at least {} characters to search",
                app.min_query_chars
            );
            let para = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .block(block);
            frame.render_widget(para, area);
        }
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::raw("  ")];

    for (i, tab) in app.tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", dim));
        }
        let style = if i == app.active {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            dim
        };
        spans.push(Span::styled(tab.search_type.label(), style));
    }

    let count = app.nodes(app.active_tab().search_type).len();
    if count > 0 {
        spans.push(Span::styled(format!("  {count} results"), dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);
    let search_type = app.active_tab().search_type;

    let mut spans = vec![
        Span::styled("  [", bracket),
        Span::styled("↑↓ select", dim),
        Span::styled("] [", bracket),
        Span::styled("Tab switch", dim),
        Span::styled("] [", bracket),
        Span::styled("Enter pick", dim),
        Span::styled("]", bracket),
    ];

    let action = match search_type {
        rms_search::SearchType::Orders => Some("^s advance"),
        rms_search::SearchType::Menu => Some("^t toggle"),
        rms_search::SearchType::Customers => None,
    };
    if let Some(action) = action {
        spans.extend([
            Span::styled(" [", bracket),
            Span::styled(action, dim),
            Span::styled("]", bracket),
        ]);
    }

    spans.extend([
        Span::styled(" [", bracket),
        Span::styled("Esc quit", dim),
        Span::styled("]", bracket),
    ]);

    if app.pending_actions > 0 {
        spans.push(Span::styled(
            " saving…",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!(" refreshed {}", time_ago(refreshed, Utc::now())),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the newest toast, or nothing
fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(toast) = app.toasts.latest() {
        let bracket = Style::default().fg(Color::DarkGray);
        let spans = vec![
            Span::styled("  [", bracket),
            Span::styled(
                format!("{} {}", toast.kind.icon(), toast.message),
                Style::default().fg(toast.kind.color()),
            ),
            Span::styled("]", bracket),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
