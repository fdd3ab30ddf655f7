use crate::app::rank::MatchResult;
use crate::app::state::{App, SearchMode};
use crate::util::format_price;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

/// Draws the search view, consisting of input, results, reply, and status bar.
pub fn draw_search(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(1),    // Results + reply
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    draw_search_input(frame, app, layout[0]);
    draw_search_results(frame, app, middle[0]);
    draw_reply(frame, app, middle[1]);
    draw_status_bar(frame, app, layout[2]);
}

/// Draws the detail view for the selected result.
pub fn draw_detail(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Header
            Constraint::Percentage(45), // Item facts & score reasons
            Constraint::Min(3),         // Description
        ])
        .split(frame.area());

    draw_detail_header(frame, app, layout[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);

    if let Some(m) = &app.detail.result {
        draw_item_facts(frame, m, middle[0]);
        draw_reasons(frame, m, middle[1]);
        draw_description(frame, m, layout[2]);
    } else {
        let msg = Paragraph::new("No item selected").block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, layout[1]);
    }
}

fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_line = if app.search.input.is_empty() {
        Line::from(vec![Span::styled(
            "Ask about a wine… e.g. how much is the chardonnay",
            Style::default().fg(Color::DarkGray),
        )])
    } else {
        Line::from(Span::raw(app.search.input.as_str()))
    };

    let input_block = Block::default().title("Search").borders(Borders::ALL);
    let input = Paragraph::new(input_line)
        .block(input_block.clone())
        .wrap(Wrap { trim: true });

    frame.render_widget(input, area);

    if app.search.mode == SearchMode::Insert {
        let inner = input_block.inner(area);
        let x = inner.x.saturating_add(app.search.input.chars().count() as u16);
        let y = inner.y;
        frame.set_cursor_position((x, y));
    }
}

fn draw_search_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .search
        .results
        .iter()
        .map(|m| {
            let title_style = if m.item.is_available() {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(m.item.title.trim().to_string(), title_style),
                Span::raw("  "),
                Span::styled(
                    format_price(m.item.price_minor_units),
                    Style::default().fg(Color::Green),
                ),
            ];
            if m.score > 0.0 {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("[{:.1}]", m.score),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if !app.search.results.is_empty() {
        list_state.select(Some(app.search.selected_index));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::styled("Wines ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("(Enter to open) – "),
                    Span::styled(
                        format!("{} results", app.search.results.len()),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_reply(frame: &mut Frame, app: &App, area: Rect) {
    let intent = app
        .search
        .outcome
        .as_ref()
        .map(|o| format!("Reply ({:?})", o.intent))
        .unwrap_or_else(|| "Reply".to_string());
    let reply = Paragraph::new(app.search.reply.as_str())
        .block(Block::default().title(intent).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(reply, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = if app.search.mode == SearchMode::Insert { "Insert" } else { "Navigate" };
    let hints = "Esc quit • Enter detail • ↑/↓ navigate • Ctrl+S sort • Ctrl+R reload";
    let status_line = Line::from(vec![
        Span::styled(app.status.clone(), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
        Span::raw("   |  Catalog: "),
        Span::styled(app.data.source.to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" ({})", app.data.age_label())),
        Span::raw("   |  Mode: "),
        Span::styled(mode, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ]);

    let status = Paragraph::new(status_line).wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn draw_detail_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.detail.result {
        Some(m) => format!("Detail: {}   (b=back)", m.item.title.trim()),
        None => "Detail".to_string(),
    };
    let header = Paragraph::new(title).style(Style::default().fg(Color::Yellow));
    frame.render_widget(header, area);
}

fn draw_item_facts(frame: &mut Frame, m: &MatchResult, area: Rect) {
    let item = &m.item;
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let vintage = item.vintage().map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    let availability_style = if item.is_available() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    let rows = vec![
        Row::new(vec![Cell::from("Item ID"), Cell::from(item.id.clone())]),
        Row::new(vec![Cell::from("Category"), Cell::from(item.category.clone())]),
        Row::new(vec![Cell::from("Vintage"), Cell::from(vintage)]),
        Row::new(vec![
            Cell::from("Price"),
            Cell::from(format_price(item.price_minor_units)).style(Style::default().fg(Color::Green)),
        ]),
        Row::new(vec![
            Cell::from("Available"),
            Cell::from(yes_no(item.availability.available)).style(availability_style),
        ]),
        Row::new(vec![
            Cell::from("Listed"),
            Cell::from(yes_no(item.availability.listed)).style(availability_style),
        ]),
        Row::new(vec![Cell::from("Score"), Cell::from(format!("{:.2}", m.score))]),
    ];

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
        .block(Block::default().title("Item").borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn draw_reasons(frame: &mut Frame, m: &MatchResult, area: Rect) {
    let header = Row::new(vec![Cell::from("Points"), Cell::from("Signal")])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = m.reasons.iter().map(|r| {
        Row::new(vec![
            Cell::from(format!("{:+.1}", r.points)).style(Style::default().fg(Color::Green)),
            Cell::from(r.reason.to_string()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .header(header)
        .block(Block::default().title("Why it matched").borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn draw_description(frame: &mut Frame, m: &MatchResult, area: Rect) {
    let text = m
        .item
        .display_description()
        .unwrap_or("No description available.");
    let para = Paragraph::new(text)
        .block(Block::default().title("Description").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
