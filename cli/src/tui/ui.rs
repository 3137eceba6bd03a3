use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use timesheet_core::format::format_hours;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, Screen};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header, content, input line, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    let title = match (&app.screen, &app.document) {
        (Screen::Editor, Some(doc)) => doc.title.clone(),
        _ => "TIMESHEETS".to_string(),
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    match app.screen {
        Screen::Documents => draw_document_list(f, app, main_chunks[1]),
        Screen::Editor => draw_editor(f, app, main_chunks[1]),
    }

    draw_input(f, app, main_chunks[2]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_document_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .documents
        .iter()
        .map(|name| ListItem::new(format!("{}.txt", name)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Documents ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.document_state);
}

fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|entry| {
            Row::new(vec![
                entry.date.clone(),
                entry.time_range.clone(),
                format_hours(entry.hours_worked),
                entry.nights_on_call.to_string(),
                entry.trips_made.to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(18), // Date
            Constraint::Length(16), // Time Range
            Constraint::Length(14), // Hours
            Constraint::Length(16), // Nights
            Constraint::Min(10),    // Trips
        ],
    )
    .header(
        Row::new(vec!["Date (MM-DD-YYYY)", "Time Range", "Hours Worked", "Nights On Call", "Trips Made"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(Block::default().title(" Entries ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.row_state);

    let totals = app.document.as_ref().map(|d| d.totals()).unwrap_or_default();
    let label = Style::default().fg(Color::Blue);
    let totals_text = vec![
        Line::from(vec![
            Span::styled("Total Hours Worked:   ", label),
            Span::raw(format_hours(totals.total_hours)),
        ]),
        Line::from(vec![
            Span::styled("Total Nights On Call: ", label),
            Span::raw(totals.total_nights.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Total Trips Made:     ", label),
            Span::raw(totals.total_trips.to_string()),
        ]),
    ];
    let totals_block = Paragraph::new(totals_text)
        .block(Block::default().title(" Totals ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(totals_block, chunks[1]);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let prompt = match app.input_mode {
        InputMode::Normal => return,
        InputMode::Naming => " Document name (without extension) ",
        InputMode::Adding => " New entry: date range hours nights trips ",
        InputMode::Editing => " Edit entry: date range hours nights trips ",
    };

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(prompt).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    let x = area.x + 1 + UnicodeWidthStr::width(before_cursor.as_str()) as u16;
    f.set_cursor_position((x, area.y + 1));
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = match &app.status {
        Some(status) if status.is_error => {
            Paragraph::new(status.text.as_str()).style(Style::default().fg(Color::Red))
        }
        Some(status) => Paragraph::new(status.text.as_str()).style(Style::default().fg(Color::Green)),
        None => {
            let help = match (&app.input_mode, &app.screen) {
                (InputMode::Normal, Screen::Documents) => "j/k: Navigate | Enter: Open | n: New | r: Refresh | q: Quit",
                (InputMode::Normal, Screen::Editor) => {
                    "j/k: Navigate | a: Add | e: Edit | d: Remove | v: View file | Esc: Back | q: Quit"
                }
                _ => "Enter: Save | Esc: Cancel",
            };
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(footer.alignment(Alignment::Center), area);
}
