use oeuvre_core::browse::VisibleEntry;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::{App, ListRow, Mode, RowTarget};

const GRID_CELL_WIDTH: u16 = 28;

/// Rows of the list table that fit a terminal `height` rows tall.
///
/// Breadcrumbs and footer take three rows each, the table borders and header
/// three more.
pub fn list_viewport(height: u16) -> usize {
    usize::from(height.saturating_sub(9)).max(1)
}

/// Render the folder listing for the current path.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumbs
            Constraint::Min(5),    // Listing
            Constraint::Length(3), // Search / help bar
        ])
        .split(area);

    render_breadcrumbs(frame, app, chunks[0]);
    match app.browser.layout() {
        oeuvre_core::Layout::List => render_list(frame, app, chunks[1]),
        oeuvre_core::Layout::Grid => render_grid(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

fn render_breadcrumbs(frame: &mut Frame, app: &App, area: Rect) {
    let crumbs = app.browser.breadcrumbs().join(" \u{203a} ");
    let count = app
        .browser
        .current_node()
        .map_or_else(|| app.browser.tree().leaf_count(), |node| node.count);
    let title = Paragraph::new(format!("{crumbs}    {count} works"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn row_label(row: &ListRow<'_>, target: &RowTarget, app: &App) -> String {
    let indent = "  ".repeat(row.depth);
    match row.entry {
        VisibleEntry::Folder(node) => {
            let open = matches!(target, RowTarget::Folder(path) if app.browser.is_expanded(path));
            let marker = if open { "\u{25be}" } else { "\u{25b8}" };
            format!("{indent}{marker} {}", node.key)
        }
        VisibleEntry::Item(item) => format!("{indent}  {}", item.title),
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Works"),
        Cell::from("Date"),
        Cell::from("Image").style(Style::default().fg(Color::DarkGray)),
    ])
    .height(1);

    // area.height - 2 for borders - 1 for header
    let viewport_height = usize::from(area.height.saturating_sub(3)).max(1);
    let all_rows = app.rows();
    let visible_start = app.offset.min(all_rows.len().saturating_sub(viewport_height));
    let visible_end = (visible_start + viewport_height).min(all_rows.len());

    let rows: Vec<Row> = all_rows
        .iter()
        .enumerate()
        .skip(visible_start)
        .take(viewport_height)
        .map(|(i, (row, target))| {
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let (count, date, image) = match row.entry {
                VisibleEntry::Folder(node) => (
                    node.count.to_string(),
                    node.date_range.map(|r| r.to_string()).unwrap_or_default(),
                    String::new(),
                ),
                VisibleEntry::Item(item) => (
                    String::new(),
                    item.display_date(),
                    item.display_image.clone().unwrap_or_else(|| "-".to_string()),
                ),
            };
            Row::new(vec![
                Cell::from(row_label(row, target, app)),
                Cell::from(count),
                Cell::from(date),
                Cell::from(image),
            ])
            .style(style)
        })
        .collect();

    let title = if all_rows.len() > viewport_height {
        format!(
            "Archive [{}-{} of {}]",
            visible_start + 1,
            visible_end,
            all_rows.len()
        )
    } else {
        "Archive".to_string()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Length(7),
            Constraint::Length(25),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let columns = usize::from((area.width.saturating_sub(2) / GRID_CELL_WIDTH).max(1));
    let all_rows = app.rows();

    let cells: Vec<Cell> = all_rows
        .iter()
        .enumerate()
        .map(|(i, (row, _))| {
            let text = match row.entry {
                VisibleEntry::Folder(node) => format!("\u{25b8} {}\n  {} works", node.key, node.count),
                VisibleEntry::Item(item) => format!("{}\n  {}", item.title, item.display_date()),
            };
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Cell::from(text).style(style)
        })
        .collect();

    let mut grid_rows = Vec::new();
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        let line: Vec<Cell> = cells.by_ref().take(columns).collect();
        grid_rows.push(Row::new(line).height(3));
    }

    let widths = vec![Constraint::Length(GRID_CELL_WIDTH); columns];
    let table = Table::new(grid_rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Archive (grid)"));
    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match (&app.status, app.mode) {
        (_, Mode::Search) => (
            format!("  Search: {}\u{2588}", app.search_input),
            Style::default().fg(Color::Yellow),
        ),
        (Some(status), Mode::Normal) => (format!("  {status}"), Style::default().fg(Color::Green)),
        (None, Mode::Normal) if app.browser.is_searching() => (
            format!(
                "  Filter: '{}'  c Clear  / Edit  Enter Open  Backspace Up  q Quit",
                app.browser.query()
            ),
            Style::default().fg(Color::Yellow),
        ),
        (None, Mode::Normal) => (
            "  \u{2191}/k Up  \u{2193}/j Down  Enter Open  Backspace Up  Space Expand  / Search  g Grid  0 Root  r Reload  q Quit"
                .to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
