use oeuvre_core::browse::DISPLAY_DATE_FORMAT;
use oeuvre_core::model::WorkId;
use oeuvre_core::{classify, resolve_image, CoverIndex, Work};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::App;

/// Render the detail view of one work.
pub fn render(frame: &mut Frame, app: &App, id: WorkId) {
    let area = frame.area();
    let catalog = app.browser.catalog();

    let Some(work) = catalog.work(id) else {
        let msg = Paragraph::new("Work not found").style(Style::default().fg(Color::Red));
        frame.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(11), // Fields
            Constraint::Min(5),     // Lyrics
            Constraint::Length(3),  // Help bar
        ])
        .split(area);

    render_header(frame, work, chunks[0]);
    render_fields(frame, app, work, chunks[1]);
    render_lyrics(frame, work, chunks[2]);
    render_help(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, work: &Work, area: Rect) {
    let header = Paragraph::new(work.title.clone())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {name:<12}"), Style::default().fg(Color::Cyan)),
        Span::raw(value),
    ])
}

fn render_fields(frame: &mut Frame, app: &App, work: &Work, area: Rect) {
    let catalog = app.browser.catalog();
    let covers = CoverIndex::build(&catalog.milestone_tracks, &catalog.milestones);

    let date = work.instant().map_or_else(
        || "Unknown Date".to_string(),
        |i| i.format(DISPLAY_DATE_FORMAT).to_string(),
    );
    let released = if work.is_released() { "yes" } else { "no" };
    let parent = catalog
        .parent_of(work)
        .map_or_else(|| "-".to_string(), |p| p.title.clone());
    let sessions: Vec<&str> = catalog
        .sessions_of(work.id)
        .into_iter()
        .map(|s| s.title.as_str())
        .collect();
    let sessions = if sessions.is_empty() {
        "-".to_string()
    } else {
        sessions.join(", ")
    };

    let lines = vec![
        field("Date", date),
        field("Era", classify(work, &catalog.milestones, &app.workspace.eras)),
        field(
            "Status",
            format!("{} / {} (released: {released})", work.category, work.sub_category),
        ),
        field("Producer", work.producer.clone().unwrap_or_else(|| "-".to_string())),
        field(
            "Image",
            resolve_image(work, &covers).unwrap_or("-").to_string(),
        ),
        field("Parent", parent),
        field("Sessions", sessions),
        field(
            "Also known",
            if work.alternate_names.is_empty() {
                "-".to_string()
            } else {
                work.alternate_names.join(", ")
            },
        ),
        field("About", work.description.clone().unwrap_or_else(|| "-".to_string())),
    ];

    let fields = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(fields, area);
}

fn render_lyrics(frame: &mut Frame, work: &Work, area: Rect) {
    let lyrics = match work.lyrics.as_deref().filter(|l| !l.trim().is_empty()) {
        Some(text) => Text::from(text.to_string()),
        None => Text::styled("  [No Lyrics]", Style::default().fg(Color::Yellow)),
    };
    let paragraph = Paragraph::new(lyrics)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Lyrics"));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("  b/Esc Back  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
