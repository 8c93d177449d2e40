use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use oeuvre_core::browse::{TreeNode, VisibleEntry};
use oeuvre_core::model::WorkId;
use oeuvre_core::{ArchiveBrowser, Layout, TreePath};
use ratatui::prelude::{CrosstermBackend, Terminal};

use crate::commands::Workspace;

pub mod folder_list;
pub mod work_detail;

/// List height used until the first frame is drawn.
const DEFAULT_VIEWPORT: usize = 20;

/// Which view the TUI is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Listing,
    Detail(WorkId),
}

/// Whether keystrokes drive navigation or edit the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

/// What a listing row leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    Folder(TreePath),
    Item(WorkId),
}

/// One line of the listing. Expanded folders show their children inline.
#[derive(Debug, Clone, Copy)]
pub struct ListRow<'a> {
    pub depth: usize,
    pub entry: VisibleEntry<'a>,
}

impl ListRow<'_> {
    fn target(&self, parent: &TreePath) -> RowTarget {
        match self.entry {
            VisibleEntry::Folder(node) => RowTarget::Folder(parent.child(node.key.clone())),
            VisibleEntry::Item(item) => RowTarget::Item(item.work_id),
        }
    }
}

/// Application state for the archive browser.
#[derive(Debug)]
pub struct App {
    pub workspace: Workspace,
    pub browser: ArchiveBrowser,
    pub view: View,
    pub mode: Mode,
    pub selected: usize,
    pub offset: usize, // First visible row in the list
    pub viewport: usize, // Rows the list can show, updated on every draw
    pub search_input: String,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(workspace: Workspace, layout: Layout) -> Self {
        let browser = ArchiveBrowser::new(workspace.browsed(), workspace.eras).with_layout(layout);
        Self {
            workspace,
            browser,
            view: View::Listing,
            mode: Mode::Normal,
            selected: 0,
            offset: 0,
            viewport: DEFAULT_VIEWPORT,
            search_input: String::new(),
            status: None,
            should_quit: false,
        }
    }

    /// Rows of the current listing with the paths they stand for.
    ///
    /// Grid layout shows only the current folder's children.
    pub fn rows(&self) -> Vec<(ListRow<'_>, RowTarget)> {
        let mut rows = Vec::new();
        let base = self.browser.path().clone();
        for entry in self.browser.visible_nodes() {
            self.push_row(&mut rows, entry, &base, 0);
        }
        rows
    }

    fn push_row<'a>(
        &'a self,
        rows: &mut Vec<(ListRow<'a>, RowTarget)>,
        entry: VisibleEntry<'a>,
        parent: &TreePath,
        depth: usize,
    ) {
        let row = ListRow { depth, entry };
        let target = row.target(parent);
        let open_folder = match (&entry, &target) {
            (VisibleEntry::Folder(node), RowTarget::Folder(path))
                if self.browser.layout() == Layout::List && self.browser.is_expanded(path) =>
            {
                Some((*node, path.clone()))
            }
            _ => None,
        };
        rows.push((row, target));

        if let Some((node, path)) = open_folder {
            for child in children(node) {
                self.push_row(rows, child, &path, depth + 1);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match (self.view, self.mode) {
            (View::Detail(_), _) => self.handle_detail_key(key),
            (View::Listing, Mode::Search) => self.handle_search_key(key),
            (View::Listing, Mode::Normal) => self.handle_listing_key(key),
        }
    }

    fn handle_listing_key(&mut self, key: KeyCode) {
        let row_count = self.rows().len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < row_count {
                    self.selected += 1;
                    self.scroll_to_selected();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.scroll_to_selected();
                }
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => self.open_selected(),
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
                if self.browser.back() {
                    self.reset_selection();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(RowTarget::Folder(path)) = self.selected_target() {
                    self.browser.toggle_expanded(path);
                    self.scroll_to_selected();
                }
            }
            KeyCode::Char('/') => {
                self.search_input = self.browser.query().to_string();
                self.mode = Mode::Search;
            }
            KeyCode::Char('c') => {
                self.search_input.clear();
                self.browser.set_query("");
                self.reset_selection();
            }
            KeyCode::Char('g') => {
                self.browser.toggle_layout();
                self.reset_selection();
            }
            KeyCode::Char('0') => {
                self.browser.go_to(0);
                self.reset_selection();
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Esc => {
                self.search_input.clear();
                self.browser.set_query("");
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.browser.set_query(self.search_input.clone());
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.browser.set_query(self.search_input.clone());
            }
            _ => return,
        }
        self.reset_selection();
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b' | 'h') | KeyCode::Backspace | KeyCode::Left => {
                self.view = View::Listing;
            }
            _ => {}
        }
    }

    fn selected_target(&self) -> Option<RowTarget> {
        self.rows()
            .into_iter()
            .nth(self.selected)
            .map(|(_, target)| target)
    }

    fn open_selected(&mut self) {
        match self.selected_target() {
            Some(RowTarget::Folder(path)) => {
                self.browser.go_to(0);
                for key in path.keys() {
                    if !self.browser.enter(key) {
                        break;
                    }
                }
                self.reset_selection();
            }
            Some(RowTarget::Item(id)) => self.view = View::Detail(id),
            None => {}
        }
    }

    fn reload(&mut self) {
        match self.workspace.reload() {
            Ok(catalog) => {
                let count = catalog.works.len();
                self.browser.replace_catalog(catalog);
                self.reset_selection();
                self.status = Some(format!("Reloaded {count} works"));
            }
            Err(e) => {
                log::warn!("Reload failed: {e:#}");
                self.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    /// Record the list height of the terminal and keep the selection on screen.
    pub fn resize_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
        self.scroll_to_selected();
    }

    fn scroll_to_selected(&mut self) {
        let row_count = self.rows().len();
        self.selected = self.selected.min(row_count.saturating_sub(1));
        self.offset = self.offset.min(row_count.saturating_sub(self.viewport));
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport {
            self.offset = self.selected + 1 - self.viewport;
        }
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }
}

fn children(node: &TreeNode) -> Vec<VisibleEntry<'_>> {
    let folders = node.folders().iter().map(VisibleEntry::Folder);
    let items = node.items().iter().map(VisibleEntry::Item);
    folders.chain(items).collect()
}

/// Run the archive browser.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(workspace: Workspace, layout: Layout) -> Result<()> {
    let app = App::new(workspace, layout);

    if app.browser.tree().is_empty() {
        println!("No works to browse.");
        println!("Check --category, or point --catalog at a snapshot with works in it.");
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        let height = terminal.size()?.height;
        app.resize_viewport(folder_list::list_viewport(height));
        terminal.draw(|frame| match app.view {
            View::Listing => folder_list::render(frame, &app),
            View::Detail(id) => work_detail::render(frame, &app, id),
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.status = None;
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
