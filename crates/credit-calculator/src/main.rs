use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use credit_calculator_engine::prelude::*;
use credit_calculator_engine::{trigger_export, CatalogItem, ExportError, FileTarget};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

mod commands;
mod logger;
mod widgets;
use widgets::*;

/// Ticks a status message stays on screen (100ms each).
const STATUS_TICKS: u16 = 40;
const MAX_INPUT_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    Tips,
    Detail,
}

#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
struct Args {
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// JSON file overriding the built-in catalog, pricing and report settings
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<String>,

    #[arg(long = "log-file", global = true)]
    log_file: Option<String>,

    /// Directory the interactive calculator writes exported reports to
    #[arg(long = "export-dir", default_value = ".")]
    export_dir: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Interactive calculator (default)
    Tui,
    /// Print the catalog of billable services
    Catalog,
    /// Build a report from the given entries without the interactive UI
    Report {
        #[arg(
            short = 'e',
            long = "entry",
            value_name = "ID=VOLUME[:FREQUENCY]",
            required = true
        )]
        entries: Vec<String>,

        #[arg(short = 'f', long = "format", default_value = "html")]
        format: ReportFormat,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn load_config(path: Option<&str>) -> Result<CalculatorConfig> {
    match path {
        Some(raw) => {
            let path = expand_path(raw);
            CalculatorConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Ok(CalculatorConfig::builtin()),
    }
}

/// One editable line of the calculator, mirroring a catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub item_id: String,
    pub input: String,
    pub frequency: Frequency,
}

impl InputRow {
    fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            input: String::new(),
            frequency: Frequency::default(),
        }
    }

    pub fn entry(&self) -> UsageEntry {
        UsageEntry::from_input(self.item_id.clone(), &self.input, self.frequency.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    ticks_left: u16,
}

pub struct AppState {
    pub calculator: Arc<Calculator>,
    pub rows: Vec<InputRow>,
    pub selected: usize,
    pub active_popup: Option<PopupType>,
    pub status: Option<StatusMessage>,
    pub export_dir: PathBuf,
}

impl AppState {
    fn new(calculator: Arc<Calculator>, export_dir: PathBuf) -> Self {
        let rows = calculator
            .config()
            .catalog()
            .items()
            .map(|item| InputRow::new(item.id()))
            .collect();

        Self {
            calculator,
            rows,
            selected: 0,
            active_popup: None,
            status: None,
            export_dir,
        }
    }

    pub fn entries(&self) -> Vec<UsageEntry> {
        self.rows.iter().map(InputRow::entry).collect()
    }

    pub fn totals(&self) -> AggregateTotals {
        self.calculator.aggregate(&self.entries())
    }

    pub fn row_units(&self, index: usize) -> f64 {
        self.rows
            .get(index)
            .map(|row| self.calculator.entry_units(&row.entry()))
            .unwrap_or(0.0)
    }

    pub fn active_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.entry().has_volume())
            .count()
    }

    pub fn selected_row(&self) -> Option<&InputRow> {
        self.rows.get(self.selected)
    }

    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.selected_row()
            .and_then(|row| self.calculator.item(&row.item_id))
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn push_char(&mut self, c: char) {
        let Some(row) = self.rows.get_mut(self.selected) else {
            return;
        };
        if row.input.len() >= MAX_INPUT_LEN {
            return;
        }
        match c {
            '0'..='9' => row.input.push(c),
            '.' if !row.input.contains('.') => {
                if row.input.is_empty() {
                    row.input.push('0');
                }
                row.input.push('.');
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.input.pop();
        }
    }

    fn clear_row(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.input.clear();
            row.frequency = Frequency::default();
        }
    }

    fn cycle_frequency(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.frequency = row.frequency.next();
        }
    }

    fn toggle_popup(&mut self, popup: PopupType) {
        self.active_popup = if self.active_popup == Some(popup) {
            None
        } else {
            Some(popup)
        };
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            ticks_left: STATUS_TICKS,
        });
    }

    fn tick(&mut self) {
        if let Some(status) = &mut self.status {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
            }
        }
    }

    /// Snapshots the current inputs and writes the rendered report into the
    /// export directory.
    fn export(&self, format: ReportFormat) -> Result<PathBuf, ExportError> {
        let snapshot = build_snapshot(&self.calculator, &self.entries());
        let document = render_document(&snapshot, format);
        let mut target = FileTarget::in_directory(&self.export_dir, format, snapshot.generated_at());
        trigger_export(&document, &mut target)?;
        Ok(target.path().to_path_buf())
    }

    fn export_with_status(&mut self, format: ReportFormat) {
        match self.export(format) {
            Ok(path) => self.set_status(format!("Report saved to {}", path.display()), false),
            Err(err) => {
                tracing::error!(error = %err, "report export failed");
                self.set_status(format!("Export failed: {}", err), true);
            }
        }
    }
}

pub struct App {
    state: AppState,
    exit: bool,
}

impl App {
    pub fn new(calculator: Arc<Calculator>, export_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(calculator, export_dir),
            exit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut tick_interval = interval(Duration::from_millis(100));

        while !self.exit {
            tick_interval.tick().await;
            self.state.tick();
            terminal.draw(|frame| self.draw(frame))?;

            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(event);
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(area);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);

        HeaderWidget::render(frame, chunks[0], &self.state);
        ItemsWidget::render(frame, chunks[1], &self.state);
        SummaryWidget::render(frame, bottom[0], &self.state);
        PackagesWidget::render(frame, bottom[1], &self.state);
        ShortcutsWidget::render(frame, chunks[3], &self.state);

        match self.state.active_popup {
            Some(PopupType::Tips) => TipsPopupWidget::render(frame, area, &self.state),
            Some(PopupType::Detail) => DetailPopupWidget::render(frame, area, &self.state),
            None => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            if key_event.kind == KeyEventKind::Press {
                self.handle_key(key_event);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Esc => self.state.active_popup = None,
            KeyCode::Char('t') => self.state.toggle_popup(PopupType::Tips),
            KeyCode::Char('d') => self.state.toggle_popup(PopupType::Detail),
            // editing is disabled while a popup covers the table
            _ if self.state.active_popup.is_some() => {}
            KeyCode::Up => self.state.select_previous(),
            KeyCode::Down => self.state.select_next(),
            KeyCode::Char('f') | KeyCode::Tab => self.state.cycle_frequency(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.state.push_char(c),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Delete => self.state.clear_row(),
            KeyCode::Char('e') => self.state.export_with_status(ReportFormat::Html),
            KeyCode::Char('x') => self.state.export_with_status(ReportFormat::Text),
            _ => {}
        }
    }
}

async fn run_tui(calculator: Calculator, export_dir: &Path) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(Arc::new(calculator), export_dir.to_path_buf());

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command.clone().unwrap_or(Command::Tui);

    match &command {
        Command::Tui => {
            let log_file = args.log_file.as_deref().map(expand_path);
            logger::init_file_logger(args.verbose, log_file.as_deref())?;
        }
        _ => logger::init_cli_logger(args.verbose),
    }

    let calculator = Calculator::new(load_config(args.config.as_deref())?);

    match command {
        Command::Tui => run_tui(calculator, &expand_path(&args.export_dir)).await,
        Command::Catalog => commands::print_catalog(&calculator, &mut io::stdout().lock()),
        Command::Report {
            entries,
            format,
            output,
        } => {
            let mut target = commands::report_target(output.as_deref().map(expand_path));
            commands::run_report(&calculator, &entries, format, target.as_mut())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn test_app(export_dir: &Path) -> App {
        App::new(Arc::new(Calculator::default()), export_dir.to_path_buf())
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let app = test_app(Path::new("."));
        assert_eq!(app.state.rows.len(), 17);
        assert_eq!(app.state.rows[0].item_id, "batch-pipeline");
        assert_eq!(app.state.rows[16].item_id, "streaming-activation");
        assert!(app.state.totals().is_zero());
    }

    #[test]
    fn test_typing_updates_live_totals() {
        let mut app = test_app(Path::new("."));
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.rows[0].frequency, Frequency::Monthly);

        assert_eq!(app.state.row_units(0), 72_000.0);
        let totals = app.state.totals();
        assert_eq!(totals.total_annual_units(), 72_000.0);
        assert_eq!(totals.total_monthly_units(), 6_000.0);
        assert_eq!(app.state.active_rows(), 1);
    }

    #[test]
    fn test_input_accepts_single_decimal_point() {
        let mut app = test_app(Path::new("."));
        type_str(&mut app, ".5.2a");
        assert_eq!(app.state.rows[0].input, "0.52");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state.rows[0].input, "0.5");

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.state.rows[0].input, "");
        assert_eq!(app.state.rows[0].frequency, Frequency::Onetime);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = test_app(Path::new("."));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.selected, 0);

        for _ in 0..40 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.state.selected, 16);
        assert_eq!(
            app.state.selected_item().map(|item| item.name()),
            Some("Streaming Activation")
        );
    }

    #[test]
    fn test_popups_toggle_and_block_editing() {
        let mut app = test_app(Path::new("."));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state.active_popup, Some(PopupType::Tips));

        type_str(&mut app, "42");
        assert_eq!(app.state.rows[0].input, "");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.active_popup, Some(PopupType::Detail));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.active_popup, None);

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.active_popup, None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(Path::new("."));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.exit);

        let mut app = test_app(Path::new("."));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.exit);
    }

    #[test]
    fn test_export_writes_report_and_sets_status() {
        let dir = tempdir().unwrap();
        let mut app = test_app(dir.path());
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Char('e'));

        let status = app.state.status.clone().unwrap();
        assert!(!status.is_error);
        assert!(status.text.starts_with("Report saved to "));

        let files: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().unwrap(), "html");
        let html = fs::read_to_string(&files[0]).unwrap();
        assert!(html.contains("Batch Data Pipeline"));
        assert!(!html.contains("Streaming Activation"));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let mut app = test_app(&blocker);
        press(&mut app, KeyCode::Char('x'));
        let status = app.state.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Export failed"));
    }

    #[test]
    fn test_status_expires_after_ticks() {
        let mut app = test_app(Path::new("."));
        app.state.set_status("saved", false);
        for _ in 0..STATUS_TICKS - 1 {
            app.state.tick();
        }
        assert!(app.state.status.is_some());
        app.state.tick();
        assert!(app.state.status.is_none());
    }

    #[test]
    fn test_args_default_to_tui() {
        let args = Args::try_parse_from(["credit-calculator"]).unwrap();
        assert_eq!(args.command, None);
        assert_eq!(args.export_dir, ".");
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_report_subcommand() {
        let args = Args::try_parse_from([
            "credit-calculator",
            "-v",
            "report",
            "--entry",
            "batch-pipeline=3:monthly",
            "-e",
            "profile-unification=1",
            "--format",
            "text",
            "--config",
            "~/calc.json",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("~/calc.json"));
        assert_eq!(
            args.command,
            Some(Command::Report {
                entries: vec![
                    "batch-pipeline=3:monthly".to_string(),
                    "profile-unification=1".to_string()
                ],
                format: ReportFormat::Text,
                output: None,
            })
        );
    }

    #[test]
    fn test_args_report_requires_entries() {
        assert!(Args::try_parse_from(["credit-calculator", "report"]).is_err());
        assert!(
            Args::try_parse_from(["credit-calculator", "report", "-e", "a=1", "-f", "pdf"])
                .is_err()
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calc.json");
        fs::write(&path, r#"{"report": {"title": "Team Budget"}}"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.report().title(), "Team Budget");
        assert_eq!(config.catalog().len(), 17);

        assert!(load_config(Some("/definitely/missing/calc.json")).is_err());
    }
}
