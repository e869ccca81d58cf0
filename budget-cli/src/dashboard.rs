use anyhow::Result;
use budget_core::Period;
use budget_report::{
    Chart as ChartModel, DashboardView, SeriesColor, default_period, format_money, title_case,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row,
        Table, Wrap,
    },
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{info, warn};

use crate::export::{ExportSettings, export_month};
use crate::session::Session;

pub struct App {
    session: Session,
    settings: ExportSettings,
    symbol: String,
    view: Option<DashboardView>,
    show_table: bool,
    show_help: bool,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        period: Option<Period>,
        settings: ExportSettings,
        symbol: String,
    ) -> Self {
        let mut app = Self {
            session,
            settings,
            symbol,
            view: None,
            show_table: false,
            show_help: false,
            status: None,
            should_quit: false,
        };
        app.select(period);
        app
    }

    fn select(&mut self, period: Option<Period>) {
        let report = self.session.report();
        let period = period.or_else(|| default_period(&report.records));
        self.view = period.map(|p| DashboardView::compute(&report.records, &report.schema, p));
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('t') => self.show_table = !self.show_table,
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn step(&mut self, step: isize) {
        if let Some(view) = &self.view {
            let next = view.shifted_period(step);
            if next != view.period {
                self.select(Some(next));
                self.status = None;
            }
        }
    }

    fn reload(&mut self) {
        let before = self.session.cache().hits();
        match self.session.reload() {
            Ok(()) => {
                let current = self.view.as_ref().map(|v| v.period);
                let periods = budget_core::list_periods(&self.session.report().records);
                let keep = current.filter(|p| periods.contains(p));
                self.select(keep);
                self.status = Some(if self.session.cache().hits() > before {
                    "file unchanged".to_string()
                } else {
                    "reloaded".to_string()
                });
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "reload failed");
                self.status = Some(format!("reload failed: {e:#}"));
            }
        }
    }

    fn export(&mut self) {
        let Some(view) = &self.view else {
            self.status = Some("nothing to export".to_string());
            return;
        };
        let outcomes = export_month(view, &self.settings);
        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.name.as_str())
            .collect();
        self.status = Some(if failed.is_empty() {
            format!(
                "exported {} file(s) to {}",
                outcomes.len(),
                self.settings.out_dir.display()
            )
        } else {
            format!("export failed for: {}", failed.join(", "))
        });
    }
}

pub fn run_dashboard(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    info!(path = %app.session.path().display(), "dashboard started");
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame<'_>, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(12),
    ];
    if app.show_table {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(if app.show_help { 4 } else { 1 }));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_header(f, chunks[0], app);

    let Some(view) = &app.view else {
        let empty = Paragraph::new("No transactions with a valid date and amount.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1].union(chunks[2]));
        draw_footer(f, chunks[chunks.len() - 1], app);
        return;
    };

    draw_metrics(f, chunks[1], view, &app.symbol);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(chunks[2]);
    draw_bars(f, charts[0], &view.category_chart(), &app.symbol);
    draw_trend(f, charts[1], &view.trend_chart());
    draw_bars(f, charts[2], &view.comparison_chart(), &app.symbol);

    if app.show_table {
        draw_table(f, chunks[3], view);
    }
    draw_footer(f, chunks[chunks.len() - 1], app);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let period = app
        .view
        .as_ref()
        .map(|v| v.period.to_string())
        .unwrap_or_else(|| "-".to_string());
    let rejected = app.session.report().rejected_count();

    let mut spans = vec![
        Span::styled(
            "Budget Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}  ", app.session.path().display())),
        Span::styled(format!("month {period}"), Style::default().fg(Color::Cyan)),
    ];
    if rejected > 0 {
        spans.push(Span::styled(
            format!("  {rejected} row(s) skipped"),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_metrics(f: &mut Frame<'_>, area: Rect, view: &DashboardView, symbol: &str) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let metrics = [
        ("Total Spent", view.total, Color::White),
        ("Income", view.split.income, rgb(SeriesColor::Income)),
        ("Expense", view.split.expense, rgb(SeriesColor::Expense)),
        ("Net", view.split.balance, Color::Cyan),
    ];
    for (cell, (title, value, color)) in cells.iter().zip(metrics) {
        let p = Paragraph::new(Span::styled(
            format_money(symbol, value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, *cell);
    }
}

fn rgb(color: SeriesColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Terminal bars have no negative direction, so heights are absolute and the
/// signed value is printed on the bar.
fn draw_bars(f: &mut Frame<'_>, area: Rect, chart: &ChartModel, symbol: &str) {
    let block = Block::default().borders(Borders::ALL).title(chart.title.clone());
    if chart.is_empty() {
        f.render_widget(Paragraph::new("no data").block(block), area);
        return;
    }

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .map(|p| {
            Bar::default()
                .value((p.value.abs() * 100.0).round() as u64)
                .text_value(format_money(symbol, p.value))
                .label(Line::from(title_case(&p.label)))
                .style(Style::default().fg(rgb(p.color)))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let slot = (inner_width / chart.points.len().max(1)).max(2);
    let bar_width = slot.saturating_sub(1).clamp(1, 12) as u16;

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    f.render_widget(widget, area);
}

fn draw_trend(f: &mut Frame<'_>, area: Rect, chart: &ChartModel) {
    let block = Block::default().borders(Borders::ALL).title(chart.title.clone());
    if chart.is_empty() {
        f.render_widget(Paragraph::new("no data").block(block), area);
        return;
    }

    let data: Vec<(f64, f64)> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let last = chart.points.len().saturating_sub(1);
    let (lo, hi) = chart.value_range();

    let mut x_labels = vec![chart.points[0].label.clone()];
    if last > 0 {
        x_labels.push(chart.points[last].label.clone());
    }

    let dataset = Dataset::default()
        .name(chart.y_label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(rgb(SeriesColor::Neutral)))
        .data(&data);

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone())
                .bounds([0.0, (last as f64).max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![format!("{lo:.0}"), format!("{hi:.0}")]),
        );
    f.render_widget(widget, area);
}

fn draw_table(f: &mut Frame<'_>, area: Rect, view: &DashboardView) {
    let schema = &view.schema;
    let rows = view.records.iter().map(|r| Row::new(schema.cells(r)));
    let widths: Vec<Constraint> = (0..schema.headers().len())
        .map(|i| {
            if i == schema.date_column() {
                Constraint::Length(12)
            } else if i == schema.amount_column() {
                Constraint::Length(12)
            } else {
                Constraint::Min(10)
            }
        })
        .collect();
    let table = Table::new(rows, widths)
        .header(
            Row::new(schema.headers().to_vec())
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(format!("Raw Data ({} rows)", view.records.len()))
                .borders(Borders::ALL),
        );
    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if let Some(status) = app.status() {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Green),
        )));
    }
    if app.show_help {
        lines.push(Line::raw("←/→ previous/next month   r reload file   e export month"));
        lines.push(Line::raw("t toggle raw data table   ? toggle help   q quit"));
    } else if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "? for shortcuts",
            Style::default().fg(Color::Gray),
        )));
    }
    f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_report::{ChartSize, DocumentOptions};
    use ratatui::backend::TestBackend;
    use std::fs;
    use std::path::Path;

    const LEDGER: &str = "date,category,amount,memo\n\
                          2024-01-05,Food,-20,corner shop\n\
                          2024-01-10,food,-10,\n\
                          2024-02-01,Salary,1000,payroll\n";

    fn app(dir: &Path, contents: &str) -> App {
        let path = dir.join("ledger.csv");
        fs::write(&path, contents).unwrap();
        let session = Session::open(&path).unwrap();
        let settings = ExportSettings {
            out_dir: dir.join("out"),
            document: DocumentOptions::default(),
            chart_size: ChartSize::default(),
            charts: false,
        };
        App::new(session, None, settings, "$".to_string())
    }

    fn period(app: &App) -> String {
        app.view().unwrap().period.to_string()
    }

    #[test]
    fn test_navigation_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), LEDGER);
        assert_eq!(period(&app), "2024-01");
        app.handle_key(KeyCode::Left);
        assert_eq!(period(&app), "2024-01");
        app.handle_key(KeyCode::Right);
        assert_eq!(period(&app), "2024-02");
        assert_eq!(app.view().unwrap().total, 1000.0);
        app.handle_key(KeyCode::Right);
        assert_eq!(period(&app), "2024-02");
    }

    #[test]
    fn test_reload_keeps_period_and_sees_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), LEDGER);
        app.handle_key(KeyCode::Right);

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.status(), Some("file unchanged"));

        fs::write(dir.path().join("ledger.csv"), format!("{LEDGER}2024-02-03,Rent,-400,\n")).unwrap();
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.status(), Some("reloaded"));
        assert_eq!(period(&app), "2024-02");
        assert_eq!(app.view().unwrap().total, 600.0);
    }

    #[test]
    fn test_export_key_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), LEDGER);
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status().unwrap().starts_with("exported 2 file(s)"));
        assert!(dir.path().join("out/filtered_data_2024-01.csv").exists());
    }

    #[test]
    fn test_quit_and_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), LEDGER);
        app.handle_key(KeyCode::Char('t'));
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_table && app.show_help);
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_renders_to_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), LEDGER);
        app.handle_key(KeyCode::Char('t'));
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Budget Tracker"));
        assert!(text.contains("Spending by Category"));
        assert!(text.contains("Raw Data (2 rows)"));
        assert!(text.contains("memo"));
        assert!(text.contains("corner shop"));
    }

    #[test]
    fn test_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), "date,category,amount\n");
        assert!(app.view().is_none());
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status(), Some("nothing to export"));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
    }
}
