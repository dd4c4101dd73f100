//! Ratatui-based terminal UI.
//!
//! The TUI lists the registered indicators on the left and renders the
//! selected one on the right: value line plus period-change bars, with a
//! time-window selector in the header. Fetches run in the background; the
//! event loop only polls the dashboard for finished requests.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::config::DashConfig;
use crate::dashboard::{Dashboard, LoadState};
use crate::data::FredClient;
use crate::domain::{Frequency, INDICATORS, IndicatorDefinition, Rgb, TimeWindow};
use crate::error::{AppError, FetchError};

pub mod chart;

use chart::{ChartStyle, IndicatorChart};

const API_KEY_HINT: &str = "Get a free API key at: https://fred.stlouisfed.org/docs/api/api_key.html";

/// Start the TUI with `indicator` selected.
pub fn run(
    config: &DashConfig,
    indicator: &'static IndicatorDefinition,
    window: TimeWindow,
) -> Result<(), AppError> {
    let source = Arc::new(FredClient::new(config)?);
    let mut dashboard = Dashboard::new(source, config.limit, window);
    dashboard.select(indicator);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dashboard);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    dashboard: Dashboard,
    status: String,
}

impl App {
    fn new(dashboard: Dashboard) -> Self {
        let status = format!("Loading {}...", dashboard.selected().title);
        Self { dashboard, status }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.dashboard.poll() {
                self.status = status_for(&self.dashboard);
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => self.set_window(self.dashboard.window().prev()),
            KeyCode::Right => self.set_window(self.dashboard.window().next()),
            KeyCode::Char('r') => {
                self.dashboard.refresh();
                self.status = format!("Refreshing {}...", self.dashboard.selected().title);
            }
            KeyCode::Char(c) => {
                if let Some(window) = window_for_key(c) {
                    self.set_window(window);
                }
            }
            _ => {}
        }
        false
    }

    fn move_selection(&mut self, delta: isize) {
        let current = INDICATORS.position(self.dashboard.selected().id).unwrap_or(0);
        let Some(target) = current.checked_add_signed(delta).and_then(|i| INDICATORS.at(i)) else {
            return;
        };
        self.dashboard.select(target);
        self.status = format!("Loading {}...", target.title);
    }

    fn set_window(&mut self, window: TimeWindow) {
        self.dashboard.set_window(window);
        self.status = format!("window: {}", window.label());
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let ind = self.dashboard.selected();
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("econ", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled(
                ind.title,
                Style::default().fg(color(ind.color)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}) {}", ind.unit, ind.description),
                Style::default().fg(Color::Gray),
            ),
        ]));

        let mut windows = vec![Span::styled("window: ", Style::default().fg(Color::Gray))];
        for (i, w) in TimeWindow::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, w.label());
            let style = if *w == self.dashboard.window() {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            windows.push(Span::styled(label, style));
        }
        lines.push(Line::from(windows));

        if let Some(view) = self.dashboard.view() {
            let range = match (view.points.first(), view.points.last()) {
                (Some(a), Some(b)) => format!("{} .. {}", a.date, b.date),
                _ => "-".to_string(),
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{range} | {} of {} observations | change axis [{}, {}] %",
                    view.points.len(),
                    view.total,
                    view.domain.low,
                    view.domain.high,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(area);

        self.draw_indicators(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_indicators(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = INDICATORS
            .iter()
            .map(|ind| {
                ListItem::new(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(color(ind.color))),
                    Span::raw(ind.title),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Indicators").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(INDICATORS.position(self.dashboard.selected().id));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let ind = self.dashboard.selected();
        let title = format!("{} [{}]", ind.title, self.dashboard.window().label());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match self.dashboard.state() {
            LoadState::Idle | LoadState::Loading => {
                let msg = Paragraph::new(format!("Loading {}...", ind.title))
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
            }
            LoadState::Failed(err) => {
                let msg = Paragraph::new(Text::from(error_lines(err)))
                    .wrap(Wrap { trim: true })
                    .block(Block::default().title("Error").borders(Borders::ALL))
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(msg, inner);
            }
            LoadState::Ready(data) => {
                let Some(view) = self.dashboard.view() else {
                    return;
                };

                let mut notes: Vec<Line> = Vec::new();
                if ind.frequency == Frequency::Quarterly {
                    notes.push(Line::from(format!(
                        "Note: {} is published quarterly (every 3 months)",
                        ind.id
                    )));
                }
                for anomaly in &data.anomalies {
                    notes.push(Line::from(format!("Warning: {anomaly}")));
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(notes.len() as u16)])
                    .split(inner);

                let widget = IndicatorChart {
                    points: &view.points,
                    domain: view.domain,
                    style: ChartStyle::for_indicator(ind),
                    unit: ind.unit,
                };
                frame.render_widget(widget, chunks[0]);

                if !notes.is_empty() {
                    let p = Paragraph::new(Text::from(notes)).style(Style::default().fg(Color::Gray));
                    frame.render_widget(p, chunks[1]);
                }
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ indicator  ←/→ or 1-6 window  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// `1`-`6` pick a window in selector order.
fn window_for_key(c: char) -> Option<TimeWindow> {
    let n = c.to_digit(10)? as usize;
    n.checked_sub(1).and_then(|i| TimeWindow::ALL.get(i)).copied()
}

fn status_for(dashboard: &Dashboard) -> String {
    let ind = dashboard.selected();
    match dashboard.state() {
        LoadState::Idle => String::new(),
        LoadState::Loading => format!("Loading {}...", ind.title),
        LoadState::Ready(data) => format!("{}: {} observations", ind.id, data.series.len()),
        LoadState::Failed(_) => format!("{}: fetch failed", ind.id),
    }
}

fn error_lines(err: &FetchError) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(err.to_string())];
    if err.is_credential_problem() {
        lines.push(Line::from(""));
        lines.push(Line::from("Set FRED_API_KEY (environment or .env) and press r."));
        lines.push(Line::from(API_KEY_HINT));
    }
    lines
}

fn color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}
