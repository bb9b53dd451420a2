//! Devices screen: the filtered catalog as a table or card grid, with live
//! search, a suggestion dropdown, and the product line filter popover.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};

use uidex_core::{DeviceRecord, LineOption, QueryView, ViewMode, placeholder_glyph};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Cards per row in grid layout.
pub const GRID_COLUMNS: usize = 3;
const CARD_HEIGHT: u16 = 5;
const PAGE: usize = 10;

const NO_SUGGESTIONS: &str = "No matches found";
const FILTER_HINT: &str = "Select one or multiple lines to narrow the list.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Browse,
    /// Typing in the search box; `highlighted` indexes the suggestions.
    Search { highlighted: Option<usize> },
    /// Line filter popover open; `cursor` indexes the line options.
    Filter { cursor: usize },
}

pub struct DevicesScreen {
    view: Arc<QueryView>,
    line_options: Vec<LineOption>,
    /// Search text as typed; the view catches up once the worker settles.
    search_input: String,
    selected: usize,
    mode: Mode,
}

impl DevicesScreen {
    pub fn new(view: Arc<QueryView>, line_options: Vec<LineOption>) -> Self {
        let search_input = view.state.search.clone();
        Self {
            view,
            line_options,
            search_input,
            selected: 0,
            mode: Mode::Browse,
        }
    }

    fn devices(&self) -> &[Arc<DeviceRecord>] {
        &self.view.filtered.devices
    }

    fn selected_device(&self) -> Option<&Arc<DeviceRecord>> {
        self.devices().get(self.selected)
    }

    fn select(&mut self, idx: usize) {
        self.selected = idx.min(self.devices().len().saturating_sub(1));
    }

    fn step(&mut self, forward: bool, by: usize) {
        let next = if forward {
            self.selected.saturating_add(by)
        } else {
            self.selected.saturating_sub(by)
        };
        self.select(next);
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Action> {
        let grid = self.view.state.view == ViewMode::Grid;
        let row = if grid { GRID_COLUMNS } else { 1 };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.step(true, row),
            KeyCode::Char('k') | KeyCode::Up => self.step(false, row),
            KeyCode::Char('l') | KeyCode::Right if grid => self.step(true, 1),
            KeyCode::Char('h') | KeyCode::Left if grid => self.step(false, 1),
            KeyCode::Char('d') if ctrl => self.step(true, PAGE),
            KeyCode::Char('u') if ctrl => self.step(false, PAGE),
            KeyCode::Char('g') => self.select(0),
            KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Char('/') => self.mode = Mode::Search { highlighted: None },
            KeyCode::Char('f') => self.mode = Mode::Filter { cursor: 0 },
            KeyCode::Char('v') => return Some(Action::ToggleViewMode),
            // Devices without an id have no detail page.
            KeyCode::Enter => {
                return self
                    .selected_device()
                    .and_then(|d| d.id())
                    .map(|id| Action::OpenDetail(id.to_owned()));
            }
            KeyCode::Esc if !self.search_input.is_empty() => {
                self.search_input.clear();
                self.selected = 0;
                return Some(Action::SetSearch(String::new()));
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent, highlighted: Option<usize>) -> Option<Action> {
        let count = self.view.suggestions.len();

        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                let label = highlighted
                    .and_then(|i| self.view.suggestions.get(i))
                    .map(|s| s.label.clone())?;
                self.search_input.clone_from(&label);
                self.selected = 0;
                Some(Action::SetSearch(label))
            }
            KeyCode::Down | KeyCode::Tab => {
                if count > 0 {
                    let next = highlighted.map_or(0, |i| (i + 1).min(count - 1));
                    self.mode = Mode::Search {
                        highlighted: Some(next),
                    };
                }
                None
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.mode = Mode::Search {
                    highlighted: highlighted.and_then(|i| i.checked_sub(1)),
                };
                None
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Some(self.search_changed())
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
                Some(self.search_changed())
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Some(self.search_changed())
            }
            _ => None,
        }
    }

    fn search_changed(&mut self) -> Action {
        self.mode = Mode::Search { highlighted: None };
        self.selected = 0;
        Action::SetSearch(self.search_input.clone())
    }

    fn handle_filter_key(&mut self, key: KeyEvent, cursor: usize) -> Option<Action> {
        let last = self.line_options.len().saturating_sub(1);

        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.mode = Mode::Filter {
                    cursor: (cursor + 1).min(last),
                };
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::Filter {
                    cursor: cursor.saturating_sub(1),
                };
                None
            }
            KeyCode::Char(' ') => {
                let option = self.line_options.get(cursor)?;
                self.selected = 0;
                Some(Action::ToggleLine(option.id.clone()))
            }
            KeyCode::Char('r') if !self.view.state.lines.is_empty() => {
                self.selected = 0;
                Some(Action::ResetLines)
            }
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let searching = matches!(self.mode, Mode::Search { .. });
        let query = if self.search_input.is_empty() && !searching {
            Span::styled("Search", theme::key_hint())
        } else {
            let cursor = if searching { "▏" } else { "" };
            let style = if searching {
                Style::default().fg(theme::NEON_CYAN)
            } else {
                theme::table_row()
            };
            Span::styled(format!("{}{cursor}", self.search_input), style)
        };

        let (list_style, grid_style) = match self.view.state.view {
            ViewMode::List => (theme::tab_active(), theme::tab_inactive()),
            ViewMode::Grid => (theme::tab_inactive(), theme::tab_active()),
        };

        let selected_lines = self.view.state.lines.len();
        let filter_label = if selected_lines == 0 {
            "Filter".to_owned()
        } else {
            format!("Filter ({selected_lines})")
        };
        let filter_style = if selected_lines == 0 {
            theme::tab_inactive()
        } else {
            theme::tab_active()
        };

        let line = Line::from(vec![
            Span::styled(" / ", theme::key_hint_key()),
            query,
            Span::raw("   "),
            Span::styled(
                self.view.filtered.count_label(),
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("list", list_style),
            Span::styled(" | ", theme::key_hint()),
            Span::styled("grid", grid_style),
            Span::raw("   "),
            Span::styled(filter_label, filter_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        if let Some(empty) = self.view.filtered.empty_state() {
            let y_offset = area.height.saturating_sub(1) / 2;
            let centered = Rect {
                y: area.y + y_offset,
                height: 1.min(area.height),
                ..area
            };
            frame.render_widget(
                Paragraph::new(empty.message())
                    .style(theme::notice())
                    .alignment(Alignment::Center),
                centered,
            );
            return;
        }

        match self.view.state.view {
            ViewMode::List => self.render_table(frame, area),
            ViewMode::Grid => self.render_grid(frame, area),
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from("Name").style(theme::table_header()),
            Cell::from("Product Line").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = self
            .devices()
            .iter()
            .enumerate()
            .map(|(i, dev)| {
                let is_selected = i == self.selected;
                let prefix = if is_selected { "▸" } else { " " };
                let row_style = if dev.id().is_some() {
                    theme::table_row()
                } else {
                    theme::row_disabled()
                };

                let name = Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!(" {} ", placeholder_glyph(dev)), theme::glyph()),
                    Span::raw(" "),
                    Span::styled(dev.product_name().to_owned(), name_style(dev, is_selected)),
                ]);

                Row::new(vec![Cell::from(name), Cell::from(dev.line_name().to_owned())])
                    .style(row_style)
            })
            .collect();

        let widths = [Constraint::Min(24), Constraint::Length(28)];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let devices = self.devices();
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = self.selected / GRID_COLUMNS;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let row_areas =
            Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
        for (r, row_area) in row_areas.iter().enumerate() {
            let card_areas =
                Layout::horizontal([Constraint::Fill(1); GRID_COLUMNS]).split(*row_area);
            for (c, card_area) in card_areas.iter().enumerate() {
                let idx = (first_row + r) * GRID_COLUMNS + c;
                let Some(dev) = devices.get(idx) else {
                    return;
                };
                render_card(frame, *card_area, dev, idx == self.selected);
            }
        }
    }

    fn render_suggestions(&self, frame: &mut Frame, body: Rect, highlighted: Option<usize>) {
        let suggestions = &self.view.suggestions;
        let rows = u16::try_from(suggestions.len().max(1)).unwrap_or(u16::MAX);
        let popup = Rect {
            width: 56.min(body.width),
            height: rows.saturating_add(2).min(body.height),
            ..body
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let lines: Vec<Line> = if suggestions.is_empty() {
            vec![Line::from(Span::styled(NO_SUGGESTIONS, theme::key_hint()))]
        } else {
            suggestions
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let style = if Some(i) == highlighted {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };
                    Line::from(vec![
                        Span::styled(s.label.clone(), style),
                        Span::raw("  "),
                        Span::styled(s.secondary.clone(), theme::key_hint()),
                    ])
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_filter(&self, frame: &mut Frame, body: Rect, cursor: usize) {
        let rows = u16::try_from(self.line_options.len()).unwrap_or(u16::MAX);
        let width = 56.min(body.width);
        let popup = Rect {
            x: body.right().saturating_sub(width),
            width,
            height: rows.saturating_add(6).min(body.height),
            ..body
        };

        let block = Block::default()
            .title(" Product Line ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let active = &self.view.state.lines;
        let name_width = usize::from(inner.width.saturating_sub(14));

        let mut lines = vec![
            Line::from(Span::styled(FILTER_HINT, theme::key_hint())),
            Line::from(""),
        ];
        for (i, option) in self.line_options.iter().enumerate() {
            let marker = if i == cursor { "▸" } else { " " };
            let check = if active.contains(&option.id) { "x" } else { " " };
            let style = if i == cursor {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker} [{check}] "), style),
                Span::styled(format!("{:<name_width$}", option.name), style),
                Span::styled(format!("{:>5}", option.count), theme::key_hint()),
            ]));
        }
        lines.push(Line::from(""));
        let reset_style = if active.is_empty() {
            theme::row_disabled()
        } else {
            theme::key_hint_key()
        };
        lines.push(Line::from(vec![
            Span::styled("r ", reset_style),
            Span::styled("Reset", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.mode {
            Mode::Browse => &[
                ("/ ", "search  "),
                ("f ", "filter  "),
                ("v ", "list/grid  "),
                ("Enter ", "detail  "),
                ("Esc ", "clear search"),
            ],
            Mode::Search { .. } => &[
                ("↑/↓ ", "suggestions  "),
                ("Enter ", "use suggestion  "),
                ("Ctrl+u ", "clear  "),
                ("Esc ", "close"),
            ],
            Mode::Filter { .. } => &[
                ("j/k ", "move  "),
                ("Space ", "toggle  "),
                ("r ", "reset  "),
                ("Esc ", "close"),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(*key, theme::key_hint_key()));
            spans.push(Span::styled(*label, theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn name_style(dev: &DeviceRecord, selected: bool) -> Style {
    let fg = if dev.id().is_some() {
        theme::NEON_CYAN
    } else {
        theme::BORDER_GRAY
    };
    let modifier = if selected {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };
    Style::default().fg(fg).add_modifier(modifier)
}

fn render_card(frame: &mut Frame, area: Rect, dev: &DeviceRecord, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", placeholder_glyph(dev)), theme::glyph()),
            Span::raw(" "),
            Span::styled(dev.product_name().to_owned(), name_style(dev, selected)),
        ]),
        Line::from(Span::styled(
            dev.card_caption().to_owned(),
            Style::default().fg(theme::CORAL),
        )),
        Line::from(Span::styled(dev.line_name().to_owned(), theme::table_row())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

impl Component for DevicesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search { highlighted } => self.handle_search_key(key, highlighted),
            Mode::Filter { cursor } => self.handle_filter_key(key, cursor),
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewUpdated(view) = action {
            self.view = Arc::clone(view);
            self.select(self.selected);
            let stale = matches!(
                self.mode,
                Mode::Search { highlighted: Some(i) } if i >= self.view.suggestions.len()
            );
            if stale {
                self.mode = Mode::Search { highlighted: None };
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Devices ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // toolbar
            Constraint::Length(1),
            Constraint::Min(1),    // table or grid
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_toolbar(frame, layout[0]);
        self.render_body(frame, layout[2]);
        self.render_hints(frame, layout[3]);

        match self.mode {
            Mode::Search { highlighted } => self.render_suggestions(frame, layout[2], highlighted),
            Mode::Filter { cursor } => self.render_filter(frame, layout[2], cursor),
            Mode::Browse => {}
        }
    }

    fn captures_input(&self) -> bool {
        self.mode != Mode::Browse
    }
}
