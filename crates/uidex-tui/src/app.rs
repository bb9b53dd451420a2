//! Application core: event loop, screen management, action dispatch.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use uidex_core::{Catalog, CatalogConfig, DeviceDetail, QueryState, QueryWorker};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::location::Location;
use crate::query_bridge::spawn_query_bridge;
use crate::screen::ScreenId;
use crate::screens::{DetailScreen, DevicesScreen};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    catalog: Arc<Catalog>,
    config: CatalogConfig,
    /// Recomputes the device view off the input path.
    worker: QueryWorker,
    cancel: CancellationToken,
    active_screen: ScreenId,
    devices: DevicesScreen,
    /// Present while the detail screen is open.
    detail: Option<DetailScreen>,
    location: Location,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Must be called inside a tokio runtime: the query worker is spawned
    /// immediately.
    pub fn new(
        catalog: Arc<Catalog>,
        config: CatalogConfig,
        initial: QueryState,
        location: Location,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let worker = QueryWorker::spawn(
            Arc::clone(&catalog),
            initial,
            config.suggestion_limit,
            config.settle,
            cancel.clone(),
        );
        let devices = DevicesScreen::new(worker.current(), catalog.line_options().to_vec());

        Self {
            catalog,
            config,
            worker,
            cancel,
            active_screen: ScreenId::Devices,
            devices,
            detail: None,
            location,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    fn active(&self) -> &dyn Component {
        if self.active_screen == ScreenId::Detail {
            if let Some(detail) = &self.detail {
                return detail;
            }
        }
        &self.devices
    }

    fn active_mut(&mut self) -> &mut dyn Component {
        if self.active_screen == ScreenId::Detail {
            if let Some(detail) = self.detail.as_mut() {
                return detail;
            }
        }
        &mut self.devices
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let bridge = tokio::spawn(spawn_query_bridge(
            self.worker.subscribe(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(Duration::from_millis(33));
        let (width, height) = tui.size().unwrap_or((80, 24));
        info!(width, height, location = %self.location, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.cancel.cancel();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here unless
    /// the active screen is capturing text input.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if !self.active().captures_input() {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                _ => {}
            }
        }

        self.active_mut().handle_key_event(key)
    }

    /// Process a single action: update app state and forward query edits to
    /// the worker.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render => {}

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::OpenDetail(id) => self.open_detail(id),

            Action::GoBack => self.go_back(),

            Action::SetSearch(search) => {
                let search = search.clone();
                self.worker.update(move |state| state.search = search);
            }

            Action::ToggleLine(id) => {
                self.worker.update(|state| {
                    state.lines.toggle(id);
                });
            }

            Action::ResetLines => self.worker.update(|state| state.lines.clear()),

            Action::ToggleViewMode => {
                let next = self.worker.pending().view.toggled();
                self.worker.update(|state| state.view = next);
                self.location.set_view(next);
                debug!(view = %next, location = %self.location, "view mode changed");
            }

            Action::ViewUpdated(_) => {
                if let Some(follow_up) = self.devices.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    /// Open the detail screen for `id`. Unknown ids show the not-found
    /// state.
    pub fn open_detail(&mut self, id: &str) {
        let detail = self.catalog.find(id).map(|device| {
            DeviceDetail::new(device, &self.config.images, self.config.hero_image_size)
        });
        if detail.is_none() {
            warn!(id, "no device with this id");
        }

        self.detail = Some(DetailScreen::new(id, detail));
        self.location.open_device(id);
        self.active_screen = ScreenId::Detail;
        debug!(location = %self.location, "opened detail");
    }

    fn go_back(&mut self) {
        if self.active_screen != ScreenId::Detail {
            return;
        }
        self.detail = None;
        self.active_screen = ScreenId::Devices;
        self.location.open_devices(self.worker.pending().view);
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.active().render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                self.active_screen.label(),
                Style::default().fg(theme::ELECTRIC_PURPLE),
            ),
            Span::raw("  "),
            Span::styled(self.location.to_string(), Style::default().fg(theme::CORAL)),
            Span::styled(
                format!("  {} devices", self.catalog.len()),
                theme::key_hint(),
            ),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn help_line(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
        Span::styled(label, theme::key_hint()),
    ])
}

fn help_section(title: &'static str) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default().fg(theme::NEON_CYAN),
        )),
        Line::from(Span::styled(
            format!("  {}", "─".repeat(title.chars().count())),
            theme::key_hint(),
        )),
    ]
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 60u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let help_area = Rect::new(
        area.x + area.width.saturating_sub(help_width) / 2,
        area.y + area.height.saturating_sub(help_height) / 2,
        help_width,
        help_height,
    );

    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let mut lines = vec![Line::from("")];
    lines.extend(help_section("Devices"));
    lines.extend([
        help_line("j/k ↑/↓", "Move up/down"),
        help_line("h/l", "Move left/right (grid)"),
        help_line("g/G", "Top / bottom"),
        help_line("/", "Search with suggestions"),
        help_line("f", "Product line filter"),
        help_line("v", "Toggle list / grid"),
        help_line("Enter", "Open device detail"),
        Line::from(""),
    ]);
    lines.extend(help_section("Detail"));
    lines.extend([
        help_line("j", "Toggle raw JSON"),
        help_line("Esc", "Back to device list"),
        Line::from(""),
    ]);
    lines.extend(help_section("Global"));
    lines.extend([
        help_line("?", "This help"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "                         Esc or ? to close",
            theme::key_hint(),
        )),
    ]);

    frame.render_widget(Paragraph::new(lines), inner);
}
