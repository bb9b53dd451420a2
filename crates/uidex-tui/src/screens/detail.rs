//! Device detail screen: hero image, device specs, and a collapsible raw JSON
//! panel. Unknown ids render a not-found message instead.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use uidex_core::{DeviceDetail, HeroImage};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const RAW_TOGGLE_LABEL: &str = "See All Details as JSON";
const SPEC_LABEL_WIDTH: usize = 18;

pub struct DetailScreen {
    id: String,
    detail: Option<DeviceDetail>,
    raw_visible: bool,
    raw_scroll: u16,
}

impl DetailScreen {
    pub fn new(id: impl Into<String>, detail: Option<DeviceDetail>) -> Self {
        Self {
            id: id.into(),
            detail,
            raw_visible: false,
            raw_scroll: 0,
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("We couldn't find a device for ID \"{}\".", self.id)
    }

    fn render_not_found(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(self.not_found_message(), theme::notice())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("Back to device list", theme::key_hint()),
            ]),
        ];
        let y_offset = area.height.saturating_sub(3) / 2;
        let centered = Rect {
            y: area.y + y_offset,
            height: 3.min(area.height),
            ..area
        };
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &DeviceDetail) {
        let spec_rows = u16::try_from(detail.specs.len()).unwrap_or(u16::MAX);
        let layout = Layout::vertical([
            Constraint::Length(spec_rows.saturating_add(5)), // media + specs
            Constraint::Length(1),                           // raw toggle
            Constraint::Min(0),                              // raw panel
            Constraint::Length(1),                           // hints
        ])
        .split(area);

        let panel = Layout::horizontal([Constraint::Length(30), Constraint::Min(1)]).split(layout[0]);
        render_media(frame, panel[0], &detail.hero);
        render_specs(frame, panel[1], detail);

        let arrow = if self.raw_visible { "▾" } else { "▸" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {arrow} "), theme::key_hint_key()),
                Span::styled(RAW_TOGGLE_LABEL, Style::default().fg(theme::NEON_CYAN)),
            ])),
            layout[1],
        );

        if self.raw_visible {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            frame.render_widget(
                Paragraph::new(detail.raw_json.as_str())
                    .style(theme::table_row())
                    .scroll((self.raw_scroll, 0))
                    .block(block),
                layout[2],
            );
        }

        let mut hints = vec![
            Span::styled("  j ", theme::key_hint_key()),
            Span::styled("toggle JSON  ", theme::key_hint()),
        ];
        if self.raw_visible {
            hints.push(Span::styled("↑/↓ ", theme::key_hint_key()));
            hints.push(Span::styled("scroll  ", theme::key_hint()));
        }
        hints.push(Span::styled("Esc ", theme::key_hint_key()));
        hints.push(Span::styled("back", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(hints)), layout[3]);
    }
}

fn render_media(frame: &mut Frame, area: Rect, hero: &HeroImage) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = match hero {
        HeroImage::Url(url) => Paragraph::new(vec![
            Line::from(Span::styled("Product image", theme::table_header())),
            Line::from(""),
            Line::from(Span::styled(url.as_str(), Style::default().fg(theme::CORAL))),
        ])
        .wrap(Wrap { trim: false }),
        HeroImage::Placeholder(glyph) => {
            let mut lines = vec![Line::from(""); usize::from(inner.height.saturating_sub(1) / 2)];
            lines.push(Line::from(Span::styled(format!("  {glyph}  "), theme::glyph())));
            Paragraph::new(lines).alignment(Alignment::Center)
        }
    };
    frame.render_widget(paragraph, inner);
}

fn render_specs(frame: &mut Frame, area: Rect, detail: &DeviceDetail) {
    let mut lines = vec![
        Line::from(Span::styled(detail.product_name.as_str(), theme::title_style())),
        Line::from(Span::styled(detail.line_name.as_str(), theme::table_row())),
        Line::from(""),
    ];
    for row in &detail.specs {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<SPEC_LABEL_WIDTH$}", row.label),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(row.value.as_str(), Style::default().fg(theme::NEON_CYAN)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

impl Component for DetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                return Ok(Some(Action::GoBack));
            }
            KeyCode::Char('j') if self.detail.is_some() => {
                self.raw_visible = !self.raw_visible;
                self.raw_scroll = 0;
            }
            KeyCode::Down if self.raw_visible => {
                self.raw_scroll = self.raw_scroll.saturating_add(1);
            }
            KeyCode::Up if self.raw_visible => {
                self.raw_scroll = self.raw_scroll.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" ← Devices ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.detail {
            Some(detail) => self.render_detail(frame, inner, detail),
            None => self.render_not_found(frame, inner),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use uidex_core::{DeviceRecord, HERO_IMAGE_SIZE, ImageProxy};

    fn detail() -> DeviceDetail {
        let device = DeviceRecord::from_value(serde_json::json!({
            "id": "dev1",
            "product": { "name": "Switch Pro 24" },
            "line": { "id": "unifi-network", "name": "UniFi Network" },
        }));
        DeviceDetail::new(&device, &ImageProxy::default(), HERO_IMAGE_SIZE)
    }

    fn press(screen: &mut DetailScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn rendered(screen: &DetailScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn not_found_names_the_id() {
        let screen = DetailScreen::new("nope", None);
        assert_eq!(
            screen.not_found_message(),
            "We couldn't find a device for ID \"nope\"."
        );
        let text = rendered(&screen);
        assert!(text.contains("We couldn't find a device for ID \"nope\"."));
        assert!(text.contains("Back to device list"));
    }

    #[test]
    fn renders_specs_and_placeholder() {
        let text = rendered(&DetailScreen::new("dev1", Some(detail())));
        assert!(text.contains("Switch Pro 24"));
        assert!(text.contains("Short Name"));
        assert!(text.contains("Not specified"));
        assert!(text.contains(" S "));
        assert!(text.contains(RAW_TOGGLE_LABEL));
    }

    #[test]
    fn j_toggles_raw_json() {
        let mut screen = DetailScreen::new("dev1", Some(detail()));
        assert!(!rendered(&screen).contains("\"unifi-network\""));

        assert!(press(&mut screen, KeyCode::Char('j')).is_none());
        assert!(screen.raw_visible);
        assert!(rendered(&screen).contains("\"unifi-network\""));

        press(&mut screen, KeyCode::Char('j'));
        assert!(!screen.raw_visible);
    }

    #[test]
    fn raw_toggle_ignored_when_not_found() {
        let mut screen = DetailScreen::new("nope", None);
        press(&mut screen, KeyCode::Char('j'));
        assert!(!screen.raw_visible);
    }

    #[test]
    fn escape_goes_back() {
        let mut screen = DetailScreen::new("dev1", Some(detail()));
        assert!(matches!(
            press(&mut screen, KeyCode::Esc),
            Some(Action::GoBack)
        ));
    }
}
