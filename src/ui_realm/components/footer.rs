use tuirealm::command::{Cmd, CmdResult};
use tuirealm::props::{AttrValue, Attribute, Props};
use tuirealm::ratatui::layout::{Alignment, Rect};
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::Span;
use tuirealm::ratatui::widgets::{Block, Borders};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State};

use crate::theme::Theme;
use crate::ui_realm::messages::Msg;

const DEFAULT_HINTS: &str =
    "Tab: next section  Up/Down: field  Left/Right: category  Ctrl+S: submit  Ctrl+R: reset  Esc: quit";

pub struct Footer {
    props: Props,
    theme: Theme,
}

impl Footer {
    pub fn new(theme: Theme) -> Self {
        Self {
            props: Props::default(),
            theme,
        }
    }

    fn notice(&self) -> String {
        self.props
            .get(Attribute::Text)
            .map(|v| match v {
                AttrValue::String(s) if !s.is_empty() => s.clone(),
                _ => DEFAULT_HINTS.to_string(),
            })
            .unwrap_or_else(|| DEFAULT_HINTS.to_string())
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        if let Some(text) = notice {
            self.props.set(Attribute::Text, AttrValue::String(text));
        }
    }
}

impl MockComponent for Footer {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let notice = self.notice();
        let block = Block::default()
            .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(
                format!(" {notice} "),
                Style::default().fg(self.theme.hint),
            ))
            .title_alignment(Alignment::Center);
        frame.render_widget(block, area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for Footer {
    fn on(&mut self, _ev: Event<NoUserEvent>) -> Option<Msg> {
        None
    }
}

#[cfg(test)]
use crate::ui_realm::ComponentId;
#[cfg(test)]
use crate::ui_realm::tests::harness::{EventDriver, MockTerminal};
#[cfg(test)]
use crate::ui_realm::tests::helpers::{mount_component_for_test, render_component};

#[cfg(test)]
#[test]
fn renders_default_hints() {
    let driver = EventDriver::default();
    let component = Box::new(Footer::new(Theme::default()));
    let mut app = mount_component_for_test(&driver, ComponentId::Footer, component);
    let mut terminal = MockTerminal::new(110, 3);
    let rendered = render_component(&mut app, ComponentId::Footer, &mut terminal);

    assert!(
        rendered.contains("Ctrl+S: submit"),
        "default hints should include the submit key"
    );
    assert!(
        rendered.contains("Esc: quit"),
        "default hints should include the quit key"
    );
}

#[cfg(test)]
#[test]
fn renders_custom_notice() {
    let driver = EventDriver::default();
    let mut component = Footer::new(Theme::default());
    component.set_notice(Some("dry run: submissions are previewed".to_string()));

    let mut app = mount_component_for_test(&driver, ComponentId::Footer, Box::new(component));
    let mut terminal = MockTerminal::new(60, 3);
    let rendered = render_component(&mut app, ComponentId::Footer, &mut terminal);

    assert!(
        rendered.contains("dry run: submissions are previewed"),
        "custom notice should be rendered"
    );
}

#[cfg(test)]
#[test]
fn empty_notice_falls_back_to_hints() {
    let driver = EventDriver::default();
    let mut component = Footer::new(Theme::default());
    component.set_notice(Some(String::new()));

    let mut app = mount_component_for_test(&driver, ComponentId::Footer, Box::new(component));
    let mut terminal = MockTerminal::new(110, 3);
    let rendered = render_component(&mut app, ComponentId::Footer, &mut terminal);

    assert!(
        rendered.contains("Ctrl+S: submit"),
        "empty notice should show default hints"
    );
}
