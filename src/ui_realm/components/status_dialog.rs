use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent};
use tuirealm::props::{AttrValue, Attribute, Props};
use tuirealm::ratatui::layout::{Alignment, Rect};
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::Line;
use tuirealm::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State};

use crate::theme::Theme;
use crate::ui_realm::messages::Msg;
use crate::ui_realm::model::StatusNotice;

/// Submission outcome overlay. Remounted with a fresh notice whenever the
/// model's status changes; it carries no editing state of its own.
pub struct StatusDialog {
    props: Props,
    theme: Theme,
    notice: StatusNotice,
}

impl StatusDialog {
    pub fn new(theme: Theme, notice: StatusNotice) -> Self {
        Self {
            props: Props::default(),
            theme,
            notice,
        }
    }
}

impl MockComponent for StatusDialog {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let border = if self.notice.is_error {
            self.theme.error
        } else {
            self.theme.success
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.notice.title))
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines: Vec<Line> = self
            .notice
            .lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::styled("Enter: close", Style::default().fg(self.theme.hint))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner);
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

impl Component<Msg, NoUserEvent> for StatusDialog {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent {
                code: Key::Enter | Key::Esc,
                ..
            }) => Some(Msg::DismissStatus),
            Event::Tick => Some(Msg::Tick),
            _ => None,
        }
    }
}

#[cfg(test)]
use crate::ui_realm::ComponentId;
#[cfg(test)]
use crate::ui_realm::tests::harness::{EventDriver, MockTerminal};
#[cfg(test)]
use crate::ui_realm::tests::helpers::{
    mount_component_for_test, render_component, send_key_to_component,
};
#[cfg(test)]
use crossterm::event::KeyCode;

#[cfg(test)]
fn test_dialog(is_error: bool) -> StatusDialog {
    StatusDialog::new(
        Theme::default(),
        StatusNotice {
            title: "Submitted".to_string(),
            lines: vec!["plan request accepted".to_string()],
            is_error,
        },
    )
}

#[cfg(test)]
#[test]
fn renders_notice() {
    let driver = EventDriver::default();
    let mut app =
        mount_component_for_test(&driver, ComponentId::Status, Box::new(test_dialog(false)));
    let mut terminal = MockTerminal::new(50, 8);
    let output = render_component(&mut app, ComponentId::Status, &mut terminal);

    assert!(output.contains("Submitted"), "title should render");
    assert!(
        output.contains("plan request accepted"),
        "detail lines should render"
    );
    assert!(output.contains("Enter: close"), "close hint should render");
}

#[cfg(test)]
#[test]
fn enter_and_esc_dismiss() {
    let driver = EventDriver::default();
    let mut app =
        mount_component_for_test(&driver, ComponentId::Status, Box::new(test_dialog(true)));

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Enter], 1);
    assert_eq!(messages, vec![Msg::DismissStatus]);

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Esc], 1);
    assert_eq!(messages, vec![Msg::DismissStatus]);
}
