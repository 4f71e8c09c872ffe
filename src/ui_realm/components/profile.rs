use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent, KeyModifiers};
use tuirealm::props::{AttrValue, Attribute, PropPayload, PropValue, Props};
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::{Line, Span};
use tuirealm::ratatui::widgets::{Block, Borders, Paragraph};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State, StateValue};

use crate::form::{ProfileField, ProfileFields};
use crate::theme::Theme;
use crate::ui_realm::messages::Msg;

/// Pane with the static fields. Editing state is local; the canonical
/// (validated) values are pushed back through `Attribute::Content` after
/// every model update.
pub struct ProfilePane {
    props: Props,
    theme: Theme,
    values: Vec<String>,
    focused: usize,
}

impl ProfilePane {
    pub fn new(theme: Theme, profile: &ProfileFields) -> Self {
        Self {
            props: Props::default(),
            theme,
            values: ProfileField::ALL
                .iter()
                .map(|field| profile.get(*field).to_string())
                .collect(),
            focused: 0,
        }
    }

    fn has_focus(&self) -> bool {
        matches!(
            self.props.get(Attribute::Focus),
            Some(AttrValue::Flag(true))
        )
    }

    fn focused_field(&self) -> ProfileField {
        ProfileField::ALL[self.focused]
    }

    fn focus_next(&mut self) -> Msg {
        self.focused = (self.focused + 1) % ProfileField::ALL.len();
        Msg::FocusChanged
    }

    fn focus_previous(&mut self) -> Msg {
        let len = ProfileField::ALL.len();
        self.focused = (self.focused + len - 1) % len;
        Msg::FocusChanged
    }

    fn accepts_char(&self, ch: char) -> bool {
        if self.focused_field().is_numeric() {
            ch.is_ascii_digit() || ch == '.' || ch == '-'
        } else {
            !ch.is_control()
        }
    }

    fn edited(&self) -> Msg {
        Msg::ProfileEdited {
            field: self.focused_field(),
            value: self.values[self.focused].clone(),
        }
    }
}

impl MockComponent for ProfilePane {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused_pane = self.has_focus();
        let border = if focused_pane {
            self.theme.focus
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Profile ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines: Vec<Line> = ProfileField::ALL
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let label_style = if focused_pane && index == self.focused {
                    Style::default().fg(self.theme.focus)
                } else {
                    Style::default().fg(self.theme.label)
                };
                let mut spans = vec![
                    Span::styled(format!("{:<18}", field.label()), label_style),
                    Span::styled(
                        self.values[index].clone(),
                        Style::default().fg(self.theme.value),
                    ),
                ];
                if focused_pane && index == self.focused {
                    spans.push(Span::styled(
                        "█",
                        Style::default().bg(self.theme.focus).fg(self.theme.focus),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if attr == Attribute::Content
            && let AttrValue::Payload(PropPayload::Vec(values)) = &value
        {
            self.values = values
                .iter()
                .map(|entry| match entry {
                    PropValue::Str(text) => text.clone(),
                    _ => String::new(),
                })
                .collect();
        }
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::U16(self.focused as u16))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for ProfilePane {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent { code: Key::Esc, .. }) => Some(Msg::Quit),
            Event::Keyboard(KeyEvent { code: Key::Tab, .. }) => Some(Msg::FocusNextSection),
            Event::Keyboard(KeyEvent {
                code: Key::BackTab, ..
            }) => Some(Msg::FocusPreviousSection),
            Event::Keyboard(KeyEvent {
                code: Key::Down | Key::Enter,
                modifiers: KeyModifiers::NONE,
            }) => Some(self.focus_next()),
            Event::Keyboard(KeyEvent {
                code: Key::Up,
                modifiers: KeyModifiers::NONE,
            }) => Some(self.focus_previous()),
            Event::Keyboard(KeyEvent {
                code: Key::Char('s'),
                modifiers: KeyModifiers::CONTROL,
            }) => Some(Msg::Submit),
            Event::Keyboard(KeyEvent {
                code: Key::Char('r'),
                modifiers: KeyModifiers::CONTROL,
            }) => Some(Msg::ResetForm),
            Event::Keyboard(KeyEvent {
                code: Key::Backspace,
                ..
            }) => {
                if self.values[self.focused].pop().is_some() {
                    Some(self.edited())
                } else {
                    None
                }
            }
            Event::Keyboard(KeyEvent {
                code: Key::Char(ch),
                modifiers,
            }) if !modifiers.contains(KeyModifiers::CONTROL)
                && !modifiers.contains(KeyModifiers::ALT)
                && self.accepts_char(ch) =>
            {
                self.values[self.focused].push(ch);
                Some(self.edited())
            }
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
fn test_pane() -> ProfilePane {
    ProfilePane::new(Theme::default(), &ProfileFields::default())
}

#[cfg(test)]
#[test]
fn renders_all_field_labels() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));
    let mut terminal = MockTerminal::new(60, 12);
    let output = render_component(&mut app, ComponentId::Profile, &mut terminal);

    for field in ProfileField::ALL {
        assert!(
            output.contains(field.label()),
            "label {:?} should render",
            field.label()
        );
    }
}

#[cfg(test)]
#[test]
fn typing_emits_profile_edits() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Char('J')], 1);
    assert_eq!(
        messages,
        vec![Msg::ProfileEdited {
            field: ProfileField::UserName,
            value: "J".to_string(),
        }]
    );

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Backspace], 1);
    assert_eq!(
        messages,
        vec![Msg::ProfileEdited {
            field: ProfileField::UserName,
            value: String::new(),
        }]
    );

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Backspace], 1);
    assert!(
        messages.is_empty(),
        "backspace on empty field should not emit"
    );
}

#[cfg(test)]
#[test]
fn numeric_fields_reject_letters() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));

    // Move from user name to current age.
    let _ = send_key_to_component(&driver, &mut app, &[KeyCode::Down], 1);

    let rejected = send_key_to_component(&driver, &mut app, &[KeyCode::Char('x')], 1);
    assert!(rejected.is_empty(), "letters are not numeric input");

    let accepted = send_key_to_component(&driver, &mut app, &[KeyCode::Char('3')], 1);
    assert_eq!(
        accepted,
        vec![Msg::ProfileEdited {
            field: ProfileField::CurrentAge,
            value: "3".to_string(),
        }]
    );
}

#[cfg(test)]
#[test]
fn field_focus_wraps() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));

    let up = send_key_to_component(&driver, &mut app, &[KeyCode::Up], 1);
    assert_eq!(up, vec![Msg::FocusChanged]);

    // Up from the first field lands on the last one.
    let typed = send_key_to_component(&driver, &mut app, &[KeyCode::Char('7')], 1);
    assert_eq!(
        typed,
        vec![Msg::ProfileEdited {
            field: ProfileField::InvestmentCorpus,
            value: "7".to_string(),
        }]
    );
}

#[cfg(test)]
#[test]
fn section_and_lifecycle_keys() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));

    let tab = send_key_to_component(&driver, &mut app, &[KeyCode::Tab], 1);
    assert_eq!(tab, vec![Msg::FocusNextSection]);

    let esc = send_key_to_component(&driver, &mut app, &[KeyCode::Esc], 1);
    assert_eq!(esc, vec![Msg::Quit]);

    driver.send_key_event(crossterm::event::KeyEvent::new(
        KeyCode::Char('s'),
        crossterm::event::KeyModifiers::CONTROL,
    ));
    let submit = send_key_to_component(&driver, &mut app, &[], 1);
    assert_eq!(submit, vec![Msg::Submit]);
}

#[cfg(test)]
#[test]
fn content_attr_replaces_values_without_moving_focus() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(&driver, ComponentId::Profile, Box::new(test_pane()));

    let _ = send_key_to_component(&driver, &mut app, &[KeyCode::Down, KeyCode::Down], 1);

    let canonical: Vec<PropValue> = ProfileField::ALL
        .iter()
        .map(|field| {
            PropValue::Str(if *field == ProfileField::UserName {
                "Priya".to_string()
            } else {
                String::new()
            })
        })
        .collect();
    app.attr(
        &ComponentId::Profile,
        Attribute::Content,
        AttrValue::Payload(PropPayload::Vec(canonical)),
    )
    .expect("content attr should apply");

    let mut terminal = MockTerminal::new(60, 12);
    let output = render_component(&mut app, ComponentId::Profile, &mut terminal);
    assert!(output.contains("Priya"), "synced value should render");

    // Focus stayed on the third field.
    let typed = send_key_to_component(&driver, &mut app, &[KeyCode::Char('5')], 1);
    assert_eq!(
        typed,
        vec![Msg::ProfileEdited {
            field: ProfileField::RetirementAge,
            value: "5".to_string(),
        }]
    );
}
