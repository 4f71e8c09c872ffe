use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent, KeyModifiers};
use tuirealm::props::{AttrValue, Attribute, PropPayload, PropValue, Props};
use tuirealm::ratatui::layout::{Constraint, Direction, Layout, Rect};
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::{Line, Span};
use tuirealm::ratatui::widgets::{Block, Borders, Paragraph};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State, StateValue};

use crate::form::{GoalField, GoalRow};
use crate::theme::Theme;
use crate::ui_realm::messages::Msg;

/// Attribute key carrying the per-option availability flags.
pub const DISABLED_FLAGS: &str = "disabled-options";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category,
    Target,
    Years,
}

/// One goal row: a category selector plus the target amount and horizon
/// inputs. The selector only offers the blank entry and options the
/// coordinator has left enabled, so a disabled category cannot be picked.
pub struct GoalRowView {
    props: Props,
    theme: Theme,
    index: usize,
    labels: Vec<String>,
    selected: Option<usize>,
    target: String,
    years: String,
    disabled: Vec<bool>,
    focused: Field,
}

impl GoalRowView {
    pub fn new(index: usize, labels: Vec<String>, row: &GoalRow, theme: Theme) -> Self {
        Self {
            props: Props::default(),
            theme,
            index,
            labels,
            selected: row.selected,
            target: row.target_amount.clone(),
            years: row.horizon_years.clone(),
            disabled: row.disabled.clone(),
            focused: Field::Category,
        }
    }

    fn has_focus(&self) -> bool {
        matches!(
            self.props.get(Attribute::Focus),
            Some(AttrValue::Flag(true))
        )
    }

    /// Selectable choices in display order: blank first, then every option
    /// not currently disabled for this row.
    fn selectable(&self) -> Vec<Option<usize>> {
        let mut choices = vec![None];
        choices.extend(
            (0..self.labels.len())
                .filter(|option| !self.disabled.get(*option).copied().unwrap_or(false))
                .map(Some),
        );
        choices
    }

    fn cycle_selection(&mut self, forward: bool) -> Msg {
        let choices = self.selectable();
        let current = choices
            .iter()
            .position(|choice| *choice == self.selected)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.selected = choices[next];
        Msg::CategorySelected {
            row: self.index,
            choice: self.selected,
        }
    }

    fn focus_next(&mut self) -> Msg {
        self.focused = match self.focused {
            Field::Category => Field::Target,
            Field::Target => Field::Years,
            Field::Years => Field::Category,
        };
        Msg::FocusChanged
    }

    fn focus_previous(&mut self) -> Msg {
        self.focused = match self.focused {
            Field::Category => Field::Years,
            Field::Target => Field::Category,
            Field::Years => Field::Target,
        };
        Msg::FocusChanged
    }

    fn edited(&self) -> Msg {
        let (field, value) = match self.focused {
            Field::Target => (GoalField::TargetAmount, self.target.clone()),
            Field::Years => (GoalField::HorizonYears, self.years.clone()),
            Field::Category => unreachable!("category field carries no text"),
        };
        Msg::GoalEdited {
            row: self.index,
            field,
            value,
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            Field::Target => Some(&mut self.target),
            Field::Years => Some(&mut self.years),
            Field::Category => None,
        }
    }

    fn category_text(&self) -> String {
        match self.selected.and_then(|choice| self.labels.get(choice)) {
            Some(label) => format!("< {label} >"),
            None => "< (none) >".to_string(),
        }
    }

    fn render_cell(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        field: Field,
        with_cursor: bool,
    ) {
        let focused = self.has_focus() && self.focused == field;
        let label_style = if focused {
            Style::default().fg(self.theme.focus)
        } else {
            Style::default().fg(self.theme.label)
        };
        let mut spans = vec![
            Span::styled(format!("{label} "), label_style),
            Span::styled(value.to_string(), Style::default().fg(self.theme.value)),
        ];
        if focused && with_cursor {
            spans.push(Span::styled(
                "█",
                Style::default().bg(self.theme.focus).fg(self.theme.focus),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl MockComponent for GoalRowView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.has_focus() {
            self.theme.focus
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Goal {} ", self.index + 1))
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(24),
                Constraint::Length(22),
                Constraint::Length(14),
            ])
            .split(inner);

        let category = self.category_text();
        self.render_cell(frame, cells[0], "Category", &category, Field::Category, false);
        let target = self.target.clone();
        self.render_cell(frame, cells[1], "Target", &target, Field::Target, true);
        let years = self.years.clone();
        self.render_cell(frame, cells[2], "Years", &years, Field::Years, true);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        match (&attr, &value) {
            (Attribute::Value, AttrValue::Payload(PropPayload::Tup3((sel, target, years)))) => {
                self.selected = match sel {
                    PropValue::U64(0) => None,
                    PropValue::U64(n) => Some((*n as usize) - 1),
                    _ => self.selected,
                };
                if let PropValue::Str(text) = target {
                    self.target = text.clone();
                }
                if let PropValue::Str(text) = years {
                    self.years = text.clone();
                }
            }
            (Attribute::Custom(DISABLED_FLAGS), AttrValue::Payload(PropPayload::Vec(flags))) => {
                self.disabled = flags
                    .iter()
                    .map(|flag| matches!(flag, PropValue::Bool(true)))
                    .collect();
            }
            _ => {}
        }
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        let selected = self.selected.map(|choice| choice as u64 + 1).unwrap_or(0);
        State::One(StateValue::U64(selected))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for GoalRowView {
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
                code: Key::Left,
                modifiers: KeyModifiers::NONE,
            }) if self.focused == Field::Category => Some(self.cycle_selection(false)),
            Event::Keyboard(KeyEvent {
                code: Key::Right,
                modifiers: KeyModifiers::NONE,
            }) if self.focused == Field::Category => Some(self.cycle_selection(true)),
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
                if self.active_input_mut()?.pop().is_some() {
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
                && (ch.is_ascii_digit() || ch == '.' || ch == '-') =>
            {
                self.active_input_mut()?.push(ch);
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
fn test_row(disabled: Vec<bool>) -> GoalRowView {
    let row = GoalRow {
        selected: None,
        target_amount: String::new(),
        horizon_years: String::new(),
        disabled,
    };
    GoalRowView::new(
        0,
        vec!["A".to_string(), "B".to_string(), "C".to_string()],
        &row,
        Theme::default(),
    )
}

#[cfg(test)]
#[test]
fn renders_blank_selector() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false; 3])),
    );
    let mut terminal = MockTerminal::new(70, 4);
    let output = render_component(&mut app, ComponentId::GoalRow(0), &mut terminal);

    assert!(output.contains("Goal 1"), "row title should render");
    assert!(output.contains("(none)"), "blank selection should render");
    assert!(output.contains("Target"), "target cell should render");
    assert!(output.contains("Years"), "years cell should render");
}

#[cfg(test)]
#[test]
fn selector_cycles_enabled_options_only() {
    let driver = EventDriver::default();
    // B is taken by another row.
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false, true, false])),
    );

    let first = send_key_to_component(&driver, &mut app, &[KeyCode::Right], 1);
    assert_eq!(
        first,
        vec![Msg::CategorySelected {
            row: 0,
            choice: Some(0),
        }]
    );

    // Next step skips the disabled B and lands on C.
    let second = send_key_to_component(&driver, &mut app, &[KeyCode::Right], 1);
    assert_eq!(
        second,
        vec![Msg::CategorySelected {
            row: 0,
            choice: Some(2),
        }]
    );

    // One more wraps back to blank: blank is always reachable.
    let third = send_key_to_component(&driver, &mut app, &[KeyCode::Right], 1);
    assert_eq!(third, vec![Msg::CategorySelected { row: 0, choice: None }]);
}

#[cfg(test)]
#[test]
fn selector_cycles_backwards() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false; 3])),
    );

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Left], 1);
    assert_eq!(
        messages,
        vec![Msg::CategorySelected {
            row: 0,
            choice: Some(2),
        }]
    );
}

#[cfg(test)]
#[test]
fn numeric_inputs_emit_goal_edits() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false; 3])),
    );

    // Move focus from the selector to the target input.
    let _ = send_key_to_component(&driver, &mut app, &[KeyCode::Down], 1);

    let typed = send_key_to_component(&driver, &mut app, &[KeyCode::Char('5')], 1);
    assert_eq!(
        typed,
        vec![Msg::GoalEdited {
            row: 0,
            field: GoalField::TargetAmount,
            value: "5".to_string(),
        }]
    );

    let rejected = send_key_to_component(&driver, &mut app, &[KeyCode::Char('x')], 1);
    assert!(rejected.is_empty(), "letters are not numeric input");

    // Typing on the selector emits nothing.
    let _ = send_key_to_component(&driver, &mut app, &[KeyCode::Up], 1);
    let on_selector = send_key_to_component(&driver, &mut app, &[KeyCode::Char('5')], 1);
    assert!(on_selector.is_empty(), "selector accepts no text input");
}

#[cfg(test)]
#[test]
fn disabled_flags_update_via_attr() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false; 3])),
    );

    app.attr(
        &ComponentId::GoalRow(0),
        Attribute::Custom(DISABLED_FLAGS),
        AttrValue::Payload(PropPayload::Vec(vec![
            PropValue::Bool(true),
            PropValue::Bool(true),
            PropValue::Bool(false),
        ])),
    )
    .expect("disabled flags attr should apply");

    // Only C remains selectable after blank.
    let first = send_key_to_component(&driver, &mut app, &[KeyCode::Right], 1);
    assert_eq!(
        first,
        vec![Msg::CategorySelected {
            row: 0,
            choice: Some(2),
        }]
    );
}

#[cfg(test)]
#[test]
fn value_attr_replaces_row_snapshot() {
    let driver = EventDriver::default();
    let mut app = mount_component_for_test(
        &driver,
        ComponentId::GoalRow(0),
        Box::new(test_row(vec![false; 3])),
    );

    app.attr(
        &ComponentId::GoalRow(0),
        Attribute::Value,
        AttrValue::Payload(PropPayload::Tup3((
            PropValue::U64(2),
            PropValue::Str("800000".to_string()),
            PropValue::Str("15".to_string()),
        ))),
    )
    .expect("value attr should apply");

    let mut terminal = MockTerminal::new(70, 4);
    let output = render_component(&mut app, ComponentId::GoalRow(0), &mut terminal);
    assert!(output.contains("< B >"), "synced selection should render");
    assert!(output.contains("800000"), "synced target should render");
    assert!(output.contains("15"), "synced years should render");
}
