use tuirealm::NoUserEvent;

use crate::ui_realm::tests::harness::{EventDriver, MockTerminal, send_keys as harness_send_keys};
use crossterm::event::KeyCode;
use tuirealm::Application;
use tuirealm::PollStrategy;

/// Render a mounted component to a String.
///
/// This is a thin wrapper around `MockTerminal::buffer_as_string()` that handles
/// the component view rendering first.
pub fn render_component<I: Clone + Eq + PartialEq + std::hash::Hash, M: Clone + PartialEq>(
    app: &mut Application<I, M, NoUserEvent>,
    id: I,
    terminal: &mut MockTerminal,
) -> String {
    terminal.draw(|frame| {
        app.view(&id, frame, frame.area());
    });
    terminal.buffer_as_string()
}

/// Send keys to an application and collect the resulting messages.
///
/// Injects the key events into the driver, ticks the application `poll_count`
/// times, and returns every message produced.
pub fn send_key_to_component<I: Clone + Eq + PartialEq + std::hash::Hash, M: Clone + PartialEq>(
    driver: &EventDriver,
    app: &mut Application<I, M, NoUserEvent>,
    keys: &[KeyCode],
    poll_count: usize,
) -> Vec<M> {
    harness_send_keys(driver, keys);

    let mut messages = Vec::new();
    for _ in 0..poll_count {
        if let Ok(msgs) = app.tick(PollStrategy::UpTo(8)) {
            messages.extend(msgs);
        }
    }
    messages
}

/// Mount a component for testing with default setup.
///
/// Creates an Application on the driver's listener config, mounts the
/// component with empty props, and gives it focus.
pub fn mount_component_for_test<I, M>(
    driver: &EventDriver,
    id: I,
    component: Box<dyn tuirealm::Component<M, NoUserEvent>>,
) -> Application<I, M, NoUserEvent>
where
    I: Clone + Eq + PartialEq + std::hash::Hash + 'static,
    M: Clone + PartialEq + 'static,
{
    let mut app: Application<I, M, NoUserEvent> = Application::init(driver.listener_cfg());
    app.mount(id.clone(), component, vec![])
        .expect("component should mount");
    app.active(&id).expect("component should become active");
    app
}

/// Mount a component without giving it focus.
pub fn mount_component<I, M>(
    driver: &EventDriver,
    id: I,
    component: Box<dyn tuirealm::Component<M, NoUserEvent>>,
) -> Application<I, M, NoUserEvent>
where
    I: Clone + Eq + PartialEq + std::hash::Hash + 'static,
    M: Clone + PartialEq + 'static,
{
    let mut app: Application<I, M, NoUserEvent> = Application::init(driver.listener_cfg());
    app.mount(id, component, vec![])
        .expect("component should mount");
    app
}

/// Render a component into a small default-size terminal.
pub fn render_simple_component<
    I: Clone + Eq + PartialEq + std::hash::Hash,
    M: Clone + PartialEq,
>(
    app: &mut Application<I, M, NoUserEvent>,
    id: I,
) -> String {
    let mut terminal = MockTerminal::new(40, 10);
    render_component(app, id, &mut terminal)
}

/// Example test demonstrating helper usage.
#[test]
fn example_test() {
    use crate::ui_realm::tests::harness::{ExampleComponent, HarnessComponentId, HarnessMsg};

    let driver = EventDriver::default();
    let component = Box::new(ExampleComponent::default());
    let mut app = mount_component_for_test(&driver, HarnessComponentId::Example, component);

    let output = render_simple_component(&mut app, HarnessComponentId::Example);
    assert!(
        output.contains("input:"),
        "render should contain the input prompt"
    );

    let messages = send_key_to_component(&driver, &mut app, &[KeyCode::Char('9')], 1);
    assert!(
        messages.contains(&HarnessMsg::Edited("9".to_string())),
        "typing should produce an Edited message"
    );

    let output = render_simple_component(&mut app, HarnessComponentId::Example);
    assert!(
        output.contains("input: 9"),
        "after typing, the buffer should render"
    );
}

/// Test render_component with explicit terminal dimensions.
#[test]
fn render_with_custom_dimensions() {
    use crate::ui_realm::tests::harness::{ExampleComponent, HarnessComponentId};

    let driver = EventDriver::default();
    let component = Box::new(ExampleComponent::default());
    let mut app = mount_component(&driver, HarnessComponentId::Example, component);

    let mut terminal = MockTerminal::new(80, 24);
    let output = render_component(&mut app, HarnessComponentId::Example, &mut terminal);
    assert!(!output.is_empty(), "render should produce output");
}

/// Test send_key_to_component with multiple keys.
#[test]
fn send_multiple_keys() {
    use crate::ui_realm::tests::harness::{ExampleComponent, HarnessComponentId, HarnessMsg};

    let driver = EventDriver::default();
    let component = Box::new(ExampleComponent::default());
    let mut app = mount_component_for_test(&driver, HarnessComponentId::Example, component);

    let messages = send_key_to_component(
        &driver,
        &mut app,
        &[KeyCode::Char('1'), KeyCode::Char('2'), KeyCode::Char('3')],
        1,
    );

    let edit_count = messages
        .iter()
        .filter(|m| matches!(m, HarnessMsg::Edited(_)))
        .count();
    assert_eq!(
        edit_count, 3,
        "three keys should produce three Edited messages"
    );
}
