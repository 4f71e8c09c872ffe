use tuirealm::application::ApplicationResult;
use tuirealm::listener::EventListenerCfg;
use tuirealm::props::{AttrValue, Attribute, PropPayload, PropValue};
use tuirealm::ratatui::layout::{Constraint, Direction, Layout, Rect};
use tuirealm::{Application, Frame, NoUserEvent, PollStrategy};

use super::ComponentId;
use super::components::goal_row::DISABLED_FLAGS;
use super::components::{Footer, GoalRowView, ProfilePane, StatusDialog};
use super::messages::Msg;
use super::model::Model;
use crate::form::ProfileField;
use crate::theme::Theme;

const PROFILE_PANE_HEIGHT: u16 = 11;
const GOAL_ROW_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 2;

/// Wrapper around the tui-realm `Application` that owns component
/// mounting, section focus routing, and pushing canonical model state
/// back into the mounted components.
pub struct TuiApplication {
    app: Application<ComponentId, Msg, NoUserEvent>,
    theme: Theme,
    row_count: usize,
    /// 0 is the profile pane; 1..=row_count are the goal rows.
    focused_section: usize,
    status_open: bool,
    synced_generation: u64,
}

impl TuiApplication {
    pub fn new(theme: Theme) -> Self {
        Self::with_listener(theme, EventListenerCfg::default())
    }

    pub fn with_listener(theme: Theme, listener_cfg: EventListenerCfg<NoUserEvent>) -> Self {
        Self {
            app: Application::init(listener_cfg),
            theme,
            row_count: 0,
            focused_section: 0,
            status_open: false,
            synced_generation: 0,
        }
    }

    pub fn tick(&mut self, strategy: PollStrategy) -> ApplicationResult<Vec<Msg>> {
        self.app.tick(strategy)
    }

    pub fn app(&self) -> &Application<ComponentId, Msg, NoUserEvent> {
        &self.app
    }

    pub fn view(&mut self, id: &ComponentId, frame: &mut Frame<'_>, area: Rect) {
        self.app.view(id, frame, area);
    }

    /// Mounts the form components from a model snapshot and focuses the
    /// profile pane.
    pub fn mount_all(&mut self, model: &Model) -> ApplicationResult<()> {
        self.row_count = model.row_count();
        self.focused_section = 0;
        self.status_open = false;
        self.synced_generation = model.generation();

        self.app.remount(
            ComponentId::Profile,
            Box::new(ProfilePane::new(self.theme, &model.form.profile)),
            vec![],
        )?;

        let labels: Vec<String> = model.form.catalog().labels().to_vec();
        for (index, row) in model.form.rows().iter().enumerate() {
            self.app.remount(
                ComponentId::GoalRow(index),
                Box::new(GoalRowView::new(index, labels.clone(), row, self.theme)),
                vec![],
            )?;
        }

        let mut footer = Footer::new(self.theme);
        if model.submit_config.dry_run {
            footer.set_notice(Some(
                "dry run: submissions are previewed, not sent".to_string(),
            ));
        }
        self.app
            .remount(ComponentId::Footer, Box::new(footer), vec![])?;

        self.app.active(&ComponentId::Profile)?;
        Ok(())
    }

    fn section_component(&self, section: usize) -> ComponentId {
        if section == 0 {
            ComponentId::Profile
        } else {
            ComponentId::GoalRow(section - 1)
        }
    }

    /// Routes Tab/BackTab between the profile pane and the goal rows.
    /// Section cycling is suspended while the status overlay is open.
    pub fn handle_focus(&mut self, msg: &Msg) -> ApplicationResult<bool> {
        if self.status_open {
            return Ok(false);
        }

        let sections = self.row_count + 1;
        let next = match msg {
            Msg::FocusNextSection => (self.focused_section + 1) % sections,
            Msg::FocusPreviousSection => (self.focused_section + sections - 1) % sections,
            _ => return Ok(false),
        };

        self.focused_section = next;
        self.app.active(&self.section_component(next))?;
        Ok(true)
    }

    /// Pushes canonical model state into the mounted components. A no-op
    /// unless the model's generation moved since the last sync.
    pub fn sync(&mut self, model: &Model) -> ApplicationResult<()> {
        if model.generation() == self.synced_generation {
            return Ok(());
        }

        let profile_values: Vec<PropValue> = ProfileField::ALL
            .iter()
            .map(|field| PropValue::Str(model.form.profile.get(*field).to_string()))
            .collect();
        self.app.attr(
            &ComponentId::Profile,
            Attribute::Content,
            AttrValue::Payload(PropPayload::Vec(profile_values)),
        )?;

        for (index, row) in model.form.rows().iter().enumerate() {
            let selected = row.selected.map(|choice| choice as u64 + 1).unwrap_or(0);
            self.app.attr(
                &ComponentId::GoalRow(index),
                Attribute::Value,
                AttrValue::Payload(PropPayload::Tup3((
                    PropValue::U64(selected),
                    PropValue::Str(row.target_amount.clone()),
                    PropValue::Str(row.horizon_years.clone()),
                ))),
            )?;
            self.app.attr(
                &ComponentId::GoalRow(index),
                Attribute::Custom(DISABLED_FLAGS),
                AttrValue::Payload(PropPayload::Vec(
                    row.disabled.iter().copied().map(PropValue::Bool).collect(),
                )),
            )?;
        }

        match (&model.status, self.status_open) {
            (Some(notice), _) => {
                self.app.remount(
                    ComponentId::Status,
                    Box::new(StatusDialog::new(self.theme, notice.clone())),
                    vec![],
                )?;
                self.app.active(&ComponentId::Status)?;
                self.status_open = true;
            }
            (None, true) => {
                if self.app.mounted(&ComponentId::Status) {
                    self.app.umount(&ComponentId::Status)?;
                }
                self.status_open = false;
                self.app
                    .active(&self.section_component(self.focused_section))?;
            }
            (None, false) => {}
        }

        self.synced_generation = model.generation();
        Ok(())
    }

    /// Renders the whole form into one frame.
    pub fn view_all(&mut self, frame: &mut Frame<'_>, model: &Model) {
        let area = frame.area();
        let goals_height = GOAL_ROW_HEIGHT * self.row_count as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PROFILE_PANE_HEIGHT),
                Constraint::Length(goals_height),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.app.view(&ComponentId::Profile, frame, chunks[0]);

        let row_constraints: Vec<Constraint> = (0..self.row_count)
            .map(|_| Constraint::Length(GOAL_ROW_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(chunks[1]);
        for index in 0..self.row_count {
            self.app
                .view(&ComponentId::GoalRow(index), frame, rows[index]);
        }

        self.app.view(&ComponentId::Footer, frame, chunks[3]);

        if self.status_open {
            let height = model
                .status
                .as_ref()
                .map(|notice| notice.lines.len() as u16 + 4)
                .unwrap_or(6);
            let overlay = centered_rect(area, 56, height);
            self.app.view(&ComponentId::Status, frame, overlay);
        }
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod application {
    use super::super::messages::Msg;
    use super::super::model::Model;
    use super::super::ComponentId;
    use super::TuiApplication;
    use crate::catalog::CategoryCatalog;
    use crate::form::FormState;
    use crate::submit::SubmitConfig;
    use crate::theme::Theme;
    use crate::ui_realm::tests::harness::{EventDriver, MockTerminal};
    use tuirealm::Update;

    fn test_model() -> Model {
        let form = FormState::new(CategoryCatalog::new(["A", "B", "C"]), 3);
        let config = SubmitConfig {
            dry_run: true,
            ..SubmitConfig::default()
        };
        Model::new(form, config)
    }

    fn test_app(model: &Model) -> TuiApplication {
        let driver = EventDriver::default();
        let mut app = TuiApplication::with_listener(Theme::default(), driver.listener_cfg());
        app.mount_all(model).expect("mount_all should succeed");
        app
    }

    fn apply(model: &mut Model, msg: Msg) {
        let mut next = Some(msg);
        while next.is_some() {
            next = model.update(next);
        }
    }

    #[test]
    fn mounts_form_components() {
        let model = test_model();
        let app = test_app(&model);

        assert!(app.app().mounted(&ComponentId::Profile));
        for index in 0..3 {
            assert!(app.app().mounted(&ComponentId::GoalRow(index)));
        }
        assert!(app.app().mounted(&ComponentId::Footer));
        assert!(!app.app().mounted(&ComponentId::Status));
        assert_eq!(app.app().focus(), Some(&ComponentId::Profile));
    }

    #[test]
    fn mount_all_is_idempotent() {
        let model = test_model();
        let mut app = test_app(&model);
        app.mount_all(&model)
            .expect("repeated mount_all should not fail");
        assert!(app.app().mounted(&ComponentId::Profile));
    }

    #[test]
    fn focus_cycles_through_sections() {
        let model = test_model();
        let mut app = test_app(&model);

        for expected in [
            ComponentId::GoalRow(0),
            ComponentId::GoalRow(1),
            ComponentId::GoalRow(2),
            ComponentId::Profile,
        ] {
            let routed = app
                .handle_focus(&Msg::FocusNextSection)
                .expect("focus routing should succeed");
            assert!(routed);
            assert_eq!(app.app().focus(), Some(&expected));
        }

        let routed = app
            .handle_focus(&Msg::FocusPreviousSection)
            .expect("focus routing should succeed");
        assert!(routed);
        assert_eq!(app.app().focus(), Some(&ComponentId::GoalRow(2)));
    }

    #[test]
    fn non_focus_messages_do_not_route() {
        let model = test_model();
        let mut app = test_app(&model);

        let routed = app
            .handle_focus(&Msg::Tick)
            .expect("focus routing should succeed");
        assert!(!routed);
        assert_eq!(app.app().focus(), Some(&ComponentId::Profile));
    }

    #[test]
    fn sync_pushes_selection_into_rows() {
        let mut model = test_model();
        let mut app = test_app(&model);

        apply(
            &mut model,
            Msg::CategorySelected {
                row: 0,
                choice: Some(1),
            },
        );
        app.sync(&model).expect("sync should succeed");

        let mut terminal = MockTerminal::new(70, 4);
        terminal.draw(|frame| {
            app.view(&ComponentId::GoalRow(0), frame, frame.area());
        });
        let output = terminal.buffer_as_string();
        assert!(output.contains("< B >"), "synced selection should render");
    }

    #[test]
    fn status_overlay_opens_and_closes_with_model() {
        let mut model = test_model();
        let mut app = test_app(&model);

        apply(&mut model, Msg::Submit);
        app.sync(&model).expect("sync should succeed");
        assert!(app.app().mounted(&ComponentId::Status));
        assert_eq!(app.app().focus(), Some(&ComponentId::Status));

        // Section cycling is suspended while the overlay is open.
        let routed = app
            .handle_focus(&Msg::FocusNextSection)
            .expect("focus routing should succeed");
        assert!(!routed);

        apply(&mut model, Msg::DismissStatus);
        app.sync(&model).expect("sync should succeed");
        assert!(!app.app().mounted(&ComponentId::Status));
        assert_eq!(app.app().focus(), Some(&ComponentId::Profile));
    }

    #[test]
    fn view_all_renders_every_section() {
        let mut model = test_model();
        let mut app = test_app(&model);

        let mut terminal = MockTerminal::new(100, 26);
        terminal.draw(|frame| app.view_all(frame, &model));
        let output = terminal.buffer_as_string();

        assert!(output.contains("Profile"), "profile pane should render");
        assert!(output.contains("Goal 1"), "first goal row should render");
        assert!(output.contains("Goal 3"), "last goal row should render");
        assert!(
            output.contains("dry run: submissions are previewed"),
            "footer notice should render"
        );

        apply(&mut model, Msg::Submit);
        app.sync(&model).expect("sync should succeed");
        terminal.draw(|frame| app.view_all(frame, &model));
        let output = terminal.buffer_as_string();
        assert!(
            output.contains("Dry run"),
            "status overlay should render after submit"
        );
    }
}
