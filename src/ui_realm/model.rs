use tuirealm::Update;
use tracing::{error, info};

use crate::form::{FormState, ProfileFields};
use crate::submit::{self, SubmitConfig, SubmitOutcome};

use super::messages::Msg;

/// Content of the submission status overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub title: String,
    pub lines: Vec<String>,
    pub is_error: bool,
}

/// Canonical application state: the single `FormState` plus UI lifecycle
/// flags. All mutation happens here, inside the update cycle.
pub struct Model {
    pub form: FormState,
    pub submit_config: SubmitConfig,
    row_count: usize,
    pub status: Option<StatusNotice>,
    pub should_quit: bool,
    generation: u64,
}

impl Model {
    pub fn new(form: FormState, submit_config: SubmitConfig) -> Self {
        let row_count = form.rows().len();
        Self {
            form,
            submit_config,
            row_count,
            status: None,
            should_quit: false,
            generation: 0,
        }
    }

    /// Monotonic change counter; the view layer syncs when it moves.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    fn changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn submit(&mut self) {
        let payload = self.form.payload();
        match submit::send(&self.submit_config, &payload) {
            Ok(SubmitOutcome::Accepted { detail }) => {
                info!("submission accepted: {detail}");
                self.status = Some(StatusNotice {
                    title: "Submitted".to_string(),
                    lines: vec![detail],
                    is_error: false,
                });
            }
            Ok(SubmitOutcome::Rejected { detail }) => {
                error!("submission rejected: {detail}");
                self.status = Some(StatusNotice {
                    title: "Rejected".to_string(),
                    lines: vec![detail],
                    is_error: true,
                });
            }
            Ok(SubmitOutcome::Skipped { payload_preview }) => {
                info!("dry run, payload not sent");
                self.status = Some(StatusNotice {
                    title: "Dry run".to_string(),
                    lines: payload_preview.lines().map(str::to_string).collect(),
                    is_error: false,
                });
            }
            Err(err) => {
                error!("submission failed: {err:#}");
                self.status = Some(StatusNotice {
                    title: "Submission failed".to_string(),
                    lines: vec![format!("{err:#}")],
                    is_error: true,
                });
            }
        }
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        match msg? {
            Msg::ProfileEdited { field, value } => {
                self.form.edit_profile_field(field, value);
                self.changed();
            }
            Msg::CategorySelected { row, choice } => {
                self.form.select_category(row, choice);
                self.changed();
            }
            Msg::GoalEdited { row, field, value } => {
                self.form.edit_goal_field(row, field, value);
                self.changed();
            }
            Msg::Submit => {
                self.submit();
                self.changed();
            }
            Msg::ResetForm => {
                self.form.profile = ProfileFields::default();
                self.form.render_rows(self.row_count);
                self.changed();
            }
            Msg::DismissStatus => {
                if self.status.take().is_some() {
                    self.changed();
                }
            }
            Msg::Quit => {
                self.should_quit = true;
            }
            // Focus routing is a view concern; Tick only forces a redraw.
            Msg::FocusNextSection
            | Msg::FocusPreviousSection
            | Msg::FocusChanged
            | Msg::Tick => {}
        }
        None
    }
}
