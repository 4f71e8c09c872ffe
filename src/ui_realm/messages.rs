//! Semantic user action messages for the form components.
//!
//! Raw key events stay inside the components; the model only sees user
//! intentions expressed through this enum.

use crate::form::{GoalField, ProfileField};

/// Semantic user action messages driving the `Model: Update<Msg>` cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Move focus to the next form section (profile, then each goal row).
    FocusNextSection,

    /// Move focus to the previous form section.
    FocusPreviousSection,

    /// Focus moved between fields inside the focused section. The model
    /// ignores this; it only forces a redraw.
    FocusChanged,

    /// A static field's displayed value changed.
    ProfileEdited { field: ProfileField, value: String },

    /// A goal row's category selector changed; `None` is the blank entry.
    CategorySelected { row: usize, choice: Option<usize> },

    /// A goal row's numeric field changed.
    GoalEdited {
        row: usize,
        field: GoalField,
        value: String,
    },

    /// Submit the form to the configured endpoint.
    Submit,

    /// Discard all entered values and re-render blank rows.
    ResetForm,

    /// Dismiss the submission status overlay.
    DismissStatus,

    /// Quit the application.
    Quit,

    /// Periodic tick for redraw.
    Tick,
}

#[cfg(test)]
mod msg {
    use super::*;

    #[test]
    fn constructible() {
        let _ = Msg::FocusNextSection;
        let _ = Msg::FocusPreviousSection;
        let _ = Msg::FocusChanged;
        let _ = Msg::ProfileEdited {
            field: ProfileField::UserName,
            value: "Priya".to_string(),
        };
        let _ = Msg::CategorySelected {
            row: 0,
            choice: Some(1),
        };
        let _ = Msg::GoalEdited {
            row: 2,
            field: GoalField::TargetAmount,
            value: "500000".to_string(),
        };
        let _ = Msg::Submit;
        let _ = Msg::ResetForm;
        let _ = Msg::DismissStatus;
        let _ = Msg::Quit;
        let _ = Msg::Tick;
    }

    #[test]
    fn clone_behavior() {
        let original = Msg::CategorySelected {
            row: 1,
            choice: None,
        };
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
