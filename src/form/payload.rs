//! Submission payload assembly.
//!
//! The transport expects a flat field-name to string-value mapping with
//! fixed names: the nine profile fields, then `Goal{i}` / `Goal{i}_target` /
//! `Goal{i}_years` per row (numbered from 1), then `num_goals`.

use super::{FormState, ProfileField};

/// Assembles the ordered field list for one submission.
///
/// Unselected rows contribute an empty `Goal{i}` value; `num_goals` carries
/// the rendered row count.
pub fn form_fields(state: &FormState) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = ProfileField::ALL
        .iter()
        .map(|field| {
            (
                field.field_name().to_string(),
                state.profile.get(*field).to_string(),
            )
        })
        .collect();

    for (index, row) in state.rows().iter().enumerate() {
        let number = index + 1;
        let category = row
            .selected
            .and_then(|choice| state.catalog().label(choice))
            .unwrap_or("");
        fields.push((format!("Goal{number}"), category.to_string()));
        fields.push((format!("Goal{number}_target"), row.target_amount.clone()));
        fields.push((format!("Goal{number}_years"), row.horizon_years.clone()));
    }

    fields.push(("num_goals".to_string(), state.rows().len().to_string()));
    fields
}
