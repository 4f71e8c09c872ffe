//! Category mutual exclusion across goal rows.
//!
//! A catalog option is unavailable in a row exactly when some other row has
//! it selected. The flags are derived state: every call recomputes them from
//! the current selections, with no memory of previous passes.

use super::GoalRow;

/// Recomputes the `disabled` flags of every row from current selections.
///
/// Option `c` is disabled in row `r` iff `c` is selected in some row other
/// than `r`. A row's own selection stays enabled so it can be re-picked or
/// cleared. Tolerates duplicate selections forced from outside the UI.
pub fn recompute_availability(rows: &mut [GoalRow], catalog_len: usize) {
    let selections: Vec<Option<usize>> = rows.iter().map(|row| row.selected).collect();

    for (index, row) in rows.iter_mut().enumerate() {
        row.disabled.resize(catalog_len, false);
        for option in 0..catalog_len {
            let taken_elsewhere = selections
                .iter()
                .enumerate()
                .any(|(other, sel)| other != index && *sel == Some(option));
            row.disabled[option] = taken_elsewhere && row.selected != Some(option);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: usize, catalog_len: usize) -> Vec<GoalRow> {
        let mut rows: Vec<GoalRow> = (0..count)
            .map(|_| GoalRow {
                selected: None,
                target_amount: String::new(),
                horizon_years: String::new(),
                disabled: vec![false; catalog_len],
            })
            .collect();
        recompute_availability(&mut rows, catalog_len);
        rows
    }

    #[test]
    fn selection_disables_option_in_other_rows_only() {
        let mut rows = rows(3, 3);
        rows[0].selected = Some(1);
        recompute_availability(&mut rows, 3);

        assert!(!rows[0].disabled[1]);
        assert!(rows[1].disabled[1]);
        assert!(rows[2].disabled[1]);
        assert!(!rows[1].disabled[0]);
        assert!(!rows[2].disabled[2]);
    }

    #[test]
    fn changing_selection_releases_old_category() {
        let mut rows = rows(2, 3);
        rows[0].selected = Some(0);
        recompute_availability(&mut rows, 3);
        assert!(rows[1].disabled[0]);

        rows[0].selected = Some(2);
        recompute_availability(&mut rows, 3);
        assert!(!rows[1].disabled[0]);
        assert!(rows[1].disabled[2]);
    }

    #[test]
    fn clearing_selection_releases_category() {
        let mut rows = rows(2, 3);
        rows[0].selected = Some(1);
        recompute_availability(&mut rows, 3);
        assert!(rows[1].disabled[1]);

        rows[0].selected = None;
        recompute_availability(&mut rows, 3);
        assert!(rows.iter().all(|row| !row.disabled.iter().any(|d| *d)));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut rows = rows(3, 4);
        rows[0].selected = Some(0);
        rows[2].selected = Some(3);
        recompute_availability(&mut rows, 4);
        let first_pass = rows.clone();

        recompute_availability(&mut rows, 4);
        assert_eq!(rows, first_pass);
    }

    #[test]
    fn forced_duplicates_are_tolerated() {
        let mut rows = rows(2, 2);
        rows[0].selected = Some(0);
        rows[1].selected = Some(0);
        recompute_availability(&mut rows, 2);

        // Each row keeps its own selection enabled even though both rows
        // hold the same category.
        assert!(!rows[0].disabled[0]);
        assert!(!rows[1].disabled[0]);
    }

    #[test]
    fn walkthrough_scenario() {
        // Catalog [A, B, C] = indices [0, 1, 2], three rows.
        let mut rows = rows(3, 3);

        rows[0].selected = Some(0);
        recompute_availability(&mut rows, 3);
        assert!(rows[1].disabled[0]);
        assert!(rows[2].disabled[0]);

        rows[1].selected = Some(1);
        recompute_availability(&mut rows, 3);
        assert!(rows[0].disabled[1]);
        assert!(!rows[0].disabled[0]);
        assert!(rows[2].disabled[0]);
        assert!(rows[2].disabled[1]);

        rows[0].selected = None;
        recompute_availability(&mut rows, 3);
        assert!(!rows[1].disabled[0]);
        assert!(!rows[2].disabled[0]);
        assert!(rows[2].disabled[1]);
    }
}
