//! Form state for the financial plan intake form.
//!
//! The state is owned by the running page instance and mutated only from the
//! single-threaded update cycle: rendering rows, selecting categories, and
//! editing field text all run to completion inside one event.

pub mod payload;
pub mod selection;
pub mod validate;

use crate::catalog::CategoryCatalog;

pub const MIN_GOAL_ROWS: usize = 1;
pub const MAX_GOAL_ROWS: usize = 10;

/// Static (non-goal) form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    UserName,
    CurrentAge,
    RetirementAge,
    MonthlyExpenses,
    MonthlySalary,
    MonthlyEmi,
    PfCorpus,
    PfContribution,
    InvestmentCorpus,
}

impl ProfileField {
    pub const ALL: [Self; 9] = [
        Self::UserName,
        Self::CurrentAge,
        Self::RetirementAge,
        Self::MonthlyExpenses,
        Self::MonthlySalary,
        Self::MonthlyEmi,
        Self::PfCorpus,
        Self::PfContribution,
        Self::InvestmentCorpus,
    ];

    /// Submission field name.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::UserName => "user_name",
            Self::CurrentAge => "current_age",
            Self::RetirementAge => "retirement_age",
            Self::MonthlyExpenses => "monthly_expenses",
            Self::MonthlySalary => "monthly_salary",
            Self::MonthlyEmi => "monthly_emi",
            Self::PfCorpus => "pf_corpus",
            Self::PfContribution => "pf_contribution",
            Self::InvestmentCorpus => "investment_corpus",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UserName => "Name",
            Self::CurrentAge => "Current age",
            Self::RetirementAge => "Retirement age",
            Self::MonthlyExpenses => "Monthly expenses",
            Self::MonthlySalary => "Monthly salary",
            Self::MonthlyEmi => "Monthly EMI",
            Self::PfCorpus => "PF corpus",
            Self::PfContribution => "PF contribution",
            Self::InvestmentCorpus => "Investment corpus",
        }
    }

    /// Numeric fields are subject to the non-negativity validator.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::UserName)
    }
}

/// Editable numeric fields of a goal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalField {
    TargetAmount,
    HorizonYears,
}

/// Displayed values of the static fields, held as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub user_name: String,
    pub current_age: String,
    pub retirement_age: String,
    pub monthly_expenses: String,
    pub monthly_salary: String,
    pub monthly_emi: String,
    pub pf_corpus: String,
    pub pf_contribution: String,
    pub investment_corpus: String,
}

impl ProfileFields {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::UserName => &self.user_name,
            ProfileField::CurrentAge => &self.current_age,
            ProfileField::RetirementAge => &self.retirement_age,
            ProfileField::MonthlyExpenses => &self.monthly_expenses,
            ProfileField::MonthlySalary => &self.monthly_salary,
            ProfileField::MonthlyEmi => &self.monthly_emi,
            ProfileField::PfCorpus => &self.pf_corpus,
            ProfileField::PfContribution => &self.pf_contribution,
            ProfileField::InvestmentCorpus => &self.investment_corpus,
        }
    }

    fn set(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::UserName => &mut self.user_name,
            ProfileField::CurrentAge => &mut self.current_age,
            ProfileField::RetirementAge => &mut self.retirement_age,
            ProfileField::MonthlyExpenses => &mut self.monthly_expenses,
            ProfileField::MonthlySalary => &mut self.monthly_salary,
            ProfileField::MonthlyEmi => &mut self.monthly_emi,
            ProfileField::PfCorpus => &mut self.pf_corpus,
            ProfileField::PfContribution => &mut self.pf_contribution,
            ProfileField::InvestmentCorpus => &mut self.investment_corpus,
        };
        *slot = value;
    }
}

/// One repeated unit of the form: category selection plus the two numeric
/// goal fields, and the per-option availability flags the coordinator keeps
/// up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRow {
    /// Index into the catalog; `None` is the blank "unselected" entry.
    pub selected: Option<usize>,
    pub target_amount: String,
    pub horizon_years: String,
    /// `disabled[c]` means catalog entry `c` is currently unselectable in
    /// this row. The blank entry carries no flag; it is never disabled.
    pub disabled: Vec<bool>,
}

impl GoalRow {
    fn blank(catalog_len: usize) -> Self {
        Self {
            selected: None,
            target_amount: String::new(),
            horizon_years: String::new(),
            disabled: vec![false; catalog_len],
        }
    }
}

/// The whole form: catalog, static fields, and the ordered goal rows.
///
/// Invariants: no category is selected in two rows at once, and every
/// numeric field's displayed value, when it parses, is non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    catalog: CategoryCatalog,
    pub profile: ProfileFields,
    rows: Vec<GoalRow>,
}

impl FormState {
    pub fn new(catalog: CategoryCatalog, row_count: usize) -> Self {
        let mut state = Self {
            catalog,
            profile: ProfileFields::default(),
            rows: Vec::new(),
        };
        state.render_rows(row_count);
        state
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn rows(&self) -> &[GoalRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&GoalRow> {
        self.rows.get(index)
    }

    /// Replaces any previously rendered rows with `count` fresh rows.
    ///
    /// Prior row state is discarded; re-rendering is a full reset. The count
    /// is clamped to the supported range.
    pub fn render_rows(&mut self, count: usize) {
        let count = count.clamp(MIN_GOAL_ROWS, MAX_GOAL_ROWS);
        self.rows = (0..count)
            .map(|_| GoalRow::blank(self.catalog.len()))
            .collect();
        selection::recompute_availability(&mut self.rows, self.catalog.len());
    }

    /// Applies a selector change and recomputes availability across rows.
    ///
    /// Out-of-range rows or choices are ignored, and a choice the coordinator
    /// has disabled for this row is refused; the UI never offers one, so this
    /// only matters when state is driven from outside the UI.
    pub fn select_category(&mut self, row: usize, choice: Option<usize>) {
        let catalog_len = self.catalog.len();
        let Some(slot) = self.rows.get_mut(row) else {
            return;
        };
        if let Some(choice) = choice {
            if choice >= catalog_len {
                return;
            }
            if slot.disabled.get(choice).copied().unwrap_or(false) {
                return;
            }
        }
        slot.selected = choice;
        selection::recompute_availability(&mut self.rows, catalog_len);
    }

    /// Applies an edit to a goal row's numeric field, clearing negatives.
    pub fn edit_goal_field(&mut self, row: usize, field: GoalField, value: String) {
        let Some(slot) = self.rows.get_mut(row) else {
            return;
        };
        let value = validate::sanitize(value);
        match field {
            GoalField::TargetAmount => slot.target_amount = value,
            GoalField::HorizonYears => slot.horizon_years = value,
        }
    }

    /// Applies an edit to a static field. Numeric fields are sanitized;
    /// the name field is stored as entered.
    pub fn edit_profile_field(&mut self, field: ProfileField, value: String) {
        let value = if field.is_numeric() {
            validate::sanitize(value)
        } else {
            value
        };
        self.profile.set(field, value);
    }

    /// The field-name to value mapping handed to the submission transport.
    pub fn payload(&self) -> Vec<(String, String)> {
        payload::form_fields(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_row_form() -> FormState {
        FormState::new(CategoryCatalog::new(["A", "B", "C"]), 3)
    }

    #[test]
    fn render_rows_creates_blank_rows() {
        let form = three_row_form();
        assert_eq!(form.rows().len(), 3);
        for row in form.rows() {
            assert_eq!(row.selected, None);
            assert!(row.target_amount.is_empty());
            assert!(row.horizon_years.is_empty());
            assert_eq!(row.disabled, vec![false; 3]);
        }
    }

    #[test]
    fn render_rows_discards_prior_state() {
        let mut form = three_row_form();
        form.select_category(0, Some(1));
        form.edit_goal_field(0, GoalField::TargetAmount, "500000".to_string());

        form.render_rows(3);

        assert_eq!(form.row(0).unwrap().selected, None);
        assert!(form.row(0).unwrap().target_amount.is_empty());
        assert!(
            form.rows()
                .iter()
                .all(|row| !row.disabled.iter().any(|d| *d))
        );
    }

    #[test]
    fn render_rows_clamps_count() {
        let mut form = three_row_form();
        form.render_rows(0);
        assert_eq!(form.rows().len(), MIN_GOAL_ROWS);
        form.render_rows(99);
        assert_eq!(form.rows().len(), MAX_GOAL_ROWS);
    }

    #[test]
    fn select_category_refuses_disabled_choice() {
        let mut form = three_row_form();
        form.select_category(0, Some(0));
        assert!(form.row(1).unwrap().disabled[0]);

        form.select_category(1, Some(0));
        assert_eq!(form.row(1).unwrap().selected, None);
    }

    #[test]
    fn select_category_ignores_out_of_range() {
        let mut form = three_row_form();
        form.select_category(7, Some(0));
        form.select_category(0, Some(9));
        assert!(form.rows().iter().all(|row| row.selected.is_none()));
    }

    #[test]
    fn reselecting_own_category_is_allowed() {
        let mut form = three_row_form();
        form.select_category(0, Some(2));
        form.select_category(0, Some(2));
        assert_eq!(form.row(0).unwrap().selected, Some(2));
    }

    #[test]
    fn goal_field_edits_clear_negatives() {
        let mut form = three_row_form();
        form.edit_goal_field(0, GoalField::TargetAmount, "-100".to_string());
        assert!(form.row(0).unwrap().target_amount.is_empty());

        form.edit_goal_field(0, GoalField::HorizonYears, "5".to_string());
        assert_eq!(form.row(0).unwrap().horizon_years, "5");
    }

    #[test]
    fn profile_edits_sanitize_numeric_fields_only() {
        let mut form = three_row_form();
        form.edit_profile_field(ProfileField::CurrentAge, "-30".to_string());
        assert!(form.profile.current_age.is_empty());

        form.edit_profile_field(ProfileField::UserName, "-weird name".to_string());
        assert_eq!(form.profile.user_name, "-weird name");
    }
}
