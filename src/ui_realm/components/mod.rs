pub mod footer;
pub mod goal_row;
pub mod profile;
pub mod status_dialog;

pub use footer::Footer;
pub use goal_row::GoalRowView;
pub use profile::ProfilePane;
pub use status_dialog::StatusDialog;
