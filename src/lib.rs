pub mod catalog;
pub mod form;
pub mod logging;
pub mod settings;
pub mod submit;
pub mod theme;
pub mod ui_realm;
