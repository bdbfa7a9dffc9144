pub mod access_denied;
pub mod badge;
pub mod exercise_row;
pub mod form_field;
pub mod header;
pub mod modal;
pub mod progress_bar;
pub mod retry_panel;
