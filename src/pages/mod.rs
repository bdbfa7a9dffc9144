pub mod login;
pub mod my_progress;
pub mod my_trainings;
pub mod not_found;
pub mod progress_dashboard;
pub mod training_management;
pub mod user_management;
