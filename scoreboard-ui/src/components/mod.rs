//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod nav;
pub mod records_table;
pub mod student_form;
pub mod toast;

pub use loading::Loading;
pub use nav::Nav;
pub use records_table::RecordsTable;
pub use student_form::StudentForm;
pub use toast::Toast;
