//! State Management
//!
//! Home view state and response ordering.

pub mod home;
pub mod sequence;

pub use home::{provide_home_state, HomeState, SubmitAction};
pub use sequence::Sequencer;
