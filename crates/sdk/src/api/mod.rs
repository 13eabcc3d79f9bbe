//! Web service function groups, one module per Moodle component.

mod assign;
mod courses;
mod enrol;
mod forum;
mod quiz;
mod vpl;

pub use assign::AssignApi;
pub use courses::CoursesApi;
pub use enrol::EnrolApi;
pub use forum::ForumApi;
pub use quiz::QuizApi;
pub use vpl::VplApi;
