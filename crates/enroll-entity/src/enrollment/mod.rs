//! Enrollment domain entities.

pub mod model;
pub mod status;
pub mod view;

pub use model::Enrollment;
pub use status::EnrollmentStatus;
pub use view::EnrollmentView;
