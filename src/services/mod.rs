pub mod classes;
pub mod courses;
pub mod dashboard;
pub mod students;

pub use classes::{ClassListing, ClassService, ClassView};
pub use courses::{CourseDetail, CourseService};
pub use dashboard::{Dashboard, DashboardService};
pub use students::{StudentListing, StudentService, StudentView};
