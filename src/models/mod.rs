pub mod class;
pub mod course;
pub mod student;

pub use class::{ClassRecord, NewClassRequest, Shift};
pub use course::CourseRef;
pub use student::{ClassRef, StudentRecord, StudentSummary};
