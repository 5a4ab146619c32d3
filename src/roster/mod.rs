//! Roster filter engine shared by the student and class list views.
//!
//! Everything here is pure: it works over records that were already fetched
//! and never mutates them.

pub mod filter;
pub mod index;
pub mod stats;
pub mod status;

pub use filter::{
    BoundClassFilter, ClassFilter, ClassFilterParams, Criteria, StudentFilter,
    StudentFilterParams, apply_filters,
};
pub use index::{ClassRoster, ENROLLMENT_LIMIT, classes_from_students, has_room_for};
pub use stats::{
    ClassStats, StudentStats, UNSPECIFIED_SHIFT, average_fee, class_stats, classes_per_shift,
    distinct_course_count, scholarship_count, student_stats,
};
pub use status::{DEFAULT_DISCOUNT, TermStatus, discounted_fee, is_active, status_from_term};
