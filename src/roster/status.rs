use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::models::StudentRecord;

/// Fraction taken off a scholarship student's fee when none is given.
pub const DEFAULT_DISCOUNT: f64 = 0.5;

/// Progress band of a student, derived from the term number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TermStatus {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(rename = "Final-stage")]
    FinalStage,
}

impl TermStatus {
    pub fn label(self) -> &'static str {
        match self {
            TermStatus::Beginner => "Beginner",
            TermStatus::Intermediate => "Intermediate",
            TermStatus::Advanced => "Advanced",
            TermStatus::FinalStage => "Final-stage",
        }
    }
}

pub fn status_from_term(term: u32) -> TermStatus {
    match term {
        0..=2 => TermStatus::Beginner,
        3..=4 => TermStatus::Intermediate,
        5..=6 => TermStatus::Advanced,
        _ => TermStatus::FinalStage,
    }
}

/// Enrolled strictly less than two years before `as_of`.
pub fn is_active(enrollment_date: NaiveDate, as_of: NaiveDate) -> bool {
    match as_of.checked_sub_months(Months::new(24)) {
        Some(cutoff) => enrollment_date > cutoff,
        None => true,
    }
}

/// Fee after the scholarship discount. Non-scholarship students always pay
/// the full fee, and a non-positive fraction leaves every fee unchanged.
pub fn discounted_fee(student: &StudentRecord, discount: Option<f64>) -> f64 {
    let discount = discount.unwrap_or(DEFAULT_DISCOUNT);
    if student.scholarship && discount > 0.0 {
        student.monthly_fee * (1.0 - discount)
    } else {
        student.monthly_fee
    }
}
