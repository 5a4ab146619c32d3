//! End-date calculation for a class, from its course's instructional hours.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::catalog::CourseInfo;
use crate::models::Shift;

/// Teaching hours per class day.
pub fn hours_per_day(shift: Shift) -> u32 {
    match shift {
        Shift::Morning | Shift::Afternoon => 4,
        Shift::Evening => 3,
    }
}

pub fn required_days(total_hours: u32, shift: Shift) -> u32 {
    total_hours.div_ceil(hours_per_day(shift))
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Date on which the last required business day falls, counting `start`
/// itself when it is a weekday. Weekends are skipped.
///
/// `None` only if the calendar runs out, which no real workload reaches.
pub fn compute_end_date(total_hours: u32, shift: Shift, start: NaiveDate) -> Option<NaiveDate> {
    let required = required_days(total_hours, shift);
    let mut cursor = start;
    let mut counted = 0;

    loop {
        if is_business_day(cursor) {
            counted += 1;
        }
        if counted >= required {
            return Some(cursor);
        }
        cursor = cursor.succ_opt()?;
    }
}

/// Everything the class form shows next to the computed end date.
/// Every field is `None` while the inputs are incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleEstimate {
    pub total_hours: Option<u32>,
    pub hours_per_day: Option<u32>,
    pub required_days: Option<u32>,
    pub end_date: Option<NaiveDate>,
}

/// Lenient entry point: any missing input (or a workload text without digits)
/// yields an estimate with no end date rather than an error.
pub fn estimate(
    course: Option<&CourseInfo>,
    shift: Option<Shift>,
    start: Option<NaiveDate>,
) -> ScheduleEstimate {
    let total_hours = course.and_then(CourseInfo::total_hours);
    let mut estimate = ScheduleEstimate {
        total_hours,
        hours_per_day: shift.map(hours_per_day),
        ..Default::default()
    };

    if let (Some(hours), Some(shift)) = (total_hours, shift) {
        estimate.required_days = Some(required_days(hours, shift));
        estimate.end_date = start.and_then(|start| compute_end_date(hours, shift, start));
    }
    estimate
}

pub fn end_date_for(
    course: Option<&CourseInfo>,
    shift: Option<Shift>,
    start: Option<NaiveDate>,
) -> Option<NaiveDate> {
    estimate(course, shift, start).end_date
}
