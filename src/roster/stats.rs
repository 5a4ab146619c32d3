use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::catalog;
use crate::models::{ClassRecord, StudentRecord};

/// Bucket for classes that have no shift.
pub const UNSPECIFIED_SHIFT: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStats {
    pub total: usize,
    pub scholarship_count: usize,
    pub distinct_courses: usize,
    pub average_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStats {
    pub total: usize,
    pub per_shift: BTreeMap<String, usize>,
}

pub fn scholarship_count(students: &[StudentRecord]) -> usize {
    students.iter().filter(|s| s.scholarship).count()
}

/// Number of distinct catalog courses taken by any student. Names that are
/// not canonical catalog titles are not counted.
pub fn distinct_course_count(students: &[StudentRecord]) -> usize {
    students
        .iter()
        .flat_map(|s| s.courses.iter())
        .map(|c| c.name.as_str())
        .filter(|name| catalog::is_canonical_title(name))
        .collect::<HashSet<_>>()
        .len()
}

/// Mean monthly fee; exactly 0 for an empty list.
pub fn average_fee(students: &[StudentRecord]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let total: f64 = students.iter().map(|s| s.monthly_fee).sum();
    total / students.len() as f64
}

pub fn student_stats(students: &[StudentRecord]) -> StudentStats {
    StudentStats {
        total: students.len(),
        scholarship_count: scholarship_count(students),
        distinct_courses: distinct_course_count(students),
        average_fee: average_fee(students),
    }
}

pub fn classes_per_shift(classes: &[ClassRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for class in classes {
        let key = class.shift.map(|s| s.as_str()).unwrap_or(UNSPECIFIED_SHIFT);
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn class_stats(classes: &[ClassRecord]) -> ClassStats {
    ClassStats {
        total: classes.len(),
        per_shift: classes_per_shift(classes),
    }
}
