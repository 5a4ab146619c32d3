use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{ClassRecord, StudentRecord};

/// Maximum number of students a class may hold.
pub const ENROLLMENT_LIMIT: usize = 20;

/// Reverse index from class id to the students that point at it.
///
/// Students own the relation (student -> class by id); this index borrows
/// them and is rebuilt whenever the student list changes.
#[derive(Debug, Default)]
pub struct ClassRoster<'a> {
    by_class: HashMap<i64, Vec<&'a StudentRecord>>,
}

impl<'a> ClassRoster<'a> {
    pub fn build(students: &'a [StudentRecord]) -> Self {
        let mut by_class: HashMap<i64, Vec<&'a StudentRecord>> = HashMap::new();
        for student in students {
            if let Some(class_id) = student.class_id() {
                by_class.entry(class_id).or_default().push(student);
            }
        }
        Self { by_class }
    }

    pub fn students_of(&self, class_id: Option<i64>) -> &[&'a StudentRecord] {
        class_id
            .and_then(|id| self.by_class.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn student_ids(&self, class_id: Option<i64>) -> Vec<i64> {
        self.students_of(class_id)
            .iter()
            .filter_map(|s| s.id)
            .collect()
    }

    pub fn count(&self, class_id: Option<i64>) -> usize {
        self.students_of(class_id).len()
    }

    pub fn is_at_capacity(&self, class_id: Option<i64>) -> bool {
        self.count(class_id) >= ENROLLMENT_LIMIT
    }

    /// Sorted, distinct names of every course taken by the class's students.
    pub fn student_course_names(&self, class_id: Option<i64>) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .students_of(class_id)
            .iter()
            .flat_map(|s| s.courses.iter())
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}

/// Pre-save enrollment check: can `student_id` (None for a new student) be
/// placed in `class_id` without exceeding [`ENROLLMENT_LIMIT`]?
///
/// The student itself is not counted, so re-saving a member of a full class
/// is allowed.
pub fn has_room_for(students: &[StudentRecord], class_id: i64, student_id: Option<i64>) -> bool {
    let others = students
        .iter()
        .filter(|s| s.class_id() == Some(class_id))
        .filter(|s| student_id.is_none() || s.id != student_id)
        .count();
    others < ENROLLMENT_LIMIT
}

/// Rebuilds the class list from the students' class links, for when the
/// backend cannot list classes. One entry per class id, ordered by id; the
/// first student seen in a class supplies its shift, dates and course.
pub fn classes_from_students(students: &[StudentRecord]) -> Vec<ClassRecord> {
    let mut classes: BTreeMap<i64, ClassRecord> = BTreeMap::new();
    for class in students.iter().filter_map(|s| s.class.as_ref()) {
        if let Some(id) = class.id {
            classes.entry(id).or_insert_with(|| class.to_class());
        }
    }
    classes.into_values().collect()
}
