use serde::Deserialize;

use crate::models::{ClassRecord, Shift, StudentRecord};

use super::ClassRoster;

/// A set of predicates over records of type `R`.
pub trait Criteria<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Stable filter: keeps the records that match, in their original order.
pub fn apply_filters<'a, R, C>(records: &'a [R], criteria: &C) -> Vec<&'a R>
where
    C: Criteria<R> + ?Sized,
{
    records.iter().filter(|r| criteria.matches(r)).collect()
}

fn name_matches(name: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| name.to_lowercase().contains(&n.to_lowercase()))
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Raw values of the student filter form, as they arrive from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilterParams {
    pub name: Option<String>,
    pub course: Option<String>,
    pub term: Option<String>,
    pub scholarship: Option<String>,
    pub class_id: Option<String>,
}

/// Active predicates of the student list. `None` always matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Exact course title, matched against any of the student's courses.
    pub course: Option<String>,
    pub term: Option<u32>,
    pub scholarship: Option<bool>,
    pub class_id: Option<i64>,
}

impl StudentFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// Unparseable values degrade to "match everything" for that predicate.
impl From<StudentFilterParams> for StudentFilter {
    fn from(params: StudentFilterParams) -> Self {
        Self {
            name: non_empty(params.name),
            course: non_empty(params.course),
            term: params.term.and_then(|t| t.trim().parse().ok()),
            scholarship: params.scholarship.and_then(|s| match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            }),
            class_id: params.class_id.and_then(|c| c.trim().parse().ok()),
        }
    }
}

impl Criteria<StudentRecord> for StudentFilter {
    fn matches(&self, student: &StudentRecord) -> bool {
        name_matches(&student.name, self.name.as_deref())
            && self.course.as_deref().is_none_or(|c| student.has_course(c))
            && self.term.is_none_or(|t| student.term == t)
            && self.scholarship.is_none_or(|b| student.scholarship == b)
            && self.class_id.is_none_or(|id| student.class_id() == Some(id))
    }
}

/// Raw values of the class filter form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassFilterParams {
    pub shift: Option<String>,
    pub student_name: Option<String>,
    pub course: Option<String>,
}

/// Active predicates of the class list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassFilter {
    pub shift: Option<Shift>,
    /// Matches a class when any of its students' names contains it.
    pub student_name: Option<String>,
    pub course: Option<String>,
}

impl ClassFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The student-name predicate needs the class -> students relation.
    pub fn bind<'a>(&'a self, roster: &'a ClassRoster<'a>) -> BoundClassFilter<'a> {
        BoundClassFilter {
            filter: self,
            roster,
        }
    }
}

impl From<ClassFilterParams> for ClassFilter {
    fn from(params: ClassFilterParams) -> Self {
        Self {
            shift: params.shift.as_deref().and_then(Shift::parse),
            student_name: non_empty(params.student_name),
            course: non_empty(params.course),
        }
    }
}

pub struct BoundClassFilter<'a> {
    filter: &'a ClassFilter,
    roster: &'a ClassRoster<'a>,
}

impl Criteria<ClassRecord> for BoundClassFilter<'_> {
    fn matches(&self, class: &ClassRecord) -> bool {
        let filter = self.filter;
        filter.shift.is_none_or(|s| class.shift == Some(s))
            && filter.course.as_deref().is_none_or(|c| class.has_course(c))
            && filter.student_name.as_deref().is_none_or(|needle| {
                self.roster
                    .students_of(class.id)
                    .iter()
                    .any(|s| name_matches(&s.name, Some(needle)))
            })
    }
}
