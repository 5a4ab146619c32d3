use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{self, CourseInfo};
use crate::error::AppError;
use crate::models::{ClassRecord, StudentRecord, StudentSummary};
use crate::roster::ClassRoster;
use crate::upstream::SchoolBackend;

#[derive(Debug, Clone, Serialize)]
pub struct CourseClass {
    #[serde(flatten)]
    pub class: ClassRecord,
    pub student_count: usize,
}

/// A catalog course with the classes that offer it and the students linked
/// to it.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: &'static CourseInfo,
    pub total_hours: Option<u32>,
    pub classes: Vec<CourseClass>,
    pub students: Vec<StudentSummary>,
}

fn same_title(name: &str, title: &str) -> bool {
    name.trim().to_lowercase() == title.trim().to_lowercase()
}

/// A student belongs to the course when it lists the course itself, or when
/// it sits in one of the course's classes. Students without an id are
/// skipped; the rest appear once, in list order.
pub fn course_detail(
    course: &'static CourseInfo,
    classes: &[ClassRecord],
    students: &[StudentRecord],
) -> CourseDetail {
    let roster = ClassRoster::build(students);
    let offering: Vec<&ClassRecord> = classes
        .iter()
        .filter(|c| c.has_course(course.title))
        .collect();
    let class_ids: HashSet<i64> = offering.iter().filter_map(|c| c.id).collect();

    let mut seen = HashSet::new();
    let linked = students
        .iter()
        .filter(|s| {
            s.courses.iter().any(|c| same_title(&c.name, course.title))
                || s.class_id().is_some_and(|id| class_ids.contains(&id))
        })
        .filter(|s| s.id.is_some_and(|id| seen.insert(id)))
        .map(StudentSummary::from)
        .collect();

    CourseDetail {
        course,
        total_hours: course.total_hours(),
        classes: offering
            .into_iter()
            .map(|c| CourseClass {
                class: c.clone(),
                student_count: roster.count(c.id),
            })
            .collect(),
        students: linked,
    }
}

pub struct CourseService {
    backend: Arc<dyn SchoolBackend>,
}

impl CourseService {
    pub fn new(backend: Arc<dyn SchoolBackend>) -> Self {
        Self { backend }
    }

    pub fn catalog(&self) -> &'static [CourseInfo] {
        catalog::courses()
    }

    pub async fn detail(&self, slug: &str) -> Result<CourseDetail, AppError> {
        let course = catalog::find_by_slug(slug).ok_or(AppError::NotFound)?;
        let classes = self.backend.list_classes().await?;
        let students = self.backend.list_students().await?;
        Ok(course_detail(course, &classes, &students))
    }
}
