use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog;
use crate::error::AppError;
use crate::models::{ClassRecord, CourseRef, NewClassRequest, StudentRecord, StudentSummary};
use crate::roster::{self, ClassFilter, ClassRoster, ClassStats, apply_filters};
use crate::schedule;
use crate::upstream::SchoolBackend;

/// A class with what the reverse index knows about it.
#[derive(Debug, Clone, Serialize)]
pub struct ClassView {
    #[serde(flatten)]
    pub class: ClassRecord,
    /// Catalog slug of the primary course, for pre-filling the class form.
    pub course_slug: Option<&'static str>,
    pub student_count: usize,
    pub at_capacity: bool,
    pub students: Vec<StudentSummary>,
    pub student_courses: Vec<String>,
}

impl ClassView {
    pub fn new(class: &ClassRecord, roster: &ClassRoster<'_>) -> Self {
        Self {
            class: class.clone(),
            course_slug: class
                .primary_course()
                .and_then(|c| catalog::find_by_title(&c.name))
                .map(|c| c.slug),
            student_count: roster.count(class.id),
            at_capacity: roster.is_at_capacity(class.id),
            students: roster
                .students_of(class.id)
                .iter()
                .map(|s| StudentSummary::from(*s))
                .collect(),
            student_courses: roster.student_course_names(class.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassListing {
    pub classes: Vec<ClassView>,
    pub stats: ClassStats,
    /// Set when the backend could not list classes and they were rebuilt
    /// from the students' class links.
    pub derived_from_students: bool,
}

/// Builds the record sent to the backend. The end date always comes from
/// the schedule calculator.
pub fn class_from_request(id: Option<i64>, req: &NewClassRequest) -> Result<ClassRecord, AppError> {
    let course = catalog::find_by_slug(&req.course_slug)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown course: {}", req.course_slug)))?;

    Ok(ClassRecord {
        id,
        shift: Some(req.shift),
        start_date: Some(req.start_date),
        end_date: schedule::end_date_for(Some(course), Some(req.shift), Some(req.start_date)),
        courses: vec![CourseRef::named(course.title)],
    })
}

pub struct ClassService {
    backend: Arc<dyn SchoolBackend>,
}

impl ClassService {
    pub fn new(backend: Arc<dyn SchoolBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, filter: &ClassFilter) -> Result<ClassListing, AppError> {
        let (classes, students, derived) = match self.backend.list_classes().await {
            Ok(classes) => {
                let students = self.backend.list_students().await.unwrap_or_else(|e| {
                    warn!("Could not load students for class counts: {}", e);
                    Vec::new()
                });
                (classes, students, false)
            }
            Err(e) => {
                warn!("Class listing failed, deriving classes from students: {}", e);
                let students = self.backend.list_students().await?;
                (roster::classes_from_students(&students), students, true)
            }
        };

        let roster = ClassRoster::build(&students);
        let visible = apply_filters(&classes, &filter.bind(&roster));

        Ok(ClassListing {
            classes: visible
                .into_iter()
                .map(|c| ClassView::new(c, &roster))
                .collect(),
            stats: roster::class_stats(&classes),
            derived_from_students: derived,
        })
    }

    pub async fn get(&self, id: i64) -> Result<ClassView, AppError> {
        let class = self.backend.get_class(id).await?;
        let students = self.backend.list_students().await?;
        Ok(ClassView::new(&class, &ClassRoster::build(&students)))
    }

    pub async fn create(&self, req: &NewClassRequest) -> Result<ClassRecord, AppError> {
        let class = class_from_request(None, req)?;
        self.backend.create_class(&class).await?;
        info!("Created {} class for {}", req.shift, req.course_slug);
        Ok(class)
    }

    pub async fn update(&self, id: i64, req: &NewClassRequest) -> Result<ClassRecord, AppError> {
        self.backend.get_class(id).await?;
        let class = class_from_request(Some(id), req)?;
        self.backend.update_class(id, &class).await?;
        info!("Updated class {}", id);
        Ok(class)
    }

    /// Refused while any student still belongs to the class.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let students: Vec<StudentRecord> = self.backend.list_students().await?;
        let enrolled = ClassRoster::build(&students).count(Some(id));
        if enrolled > 0 {
            return Err(AppError::Conflict(format!(
                "class {} still has {} student(s)",
                id, enrolled
            )));
        }
        self.backend.delete_class(id).await?;
        info!("Deleted class {}", id);
        Ok(())
    }
}
