use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::StudentRecord;
use crate::roster::{
    self, ENROLLMENT_LIMIT, StudentFilter, StudentStats, TermStatus, apply_filters,
};
use crate::upstream::SchoolBackend;

/// A student as the list view shows it.
#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: StudentRecord,
    pub status: TermStatus,
    pub active: bool,
    pub discounted_fee: f64,
}

impl StudentView {
    pub fn new(student: &StudentRecord, as_of: NaiveDate) -> Self {
        Self {
            student: student.clone(),
            status: roster::status_from_term(student.term),
            active: student
                .enrollment_date
                .is_some_and(|d| roster::is_active(d, as_of)),
            discounted_fee: roster::discounted_fee(student, None),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentListing {
    pub students: Vec<StudentView>,
    /// Computed over every student, not only the filtered ones.
    pub stats: StudentStats,
    /// Options for the course filter.
    pub courses: Vec<String>,
}

/// Checks done before a student is handed to the backend.
pub fn validate(student: &StudentRecord) -> Result<(), AppError> {
    let name_len = student.name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        return Err(AppError::BadRequest(
            "name must have between 2 and 100 characters".to_string(),
        ));
    }
    if student.enrollment_date.is_none() {
        return Err(AppError::BadRequest("enrollment date is required".to_string()));
    }
    if !student.monthly_fee.is_finite() || student.monthly_fee <= 0.0 {
        return Err(AppError::BadRequest("monthly fee must be positive".to_string()));
    }
    if !(1..=10).contains(&student.term) {
        return Err(AppError::BadRequest("term must be between 1 and 10".to_string()));
    }
    let course_len = student.primary_course_name().chars().count();
    if course_len > 0 && !(2..=50).contains(&course_len) {
        return Err(AppError::BadRequest(
            "course name must have between 2 and 50 characters".to_string(),
        ));
    }
    Ok(())
}

fn course_options(students: &[StudentRecord]) -> Vec<String> {
    students
        .iter()
        .map(StudentRecord::primary_course_name)
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub struct StudentService {
    backend: Arc<dyn SchoolBackend>,
}

impl StudentService {
    pub fn new(backend: Arc<dyn SchoolBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(
        &self,
        filter: &StudentFilter,
        as_of: NaiveDate,
    ) -> Result<StudentListing, AppError> {
        let students = self.backend.list_students().await?;
        let visible = apply_filters(&students, filter);
        debug!("{} of {} students match {:?}", visible.len(), students.len(), filter);

        Ok(StudentListing {
            students: visible
                .into_iter()
                .map(|s| StudentView::new(s, as_of))
                .collect(),
            stats: roster::student_stats(&students),
            courses: course_options(&students),
        })
    }

    pub async fn get(&self, id: i64, as_of: NaiveDate) -> Result<StudentView, AppError> {
        let student = self.backend.get_student(id).await?;
        Ok(StudentView::new(&student, as_of))
    }

    pub async fn create(&self, student: StudentRecord) -> Result<(), AppError> {
        validate(&student)?;
        self.check_enrollment(&student, None).await?;
        self.backend.create_student(&student).await?;
        info!("Created student {}", student.name);
        Ok(())
    }

    pub async fn update(&self, id: i64, mut student: StudentRecord) -> Result<(), AppError> {
        validate(&student)?;
        student.id = Some(id);
        self.check_enrollment(&student, Some(id)).await?;
        self.backend.update_student(id, &student).await?;
        info!("Updated student {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete_student(id).await?;
        info!("Deleted student {}", id);
        Ok(())
    }

    async fn check_enrollment(
        &self,
        student: &StudentRecord,
        id: Option<i64>,
    ) -> Result<(), AppError> {
        let Some(class_id) = student.class_id() else {
            return Ok(());
        };
        let students = self.backend.list_students().await?;
        if !roster::has_room_for(&students, class_id, id) {
            warn!("Class {} is full, rejecting {}", class_id, student.name);
            return Err(AppError::Conflict(format!(
                "class {} already has {} students",
                class_id, ENROLLMENT_LIMIT
            )));
        }
        Ok(())
    }
}
