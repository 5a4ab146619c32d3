use std::sync::Arc;

use serde::Serialize;

use crate::catalog;
use crate::error::AppError;
use crate::models::{StudentRecord, StudentSummary};
use crate::roster;
use crate::upstream::SchoolBackend;

/// Number of students listed under "recently enrolled".
pub const RECENT_LIMIT: usize = 6;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_students: usize,
    pub scholarship_count: usize,
    pub total_courses: usize,
    pub average_fee: f64,
    pub recent_students: Vec<StudentSummary>,
}

pub fn summarize(students: &[StudentRecord]) -> Dashboard {
    let mut recent: Vec<&StudentRecord> = students.iter().collect();
    // Students without an enrollment date go last.
    recent.sort_by(|a, b| b.enrollment_date.cmp(&a.enrollment_date));

    Dashboard {
        total_students: students.len(),
        scholarship_count: roster::scholarship_count(students),
        total_courses: catalog::courses().len(),
        average_fee: roster::average_fee(students),
        recent_students: recent
            .into_iter()
            .take(RECENT_LIMIT)
            .map(StudentSummary::from)
            .collect(),
    }
}

pub struct DashboardService {
    backend: Arc<dyn SchoolBackend>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn SchoolBackend>) -> Self {
        Self { backend }
    }

    pub async fn load(&self) -> Result<Dashboard, AppError> {
        let students = self.backend.list_students().await?;
        Ok(summarize(&students))
    }
}
