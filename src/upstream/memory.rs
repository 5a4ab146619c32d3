use std::sync::Mutex;

use async_trait::async_trait;

use super::{SchoolBackend, ensure_valid_id};
use crate::error::AppError;
use crate::models::{ClassRecord, StudentRecord};

struct Tables {
    students: Vec<StudentRecord>,
    classes: Vec<ClassRecord>,
    next_id: i64,
}

/// Backend kept in process memory, for tests.
pub struct InMemorySchoolBackend {
    tables: Mutex<Tables>,
    class_listing_fails: bool,
}

impl InMemorySchoolBackend {
    pub fn new(students: Vec<StudentRecord>, classes: Vec<ClassRecord>) -> Self {
        let next_id = students
            .iter()
            .filter_map(|s| s.id)
            .chain(classes.iter().filter_map(|c| c.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            tables: Mutex::new(Tables {
                students,
                classes,
                next_id,
            }),
            class_listing_fails: false,
        }
    }

    /// Makes `list_classes` fail the way a misconfigured backend does.
    pub fn with_failing_class_listing(mut self) -> Self {
        self.class_listing_fails = true;
        self
    }

    pub fn students(&self) -> Vec<StudentRecord> {
        self.tables
            .lock()
            .map(|t| t.students.clone())
            .unwrap_or_default()
    }

    pub fn classes(&self) -> Vec<ClassRecord> {
        self.tables
            .lock()
            .map(|t| t.classes.clone())
            .unwrap_or_default()
    }

    fn with_tables<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| AppError::InternalServerError)?;
        f(&mut *tables)
    }
}

impl Default for InMemorySchoolBackend {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl SchoolBackend for InMemorySchoolBackend {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, AppError> {
        self.with_tables(|t| Ok(t.students.clone()))
    }

    async fn get_student(&self, id: i64) -> Result<StudentRecord, AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            t.students
                .iter()
                .find(|s| s.id == Some(id))
                .cloned()
                .ok_or(AppError::NotFound)
        })
    }

    async fn create_student(&self, student: &StudentRecord) -> Result<(), AppError> {
        self.with_tables(|t| {
            let mut student = student.clone();
            student.id = Some(t.next_id);
            t.next_id += 1;
            t.students.push(student);
            Ok(())
        })
    }

    async fn update_student(&self, id: i64, student: &StudentRecord) -> Result<(), AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            let slot = t
                .students
                .iter_mut()
                .find(|s| s.id == Some(id))
                .ok_or(AppError::NotFound)?;
            *slot = StudentRecord {
                id: Some(id),
                ..student.clone()
            };
            Ok(())
        })
    }

    async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            let before = t.students.len();
            t.students.retain(|s| s.id != Some(id));
            if t.students.len() == before {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, AppError> {
        if self.class_listing_fails {
            return Err(AppError::UpstreamStatus {
                status: 500,
                message: "class listing unavailable".to_string(),
            });
        }
        self.with_tables(|t| Ok(t.classes.clone()))
    }

    async fn get_class(&self, id: i64) -> Result<ClassRecord, AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            t.classes
                .iter()
                .find(|c| c.id == Some(id))
                .cloned()
                .ok_or(AppError::NotFound)
        })
    }

    async fn create_class(&self, class: &ClassRecord) -> Result<(), AppError> {
        self.with_tables(|t| {
            let mut class = class.clone();
            class.id = Some(t.next_id);
            t.next_id += 1;
            t.classes.push(class);
            Ok(())
        })
    }

    async fn update_class(&self, id: i64, class: &ClassRecord) -> Result<(), AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            let slot = t
                .classes
                .iter_mut()
                .find(|c| c.id == Some(id))
                .ok_or(AppError::NotFound)?;
            *slot = ClassRecord {
                id: Some(id),
                ..class.clone()
            };
            Ok(())
        })
    }

    async fn delete_class(&self, id: i64) -> Result<(), AppError> {
        let id = ensure_valid_id(id)?;
        self.with_tables(|t| {
            let before = t.classes.len();
            t.classes.retain(|c| c.id != Some(id));
            if t.classes.len() == before {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }
}
