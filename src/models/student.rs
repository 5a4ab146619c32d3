use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClassRecord, CourseRef, Shift};

/// Link from a student to the class it belongs to. The backend embeds a
/// partial copy of the class, which is enough to rebuild the class list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRef {
    pub id: Option<i64>,
    #[serde(rename = "turno", default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(rename = "dataInicio", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "dataFim", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "curso", default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseRef>,
}

impl ClassRef {
    pub fn new(id: i64, shift: Option<Shift>) -> Self {
        Self {
            id: Some(id),
            shift,
            ..Self::default()
        }
    }

    /// The class record this link describes, as far as the link knows it.
    pub fn to_class(&self) -> ClassRecord {
        ClassRecord {
            start_date: self.start_date,
            end_date: self.end_date,
            courses: self.course.iter().cloned().collect(),
            ..ClassRecord::new(self.id, self.shift)
        }
    }
}

/// A student ("aluno").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Absent until the backend has persisted the record.
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dataMatricula", default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(rename = "mensalidade", default)]
    pub monthly_fee: f64,
    #[serde(rename = "bolsista", default)]
    pub scholarship: bool,
    #[serde(rename = "semestre", default)]
    pub term: u32,
    #[serde(rename = "cursos", default)]
    pub courses: Vec<CourseRef>,
    #[serde(rename = "turma", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassRef>,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            enrollment_date: None,
            monthly_fee: 0.0,
            scholarship: false,
            term: 1,
            courses: Vec::new(),
            class: None,
        }
    }

    pub fn class_id(&self) -> Option<i64> {
        self.class.as_ref().and_then(|c| c.id)
    }

    pub fn has_course(&self, name: &str) -> bool {
        self.courses.iter().any(|c| c.name == name)
    }

    /// Compatibility adapter for call sites that still treat a student as
    /// having a single course: the first entry of the course list, or `""`.
    pub fn primary_course_name(&self) -> &str {
        self.courses.first().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Counterpart of [`Self::primary_course_name`]. An empty name clears the
    /// list; otherwise the first entry is renamed (or created). Other entries
    /// are never touched.
    pub fn set_primary_course_name(&mut self, name: &str) {
        if name.is_empty() {
            self.courses.clear();
            return;
        }
        match self.courses.first_mut() {
            Some(first) => first.name = name.to_string(),
            None => self.courses.push(CourseRef::named(name)),
        }
    }
}

/// Student as shown inside a class: no back-link to the class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "semestre")]
    pub term: u32,
    #[serde(rename = "bolsista")]
    pub scholarship: bool,
    #[serde(rename = "cursos")]
    pub courses: Vec<CourseRef>,
}

impl From<&StudentRecord> for StudentSummary {
    fn from(student: &StudentRecord) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            term: student.term,
            scholarship: student.scholarship,
            courses: student.courses.clone(),
        }
    }
}
